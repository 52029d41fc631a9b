//! In-process speech engine that produces no audio
//!
//! Each utterance lasts as long as it would take to read aloud at a fixed
//! words-per-minute pace. It keeps narration timing realistic on machines
//! without a system speech service and makes the narrator testable.

use crate::synth::{SpeechEvent, SpeechSynthesizer, Utterance, UtteranceId};
use crate::voice::Voice;
use cosmic_core::{Error, Result};
use std::collections::VecDeque;

/// Typical conversational speaking pace
pub const DEFAULT_WORDS_PER_MINUTE: f32 = 175.0;
pub const MIN_WORDS_PER_MINUTE: f32 = 1.0;

#[derive(Debug)]
struct Queued {
    id: UtteranceId,
    duration: f32,
    elapsed: f32,
    started: bool,
}

#[derive(Debug)]
pub struct SilentSynthesizer {
    voices: Vec<Voice>,
    words_per_minute: f32,
    queue: VecDeque<Queued>,
    paused: bool,
    sender: flume::Sender<SpeechEvent>,
    receiver: flume::Receiver<SpeechEvent>,
}

impl Default for SilentSynthesizer {
    fn default() -> Self {
        Self::new(vec![Voice {
            name: "Silent English".to_string(),
            lang: "en-US".to_string(),
            default: true,
        }])
    }
}

impl SilentSynthesizer {
    pub fn new(voices: Vec<Voice>) -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            voices,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            queue: VecDeque::new(),
            paused: false,
            sender,
            receiver,
        }
    }

    /// Speaking pace, clamped to at least one word per minute. NaN falls back to the default.
    pub fn with_words_per_minute(mut self, words_per_minute: f32) -> Self {
        self.words_per_minute = if words_per_minute.is_nan() {
            DEFAULT_WORDS_PER_MINUTE
        } else {
            words_per_minute.clamp(MIN_WORDS_PER_MINUTE, f32::MAX)
        };
        self
    }

    /// Replace the voice list, as an engine does once it finishes loading
    pub fn set_voices(&mut self, voices: Vec<Voice>) {
        self.voices = voices;
        self.emit(SpeechEvent::VoicesChanged);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Utterances not yet finished, including the one being spoken
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Seconds needed to read `text` at `rate`
    pub fn duration_of(&self, text: &str, rate: f32) -> f32 {
        let words = text.split_whitespace().count() as f32;
        words / (self.words_per_minute * rate) * 60.0
    }

    fn emit(&self, event: SpeechEvent) {
        // The receiver lives in `self`, so the channel cannot be disconnected
        let _ = self.sender.send(event);
    }
}

impl SpeechSynthesizer for SilentSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<()> {
        if !(utterance.rate > 0.0 && utterance.rate.is_finite()) {
            return Err(Error::Speech(format!("invalid speech rate {}", utterance.rate)));
        }
        let duration = self.duration_of(&utterance.text, utterance.rate);
        log::info!(
            "speaking utterance {} with '{}' ({:.1}s)",
            utterance.id.0,
            utterance.voice.name,
            duration
        );
        self.queue.push_back(Queued {
            id: utterance.id,
            duration,
            elapsed: 0.0,
            started: false,
        });
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn cancel(&mut self) {
        for queued in self.queue.drain(..).collect::<Vec<_>>() {
            log::debug!("canceled utterance {}", queued.id.0);
            self.emit(SpeechEvent::Failed(queued.id, "canceled".to_string()));
        }
        self.paused = false;
    }

    fn events(&self) -> flume::Receiver<SpeechEvent> {
        self.receiver.clone()
    }

    fn advance(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        let Some(front) = self.queue.front_mut() else {
            return;
        };

        if !front.started {
            front.started = true;
            let id = front.id;
            self.emit(SpeechEvent::Started(id));
            return;
        }

        front.elapsed += dt;
        if front.elapsed >= front.duration {
            let id = front.id;
            self.queue.pop_front();
            log::debug!("utterance {} finished", id.0);
            self.emit(SpeechEvent::Ended(id));
        }
    }
}
