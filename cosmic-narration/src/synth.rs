//! Speech engine abstraction

use crate::voice::Voice;
use cosmic_core::Result;

/// Identifies one `speak` request so late events can be told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtteranceId(pub u64);

/// A request to speak some text
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub voice: Voice,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    /// Utterance at normal rate, pitch and volume
    pub fn new(id: UtteranceId, text: impl Into<String>, voice: Voice) -> Self {
        Self {
            id,
            text: text.into(),
            voice,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Notifications from the engine, delivered over its event channel
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Started(UtteranceId),
    Ended(UtteranceId),
    Failed(UtteranceId, String),
    /// The voice list changed; selection should be redone
    VoicesChanged,
}

/// A text-to-speech engine
///
/// Engines queue utterances and report progress asynchronously through the
/// receiver returned by [`events`](SpeechSynthesizer::events).
pub trait SpeechSynthesizer {
    /// Voices currently available. May be empty until the engine has loaded.
    fn voices(&self) -> Vec<Voice>;

    fn speak(&mut self, utterance: Utterance) -> Result<()>;

    fn pause(&mut self);

    fn resume(&mut self);

    /// Drop the current and all queued utterances
    fn cancel(&mut self);

    fn events(&self) -> flume::Receiver<SpeechEvent>;

    /// Drive engines that have no clock of their own. `dt` is in seconds.
    fn advance(&mut self, _dt: f32) {}
}
