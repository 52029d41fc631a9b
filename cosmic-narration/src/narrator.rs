//! Narration playback state machine

use crate::script::narration_for;
use crate::synth::{SpeechEvent, SpeechSynthesizer, Utterance, UtteranceId};
use crate::voice::{select_voice, Voice, VoicePreferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    /// Handed to the engine, waiting for it to start
    Pending,
    Speaking,
    Paused,
}

/// Speaks the script of the selected planet and tracks playback
///
/// Engine events are only read in [`pump`](Narrator::pump), so all state
/// changes happen on the caller's thread. Events about utterances other than
/// the current one are ignored.
pub struct Narrator<S: SpeechSynthesizer> {
    engine: S,
    events: flume::Receiver<SpeechEvent>,
    prefs: VoicePreferences,
    voice: Option<Voice>,
    state: PlaybackState,
    current: Option<UtteranceId>,
    next_id: u64,
    planet: Option<String>,
    script: Option<&'static str>,
    show_text: bool,
}

impl<S: SpeechSynthesizer> Narrator<S> {
    pub fn new(engine: S, prefs: VoicePreferences) -> Self {
        let events = engine.events();
        let voice = select_voice(&engine.voices(), &prefs);
        match &voice {
            Some(v) => log::info!("narration voice: {} ({})", v.name, v.lang),
            None => log::debug!("no speech voices available yet"),
        }

        Self {
            engine,
            events,
            prefs,
            voice,
            state: PlaybackState::Idle,
            current: None,
            next_id: 0,
            planet: None,
            script: None,
            show_text: true,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// True while speech is audible or about to start
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Pending | PlaybackState::Speaking)
    }

    pub fn voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }

    pub fn planet(&self) -> Option<&str> {
        self.planet.as_deref()
    }

    pub fn script(&self) -> Option<&'static str> {
        self.script
    }

    pub fn show_text(&self) -> bool {
        self.show_text
    }

    pub fn engine(&self) -> &S {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut S {
        &mut self.engine
    }

    /// Follow the selected planet. A newly selected planet is narrated from
    /// the start; clearing the selection stops narration.
    pub fn select_planet(&mut self, planet: Option<&str>) {
        if planet == self.planet.as_deref() {
            return;
        }

        self.stop();
        self.planet = planet.map(str::to_string);
        self.script = planet.and_then(narration_for);

        if let Some(script) = self.script {
            self.play(script);
        } else if let Some(name) = planet {
            log::debug!("no narration for '{}'", name);
        }
    }

    /// Speak `text`, replacing anything already speaking
    pub fn play(&mut self, text: &str) {
        let Some(voice) = self.voice.clone() else {
            log::debug!("narration skipped: no voice");
            return;
        };
        if text.is_empty() {
            return;
        }

        self.engine.cancel();
        self.next_id += 1;
        let id = UtteranceId(self.next_id);

        match self.engine.speak(Utterance::new(id, text, voice)) {
            Ok(()) => {
                self.current = Some(id);
                self.state = PlaybackState::Pending;
            }
            Err(e) => {
                log::warn!("speech engine refused utterance: {}", e);
                self.current = None;
                self.state = PlaybackState::Idle;
            }
        }
    }

    pub fn stop(&mut self) {
        self.engine.cancel();
        self.current = None;
        self.state = PlaybackState::Idle;
    }

    /// Pause while speaking, resume while paused, otherwise replay the
    /// current planet's script
    pub fn toggle_play_pause(&mut self) {
        match self.state {
            PlaybackState::Speaking => {
                self.engine.pause();
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                self.engine.resume();
                self.state = PlaybackState::Speaking;
            }
            PlaybackState::Idle | PlaybackState::Pending => {
                if let Some(script) = self.script {
                    self.play(script);
                }
            }
        }
    }

    pub fn toggle_text(&mut self) {
        self.show_text = !self.show_text;
    }

    /// Drain engine events and update playback state
    pub fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SpeechEvent::VoicesChanged => {
                    self.voice = select_voice(&self.engine.voices(), &self.prefs);
                    if let Some(v) = &self.voice {
                        log::info!("narration voice: {} ({})", v.name, v.lang);
                    }
                }
                SpeechEvent::Started(id) if Some(id) == self.current => {
                    if self.state == PlaybackState::Pending {
                        self.state = PlaybackState::Speaking;
                    }
                }
                SpeechEvent::Ended(id) if Some(id) == self.current => {
                    self.current = None;
                    self.state = PlaybackState::Idle;
                }
                SpeechEvent::Failed(id, reason) if Some(id) == self.current => {
                    log::debug!("utterance {} failed: {}", id.0, reason);
                    self.current = None;
                    self.state = PlaybackState::Idle;
                }
                stale => log::trace!("ignoring stale speech event {:?}", stale),
            }
        }
    }

    /// Advance the engine clock by `dt` seconds and process its events
    pub fn update(&mut self, dt: f32) {
        self.engine.advance(dt);
        self.pump();
    }
}

impl<S: SpeechSynthesizer> Drop for Narrator<S> {
    fn drop(&mut self) {
        self.engine.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::silent::SilentSynthesizer;

    fn narrator() -> Narrator<SilentSynthesizer> {
        Narrator::new(SilentSynthesizer::default(), VoicePreferences::default())
    }

    #[test]
    fn test_select_planet_starts_pending() {
        let mut n = narrator();
        n.select_planet(Some("Earth"));
        assert_eq!(n.state(), PlaybackState::Pending);
        assert_eq!(n.planet(), Some("Earth"));
        assert!(n.script().unwrap().starts_with("Our home planet"));

        n.update(0.016);
        assert_eq!(n.state(), PlaybackState::Speaking);
    }

    #[test]
    fn test_unknown_planet_is_silent() {
        let mut n = narrator();
        n.select_planet(Some("Pluto"));
        assert_eq!(n.state(), PlaybackState::Idle);
        assert_eq!(n.script(), None);
        assert_eq!(n.engine().pending(), 0);
    }

    #[test]
    fn test_no_voice_is_a_noop() {
        let mut n = Narrator::new(SilentSynthesizer::new(Vec::new()), VoicePreferences::default());
        n.select_planet(Some("Mars"));
        assert_eq!(n.state(), PlaybackState::Idle);
        assert_eq!(n.planet(), Some("Mars"));
    }

    #[test]
    fn test_empty_text_is_a_noop() {
        let mut n = narrator();
        n.play("");
        assert_eq!(n.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_pause_resume_cycle() {
        let mut n = narrator();
        n.select_planet(Some("Venus"));
        n.update(0.016);

        n.toggle_play_pause();
        assert_eq!(n.state(), PlaybackState::Paused);
        assert!(n.engine().is_paused());

        n.toggle_play_pause();
        assert_eq!(n.state(), PlaybackState::Speaking);
        assert!(!n.engine().is_paused());
    }

    #[test]
    fn test_toggle_replays_after_end() {
        let mut n = narrator();
        n.select_planet(Some("Mercury"));
        n.update(0.016);
        n.update(600.0);
        assert_eq!(n.state(), PlaybackState::Idle);

        n.toggle_play_pause();
        assert_eq!(n.state(), PlaybackState::Pending);
    }

    #[test]
    fn test_clearing_selection_stops() {
        let mut n = narrator();
        n.select_planet(Some("Jupiter"));
        n.update(0.016);
        n.select_planet(None);
        assert_eq!(n.state(), PlaybackState::Idle);
        n.update(0.016);
        assert_eq!(n.state(), PlaybackState::Idle);
        assert_eq!(n.engine().pending(), 0);
    }

    #[test]
    fn test_toggle_text() {
        let mut n = narrator();
        assert!(n.show_text());
        n.toggle_text();
        assert!(!n.show_text());
    }
}
