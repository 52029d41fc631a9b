//! # Cosmic Narration
//!
//! Spoken facts about the planets. A [`Narrator`] follows the selected
//! planet and drives any [`SpeechSynthesizer`]; [`SilentSynthesizer`] is a
//! timing-accurate engine that produces no sound.
//!
//! ```rust
//! use cosmic_narration::{Narrator, PlaybackState, SilentSynthesizer, VoicePreferences};
//!
//! let mut narrator = Narrator::new(SilentSynthesizer::default(), VoicePreferences::default());
//! narrator.select_planet(Some("Saturn"));
//! narrator.update(1.0 / 60.0);
//! assert_eq!(narrator.state(), PlaybackState::Speaking);
//! ```

pub mod script;
pub mod voice;
pub mod synth;
pub mod silent;
pub mod narrator;

pub use script::{narrated_planets, narration_for};
pub use voice::{select_voice, Voice, VoicePreferences};
pub use synth::{SpeechEvent, SpeechSynthesizer, Utterance, UtteranceId};
pub use silent::SilentSynthesizer;
pub use narrator::{Narrator, PlaybackState};
