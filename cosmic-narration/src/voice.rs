//! Voices and voice selection

use serde::{Deserialize, Serialize};

/// A voice offered by a speech engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 language tag, e.g. `en-US`
    pub lang: String,
    /// Engine default voice
    pub default: bool,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            default: false,
        }
    }
}

/// Which voice to prefer when several are available
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoicePreferences {
    /// Substring searched for in voice names first
    pub preferred_name: String,
    /// Substring searched for in language tags when no name matches
    pub fallback_lang: String,
}

impl Default for VoicePreferences {
    fn default() -> Self {
        Self {
            preferred_name: "Google UK English Male".to_string(),
            fallback_lang: "en-US".to_string(),
        }
    }
}

/// Pick a voice: a name match, else a language match, else the first voice.
///
/// Returns `None` only when the engine has no voices at all.
pub fn select_voice(voices: &[Voice], prefs: &VoicePreferences) -> Option<Voice> {
    voices
        .iter()
        .find(|v| v.name.contains(&prefs.preferred_name))
        .or_else(|| voices.iter().find(|v| v.lang.contains(&prefs.fallback_lang)))
        .or_else(|| voices.first())
        .cloned()
}
