pub mod dispatch;
pub mod error;
pub mod player;
pub mod playback;
pub mod prefs;
pub mod settings;
pub mod theory;

pub use dispatch::{AudioOutput, Dispatcher, SampleDirOutput, DISPATCH_LATENCY};
pub use error::*;
pub use playback::{parse_chord, schedule, BeatStyle, DrumVoice, ParsedChord, SampleId, TimedTrigger};
pub use player::{ChordPlayer, PreferenceSnapshot};
pub use prefs::{MemoryStore, PrefKey, PreferenceStore, YamlFileStore};
pub use settings::PlaybackSettings;
pub use theory::{ChordQuality, Key, PitchClass, Spelling};

/// Parse chord text and build its schedule in one step.
/// This is the main entry point for hosts that manage settings themselves.
pub fn plan(text: &str, settings: &PlaybackSettings) -> Result<Vec<TimedTrigger>, ChordError> {
    let chord = parse_chord(text, settings.octave())?;
    Ok(schedule(&chord, settings))
}
