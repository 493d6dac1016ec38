//! # Playback Module
//!
//! Turn chord text into a timed series of audio triggers.
//!
//! ## Sub-modules
//! - `chord_parser` - Chord text to key numbers (C, Am, G7, Dbmaj7)
//! - `styles` - Beat style and drum voice tables
//! - `types` - ParsedChord, SampleId, TimedTrigger
//! - `engine` - Schedule generation
//!
//! ## Entry Points
//! - [`parse_chord()`] - Parse chord text at an octave
//! - [`schedule()`] - Build the trigger list for a chord and settings
//!
//! ## Example
//! ```rust
//! use chordplay::playback::{parse_chord, schedule};
//! use chordplay::PlaybackSettings;
//!
//! let mut settings = PlaybackSettings::default();
//! settings.set_beat_count(1);
//! settings.set_drum_enabled(false);
//!
//! let chord = parse_chord("Am", 3).unwrap();
//! let triggers = schedule(&chord, &settings);
//!
//! assert_eq!(triggers.len(), 3);
//! assert_eq!(triggers[0].sample.path(), "notes/45.mp3");
//! assert!(triggers.iter().all(|t| t.offset_ms == 0));
//! ```
//!
//! ## Timing
//! Offsets are tempo-derived only. The fixed dispatch latency is added by
//! [`crate::dispatch::Dispatcher`], so schedules stay easy to compare.

mod chord_parser;
mod engine;
mod styles;
mod types;

#[cfg(test)]
mod tests;

pub use chord_parser::parse_chord;
pub use engine::{schedule, CHORD_DECAY, DRUM_LEVEL};
pub use styles::{BeatStyle, DrumVoice, SUBDIVISIONS};
pub use types::{ParsedChord, SampleId, TimedTrigger};
