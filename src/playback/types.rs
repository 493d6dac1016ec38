//! Playback data type definitions
//!
//! This module defines the parsed chord and the timed trigger descriptors the
//! scheduler hands to a dispatcher.

use serde::Serialize;

use super::styles::DrumVoice;
use crate::theory::{ChordQuality, Key, PitchClass, Spelling};

/// A chord resolved to absolute key numbers
///
/// Created fresh per play request and never stored.
///
/// # Fields
/// - `root`: Root spelling as typed (case-normalized)
/// - `quality`: Chord quality
/// - `octave`: Octave used for transposition (0-6)
/// - `tones`: `(root + offset) mod 12 + octave * 12` for each offset, root first
///
/// Tones are kept even when they fall outside the playable 1..=88 range so
/// that beat-pattern positions still refer to the right chord tone. Use
/// [`ParsedChord::key_at`] to get a playable [`Key`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedChord {
    pub root: Spelling,
    pub quality: ChordQuality,
    pub octave: u8,
    pub tones: Vec<u8>,
}

impl ParsedChord {
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    /// Pitch classes in tone order (octave removed).
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.tones.iter().map(|&t| PitchClass::new(t as i32)).collect()
    }

    /// Playable key for the tone at `position`, if the tone exists and is in range.
    pub fn key_at(&self, position: usize) -> Option<Key> {
        self.tones.get(position).copied().and_then(Key::new)
    }

    /// All playable keys in tone order.
    pub fn keys(&self) -> Vec<Key> {
        self.tones.iter().copied().filter_map(Key::new).collect()
    }

    /// Display name like `C#m7`.
    pub fn name(&self) -> String {
        format!("{}{}", self.root, self.quality.suffix())
    }
}

/// Sample selector for one trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum SampleId {
    /// Piano note sample, `notes/{n}.mp3`
    Note(Key),
    /// Drum sample, `drums/{name}.mp3`
    Drum(DrumVoice),
}

impl SampleId {
    /// Sample path relative to the audio assets directory.
    pub fn path(&self) -> String {
        match self {
            SampleId::Note(key) => key.sample_path(),
            SampleId::Drum(voice) => voice.sample_path(),
        }
    }
}

/// One deferred audio trigger
///
/// # Fields
/// - `offset_ms`: Tempo-derived offset from the play request, in milliseconds
///   (dispatch latency is added by the dispatcher, not included here)
/// - `subdivision`: Which of the 4 subdivisions produced this trigger
/// - `sample`: What to play
/// - `volume`: Playback volume in [0, 1], fixed at schedule time
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedTrigger {
    pub offset_ms: u64,
    pub subdivision: usize,
    pub sample: SampleId,
    pub volume: f32,
}

impl TimedTrigger {
    pub fn is_drum(&self) -> bool {
        matches!(self.sample, SampleId::Drum(_))
    }
}
