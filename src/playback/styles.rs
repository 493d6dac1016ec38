//! Beat style table
//!
//! Each style assigns, for each of the 4 subdivisions, which chord-tone
//! positions sound and which drum voice sounds. The table is fixed; the
//! runtime beat count only limits how many subdivisions play.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of subdivisions in every style.
pub const SUBDIVISIONS: usize = 4;

/// Drum voice (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrumVoice {
    Kick,
    Snare,
    HiHat,
}

impl DrumVoice {
    /// Table index: 0 = kick, 1 = snare, 2 = hi-hat.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(DrumVoice::Kick),
            1 => Some(DrumVoice::Snare),
            2 => Some(DrumVoice::HiHat),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DrumVoice::Kick => "kick",
            DrumVoice::Snare => "snare",
            DrumVoice::HiHat => "hi-hat",
        }
    }

    pub fn sample_path(self) -> String {
        format!("drums/{}.mp3", self.name())
    }
}

impl fmt::Display for DrumVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named accompaniment pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BeatStyle {
    #[default]
    Pop,
    Pop2,
    Jazz,
    Melodic,
}

impl BeatStyle {
    pub const ALL: [BeatStyle; 4] = [
        BeatStyle::Pop,
        BeatStyle::Pop2,
        BeatStyle::Jazz,
        BeatStyle::Melodic,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        BeatStyle::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            BeatStyle::Pop => 0,
            BeatStyle::Pop2 => 1,
            BeatStyle::Jazz => 2,
            BeatStyle::Melodic => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BeatStyle::Pop => "Pop",
            BeatStyle::Pop2 => "Pop 2",
            BeatStyle::Jazz => "Jazz",
            BeatStyle::Melodic => "Melodic",
        }
    }

    /// Chord-tone positions sounding on each subdivision.
    pub fn beats(self) -> [&'static [usize]; SUBDIVISIONS] {
        const ALL_TONES: &[usize] = &[0, 1, 2, 3];
        match self {
            BeatStyle::Pop => [ALL_TONES, ALL_TONES, ALL_TONES, ALL_TONES],
            BeatStyle::Pop2 => [&[0], ALL_TONES, &[], &[0]],
            BeatStyle::Jazz => [ALL_TONES, &[], &[], &[]],
            BeatStyle::Melodic => [&[0], &[1], &[2], &[3]],
        }
    }

    /// Drum voice on each subdivision.
    pub fn drums(self) -> [DrumVoice; SUBDIVISIONS] {
        use DrumVoice::*;
        match self {
            BeatStyle::Pop => [Kick, Snare, Kick, Snare],
            BeatStyle::Pop2 => [HiHat, Snare, HiHat, Snare],
            BeatStyle::Jazz => [Snare, HiHat, HiHat, Snare],
            BeatStyle::Melodic => [Kick, Snare, HiHat, HiHat],
        }
    }
}

impl fmt::Display for BeatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_indices_round_trip() {
        for (i, style) in BeatStyle::ALL.iter().enumerate() {
            assert_eq!(style.index(), i);
            assert_eq!(BeatStyle::from_index(i), Some(*style));
        }
        assert_eq!(BeatStyle::from_index(4), None);
    }

    #[test]
    fn test_style_table() {
        assert_eq!(BeatStyle::Pop2.beats()[2], &[] as &[usize]);
        assert_eq!(BeatStyle::Melodic.beats()[3], &[3]);
        assert_eq!(BeatStyle::Jazz.drums(), [DrumVoice::Snare, DrumVoice::HiHat, DrumVoice::HiHat, DrumVoice::Snare]);
    }

    #[test]
    fn test_drum_paths() {
        assert_eq!(DrumVoice::from_index(2), Some(DrumVoice::HiHat));
        assert_eq!(DrumVoice::from_index(3), None);
        assert_eq!(DrumVoice::HiHat.sample_path(), "drums/hi-hat.mp3");
    }
}
