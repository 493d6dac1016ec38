//! # Theory Tables
//!
//! Static music-theory mappings used by the chord parser and the scheduler.
//!
//! ## Tables
//! - **Spelling → PitchClass**: 7 letters × {natural, sharp, flat} = 21 spellings.
//!   The mapping is many-to-one: `C#` and `Db` are both pitch class 1, and the
//!   theoretical duplicates (`E#`/`F`, `Cb`/`B`, `Fb`/`E`, `B#`/`C`) are allowed.
//! - **ChordQuality → offsets**: semitone offsets from the root, root first.
//!
//! ## Key Range
//! A [`Key`] is an index into the 88-key sample range (1..=88). Sample files are
//! `notes/{n}.mp3`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChordError;

/// Lowest playable key index.
pub const KEY_MIN: u8 = 1;
/// Highest playable key index.
pub const KEY_MAX: u8 = 88;

/// Note letter (A-G)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    pub const ALL: [NoteLetter; 7] = [
        NoteLetter::C,
        NoteLetter::D,
        NoteLetter::E,
        NoteLetter::F,
        NoteLetter::G,
        NoteLetter::A,
        NoteLetter::B,
    ];

    /// Case-insensitive letter lookup.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            _ => None,
        }
    }

    /// Semitones above C for the natural note.
    pub fn semitone(self) -> u8 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
        }
    }
}

/// Accidental attached to a root letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub const ALL: [Accidental; 3] = [Accidental::Natural, Accidental::Sharp, Accidental::Flat];

    /// Only `#` and lowercase `b` are accidentals; `B` is a letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    fn shift(self) -> i8 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }
}

/// A note name modulo octave equivalence, always in 0..=11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Wraps any semitone count into a pitch class.
    pub fn new(semitone: i32) -> Self {
        PitchClass(semitone.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Adds a semitone offset, wrapping mod 12.
    pub fn offset(self, semitones: u8) -> Self {
        PitchClass::new(self.0 as i32 + semitones as i32)
    }
}

/// Root spelling: letter plus optional accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spelling {
    pub letter: NoteLetter,
    pub accidental: Accidental,
}

impl Spelling {
    pub fn new(letter: NoteLetter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    /// Every recognized spelling, naturals first within each letter.
    pub fn all() -> impl Iterator<Item = Spelling> {
        NoteLetter::ALL.into_iter().flat_map(|letter| {
            Accidental::ALL
                .into_iter()
                .map(move |accidental| Spelling::new(letter, accidental))
        })
    }

    /// Total over all 21 spellings.
    pub fn pitch_class(self) -> PitchClass {
        PitchClass::new(self.letter.semitone() as i32 + self.accidental.shift() as i32)
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.as_char(), self.accidental.symbol())
    }
}

impl FromStr for Spelling {
    type Err = ChordError;

    /// Parse "C", "c#", "Db", etc. The letter is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars
            .next()
            .and_then(NoteLetter::from_char)
            .ok_or_else(|| ChordError::UnknownSpelling(s.to_string()))?;
        let accidental = match chars.next() {
            None => Accidental::Natural,
            Some(c) => Accidental::from_char(c)
                .ok_or_else(|| ChordError::UnknownSpelling(s.to_string()))?,
        };
        if chars.next().is_some() {
            return Err(ChordError::UnknownSpelling(s.to_string()));
        }
        Ok(Spelling::new(letter, accidental))
    }
}

/// Chord quality (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordQuality {
    Major,
    Minor,
    DominantSeventh,
    MinorSeventh,
    MajorSeventh,
}

impl ChordQuality {
    /// Ordered longest suffix first so matching never stops at a prefix.
    pub const ALL: [ChordQuality; 5] = [
        ChordQuality::MajorSeventh,
        ChordQuality::MinorSeventh,
        ChordQuality::Minor,
        ChordQuality::DominantSeventh,
        ChordQuality::Major,
    ];

    /// Semitone offsets from the root, root first.
    pub fn offsets(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::DominantSeventh => &[0, 4, 7, 10],
            ChordQuality::MinorSeventh => &[0, 3, 7, 10],
            ChordQuality::MajorSeventh => &[0, 4, 7, 11],
        }
    }

    /// Canonical (lowercase) suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::DominantSeventh => "7",
            ChordQuality::MinorSeventh => "m7",
            ChordQuality::MajorSeventh => "maj7",
        }
    }

    /// Look up a quality by the full remaining suffix.
    ///
    /// `maj7` is matched case-insensitively ("MAJ7", "Maj7"). The `m` forms
    /// are lowercase only: an upper-case `M` means major in chord notation, so
    /// "M7" and "M" are rejected rather than misread as minor.
    pub fn from_suffix(suffix: &str) -> Result<Self, ChordError> {
        ChordQuality::ALL
            .into_iter()
            .find(|quality| {
                let canonical = quality.suffix();
                if *quality == ChordQuality::MajorSeventh {
                    suffix.eq_ignore_ascii_case(canonical)
                } else {
                    suffix == canonical
                }
            })
            .ok_or_else(|| ChordError::UnknownQuality(suffix.to_string()))
    }
}

/// Absolute playable pitch: an index into the 88-key sample range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Key(u8);

impl Key {
    /// Returns `None` outside 1..=88.
    pub fn new(index: u8) -> Option<Self> {
        (KEY_MIN..=KEY_MAX).contains(&index).then_some(Key(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Relative sample path, e.g. `notes/40.mp3`.
    pub fn sample_path(self) -> String {
        format!("notes/{}.mp3", self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
