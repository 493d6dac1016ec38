//! Chord symbol parsing
//!
//! Parses chord text (C, Am, G7, Dbmaj7, etc.) into absolute key numbers.
//!
//! ## Grammar
//! ```text
//! chord   := letter accidental? quality
//! letter  := A-G | a-g
//! accidental := '#' | 'b'
//! quality := "maj7" | "m7" | "m" | "7" | ""
//! ```
//! Surrounding whitespace is ignored. Anything else rejects the whole input.

use super::types::ParsedChord;
use crate::error::ChordError;
use crate::settings::OCTAVE_MAX;
use crate::theory::{Accidental, ChordQuality, NoteLetter, Spelling};

/// Parse a chord symbol into key numbers at the given octave
///
/// Each tone is `(root + offset) mod 12 + octave * 12`, in the quality's
/// offset order (root first). Octaves above 6 are treated as 6.
///
/// # Supported Chord Types
/// - **Major**: `C` → root, major 3rd, perfect 5th
/// - **Minor**: `Cm` → root, minor 3rd, perfect 5th
/// - **Dominant 7th**: `C7` → root, major 3rd, perfect 5th, minor 7th
/// - **Minor 7th**: `Cm7` → root, minor 3rd, perfect 5th, minor 7th
/// - **Major 7th**: `Cmaj7` (also `CMAJ7`) → root, major 3rd, perfect 5th, major 7th
///
/// # Examples
/// ```
/// use chordplay::parse_chord;
///
/// // C minor 7th at octave 3
/// assert_eq!(parse_chord("Cm7", 3).unwrap().tones, vec![36, 39, 43, 46]);
///
/// // A major wraps past B: A, C#, E
/// assert_eq!(parse_chord("A", 4).unwrap().tones, vec![57, 49, 52]);
///
/// assert!(parse_chord("Cmaj9", 4).is_err());
/// ```
///
/// # Errors
/// Returns [`ChordError::ParseError`] for any input that does not match the
/// grammar, including lookups that fail in the theory table.
pub fn parse_chord(input: &str, octave: u8) -> Result<ParsedChord, ChordError> {
    let text = input.trim();
    let chars: Vec<char> = text.chars().collect();

    let error = |column: usize, message: String| ChordError::ParseError {
        input: text.to_string(),
        column,
        message,
    };

    // Parse root letter
    let Some(&first) = chars.first() else {
        return Err(error(1, "Empty chord".to_string()));
    };
    let letter = NoteLetter::from_char(first)
        .ok_or_else(|| error(1, format!("Expected a note letter A-G, found '{}'", first)))?;

    // Check for accidental
    let mut idx = 1;
    let accidental = match chars.get(idx).copied().and_then(Accidental::from_char) {
        Some(acc) => {
            idx += 1;
            acc
        }
        None => Accidental::Natural,
    };

    let root = Spelling::new(letter, accidental);
    // Normalized spelling goes back through the table lookup so a missing
    // entry surfaces as an error rather than a wrong pitch.
    let root = root
        .to_string()
        .parse::<Spelling>()
        .map_err(|e| error(1, e.to_string()))?;

    // The quality must consume the rest of the input
    let suffix: String = chars[idx..].iter().collect();
    let quality = ChordQuality::from_suffix(&suffix).map_err(|e| error(idx + 1, e.to_string()))?;

    let octave = octave.min(OCTAVE_MAX);
    let pitch_class = root.pitch_class();
    let tones = quality
        .offsets()
        .iter()
        .map(|&offset| pitch_class.offset(offset).value() + octave * 12)
        .collect();

    Ok(ParsedChord {
        root,
        quality,
        octave,
        tones,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_parsing() {
        // Test major chord
        let c_major = parse_chord("C", 4).unwrap();
        assert_eq!(c_major.tones, vec![48, 52, 55]);
        assert_eq!(c_major.quality, ChordQuality::Major);

        // Test minor chord
        let d_minor = parse_chord("Dm", 4).unwrap();
        assert_eq!(d_minor.tones, vec![50, 53, 57]);

        // Test dominant 7th: F wraps into the same octave
        let g7 = parse_chord("G7", 4).unwrap();
        assert_eq!(g7.tones, vec![55, 59, 50, 53]);

        // Test major 7th
        let cmaj7 = parse_chord("Cmaj7", 4).unwrap();
        assert_eq!(cmaj7.tones, vec![48, 52, 55, 59]);

        // Test with accidentals
        let f_sharp_major = parse_chord("F#", 4).unwrap();
        assert_eq!(f_sharp_major.tones, vec![54, 58, 49]);

        let b_flat_minor = parse_chord("Bbm", 4).unwrap();
        assert_eq!(b_flat_minor.tones, vec![58, 49, 53]);
    }

    #[test]
    fn test_enharmonic_roots_match() {
        assert_eq!(parse_chord("C#", 2).unwrap().tones, parse_chord("Db", 2).unwrap().tones);
        assert_eq!(parse_chord("E#m", 2).unwrap().tones, parse_chord("Fm", 2).unwrap().tones);
        assert_eq!(parse_chord("Cb7", 2).unwrap().tones, parse_chord("B7", 2).unwrap().tones);
    }

    #[test]
    fn test_case_normalization() {
        let lower = parse_chord("cmaj7", 3).unwrap();
        let upper = parse_chord("CMAJ7", 3).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper.name(), "Cmaj7");
        assert_eq!(parse_chord("  ebm7 ", 1).unwrap().name(), "Ebm7");
    }

    #[test]
    fn test_rejects_invalid_input() {
        for text in ["", "   ", "H", "Cmaj9", "cM7", "CM", "C#b", "Cm7b5", "C B", "m7", "CB"] {
            assert!(
                matches!(parse_chord(text, 4), Err(ChordError::ParseError { .. })),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_error_column() {
        match parse_chord("Dbmaj9", 4) {
            Err(ChordError::ParseError { column, input, .. }) => {
                assert_eq!(column, 3);
                assert_eq!(input, "Dbmaj9");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_octave_only_transposes() {
        let low = parse_chord("Am7", 1).unwrap();
        let high = parse_chord("Am7", 5).unwrap();
        assert_eq!(low.pitch_classes(), high.pitch_classes());
        for (l, h) in low.tones.iter().zip(&high.tones) {
            assert_eq!(h - l, 48);
        }
    }

    #[test]
    fn test_out_of_range_tones_are_kept_but_unplayable() {
        // C at octave 0 is key 0, below the sample range
        let chord = parse_chord("C", 0).unwrap();
        assert_eq!(chord.tones, vec![0, 4, 7]);
        assert_eq!(chord.key_at(0), None);
        assert_eq!(chord.keys().len(), 2);
    }
}
