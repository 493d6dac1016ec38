//! Beat/drum schedule generation
//!
//! Converts a parsed chord plus playback settings into timed audio triggers.
//! The result is plain data; nothing here sleeps or plays audio.

use log::debug;

use super::styles::SUBDIVISIONS;
use super::types::{ParsedChord, SampleId, TimedTrigger};
use crate::settings::PlaybackSettings;

/// Volume factor for chord tones on every subdivision after the first.
pub const CHORD_DECAY: f32 = 0.5;

/// Volume factor for every drum trigger.
pub const DRUM_LEVEL: f32 = 0.5;

/// Build the trigger sequence for one play request
///
/// Subdivision `i` (for `i < beat_count`) starts at `i * 60000 / tempo` ms.
/// Subdivision 0 plays chord tones at full volume; later subdivisions play
/// them at `volume * CHORD_DECAY`. When drums are enabled each subdivision
/// adds exactly one drum trigger at `volume * DRUM_LEVEL`.
///
/// Chord tones are selected by position from the style's beat pattern.
/// Positions past the end of the chord (position 3 on a triad) and tones
/// outside the playable key range are skipped.
///
/// # Ordering
/// Triggers are sorted by subdivision. Within a subdivision, chord tones come
/// first in pattern order, followed by the drum.
///
/// # Example
/// ```rust
/// use chordplay::{parse_chord, schedule, PlaybackSettings};
///
/// let mut settings = PlaybackSettings::default();
/// settings.set_tempo(120);
/// settings.set_beat_count(4);
///
/// let chord = parse_chord("C", 4).unwrap();
/// let triggers = schedule(&chord, &settings);
///
/// let mut offsets: Vec<u64> = triggers.iter().map(|t| t.offset_ms).collect();
/// offsets.dedup();
/// assert_eq!(offsets, vec![0, 500, 1000, 1500]);
/// ```
pub fn schedule(chord: &ParsedChord, settings: &PlaybackSettings) -> Vec<TimedTrigger> {
    let beat_count = (settings.beat_count() as usize).min(SUBDIVISIONS);
    if beat_count == 0 || chord.is_empty() {
        return Vec::new();
    }

    let style = settings.beat_style();
    let beats = style.beats();
    let drums = style.drums();
    let tempo = settings.tempo().max(1) as u64;
    let base_volume = settings.volume();

    let mut triggers = Vec::new();

    for subdivision in 0..beat_count {
        let offset_ms = subdivision as u64 * 60_000 / tempo;
        let chord_volume = if subdivision == 0 {
            base_volume
        } else {
            base_volume * CHORD_DECAY
        };

        for &position in beats[subdivision] {
            match chord.key_at(position) {
                Some(key) => triggers.push(TimedTrigger {
                    offset_ms,
                    subdivision,
                    sample: SampleId::Note(key),
                    volume: chord_volume,
                }),
                None => {
                    if let Some(tone) = chord.tones.get(position) {
                        debug!("Dropping tone {} of {}: key out of range", tone, chord.name());
                    }
                }
            }
        }

        if settings.drum_enabled() {
            triggers.push(TimedTrigger {
                offset_ms,
                subdivision,
                sample: SampleId::Drum(drums[subdivision]),
                volume: base_volume * DRUM_LEVEL,
            });
        }
    }

    debug!(
        "Scheduled {} triggers for {} ({} at {} bpm, {} beats)",
        triggers.len(),
        chord.name(),
        style,
        tempo,
        beat_count
    );

    triggers
}
