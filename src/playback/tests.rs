use super::*;
use crate::settings::PlaybackSettings;
use crate::theory::Key;

fn settings(tempo: i64, beat_count: i64, style: BeatStyle, drums: bool) -> PlaybackSettings {
    let mut s = PlaybackSettings::default();
    s.set_volume(0.8);
    s.set_tempo(tempo);
    s.set_beat_count(beat_count);
    s.set_beat_style(style.index() as i64);
    s.set_drum_enabled(drums);
    s
}

fn note(index: u8) -> SampleId {
    SampleId::Note(Key::new(index).unwrap())
}

#[test]
fn test_zero_beats_produces_nothing() {
    let chord = parse_chord("C", 4).unwrap();
    let triggers = schedule(&chord, &settings(120, 0, BeatStyle::Pop, true));
    assert!(triggers.is_empty());
}

#[test]
fn test_empty_chord_produces_nothing() {
    let mut chord = parse_chord("C", 4).unwrap();
    chord.tones.clear();
    let triggers = schedule(&chord, &settings(120, 4, BeatStyle::Pop, true));
    assert!(triggers.is_empty());
}

#[test]
fn test_subdivision_offsets_at_120_bpm() {
    let chord = parse_chord("C", 4).unwrap();
    let triggers = schedule(&chord, &settings(120, 4, BeatStyle::Pop, true));

    // Pop: 3 chord tones + 1 drum per subdivision
    assert_eq!(triggers.len(), 16);
    for (i, chunk) in triggers.chunks(4).enumerate() {
        assert!(chunk.iter().all(|t| t.subdivision == i));
        assert!(chunk.iter().all(|t| t.offset_ms == i as u64 * 500));
    }
}

#[test]
fn test_offsets_at_uneven_tempo() {
    let chord = parse_chord("C", 4).unwrap();
    let triggers = schedule(&chord, &settings(70, 4, BeatStyle::Jazz, true));

    let drum_offsets: Vec<u64> = triggers.iter().filter(|t| t.is_drum()).map(|t| t.offset_ms).collect();
    assert_eq!(drum_offsets, vec![0, 857, 1714, 2571]);
}

#[test]
fn test_beat_count_limits_subdivisions() {
    let chord = parse_chord("G", 3).unwrap();
    let triggers = schedule(&chord, &settings(100, 2, BeatStyle::Pop, true));

    assert!(triggers.iter().all(|t| t.subdivision < 2));
    assert_eq!(triggers.last().map(|t| t.offset_ms), Some(600));
}

#[test]
fn test_downbeat_full_volume_then_decay() {
    let chord = parse_chord("Cmaj7", 4).unwrap();
    let triggers = schedule(&chord, &settings(120, 4, BeatStyle::Pop, false));

    for t in &triggers {
        if t.subdivision == 0 {
            assert_eq!(t.volume, 0.8);
        } else {
            assert_eq!(t.volume, 0.8 * CHORD_DECAY);
        }
    }
}

#[test]
fn test_drum_volume_is_constant() {
    let chord = parse_chord("C", 4).unwrap();
    let triggers = schedule(&chord, &settings(120, 4, BeatStyle::Pop, true));

    let drums: Vec<&TimedTrigger> = triggers.iter().filter(|t| t.is_drum()).collect();
    assert_eq!(drums.len(), 4);
    assert!(drums.iter().all(|t| t.volume == 0.8 * DRUM_LEVEL));
}

#[test]
fn test_drum_pattern_follows_style() {
    let chord = parse_chord("C", 4).unwrap();
    let triggers = schedule(&chord, &settings(120, 4, BeatStyle::Melodic, true));

    let drums: Vec<SampleId> = triggers.iter().filter(|t| t.is_drum()).map(|t| t.sample).collect();
    assert_eq!(
        drums,
        vec![
            SampleId::Drum(DrumVoice::Kick),
            SampleId::Drum(DrumVoice::Snare),
            SampleId::Drum(DrumVoice::HiHat),
            SampleId::Drum(DrumVoice::HiHat),
        ]
    );
}

#[test]
fn test_disabling_drums_keeps_chord_triggers() {
    let chord = parse_chord("Dm7", 3).unwrap();
    let with_drums = schedule(&chord, &settings(90, 4, BeatStyle::Pop2, true));
    let without_drums = schedule(&chord, &settings(90, 4, BeatStyle::Pop2, false));

    let chord_only: Vec<TimedTrigger> = with_drums.into_iter().filter(|t| !t.is_drum()).collect();
    assert_eq!(chord_only, without_drums);
    assert!(without_drums.iter().all(|t| !t.is_drum()));
}

#[test]
fn test_melodic_arpeggio_on_triad_skips_missing_fourth_tone() {
    // Melodic plays tone positions 0, 1, 2, 3; a triad has no position 3
    let chord = parse_chord("C", 4).unwrap();
    let triggers = schedule(&chord, &settings(120, 4, BeatStyle::Melodic, false));

    let samples: Vec<SampleId> = triggers.iter().map(|t| t.sample).collect();
    assert_eq!(samples, vec![note(48), note(52), note(55)]);
}

#[test]
fn test_pop2_pattern() {
    let chord = parse_chord("Am7", 3).unwrap(); // 45, 36, 40, 43
    let triggers = schedule(&chord, &settings(120, 4, BeatStyle::Pop2, false));

    let by_subdivision: Vec<(usize, SampleId)> = triggers.iter().map(|t| (t.subdivision, t.sample)).collect();
    assert_eq!(
        by_subdivision,
        vec![
            (0, note(45)),
            (1, note(45)),
            (1, note(36)),
            (1, note(40)),
            (1, note(43)),
            (3, note(45)),
        ]
    );
}

#[test]
fn test_out_of_range_keys_are_dropped() {
    // C at octave 0: tone 0 is outside 1..=88
    let chord = parse_chord("C", 0).unwrap();
    let triggers = schedule(&chord, &settings(120, 1, BeatStyle::Pop, false));

    let samples: Vec<SampleId> = triggers.iter().map(|t| t.sample).collect();
    assert_eq!(samples, vec![note(4), note(7)]);
}

#[test]
fn test_subdivisions_are_ordered() {
    let chord = parse_chord("Ebmaj7", 2).unwrap();
    let triggers = schedule(&chord, &settings(150, 4, BeatStyle::Pop, true));

    for pair in triggers.windows(2) {
        assert!(pair[0].subdivision <= pair[1].subdivision);
        assert!(pair[0].offset_ms <= pair[1].offset_ms);
    }
}

#[test]
fn test_schedule_is_deterministic() {
    let chord = parse_chord("F#m", 4).unwrap();
    let s = settings(110, 3, BeatStyle::Jazz, true);
    assert_eq!(schedule(&chord, &s), schedule(&chord, &s));
}

#[test]
fn test_trigger_serialization() {
    let chord = parse_chord("C", 4).unwrap();
    let triggers = schedule(&chord, &settings(120, 1, BeatStyle::Pop, true));
    let json = serde_json::to_value(&triggers).unwrap();

    assert_eq!(json[0]["offsetMs"], 0);
    assert_eq!(json[0]["sample"]["kind"], "note");
    assert_eq!(json[0]["sample"]["id"], 48);
    assert_eq!(json[3]["sample"]["kind"], "drum");
    assert_eq!(json[3]["sample"]["id"], "kick");
}
