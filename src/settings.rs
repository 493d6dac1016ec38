//! Playback settings
//!
//! Explicit configuration object passed to the scheduler. All mutation goes
//! through the clamping setters below, so a `PlaybackSettings` value is always
//! within its documented bounds.

use serde::Serialize;

use crate::playback::BeatStyle;

pub const OCTAVE_MIN: u8 = 0;
pub const OCTAVE_MAX: u8 = 6;
pub const TEMPO_MIN: u16 = 50;
pub const TEMPO_MAX: u16 = 150;
pub const BEAT_COUNT_MAX: u8 = 4;

pub const DEFAULT_VOLUME: f32 = 0.8;
pub const DEFAULT_OCTAVE: u8 = 4;
pub const DEFAULT_TEMPO: u16 = 100;
pub const DEFAULT_BEAT_COUNT: u8 = 4;

/// Settings that shape one schedule
///
/// # Fields
/// - `volume`: Base volume in [0, 1]
/// - `octave`: Transposition octave in [0, 6]
/// - `tempo`: Beats per minute in [50, 150]
/// - `beat_count`: Subdivisions that play, in [0, 4]
/// - `drum_enabled`: Whether drum triggers are produced
/// - `beat_style`: Selected pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSettings {
    volume: f32,
    octave: u8,
    tempo: u16,
    beat_count: u8,
    drum_enabled: bool,
    beat_style: BeatStyle,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            octave: DEFAULT_OCTAVE,
            tempo: DEFAULT_TEMPO,
            beat_count: DEFAULT_BEAT_COUNT,
            drum_enabled: true,
            beat_style: BeatStyle::default(),
        }
    }
}

impl PlaybackSettings {
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn octave(&self) -> u8 {
        self.octave
    }

    pub fn tempo(&self) -> u16 {
        self.tempo
    }

    pub fn beat_count(&self) -> u8 {
        self.beat_count
    }

    pub fn drum_enabled(&self) -> bool {
        self.drum_enabled
    }

    pub fn beat_style(&self) -> BeatStyle {
        self.beat_style
    }

    /// Milliseconds between subdivisions at the current tempo.
    pub fn subdivision_ms(&self) -> u64 {
        60_000 / self.tempo as u64
    }

    /// Clamp to [0, 1]. NaN leaves the volume unchanged.
    pub fn set_volume(&mut self, volume: f64) -> f32 {
        if !volume.is_nan() {
            self.volume = volume.clamp(0.0, 1.0) as f32;
        }
        self.volume
    }

    pub fn set_octave(&mut self, octave: i64) -> u8 {
        self.octave = octave.clamp(OCTAVE_MIN as i64, OCTAVE_MAX as i64) as u8;
        self.octave
    }

    pub fn set_tempo(&mut self, tempo: i64) -> u16 {
        self.tempo = tempo.clamp(TEMPO_MIN as i64, TEMPO_MAX as i64) as u16;
        self.tempo
    }

    pub fn set_beat_count(&mut self, beat_count: i64) -> u8 {
        self.beat_count = beat_count.clamp(0, BEAT_COUNT_MAX as i64) as u8;
        self.beat_count
    }

    pub fn set_drum_enabled(&mut self, enabled: bool) -> bool {
        self.drum_enabled = enabled;
        self.drum_enabled
    }

    /// Clamp the index into the style table.
    pub fn set_beat_style(&mut self, index: i64) -> BeatStyle {
        let last = BeatStyle::ALL.len() as i64 - 1;
        let index = index.clamp(0, last) as usize;
        self.beat_style = BeatStyle::from_index(index).unwrap_or_default();
        self.beat_style
    }
}
