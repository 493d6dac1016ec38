//! # Chord Player
//!
//! The entry points a UI shell calls: play a chord, and change one setting at
//! a time. Settings are loaded once from a [`PreferenceStore`] and every change
//! is written back immediately.
//!
//! ## Example
//! ```rust
//! use chordplay::{ChordPlayer, MemoryStore};
//!
//! let mut player = ChordPlayer::load(MemoryStore::new());
//! assert_eq!(player.change_octave(9), 6);
//!
//! let triggers = player.parse_and_play("Cm7").unwrap();
//! assert!(!triggers.is_empty());
//!
//! assert!(player.parse_and_play("Cmaj9").is_err());
//! ```

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::ChordError;
use crate::playback::{parse_chord, schedule, BeatStyle, TimedTrigger};
use crate::prefs::{self, PrefKey, PreferenceStore};
use crate::settings::{
    PlaybackSettings, DEFAULT_BEAT_COUNT, DEFAULT_OCTAVE, DEFAULT_TEMPO, DEFAULT_VOLUME,
};

/// Session state owned by the host UI
pub struct ChordPlayer<S: PreferenceStore> {
    store: S,
    settings: PlaybackSettings,
    dark_theme: bool,
}

/// Snapshot of every persisted preference, for rendering the UI
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSnapshot {
    pub current_volume: f32,
    pub octave: u8,
    pub beat_count: u8,
    pub drum_enabled: bool,
    pub selected_beat_style: usize,
    pub tempo: u16,
    pub dark_theme: bool,
}

impl<S: PreferenceStore> ChordPlayer<S> {
    /// Load settings from `store`, falling back to defaults per key.
    ///
    /// Stored values outside their bounds are clamped the same way the
    /// setters clamp.
    pub fn load(store: S) -> Self {
        let mut settings = PlaybackSettings::default();
        settings.set_volume(prefs::read_or(&store, PrefKey::Volume, DEFAULT_VOLUME as f64));
        settings.set_octave(prefs::read_or(&store, PrefKey::Octave, DEFAULT_OCTAVE as i64));
        settings.set_tempo(prefs::read_or(&store, PrefKey::Tempo, DEFAULT_TEMPO as i64));
        settings.set_beat_count(prefs::read_or(&store, PrefKey::BeatCount, DEFAULT_BEAT_COUNT as i64));
        settings.set_drum_enabled(prefs::read_or(&store, PrefKey::DrumEnabled, true));
        settings.set_beat_style(prefs::read_or(&store, PrefKey::BeatStyle, 0i64));
        let dark_theme = prefs::read_or(&store, PrefKey::DarkTheme, false);

        debug!("Loaded settings: {:?}", settings);

        Self {
            store,
            settings,
            dark_theme,
        }
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn dark_theme(&self) -> bool {
        self.dark_theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> PreferenceSnapshot {
        PreferenceSnapshot {
            current_volume: self.settings.volume(),
            octave: self.settings.octave(),
            beat_count: self.settings.beat_count(),
            drum_enabled: self.settings.drum_enabled(),
            selected_beat_style: self.settings.beat_style().index(),
            tempo: self.settings.tempo(),
            dark_theme: self.dark_theme,
        }
    }

    /// Parse chord text at the current octave and build its schedule.
    ///
    /// The returned triggers are handed to a dispatcher. On error nothing is
    /// scheduled; the host clears its input and shows a notification.
    /// Earlier schedules are never cancelled by a new request.
    pub fn parse_and_play(&self, text: &str) -> Result<Vec<TimedTrigger>, ChordError> {
        let chord = parse_chord(text, self.settings.octave()).map_err(|e| {
            info!("{}", e);
            e
        })?;
        Ok(schedule(&chord, &self.settings))
    }

    pub fn change_volume(&mut self, volume: f64) -> f32 {
        let stored = self.settings.set_volume(volume);
        self.persist(PrefKey::Volume, &stored);
        stored
    }

    pub fn change_octave(&mut self, octave: i64) -> u8 {
        let stored = self.settings.set_octave(octave);
        self.persist(PrefKey::Octave, &stored);
        stored
    }

    pub fn change_tempo(&mut self, tempo: i64) -> u16 {
        let stored = self.settings.set_tempo(tempo);
        self.persist(PrefKey::Tempo, &stored);
        stored
    }

    pub fn change_beat_count(&mut self, beat_count: i64) -> u8 {
        let stored = self.settings.set_beat_count(beat_count);
        self.persist(PrefKey::BeatCount, &stored);
        stored
    }

    pub fn toggle_drum(&mut self, enabled: bool) -> bool {
        let stored = self.settings.set_drum_enabled(enabled);
        self.persist(PrefKey::DrumEnabled, &stored);
        stored
    }

    pub fn change_beat_style(&mut self, index: i64) -> BeatStyle {
        let stored = self.settings.set_beat_style(index);
        self.persist(PrefKey::BeatStyle, &stored.index());
        stored
    }

    pub fn set_dark_theme(&mut self, enabled: bool) -> bool {
        self.dark_theme = enabled;
        self.persist(PrefKey::DarkTheme, &enabled);
        enabled
    }

    /// Style names in table order, for a selector widget.
    pub fn beat_styles(&self) -> Vec<&'static str> {
        BeatStyle::ALL.iter().map(|s| s.name()).collect()
    }

    fn persist<T: Serialize>(&mut self, key: PrefKey, value: &T) {
        if let Err(e) = prefs::write(&mut self.store, key, value) {
            warn!("Could not save preference '{}': {}", key.as_str(), e);
        }
    }
}
