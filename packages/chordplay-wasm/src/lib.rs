use serde::Serialize;
use wasm_bindgen::prelude::*;

use chordplay::{ChordError, ChordPlayer, PreferenceStore, StorageError};

#[wasm_bindgen]
extern "C" {
    /// Web Storage object (`window.localStorage` or any object with the same methods).
    pub type Storage;

    #[wasm_bindgen(method, catch, js_name = getItem)]
    fn get_item(this: &Storage, key: &str) -> Result<Option<String>, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setItem)]
    fn set_item(this: &Storage, key: &str, value: &str) -> Result<(), JsValue>;
}

struct WebStore(Storage);

fn backend_error(e: JsValue) -> StorageError {
    StorageError::Backend(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl PreferenceStore for WebStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get_item(key).map_err(backend_error)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.0.set_item(key, &value).map_err(backend_error)
    }
}

#[derive(Serialize)]
struct InvalidChord {
    message: String,
    column: Option<usize>,
}

fn error_to_invalid_chord(e: ChordError) -> InvalidChord {
    match e {
        ChordError::ParseError { column, message, .. } => InvalidChord {
            message,
            column: Some(column),
        },
        other => InvalidChord {
            message: other.to_string(),
            column: None,
        },
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// Chord player session bound to browser storage
///
/// `parseAndPlay` returns the triggers; the page dispatches each one with
/// `setTimeout(play, latencyMs + trigger.offsetMs)`.
#[wasm_bindgen]
pub struct WebChordPlayer {
    inner: ChordPlayer<WebStore>,
}

#[wasm_bindgen]
impl WebChordPlayer {
    #[wasm_bindgen(constructor)]
    pub fn new(storage: Storage) -> WebChordPlayer {
        WebChordPlayer {
            inner: ChordPlayer::load(WebStore(storage)),
        }
    }

    /// Fixed delay the page should add before every trigger.
    #[wasm_bindgen(js_name = latencyMs)]
    pub fn latency_ms() -> u32 {
        chordplay::DISPATCH_LATENCY.as_millis() as u32
    }

    /// Parse chord text and return the trigger list, or a JSON error string.
    #[wasm_bindgen(js_name = parseAndPlay)]
    pub fn parse_and_play(&self, text: &str) -> Result<JsValue, JsValue> {
        match self.inner.parse_and_play(text) {
            Ok(triggers) => to_js(&triggers),
            Err(e) => Err(JsValue::from_str(
                &serde_json::to_string(&error_to_invalid_chord(e)).unwrap_or_else(|_| "{}".to_string()),
            )),
        }
    }

    #[wasm_bindgen(js_name = changeVolume)]
    pub fn change_volume(&mut self, volume: f64) -> f32 {
        self.inner.change_volume(volume)
    }

    #[wasm_bindgen(js_name = changeOctave)]
    pub fn change_octave(&mut self, octave: i32) -> u8 {
        self.inner.change_octave(octave as i64)
    }

    #[wasm_bindgen(js_name = changeTempo)]
    pub fn change_tempo(&mut self, tempo: i32) -> u16 {
        self.inner.change_tempo(tempo as i64)
    }

    #[wasm_bindgen(js_name = changeBeatCount)]
    pub fn change_beat_count(&mut self, beat_count: i32) -> u8 {
        self.inner.change_beat_count(beat_count as i64)
    }

    #[wasm_bindgen(js_name = toggleDrum)]
    pub fn toggle_drum(&mut self, enabled: bool) -> bool {
        self.inner.toggle_drum(enabled)
    }

    #[wasm_bindgen(js_name = changeBeatStyle)]
    pub fn change_beat_style(&mut self, index: i32) -> usize {
        self.inner.change_beat_style(index as i64).index()
    }

    #[wasm_bindgen(js_name = setDarkTheme)]
    pub fn set_dark_theme(&mut self, enabled: bool) -> bool {
        self.inner.set_dark_theme(enabled)
    }

    /// Current preferences, keyed like the storage keys.
    pub fn settings(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.snapshot())
    }

    /// Beat style names in index order.
    #[wasm_bindgen(js_name = beatStyles)]
    pub fn beat_styles(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.beat_styles())
    }
}
