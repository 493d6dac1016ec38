//! # Trigger Dispatch
//!
//! Turns a schedule into actual audio calls. The scheduler only returns data;
//! this module owns the waiting.
//!
//! ## Timing
//! Each trigger fires at `latency + offset_ms` after the dispatch started.
//! The latency is constant and uniform; it absorbs the delay some hosts
//! impose before audio may start.
//!
//! ## Overlap
//! Playback is fire-and-forget. [`Dispatcher::spawn`] runs each request on its
//! own thread, so a new chord never cancels one that is still sounding, and
//! every `play` call is an independent sample instance.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::error::PlaybackError;
use crate::playback::{SampleId, TimedTrigger};

/// Fixed delay before every trigger.
pub const DISPATCH_LATENCY: Duration = Duration::from_millis(150);

/// Something that can play a sample at a volume
///
/// Implementations must not stop earlier instances of the same sample.
pub trait AudioOutput {
    fn play(&self, sample: &SampleId, volume: f32) -> Result<(), PlaybackError>;
}

/// Waits out trigger offsets and forwards each trigger to an [`AudioOutput`]
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    latency: Duration,
    sleep: fn(Duration),
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            latency: DISPATCH_LATENCY,
            sleep: thread::sleep,
        }
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the sleep function (tests pass a no-op).
    pub fn with_sleep(mut self, sleep: fn(Duration)) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Dispatch a schedule on the current thread, returning once every
    /// trigger has been handed to `output`.
    ///
    /// Triggers go out in non-decreasing offset order. A failing `play` is
    /// logged and the rest of the sequence continues. Returns the number of
    /// triggers that played without error.
    pub fn run<O: AudioOutput + ?Sized>(&self, triggers: &[TimedTrigger], output: &O) -> usize {
        let mut ordered: Vec<&TimedTrigger> = triggers.iter().collect();
        ordered.sort_by_key(|t| t.offset_ms);

        let start = Instant::now();
        let mut played = 0;

        for trigger in ordered {
            let due = self.latency + Duration::from_millis(trigger.offset_ms);
            let elapsed = start.elapsed();
            if due > elapsed {
                (self.sleep)(due - elapsed);
            }

            match output.play(&trigger.sample, trigger.volume) {
                Ok(()) => played += 1,
                Err(e) => warn!("Playback failed for {}: {}", trigger.sample.path(), e),
            }
        }

        debug!("Dispatched {}/{} triggers", played, triggers.len());
        played
    }

    /// Dispatch a schedule on a background thread.
    ///
    /// There is no cancellation: the returned handle only allows waiting.
    pub fn spawn<O>(&self, triggers: Vec<TimedTrigger>, output: Arc<O>) -> JoinHandle<usize>
    where
        O: AudioOutput + Send + Sync + ?Sized + 'static,
    {
        let dispatcher = *self;
        thread::spawn(move || dispatcher.run(&triggers, &*output))
    }
}

/// Output that resolves samples against an assets directory
///
/// Playing prints the resolved path and volume; a missing sample file is a
/// [`PlaybackError::MissingSample`].
#[derive(Debug, Clone)]
pub struct SampleDirOutput {
    root: PathBuf,
}

impl SampleDirOutput {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn resolve(&self, sample: &SampleId) -> PathBuf {
        self.root.join(sample.path())
    }
}

impl AudioOutput for SampleDirOutput {
    fn play(&self, sample: &SampleId, volume: f32) -> Result<(), PlaybackError> {
        let path = self.resolve(sample);
        if !path.is_file() {
            return Err(PlaybackError::MissingSample(path.display().to_string()));
        }
        println!("play {} volume={:.2}", path.display(), volume);
        Ok(())
    }
}
