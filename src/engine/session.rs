//! Audio session lifecycle — wires capture, playback, scheduler and
//! orchestrator together.
//!
//! # Startup sequence
//!
//! 1. Open the default capture device and read its native sample rate.
//! 2. Allocate the circular sample buffer and hand its writer to capture.
//! 3. Start the reference tone (degrades gracefully when no output device
//!    is present — gesture detection then runs without a tone).
//! 4. Build the [`Orchestrator`] and drive it from a [`TickScheduler`].
//!
//! [`AudioSession::stop`] detaches the capture callback and cancels the
//! tick; both steps are idempotent and safe to trigger from any thread.

use crossbeam_channel::Receiver;
use thiserror::Error;

use crate::audio::{AudioCapture, CaptureError, SampleBuffer, StreamHandle, TonePlayer};
use crate::config::AnalyzerConfig;
use crate::engine::orchestrator::{AnalysisFrame, Orchestrator};
use crate::engine::scheduler::{SchedulerHandle, ThreadScheduler, TickScheduler};

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors that prevent a session from starting.
///
/// A missing *output* device is not fatal — the tone is simply skipped —
/// but without a capture device there is nothing to analyze.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("audio capture unavailable: {0}")]
    Capture(#[from] CaptureError),
}

// ---------------------------------------------------------------------------
// AudioSession
// ---------------------------------------------------------------------------

/// One live analysis session over the default audio devices.
///
/// All pipeline state is created at session start and discarded at stop.
/// Frames arrive on [`frames`](Self::frames) at the configured tick rate.
///
/// # Example
///
/// ```rust,no_run
/// use voice_sense::config::AnalyzerConfig;
/// use voice_sense::engine::AudioSession;
///
/// let mut session = AudioSession::start(AnalyzerConfig::default()).unwrap();
/// for frame in session.frames().iter().take(20) {
///     println!("vowel: {}  gesture: {}", frame.vowel.label.label(), frame.gesture.label());
/// }
/// session.stop();
/// ```
pub struct AudioSession {
    frames: Receiver<AnalysisFrame>,
    capture: Option<StreamHandle>,
    playback: Option<TonePlayer>,
    scheduler: Option<SchedulerHandle>,
}

impl AudioSession {
    /// Start a session driven by the default thread-backed scheduler.
    pub fn start(config: AnalyzerConfig) -> Result<Self, SessionError> {
        Self::start_with(config, &ThreadScheduler)
    }

    /// Start a session with an explicit scheduler implementation.
    pub fn start_with(
        config: AnalyzerConfig,
        scheduler: &dyn TickScheduler,
    ) -> Result<Self, SessionError> {
        let capture = AudioCapture::new()?;
        let sample_rate = capture.sample_rate();
        log::info!(
            "audio capture ready ({sample_rate} Hz, {} ch)",
            capture.channels()
        );

        let (writer, reader) = SampleBuffer::with_capacity(config.audio.buffer_size);
        let capture_handle = capture.start(writer)?;

        let playback = match TonePlayer::start(&config.tone) {
            Ok(player) => {
                log::info!("reference tone playing at {:.0} Hz", player.frequency());
                Some(player)
            }
            Err(e) => {
                log::warn!("tone playback unavailable: {e} — continuing without a reference tone");
                None
            }
        };

        let (frame_tx, frames) = crossbeam_channel::unbounded();
        let mut orchestrator = Orchestrator::new(&config, sample_rate, reader, frame_tx);
        let tick_handle = scheduler.start(
            config.audio.tick_period(),
            Box::new(move || {
                orchestrator.tick();
            }),
        );

        Ok(Self {
            frames,
            capture: Some(capture_handle),
            playback,
            scheduler: Some(tick_handle),
        })
    }

    /// Channel of per-tick analysis frames.
    ///
    /// The receiver can be cloned and consumed from any thread.
    pub fn frames(&self) -> &Receiver<AnalysisFrame> {
        &self.frames
    }

    /// Retarget the reference tone (clamped to the configured band).
    ///
    /// A no-op when tone playback was unavailable at startup.
    pub fn set_tone_frequency(&self, frequency_hz: f32) {
        match &self.playback {
            Some(player) => player.set_frequency(frequency_hz),
            None => log::debug!("no tone playback; ignoring frequency request"),
        }
    }

    /// The tone frequency currently being rendered, if playback is active.
    pub fn tone_frequency(&self) -> Option<f32> {
        self.playback.as_ref().map(|p| p.frequency())
    }

    /// Stop the session: detach the capture callback, silence the tone and
    /// cancel the analysis tick.
    ///
    /// Idempotent; never blocks, so it is safe to call from the tick
    /// context.  Already-published frames remain readable.
    pub fn stop(&mut self) {
        if let Some(handle) = self.scheduler.take() {
            handle.cancel();
            log::debug!("session: tick cancelled");
        }
        if self.capture.take().is_some() {
            log::debug!("session: capture detached");
        }
        if self.playback.take().is_some() {
            log::debug!("session: tone stopped");
        }
    }
}

impl Drop for AudioSession {
    fn drop(&mut self) {
        self.stop();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
