//! Reference tone playback via `cpal`.
//!
//! The gesture path needs a continuous sine wave near the top of the
//! audible range; hand motion Doppler-shifts its reflection and the
//! analysis side reads the shift off the dominant spectral peak.
//!
//! [`TonePlayer`] owns the output stream.  The target frequency is stored
//! as an `f32` bit pattern in an `AtomicU32`, so [`TonePlayer::set_frequency`]
//! never locks against the audio callback.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

use crate::config::ToneSettings;

// ---------------------------------------------------------------------------
// PlaybackError
// ---------------------------------------------------------------------------

/// Errors that can occur while setting up the tone output.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no output device found on the default audio host")]
    NoDevice,

    #[error("failed to query default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

// ---------------------------------------------------------------------------
// TonePlayer
// ---------------------------------------------------------------------------

/// Continuous sine-wave generator on the default output device.
///
/// # Example
///
/// ```rust,no_run
/// use voice_sense::audio::TonePlayer;
/// use voice_sense::config::ToneSettings;
///
/// let player = TonePlayer::start(&ToneSettings::default()).unwrap();
/// player.set_frequency(19_000.0);
/// // Dropping the player stops the tone.
/// ```
pub struct TonePlayer {
    _stream: cpal::Stream,
    frequency_bits: Arc<AtomicU32>,
    min_hz: f32,
    max_hz: f32,
}

impl TonePlayer {
    /// Open the default output device and start rendering the configured
    /// default tone.
    ///
    /// # Errors
    ///
    /// Returns a [`PlaybackError`] when no output device is available or
    /// the platform rejects the stream configuration.
    pub fn start(settings: &ToneSettings) -> Result<Self, PlaybackError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(PlaybackError::NoDevice)?;

        let supported = device.default_output_config()?;
        let sample_rate = supported.sample_rate().0 as f32;
        let channels = supported.channels() as usize;
        let config: cpal::StreamConfig = supported.into();

        let initial = clamp_frequency(settings.default_hz, settings.min_hz, settings.max_hz);
        let frequency_bits = Arc::new(AtomicU32::new(initial.to_bits()));
        let bits = Arc::clone(&frequency_bits);

        let mut phase: f32 = 0.0;
        let two_pi = 2.0 * std::f32::consts::PI;

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let frequency = f32::from_bits(bits.load(Ordering::Relaxed));
                let step = two_pi * frequency / sample_rate;
                for frame in data.chunks_mut(channels) {
                    let value = phase.sin();
                    for sample in frame.iter_mut() {
                        *sample = value;
                    }
                    phase += step;
                    if phase >= two_pi {
                        phase -= two_pi;
                    }
                }
            },
            |err: cpal::StreamError| {
                log::error!("cpal stream error: {err}");
            },
            None, // no timeout
        )?;

        stream.play()?;

        Ok(Self {
            _stream: stream,
            frequency_bits,
            min_hz: settings.min_hz,
            max_hz: settings.max_hz,
        })
    }

    /// Retarget the tone, clamping to the configured band.
    ///
    /// Takes effect on the next output callback; lock-free.
    pub fn set_frequency(&self, frequency_hz: f32) {
        let clamped = clamp_frequency(frequency_hz, self.min_hz, self.max_hz);
        self.frequency_bits.store(clamped.to_bits(), Ordering::Relaxed);
    }

    /// The tone frequency currently being rendered, in Hz.
    pub fn frequency(&self) -> f32 {
        f32::from_bits(self.frequency_bits.load(Ordering::Relaxed))
    }
}

/// Clamp a requested tone frequency into the configured band.
fn clamp_frequency(frequency_hz: f32, min_hz: f32, max_hz: f32) -> f32 {
    frequency_hz.clamp(min_hz, max_hz)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_band_frequency_is_unchanged() {
        assert_eq!(clamp_frequency(18_000.0, 17_000.0, 20_000.0), 18_000.0);
    }

    #[test]
    fn below_band_clamps_to_minimum() {
        assert_eq!(clamp_frequency(440.0, 17_000.0, 20_000.0), 17_000.0);
    }

    #[test]
    fn above_band_clamps_to_maximum() {
        assert_eq!(clamp_frequency(25_000.0, 17_000.0, 20_000.0), 20_000.0);
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert_eq!(clamp_frequency(17_000.0, 17_000.0, 20_000.0), 17_000.0);
        assert_eq!(clamp_frequency(20_000.0, 17_000.0, 20_000.0), 20_000.0);
    }
}
