//! Doppler-shift gesture classification.
//!
//! With a fixed ultrasonic reference tone playing, a hand moving toward the
//! microphone compresses the reflected wavefront (dominant frequency rises)
//! and a hand moving away stretches it (frequency falls).
//! [`GestureClassifier`] turns the smoothed dominant-frequency track into a
//! discrete motion label.
//!
//! The smoother ingests the peak frequency on **every** tick; only the
//! label evaluation is rate-limited by the debounce interval, so a burst of
//! ticks between evaluations still shapes the track the next evaluation
//! sees.

use std::time::Instant;

use crate::config::{GestureSettings, SmoothingSettings};
use crate::dsp::FrequencySmoother;

// ---------------------------------------------------------------------------
// GestureLabel
// ---------------------------------------------------------------------------

/// Motion direction inferred from the Doppler shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureLabel {
    /// Frequency rising — hand moving toward the microphone.
    Approaching,
    /// Frequency falling — hand moving away.
    Receding,
    /// Frequency stable within the hysteresis band.
    Stationary,
    /// No evaluation has happened yet.
    Unknown,
}

impl GestureLabel {
    /// A short human-readable label suitable for display.
    pub fn label(&self) -> &'static str {
        match self {
            GestureLabel::Approaching => "toward",
            GestureLabel::Receding => "away",
            GestureLabel::Stationary => "still",
            GestureLabel::Unknown => "unknown",
        }
    }
}

impl Default for GestureLabel {
    fn default() -> Self {
        GestureLabel::Unknown
    }
}

// ---------------------------------------------------------------------------
// GestureClassifier
// ---------------------------------------------------------------------------

/// Hysteresis/debounce state machine over the smoothed dominant frequency.
///
/// Transition rule, evaluated at most once per debounce interval against
/// `delta = smoothed − last_frequency`:
///
/// * `delta > direction_threshold`   → [`GestureLabel::Approaching`]
/// * `delta < −direction_threshold`  → [`GestureLabel::Receding`]
/// * `|delta| < hysteresis`          → [`GestureLabel::Stationary`]
/// * otherwise (dead zone)           → previous label retained
///
/// `last_frequency` and the evaluation timestamp are recorded only when an
/// evaluation actually runs.
pub struct GestureClassifier {
    smoother: FrequencySmoother,
    state: GestureLabel,
    last_frequency_hz: f32,
    last_evaluation: Option<Instant>,
    hysteresis_hz: f32,
    direction_threshold_hz: f32,
    debounce: std::time::Duration,
}

impl GestureClassifier {
    /// Build a classifier from the gesture and smoothing settings.
    pub fn new(gesture: &GestureSettings, smoothing: &SmoothingSettings) -> Self {
        Self {
            smoother: FrequencySmoother::new(smoothing.weight, smoothing.history_depth),
            state: GestureLabel::Unknown,
            last_frequency_hz: 0.0,
            last_evaluation: None,
            hysteresis_hz: gesture.hysteresis_hz,
            direction_threshold_hz: gesture.direction_threshold_hz,
            debounce: gesture.debounce(),
        }
    }

    /// Ingest one tick's dominant-frequency estimate and return the current
    /// label.
    ///
    /// `now` is passed in rather than sampled internally so the debounce
    /// gate is deterministic under test; production callers pass
    /// `Instant::now()`.
    pub fn update(&mut self, peak_frequency_hz: f32, now: Instant) -> GestureLabel {
        let smoothed = self.smoother.smooth(peak_frequency_hz);

        let due = match self.last_evaluation {
            None => true,
            Some(at) => now.saturating_duration_since(at) > self.debounce,
        };
        if !due {
            return self.state;
        }

        let delta = smoothed - self.last_frequency_hz;
        if delta > self.direction_threshold_hz {
            self.state = GestureLabel::Approaching;
        } else if delta < -self.direction_threshold_hz {
            self.state = GestureLabel::Receding;
        } else if delta.abs() < self.hysteresis_hz {
            self.state = GestureLabel::Stationary;
        }
        // Deltas between the hysteresis band and the direction threshold
        // fall in the dead zone: the previous label stands.

        self.last_frequency_hz = smoothed;
        self.last_evaluation = Some(now);
        self.state
    }

    /// The label from the most recent evaluation.
    pub fn state(&self) -> GestureLabel {
        self.state
    }

    /// The most recent smoothed frequency, if any tick has been ingested.
    pub fn smoothed_frequency(&self) -> Option<f32> {
        self.smoother.last()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
