//! Analyzer settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Every numeric parameter the pipeline consumes lives here under a named,
//! documented field — no thresholds are scattered through the modules.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// AudioSettings
// ---------------------------------------------------------------------------

/// Settings for sample buffering and the analysis tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Circular sample-buffer capacity — also the FFT frame length, so it
    /// must be even.
    pub buffer_size: usize,
    /// Analysis ticks per second.
    pub tick_hz: f32,
}

impl AudioSettings {
    /// Interval between two analysis ticks.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.tick_hz)
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            buffer_size: 4096,
            tick_hz: 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// PeakSettings
// ---------------------------------------------------------------------------

/// Settings for spectral peak qualification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakSettings {
    /// dB magnitude a bin must strictly exceed to qualify as a peak.
    pub threshold_db: f32,
    /// Bins below this frequency are never considered (mains hum, rumble).
    pub min_frequency_hz: f32,
}

impl Default for PeakSettings {
    fn default() -> Self {
        Self {
            threshold_db: 0.01,
            min_frequency_hz: 100.0,
        }
    }
}

// ---------------------------------------------------------------------------
// VowelSettings
// ---------------------------------------------------------------------------

/// Settings for the vowel classifier's noise handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VowelSettings {
    /// Consecutive ticks without a qualifying peak before the vowel state
    /// is forced to `Noise`.
    pub noise_timeout_ticks: u32,
}

impl Default for VowelSettings {
    fn default() -> Self {
        Self {
            noise_timeout_ticks: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// SmoothingSettings
// ---------------------------------------------------------------------------

/// Settings for the exponential frequency smoother.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingSettings {
    /// Share of the newest sample in the exponential blend, `(0.0, 1.0]`.
    pub weight: f32,
    /// Number of recent smoothed values retained.
    pub history_depth: usize,
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            weight: 0.7,
            history_depth: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// GestureSettings
// ---------------------------------------------------------------------------

/// Settings for the Doppler gesture state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureSettings {
    /// Smoothed-frequency deltas below this magnitude count as stationary.
    pub hysteresis_hz: f32,
    /// Smoothed-frequency delta beyond ±this value signals motion.
    pub direction_threshold_hz: f32,
    /// Minimum milliseconds between two label evaluations.
    pub debounce_ms: u64,
}

impl GestureSettings {
    /// Debounce interval as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            hysteresis_hz: 3.0,
            direction_threshold_hz: 5.0,
            debounce_ms: 500,
        }
    }
}

// ---------------------------------------------------------------------------
// ToneSettings
// ---------------------------------------------------------------------------

/// Settings for the self-generated reference tone (gesture module).
///
/// The band sits at the top of the audible range so the tone is barely
/// perceptible while its Doppler reflections stay well clear of speech
/// frequencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneSettings {
    /// Lowest selectable tone frequency in Hz.
    pub min_hz: f32,
    /// Highest selectable tone frequency in Hz.
    pub max_hz: f32,
    /// Tone frequency used until the consumer picks another.
    pub default_hz: f32,
}

impl Default for ToneSettings {
    fn default() -> Self {
        Self {
            min_hz: 17_000.0,
            max_hz: 20_000.0,
            default_hz: 18_000.0,
        }
    }
}

// ---------------------------------------------------------------------------
// AnalyzerConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level analyzer configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_sense::config::AnalyzerConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AnalyzerConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Sample buffering and tick rate.
    pub audio: AudioSettings,
    /// Peak qualification thresholds.
    pub peaks: PeakSettings,
    /// Vowel classifier noise handling.
    pub vowel: VowelSettings,
    /// Frequency smoothing parameters.
    pub smoothing: SmoothingSettings,
    /// Gesture state-machine parameters.
    pub gesture: GestureSettings,
    /// Reference tone band.
    pub tone: ToneSettings,
}

impl AnalyzerConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AnalyzerConfig::default())` when the file does not exist
    /// yet (first-run scenario) so callers never need to special-case a
    /// missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify default values match the design parameters.
    #[test]
    fn default_values() {
        let cfg = AnalyzerConfig::default();

        assert_eq!(cfg.audio.buffer_size, 4096);
        assert_eq!(cfg.audio.tick_hz, 10.0);
        assert_eq!(cfg.peaks.threshold_db, 0.01);
        assert_eq!(cfg.peaks.min_frequency_hz, 100.0);
        assert_eq!(cfg.vowel.noise_timeout_ticks, 10);
        assert_eq!(cfg.smoothing.weight, 0.7);
        assert_eq!(cfg.smoothing.history_depth, 5);
        assert_eq!(cfg.gesture.hysteresis_hz, 3.0);
        assert_eq!(cfg.gesture.direction_threshold_hz, 5.0);
        assert_eq!(cfg.gesture.debounce_ms, 500);
        assert_eq!(cfg.tone.min_hz, 17_000.0);
        assert_eq!(cfg.tone.max_hz, 20_000.0);
        assert_eq!(cfg.tone.default_hz, 18_000.0);
    }

    #[test]
    fn tick_period_from_rate() {
        let audio = AudioSettings::default();
        assert_eq!(audio.tick_period(), Duration::from_millis(100));
    }

    #[test]
    fn debounce_from_millis() {
        let gesture = GestureSettings::default();
        assert_eq!(gesture.debounce(), Duration::from_millis(500));
    }

    /// Verify that a default config survives a TOML round trip.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AnalyzerConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AnalyzerConfig::load_from(&path).expect("load");

        assert_eq!(original.audio.buffer_size, loaded.audio.buffer_size);
        assert_eq!(original.audio.tick_hz, loaded.audio.tick_hz);
        assert_eq!(original.peaks.threshold_db, loaded.peaks.threshold_db);
        assert_eq!(
            original.peaks.min_frequency_hz,
            loaded.peaks.min_frequency_hz
        );
        assert_eq!(
            original.vowel.noise_timeout_ticks,
            loaded.vowel.noise_timeout_ticks
        );
        assert_eq!(original.smoothing.weight, loaded.smoothing.weight);
        assert_eq!(original.gesture.debounce_ms, loaded.gesture.debounce_ms);
        assert_eq!(original.tone.default_hz, loaded.tone.default_hz);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AnalyzerConfig::load_from(&path).expect("should not error");
        assert_eq!(config.audio.buffer_size, 4096);
        assert_eq!(config.gesture.debounce_ms, 500);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AnalyzerConfig::default();
        cfg.audio.buffer_size = 8192;
        cfg.audio.tick_hz = 20.0;
        cfg.peaks.threshold_db = 5.0;
        cfg.gesture.debounce_ms = 250;
        cfg.tone.default_hz = 19_000.0;

        cfg.save_to(&path).expect("save");
        let loaded = AnalyzerConfig::load_from(&path).expect("load");

        assert_eq!(loaded.audio.buffer_size, 8192);
        assert_eq!(loaded.audio.tick_hz, 20.0);
        assert_eq!(loaded.peaks.threshold_db, 5.0);
        assert_eq!(loaded.gesture.debounce_ms, 250);
        assert_eq!(loaded.tone.default_hz, 19_000.0);
    }
}
