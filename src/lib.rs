//! # voice-sense
//!
//! Real-time microphone analysis for two classifiers:
//!
//! - **Vowel detection** — the two loudest spectral peaks are treated as
//!   formant estimates and matched against threshold rules ("ahh" / "ooo").
//! - **Doppler gesture detection** — a self-generated ultrasonic reference
//!   tone is played back; hand motion shifts its reflection, and the
//!   smoothed dominant-frequency track is classified as approaching,
//!   receding or stationary.
//!
//! ## Pipeline
//!
//! ```text
//! Microphone → SampleBuffer (wait-free circular store)
//!            → tick: HammingWindow → SpectrumAnalyzer → peak extraction
//!            → { VowelClassifier, GestureClassifier } → AnalysisFrame
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use voice_sense::config::AnalyzerConfig;
//! use voice_sense::engine::AudioSession;
//!
//! let session = AudioSession::start(AnalyzerConfig::default())?;
//! session.set_tone_frequency(18_000.0);
//!
//! for frame in session.frames().iter().take(50) {
//!     println!(
//!         "vowel: {:<5}  gesture: {}",
//!         frame.vowel.label.label(),
//!         frame.gesture.label()
//!     );
//! }
//! # Ok::<(), voice_sense::engine::SessionError>(())
//! ```
//!
//! The DSP and classifier layers have no hardware dependencies and can be
//! driven directly — see [`engine::Orchestrator`].

pub mod audio;
pub mod classify;
pub mod config;
pub mod dsp;
pub mod engine;

// Re-export main types
pub use classify::{GestureLabel, VowelLabel};
pub use config::AnalyzerConfig;
pub use engine::{AnalysisFrame, AudioSession};
