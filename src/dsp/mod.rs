//! Signal-processing stages — windowing → spectrum → peaks → smoothing.
//!
//! # Pipeline
//!
//! ```text
//! snapshot → HammingWindow → SpectrumAnalyzer (dB bins)
//!          → extract_two_loudest / max_bin → FrequencySmoother
//! ```
//!
//! Everything here is deterministic and hardware-free; the audio layer
//! feeds it and the classifiers consume it.

pub mod peaks;
pub mod smoothing;
pub mod spectrum;
pub mod window;

pub use peaks::{extract_two_loudest, max_bin, Peak, PeakPair};
pub use smoothing::FrequencySmoother;
pub use spectrum::SpectrumAnalyzer;
pub use window::HammingWindow;
