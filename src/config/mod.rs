//! Configuration: named parameters for every pipeline stage, TOML
//! persistence, and platform paths.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AnalyzerConfig, AudioSettings, GestureSettings, PeakSettings, SmoothingSettings,
    ToneSettings, VowelSettings,
};
