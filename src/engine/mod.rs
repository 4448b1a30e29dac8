//! Session orchestration — the periodic tick, its scheduler, and the
//! lifecycle wrapper that binds the audio hardware to the pipeline.

pub mod orchestrator;
pub mod scheduler;
pub mod session;

pub use orchestrator::{AnalysisFrame, Orchestrator};
pub use scheduler::{SchedulerHandle, ThreadScheduler, TickScheduler};
pub use session::{AudioSession, SessionError};
