//! Injectable periodic scheduler driving the analysis tick.
//!
//! The pipeline never owns a timer directly; it hands a `tick` closure to a
//! [`TickScheduler`] and keeps only the returned [`SchedulerHandle`].  This
//! decouples the engine from any particular event-loop mechanism and lets
//! tests drive `tick()` by hand instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// TickScheduler trait
// ---------------------------------------------------------------------------

/// Object-safe periodic-callback source.
///
/// Implementations must be `Send + Sync` so they can be held behind an
/// `Arc<dyn TickScheduler>`.
///
/// # Contract
///
/// * `tick` is invoked repeatedly, roughly once per `period`.
/// * Invocations never overlap — each tick runs to completion before the
///   next is scheduled.
/// * Cancelling the returned handle stops further invocations; at most one
///   in-flight tick may still complete.
pub trait TickScheduler: Send + Sync {
    /// Begin invoking `tick` every `period` until the handle is cancelled.
    fn start(&self, period: Duration, tick: Box<dyn FnMut() + Send>) -> SchedulerHandle;
}

// ---------------------------------------------------------------------------
// SchedulerHandle
// ---------------------------------------------------------------------------

/// Cancellation handle for a running tick loop.
///
/// [`cancel`](Self::cancel) only stores a flag: it is idempotent, never
/// blocks, and is safe to call from inside the tick callback itself.
#[derive(Clone)]
pub struct SchedulerHandle {
    running: Arc<AtomicBool>,
}

impl SchedulerHandle {
    /// Create a handle around a shared running flag.
    pub fn new(running: Arc<AtomicBool>) -> Self {
        Self { running }
    }

    /// Stop the tick loop.  Safe to call repeatedly and from any thread,
    /// including the tick thread.
    pub fn cancel(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        !self.running.load(Ordering::Acquire)
    }
}

// ---------------------------------------------------------------------------
// ThreadScheduler
// ---------------------------------------------------------------------------

/// Production scheduler: a dedicated thread running tick–sleep cycles.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use voice_sense::engine::{ThreadScheduler, TickScheduler};
///
/// let scheduler = ThreadScheduler;
/// let handle = scheduler.start(Duration::from_millis(100), Box::new(|| {
///     // one analysis tick
/// }));
/// handle.cancel();
/// ```
pub struct ThreadScheduler;

impl TickScheduler for ThreadScheduler {
    fn start(&self, period: Duration, mut tick: Box<dyn FnMut() + Send>) -> SchedulerHandle {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        std::thread::Builder::new()
            .name("analysis-tick".into())
            .spawn(move || {
                while flag.load(Ordering::Acquire) {
                    tick();
                    std::thread::sleep(period);
                }
                log::debug!("scheduler: tick thread exiting");
            })
            .expect("failed to spawn analysis tick thread");

        SchedulerHandle::new(running)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
