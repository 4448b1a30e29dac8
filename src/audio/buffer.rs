//! Fixed-capacity circular store for the live `f32` microphone stream.
//!
//! The capture callback writes continuously; the analysis tick reads a
//! snapshot of the most-recent `capacity` samples.  New samples **overwrite**
//! the oldest data, so the buffer always holds the tail of the stream.
//!
//! # Concurrency
//!
//! [`SampleBuffer::with_capacity`] splits into a [`BufferWriter`] and a
//! [`BufferReader`] (single-writer / single-reader).  The writer is
//! wait-free: every slot is an `AtomicU32` holding an `f32` bit pattern, and
//! a monotonic written-sample counter is published with `Release` ordering
//! after each batch.  A reader that races a write observes each slot either
//! before or after that write — never a value torn across a slot.
//!
//! # Example
//!
//! ```rust
//! use voice_sense::audio::SampleBuffer;
//!
//! let (mut writer, reader) = SampleBuffer::with_capacity(4);
//! writer.push_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]); // 5 items → oldest dropped
//! assert_eq!(reader.snapshot(4), vec![2.0, 3.0, 4.0, 5.0]);
//! ```

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Shared storage
// ---------------------------------------------------------------------------

struct Shared {
    /// Sample slots as `f32` bit patterns.
    slots: Vec<AtomicU32>,
    capacity: usize,
    /// Total samples ever written (monotonic; slot index = written % capacity).
    written: AtomicU64,
}

// ---------------------------------------------------------------------------
// SampleBuffer
// ---------------------------------------------------------------------------

/// Factory for the writer/reader pair over one circular sample store.
pub struct SampleBuffer;

impl SampleBuffer {
    /// Allocate a store of `capacity` samples and split it into its
    /// single-writer and single-reader halves.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> (BufferWriter, BufferReader) {
        assert!(capacity > 0, "SampleBuffer capacity must be > 0");

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || AtomicU32::new(0.0f32.to_bits()));

        let shared = Arc::new(Shared {
            slots,
            capacity,
            written: AtomicU64::new(0),
        });

        (
            BufferWriter {
                shared: Arc::clone(&shared),
            },
            BufferReader { shared },
        )
    }
}

// ---------------------------------------------------------------------------
// BufferWriter
// ---------------------------------------------------------------------------

/// Writing half of a [`SampleBuffer`] — owned by the capture callback.
///
/// All writes are wait-free and never allocate, so this half is safe to
/// drive from a real-time audio thread.
pub struct BufferWriter {
    shared: Arc<Shared>,
}

impl BufferWriter {
    /// Append `samples`, overwriting the oldest data once full.
    ///
    /// Writes never block and never fail; a slice longer than the capacity
    /// simply leaves the last `capacity` samples in the store.
    pub fn push_slice(&mut self, samples: &[f32]) {
        let start = self.shared.written.load(Ordering::Relaxed);
        for (i, &sample) in samples.iter().enumerate() {
            let idx = ((start + i as u64) % self.shared.capacity as u64) as usize;
            self.shared.slots[idx].store(sample.to_bits(), Ordering::Relaxed);
        }
        self.shared
            .written
            .fetch_add(samples.len() as u64, Ordering::Release);
    }

    /// Append channel 0 of each interleaved frame in `samples`.
    ///
    /// Used by the capture callback to downmix a multi-channel device
    /// stream without allocating.  `channels == 0` is treated as mono.
    pub fn push_interleaved(&mut self, samples: &[f32], channels: usize) {
        let channels = channels.max(1);
        let start = self.shared.written.load(Ordering::Relaxed);
        let mut count = 0u64;
        for frame in samples.chunks(channels) {
            let idx = ((start + count) % self.shared.capacity as u64) as usize;
            self.shared.slots[idx].store(frame[0].to_bits(), Ordering::Relaxed);
            count += 1;
        }
        self.shared.written.fetch_add(count, Ordering::Release);
    }

    /// Maximum number of samples the store can hold.
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }
}

// ---------------------------------------------------------------------------
// BufferReader
// ---------------------------------------------------------------------------

/// Reading half of a [`SampleBuffer`] — owned by the analysis tick.
pub struct BufferReader {
    shared: Arc<Shared>,
}

impl BufferReader {
    /// Fill `out` with the most recent `out.len()` samples in chronological
    /// order.
    ///
    /// When fewer samples than `out.len()` have ever been written, the
    /// missing leading entries are zero.
    ///
    /// # Panics
    ///
    /// Panics if `out.len()` exceeds the buffer capacity.
    pub fn snapshot_into(&self, out: &mut [f32]) {
        let count = out.len();
        assert!(
            count <= self.shared.capacity,
            "snapshot length {count} exceeds buffer capacity {}",
            self.shared.capacity
        );

        let written = self.shared.written.load(Ordering::Acquire);
        let available = written.min(count as u64) as usize;
        let lead = count - available;

        for slot in out[..lead].iter_mut() {
            *slot = 0.0;
        }

        // Oldest sample of the window sits at written - available.
        let start = written - available as u64;
        for i in 0..available {
            let idx = ((start + i as u64) % self.shared.capacity as u64) as usize;
            out[lead + i] = f32::from_bits(self.shared.slots[idx].load(Ordering::Relaxed));
        }
    }

    /// Convenience wrapper around [`snapshot_into`](Self::snapshot_into)
    /// returning a freshly allocated `Vec`.
    pub fn snapshot(&self, count: usize) -> Vec<f32> {
        let mut out = vec![0.0f32; count];
        self.snapshot_into(&mut out);
        out
    }

    /// Total samples ever written by the producing half.
    pub fn total_written(&self) -> u64 {
        self.shared.written.load(Ordering::Acquire)
    }

    /// Maximum number of samples the store can hold.
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
