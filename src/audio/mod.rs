//! Audio hardware boundary — capture, circular buffering, tone playback.
//!
//! # Data flow
//!
//! ```text
//! Microphone → cpal callback → BufferWriter (wait-free)
//!                                   │
//!                              BufferReader::snapshot  ← analysis tick
//!
//! TonePlayer → cpal output callback → speaker (reference sine)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voice_sense::audio::{AudioCapture, SampleBuffer};
//!
//! let (writer, reader) = SampleBuffer::with_capacity(4096);
//! let capture = AudioCapture::new().unwrap();
//! let _handle = capture.start(writer).unwrap(); // drop handle → stop stream
//!
//! let latest = reader.snapshot(4096);
//! println!("first sample of window: {}", latest[0]);
//! ```

pub mod buffer;
pub mod capture;
pub mod playback;

pub use buffer::{BufferReader, BufferWriter, SampleBuffer};
pub use capture::{AudioCapture, CaptureError, StreamHandle};
pub use playback::{PlaybackError, TonePlayer};
