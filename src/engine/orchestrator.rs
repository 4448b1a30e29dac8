//! Per-tick analysis driver — snapshot → window → spectrum → classifiers.
//!
//! [`Orchestrator::tick`] runs the whole pipeline once and publishes an
//! [`AnalysisFrame`] on a crossbeam channel for the presentation consumer.
//! All classifier and smoothing state lives here, owned by the single tick
//! context; the only shared resource is the sample buffer's reading half.
//!
//! # Tick sequence
//!
//! ```text
//! BufferReader::snapshot_into
//!   └─▶ HammingWindow::apply
//!         └─▶ SpectrumAnalyzer::analyze_into
//!               ├─▶ extract_two_loudest ─▶ VowelClassifier::update
//!               │                      └─▶ GestureClassifier::update
//!               └─▶ max_bin (display readout)
//! ```

use std::time::Instant;

use crossbeam_channel::Sender;

use crate::audio::BufferReader;
use crate::classify::{GestureClassifier, GestureLabel, VowelClassifier, VowelReading};
use crate::config::AnalyzerConfig;
use crate::dsp::{
    extract_two_loudest, max_bin, HammingWindow, Peak, PeakPair, SpectrumAnalyzer,
};

// ---------------------------------------------------------------------------
// AnalysisFrame
// ---------------------------------------------------------------------------

/// Everything the presentation layer needs from one analysis tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisFrame {
    /// The two loudest qualifying peaks, ranked loudest-first.
    pub peaks: PeakPair,
    /// The loudest bin of the whole spectrum, unfiltered.
    pub spectrum_max: Option<Peak>,
    /// Vowel classification with the formant estimates it used.
    pub vowel: VowelReading,
    /// Current Doppler gesture label.
    pub gesture: GestureLabel,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Owns all per-session analysis state and advances it one tick at a time.
///
/// Create with [`Orchestrator::new`], then either drive [`tick`](Self::tick)
/// from a [`crate::engine::TickScheduler`] or call it directly.
pub struct Orchestrator {
    reader: BufferReader,
    window: HammingWindow,
    analyzer: SpectrumAnalyzer,
    vowel: VowelClassifier,
    gesture: GestureClassifier,
    frame_tx: Sender<AnalysisFrame>,
    /// Scratch frame, length = buffer size.
    samples: Vec<f32>,
    /// Scratch spectrum, length = buffer size / 2.
    spectrum: Vec<f32>,
    sample_rate: f32,
    threshold_db: f32,
    min_frequency_hz: f32,
}

impl Orchestrator {
    /// Wire up the pipeline for one audio session.
    ///
    /// `sample_rate` is the capture device's native rate; `reader` is the
    /// consuming half of the session's sample buffer.  Published frames go
    /// out on `frame_tx`.
    pub fn new(
        config: &AnalyzerConfig,
        sample_rate: u32,
        reader: BufferReader,
        frame_tx: Sender<AnalysisFrame>,
    ) -> Self {
        let frame_len = config.audio.buffer_size;
        Self {
            reader,
            window: HammingWindow::new(frame_len),
            analyzer: SpectrumAnalyzer::new(frame_len),
            vowel: VowelClassifier::new(config.vowel.noise_timeout_ticks),
            gesture: GestureClassifier::new(&config.gesture, &config.smoothing),
            frame_tx,
            samples: vec![0.0; frame_len],
            spectrum: vec![0.0; frame_len / 2],
            sample_rate: sample_rate as f32,
            threshold_db: config.peaks.threshold_db,
            min_frequency_hz: config.peaks.min_frequency_hz,
        }
    }

    /// Run one full analysis pass and publish the resulting frame.
    pub fn tick(&mut self) -> AnalysisFrame {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> AnalysisFrame {
        self.reader.snapshot_into(&mut self.samples);
        self.window.apply(&mut self.samples);
        self.analyzer.analyze_into(&self.samples, &mut self.spectrum);

        let peaks = extract_two_loudest(
            &self.spectrum,
            self.sample_rate,
            self.threshold_db,
            self.min_frequency_hz,
        );
        let spectrum_max = max_bin(&self.spectrum, self.sample_rate);

        let vowel = self.vowel.update(&peaks);

        // The gesture track runs on the loudest qualifying peak only,
        // independent of the vowel/noise path.
        if let Some(peak) = peaks.loudest {
            self.gesture.update(peak.frequency_hz, now);
        }

        let frame = AnalysisFrame {
            peaks,
            spectrum_max,
            vowel,
            gesture: self.gesture.state(),
        };

        log::debug!(
            "tick: f1={:?} f2={:?} vowel={} gesture={}",
            frame.peaks.loudest_frequency(),
            frame.peaks.second_frequency(),
            frame.vowel.label.label(),
            frame.gesture.label()
        );

        // Ignore send errors — the presentation receiver may be gone.
        let _ = self.frame_tx.send(frame);
        frame
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
