//! Magnitude spectrum of a windowed frame, via `rustfft`.
//!
//! [`SpectrumAnalyzer`] wraps a planned forward FFT for a fixed transform
//! size `N` and converts the complex output to `N/2` dB magnitudes ordered
//! by increasing frequency.  Bin `i` corresponds to
//! `i * sample_rate / N` Hz.
//!
//! The transform itself is treated as a black box; this module only owns
//! the real→complex packing and the dB conversion.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Floor applied before the log so silent bins map to a finite dB value.
const MAGNITUDE_FLOOR: f32 = 1e-9;

// ---------------------------------------------------------------------------
// SpectrumAnalyzer
// ---------------------------------------------------------------------------

/// Forward-FFT wrapper producing dB magnitudes for half the transform size.
///
/// The FFT plan and the complex scratch buffer are reused across calls, so
/// a tick performs no planning work.
///
/// # Example
///
/// ```rust
/// use voice_sense::dsp::SpectrumAnalyzer;
///
/// let mut analyzer = SpectrumAnalyzer::new(1024);
/// let frame = vec![0.0f32; 1024];
/// let spectrum = analyzer.analyze(&frame);
/// assert_eq!(spectrum.len(), 512);
/// ```
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    fft_size: usize,
}

impl SpectrumAnalyzer {
    /// Plan a forward FFT for frames of `fft_size` real samples.
    ///
    /// # Panics
    ///
    /// Panics if `fft_size` is not an even number of at least 2 — the
    /// output length is `fft_size / 2`.
    pub fn new(fft_size: usize) -> Self {
        assert!(
            fft_size >= 2 && fft_size % 2 == 0,
            "FFT size must be even and >= 2"
        );

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        Self {
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
            fft_size,
        }
    }

    /// Transform `samples` and write `fft_size / 2` dB magnitudes into `out`.
    ///
    /// `samples` must already be windowed; see [`crate::dsp::HammingWindow`].
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != fft_size` or `out.len() != fft_size / 2`.
    pub fn analyze_into(&mut self, samples: &[f32], out: &mut [f32]) {
        assert_eq!(samples.len(), self.fft_size, "frame length != FFT size");
        assert_eq!(out.len(), self.fft_size / 2, "output length != FFT size / 2");

        for (slot, &sample) in self.scratch.iter_mut().zip(samples.iter()) {
            *slot = Complex::new(sample, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (bin, slot) in out.iter_mut().zip(self.scratch.iter()) {
            let magnitude = slot.norm().max(MAGNITUDE_FLOOR);
            *bin = 20.0 * magnitude.log10();
        }
    }

    /// Convenience wrapper returning a freshly allocated spectrum.
    pub fn analyze(&mut self, samples: &[f32]) -> Vec<f32> {
        let mut out = vec![0.0f32; self.fft_size / 2];
        self.analyze_into(samples, &mut out);
        out
    }

    /// Transform size `N`.
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of output bins, `N / 2`.
    pub fn bins(&self) -> usize {
        self.fft_size / 2
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency_hz: f32, amplitude: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f32 / sample_rate;
                amplitude * (2.0 * std::f32::consts::PI * frequency_hz * t).sin()
            })
            .collect()
    }

    #[test]
    fn output_length_is_half_the_transform_size() {
        let mut analyzer = SpectrumAnalyzer::new(256);
        let spectrum = analyzer.analyze(&vec![0.0f32; 256]);
        assert_eq!(spectrum.len(), 128);
        assert_eq!(analyzer.bins(), 128);
    }

    #[test]
    fn silence_sits_on_the_db_floor() {
        let mut analyzer = SpectrumAnalyzer::new(128);
        let spectrum = analyzer.analyze(&vec![0.0f32; 128]);
        for &bin in &spectrum {
            assert!((bin - (-180.0)).abs() < 1e-3, "expected floor, got {bin}");
        }
    }

    #[test]
    fn bin_centred_sine_peaks_at_its_bin() {
        // sample_rate == fft_size → 1 Hz per bin; 200 Hz lands on bin 200.
        let sample_rate = 1024.0;
        let mut analyzer = SpectrumAnalyzer::new(1024);
        let frame = sine(200.0, 0.5, sample_rate, 1024);
        let spectrum = analyzer.analyze(&frame);

        let (max_bin, _) = spectrum
            .iter()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |(bi, bv), (i, &v)| {
                if v > bv { (i, v) } else { (bi, bv) }
            });
        assert_eq!(max_bin, 200);
    }

    #[test]
    fn louder_signal_yields_higher_db() {
        let sample_rate = 1024.0;
        let mut analyzer = SpectrumAnalyzer::new(1024);
        let quiet = analyzer.analyze(&sine(200.0, 0.1, sample_rate, 1024));
        let loud = analyzer.analyze(&sine(200.0, 0.5, sample_rate, 1024));
        assert!(loud[200] > quiet[200]);
        // 5× amplitude ≈ +14 dB.
        assert!((loud[200] - quiet[200] - 13.98).abs() < 0.5);
    }

    #[test]
    fn analyze_into_reuses_caller_buffer() {
        let mut analyzer = SpectrumAnalyzer::new(64);
        let mut out = vec![f32::NAN; 32];
        analyzer.analyze_into(&vec![0.0f32; 64], &mut out);
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    #[should_panic(expected = "FFT size must be even")]
    fn odd_fft_size_panics() {
        let _ = SpectrumAnalyzer::new(1023);
    }

    #[test]
    #[should_panic(expected = "frame length != FFT size")]
    fn wrong_frame_length_panics() {
        let mut analyzer = SpectrumAnalyzer::new(64);
        let _ = analyzer.analyze(&vec![0.0f32; 32]);
    }
}
