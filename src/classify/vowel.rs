//! Formant-based vowel classification.
//!
//! The two loudest spectral peaks stand in for the first two formants of a
//! voiced sound.  [`classify`] is the pure threshold rule over one (f1, f2)
//! pair; [`VowelClassifier`] adds the per-tick state: last-known formants
//! (retained across ticks where a peak is missing) and the noise timeout
//! that declares the signal unvoiced after too many silent ticks.

use crate::dsp::PeakPair;

// ---------------------------------------------------------------------------
// Classification thresholds
// ---------------------------------------------------------------------------

/// Upper f1 bound (exclusive) for "ahh".
const AHH_F1_MAX_HZ: f32 = 120.0;
/// Upper f2 bound (exclusive) for "ahh".
const AHH_F2_MAX_HZ: f32 = 140.0;
/// Lower f1 bound (inclusive) for "ooo".
const OOO_F1_MIN_HZ: f32 = 170.0;
/// Lower f2 bound (inclusive) for "ooo".  Nearly always satisfied; kept
/// exactly as tuned in the field rather than second-guessed.
const OOO_F2_MIN_HZ: f32 = 10.0;

// ---------------------------------------------------------------------------
// VowelLabel
// ---------------------------------------------------------------------------

/// Result of vowel classification for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VowelLabel {
    /// Open vowel — low f1 and f2.
    Ahh,
    /// Rounded vowel — high f1.
    Ooo,
    /// Formants available but matching neither rule.
    Unclassified,
    /// No qualifying peak seen for the configured number of ticks.
    Noise,
}

impl VowelLabel {
    /// A short human-readable label suitable for display.
    pub fn label(&self) -> &'static str {
        match self {
            VowelLabel::Ahh => "ahh",
            VowelLabel::Ooo => "ooo",
            VowelLabel::Unclassified => "---",
            VowelLabel::Noise => "noise",
        }
    }
}

impl Default for VowelLabel {
    fn default() -> Self {
        VowelLabel::Unclassified
    }
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

/// Apply the formant threshold rule to one (f1, f2) pair.
///
/// Rules are tried in order; anything matching neither is
/// [`VowelLabel::Unclassified`].  This function never returns
/// [`VowelLabel::Noise`] — that decision belongs to [`VowelClassifier`].
///
/// ```rust
/// use voice_sense::classify::{classify, VowelLabel};
///
/// assert_eq!(classify(110.0, 130.0), VowelLabel::Ahh);
/// assert_eq!(classify(200.0, 300.0), VowelLabel::Ooo);
/// assert_eq!(classify(150.0, 150.0), VowelLabel::Unclassified);
/// ```
pub fn classify(f1_hz: f32, f2_hz: f32) -> VowelLabel {
    if f1_hz < AHH_F1_MAX_HZ && f2_hz < AHH_F2_MAX_HZ {
        VowelLabel::Ahh
    } else if f1_hz >= OOO_F1_MIN_HZ && f2_hz >= OOO_F2_MIN_HZ {
        VowelLabel::Ooo
    } else {
        VowelLabel::Unclassified
    }
}

// ---------------------------------------------------------------------------
// VowelReading
// ---------------------------------------------------------------------------

/// Per-tick output of the [`VowelClassifier`].
///
/// `f1_hz`/`f2_hz` are the formant estimates the label was derived from —
/// possibly stale values retained from an earlier tick.  Both are `None`
/// when the label is [`VowelLabel::Noise`] (explicit no-signal marker) or
/// while that formant has never been observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VowelReading {
    /// Classification result for this tick.
    pub label: VowelLabel,
    /// First formant estimate (loudest peak), if known.
    pub f1_hz: Option<f32>,
    /// Second formant estimate (second-loudest peak), if known.
    pub f2_hz: Option<f32>,
}

// ---------------------------------------------------------------------------
// VowelClassifier
// ---------------------------------------------------------------------------

/// Stateful vowel tracker driven once per analysis tick.
///
/// Each formant is updated whenever its peak is present and retained when
/// absent, so classification proceeds on stale-but-valid values through
/// short dropouts.  A run of `noise_timeout_ticks` ticks without any
/// qualifying peak forces [`VowelLabel::Noise`] and suppresses the formant
/// readout until a peak returns.
pub struct VowelClassifier {
    last_f1_hz: Option<f32>,
    last_f2_hz: Option<f32>,
    noise_ticks: u32,
    noise_timeout_ticks: u32,
}

impl VowelClassifier {
    /// Create a classifier that declares noise after `noise_timeout_ticks`
    /// consecutive peak-free ticks.
    pub fn new(noise_timeout_ticks: u32) -> Self {
        Self {
            last_f1_hz: None,
            last_f2_hz: None,
            noise_ticks: 0,
            noise_timeout_ticks,
        }
    }

    /// Ingest one tick's peak extraction result.
    pub fn update(&mut self, peaks: &PeakPair) -> VowelReading {
        if peaks.any() {
            self.noise_ticks = 0;
        } else {
            self.noise_ticks = self.noise_ticks.saturating_add(1);
        }

        if self.noise_ticks >= self.noise_timeout_ticks {
            // Formants are retained internally but not reported while the
            // signal is considered noise.
            return VowelReading {
                label: VowelLabel::Noise,
                f1_hz: None,
                f2_hz: None,
            };
        }

        if let Some(f1) = peaks.loudest_frequency() {
            self.last_f1_hz = Some(f1);
        }
        if let Some(f2) = peaks.second_frequency() {
            self.last_f2_hz = Some(f2);
        }

        let label = match (self.last_f1_hz, self.last_f2_hz) {
            (Some(f1), Some(f2)) => classify(f1, f2),
            _ => VowelLabel::Unclassified,
        };

        VowelReading {
            label,
            f1_hz: self.last_f1_hz,
            f2_hz: self.last_f2_hz,
        }
    }

    /// Consecutive peak-free ticks seen so far.
    pub fn noise_ticks(&self) -> u32 {
        self.noise_ticks
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::Peak;

    fn pair(f1: Option<f32>, f2: Option<f32>) -> PeakPair {
        PeakPair {
            loudest: f1.map(|frequency_hz| Peak {
                magnitude_db: 10.0,
                frequency_hz,
            }),
            second: f2.map(|frequency_hz| Peak {
                magnitude_db: 5.0,
                frequency_hz,
            }),
        }
    }

    // ---- classify rule boundaries ------------------------------------------

    #[test]
    fn just_inside_ahh_bounds() {
        assert_eq!(classify(119.9, 139.9), VowelLabel::Ahh);
    }

    #[test]
    fn ahh_bounds_are_exclusive() {
        assert_eq!(classify(120.0, 139.9), VowelLabel::Unclassified);
        // f1 = 119.9, f2 = 140.0 falls through the ahh rule; the ooo rule
        // needs f1 >= 170, so the pair stays unclassified.
        assert_eq!(classify(119.9, 140.0), VowelLabel::Unclassified);
    }

    #[test]
    fn ooo_bounds_are_inclusive() {
        assert_eq!(classify(170.0, 10.0), VowelLabel::Ooo);
        assert_eq!(classify(169.9, 10.0), VowelLabel::Unclassified);
    }

    #[test]
    fn ooo_low_f2_bound_rejects_below_ten() {
        assert_eq!(classify(200.0, 9.9), VowelLabel::Unclassified);
    }

    #[test]
    fn middle_pair_is_unclassified() {
        assert_eq!(classify(150.0, 150.0), VowelLabel::Unclassified);
    }

    #[test]
    fn very_low_pair_is_ahh() {
        assert_eq!(classify(50.0, 50.0), VowelLabel::Ahh);
    }

    // ---- Noise timeout -----------------------------------------------------

    #[test]
    fn noise_after_timeout_ticks() {
        let mut classifier = VowelClassifier::new(10);
        for i in 0..9 {
            let reading = classifier.update(&pair(None, None));
            assert_ne!(reading.label, VowelLabel::Noise, "tick {i}");
        }
        let reading = classifier.update(&pair(None, None));
        assert_eq!(reading.label, VowelLabel::Noise);
        assert_eq!(reading.f1_hz, None);
        assert_eq!(reading.f2_hz, None);
        assert_eq!(classifier.noise_ticks(), 10);
    }

    #[test]
    fn qualifying_peak_resets_noise_counter() {
        let mut classifier = VowelClassifier::new(10);
        for _ in 0..10 {
            classifier.update(&pair(None, None));
        }
        assert_eq!(classifier.noise_ticks(), 10);

        let reading = classifier.update(&pair(Some(110.0), Some(130.0)));
        assert_eq!(classifier.noise_ticks(), 0);
        assert_eq!(reading.label, VowelLabel::Ahh);
    }

    #[test]
    fn noise_state_persists_while_silent() {
        let mut classifier = VowelClassifier::new(3);
        for _ in 0..5 {
            classifier.update(&pair(None, None));
        }
        let reading = classifier.update(&pair(None, None));
        assert_eq!(reading.label, VowelLabel::Noise);
    }

    // ---- Stale-value retention ---------------------------------------------

    #[test]
    fn missing_second_formant_reuses_last_known() {
        let mut classifier = VowelClassifier::new(10);
        classifier.update(&pair(Some(110.0), Some(130.0)));

        // Only the loudest peak on this tick; f2 = 130 is retained.
        let reading = classifier.update(&pair(Some(115.0), None));
        assert_eq!(reading.label, VowelLabel::Ahh);
        assert_eq!(reading.f1_hz, Some(115.0));
        assert_eq!(reading.f2_hz, Some(130.0));
    }

    #[test]
    fn formants_survive_short_dropouts() {
        let mut classifier = VowelClassifier::new(10);
        classifier.update(&pair(Some(200.0), Some(300.0)));

        // A few empty ticks (below the timeout) keep classifying on the
        // stale pair.
        for _ in 0..3 {
            let reading = classifier.update(&pair(None, None));
            assert_eq!(reading.label, VowelLabel::Ooo);
            assert_eq!(reading.f1_hz, Some(200.0));
        }
    }

    #[test]
    fn unclassified_until_both_formants_seen() {
        let mut classifier = VowelClassifier::new(10);
        let reading = classifier.update(&pair(Some(110.0), None));
        assert_eq!(reading.label, VowelLabel::Unclassified);
        assert_eq!(reading.f1_hz, Some(110.0));
        assert_eq!(reading.f2_hz, None);
    }

    #[test]
    fn recovery_from_noise_keeps_retained_formants() {
        let mut classifier = VowelClassifier::new(3);
        classifier.update(&pair(Some(110.0), Some(130.0)));
        for _ in 0..3 {
            assert_eq!(
                classifier.update(&pair(None, None)).label,
                VowelLabel::Noise
            );
        }

        // One fresh loudest peak: f2 comes back from retention.
        let reading = classifier.update(&pair(Some(112.0), None));
        assert_eq!(reading.label, VowelLabel::Ahh);
        assert_eq!(reading.f2_hz, Some(130.0));
    }

    // ---- Labels ------------------------------------------------------------

    #[test]
    fn display_labels() {
        assert_eq!(VowelLabel::Ahh.label(), "ahh");
        assert_eq!(VowelLabel::Ooo.label(), "ooo");
        assert_eq!(VowelLabel::Unclassified.label(), "---");
        assert_eq!(VowelLabel::Noise.label(), "noise");
    }
}
