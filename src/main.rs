//! Application entry point — console front end for the analyzer.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AnalyzerConfig`] from disk (returns default on first run).
//! 3. Start an [`AudioSession`] (capture + tone + analysis tick).
//! 4. Consume analysis frames from the session channel and print one
//!    status line per tick until interrupted.

use anyhow::Context;
use voice_sense::config::AnalyzerConfig;
use voice_sense::engine::AudioSession;

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("voice-sense starting up");

    // 2. Configuration
    let config = AnalyzerConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AnalyzerConfig::default()
    });

    // 3. Session
    let session =
        AudioSession::start(config).context("could not start the audio session")?;
    if let Some(tone) = session.tone_frequency() {
        log::info!("reference tone: {tone:.0} Hz");
    }

    // 4. Consume frames until the process is interrupted.
    for frame in session.frames().iter() {
        let format_freq = |value: Option<f32>| match value {
            Some(hz) => format!("{hz:8.2} Hz"),
            None => "     ---   ".to_string(),
        };

        let peak_readout = match frame.spectrum_max {
            Some(peak) => format!("{:7.2} dB @ {:8.2} Hz", peak.magnitude_db, peak.frequency_hz),
            None => "---".to_string(),
        };

        println!(
            "f1: {}  f2: {}  peak: {}  vowel: {:<5}  gesture: {}",
            format_freq(frame.vowel.f1_hz),
            format_freq(frame.vowel.f2_hz),
            peak_readout,
            frame.vowel.label.label(),
            frame.gesture.label()
        );
    }

    log::info!("frame channel closed; shutting down");
    Ok(())
}
