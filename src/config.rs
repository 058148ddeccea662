//! System configuration and calibration constants
//!
//! This module centralizes the compile-time constants of the modem core.
//! The tone pair, the autocorrelation lag, the post-detection filter and
//! the decision threshold form one calibrated set: changing any of them
//! requires re-deriving the others offline.

/// Audio sample rate driving the per-sample pipeline (48 kHz)
pub const SAMPLE_RATE_HZ: u32 = 48_000;

/// Serial line rate in bits per second
pub const BAUD_RATE: u32 = 1_200;

/// Number of sample periods spanning one UART bit
pub const SAMPLES_PER_BIT: u32 = SAMPLE_RATE_HZ / BAUD_RATE;

/// Tone frequency representing a logical 1 (mark)
pub const MARK_FREQ_HZ: u32 = 2_200;

/// Tone frequency representing a logical 0 (space)
pub const SPACE_FREQ_HZ: u32 = 1_200;

/// Autocorrelation lag of the FSK discriminator, in samples
///
/// At 48 kHz a 22-sample lag puts the mark tone near the positive peak of
/// the lag product (`cos(2π·2200·22/48000) ≈ +1.0`) and the space tone
/// near the negative peak (`cos(2π·1200·22/48000) ≈ −0.95`).
pub const AUTOCORR_DELAY_SAMPLES: usize = 22;

/// Decision threshold applied to the filtered lag product, in Q15 counts
///
/// Calibrated for input levels of roughly −15 dBFS and above; kept just
/// above zero so a dead line (all-zero input) reads as space, not mark.
pub const FSK_DECISION_THRESHOLD: i16 = 128;

/// Default transmit tone amplitude (linear, relative to full scale)
pub const DEFAULT_TX_AMPLITUDE: f32 = 0.5;
