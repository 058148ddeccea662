//! FSK Discrimination and Generation
//!
//! The discriminator multiplies each incoming sample by the sample
//! received [`AUTOCORR_DELAY_SAMPLES`] periods earlier. At the calibrated
//! lag the product of the two line tones settles on opposite signs, so a
//! low-pass filter over the product followed by a fixed threshold
//! recovers the transmitted bit directly from the raw sample stream,
//! with no mixer and no timing recovery inside the discriminator.
//!
//! [`AUTOCORR_DELAY_SAMPLES`]: crate::config::AUTOCORR_DELAY_SAMPLES

use super::filter::{IirCoeffs, IirFilter, Sample};
use super::oscillator::Nco;
use crate::config::{
    AUTOCORR_DELAY_SAMPLES, DEFAULT_TX_AMPLITUDE, FSK_DECISION_THRESHOLD, MARK_FREQ_HZ,
    SAMPLE_RATE_HZ, SPACE_FREQ_HZ,
};

/// Autocorrelation FSK demodulator
///
/// Turns one Q15 audio sample into one demodulated bit per call. The
/// caller invokes it once per sample period; there is no failure path.
/// Every call produces a bit, and robustness rests entirely on the
/// calibration of lag, post-filter and threshold against the tone pair.
#[derive(Clone, Copy, Debug)]
pub struct FskDemodulator {
    /// Raw-sample history, one lag product per call
    delay: [i16; AUTOCORR_DELAY_SAMPLES],
    /// Current write position in the delay line
    pos: usize,
    /// Post-detection low-pass over the lag product
    lowpass: IirFilter,
    /// Last filtered lag product (diagnostic tap)
    level: i16,
}

impl FskDemodulator {
    /// Create a new demodulator with zeroed history
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delay: [0; AUTOCORR_DELAY_SAMPLES],
            pos: 0,
            lowpass: IirFilter::new(IirCoeffs::FSK_POST_LOWPASS),
            level: 0,
        }
    }

    /// Demodulate one sample into one bit
    ///
    /// Returns `true` for mark, `false` for space. The first
    /// [`AUTOCORR_DELAY_SAMPLES`] calls plus the filter settling time are
    /// a fill-up transient during which the output is not meaningful.
    pub fn demodulate(&mut self, sample: Sample) -> bool {
        let x = sample.to_bits();

        let delayed = self.delay[self.pos];
        self.delay[self.pos] = x;
        self.pos = (self.pos + 1) % AUTOCORR_DELAY_SAMPLES;

        // Single-lag autocorrelation estimate, wide product brought back
        // to Q15 before filtering.
        let product = (i32::from(x) * i32::from(delayed)) >> 15;
        let product = product.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;

        let filtered = self.lowpass.process(Sample::from_bits(product));
        self.level = filtered.to_bits();

        self.level > FSK_DECISION_THRESHOLD
    }

    /// Last filtered lag product, in Q15 counts
    ///
    /// Settles near `+amp²/2` on the mark tone and `−amp²/2` on the space
    /// tone; useful for line-level diagnostics.
    #[must_use]
    pub const fn level(&self) -> i16 {
        self.level
    }

    /// Reset delay line and filter state
    pub fn reset(&mut self) {
        self.delay = [0; AUTOCORR_DELAY_SAMPLES];
        self.pos = 0;
        self.lowpass.reset();
        self.level = 0;
    }
}

impl Default for FskDemodulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Phase-continuous FSK tone generator
///
/// Keys the NCO between the mark and space frequencies according to the
/// current data bit. The transmit counterpart of [`FskDemodulator`]; also
/// the stimulus source for the host tests.
#[derive(Clone, Copy, Debug)]
pub struct FskModulator {
    nco: Nco,
    bit: bool,
    amplitude: f32,
}

impl FskModulator {
    /// Create a new modulator, idling on the mark tone
    #[must_use]
    pub fn new() -> Self {
        let mut nco = Nco::new();
        nco.set_frequency(MARK_FREQ_HZ, SAMPLE_RATE_HZ);
        Self {
            nco,
            bit: true,
            amplitude: DEFAULT_TX_AMPLITUDE,
        }
    }

    /// Select the bit being transmitted
    pub fn set_bit(&mut self, bit: bool) {
        if bit != self.bit {
            self.bit = bit;
            let freq = if bit { MARK_FREQ_HZ } else { SPACE_FREQ_HZ };
            self.nco.set_frequency(freq, SAMPLE_RATE_HZ);
        }
    }

    /// Set the tone amplitude (linear, clamped to [0, 1])
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = amplitude.clamp(0.0, 1.0);
    }

    /// Generate the next tone sample for the current bit
    pub fn next(&mut self) -> Sample {
        self.nco.next_sample(self.amplitude)
    }

    /// Bit currently on the line
    #[must_use]
    pub const fn bit(&self) -> bool {
        self.bit
    }
}

impl Default for FskModulator {
    fn default() -> Self {
        Self::new()
    }
}
