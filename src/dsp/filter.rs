//! Fixed-Point IIR Filter
//!
//! Second-order recursive filter in Direct Form II Transposed, evaluated
//! once per sample in integer arithmetic. Q15 samples in and out, Q2.14
//! coefficients, wide accumulators carried between calls.

use fixed::types::I1F15;
#[cfg(not(feature = "std"))]
use micromath::F32Ext;

/// Fixed-point sample type (Q1.15 format)
pub type Sample = I1F15;

/// Convert f32 to fixed-point sample
#[must_use]
pub fn to_sample(value: f32) -> Sample {
    Sample::from_num(value.clamp(-1.0, 0.99997))
}

/// Convert fixed-point sample to f32
#[must_use]
pub fn from_sample(sample: Sample) -> f32 {
    sample.to_num::<f32>()
}

/// Clamp a wide Q15 value into the representable sample range
fn saturate_q15(value: i64) -> i16 {
    value.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
}

/// Biquad coefficients in Q2.14 integer format
///
/// Transfer function: `H(z) = (b0 + b1·z⁻¹ + b2·z⁻²) / (1 + a1·z⁻¹ + a2·z⁻²)`
/// with every coefficient pre-multiplied by `2^SCALE_SHIFT`. Q2.14 rather
/// than Q15 because narrow low-pass designs put `a1` close to −2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IirCoeffs {
    /// Numerator coefficient b0
    pub b0: i16,
    /// Numerator coefficient b1
    pub b1: i16,
    /// Numerator coefficient b2
    pub b2: i16,
    /// Denominator coefficient a1 (a0 is normalized to 1)
    pub a1: i16,
    /// Denominator coefficient a2
    pub a2: i16,
}

impl IirCoeffs {
    /// Right shift compensating the integer coefficient scaling
    pub const SCALE_SHIFT: u32 = 14;

    /// Post-detection low-pass for the FSK discriminator
    ///
    /// 2nd-order elliptic low-pass, 1 dB passband ripple, 30 dB stopband
    /// attenuation, 600 Hz cutoff at 48 kHz, designed offline
    /// (`[b,a] = ellip(2,1,30,600/(48000/2))`) and rounded to Q2.14.
    /// The transmission zero lands near 3.3 kHz, on top of the strongest
    /// ripple component of the lag product.
    pub const FSK_POST_LOWPASS: Self = Self {
        b0: 398,
        b1: -722,
        b2: 398,
        a1: -31680,
        a2: 15379,
    };

    /// Magnitude response at a given frequency, from the integer coefficients
    #[must_use]
    pub fn magnitude_at(&self, freq_hz: f32, sample_rate: f32) -> f32 {
        let scale = f32::from(1i16 << Self::SCALE_SHIFT);
        let (b0, b1, b2) = (
            f32::from(self.b0) / scale,
            f32::from(self.b1) / scale,
            f32::from(self.b2) / scale,
        );
        let (a1, a2) = (f32::from(self.a1) / scale, f32::from(self.a2) / scale);

        let omega = 2.0 * core::f32::consts::PI * freq_hz / sample_rate;
        let cos_omega = omega.cos();
        let cos_2omega = (2.0 * omega).cos();

        // |H(e^jw)|^2 = |B(e^jw)|^2 / |A(e^jw)|^2
        let num = b0 * b0
            + b1 * b1
            + b2 * b2
            + 2.0 * (b0 * b1 + b1 * b2) * cos_omega
            + 2.0 * b0 * b2 * cos_2omega;

        let den = 1.0
            + a1 * a1
            + a2 * a2
            + 2.0 * (a1 + a1 * a2) * cos_omega
            + 2.0 * a2 * cos_2omega;

        if den > 0.0 {
            (num / den).sqrt()
        } else {
            0.0
        }
    }

    /// Magnitude response in dB at a given frequency
    #[must_use]
    pub fn magnitude_db_at(&self, freq_hz: f32, sample_rate: f32) -> f32 {
        let mag = self.magnitude_at(freq_hz, sample_rate);
        if mag > 0.0 {
            20.0 * mag.log10()
        } else {
            -120.0
        }
    }
}

/// Biquad filter state (Direct Form II Transposed)
///
/// The two delay states are kept in the wide product format across calls
/// so the recursion loses no precision to the Q15 output rounding. There
/// is no overflow guard inside the recursion: the caller keeps the input
/// inside the filter's safe range, and out-of-range input produces
/// numeric drift rather than a runtime error. The returned sample is
/// saturated at the component boundary only.
#[derive(Clone, Copy, Debug, Default)]
pub struct IirFilter {
    coeffs: IirCoeffs,
    /// DF2T state w1, in Q(15 + SCALE_SHIFT)
    w1: i64,
    /// DF2T state w2, in Q(15 + SCALE_SHIFT)
    w2: i64,
}

impl Default for IirCoeffs {
    fn default() -> Self {
        Self::FSK_POST_LOWPASS
    }
}

impl IirFilter {
    /// Create a new filter with the given coefficients
    #[must_use]
    pub const fn new(coeffs: IirCoeffs) -> Self {
        Self {
            coeffs,
            w1: 0,
            w2: 0,
        }
    }

    /// Process a single sample
    pub fn process(&mut self, input: Sample) -> Sample {
        let x = i64::from(input.to_bits());

        let acc = i64::from(self.coeffs.b0) * x + self.w1;
        let y = acc >> IirCoeffs::SCALE_SHIFT;

        self.w1 = i64::from(self.coeffs.b1) * x - i64::from(self.coeffs.a1) * y + self.w2;
        self.w2 = i64::from(self.coeffs.b2) * x - i64::from(self.coeffs.a2) * y;

        Sample::from_bits(saturate_q15(y))
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.w1 = 0;
        self.w2 = 0;
    }

    /// Get the coefficients in use
    #[must_use]
    pub const fn coeffs(&self) -> IirCoeffs {
        self.coeffs
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for IirCoeffs {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "b=[{},{},{}] a=[{},{}] >>{}",
            self.b0,
            self.b1,
            self.b2,
            self.a1,
            self.a2,
            IirCoeffs::SCALE_SHIFT
        );
    }
}
