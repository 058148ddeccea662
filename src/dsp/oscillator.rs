//! Digital Oscillators
//!
//! Phase-accumulator tone synthesis for the FSK modulator and for
//! deterministic test stimuli. Off the receive hot path.

use core::f32::consts::PI;
#[cfg(not(feature = "std"))]
use micromath::F32Ext;

use super::filter::{to_sample, Sample};

/// NCO (Numerically Controlled Oscillator) with phase accumulator
///
/// 32-bit phase accumulator for frequency precision; phase is continuous
/// across frequency changes, which keeps keyed FSK free of switching
/// clicks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Nco {
    /// Phase accumulator (32-bit for precision)
    phase: u32,
    /// Phase increment per sample
    phase_inc: u32,
}

impl Nco {
    /// Create a new NCO
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: 0,
            phase_inc: 0,
        }
    }

    /// Set frequency (integer Hz at given sample rate)
    pub fn set_frequency(&mut self, freq_hz: u32, sample_rate: u32) {
        // phase_inc = freq * 2^32 / sample_rate
        self.phase_inc = ((u64::from(freq_hz) * (1u64 << 32)) / u64::from(sample_rate)) as u32;
    }

    /// Get next phase value (0 to 2^32-1)
    pub fn next_phase(&mut self) -> u32 {
        let current = self.phase;
        self.phase = self.phase.wrapping_add(self.phase_inc);
        current
    }

    /// Get next sample as f32 in [-1.0, 1.0]
    pub fn next(&mut self) -> f32 {
        let phase = self.next_phase();
        let radians = (phase as f32 / 4_294_967_296.0) * 2.0 * PI;
        radians.sin()
    }

    /// Get next sample as Q15, scaled by a linear amplitude
    pub fn next_sample(&mut self, amplitude: f32) -> Sample {
        to_sample(self.next() * amplitude)
    }

    /// Reset phase
    pub fn reset(&mut self) {
        self.phase = 0;
    }
}
