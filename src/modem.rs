//! Modem Channel Chains
//!
//! Wires the DSP and UART stages into complete per-channel pipelines.
//! Each chain owns its stages exclusively; running several channels
//! means constructing several chains, never sharing one.

use crate::dsp::filter::Sample;
use crate::dsp::fsk::{FskDemodulator, FskModulator};
use crate::uart::{UartDecoder, UartEncoder};

/// Receive chain: audio sample in, decoded byte out
///
/// Runs the FSK discriminator strictly before the UART bit sampler on
/// every sample; that call order is the single ordering guarantee the
/// two stages need.
/// Call [`process`](Self::process) exactly once per sample period from
/// the codec callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct Receiver {
    demodulator: FskDemodulator,
    decoder: UartDecoder,
    /// Demodulated bit from the most recent sample
    last_bit: bool,
}

impl Receiver {
    /// Create a new receive chain
    #[must_use]
    pub const fn new() -> Self {
        Self {
            demodulator: FskDemodulator::new(),
            decoder: UartDecoder::new(),
            last_bit: false,
        }
    }

    /// Process one audio sample; returns a byte when a frame completes
    pub fn process(&mut self, sample: Sample) -> Option<u8> {
        let bit = self.demodulator.demodulate(sample);
        self.last_bit = bit;
        self.decoder.decode(bit)
    }

    /// Demodulated bit from the most recent sample
    #[must_use]
    pub const fn last_bit(&self) -> bool {
        self.last_bit
    }

    /// Access the frame decoder (state inspection)
    #[must_use]
    pub const fn decoder(&self) -> &UartDecoder {
        &self.decoder
    }

    /// Reset the whole chain: delay line, filter and frame decoder
    ///
    /// Call after carrier acquisition so the decoder does not chase the
    /// false edges of the demodulator's fill-up transient.
    pub fn reset(&mut self) {
        self.demodulator.reset();
        self.decoder.reset();
        self.last_bit = false;
    }

    /// Reset only the frame decoder, keeping the demodulator settled
    pub fn reset_decoder(&mut self) {
        self.decoder.reset();
    }
}

/// Transmit chain: byte in, audio samples out
///
/// Serializes one in-flight byte as 8N1 and keys the FSK tone generator
/// from the serialized bits. The line idles on the mark tone.
#[derive(Clone, Copy, Debug, Default)]
pub struct Transmitter {
    encoder: UartEncoder,
    modulator: FskModulator,
}

impl Transmitter {
    /// Create a new transmit chain idling on mark
    #[must_use]
    pub fn new() -> Self {
        Self {
            encoder: UartEncoder::new(),
            modulator: FskModulator::new(),
        }
    }

    /// Load one byte for transmission; `false` while a frame is in flight
    pub fn load(&mut self, byte: u8) -> bool {
        self.encoder.load(byte)
    }

    /// Generate the next audio sample
    pub fn next_sample(&mut self) -> Sample {
        let bit = self.encoder.next_bit();
        self.modulator.set_bit(bit);
        self.modulator.next()
    }

    /// Set the transmit tone amplitude (linear, clamped to [0, 1])
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.modulator.set_amplitude(amplitude);
    }

    /// Check whether the frame has been fully clocked out
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.encoder.is_idle()
    }
}
