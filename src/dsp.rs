//! Digital Signal Processing
//!
//! Provides the DSP stages of the modem core:
//! - Fixed-point IIR filtering (Q15 samples, Q2.14 coefficients)
//! - FSK discrimination by delayed autocorrelation
//! - NCO for tone synthesis and test stimuli

pub mod filter;
pub mod fsk;
pub mod oscillator;
