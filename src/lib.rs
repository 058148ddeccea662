//! Software FSK Modem Core Library
//!
//! This library provides the per-sample signal-processing and
//! protocol-decoding core of a software-defined FSK modem. An audio
//! codec samples a binary FSK signal at 48 kHz; this crate turns each
//! incoming sample into a demodulated bit and reassembles those bits
//! into asynchronous-serial (8N1) bytes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    MODEM LAYER                               │
//! │  Receiver (demod → decode)  │  Transmitter (frame → tone)    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      DSP LAYER                               │
//! │  Fixed-point IIR  │  FSK Discriminator  │  NCO               │
//! ├─────────────────────────────────────────────────────────────┤
//! │              CODEC DRIVER / ISR (external)                   │
//! │  one Q15 sample in, one Q15 sample out, per sample period    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The codec driver, its interrupt handler and the circular-buffer
//! transport are deliberately outside this crate: the core is invoked
//! once per sample with the sample value as an argument and never pulls
//! data itself.
//!
//! # Design Principles
//!
//! - **Interrupt-context discipline**: every call is a bounded, O(1),
//!   non-blocking, non-allocating computation that completes well inside
//!   one sample period
//! - **Caller-owned state**: each pipeline stage is an explicit state
//!   object taken by `&mut self`; one instance per channel, no globals
//! - **Fixed-point throughout**: Q15 samples, Q2.14 coefficients, wide
//!   integer accumulators; no floating point on the sample path
//! - **No unsafe**: all arithmetic is expressed in safe integer Rust
//! - **Silent noise recovery**: invalid start/stop bits drop the frame
//!   and re-arm the edge detector instead of surfacing errors

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Digital Signal Processing
///
/// Fixed-point IIR filter, FSK discriminator, oscillators.
pub mod dsp;

/// UART Bit Sampler / Frame Assembler
///
/// 8N1 decoding from a sample-rate bit stream, plus the matching
/// bit-stream encoder.
pub mod uart;

/// Modem Channel Chains
///
/// Per-channel receive and transmit pipelines built from the DSP and
/// UART stages.
pub mod modem;

/// System configuration and calibration constants
pub mod config;
