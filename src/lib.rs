//! Frame buffer and decoder session bridge for real-time barcode scanning
//!
//! A capture loop produces a frame every tick. This crate takes care of
//! everything between the host's pixels and a barcode decoding engine:
//!
//! - [`BufferPool`]: one staging buffer that grows to the largest frame seen
//!   and is never shrunk, so steady-state ticks do not allocate.
//! - [`luma`]: in-place RGBA to 8-bit luma (BT.601) conversion.
//! - [`ScanSession`]: a lazily created, configured-once engine context.
//! - [`ResultEmitter`]: one host notification per decoded symbol, with the
//!   polygon flattened to `[x0, y0, x1, y1, ...]`.
//!
//! [`Scanner`] bundles the four for Rust hosts. The `ffi` module exposes the
//! same operations over the C ABI, and the `wasm` feature adds
//! `wasm-bindgen` bindings.

pub mod buffer;
pub mod config;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod image;
pub mod luma;
pub mod scanner;
pub mod session;
pub mod symbol;

#[cfg(feature = "rqrr")]
pub mod backend;
#[cfg(feature = "rqrr")]
pub mod ffi;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types
pub use buffer::BufferPool;
pub use config::{Config, ScannerConfig};
pub use emitter::{Discard, Emitted, ResultEmitter, ResultSink};
pub use engine::{Engine, EngineFactory};
pub use error::{Error, Result};
pub use crate::image::{Image, ImageFormat};
pub use luma::{GrayFrame, RgbaFrame};
pub use scanner::Scanner;
pub use session::{ScanResults, ScanSession};
pub use symbol::{DecodedSymbol, SymbolType};

#[cfg(feature = "rqrr")]
pub use backend::{RqrrBackend, RqrrEngine};
#[cfg(feature = "rqrr")]
pub use scanner::DefaultScanner;

#[cfg(feature = "wasm")]
pub use wasm::{scan_grayscale, BarcodeScanner, DecodeResult};
