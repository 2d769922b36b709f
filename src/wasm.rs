//! WebAssembly bindings for the scanner bridge.
//!
//! JavaScript drives a [`BarcodeScanner`] once per capture tick: it asks for
//! the staging buffer, copies the canvas pixels into linear memory at the
//! returned offset, and calls `scan_image_rgba`. Every decoded symbol is
//! forwarded to `Module.processResult(symbol, data, polygon)`. A missing or
//! throwing `processResult` is logged and the scan carries on.

use std::fmt::Debug;

use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::backend::RqrrBackend;
use crate::emitter::{Emitted, ResultEmitter};
use crate::luma::GrayFrame;
use crate::scanner::DefaultScanner;
use crate::session::ScanSession;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Module, js_name = processResult)]
    fn process_result(symbol: &str, data: &str, polygon: &[i32]) -> Result<(), JsValue>;
}

/// Hand one symbol to `report`, logging instead of propagating its failure.
fn forward_with<E, R>(symbol: &Emitted<'_>, report: R)
where
    E: Debug,
    R: FnOnce(&str, &str, &[i32]) -> Result<(), E>,
{
    let data = String::from_utf8_lossy(symbol.payload());
    if let Err(err) = report(symbol.kind_name(), &data, symbol.polygon()) {
        warn!(?err, symbol = symbol.kind_name(), "processResult failed");
    }
}

fn forward(symbol: &Emitted<'_>) {
    forward_with(symbol, process_result);
}

/// Long-lived scanner owned by the JavaScript host.
#[wasm_bindgen]
pub struct BarcodeScanner {
    inner: DefaultScanner,
}

#[wasm_bindgen]
impl BarcodeScanner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> BarcodeScanner {
        BarcodeScanner {
            inner: DefaultScanner::default(),
        }
    }

    /// Offset of a staging region for a `width` x `height` RGBA frame in
    /// linear memory, or 0 if it could not be allocated.
    pub fn create_buffer(&mut self, width: u32, height: u32) -> *mut u8 {
        match self.inner.create_buffer(width, height) {
            Ok(region) => region.as_mut_ptr(),
            Err(_) => std::ptr::null_mut(),
        }
    }

    /// Free the staging region.
    pub fn destroy_buffer(&mut self) {
        self.inner.destroy_buffer();
    }

    /// Scan the staging region as an already gray frame.
    pub fn scan_image(&mut self, width: u32, height: u32) -> u32 {
        self.inner.scan_buffer(width, height, &mut forward) as u32
    }

    /// Convert the staging region from RGBA to gray in place and scan it.
    pub fn scan_image_rgba(&mut self, width: u32, height: u32) -> u32 {
        self.inner.scan_buffer_rgba(width, height, &mut forward) as u32
    }

    /// Drop the decoding context; the next scan re-creates it.
    pub fn destroy_scanner(&mut self) {
        self.inner.destroy_scanner();
    }
}

impl Default for BarcodeScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// A decoded barcode/QR code result.
#[wasm_bindgen]
pub struct DecodeResult {
    symbol_type: String,
    data: Vec<u8>,
    polygon: Vec<i32>,
}

#[wasm_bindgen]
impl DecodeResult {
    /// The barcode format name (e.g. "QR-Code", "EAN-13").
    #[wasm_bindgen(getter)]
    pub fn symbol_type(&self) -> String {
        self.symbol_type.clone()
    }

    /// Raw decoded bytes.
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Decoded data as UTF-8 text, or null if not valid UTF-8.
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> Option<String> {
        std::str::from_utf8(&self.data).ok().map(|s| s.to_string())
    }

    /// Flat `[x0, y0, x1, y1, ...]` outline in image pixels.
    #[wasm_bindgen(getter)]
    pub fn polygon(&self) -> Vec<i32> {
        self.polygon.clone()
    }
}

fn decode_gray(data: &[u8], width: u32, height: u32) -> crate::Result<Vec<DecodeResult>> {
    let mut session = ScanSession::new(RqrrBackend);
    let found = session.scan(GrayFrame::new(data, width, height)?)?;

    let mut results = Vec::with_capacity(found.len());
    ResultEmitter::new().emit(found, &mut |symbol: &Emitted<'_>| {
        results.push(DecodeResult {
            symbol_type: symbol.kind_name().to_string(),
            data: symbol.payload().to_vec(),
            polygon: symbol.polygon().to_vec(),
        })
    });
    Ok(results)
}

/// Scan grayscale image data for barcodes and QR codes.
///
/// `data` must be an array of 8-bit grayscale pixel values,
/// row-major, with dimensions `width` x `height`.
///
/// This is a one-shot convenience: every call builds and drops its own
/// decoding context. Capture loops should keep a [`BarcodeScanner`] instead.
///
/// Returns an array of `DecodeResult` objects.
#[wasm_bindgen]
pub fn scan_grayscale(data: &[u8], width: u32, height: u32) -> Result<Vec<DecodeResult>, JsValue> {
    decode_gray(data, width, height).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodedSymbol, Error, SymbolType};

    #[test]
    fn test_failing_host_does_not_stop_emission() {
        let symbols = vec![
            DecodedSymbol::new(SymbolType::QrCode, "one").with_point(1, 2),
            DecodedSymbol::new(SymbolType::QrCode, "two").with_point(3, 4),
        ];
        let mut attempts = Vec::new();
        let delivered = ResultEmitter::new().emit(symbols, &mut |symbol: &Emitted<'_>| {
            forward_with(symbol, |kind, data, polygon| {
                attempts.push((kind.to_string(), data.to_string(), polygon.to_vec()));
                Err("Module.processResult is not a function")
            })
        });

        assert_eq!(delivered, 2);
        assert_eq!(
            attempts,
            vec![
                ("QR-Code".to_string(), "one".to_string(), vec![1, 2]),
                ("QR-Code".to_string(), "two".to_string(), vec![3, 4]),
            ]
        );
    }

    #[test]
    fn test_decode_gray_rejects_short_data() {
        assert_eq!(decode_gray(&[0u8; 3], 2, 2).err(), Some(Error::Invalid));
    }

    #[test]
    fn test_decode_gray_blank_frame() {
        assert!(decode_gray(&[255u8; 64], 8, 8).unwrap().is_empty());
    }
}
