//! Per-symbol result delivery
//!
//! The emitter drains a scan's symbols into a [`ResultSink`], one call per
//! symbol, in the order the engine reported them. Each symbol's polygon is
//! flattened to `[x0, y0, x1, y1, ...]` and its payload copied behind a NUL
//! terminator, both in scratch storage owned by the emitter. The scratch is
//! rebuilt for every symbol and keeps its capacity, so steady-state ticks do
//! not allocate here.

use crate::symbol::{DecodedSymbol, SymbolType};
use std::ffi::CStr;

/// One symbol as lent to a [`ResultSink`].
///
/// Borrowed from emitter scratch; valid only for the duration of the call.
#[derive(Debug, Clone, Copy)]
pub struct Emitted<'a> {
    kind: SymbolType,
    payload: &'a [u8],
    polygon: &'a [i32],
}

impl<'a> Emitted<'a> {
    pub fn kind(&self) -> SymbolType {
        self.kind
    }

    /// Symbology name, e.g. `"QR-Code"`
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Payload bytes exactly as decoded (without the terminator)
    pub fn payload(&self) -> &'a [u8] {
        &self.payload[..self.payload.len() - 1]
    }

    /// Payload as a C string. Truncated at the first interior NUL, as a C
    /// reader would see it.
    pub fn payload_cstr(&self) -> &'a CStr {
        CStr::from_bytes_until_nul(self.payload).unwrap_or_default()
    }

    /// Flat `[x0, y0, x1, y1, ...]` polygon, `2 * point_count()` values
    pub fn polygon(&self) -> &'a [i32] {
        self.polygon
    }

    pub fn point_count(&self) -> usize {
        self.polygon.len() / 2
    }

    /// Polygon as `(x, y)` pairs
    pub fn points(&self) -> impl Iterator<Item = (i32, i32)> + 'a {
        self.polygon.chunks_exact(2).map(|p| (p[0], p[1]))
    }
}

/// Receives decoded symbols, one call per symbol.
pub trait ResultSink {
    fn on_symbol(&mut self, symbol: &Emitted<'_>);
}

impl<F> ResultSink for F
where
    F: FnMut(&Emitted<'_>),
{
    fn on_symbol(&mut self, symbol: &Emitted<'_>) {
        self(symbol)
    }
}

/// Sink that discards everything, for callers only interested in counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl ResultSink for Discard {
    fn on_symbol(&mut self, _symbol: &Emitted<'_>) {}
}

/// Scratch-backed serializer for decoded symbols
#[derive(Debug, Default)]
pub struct ResultEmitter {
    polygon: Vec<i32>,
    payload: Vec<u8>,
}

impl ResultEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver every symbol to `sink` in order. Returns how many were delivered.
    pub fn emit<I, S>(&mut self, symbols: I, sink: &mut S) -> usize
    where
        I: IntoIterator<Item = DecodedSymbol>,
        S: ResultSink + ?Sized,
    {
        let mut delivered = 0;
        for symbol in symbols {
            self.load(&symbol);
            sink.on_symbol(&Emitted {
                kind: symbol.symbol_type(),
                payload: &self.payload,
                polygon: &self.polygon,
            });
            delivered += 1;
        }
        delivered
    }

    fn load(&mut self, symbol: &DecodedSymbol) {
        self.polygon.clear();
        for p in 0..symbol.loc_size() {
            self.polygon.push(symbol.loc_x(p));
            self.polygon.push(symbol.loc_y(p));
        }

        self.payload.clear();
        self.payload.extend_from_slice(symbol.data());
        self.payload.push(0);
    }
}
