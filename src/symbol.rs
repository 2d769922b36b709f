//! Decoded symbols
//!
//! A [`DecodedSymbol`] only lives for the tick that produced it: the engine
//! attaches it to the transient [`Image`](crate::Image), the session moves
//! it into the scan results, and the emitter drops it once the host has been
//! notified.

use std::ffi::CStr;
use std::fmt::Display;

/// Symbologies an engine may report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum SymbolType {
    #[default]
    None = 0,
    Partial = 1,
    Ean2 = 2,
    Ean5 = 5,
    Ean8 = 8,
    Upce = 9,
    Isbn10 = 10,
    Upca = 12,
    Ean13 = 13,
    Isbn13 = 14,
    Composite = 15,
    I25 = 25,
    Databar = 34,
    DatabarExp = 35,
    Codabar = 38,
    Code39 = 39,
    QrCode = 64,
    SqCode = 80,
    Code93 = 93,
    Code128 = 128,
}

impl SymbolType {
    /// Wire name of the symbology, e.g. `"QR-Code"`.
    pub fn name(self) -> &'static str {
        let name = self.c_name().to_bytes();
        // Every name below is ASCII.
        std::str::from_utf8(name).unwrap_or("None")
    }

    /// Wire name as a NUL terminated string for C hosts.
    pub fn c_name(self) -> &'static CStr {
        match self {
            Self::None => c"None",
            Self::Partial => c"Partial",
            Self::Ean2 => c"EAN-2",
            Self::Ean5 => c"EAN-5",
            Self::Ean8 => c"EAN-8",
            Self::Upce => c"UPC-E",
            Self::Isbn10 => c"ISBN-10",
            Self::Upca => c"UPC-A",
            Self::Ean13 => c"EAN-13",
            Self::Isbn13 => c"ISBN-13",
            Self::Composite => c"COMPOSITE",
            Self::I25 => c"I2/5",
            Self::Databar => c"DataBar",
            Self::DatabarExp => c"DataBar-Exp",
            Self::Codabar => c"Codabar",
            Self::Code39 => c"CODE-39",
            Self::Code93 => c"CODE-93",
            Self::Code128 => c"CODE-128",
            Self::QrCode => c"QR-Code",
            Self::SqCode => c"SQ-Code",
        }
    }
}

impl Display for SymbolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One symbol reported by the engine for the current frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedSymbol {
    symbol_type: SymbolType,
    data: Vec<u8>,
    pts: Vec<[i32; 2]>,
}

impl DecodedSymbol {
    pub fn new(symbol_type: SymbolType, data: impl Into<Vec<u8>>) -> Self {
        Self {
            symbol_type,
            data: data.into(),
            pts: Vec::new(),
        }
    }

    /// Append a polygon vertex in image pixel coordinates.
    pub fn add_point(&mut self, x: i32, y: i32) {
        self.pts.push([x, y]);
    }

    /// Builder form of [`add_point`](Self::add_point).
    pub fn with_point(mut self, x: i32, y: i32) -> Self {
        self.add_point(x, y);
        self
    }

    /// Get the symbol type
    pub fn symbol_type(&self) -> SymbolType {
        self.symbol_type
    }

    /// Get the decoded data as bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the decoded data as a string (if valid UTF-8)
    pub fn data_string(&self) -> Option<&str> {
        std::str::from_utf8(self.data()).ok()
    }

    /// Number of polygon vertices
    pub fn loc_size(&self) -> usize {
        self.pts.len()
    }

    /// X coordinate of vertex `index`, or -1 when out of range
    pub fn loc_x(&self, index: usize) -> i32 {
        self.pts.get(index).map_or(-1, |p| p[0])
    }

    /// Y coordinate of vertex `index`, or -1 when out of range
    pub fn loc_y(&self, index: usize) -> i32 {
        self.pts.get(index).map_or(-1, |p| p[1])
    }

    /// Polygon vertices in engine order
    pub fn points(&self) -> &[[i32; 2]] {
        &self.pts
    }
}
