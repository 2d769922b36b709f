//! Transient image wrapper handed to the engine
//!
//! An [`Image`] tags a borrowed gray frame with its pixel format and
//! dimensions and collects the symbols the engine finds in it. It never owns
//! the pixels: the borrow ends when the image is dropped at the end of the
//! scan, and the frame memory stays with whoever lent it.

use crate::luma::GrayFrame;
use crate::symbol::DecodedSymbol;

/// Image formats the engine accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// 8-bit grayscale
    Y800,
    /// Same as Y800
    Gray,
}

impl ImageFormat {
    pub fn to_fourcc(self) -> u32 {
        match self {
            ImageFormat::Y800 | ImageFormat::Gray => fourcc(b'Y', b'8', b'0', b'0'),
        }
    }
}

/// Create a fourcc code from 4 bytes
pub const fn fourcc(a: u8, b: u8, c: u8, d: u8) -> u32 {
    (a as u32) | ((b as u32) << 8) | ((c as u32) << 16) | ((d as u32) << 24)
}

/// A gray frame being scanned
#[derive(Debug)]
pub struct Image<'a> {
    format: u32,
    frame: GrayFrame<'a>,
    syms: Vec<DecodedSymbol>,
}

impl<'a> Image<'a> {
    /// Wrap a gray frame as a Y800 image
    pub fn from_gray(frame: GrayFrame<'a>) -> Self {
        Self {
            format: ImageFormat::Y800.to_fourcc(),
            frame,
            syms: Vec::new(),
        }
    }

    /// Get the image width
    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    /// Get the image height
    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Get the image format as a fourcc
    pub fn format(&self) -> u32 {
        self.format
    }

    /// Get access to the raw image data
    pub fn data(&self) -> &'a [u8] {
        self.frame.data()
    }

    /// Attach a symbol found in this image. Called by engines.
    pub fn add_symbol(&mut self, symbol: DecodedSymbol) {
        self.syms.push(symbol);
    }

    /// Symbols attached so far, in engine order
    pub fn symbols(&self) -> &[DecodedSymbol] {
        &self.syms
    }

    /// Detach the symbols, leaving the image empty.
    pub(crate) fn take_symbols(&mut self) -> Vec<DecodedSymbol> {
        std::mem::take(&mut self.syms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SymbolType;

    #[test]
    fn test_y800_fourcc() {
        assert_eq!(ImageFormat::Y800.to_fourcc(), 0x3030_3859);
        assert_eq!(ImageFormat::Gray.to_fourcc(), ImageFormat::Y800.to_fourcc());
    }

    #[test]
    fn test_image_borrows_frame() {
        let pixels = [7u8; 12];
        let mut image = Image::from_gray(GrayFrame::new(&pixels, 4, 3).unwrap());
        assert_eq!((image.width(), image.height()), (4, 3));
        assert_eq!(image.data().as_ptr(), pixels.as_ptr());
        assert_eq!(image.format(), fourcc(b'Y', b'8', b'0', b'0'));

        image.add_symbol(DecodedSymbol::new(SymbolType::Ean8, "12345670"));
        assert_eq!(image.symbols().len(), 1);
        assert_eq!(image.take_symbols().len(), 1);
        assert!(image.symbols().is_empty());
    }
}
