//! RGBA to Y800 conversion
//!
//! Color frames are converted to 8-bit luma in the same memory they arrived
//! in. [`RgbaFrame::into_gray`] consumes the color view and hands back a
//! [`GrayFrame`] that only covers the converted prefix, so the stale color
//! bytes behind it cannot be read by later stages.

use crate::{Error, Result};

/// Channels per RGBA pixel
const RGBA_CHANNELS: usize = 4;

/// BT.601 luma in 8-bit fixed point (studio swing, 16..=235).
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 66 + g as u32 * 129 + b as u32 * 25 + 4096) >> 8) as u8
}

/// Convert the first `pixel_count` RGBA pixels of `buffer` to luma in place.
///
/// Output byte `j` is computed from input pixel `j`. Only the first
/// `pixel_count` bytes hold gray values afterwards; everything behind them
/// is left over from the color input. Returns the gray prefix.
pub fn to_luma(buffer: &mut [u8], pixel_count: usize) -> Result<&[u8]> {
    let needed = pixel_count
        .checked_mul(RGBA_CHANNELS)
        .ok_or(Error::Invalid)?;
    if buffer.len() < needed {
        return Err(Error::Invalid);
    }

    convert_in_place(buffer, pixel_count);
    Ok(&buffer[..pixel_count])
}

fn convert_in_place(buffer: &mut [u8], pixel_count: usize) {
    // Writes to index j never overtake the reads at 4j.
    for j in 0..pixel_count {
        let i = j * RGBA_CHANNELS;
        buffer[j] = luma(buffer[i], buffer[i + 1], buffer[i + 2]);
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::Invalid)
}

/// Interleaved RGBA frame borrowed mutably for in-place conversion.
#[derive(Debug)]
pub struct RgbaFrame<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> RgbaFrame<'a> {
    /// Wrap `data` as a `width` x `height` RGBA frame.
    ///
    /// `data` may be longer than the frame (a pooled buffer sized for an
    /// earlier, larger frame); it must not be shorter.
    pub fn new(data: &'a mut [u8], width: u32, height: u32) -> Result<Self> {
        let needed = pixel_count(width, height)?
            .checked_mul(RGBA_CHANNELS)
            .ok_or(Error::Invalid)?;
        if data.len() < needed {
            return Err(Error::Invalid);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Convert to luma in place, giving up the color view.
    pub fn into_gray(self) -> GrayFrame<'a> {
        let pixels = self.width as usize * self.height as usize;
        convert_in_place(self.data, pixels);
        let data: &'a [u8] = self.data;
        GrayFrame {
            data: &data[..pixels],
            width: self.width,
            height: self.height,
        }
    }
}

/// Single-channel 8-bit frame, row-major, exactly `width * height` bytes.
#[derive(Debug, Clone, Copy)]
pub struct GrayFrame<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> GrayFrame<'a> {
    /// Wrap the first `width * height` bytes of `data` as a gray frame.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        let pixels = pixel_count(width, height)?;
        if data.len() < pixels {
            return Err(Error::Invalid);
        }
        Ok(Self {
            data: &data[..pixels],
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}
