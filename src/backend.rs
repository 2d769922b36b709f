//! QR decoding backend built on `rqrr`

use crate::config::Config;
use crate::engine::{Engine, EngineFactory};
use crate::image::Image;
use crate::symbol::{DecodedSymbol, SymbolType};
use crate::{Error, Result};
use tracing::trace;

/// Engine context decoding QR codes with `rqrr`.
///
/// Scan density is honored by sampling every n-th column and row; corner
/// points are scaled back to full-resolution image coordinates.
#[derive(Debug, Clone)]
pub struct RqrrEngine {
    x_density: u32,
    y_density: u32,
}

impl Default for RqrrEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RqrrEngine {
    pub fn new() -> Self {
        Self {
            x_density: 1,
            y_density: 1,
        }
    }
}

impl Engine for RqrrEngine {
    fn set_config(&mut self, config: Config, value: u32) -> Result<()> {
        if value == 0 {
            return Err(Error::Invalid);
        }
        match config {
            Config::XDensity => self.x_density = value,
            Config::YDensity => self.y_density = value,
        }
        Ok(())
    }

    fn scan_image(&mut self, image: &mut Image<'_>) -> Result<usize> {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let dx = self.x_density as usize;
        let dy = self.y_density as usize;

        let sampled_width = width.div_ceil(dx);
        let sampled_height = height.div_ceil(dy);
        if sampled_width == 0 || sampled_height == 0 {
            return Ok(0);
        }

        let data = image.data();
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(sampled_width, sampled_height, |x, y| {
                data[y * dy * width + x * dx]
            });

        let mut found = 0;
        for grid in prepared.detect_grids() {
            let mut payload = Vec::new();
            if let Err(err) = grid.decode_to(&mut payload) {
                trace!(?err, "skipping undecodable grid");
                continue;
            }

            let mut symbol = DecodedSymbol::new(SymbolType::QrCode, payload);
            for corner in grid.bounds {
                symbol.add_point(corner.x * dx as i32, corner.y * dy as i32);
            }
            image.add_symbol(symbol);
            found += 1;
        }
        Ok(found)
    }
}

/// Factory for [`RqrrEngine`] contexts
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrBackend;

impl EngineFactory for RqrrBackend {
    type Engine = RqrrEngine;

    fn create(&mut self) -> Result<RqrrEngine> {
        Ok(RqrrEngine::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::luma::GrayFrame;

    #[test]
    fn test_zero_density_rejected() {
        let mut engine = RqrrEngine::new();
        assert_eq!(engine.set_config(Config::XDensity, 0), Err(Error::Invalid));
        engine.set_config(Config::YDensity, 2).unwrap();
        assert_eq!((engine.x_density, engine.y_density), (1, 2));
    }

    #[test]
    fn test_blank_frame_has_no_symbols() {
        let pixels = vec![255u8; 64 * 48];
        let mut image = Image::from_gray(GrayFrame::new(&pixels, 64, 48).unwrap());
        assert_eq!(RqrrEngine::new().scan_image(&mut image), Ok(0));
        assert!(image.symbols().is_empty());
    }

    #[test]
    fn test_empty_frame() {
        let mut image = Image::from_gray(GrayFrame::new(&[], 0, 10).unwrap());
        assert_eq!(RqrrEngine::new().scan_image(&mut image), Ok(0));
    }
}
