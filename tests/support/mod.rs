//! Synthetic QR frames for integration tests

#![allow(dead_code)]

use qrcode::{Color, QrCode};

/// Pixels per QR module
pub const MODULE: usize = 6;
/// Quiet zone in modules
pub const QUIET: usize = 4;

/// Row-major gray frame
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![255; width * height],
        }
    }

    /// Render `payload` as a QR code with its quiet zone starting at
    /// (`left`, `top`).
    pub fn draw_qr(&mut self, payload: &str, left: usize, top: usize) {
        let code = QrCode::new(payload.as_bytes()).expect("payload fits in a QR code");
        let modules = code.width();
        let side = qr_side(payload);
        assert!(left + side <= self.width && top + side <= self.height);

        for (i, color) in code.to_colors().iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let mx = i % modules + QUIET;
            let my = i / modules + QUIET;
            for y in 0..MODULE {
                let row = top + my * MODULE + y;
                let start = row * self.width + left + mx * MODULE;
                self.pixels[start..start + MODULE].fill(0);
            }
        }
    }

    /// One QR code filling the frame.
    pub fn single(payload: &str) -> Self {
        let side = qr_side(payload);
        let mut frame = Self::blank(side, side);
        frame.draw_qr(payload, 0, 0);
        frame
    }

    /// Two QR codes side by side.
    pub fn pair(left: &str, right: &str) -> Self {
        let a = qr_side(left);
        let b = qr_side(right);
        let mut frame = Self::blank(a + b, a.max(b));
        frame.draw_qr(left, 0, 0);
        frame.draw_qr(right, a, 0);
        frame
    }

    /// Expand to opaque RGBA with r = g = b = gray.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&v| [v, v, v, 255]).collect()
    }

    pub fn dims(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }
}

/// Side length in pixels of the rendered code, quiet zone included.
pub fn qr_side(payload: &str) -> usize {
    let code = QrCode::new(payload.as_bytes()).expect("payload fits in a QR code");
    (code.width() + 2 * QUIET) * MODULE
}
