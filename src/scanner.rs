//! Host-facing scanner context
//!
//! A [`Scanner`] bundles the three long-lived pieces of state a capture loop
//! needs: the staging buffer, the decoding session and the result emitter.
//! The host creates one, keeps it for as long as it scans, and passes it
//! (mutably) into every operation.
//!
//! # Example
//! ```
//! use zedscan::{DefaultScanner, Emitted};
//!
//! let mut scanner = DefaultScanner::default();
//!
//! // Every tick: stage the RGBA frame, then scan it in place.
//! let frame = scanner.create_buffer(320, 240).unwrap();
//! frame.fill(0xFF);
//! let found = scanner.scan_buffer_rgba(320, 240, &mut |symbol: &Emitted<'_>| {
//!     println!("{}: {:?}", symbol.kind_name(), symbol.payload());
//! });
//! assert_eq!(found, 0);
//!
//! // On shutdown
//! scanner.destroy_scanner();
//! scanner.destroy_buffer();
//! ```

use crate::buffer::BufferPool;
use crate::config::ScannerConfig;
use crate::emitter::{ResultEmitter, ResultSink};
use crate::engine::EngineFactory;
use crate::luma::{GrayFrame, RgbaFrame};
use crate::session::{ScanResults, ScanSession};
use crate::{Error, Result};
use tracing::warn;

/// Scanner context owning the buffer pool and the decoding session
pub struct Scanner<F: EngineFactory> {
    pool: BufferPool,
    session: ScanSession<F>,
    emitter: ResultEmitter,
}

/// Scanner decoding QR codes with the bundled `rqrr` backend
#[cfg(feature = "rqrr")]
pub type DefaultScanner = Scanner<crate::backend::RqrrBackend>;

#[cfg(feature = "rqrr")]
impl Default for DefaultScanner {
    fn default() -> Self {
        Self::new(crate::backend::RqrrBackend)
    }
}

impl<F: EngineFactory> Scanner<F> {
    /// Create a scanner with full-density configuration
    pub fn new(factory: F) -> Self {
        Self::with_config(factory, ScannerConfig::default())
    }

    /// Create a scanner with custom configuration
    pub fn with_config(factory: F, config: ScannerConfig) -> Self {
        Self {
            pool: BufferPool::new(),
            session: ScanSession::with_config(factory, config),
            emitter: ResultEmitter::new(),
        }
    }

    /// Get a staging region for a `width` x `height` RGBA frame.
    ///
    /// The region is reused (not cleared) while it is large enough and
    /// regrown otherwise; see [`BufferPool::acquire`].
    pub fn create_buffer(&mut self, width: u32, height: u32) -> Result<&mut [u8]> {
        self.pool.acquire(width, height)
    }

    /// Free the staging region. Safe to call repeatedly.
    pub fn destroy_buffer(&mut self) {
        self.pool.release();
    }

    /// Drop the decoding context. The next scan creates a new one.
    pub fn destroy_scanner(&mut self) {
        self.session.teardown();
    }

    /// Scan an 8-bit gray frame held by the caller.
    ///
    /// Returns the engine-reported symbol count; invalid frames and engine
    /// failures count as zero symbols.
    pub fn scan_image<S>(&mut self, data: &[u8], width: u32, height: u32, sink: &mut S) -> usize
    where
        S: ResultSink + ?Sized,
    {
        let results =
            GrayFrame::new(data, width, height).and_then(|frame| self.session.scan(frame));
        self.deliver(results, sink)
    }

    /// Convert an RGBA frame held by the caller to gray in place, then scan it.
    pub fn scan_image_rgba<S>(
        &mut self,
        data: &mut [u8],
        width: u32,
        height: u32,
        sink: &mut S,
    ) -> usize
    where
        S: ResultSink + ?Sized,
    {
        let results = RgbaFrame::new(data, width, height)
            .and_then(|frame| self.session.scan(frame.into_gray()));
        self.deliver(results, sink)
    }

    /// Scan the staging buffer, which already holds a gray frame.
    pub fn scan_buffer<S>(&mut self, width: u32, height: u32, sink: &mut S) -> usize
    where
        S: ResultSink + ?Sized,
    {
        let results = self
            .pool
            .region()
            .ok_or(Error::Invalid)
            .and_then(|region| GrayFrame::new(region, width, height))
            .and_then(|frame| self.session.scan(frame));
        self.deliver(results, sink)
    }

    /// Convert the staging buffer from RGBA to gray in place, then scan it.
    pub fn scan_buffer_rgba<S>(&mut self, width: u32, height: u32, sink: &mut S) -> usize
    where
        S: ResultSink + ?Sized,
    {
        let results = self
            .pool
            .region_mut()
            .ok_or(Error::Invalid)
            .and_then(|region| RgbaFrame::new(region, width, height))
            .and_then(|frame| self.session.scan(frame.into_gray()));
        self.deliver(results, sink)
    }

    fn deliver<S>(&mut self, results: Result<ScanResults>, sink: &mut S) -> usize
    where
        S: ResultSink + ?Sized,
    {
        match results {
            Ok(results) => {
                let count = results.reported_count();
                self.emitter.emit(results, sink);
                count
            }
            Err(err) => {
                warn!(%err, "scan produced no results");
                0
            }
        }
    }

    /// Current staging capacity in bytes
    pub fn buffer_capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Whether a decoding context is live
    pub fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    pub fn config(&self) -> &ScannerConfig {
        self.session.config()
    }
}
