//! Lazily initialized decoding session
//!
//! The session owns at most one engine context. It is created and configured
//! on the first scan, reused for every scan after that, and dropped on
//! [`ScanSession::teardown`]. A scan after teardown starts over with a new
//! context and the same configuration.

use crate::config::ScannerConfig;
use crate::engine::{Engine, EngineFactory};
use crate::image::Image;
use crate::luma::GrayFrame;
use crate::symbol::DecodedSymbol;
use crate::Result;
use tracing::{debug, trace};

/// Symbols produced by one scan.
///
/// A finite, one-shot sequence: it yields each symbol once, in the engine's
/// order, and cannot be restarted.
#[derive(Debug)]
pub struct ScanResults {
    count: usize,
    symbols: std::vec::IntoIter<DecodedSymbol>,
}

impl ScanResults {
    fn new(count: usize, symbols: Vec<DecodedSymbol>) -> Self {
        Self {
            count,
            symbols: symbols.into_iter(),
        }
    }

    /// Symbol count as reported by the engine, independent of how many
    /// symbols have been consumed.
    pub fn reported_count(&self) -> usize {
        self.count
    }
}

impl Iterator for ScanResults {
    type Item = DecodedSymbol;

    fn next(&mut self) -> Option<Self::Item> {
        self.symbols.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.symbols.size_hint()
    }
}

impl ExactSizeIterator for ScanResults {}

/// Engine context plus the configuration it was built with
pub struct ScanSession<F: EngineFactory> {
    factory: F,
    config: ScannerConfig,
    engine: Option<F::Engine>,
}

impl<F: EngineFactory> ScanSession<F> {
    /// Create a session with full-density configuration. No engine context
    /// is created until the first scan.
    pub fn new(factory: F) -> Self {
        Self::with_config(factory, ScannerConfig::default())
    }

    pub fn with_config(factory: F, config: ScannerConfig) -> Self {
        Self {
            factory,
            config,
            engine: None,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Whether an engine context is currently live
    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    /// Create and configure the engine context if there is none.
    pub fn ensure_ready(&mut self) -> Result<&mut F::Engine> {
        let engine = match self.engine.take() {
            Some(engine) => engine,
            None => {
                let mut engine = self.factory.create()?;
                for (setting, value) in self.config.settings() {
                    engine.set_config(setting, value)?;
                }
                debug!(
                    x_density = self.config.x_density,
                    y_density = self.config.y_density,
                    "decoding session initialized"
                );
                engine
            }
        };
        Ok(self.engine.insert(engine))
    }

    /// Scan one gray frame.
    ///
    /// The frame is only borrowed for the duration of the call. The
    /// returned results own the decoded symbols.
    pub fn scan(&mut self, frame: GrayFrame<'_>) -> Result<ScanResults> {
        let engine = self.ensure_ready()?;

        let mut image = Image::from_gray(frame);
        let count = engine.scan_image(&mut image)?;
        let symbols = image.take_symbols();
        trace!(
            width = image.width(),
            height = image.height(),
            count,
            "frame scanned"
        );
        drop(image);

        Ok(ScanResults::new(count, symbols))
    }

    /// Drop the engine context. Safe to call when there is none.
    pub fn teardown(&mut self) {
        if self.engine.take().is_some() {
            debug!("decoding session torn down");
        }
    }
}
