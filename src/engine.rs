//! Decoding engine capability interface
//!
//! The scanner does not decode anything itself. It drives an [`Engine`]
//! through a narrow interface: create a context (via an [`EngineFactory`]),
//! configure it, feed it images, and drop it to release it.

use crate::config::Config;
use crate::image::Image;
use crate::Result;

/// A live decoding context.
pub trait Engine {
    /// Apply one configuration value. Called right after creation.
    fn set_config(&mut self, config: Config, value: u32) -> Result<()>;

    /// Scan `image`, attaching every decoded symbol to it in the engine's
    /// iteration order. Returns the number of symbols found.
    fn scan_image(&mut self, image: &mut Image<'_>) -> Result<usize>;
}

/// Creates engine contexts for a session.
pub trait EngineFactory {
    type Engine: Engine;

    fn create(&mut self) -> Result<Self::Engine>;
}

impl<E, F> EngineFactory for F
where
    E: Engine,
    F: FnMut() -> Result<E>,
{
    type Engine = E;

    fn create(&mut self) -> Result<E> {
        self()
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn set_config(&mut self, config: Config, value: u32) -> Result<()> {
        (**self).set_config(config, value)
    }

    fn scan_image(&mut self, image: &mut Image<'_>) -> Result<usize> {
        (**self).scan_image(image)
    }
}
