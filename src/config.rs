//! Scanner configuration
//!
//! The session applies this configuration to a freshly created engine
//! context exactly once, before the first frame is fed to it.
//!
//! ```
//! use zedscan::ScannerConfig;
//!
//! // Full density: every row and every column is scanned.
//! let config = ScannerConfig::new();
//! assert_eq!((config.x_density, config.y_density), (1, 1));
//!
//! // Faster, less sensitive: every 2nd column and every 3rd row.
//! let config = ScannerConfig::new().scan_density(2, 3);
//! assert_eq!(config.settings(), [(zedscan::Config::XDensity, 2), (zedscan::Config::YDensity, 3)]);
//! ```

/// Engine settings a session knows how to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Config {
    /// Scan every n-th column
    XDensity,
    /// Scan every n-th row
    YDensity,
}

/// Configuration applied to the decoding engine at session start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Horizontal scan density
    pub x_density: u32,

    /// Vertical scan density
    pub y_density: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ScannerConfig {
    /// Full density on both axes, trading speed for detection sensitivity.
    pub fn new() -> Self {
        Self {
            x_density: 1,
            y_density: 1,
        }
    }

    /// Set scan density (1 = scan every line, 2 = every other line, etc.)
    ///
    /// # Panics
    /// Panics if either density is 0.
    pub fn scan_density(mut self, x: u32, y: u32) -> Self {
        assert!(x > 0, "x density must be > 0");
        assert!(y > 0, "y density must be > 0");
        self.x_density = x;
        self.y_density = y;
        self
    }

    /// Set horizontal scan density
    pub fn x_density(mut self, density: u32) -> Self {
        assert!(density > 0, "density must be > 0");
        self.x_density = density;
        self
    }

    /// Set vertical scan density
    pub fn y_density(mut self, density: u32) -> Self {
        assert!(density > 0, "density must be > 0");
        self.y_density = density;
        self
    }

    /// Settings in the order the session applies them.
    pub fn settings(&self) -> [(Config, u32); 2] {
        [
            (Config::XDensity, self.x_density),
            (Config::YDensity, self.y_density),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_full_density() {
        let config = ScannerConfig::default();
        assert_eq!(
            config.settings(),
            [(Config::XDensity, 1), (Config::YDensity, 1)]
        );
    }

    #[test]
    fn test_single_axis_builders() {
        let config = ScannerConfig::new().x_density(4).y_density(2);
        assert_eq!((config.x_density, config.y_density), (4, 2));
    }

    #[test]
    #[should_panic(expected = "y density must be > 0")]
    fn test_zero_density_rejected() {
        let _ = ScannerConfig::new().scan_density(1, 0);
    }
}
