//! Reusable frame staging buffer
//!
//! A capture loop hands the scanner a new frame on every tick. Rather than
//! allocating per tick, the pool keeps a single region that only ever grows:
//! a request that fits the current capacity gets the same memory back, with
//! whatever the previous frame left in it.

use crate::{Error, Result};
use tracing::debug;

/// Bytes per pixel of the widest input format the pool must hold (RGBA).
pub const BYTES_PER_PIXEL: usize = 4;

/// Owner of the single growable scan buffer.
#[derive(Debug, Default)]
pub struct BufferPool {
    data: Vec<u8>,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes `acquire` must provide for a `width` x `height` RGBA frame.
    pub fn required_size(width: u32, height: u32) -> Result<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
            .ok_or(Error::Invalid)
    }

    /// Get a region large enough for a `width` x `height` RGBA frame.
    ///
    /// The returned slice covers exactly the requested size. When the
    /// current capacity already suffices, the existing region is returned
    /// without reallocation or clearing. Otherwise the old region is freed
    /// and a new one of exactly the requested size is allocated. On
    /// allocation failure the pool is left empty.
    pub fn acquire(&mut self, width: u32, height: u32) -> Result<&mut [u8]> {
        let needed = Self::required_size(width, height)?;
        if needed > self.data.len() {
            self.grow(needed)?;
        }
        Ok(&mut self.data[..needed])
    }

    fn grow(&mut self, needed: usize) -> Result<()> {
        let previous = self.data.len();
        self.data = Vec::new();

        if self.data.try_reserve_exact(needed).is_err() {
            debug!(needed, "scan buffer allocation failed");
            return Err(Error::OutOfMemory);
        }
        // Within the reservation, so this never reallocates.
        self.data.resize(needed, 0);

        debug!(previous, capacity = needed, "scan buffer grown");
        Ok(())
    }

    /// Free the region and reset the capacity to zero. Safe to call when empty.
    pub fn release(&mut self) {
        if !self.data.is_empty() {
            debug!(capacity = self.data.len(), "scan buffer released");
        }
        self.data = Vec::new();
    }

    /// Tracked capacity in bytes (zero when no region is held).
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whole region, or `None` when nothing has been acquired.
    pub fn region(&self) -> Option<&[u8]> {
        (!self.data.is_empty()).then_some(self.data.as_slice())
    }

    /// Whole region, or `None` when nothing has been acquired.
    pub fn region_mut(&mut self) -> Option<&mut [u8]> {
        (!self.data.is_empty()).then_some(self.data.as_mut_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_acquire_sizes_for_rgba() {
        let mut pool = BufferPool::new();
        let region = pool.acquire(10, 5).unwrap();
        assert_eq!(region.len(), 200);
        assert_eq!(pool.capacity(), 200);
    }

    #[test]
    fn test_smaller_request_reuses_region() {
        let mut pool = BufferPool::new();
        let first = pool.acquire(64, 64).unwrap().as_ptr();
        pool.acquire(64, 64).unwrap()[0] = 0xAB;

        let region = pool.acquire(8, 8).unwrap();
        assert_eq!(region.as_ptr(), first);
        assert_eq!(region.len(), 8 * 8 * 4);
        // Stale contents are not cleared.
        assert_eq!(region[0], 0xAB);
        assert_eq!(pool.capacity(), 64 * 64 * 4);
    }

    #[test]
    fn test_larger_request_grows_exactly() {
        let mut pool = BufferPool::new();
        pool.acquire(4, 4).unwrap();
        pool.acquire(16, 2).unwrap();
        assert_eq!(pool.capacity(), 16 * 2 * 4);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut pool = BufferPool::new();
        pool.release();
        assert_eq!(pool.capacity(), 0);

        pool.acquire(3, 3).unwrap();
        pool.release();
        pool.release();
        assert_eq!(pool.capacity(), 0);
        assert!(pool.region().is_none());
    }

    #[test]
    fn test_acquire_after_release_allocates_again() {
        let mut pool = BufferPool::new();
        pool.acquire(2, 2).unwrap();
        pool.release();
        assert_eq!(pool.acquire(2, 2).unwrap().len(), 16);
        assert_eq!(pool.capacity(), 16);
    }

    #[test]
    fn test_zero_sized_request_keeps_pool_empty() {
        let mut pool = BufferPool::new();
        assert!(pool.acquire(0, 100).unwrap().is_empty());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_overflowing_dimensions_are_invalid() {
        let mut pool = BufferPool::new();
        assert_eq!(pool.acquire(u32::MAX, u32::MAX).unwrap_err(), Error::Invalid);
        assert!(pool.is_empty());
    }

    // Fits in usize but exceeds what any allocation may request.
    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_failed_growth_leaves_pool_empty() {
        let mut pool = BufferPool::new();
        pool.acquire(16, 16).unwrap();
        assert_eq!(pool.capacity(), 1024);

        assert_eq!(
            pool.acquire(u32::MAX, 1 << 30).unwrap_err(),
            Error::OutOfMemory
        );
        assert_eq!(pool.capacity(), 0);
        assert!(pool.region().is_none());

        assert_eq!(pool.acquire(2, 2).unwrap().len(), 16);
    }

    proptest! {
        #[test]
        fn capacity_tracks_running_maximum(
            sizes in proptest::collection::vec((0u32..48, 0u32..48), 1..24)
        ) {
            let mut pool = BufferPool::new();
            let mut max = 0usize;
            let mut last_ptr: Option<*const u8> = None;

            for (w, h) in sizes {
                let needed = (w * h) as usize * BYTES_PER_PIXEL;
                let grows = needed > max;
                let ptr = pool.acquire(w, h).unwrap().as_ptr();
                max = max.max(needed);

                prop_assert_eq!(pool.capacity(), max);
                if !grows && max > 0 {
                    prop_assert_eq!(Some(ptr), last_ptr);
                }
                if max > 0 {
                    last_ptr = Some(ptr);
                }
            }
        }
    }
}
