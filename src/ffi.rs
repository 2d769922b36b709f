//! C ABI entry points
//!
//! These are the functions a host links against (or imports from a wasm
//! module built for a C-style runtime). The host never sees the scanner
//! state: the staging buffer and the decoding session are process-wide
//! singletons, torn down independently. Calls are expected to come from one
//! logical caller at a time, from any thread.
//!
//! Results are delivered through the callback registered with
//! [`set_result_callback`], once per symbol, synchronously from inside
//! `scan_image`/`scan_image_rgba`. Pointers handed to the callback are only
//! valid until it returns. Calling a scan entry point from inside the
//! callback (or while another thread is scanning) is rejected and yields 0.

use crate::backend::RqrrBackend;
use crate::buffer::BufferPool;
use crate::emitter::{Emitted, ResultEmitter, ResultSink};
use crate::luma::{GrayFrame, RgbaFrame};
use crate::session::{ScanResults, ScanSession};
use crate::{Error, Result};
use libc::{c_char, c_int, c_uint};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError, TryLockError};
use tracing::warn;

/// Host callback: symbol name, NUL terminated payload, `polysize * 2`
/// interleaved x/y coordinates, number of polygon points.
pub type ResultCallback = unsafe extern "C" fn(
    symbol_name: *const c_char,
    data: *const c_char,
    polygon: *const c_int,
    polysize: c_uint,
);

struct Bridge {
    session: ScanSession<RqrrBackend>,
    emitter: ResultEmitter,
}

static POOL: OnceLock<Mutex<BufferPool>> = OnceLock::new();
static BRIDGE: OnceLock<Mutex<Bridge>> = OnceLock::new();
static CALLBACK: Mutex<Option<ResultCallback>> = Mutex::new(None);

fn pool() -> &'static Mutex<BufferPool> {
    POOL.get_or_init(|| Mutex::new(BufferPool::new()))
}

fn bridge() -> &'static Mutex<Bridge> {
    BRIDGE.get_or_init(|| {
        Mutex::new(Bridge {
            session: ScanSession::new(RqrrBackend),
            emitter: ResultEmitter::new(),
        })
    })
}

/// Lock `slot` without waiting. A slot that is already held (by a scan
/// further up this thread's stack, or by another thread) reports `Busy`.
fn try_enter<T>(slot: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    match slot.try_lock() {
        Ok(guard) => Ok(guard),
        Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
        Err(TryLockError::WouldBlock) => Err(Error::Busy),
    }
}

fn current_callback() -> Option<ResultCallback> {
    *CALLBACK.lock().unwrap_or_else(PoisonError::into_inner)
}

struct HostCallback(Option<ResultCallback>);

impl ResultSink for HostCallback {
    fn on_symbol(&mut self, symbol: &Emitted<'_>) {
        let Some(callback) = self.0 else {
            return;
        };
        let polysize = c_uint::try_from(symbol.point_count()).unwrap_or(c_uint::MAX);
        // SAFETY: all pointers reference memory that outlives the call;
        // the host contract forbids retaining them.
        unsafe {
            callback(
                symbol.kind().c_name().as_ptr(),
                symbol.payload_cstr().as_ptr(),
                symbol.polygon().as_ptr(),
                polysize,
            );
        }
    }
}

fn dimensions(width: c_int, height: c_int) -> Result<(u32, u32)> {
    let width = u32::try_from(width).map_err(|_| Error::Invalid)?;
    let height = u32::try_from(height).map_err(|_| Error::Invalid)?;
    Ok((width, height))
}

fn frame_len(width: u32, height: u32, channels: usize) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(Error::Invalid)
}

/// Run `scan` against the session and deliver its results to the host.
fn run_scan(scan: impl FnOnce(&mut ScanSession<RqrrBackend>) -> Result<ScanResults>) -> c_int {
    let outcome = try_enter(bridge()).and_then(|mut bridge| {
        let results = scan(&mut bridge.session)?;
        let count = results.reported_count();
        let mut sink = HostCallback(current_callback());
        bridge.emitter.emit(results, &mut sink);
        Ok::<_, Error>(count)
    });

    match outcome {
        Ok(count) => c_int::try_from(count).unwrap_or(c_int::MAX),
        Err(err) => {
            warn!(%err, "scan produced no results");
            0
        }
    }
}

/// Register (or clear, with null) the host result callback.
#[no_mangle]
pub extern "C" fn set_result_callback(callback: Option<ResultCallback>) {
    *CALLBACK.lock().unwrap_or_else(PoisonError::into_inner) = callback;
}

/// Scan a pre-converted Y800 buffer. Returns the number of symbols found.
///
/// # Safety
/// `raw` must point to at least `width * height` readable bytes that are not
/// written for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn scan_image(raw: *mut u8, width: c_int, height: c_int) -> c_int {
    if raw.is_null() {
        return 0;
    }
    run_scan(|session| {
        let (width, height) = dimensions(width, height)?;
        let len = frame_len(width, height, 1)?;
        // SAFETY: caller guarantees `len` readable bytes at `raw`.
        let data = unsafe { std::slice::from_raw_parts(raw, len) };
        session.scan(GrayFrame::new(data, width, height)?)
    })
}

/// Convert an RGBA buffer to Y800 in place (BT.601 luma), then scan it.
///
/// Afterwards only the first `width * height` bytes hold gray pixels; the
/// rest of the buffer is stale color data.
///
/// # Safety
/// `rgba` must point to at least `width * height * 4` writable bytes with
/// no other live references for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn scan_image_rgba(rgba: *mut u8, width: c_int, height: c_int) -> c_int {
    if rgba.is_null() {
        return 0;
    }
    run_scan(|session| {
        let (width, height) = dimensions(width, height)?;
        let len = frame_len(width, height, 4)?;
        // SAFETY: caller guarantees `len` exclusive writable bytes at `rgba`.
        let data = unsafe { std::slice::from_raw_parts_mut(rgba, len) };
        session.scan(RgbaFrame::new(data, width, height)?.into_gray())
    })
}

/// Tear down the decoding session. The next scan re-creates it.
#[no_mangle]
pub extern "C" fn destroy_scanner() {
    match try_enter(bridge()) {
        Ok(mut bridge) => bridge.session.teardown(),
        Err(_) => warn!("destroy_scanner called during a scan; ignored"),
    }
}

/// Return the reusable staging buffer, grown to hold a `width` x `height`
/// RGBA frame. Null on allocation failure or invalid dimensions.
///
/// A zero-sized request succeeds with a non-null pointer that must not be
/// read or written.
#[no_mangle]
pub extern "C" fn create_buffer(width: c_int, height: c_int) -> *mut u8 {
    let Ok((width, height)) = dimensions(width, height) else {
        return std::ptr::null_mut();
    };
    let Ok(mut pool) = try_enter(pool()) else {
        return std::ptr::null_mut();
    };
    match pool.acquire(width, height) {
        Ok(region) => region.as_mut_ptr(),
        Err(err) => {
            warn!(%err, width, height, "create_buffer failed");
            std::ptr::null_mut()
        }
    }
}

/// Free the staging buffer. The argument is ignored; there is only one.
#[no_mangle]
pub extern "C" fn destroy_buffer(_buffer: *mut u8) {
    pool().lock().unwrap_or_else(PoisonError::into_inner).release();
}

/// Current staging buffer capacity in bytes.
#[no_mangle]
pub extern "C" fn buffer_capacity() -> usize {
    pool().lock().unwrap_or_else(PoisonError::into_inner).capacity()
}
