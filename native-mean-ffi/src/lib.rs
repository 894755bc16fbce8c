//! C ABI exports.
//!
//! `cpp_mean` takes and returns doubles by value. `cpp_mean_dotc` follows
//! the convention of hosts that pass every argument as a pointer to a
//! vector and read results back from an output argument.

use native_mean_core::mean;

/// Arithmetic mean of `x` and `y`.
#[unsafe(no_mangle)]
pub extern "C" fn cpp_mean(x: f64, y: f64) -> f64 {
    mean(x, y)
}

/// Pointer variant of [`cpp_mean`]: writes `mean(*x, *y)` into `*result`.
///
/// Does nothing when any pointer is null.
///
/// # Safety
///
/// Non-null pointers must be valid and aligned for one `f64` each, and
/// `result` must be writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cpp_mean_dotc(x: *const f64, y: *const f64, result: *mut f64) {
    if x.is_null() || y.is_null() || result.is_null() {
        return;
    }

    // SAFETY: pointers checked for null above; validity is the caller's contract.
    unsafe {
        *result = mean(*x, *y);
    }
}
