//! C entry points for hosts that own buffers and precomputed tables.
//!
//! Frames are stereo, laid out like
//!
//! ```c
//! struct sample_t { float chan[2]; };
//! ```
//!
//! and coefficient tables use the flat `b0.. a0.. b1.. a1..` layout.

#![deny(unsafe_op_in_unsafe_fn)]

use core::slice;

use dyn_iir::denormals::NoDenormalsGuard;
use dyn_iir::{kernel, CoefTableRef, IirError, StereoFrame};

/// Filters `input[coef_len..num_samples]` into `output` with no checks.
///
/// Returns without touching memory when `coef_len <= 0` or
/// `num_samples <= coef_len`.
///
/// # Safety
///
/// * `coef_indices`, `input` and `output` point to at least `num_samples`
///   entries; `input` and `output` do not overlap.
/// * Every `coef_indices[i]` for `i` in `coef_len..num_samples` is
///   non-negative and names a full block of `2 * coef_len` floats inside
///   `coef_table`.
#[no_mangle]
pub unsafe extern "C" fn iir(
    coef_table: *const f32,
    coef_len: i32,
    coef_indices: *const i32,
    input: *const StereoFrame,
    output: *mut StereoFrame,
    num_samples: i32,
) {
    if coef_len <= 0 || num_samples <= coef_len {
        return;
    }
    let order = coef_len as usize;
    let frames = num_samples as usize;
    // SAFETY: upheld by the caller; `i32` and `u32` share a layout and
    // non-negative indices keep their value.
    let indices = unsafe { slice::from_raw_parts(coef_indices.cast::<u32>(), frames) };
    // The host passes no table length, so borrow exactly the blocks referenced.
    let blocks = indices[order..]
        .iter()
        .copied()
        .max()
        .map_or(0, |max| max as usize + 1);
    unsafe {
        let table =
            CoefTableRef::new_unchecked(order, slice::from_raw_parts(coef_table, blocks * order * 2));
        let input = slice::from_raw_parts(input, frames);
        let output = slice::from_raw_parts_mut(output, frames);
        let _guard = NoDenormalsGuard::new();
        kernel::apply_unchecked(table, indices, input, output, frames);
    }
}

/// Validating variant of [`iir`].
///
/// Returns `0` on success or a negative status code (see
/// [`IirError::code`]). On failure `output` is not written.
///
/// # Safety
///
/// Every non-null pointer must be valid for the length its companion
/// argument claims: `table_len` floats for `coef_table`, `num_samples`
/// entries for the other buffers.
#[no_mangle]
pub unsafe extern "C" fn iir_checked(
    coef_table: *const f32,
    table_len: i32,
    coef_len: i32,
    coef_indices: *const i32,
    input: *const StereoFrame,
    output: *mut StereoFrame,
    num_samples: i32,
) -> i32 {
    let result = unsafe {
        run_checked(
            coef_table,
            table_len,
            coef_len,
            coef_indices,
            input,
            output,
            num_samples,
        )
    };
    match result {
        Ok(()) => 0,
        Err(err) => {
            tracing::warn!(%err, code = err.code(), "iir_checked rejected call");
            err.code()
        }
    }
}

unsafe fn run_checked(
    coef_table: *const f32,
    table_len: i32,
    coef_len: i32,
    coef_indices: *const i32,
    input: *const StereoFrame,
    output: *mut StereoFrame,
    num_samples: i32,
) -> Result<(), IirError> {
    if coef_len <= 0 {
        return Err(IirError::ZeroOrder);
    }
    for (name, is_null) in [
        ("coef_table", coef_table.is_null()),
        ("coef_indices", coef_indices.is_null()),
        ("input", input.is_null()),
        ("output", output.is_null()),
    ] {
        if is_null {
            return Err(IirError::NullPointer(name));
        }
    }
    let order = coef_len as usize;
    let frames = usize::try_from(num_samples).unwrap_or(0);
    let table_len = usize::try_from(table_len).unwrap_or(0);

    let in_range = input as usize..input.wrapping_add(frames) as usize;
    let out_range = output as usize..output.wrapping_add(frames) as usize;
    if frames > 0 && in_range.start < out_range.end && out_range.start < in_range.end {
        return Err(IirError::Aliased);
    }

    // SAFETY: pointers are non-null and the caller vouches for their lengths.
    let (table, raw_indices, input, output) = unsafe {
        (
            slice::from_raw_parts(coef_table, table_len),
            slice::from_raw_parts(coef_indices, frames),
            slice::from_raw_parts(input, frames),
            slice::from_raw_parts_mut(output, frames),
        )
    };
    if frames > order {
        if let Some((offset, &index)) = raw_indices[order..]
            .iter()
            .enumerate()
            .find(|(_, &index)| index < 0)
        {
            return Err(IirError::NegativeIndex {
                position: order + offset,
                index,
            });
        }
    }
    // SAFETY: same layout; negative values were rejected above for the
    // positions the kernel reads.
    let indices = unsafe { slice::from_raw_parts(raw_indices.as_ptr().cast::<u32>(), frames) };
    let table = CoefTableRef::new(order, table)?;
    let _guard = NoDenormalsGuard::new();
    kernel::apply_checked(table, indices, input, output, frames)
}
