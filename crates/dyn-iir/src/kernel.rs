//! Time-varying recursive filter.
//!
//! Every output frame `i` in `order..num_samples` is computed with the
//! coefficient block named by `indices[i]`:
//!
//! ```text
//! y[i][c] = sum_{j=0}^{order-1} b[j] * x[i-j][c] - a[j] * y[i-j][c]
//! ```
//!
//! `y[i]` is cleared before the sum, so the `j = 0` feedback term reads zero
//! and `a[0]` acts as the normalised leading denominator coefficient. Frames
//! are produced strictly left to right since each one feeds back into the
//! next `order - 1` frames. Frames `0..order` are never written; their
//! contents belong to the caller (typically the tail of the previous block).

use crate::coef::{CoefBlock, CoefTableRef};
use crate::error::{IirError, Result};
use crate::frame::Frame;

#[inline(always)]
fn accumulate<const C: usize>(
    block: CoefBlock<'_>,
    input: &[Frame<C>],
    output: &[Frame<C>],
) -> Frame<C> {
    let mut acc = Frame::<C>::ZERO;
    // Windows end at the current frame, so walking them backwards yields j = 0, 1, ...
    let taps = block.b.iter().zip(block.a);
    let history = input.iter().rev().zip(output.iter().rev());
    for ((&b, &a), (x, y)) in taps.zip(history) {
        for c in 0..C {
            acc.chan[c] += b * x.chan[c] - a * y.chan[c];
        }
    }
    acc
}

/// Filters `input[..num_samples]` into `output[..num_samples]` without a
/// validation pass.
///
/// # Panics
///
/// Panics if a buffer is shorter than `num_samples` or an index in
/// `indices[order..num_samples]` names a block the table does not hold. Frames
/// before the failing position have already been written at that point.
pub fn apply<const C: usize>(
    table: CoefTableRef<'_>,
    indices: &[u32],
    input: &[Frame<C>],
    output: &mut [Frame<C>],
    num_samples: usize,
) {
    let order = table.order();
    if order == 0 {
        return;
    }
    for i in order..num_samples {
        let index = indices[i] as usize;
        let Some(block) = table.block(index) else {
            panic!(
                "coefficient index {index} at position {i} exceeds table of {} blocks",
                table.len()
            );
        };
        let window = i + 1 - order;
        output[i] = Frame::ZERO;
        let acc = accumulate(block, &input[window..=i], &output[window..=i]);
        output[i] = acc;
    }
}

/// Validates every precondition, then runs the unchecked loop.
///
/// On error nothing is written to `output`.
pub fn apply_checked<const C: usize>(
    table: CoefTableRef<'_>,
    indices: &[u32],
    input: &[Frame<C>],
    output: &mut [Frame<C>],
    num_samples: usize,
) -> Result<()> {
    validate(table, indices, input, output, num_samples)?;
    // SAFETY: `validate` established every precondition of `apply_unchecked`.
    unsafe { apply_unchecked(table, indices, input, output, num_samples) };
    Ok(())
}

/// The filter loop with no bounds checks at all.
///
/// # Safety
///
/// * `indices`, `input` and `output` each hold at least `num_samples` entries.
/// * Every `indices[i]` for `i` in `table.order()..num_samples` is below
///   `table.len()`.
///
/// [`validate`] checks exactly these conditions.
pub unsafe fn apply_unchecked<const C: usize>(
    table: CoefTableRef<'_>,
    indices: &[u32],
    input: &[Frame<C>],
    output: &mut [Frame<C>],
    num_samples: usize,
) {
    let order = table.order();
    debug_assert!(order > 0);
    debug_assert!(indices.len() >= num_samples);
    debug_assert!(input.len() >= num_samples);
    debug_assert!(output.len() >= num_samples);
    for i in order..num_samples {
        let window = i + 1 - order;
        unsafe {
            let block = table.block_unchecked(*indices.get_unchecked(i) as usize);
            *output.get_unchecked_mut(i) = Frame::ZERO;
            let acc = accumulate(
                block,
                input.get_unchecked(window..=i),
                output.get_unchecked(window..=i),
            );
            *output.get_unchecked_mut(i) = acc;
        }
    }
}

/// Checks the preconditions of [`apply_unchecked`].
///
/// `num_samples <= order` is valid and simply produces no output.
pub fn validate<const C: usize>(
    table: CoefTableRef<'_>,
    indices: &[u32],
    input: &[Frame<C>],
    output: &[Frame<C>],
    num_samples: usize,
) -> Result<()> {
    check(table, indices, input.len(), output.len(), num_samples).inspect_err(|err| {
        tracing::warn!(
            %err,
            order = table.order(),
            blocks = table.len(),
            num_samples,
            "rejected filter call"
        );
    })
}

fn check(
    table: CoefTableRef<'_>,
    indices: &[u32],
    input_len: usize,
    output_len: usize,
    num_samples: usize,
) -> Result<()> {
    let order = table.order();
    if order == 0 {
        return Err(IirError::ZeroOrder);
    }
    let block_len = table.block_len();
    if table.as_flat().len() % block_len != 0 {
        return Err(IirError::TableLength {
            len: table.as_flat().len(),
            block_len,
        });
    }
    for (buffer, len) in [
        ("index", indices.len()),
        ("input", input_len),
        ("output", output_len),
    ] {
        if len < num_samples {
            return Err(IirError::BufferTooShort {
                buffer,
                len,
                required: num_samples,
            });
        }
    }
    let blocks = table.len();
    if num_samples > order {
        for (offset, &index) in indices[order..num_samples].iter().enumerate() {
            if index as usize >= blocks {
                return Err(IirError::IndexOutOfRange {
                    position: order + offset,
                    index: index as usize,
                    blocks,
                });
            }
        }
    }
    Ok(())
}
