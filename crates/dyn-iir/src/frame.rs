//! Multi-channel sample frames and interleaved buffer views.

use bytemuck::{Pod, Zeroable};

use crate::error::{IirError, Result};

/// Channel count of the stereo layout used by the C boundary.
pub const STEREO: usize = 2;

/// One sample per channel at a single time instant.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame<const C: usize> {
    pub chan: [f32; C],
}

pub type StereoFrame = Frame<STEREO>;

// SAFETY: `Frame<C>` is a transparent wrapper around `[f32; C]`, which has no
// padding and accepts every bit pattern.
unsafe impl<const C: usize> Zeroable for Frame<C> {}
unsafe impl<const C: usize> Pod for Frame<C> {}

impl<const C: usize> Frame<C> {
    pub const ZERO: Self = Self { chan: [0.0; C] };

    #[inline]
    pub const fn new(chan: [f32; C]) -> Self {
        Self { chan }
    }

    #[inline]
    pub const fn splat(value: f32) -> Self {
        Self { chan: [value; C] }
    }

    #[inline]
    pub const fn channels(&self) -> usize {
        C
    }
}

impl<const C: usize> Default for Frame<C> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const C: usize> From<[f32; C]> for Frame<C> {
    #[inline]
    fn from(chan: [f32; C]) -> Self {
        Self { chan }
    }
}

/// Reinterprets an interleaved buffer (`L R L R ...` for stereo) as frames.
pub fn frames_from_interleaved<const C: usize>(samples: &[f32]) -> Result<&[Frame<C>]> {
    if C == 0 || samples.len() % C != 0 {
        return Err(IirError::Interleave {
            len: samples.len(),
            channels: C,
        });
    }
    Ok(bytemuck::cast_slice(samples))
}

/// Mutable counterpart of [`frames_from_interleaved`].
pub fn frames_from_interleaved_mut<const C: usize>(
    samples: &mut [f32],
) -> Result<&mut [Frame<C>]> {
    if C == 0 || samples.len() % C != 0 {
        return Err(IirError::Interleave {
            len: samples.len(),
            channels: C,
        });
    }
    Ok(bytemuck::cast_slice_mut(samples))
}

#[inline]
pub fn frames_as_interleaved<const C: usize>(frames: &[Frame<C>]) -> &[f32] {
    if C == 0 {
        return &[];
    }
    bytemuck::cast_slice(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_view_splits_channels() {
        let samples = [1.0, -1.0, 2.0, -2.0, 3.0, -3.0];
        let frames = frames_from_interleaved::<STEREO>(&samples).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1], Frame::new([2.0, -2.0]));
        assert_eq!(frames_as_interleaved(frames), &samples);
    }

    #[test]
    fn ragged_interleaved_buffer_is_rejected() {
        let samples = [0.0f32; 5];
        let err = frames_from_interleaved::<STEREO>(&samples).unwrap_err();
        assert_eq!(err, IirError::Interleave { len: 5, channels: 2 });
    }

    #[test]
    fn mutable_view_writes_through() {
        let mut samples = [0.0f32; 6];
        {
            let frames = frames_from_interleaved_mut::<3>(&mut samples).unwrap();
            frames[1] = Frame::splat(0.5);
        }
        assert_eq!(samples, [0.0, 0.0, 0.0, 0.5, 0.5, 0.5]);
    }
}
