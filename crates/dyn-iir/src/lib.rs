//! Time-varying IIR filtering with per-frame coefficient selection.
//!
//! A [`CoefTable`] holds one `b`/`a` coefficient block per automation step and
//! an index track picks the block for every output frame, so a filter sweep
//! across a buffer is a single call to [`kernel::apply`].

#![deny(unsafe_op_in_unsafe_fn)]

pub mod coef;
pub mod config;
pub mod denormals;
pub mod error;
pub mod filter;
pub mod frame;
pub mod kernel;

pub use coef::{CoefBlock, CoefTable, CoefTableRef};
pub use config::{KernelConfig, Validation};
pub use error::{IirError, Result};
pub use filter::DynamicIir;
pub use frame::{Frame, StereoFrame, STEREO};
pub use kernel::{apply, apply_checked, apply_unchecked, validate};
