use crate::coef::CoefTable;
use crate::config::{KernelConfig, Validation};
use crate::denormals::NoDenormalsGuard;
use crate::error::Result;
use crate::frame::Frame;
use crate::kernel;

/// A precomputed coefficient table together with the settings used to apply it.
///
/// Hosts typically build one table per effect (for example a low-pass swept
/// across `resolution` cutoffs) and drive it with a per-frame index track.
#[derive(Clone, Debug)]
pub struct DynamicIir<const C: usize> {
    table: CoefTable,
    config: KernelConfig,
}

impl<const C: usize> DynamicIir<C> {
    pub fn new(table: CoefTable, config: KernelConfig) -> Self {
        tracing::debug!(
            order = table.order(),
            resolution = table.len(),
            channels = C,
            validation = ?config.validation,
            "created dynamic iir"
        );
        Self { table, config }
    }

    #[inline]
    pub fn table(&self) -> &CoefTable {
        &self.table
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.table.order()
    }

    /// Number of coefficient blocks an index may select from.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: KernelConfig) {
        self.config = config;
    }

    /// Filters the whole of `input` into `output`.
    ///
    /// The first [`order`](Self::order) frames of `output` are left as they were.
    /// With [`Validation::None`] an invalid call panics; with
    /// [`Validation::Full`] it returns an error and leaves `output` untouched.
    pub fn process(&self, indices: &[u32], input: &[Frame<C>], output: &mut [Frame<C>]) -> Result<()> {
        let num_samples = input.len();
        let _guard = NoDenormalsGuard::new();
        match self.config.validation {
            Validation::None => {
                kernel::apply(self.table.view(), indices, input, output, num_samples);
                Ok(())
            }
            Validation::Full => {
                kernel::apply_checked(self.table.view(), indices, input, output, num_samples)
            }
        }
    }
}
