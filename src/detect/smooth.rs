//! Gaussian smoothing as a detector-shaped operation.
//!
//! Kept alongside the edge detectors so a caller can cycle between the raw
//! pipeline stages with the same `apply` call shape. The kernel is the 1D
//! Gaussian of the configured `(ksize, sigma)`.

use crate::detect::run_convolve;
use crate::filter::BorderPolicy;
use crate::image::{ImageView, OwnedImage};
use crate::kernel::{gaussian_kernel, Kernel};
use crate::util::EdgeMapResult;

/// Gaussian blur with the shared detector call shape.
pub struct Smoother {
    kernel: Kernel,
    border: BorderPolicy,
    parallel: bool,
}

impl Smoother {
    /// Builds the smoother, constructing the Gaussian kernel once.
    pub fn new(
        ksize: usize,
        sigma: f32,
        border: BorderPolicy,
        parallel: bool,
    ) -> EdgeMapResult<Self> {
        let kernel = gaussian_kernel(ksize, sigma)?;
        Ok(Self {
            kernel,
            border,
            parallel,
        })
    }

    /// Processes one frame into its blurred counterpart. The kernel has unit
    /// sum and non-negative taps, so the 8-bit output depth is exact up to
    /// rounding.
    pub fn apply(&self, frame: ImageView<'_, u8>) -> EdgeMapResult<OwnedImage<u8>> {
        run_convolve(frame, &self.kernel, self.border, self.parallel)
    }
}
