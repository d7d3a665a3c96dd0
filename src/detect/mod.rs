//! Detector configuration and the closed detector set.
//!
//! Detectors form a closed set of tagged variants selected via
//! [`DetectorConfig`], all sharing the `apply(frame) -> edge map` call shape.
//! Validation happens once, at construction: kernels are built up front and
//! never mutated, so a detector instance can process any number of frames
//! (concurrently, if desired) without further checks or locking.

use crate::filter::BorderPolicy;
use crate::image::{ImageView, OwnedImage};
use crate::kernel::ksize_from_sigma;
use crate::util::EdgeMapResult;

pub mod gradient;
pub mod smooth;
pub mod zero_crossing;

pub use gradient::GradientDetector;
pub use smooth::Smoother;
pub use zero_crossing::ZeroCrossingDetector;

/// Which detector variant to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetectorKind {
    /// Gradient magnitude with non-maximum suppression.
    #[default]
    Gradient,
    /// Laplacian-of-Gaussian zero crossings.
    ZeroCrossing,
    /// Plain Gaussian smoothing.
    Smooth,
}

/// Configuration for building a detector instance.
#[derive(Clone, Debug)]
pub struct DetectorConfig {
    /// Detector variant.
    pub kind: DetectorKind,
    /// Kernel size in taps; derived from `sigma` when `None`.
    pub ksize: Option<usize>,
    /// Gaussian sigma shared by all kernels of the variant.
    pub sigma: f32,
    /// Fraction of the maximum gradient magnitude used as the edge threshold
    /// (gradient variant only).
    pub threshold_fraction: f32,
    /// Border handling for the convolution passes.
    pub border: BorderPolicy,
    /// Run the per-frame passes row-parallel (requires the `rayon` feature;
    /// ignored otherwise).
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            kind: DetectorKind::Gradient,
            ksize: None,
            sigma: 1.0,
            threshold_fraction: 0.2,
            border: BorderPolicy::Clamp,
            parallel: false,
        }
    }
}

/// A configured detector ready to process frames.
pub enum EdgeDetector {
    /// Gradient magnitude with non-maximum suppression.
    Gradient(GradientDetector),
    /// Laplacian-of-Gaussian zero crossings.
    ZeroCrossing(ZeroCrossingDetector),
    /// Plain Gaussian smoothing.
    Smooth(Smoother),
}

/// Runs `f` over every output row, in parallel when requested.
#[cfg(feature = "rayon")]
pub(crate) fn for_each_row<F>(out: &mut [u8], width: usize, parallel: bool, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    use rayon::prelude::*;
    if parallel {
        out.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    } else {
        for (y, row) in out.chunks_mut(width).enumerate() {
            f(y, row);
        }
    }
}

/// Runs `f` over every output row; without the `rayon` feature the parallel
/// flag is accepted but has no effect.
#[cfg(not(feature = "rayon"))]
pub(crate) fn for_each_row<F>(out: &mut [u8], width: usize, _parallel: bool, f: F)
where
    F: Fn(usize, &mut [u8]),
{
    for (y, row) in out.chunks_mut(width).enumerate() {
        f(y, row);
    }
}

/// Convolution dispatch honoring the detector's parallel flag.
#[cfg(feature = "rayon")]
pub(crate) fn run_convolve<T, R>(
    image: ImageView<'_, T>,
    kernel: &crate::kernel::Kernel,
    border: BorderPolicy,
    parallel: bool,
) -> EdgeMapResult<OwnedImage<R>>
where
    T: crate::filter::Sample,
    R: crate::filter::Response,
{
    if parallel {
        crate::filter::rayon::convolve_par(image, kernel, border)
    } else {
        crate::filter::convolve(image, kernel, border)
    }
}

/// Convolution dispatch; without the `rayon` feature the parallel flag is
/// accepted but has no effect.
#[cfg(not(feature = "rayon"))]
pub(crate) fn run_convolve<T, R>(
    image: ImageView<'_, T>,
    kernel: &crate::kernel::Kernel,
    border: BorderPolicy,
    _parallel: bool,
) -> EdgeMapResult<OwnedImage<R>>
where
    T: crate::filter::Sample,
    R: crate::filter::Response,
{
    crate::filter::convolve(image, kernel, border)
}

impl EdgeDetector {
    /// Builds the detector named by `config`, validating every parameter and
    /// constructing the kernels once.
    pub fn new(config: &DetectorConfig) -> EdgeMapResult<Self> {
        let ksize = match config.ksize {
            Some(ksize) => ksize,
            None => ksize_from_sigma(config.sigma)?,
        };
        match config.kind {
            DetectorKind::Gradient => Ok(Self::Gradient(GradientDetector::new(
                ksize,
                config.sigma,
                config.threshold_fraction,
                config.border,
                config.parallel,
            )?)),
            DetectorKind::ZeroCrossing => Ok(Self::ZeroCrossing(ZeroCrossingDetector::new(
                ksize,
                config.sigma,
                config.border,
                config.parallel,
            )?)),
            DetectorKind::Smooth => Ok(Self::Smooth(Smoother::new(
                ksize,
                config.sigma,
                config.border,
                config.parallel,
            )?)),
        }
    }

    /// Processes one grayscale frame and returns a fresh edge map (or blurred
    /// frame) of identical width and height.
    pub fn apply(&self, frame: ImageView<'_, u8>) -> EdgeMapResult<OwnedImage<u8>> {
        match self {
            Self::Gradient(detector) => detector.apply(frame),
            Self::ZeroCrossing(detector) => detector.apply(frame),
            Self::Smooth(smoother) => smoother.apply(frame),
        }
    }
}
