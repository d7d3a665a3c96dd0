//! Edgemap is a grayscale edge-detection library.
//!
//! This crate provides two independent detectors over single-channel frames:
//! a gradient-magnitude detector with non-maximum suppression and a
//! Laplacian-of-Gaussian zero-crossing detector, built on an owned
//! bounds-checked convolution engine. Optional row-parallelism is available
//! via the `rayon` feature.

pub mod detect;
pub mod filter;
pub mod image;
pub mod kernel;
mod trace;
pub mod util;

pub use detect::{DetectorConfig, DetectorKind, EdgeDetector};
pub use detect::{GradientDetector, Smoother, ZeroCrossingDetector};
pub use filter::{convolve, BorderPolicy, Response, Sample};
pub use image::{ImageView, OwnedImage};
pub use kernel::{
    derivative_kernels, gaussian_kernel, ksize_from_sigma, log_kernel, Kernel, MAX_DERIVED_KSIZE,
};
pub use util::{EdgeMapError, EdgeMapResult};
