//! Error types for edgemap.

use thiserror::Error;

/// Result alias for edgemap operations.
pub type EdgeMapResult<T> = std::result::Result<T, EdgeMapError>;

/// Errors that can occur when configuring or running edge detectors.
#[derive(Debug, Error, PartialEq)]
pub enum EdgeMapError {
    /// Kernel size is even or zero; kernels must have odd positive extent.
    #[error("invalid kernel size {ksize}: must be odd and positive")]
    InvalidKernelSize {
        /// Offending kernel size.
        ksize: usize,
    },
    /// Gaussian sigma is non-positive or non-finite.
    #[error("invalid sigma {sigma}: must be finite and > 0")]
    InvalidSigma {
        /// Offending sigma value.
        sigma: f32,
    },
    /// Threshold fraction is outside the open interval (0, 1).
    #[error("invalid threshold fraction {fraction}: must lie in (0, 1)")]
    InvalidThreshold {
        /// Offending threshold fraction.
        fraction: f32,
    },
    /// The input frame is smaller than the kernel footprint.
    #[error("kernel {kernel_width}x{kernel_height} exceeds image {img_width}x{img_height}")]
    KernelTooLarge {
        /// Kernel width in taps.
        kernel_width: usize,
        /// Kernel height in taps.
        kernel_height: usize,
        /// Image width in pixels.
        img_width: usize,
        /// Image height in pixels.
        img_height: usize,
    },
    /// Image dimensions are zero or overflow an index computation.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// Row stride is smaller than the image width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride {
        /// Image width in pixels.
        width: usize,
        /// Stride in elements.
        stride: usize,
    },
    /// The backing buffer is too small for the requested view.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall {
        /// Minimum number of elements required.
        needed: usize,
        /// Number of elements provided.
        got: usize,
    },
    /// Image decoding or loading failed.
    #[cfg(feature = "image-io")]
    #[error("image io failed: {reason}")]
    ImageIo {
        /// Underlying decoder message.
        reason: String,
    },
}
