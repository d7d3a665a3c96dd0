//! Convenience helpers for loading frames via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. The detectors themselves
//! never perform I/O; these helpers exist for tests and downstream callers
//! that feed frames from disk.

use crate::image::{ImageView, OwnedImage};
use crate::util::{EdgeMapError, EdgeMapResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> EdgeMapResult<ImageView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height)
}

/// Creates an owned frame from a grayscale image buffer.
pub fn owned_from_gray_image(img: &image::GrayImage) -> EdgeMapResult<OwnedImage<u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    OwnedImage::from_vec(img.as_raw().clone(), width, height)
}

/// Creates an owned grayscale frame from a dynamic image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> EdgeMapResult<OwnedImage<u8>> {
    let gray = img.to_luma8();
    owned_from_gray_image(&gray)
}

/// Loads an image from disk and converts it to a grayscale owned frame.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> EdgeMapResult<OwnedImage<u8>> {
    let img = image::open(path).map_err(|err| EdgeMapError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
