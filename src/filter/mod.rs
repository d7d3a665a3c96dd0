//! 2D convolution over image views.
//!
//! `convolve` computes, for every output pixel, the weighted sum of the
//! neighborhood defined by the kernel footprint and anchor. The output sample
//! type is a caller-supplied parameter: intermediate responses of a signed
//! kernel on an 8-bit frame do not fit the input depth, so the caller must
//! pick a precision (`f32`, `i16`, or `u8` for non-negative unit-sum kernels)
//! rather than inherit the input's.
//!
//! All accesses go through bounds-checked indexing; border pixels are
//! resolved by the [`BorderPolicy`], never by reading out of bounds.

use crate::image::{ImageView, OwnedImage};
use crate::kernel::Kernel;
use crate::util::{EdgeMapError, EdgeMapResult};

#[cfg(feature = "rayon")]
pub mod rayon;

/// How a convolution treats pixels whose footprint leaves the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderPolicy {
    /// Out-of-bounds taps read zero.
    ZeroPad,
    /// Out-of-bounds taps read the nearest in-bounds pixel.
    #[default]
    Clamp,
    /// Border output pixels are omitted (left at zero).
    Reject,
}

/// Input sample types the engine can read.
pub trait Sample: Copy + Send + Sync {
    /// Widens the sample to the accumulator type.
    fn to_accum(self) -> f32;
}

impl Sample for u8 {
    fn to_accum(self) -> f32 {
        f32::from(self)
    }
}

impl Sample for i16 {
    fn to_accum(self) -> f32 {
        f32::from(self)
    }
}

impl Sample for f32 {
    fn to_accum(self) -> f32 {
        self
    }
}

/// Output sample types the caller can request.
pub trait Response: Copy + Default + Send + Sync {
    /// Narrows the accumulated sum to the output type.
    fn from_accum(acc: f32) -> Self;
}

impl Response for f32 {
    fn from_accum(acc: f32) -> Self {
        acc
    }
}

impl Response for i16 {
    fn from_accum(acc: f32) -> Self {
        acc.round().clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
    }
}

impl Response for u8 {
    fn from_accum(acc: f32) -> Self {
        acc.round().clamp(0.0, 255.0) as u8
    }
}

/// Convolves `image` with `kernel`, producing a same-sized response image of
/// the caller-chosen sample type.
///
/// Fails with [`EdgeMapError::KernelTooLarge`] when the image is smaller than
/// the kernel footprint, before any output is produced.
pub fn convolve<T: Sample, R: Response>(
    image: ImageView<'_, T>,
    kernel: &Kernel,
    border: BorderPolicy,
) -> EdgeMapResult<OwnedImage<R>> {
    check_footprint(image.width(), image.height(), kernel)?;

    let width = image.width();
    let height = image.height();
    let mut out = vec![R::default(); width * height];
    for (y, out_row) in out.chunks_mut(width).enumerate() {
        convolve_row(image, kernel, border, y, out_row);
    }
    OwnedImage::from_vec(out, width, height)
}

pub(crate) fn check_footprint(
    img_width: usize,
    img_height: usize,
    kernel: &Kernel,
) -> EdgeMapResult<()> {
    if img_width < kernel.width() || img_height < kernel.height() {
        return Err(EdgeMapError::KernelTooLarge {
            kernel_width: kernel.width(),
            kernel_height: kernel.height(),
            img_width,
            img_height,
        });
    }
    Ok(())
}

pub(crate) fn convolve_row<T: Sample, R: Response>(
    image: ImageView<'_, T>,
    kernel: &Kernel,
    border: BorderPolicy,
    y: usize,
    out_row: &mut [R],
) {
    let width = image.width();
    let height = image.height();
    let anchor_x = kernel.anchor_x() as isize;
    let anchor_y = kernel.anchor_y() as isize;

    for (x, out) in out_row.iter_mut().enumerate() {
        if border == BorderPolicy::Reject {
            let left = x as isize - anchor_x;
            let top = y as isize - anchor_y;
            let right = left + kernel.width() as isize;
            let bottom = top + kernel.height() as isize;
            if left < 0 || top < 0 || right > width as isize || bottom > height as isize {
                continue;
            }
        }

        let mut acc = 0.0f32;
        for ky in 0..kernel.height() {
            let sy = y as isize + ky as isize - anchor_y;
            let sy = match resolve(sy, height, border) {
                Some(sy) => sy,
                None => continue,
            };
            let row = image.row(sy).expect("resolved row within bounds");
            for kx in 0..kernel.width() {
                let sx = x as isize + kx as isize - anchor_x;
                let sx = match resolve(sx, width, border) {
                    Some(sx) => sx,
                    None => continue,
                };
                acc += kernel.at(kx, ky) * row[sx].to_accum();
            }
        }
        *out = R::from_accum(acc);
    }
}

/// Maps a possibly out-of-bounds coordinate to an in-bounds one per policy.
/// `None` means the tap contributes nothing (zero padding).
fn resolve(coord: isize, len: usize, border: BorderPolicy) -> Option<usize> {
    if (0..len as isize).contains(&coord) {
        return Some(coord as usize);
    }
    match border {
        BorderPolicy::ZeroPad => None,
        BorderPolicy::Clamp => Some(coord.clamp(0, len as isize - 1) as usize),
        // Rejected pixels never reach the accumulation loop.
        BorderPolicy::Reject => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{convolve, BorderPolicy};
    use crate::image::{ImageView, OwnedImage};
    use crate::kernel::Kernel;
    use crate::util::EdgeMapError;

    fn frame_3x3() -> Vec<u8> {
        vec![10, 20, 30, 40, 50, 60, 70, 80, 90]
    }

    #[test]
    fn identity_kernel_passes_through() {
        let data = frame_3x3();
        let view = ImageView::from_slice(&data, 3, 3).unwrap();
        let identity = Kernel::from_vec(vec![1.0], 1, 1).unwrap();
        let out: OwnedImage<f32> = convolve(view, &identity, BorderPolicy::Clamp).unwrap();
        for (o, &i) in out.data().iter().zip(&data) {
            assert_eq!(*o, f32::from(i));
        }
    }

    #[test]
    fn clamp_replicates_border_pixels() {
        let data = frame_3x3();
        let view = ImageView::from_slice(&data, 3, 3).unwrap();
        let box3 = Kernel::from_vec(vec![1.0; 9], 3, 3).unwrap();
        let out: OwnedImage<f32> = convolve(view, &box3, BorderPolicy::Clamp).unwrap();
        // Top-left pixel: clamped footprint reads 10 four times, 20 and 40
        // twice each, 50 once.
        assert_eq!(out.data()[0], 4.0 * 10.0 + 2.0 * 20.0 + 2.0 * 40.0 + 50.0);
    }

    #[test]
    fn zero_pad_drops_outside_taps() {
        let data = frame_3x3();
        let view = ImageView::from_slice(&data, 3, 3).unwrap();
        let box3 = Kernel::from_vec(vec![1.0; 9], 3, 3).unwrap();
        let out: OwnedImage<f32> = convolve(view, &box3, BorderPolicy::ZeroPad).unwrap();
        assert_eq!(out.data()[0], 10.0 + 20.0 + 40.0 + 50.0);
        // Center pixel is unaffected by the policy.
        assert_eq!(out.data()[4], data.iter().map(|&v| f32::from(v)).sum());
    }

    #[test]
    fn reject_leaves_border_at_zero() {
        let data = frame_3x3();
        let view = ImageView::from_slice(&data, 3, 3).unwrap();
        let box3 = Kernel::from_vec(vec![1.0; 9], 3, 3).unwrap();
        let out: OwnedImage<f32> = convolve(view, &box3, BorderPolicy::Reject).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                let expected = if x == 1 && y == 1 {
                    data.iter().map(|&v| f32::from(v)).sum()
                } else {
                    0.0
                };
                assert_eq!(out.data()[y * 3 + x], expected);
            }
        }
    }

    #[test]
    fn i16_response_rounds_and_saturates() {
        let data = vec![255u8; 4];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        let amplify = Kernel::from_vec(vec![1000.0], 1, 1).unwrap();
        let out: OwnedImage<i16> = convolve(view, &amplify, BorderPolicy::Clamp).unwrap();
        assert!(out.data().iter().all(|&v| v == i16::MAX));

        let halve = Kernel::from_vec(vec![0.5], 1, 1).unwrap();
        let out: OwnedImage<i16> = convolve(view, &halve, BorderPolicy::Clamp).unwrap();
        assert!(out.data().iter().all(|&v| v == 128));
    }

    #[test]
    fn undersized_image_is_rejected() {
        let data = frame_3x3();
        let view = ImageView::from_slice(&data, 3, 3).unwrap();
        let wide = Kernel::from_vec(vec![0.2; 5], 5, 1).unwrap();
        let err = convolve::<u8, f32>(view, &wide, BorderPolicy::Clamp)
            .err()
            .unwrap();
        assert_eq!(
            err,
            EdgeMapError::KernelTooLarge {
                kernel_width: 5,
                kernel_height: 1,
                img_width: 3,
                img_height: 3,
            }
        );
    }
}
