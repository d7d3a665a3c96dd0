//! Rayon-parallel convolution (feature-gated).
//!
//! Row-parallel variant of [`convolve`](crate::filter::convolve) with
//! identical semantics: each worker writes a disjoint output row and reads
//! only the shared frozen input, so the result is bit-identical to the
//! sequential pass.

use crate::filter::{check_footprint, convolve_row, BorderPolicy, Response, Sample};
use crate::image::{ImageView, OwnedImage};
use crate::kernel::Kernel;
use crate::util::EdgeMapResult;
use rayon::prelude::*;

/// Row-parallel convolution producing the same output as the scalar path.
pub fn convolve_par<T: Sample, R: Response>(
    image: ImageView<'_, T>,
    kernel: &Kernel,
    border: BorderPolicy,
) -> EdgeMapResult<OwnedImage<R>> {
    check_footprint(image.width(), image.height(), kernel)?;

    let width = image.width();
    let height = image.height();
    let mut out = vec![R::default(); width * height];
    out.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out_row)| {
            convolve_row(image, kernel, border, y, out_row);
        });
    OwnedImage::from_vec(out, width, height)
}
