//! Laplacian-of-Gaussian zero-crossing edge detection.
//!
//! Per frame: a signed 16-bit Laplacian-of-Gaussian response, then a 3x3
//! neighborhood scan per pixel. A neighborhood holding at least one strictly
//! positive and one strictly negative response marks a sign change, which is
//! the edge indicator. Neighbors outside the frame are skipped, not
//! substituted.

use crate::detect::{for_each_row, run_convolve};
use crate::filter::BorderPolicy;
use crate::image::{ImageView, OwnedImage};
use crate::kernel::{log_kernel, Kernel};
use crate::trace::trace_span;
use crate::util::EdgeMapResult;

/// Marr-Hildreth-style detector producing a binary (0/255) edge map.
pub struct ZeroCrossingDetector {
    log: Kernel,
    border: BorderPolicy,
    parallel: bool,
}

impl ZeroCrossingDetector {
    /// Builds the detector, constructing the Laplacian-of-Gaussian kernel
    /// once.
    pub fn new(
        ksize: usize,
        sigma: f32,
        border: BorderPolicy,
        parallel: bool,
    ) -> EdgeMapResult<Self> {
        let log = log_kernel(ksize, sigma)?;
        Ok(Self {
            log,
            border,
            parallel,
        })
    }

    /// Processes one frame into a binary edge map.
    pub fn apply(&self, frame: ImageView<'_, u8>) -> EdgeMapResult<OwnedImage<u8>> {
        let _span = trace_span!(
            "zero_crossing_apply",
            width = frame.width(),
            height = frame.height()
        )
        .entered();

        let response: OwnedImage<i16> =
            run_convolve(frame, &self.log, self.border, self.parallel)?;

        let width = frame.width();
        let height = frame.height();
        let resp = response.data();

        let mut out = vec![0u8; width * height];
        for_each_row(&mut out, width, self.parallel, |y, row| {
            scan_row(resp, width, height, y, row);
        });
        OwnedImage::from_vec(out, width, height)
    }
}

fn scan_row(resp: &[i16], width: usize, height: usize, y: usize, out_row: &mut [u8]) {
    let y0 = y.saturating_sub(1);
    let y1 = (y + 1).min(height - 1);
    for (x, out) in out_row.iter_mut().enumerate() {
        let x0 = x.saturating_sub(1);
        let x1 = (x + 1).min(width - 1);

        let mut has_pos = false;
        let mut has_neg = false;
        for ny in y0..=y1 {
            let row = &resp[ny * width..ny * width + width];
            for &value in &row[x0..=x1] {
                has_pos |= value > 0;
                has_neg |= value < 0;
            }
        }
        if has_pos && has_neg {
            *out = 255;
        }
    }
}
