//! Gradient-magnitude edge detection with non-maximum suppression.
//!
//! Per frame: smoothed derivative responses `gx`/`gy` (floating point),
//! a frozen magnitude field with its global maximum, then a per-pixel
//! suppression pass that keeps local maxima along the quantized gradient
//! direction above a fraction of the maximum magnitude. The suppression pass
//! reads only the frozen magnitude buffer and writes only the output, so it
//! parallelizes by row without synchronization.

use crate::detect::{for_each_row, run_convolve};
use crate::filter::BorderPolicy;
use crate::image::{ImageView, OwnedImage};
use crate::kernel::{derivative_kernels, Kernel};
use crate::trace::{trace_event, trace_span};
use crate::util::{EdgeMapError, EdgeMapResult};

/// Canny-style edge detector: smoothed gradients, non-maximum suppression,
/// and a global relative threshold.
pub struct GradientDetector {
    dx: Kernel,
    dy: Kernel,
    threshold_fraction: f32,
    border: BorderPolicy,
    parallel: bool,
}

impl GradientDetector {
    /// Builds the detector, constructing the derivative kernel pair once.
    pub fn new(
        ksize: usize,
        sigma: f32,
        threshold_fraction: f32,
        border: BorderPolicy,
        parallel: bool,
    ) -> EdgeMapResult<Self> {
        if !threshold_fraction.is_finite()
            || threshold_fraction <= 0.0
            || threshold_fraction >= 1.0
        {
            return Err(EdgeMapError::InvalidThreshold {
                fraction: threshold_fraction,
            });
        }
        let (dx, dy) = derivative_kernels(ksize, sigma)?;
        Ok(Self {
            dx,
            dy,
            threshold_fraction,
            border,
            parallel,
        })
    }

    /// Processes one frame into a graded edge map: accepted pixels carry the
    /// magnitude scaled to 0..=255, suppressed pixels are 0.
    pub fn apply(&self, frame: ImageView<'_, u8>) -> EdgeMapResult<OwnedImage<u8>> {
        let _span = trace_span!(
            "gradient_apply",
            width = frame.width(),
            height = frame.height()
        )
        .entered();

        let gx: OwnedImage<f32> = run_convolve(frame, &self.dx, self.border, self.parallel)?;
        let gy: OwnedImage<f32> = run_convolve(frame, &self.dy, self.border, self.parallel)?;

        let width = frame.width();
        let height = frame.height();

        let mut mag = vec![0.0f32; width * height];
        let mut max_mag = 0.0f32;
        for (m, (&x, &y)) in mag.iter_mut().zip(gx.data().iter().zip(gy.data())) {
            let value = (x * x + y * y).sqrt();
            *m = value;
            if value > max_mag {
                max_mag = value;
            }
        }

        let pass = SuppressPass {
            gx: gx.data(),
            gy: gy.data(),
            mag: &mag,
            width,
            height,
            threshold: self.threshold_fraction * max_mag,
            max_mag,
        };

        let mut out = vec![0u8; width * height];
        for_each_row(&mut out, width, self.parallel, |y, row| pass.row(y, row));

        trace_event!(
            "gradient_pass",
            max_magnitude = f64::from(max_mag),
            threshold = f64::from(pass.threshold)
        );
        OwnedImage::from_vec(out, width, height)
    }
}

/// Frozen per-frame buffers for the suppression pass. The magnitude field is
/// never written once built; every row reads it and writes its own output
/// chunk only.
struct SuppressPass<'a> {
    gx: &'a [f32],
    gy: &'a [f32],
    mag: &'a [f32],
    width: usize,
    height: usize,
    threshold: f32,
    max_mag: f32,
}

impl SuppressPass<'_> {
    fn row(&self, y: usize, out_row: &mut [u8]) {
        for (x, out) in out_row.iter_mut().enumerate() {
            let idx = y * self.width + x;
            let mag = self.mag[idx];
            // Zero-magnitude pixels are never edges; this also guards the
            // direction normalization below.
            if mag <= 0.0 {
                continue;
            }

            let nx = self.gx[idx] / mag;
            let ny = self.gy[idx] / mag;
            // Deliberately coarse direction quantization: rounding toward
            // positive infinity maps each unit-vector component into
            // {-1, 0, 1}.
            let ox = nx.ceil() as isize;
            let oy = ny.ceil() as isize;

            let ahead = self.mag_at(x as isize + ox, y as isize + oy);
            let behind = self.mag_at(x as isize - ox, y as isize - oy);
            if mag >= ahead && mag >= behind && mag > self.threshold {
                *out = (mag / self.max_mag * 255.0).round() as u8;
            }
        }
    }

    /// Magnitude lookup treating out-of-bounds neighbors as zero.
    fn mag_at(&self, x: isize, y: isize) -> f32 {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return 0.0;
        }
        self.mag[y as usize * self.width + x as usize]
    }
}
