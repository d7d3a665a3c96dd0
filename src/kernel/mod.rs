//! Kernel construction for the edge detectors.
//!
//! All builders are pure functions of `(ksize, sigma)` and validate their
//! parameters up front, so a successfully built kernel is immutable and can
//! be shared across frames and threads. Derived kernels (smoothed derivative,
//! Laplacian-of-Gaussian) are produced by combining tap grids with the
//! Gaussian through a same-shape grid convolution; image buffers are never
//! involved at this stage.

use crate::util::{EdgeMapError, EdgeMapResult};

/// Largest kernel extent the sigma-derived rule may produce.
pub const MAX_DERIVED_KSIZE: usize = 31;

const LAPLACIAN_TAPS: [f32; 9] = [0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0];
const DIFF_TAPS: [f32; 3] = [-1.0, 0.0, 1.0];

/// Immutable 2D coefficient grid with its anchor at the geometric center.
///
/// Both dimensions are odd and positive by construction.
#[derive(Clone, Debug)]
pub struct Kernel {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Creates a kernel from row-major coefficients.
    pub fn from_vec(data: Vec<f32>, width: usize, height: usize) -> EdgeMapResult<Self> {
        if width == 0 || width % 2 == 0 {
            return Err(EdgeMapError::InvalidKernelSize { ksize: width });
        }
        if height == 0 || height % 2 == 0 {
            return Err(EdgeMapError::InvalidKernelSize { ksize: height });
        }
        let needed = width * height;
        if data.len() != needed {
            return Err(EdgeMapError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the kernel width in taps.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the kernel height in taps.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the anchor column (geometric center).
    pub fn anchor_x(&self) -> usize {
        self.width / 2
    }

    /// Returns the anchor row (geometric center).
    pub fn anchor_y(&self) -> usize {
        self.height / 2
    }

    /// Returns the coefficients in row-major order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the coefficient at tap `(kx, ky)`.
    pub fn at(&self, kx: usize, ky: usize) -> f32 {
        self.data[ky * self.width + kx]
    }

    /// Returns the transposed kernel.
    pub fn transpose(&self) -> Kernel {
        let mut data = vec![0.0f32; self.data.len()];
        for ky in 0..self.height {
            for kx in 0..self.width {
                data[kx * self.height + ky] = self.at(kx, ky);
            }
        }
        Kernel {
            data,
            width: self.height,
            height: self.width,
        }
    }
}

/// Derives an odd kernel size from sigma: `2 * ceil(3.7 * sigma - 1) + 1`,
/// clamped to [`MAX_DERIVED_KSIZE`].
pub fn ksize_from_sigma(sigma: f32) -> EdgeMapResult<usize> {
    check_sigma(sigma)?;
    let half = (3.7 * sigma - 1.0).ceil().max(0.0) as usize;
    Ok((2 * half + 1).min(MAX_DERIVED_KSIZE))
}

/// Builds a 1D horizontal Gaussian kernel normalized to unit sum.
pub fn gaussian_kernel(ksize: usize, sigma: f32) -> EdgeMapResult<Kernel> {
    check_ksize(ksize)?;
    check_sigma(sigma)?;

    let half = (ksize / 2) as isize;
    let sigma2 = sigma * sigma;
    let mut data = Vec::with_capacity(ksize);
    for i in 0..ksize {
        let x = (i as isize - half) as f32;
        data.push((-(x * x) / (2.0 * sigma2)).exp());
    }
    let sum: f32 = data.iter().sum();
    for v in &mut data {
        *v /= sum;
    }
    Kernel::from_vec(data, ksize, 1)
}

/// Builds the smoothed first-derivative kernel pair.
///
/// `dx` is the central difference `[-1, 0, 1]` combined with the Gaussian of
/// the same sigma; `dy` is its transpose. The derivative responds positively
/// to intensity increasing toward +x (respectively +y).
pub fn derivative_kernels(ksize: usize, sigma: f32) -> EdgeMapResult<(Kernel, Kernel)> {
    let gauss = gaussian_kernel(ksize, sigma)?;
    let diff = Kernel::from_vec(DIFF_TAPS.to_vec(), 3, 1)?;
    let dx = combine_same(&gauss, &diff);
    let dy = dx.transpose();
    Ok((dx, dy))
}

/// Builds a `ksize x ksize` Laplacian-of-Gaussian kernel: the 3x3 discrete
/// Laplacian combined with the separable 2D Gaussian of the same sigma.
pub fn log_kernel(ksize: usize, sigma: f32) -> EdgeMapResult<Kernel> {
    let gauss = gaussian_kernel(ksize, sigma)?;
    let g = gauss.data();
    let mut grid = Vec::with_capacity(ksize * ksize);
    for y in 0..ksize {
        for x in 0..ksize {
            grid.push(g[y] * g[x]);
        }
    }
    let gauss2d = Kernel::from_vec(grid, ksize, ksize)?;
    let laplacian = Kernel::from_vec(LAPLACIAN_TAPS.to_vec(), 3, 3)?;
    let mut log = combine_same(&gauss2d, &laplacian);

    // The same-shape combine truncates Gaussian mass at the grid edge, which
    // leaves a small bias. Rebalance so a constant region yields exactly zero
    // response.
    let bias = log.data.iter().sum::<f32>() / log.data.len() as f32;
    for v in &mut log.data {
        *v -= bias;
    }
    Ok(log)
}

/// Combines `taps` into `base` keeping the shape of `base` ("same" mode):
/// `out[v] = sum over o of taps[o] * base[v - o]`, with offsets measured from
/// each kernel's anchor and `base` taken as zero outside its extent.
///
/// Correlating the result with an image equals correlating `taps` with the
/// `base`-smoothed image, which is how the derivative and Laplacian kernels
/// inherit their smoothing.
fn combine_same(base: &Kernel, taps: &Kernel) -> Kernel {
    let width = base.width();
    let height = base.height();
    let tap_ax = taps.anchor_x() as isize;
    let tap_ay = taps.anchor_y() as isize;

    let mut data = vec![0.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for ty in 0..taps.height() {
                for tx in 0..taps.width() {
                    let sx = x as isize - (tx as isize - tap_ax);
                    let sy = y as isize - (ty as isize - tap_ay);
                    if sx < 0 || sy < 0 || sx >= width as isize || sy >= height as isize {
                        continue;
                    }
                    sum += taps.at(tx, ty) * base.at(sx as usize, sy as usize);
                }
            }
            data[y * width + x] = sum;
        }
    }
    Kernel {
        data,
        width,
        height,
    }
}

fn check_ksize(ksize: usize) -> EdgeMapResult<()> {
    if ksize == 0 || ksize % 2 == 0 {
        return Err(EdgeMapError::InvalidKernelSize { ksize });
    }
    Ok(())
}

fn check_sigma(sigma: f32) -> EdgeMapResult<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(EdgeMapError::InvalidSigma { sigma });
    }
    Ok(())
}
