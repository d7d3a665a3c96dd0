//! Image views and owned buffers.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. `OwnedImage` is the
//! contiguous owned counterpart produced by pipeline stages; every stage
//! allocates a fresh output instead of mutating its input.
//!
//! Both types are generic over the sample type so the same machinery carries
//! 8-bit frames, signed 16-bit responses, and float gradient fields.

use crate::util::{EdgeMapError, EdgeMapResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> EdgeMapResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> EdgeMapResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(EdgeMapError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }
}

/// Owned contiguous image buffer.
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
    stride: usize,
}

impl<T: Copy> OwnedImage<T> {
    /// Creates an owned image from a contiguous buffer of exactly
    /// `width * height` elements.
    pub fn from_vec(data: Vec<T>, width: usize, height: usize) -> EdgeMapResult<Self> {
        if width == 0 || height == 0 {
            return Err(EdgeMapError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(EdgeMapError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(EdgeMapError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(EdgeMapError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            stride: width,
        })
    }

    /// Copies a borrowed view (dropping any row padding) into an owned image.
    pub fn from_view(view: ImageView<'_, T>) -> EdgeMapResult<Self>
    where
        T: Default,
    {
        let width = view.width();
        let height = view.height();
        let needed = width
            .checked_mul(height)
            .ok_or(EdgeMapError::InvalidDimensions { width, height })?;
        let mut data = vec![T::default(); needed];
        for y in 0..height {
            let row = view.row(y).ok_or(EdgeMapError::BufferTooSmall {
                needed,
                got: view.as_slice().len(),
            })?;
            let start = y * width;
            data[start..start + width].copy_from_slice(row);
        }
        Self::from_vec(data, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the backing slice in row-major order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the image and returns the backing buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> EdgeMapResult<usize> {
    if width == 0 || height == 0 {
        return Err(EdgeMapError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(EdgeMapError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(EdgeMapError::InvalidDimensions { width, height })?;
    Ok(needed)
}
