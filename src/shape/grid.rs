use crate::math::Real;

/// Error raised when a pixel buffer cannot be turned into an [`OccupancyGrid`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum InvalidImageError {
    /// The image has a zero width or height.
    #[error("the image dimensions {width}x{height} must both be non-zero.")]
    ZeroDimension {
        /// Width of the image, in pixels.
        width: usize,
        /// Height of the image, in pixels.
        height: usize,
    },
    /// The image dimensions overflow when computing the buffer length.
    #[error("the image dimensions {width}x{height} are too large.")]
    TooLarge {
        /// Width of the image, in pixels.
        width: usize,
        /// Height of the image, in pixels.
        height: usize,
    },
    /// The buffer length does not match the image dimensions.
    #[error("expected a buffer of {expected} values, found {found}.")]
    BufferLength {
        /// The number of values implied by the dimensions.
        expected: usize,
        /// The actual length of the buffer.
        found: usize,
    },
    /// The image resolution is not a strictly positive finite number.
    #[error("the image resolution ({0} DPI) must be strictly positive.")]
    InvalidResolution(Real),
}

/// A binary occupancy mask of an image, padded with one empty cell on each side.
///
/// Cell `(row, col)` of the grid, with `1 <= row <= H` and `1 <= col <= W`,
/// is occupied iff the alpha of pixel `(row - 1, col - 1)` is non-zero. The
/// outer ring is never occupied, so every boundary traced on this grid is
/// closed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct OccupancyGrid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl OccupancyGrid {
    /// Builds the grid from the alpha channel of a row-major RGBA buffer.
    ///
    /// A pixel is occupied iff its alpha is strictly greater than zero: there
    /// is no tolerance, a barely visible pixel is part of the silhouette.
    pub fn from_rgba(
        pixels: &[Real],
        width: usize,
        height: usize,
    ) -> Result<Self, InvalidImageError> {
        let num_pixels = checked_pixel_count(width, height)?;
        let expected = num_pixels
            .checked_mul(4)
            .ok_or(InvalidImageError::TooLarge { width, height })?;

        if pixels.len() != expected {
            return Err(InvalidImageError::BufferLength {
                expected,
                found: pixels.len(),
            });
        }

        Ok(Self::from_alpha_fn(width, height, |i| pixels[i * 4 + 3] > 0.0))
    }

    /// Builds the grid from a row-major mask where `true` marks opaque pixels.
    pub fn from_mask(mask: &[bool], width: usize, height: usize) -> Result<Self, InvalidImageError> {
        let expected = checked_pixel_count(width, height)?;

        if mask.len() != expected {
            return Err(InvalidImageError::BufferLength {
                expected,
                found: mask.len(),
            });
        }

        Ok(Self::from_alpha_fn(width, height, |i| mask[i]))
    }

    fn from_alpha_fn(width: usize, height: usize, occupied: impl Fn(usize) -> bool) -> Self {
        let padded_width = width + 2;
        let padded_height = height + 2;
        let mut cells = vec![false; padded_width * padded_height];

        for row in 0..height {
            let src = row * width;
            let dst = (row + 1) * padded_width + 1;
            for col in 0..width {
                cells[dst + col] = occupied(src + col);
            }
        }

        Self {
            cells,
            width: padded_width,
            height: padded_height,
        }
    }

    /// The number of columns of this grid, border included.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows of this grid, border included.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The width of the image this grid was built from.
    pub fn image_width(&self) -> usize {
        self.width - 2
    }

    /// The height of the image this grid was built from.
    pub fn image_height(&self) -> usize {
        self.height - 2
    }

    /// Is the cell at `(row, col)` occupied?
    ///
    /// Cells outside of the grid are never occupied.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// The number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Checks that no cell of the outer ring is occupied.
    pub fn border_is_empty(&self) -> bool {
        let last_row = self.height - 1;
        let last_col = self.width - 1;
        (0..self.width).all(|c| !self.is_occupied(0, c) && !self.is_occupied(last_row, c))
            && (0..self.height).all(|r| !self.is_occupied(r, 0) && !self.is_occupied(r, last_col))
    }
}

fn checked_pixel_count(width: usize, height: usize) -> Result<usize, InvalidImageError> {
    if width == 0 || height == 0 {
        return Err(InvalidImageError::ZeroDimension { width, height });
    }

    width
        .checked_add(2)
        .and_then(|w| height.checked_add(2).and_then(|h| w.checked_mul(h)))
        .and_then(|_| width.checked_mul(height))
        .ok_or(InvalidImageError::TooLarge { width, height })
}
