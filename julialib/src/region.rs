use std::fmt;

use num::Complex;

use crate::errors::*;

/// The smallest grid has 2^9 = 512 pixels along each side
pub const MIN_SIZE_EXPONENT: u32 = 9;

/// Largest size exponent accepted by `GridSize::from_exponent`, giving a grid of 32768 x 32768
pub const MAX_EXPONENT: u32 = 6;

/// A rectangular area of the complex plane, given by its real (x) and imaginary (y) bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl Region {
    /// Create a new `Region`, checking that the bounds are finite and that each minimum is
    /// strictly less than its maximum
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self> {
        if ![xmin, xmax, ymin, ymax].iter().all(|bound| bound.is_finite()) {
            bail!("Region bounds must be finite numbers");
        }

        if xmin >= xmax {
            bail!("Region 'xmin' ({}) must be less than 'xmax' ({})", xmin, xmax);
        }

        if ymin >= ymax {
            bail!("Region 'ymin' ({}) must be less than 'ymax' ({})", ymin, ymax);
        }

        Ok(Region { xmin, xmax, ymin, ymax })
    }

    /// Minimum of the real axis
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Maximum of the real axis
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Minimum of the imaginary axis
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    /// Maximum of the imaginary axis
    pub fn ymax(&self) -> f64 {
        self.ymax
    }
}

impl Default for Region {
    fn default() -> Self {
        Region {
            xmin: -2.0,
            xmax: 0.5,
            ymin: -1.25,
            ymax: 1.25,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}] x [{}, {}]i", self.xmin, self.xmax, self.ymin, self.ymax)
    }
}

/// The side of the square grid of sample points, always a power of two of at least 512
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pixels: usize,
}

impl GridSize {
    /// Create a `GridSize` of `2^(exponent + 9)` pixels per side.
    ///
    /// Exponents above `MAX_EXPONENT` are refused, rather than attempting an allocation
    /// that is unlikely to succeed.
    pub fn from_exponent(exponent: u32) -> Result<Self> {
        if exponent > MAX_EXPONENT {
            bail!(
                "Size exponent {} is too large, the maximum accepted is {} (a grid of {} x {})",
                exponent,
                MAX_EXPONENT,
                1usize << (MAX_EXPONENT + MIN_SIZE_EXPONENT),
                1usize << (MAX_EXPONENT + MIN_SIZE_EXPONENT)
            );
        }

        Ok(GridSize {
            pixels: 1usize << (exponent + MIN_SIZE_EXPONENT),
        })
    }

    /// Number of pixels along each side of the grid
    pub fn pixels(&self) -> usize {
        self.pixels
    }

    /// Total number of sample points in the grid
    pub fn count(&self) -> usize {
        self.pixels * self.pixels
    }
}

/// Maps pixel coordinates of a grid onto points of a `Region`, with the pixels at index 0 and
/// `size - 1` falling exactly on the bounds of the `Region`
#[derive(Debug, Clone, Copy)]
pub struct PlaneMapper {
    xmin: f64,
    ymin: f64,
    dx: f64,
    dy: f64,
}

impl PlaneMapper {
    /// Create a `PlaneMapper` for a square grid of `size` pixels per side covering `region`
    pub fn new(region: &Region, size: usize) -> Self {
        let span = size.saturating_sub(1).max(1) as f64;

        PlaneMapper {
            xmin: region.xmin,
            ymin: region.ymin,
            dx: (region.xmax - region.xmin) / span,
            dy: (region.ymax - region.ymin) / span,
        }
    }

    /// Distance between neighbouring pixels along the real axis
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Distance between neighbouring pixels along the imaginary axis
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Given the `(i, j)` indices of a pixel, return the corresponding point on the
    /// complex plane. `i` runs along the real axis and `j` along the imaginary axis.
    pub fn pixel_to_point(&self, pixel: (usize, usize)) -> Complex<f64> {
        Complex {
            re: self.xmin + pixel.0 as f64 * self.dx,
            im: self.ymin + pixel.1 as f64 * self.dy,
        }
    }
}
