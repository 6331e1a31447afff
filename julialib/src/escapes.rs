use num::Complex;

/// A point has escaped once the square of its modulus exceeds this, i.e. an escape radius of 2
pub const ESCAPE_NORM_SQR: f64 = 4.0;

/// Maximum number of iterations used to decide if a point is bounded
pub const DEFAULT_LIMIT: usize = 30;

/// The constant 'c' added at each step of the iteration
pub const DEFAULT_CONSTANT: Complex<f64> = Complex { re: 0.32, im: 0.411 };

/// The state a point was left in when the iteration stopped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Escape {
    /// The final value of 'z'
    pub z: Complex<f64>,
    /// How many times the recurrence was applied
    pub iterations: usize,
}

impl Escape {
    /// The point is considered bounded if 'z' is still within the escape radius
    pub fn is_bounded(&self) -> bool {
        self.z.norm_sqr() <= ESCAPE_NORM_SQR
    }
}

/// Starting with 'z0', repeatedly apply `z <- z * z + c` at most 'limit' times, stopping early
/// the first time 'z' leaves the circle of radius two centered on the origin.
///
/// A start point already outside that circle is returned with zero iterations.
pub fn escapes(z0: Complex<f64>, c: Complex<f64>, limit: usize) -> Escape {
    let mut z = z0;
    let mut iterations = 0;

    while z.norm_sqr() <= ESCAPE_NORM_SQR && iterations < limit {
        z = z * z + c;
        iterations += 1;
    }

    Escape { z, iterations }
}
