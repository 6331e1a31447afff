use log::{debug, trace};
use num::Complex;
use rayon::prelude::*;

use crate::errors::*;
use crate::escapes::{escapes, DEFAULT_CONSTANT, DEFAULT_LIMIT};
use crate::region::{GridSize, PlaneMapper, Region};

/// Everything that decides the classification of a point, other than its position in the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// The area of the complex plane covered by the grid
    pub region: Region,
    /// The constant 'c' of the recurrence `z <- z * z + c`
    pub constant: Complex<f64>,
    /// Maximum number of iterations applied to each point
    pub limit: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            region: Region::default(),
            constant: DEFAULT_CONSTANT,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A square grid with one cell per sample point, `true` where the point stayed bounded.
///
/// Cells are stored contiguously with the real (i) index outermost, so the cell for pixel
/// `(i, j)` is at offset `i * size + j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedGrid {
    size: usize,
    cells: Vec<bool>,
}

impl BoundedGrid {
    /// Create a `BoundedGrid` from previously computed cells, which must hold exactly
    /// `size * size` values
    pub fn from_cells(size: usize, cells: Vec<bool>) -> Result<Self> {
        let expected = size
            .checked_mul(size)
            .ok_or_else(|| format!("Grid size {} is too large", size))?;

        if cells.len() != expected {
            bail!(
                "A grid of {} x {} needs {} cells, but {} were supplied",
                size,
                size,
                expected,
                cells.len()
            );
        }

        Ok(BoundedGrid { size, cells })
    }

    /// Number of cells along each side of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells, in storage order
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Return true if the point at pixel `(i, j)` stayed bounded
    pub fn is_bounded(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.size + j]
    }

    /// Count of the points that stayed bounded
    pub fn bounded_count(&self) -> usize {
        self.cells.iter().filter(|&&bounded| bounded).count()
    }
}

/*
    Classify each point of the column of pixels with real index 'i'. The column is a chunk of
    the grid's cells of length 'size', indexed by 'j'.
*/
fn render_column(column: &mut [bool], i: usize, mapper: &PlaneMapper, parameters: &Parameters) {
    for (j, cell) in column.iter_mut().enumerate() {
        let point = mapper.pixel_to_point((i, j));
        *cell = escapes(point, parameters.constant, parameters.limit).is_bounded();
    }
}

fn log_start(parameters: &Parameters, size: GridSize, mapper: &PlaneMapper) {
    debug!(
        "Rendering {} x {} grid over {} with c = {} and limit {}",
        size.pixels(),
        size.pixels(),
        parameters.region,
        parameters.constant,
        parameters.limit
    );
    trace!("dx = {}, dy = {}", mapper.dx(), mapper.dy());
}

/// Evaluate every point of a grid of `size` over `parameters.region`, with the columns of the
/// grid distributed across the current rayon thread pool.
pub fn render(parameters: &Parameters, size: GridSize) -> BoundedGrid {
    let pixels = size.pixels();
    let mapper = PlaneMapper::new(&parameters.region, pixels);
    log_start(parameters, size, &mapper);

    let mut cells = vec![false; size.count()];

    // each chunk is a disjoint column so no synchronization is needed until the join
    cells
        .par_chunks_mut(pixels)
        .enumerate()
        .for_each(|(i, column)| render_column(column, i, &mapper, parameters));

    BoundedGrid { size: pixels, cells }
}

/// Evaluate every point of the grid on the calling thread, in storage order
pub fn render_serial(parameters: &Parameters, size: GridSize) -> BoundedGrid {
    let pixels = size.pixels();
    let mapper = PlaneMapper::new(&parameters.region, pixels);
    log_start(parameters, size, &mapper);

    let mut cells = vec![false; size.count()];

    for (i, column) in cells.chunks_mut(pixels).enumerate() {
        render_column(column, i, &mapper, parameters);
    }

    BoundedGrid { size: pixels, cells }
}

/// Evaluate the grid using `threads` worker threads. A single thread evaluates the grid
/// serially, otherwise a dedicated rayon pool of that many threads is used.
pub fn render_with_threads(
    parameters: &Parameters,
    size: GridSize,
    threads: usize,
) -> Result<BoundedGrid> {
    match threads {
        0 => Err("The number of threads must be at least one".into()),
        1 => Ok(render_serial(parameters, size)),
        _ => {
            debug!("Creating pool of {} threads", threads);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .chain_err(|| format!("Could not create a pool of {} threads", threads))?;
            Ok(pool.install(|| render(parameters, size)))
        }
    }
}
