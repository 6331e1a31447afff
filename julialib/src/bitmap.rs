use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{ImageBuffer, ImageFormat, Luma};
use log::info;

use crate::errors::*;
use crate::pgm;
use crate::render::BoundedGrid;

/// The formats a `BoundedGrid` can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Binary portable greymap ("P5"), the default
    Pgm,
    /// 8 bit greyscale PNG
    Png,
}

impl Format {
    /// Choose the format from the extension of `filename`, ".png" (in any case) selects `Png`
    pub fn from_path(filename: &Path) -> Self {
        match filename.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Format::Png,
            _ => Format::Pgm,
        }
    }
}

/// Write `grid` to the file named `filename`, in the format selected by its extension.
///
/// The file is only created once the grid has been fully computed, if writing fails part
/// way through then whatever was written is left in place.
pub fn write_bitmap(filename: &Path, grid: &BoundedGrid) -> Result<()> {
    let format = Format::from_path(filename);
    info!("Writing {} x {} image to '{}' as {:?}", grid.size(), grid.size(),
        filename.display(), format);

    match format {
        Format::Pgm => {
            let output = File::create(filename)
                .chain_err(|| format!("Could not create file '{}'", filename.display()))?;
            pgm::encode(grid, BufWriter::new(output))
                .chain_err(|| format!("Could not write greymap to '{}'", filename.display()))
        }
        Format::Png => write_png(filename, grid),
    }
}

/*
    The png uses the same byte layout as the greymap, so each row of the png holds the
    pixels with the same real index 'i'.
*/
fn write_png(filename: &Path, grid: &BoundedGrid) -> Result<()> {
    let side = u32::try_from(grid.size())
        .chain_err(|| format!("Grid of {} is too large for a png", grid.size()))?;

    let pixels = grid
        .cells()
        .iter()
        .map(|&bounded| if bounded { pgm::BOUNDED_VALUE } else { pgm::ESCAPED_VALUE })
        .collect::<Vec<u8>>();

    let buffer = ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(side, side, pixels)
        .ok_or("Could not create image buffer from grid")?;

    buffer
        .save_with_format(filename, ImageFormat::Png)
        .chain_err(|| format!("Could not write png to '{}'", filename.display()))
}

#[cfg(test)]
mod test {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use tempdir::TempDir;

    use crate::pgm;
    use crate::render::BoundedGrid;

    use super::*;

    fn grid() -> BoundedGrid {
        BoundedGrid::from_cells(3, vec![true, false, false, false, true, false, true, true, false])
            .expect("Could not create grid")
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("image.pbm")), Format::Pgm);
        assert_eq!(Format::from_path(Path::new("image.pgm")), Format::Pgm);
        assert_eq!(Format::from_path(Path::new("image")), Format::Pgm);
        assert_eq!(Format::from_path(Path::new("out/image.png")), Format::Png);
        assert_eq!(Format::from_path(Path::new("IMAGE.PNG")), Format::Png);
    }

    #[test]
    fn writes_greymap() {
        let dir = TempDir::new("bitmap").expect("Could not create temp dir");
        let filename = dir.path().join("image.pbm");

        write_bitmap(&filename, &grid()).expect("Could not write bitmap");

        let file = File::open(&filename).expect("Could not open file");
        let read_back = pgm::decode(BufReader::new(file)).expect("Could not decode");
        assert_eq!(read_back, grid());
    }

    #[test]
    fn writes_png() {
        let dir = TempDir::new("bitmap").expect("Could not create temp dir");
        let filename = dir.path().join("image.png");

        write_bitmap(&filename, &grid()).expect("Could not write bitmap");

        let image = image::open(&filename).expect("Could not open png").to_luma8();
        assert_eq!(image.dimensions(), (3, 3));
        // pixel (x, y) of the png is cell (j, i) of the grid
        assert_eq!(image.get_pixel(0, 0).0, [255]);
        assert_eq!(image.get_pixel(1, 0).0, [0]);
        assert_eq!(image.get_pixel(1, 1).0, [255]);
        assert_eq!(image.get_pixel(0, 2).0, [255]);
        assert_eq!(image.get_pixel(2, 2).0, [0]);
    }

    #[test]
    fn unwritable_destination() {
        let dir = TempDir::new("bitmap").expect("Could not create temp dir");
        let filename = dir.path().join("no_such_dir").join("image.pbm");

        assert!(write_bitmap(&filename, &grid()).is_err());
    }
}
