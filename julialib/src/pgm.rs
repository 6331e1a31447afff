use std::io::{Read, Write};

use log::debug;

use crate::errors::*;
use crate::render::BoundedGrid;

/// Pixel value written for a point that stayed bounded
pub const BOUNDED_VALUE: u8 = 255;

/// Pixel value written for a point that escaped
pub const ESCAPED_VALUE: u8 = 0;

const MAGIC: &str = "P5";
const MAX_VALUE: usize = 255;

/// The ASCII header that precedes the pixel data of a square image of `size` pixels per side
pub fn header(size: usize) -> String {
    format!("{} {} {} {}\n", MAGIC, size, size, MAX_VALUE)
}

/// Write `grid` to `output` as a binary greymap: the header followed by one byte per cell,
/// in the grid's storage order.
pub fn encode<W: Write>(grid: &BoundedGrid, mut output: W) -> Result<()> {
    output.write_all(header(grid.size()).as_bytes())?;

    let mut row = vec![ESCAPED_VALUE; grid.size()];
    for column in grid.cells().chunks(grid.size().max(1)) {
        for (byte, &bounded) in row.iter_mut().zip(column) {
            *byte = if bounded { BOUNDED_VALUE } else { ESCAPED_VALUE };
        }
        output.write_all(&row[..column.len()])?;
    }

    output.flush()?;
    debug!("Encoded {} x {} greymap", grid.size(), grid.size());
    Ok(())
}

/*
    Read one whitespace delimited token of the header, skipping leading whitespace and
    any '#' comments. The single whitespace byte that ends the token is consumed.
*/
fn header_token<R: Read>(input: &mut R) -> Result<String> {
    let mut token = String::new();
    let mut byte = [0u8; 1];
    let mut in_comment = false;

    loop {
        if input.read(&mut byte)? == 0 {
            if token.is_empty() {
                bail!("Unexpected end of data while reading greymap header");
            }
            return Ok(token);
        }

        let c = byte[0] as char;
        if in_comment {
            in_comment = c != '\n';
        } else if c.is_ascii_whitespace() {
            if !token.is_empty() {
                return Ok(token);
            }
        } else if c == '#' && token.is_empty() {
            in_comment = true;
        } else {
            token.push(c);
        }
    }
}

fn header_number<R: Read>(input: &mut R, name: &str) -> Result<usize> {
    let token = header_token(input)?;
    token
        .parse::<usize>()
        .chain_err(|| format!("Could not parse greymap {} '{}'", name, token))
}

/// Read a binary greymap written by `encode` back into a `BoundedGrid`.
///
/// The image must be square with a maximum value of 255, hold exactly one byte per pixel and
/// contain only the values 0 and 255.
pub fn decode<R: Read>(mut input: R) -> Result<BoundedGrid> {
    let magic = header_token(&mut input)?;
    if magic != MAGIC {
        bail!("Expected greymap magic '{}' but found '{}'", MAGIC, magic);
    }

    let width = header_number(&mut input, "width")?;
    let height = header_number(&mut input, "height")?;
    let max_value = header_number(&mut input, "maximum value")?;

    if width != height {
        bail!("Greymap is {} x {} but only square images are supported", width, height);
    }

    if max_value != MAX_VALUE {
        bail!("Greymap maximum value is {}, expected {}", max_value, MAX_VALUE);
    }

    let expected = width
        .checked_mul(height)
        .ok_or_else(|| format!("Greymap of {} x {} is too large", width, height))?;

    let mut pixels = Vec::with_capacity(expected);
    input.read_to_end(&mut pixels)?;

    if pixels.len() != expected {
        bail!("Greymap should contain {} pixels but has {}", expected, pixels.len());
    }

    let cells = pixels
        .iter()
        .enumerate()
        .map(|(offset, &value)| -> Result<bool> {
            match value {
                BOUNDED_VALUE => Ok(true),
                ESCAPED_VALUE => Ok(false),
                _ => Err(format!("Invalid pixel value {} at offset {}", value, offset).into()),
            }
        })
        .collect::<Result<Vec<bool>>>()?;

    BoundedGrid::from_cells(width, cells)
}
