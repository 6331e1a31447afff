//! System tests
//!
//! These run the `julia` binary built by cargo for this crate, writing the image into a
//! temporary directory and checking the exit status and what was written.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::process::{Command, Output};

use tempdir::TempDir;

use julialib::pgm;

fn julia(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_julia"))
        .args(args)
        .output()
        .expect("Could not run 'julia'")
}

fn read_bytes(path: &Path) -> Vec<u8> {
    let mut f = File::open(path).expect("Could not open file");
    let mut buffer = Vec::new();
    f.read_to_end(&mut buffer).expect("Could not read from file");
    buffer
}

#[test]
fn smallest_image() {
    let dir = TempDir::new("julia").expect("Could not create temp dir");
    let output_file = dir.path().join("image.pbm");
    let output_arg = output_file.to_str().expect("Could not convert path");

    let output = julia(&["-o", output_arg, "0"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let bytes = read_bytes(&output_file);
    let header = b"P5 512 512 255\n";
    assert_eq!(&bytes[..header.len()], header);
    assert_eq!(bytes.len(), header.len() + 512 * 512);

    let file = File::open(&output_file).expect("Could not open file");
    let grid = pgm::decode(BufReader::new(file)).expect("Could not decode image");
    assert_eq!(grid.size(), 512);
    assert!(grid.is_bounded(409, 256));
    assert!(!grid.is_bounded(0, 0));
    assert!(!grid.is_bounded(0, 511));
    assert!(!grid.is_bounded(511, 0));
    assert!(!grid.is_bounded(511, 511));
}

#[test]
fn thread_count_does_not_change_image() {
    let dir = TempDir::new("julia").expect("Could not create temp dir");
    let serial_file = dir.path().join("serial.pbm");
    let parallel_file = dir.path().join("parallel.pbm");

    let serial = julia(&["-t", "1", "-o", serial_file.to_str().expect("path"), "0"]);
    assert!(serial.status.success());
    let parallel = julia(&["-t", "4", "-o", parallel_file.to_str().expect("path"), "0"]);
    assert!(parallel.status.success());

    assert_eq!(read_bytes(&serial_file), read_bytes(&parallel_file));
}

#[test]
fn png_image() {
    let dir = TempDir::new("julia").expect("Could not create temp dir");
    let output_file = dir.path().join("image.png");

    let output = julia(&["--output", output_file.to_str().expect("path"), "0"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let bytes = read_bytes(&output_file);
    assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
}

#[test]
fn missing_size() {
    let output = julia(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("SIZE_EXPONENT"));
}

#[test]
fn non_numeric_size() {
    let dir = TempDir::new("julia").expect("Could not create temp dir");
    let output_file = dir.path().join("image.pbm");

    let output = julia(&["-o", output_file.to_str().expect("path"), "big"]);
    assert!(!output.status.success());
    assert!(!output_file.exists());
}

#[test]
fn negative_size() {
    let dir = TempDir::new("julia").expect("Could not create temp dir");
    let output_file = dir.path().join("image.pbm");

    let output = julia(&["-o", output_file.to_str().expect("path"), "--", "-1"]);
    assert!(!output.status.success());
    assert!(!output_file.exists());
}

#[test]
fn size_too_large() {
    let dir = TempDir::new("julia").expect("Could not create temp dir");
    let output_file = dir.path().join("image.pbm");

    let output = julia(&["-o", output_file.to_str().expect("path"), "40"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("too large"));
    assert!(!output_file.exists());
}

#[test]
fn zero_threads() {
    let dir = TempDir::new("julia").expect("Could not create temp dir");
    let output_file = dir.path().join("image.pbm");

    let output = julia(&["-t", "0", "-o", output_file.to_str().expect("path"), "0"]);
    assert!(!output.status.success());
    assert!(!output_file.exists());
}

#[test]
fn unwritable_output() {
    let dir = TempDir::new("julia").expect("Could not create temp dir");
    let output_file = dir.path().join("missing").join("image.pbm");

    let output = julia(&["-o", output_file.to_str().expect("path"), "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not write image"));
}
