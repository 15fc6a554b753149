use std::process::Command;

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

fn write_source(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("source.png");
    RgbaImage::from_fn(30, 20, |x, y| {
        let v = ((x * 9 + y * 13) % 256) as u8;
        Rgba([v, v, 255 - v, 255])
    })
    .save(&path)
    .unwrap();
    path
}

#[test]
fn still_export_writes_canvas_sized_png() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir);
    let output = dir.path().join("still.png");

    let status = Command::new(env!("CARGO_BIN_EXE_tilescroll"))
        .arg(&source)
        .args(["--size", "200x100", "--still-time", "1.25"])
        .args(["--pointer", "0.3,0.6", "--rng-seed", "7"])
        .arg("--still-export")
        .arg(&output)
        .status()
        .expect("failed to run tilescroll");
    assert!(status.success());

    let frame = image::open(&output).unwrap().to_rgba8();
    assert_eq!(frame.dimensions(), (150, 100));
    for pixel in frame.pixels() {
        assert!(
            pixel.0 == [255, 255, 255, 255] || pixel.0 == [252, 20, 8, 255],
            "{:?}",
            pixel.0
        );
    }
}

#[test]
fn same_rng_seed_gives_same_export() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir);

    let mut frames = Vec::new();
    for name in ["a.png", "b.png"] {
        let output = dir.path().join(name);
        let status = Command::new(env!("CARGO_BIN_EXE_tilescroll"))
            .arg(&source)
            .args(["--size", "64x64", "--rng-seed", "42", "--still-time", "3"])
            .arg("--still-export")
            .arg(&output)
            .status()
            .expect("failed to run tilescroll");
        assert!(status.success());
        frames.push(image::open(&output).unwrap().to_rgba8());
    }
    assert_eq!(frames[0].as_raw(), frames[1].as_raw());
}

#[test]
fn missing_image_fails_before_rendering() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("never.png");

    let result = Command::new(env!("CARGO_BIN_EXE_tilescroll"))
        .arg(dir.path().join("absent.png"))
        .arg("--still-export")
        .arg(&output)
        .output()
        .expect("failed to run tilescroll");
    assert!(!result.status.success());
    assert!(!output.exists());
    assert!(String::from_utf8_lossy(&result.stderr).contains("failed to load image"));
}

#[test]
fn oversized_export_is_rejected() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir);
    let output = dir.path().join("huge.png");

    let result = Command::new(env!("CARGO_BIN_EXE_tilescroll"))
        .arg(&source)
        .args(["--size", "40000x20000"])
        .arg("--still-export")
        .arg(&output)
        .output()
        .expect("failed to run tilescroll");
    assert!(!result.status.success());
    assert!(!output.exists());
    assert!(String::from_utf8_lossy(&result.stderr).contains("at most 16384"));
}
