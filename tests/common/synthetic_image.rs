use ndarray::Array3;

/// Generates a high-contrast RGB checkerboard.
#[allow(dead_code)]
pub fn checkerboard_rgb(width: usize, height: usize, cell: usize) -> Array3<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        let dark = ((x / cell) + (y / cell)) % 2 == 0;
        match (dark, c) {
            (true, _) => 32,
            (false, 0) => 220,
            (false, 1) => 180,
            (false, _) => 90,
        }
    })
}

/// Smooth diagonal color ramp with no hard edges.
#[allow(dead_code)]
pub fn gradient_rgb(width: usize, height: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        let t = (x * 255 / width.max(1) + y * 255 / height.max(1)) / 2;
        match c {
            0 => t as u8,
            1 => (255 - t) as u8,
            _ => ((t + 64) % 256) as u8,
        }
    })
}
