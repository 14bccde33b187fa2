//! Edge detection: Sobel gradients and Canny.
//!
//! ## Supported Formats
//!
//! Accepts images with 1 or 3 channels:
//! - **Grayscale**: (height, width, 1) - gradient of the single channel
//! - **RGB**: (height, width, 3) - per pixel, the channel with the strongest
//!   gradient wins
//!
//! Output is always a single-channel binary map (0 or 255).

use ndarray::{Array2, Array3, ArrayView3};

use super::core::BorderMode;

/// Hysteresis thresholds used by the catalog's edge and pencil filters.
pub const CANNY_LOW: i32 = 100;
pub const CANNY_HIGH: i32 = 200;

/// tan(22.5°) in Q15
const TG22: i64 = 13573;

/// Per-pixel Sobel response of the dominant channel.
#[derive(Clone, Debug)]
pub struct Gradients {
    pub dx: Array2<i32>,
    pub dy: Array2<i32>,
    /// L1 magnitude `|dx| + |dy|`
    pub magnitude: Array2<i32>,
}

// ============================================================================
// Sobel
// ============================================================================

/// Compute 3x3 Sobel gradients with replicated borders.
///
/// For multi-channel input each pixel keeps the channel whose L1 magnitude
/// is largest.
pub fn sobel_gradients(input: ArrayView3<u8>) -> Gradients {
    let (height, width, channels) = input.dim();
    let mut dx = Array2::<i32>::zeros((height, width));
    let mut dy = Array2::<i32>::zeros((height, width));
    let mut magnitude = Array2::<i32>::zeros((height, width));

    let border = BorderMode::Replicate;

    for y in 0..height {
        let ym = border.index(y as isize - 1, height);
        let yp = border.index(y as isize + 1, height);
        for x in 0..width {
            let xm = border.index(x as isize - 1, width);
            let xp = border.index(x as isize + 1, width);

            let mut best = (0i32, 0i32, -1i32);
            for c in 0..channels {
                let p = |yy: usize, xx: usize| input[[yy, xx, c]] as i32;

                let gx = (p(ym, xp) + 2 * p(y, xp) + p(yp, xp)) - (p(ym, xm) + 2 * p(y, xm) + p(yp, xm));
                let gy = (p(yp, xm) + 2 * p(yp, x) + p(yp, xp)) - (p(ym, xm) + 2 * p(ym, x) + p(ym, xp));
                let mag = gx.abs() + gy.abs();
                if mag > best.2 {
                    best = (gx, gy, mag);
                }
            }

            dx[[y, x]] = best.0;
            dy[[y, x]] = best.1;
            magnitude[[y, x]] = best.2.max(0);
        }
    }

    Gradients { dx, dy, magnitude }
}

// ============================================================================
// Canny
// ============================================================================

/// Canny edge detector.
///
/// Steps: Sobel gradients, non-maximum suppression along the quantized
/// gradient direction, then hysteresis: pixels above `high` seed edges that
/// grow through 8-connected pixels above `low`.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels (height, width, channels)
/// * `low` - Lower hysteresis threshold on the L1 gradient magnitude
/// * `high` - Upper hysteresis threshold
///
/// # Returns
/// Binary edge map of shape (height, width, 1)
pub fn canny_u8(input: ArrayView3<u8>, low: i32, high: i32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let (low, high) = if low > high { (high, low) } else { (low, high) };

    let Gradients { dx, dy, magnitude } = sobel_gradients(input);
    let mag_at = |y: isize, x: isize| -> i32 {
        if y < 0 || x < 0 || y >= height as isize || x >= width as isize {
            0
        } else {
            magnitude[[y as usize, x as usize]]
        }
    };

    // 0 = not an edge, 1 = weak candidate, 2 = strong edge
    let mut state = Array2::<u8>::zeros((height, width));
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let m = magnitude[[y, x]];
            if m <= low {
                continue;
            }

            let (yi, xi) = (y as isize, x as isize);
            let xs = dx[[y, x]].unsigned_abs() as i64;
            let ys = dy[[y, x]].unsigned_abs() as i64;
            let tg22x = xs * TG22;
            let ys15 = ys << 15;

            let is_max = if ys15 < tg22x {
                // Mostly horizontal gradient
                m > mag_at(yi, xi - 1) && m >= mag_at(yi, xi + 1)
            } else {
                let tg67x = tg22x + (xs << 16);
                if ys15 > tg67x {
                    // Mostly vertical gradient
                    m > mag_at(yi - 1, xi) && m >= mag_at(yi + 1, xi)
                } else {
                    let s: isize = if (dx[[y, x]] ^ dy[[y, x]]) < 0 { -1 } else { 1 };
                    m > mag_at(yi - 1, xi - s) && m > mag_at(yi + 1, xi + s)
                }
            };

            if is_max {
                if m > high {
                    state[[y, x]] = 2;
                    stack.push((y, x));
                } else {
                    state[[y, x]] = 1;
                }
            }
        }
    }

    // Hysteresis
    while let Some((y, x)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                if state[[ny, nx]] == 1 {
                    state[[ny, nx]] = 2;
                    stack.push((ny, nx));
                }
            }
        }
    }

    let mut output = Array3::<u8>::zeros((height, width, 1));
    for ((y, x), &s) in state.indexed_iter() {
        if s == 2 {
            output[[y, x, 0]] = 255;
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(height: usize, width: usize, split: usize, lo: u8, hi: u8) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 3), |(_, x, _)| if x < split { lo } else { hi })
    }

    #[test]
    fn test_sobel_gradients_vertical_edge() {
        let img = vertical_step(5, 6, 3, 0, 255);

        let g = sobel_gradients(img.view());

        assert_eq!(g.dx[[2, 2]], 1020);
        assert_eq!(g.dy[[2, 2]], 0);
        assert_eq!(g.magnitude[[2, 0]], 0);
    }

    #[test]
    fn test_canny_u8_flat_has_no_edges() {
        let img = Array3::<u8>::from_elem((8, 8, 3), 128);
        let result = canny_u8(img.view(), CANNY_LOW, CANNY_HIGH);
        assert_eq!(result.dim(), (8, 8, 1));
        assert!(result.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_canny_u8_thin_vertical_line() {
        let img = vertical_step(9, 10, 5, 0, 255);

        let result = canny_u8(img.view(), CANNY_LOW, CANNY_HIGH);

        for y in 0..9 {
            for x in 0..10 {
                let expected = if x == 4 { 255 } else { 0 };
                assert_eq!(result[[y, x, 0]], expected, "pixel ({y}, {x})");
            }
        }
    }

    #[test]
    fn test_canny_u8_weak_edge_suppressed() {
        // Step of 20 gives magnitude 80, below the low threshold
        let img = vertical_step(6, 6, 3, 100, 120);
        let result = canny_u8(img.view(), CANNY_LOW, CANNY_HIGH);
        assert!(result.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_canny_u8_hysteresis_extends_strong_edge() {
        // Column of strong edge at the top half, weaker (between thresholds) below
        let mut img = Array3::<u8>::zeros((8, 8, 1));
        for y in 0..8 {
            for x in 4..8 {
                img[[y, x, 0]] = if y < 4 { 255 } else { 40 };
            }
        }

        let result = canny_u8(img.view(), CANNY_LOW, CANNY_HIGH);

        // Weak part (magnitude 160) survives only through connection
        assert_eq!(result[[0, 3, 0]], 255);
        assert_eq!(result[[7, 3, 0]], 255);
    }
}
