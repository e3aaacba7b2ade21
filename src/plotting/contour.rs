//! Level lines of a sampled function by marching squares.
//!
//! Every grid cell is looked at on its own: the level crosses an edge where
//! the corner values lie on different sides of it, the crossing point is found
//! by linear interpolation. Cells with a non-finite corner are skipped, so
//! regions where the function is undefined leave gaps instead of spurious
//! lines.
use nalgebra::{DMatrix, DVector};

/// straight piece of a level line, in data coordinates
pub type Segment = ((f64, f64), (f64, f64));

fn crossing(pa: (f64, f64), za: f64, pb: (f64, f64), zb: f64, level: f64) -> Option<(f64, f64)> {
    if (za > level) == (zb > level) {
        return None;
    }
    let t = (level - za) / (zb - za);
    Some((pa.0 + t * (pb.0 - pa.0), pa.1 + t * (pb.1 - pa.1)))
}

/// Segments of the line `values == level`.
/// `values[(i, j)]` is the sample at `(xs[j], ys[i])`.
pub fn contour_segments(
    xs: &DVector<f64>,
    ys: &DVector<f64>,
    values: &DMatrix<f64>,
    level: f64,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let (nrows, ncols) = values.shape();
    if nrows < 2 || ncols < 2 || xs.len() != ncols || ys.len() != nrows {
        return segments;
    }
    for i in 0..nrows - 1 {
        for j in 0..ncols - 1 {
            let z00 = values[(i, j)];
            let z01 = values[(i, j + 1)];
            let z10 = values[(i + 1, j)];
            let z11 = values[(i + 1, j + 1)];
            if !(z00.is_finite() && z01.is_finite() && z10.is_finite() && z11.is_finite()) {
                continue;
            }
            let p00 = (xs[j], ys[i]);
            let p01 = (xs[j + 1], ys[i]);
            let p10 = (xs[j], ys[i + 1]);
            let p11 = (xs[j + 1], ys[i + 1]);
            // bottom, right, top, left
            let edges = [
                crossing(p00, z00, p01, z01, level),
                crossing(p01, z01, p11, z11, level),
                crossing(p10, z10, p11, z11, level),
                crossing(p00, z00, p10, z10, level),
            ];
            let points: Vec<(usize, (f64, f64))> = edges
                .iter()
                .enumerate()
                .filter_map(|(k, p)| p.map(|p| (k, p)))
                .collect();
            match points.len() {
                2 => segments.push((points[0].1, points[1].1)),
                4 => {
                    // saddle: the cell centre decides which corners are joined
                    let centre = (z00 + z01 + z10 + z11) / 4.0;
                    if (centre > level) == (z00 > level) {
                        segments.push((points[0].1, points[1].1));
                        segments.push((points[2].1, points[3].1));
                    } else {
                        segments.push((points[0].1, points[3].1));
                        segments.push((points[1].1, points[2].1));
                    }
                }
                _ => {}
            }
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::utils::{linspace, meshgrid};

    #[test]
    fn test_circle_segments_lie_on_circle() {
        let axis = linspace(-10.0, 10.0, 201);
        let (x, y) = meshgrid(&axis, &axis);
        let values = x.zip_map(&y, |x, y| x * x + y * y - 4.0);
        let segments = contour_segments(&axis, &axis, &values, 0.0);
        assert!(!segments.is_empty());
        for (a, b) in segments {
            for p in [a, b] {
                let r = (p.0 * p.0 + p.1 * p.1).sqrt();
                assert!((r - 2.0).abs() < 0.05, "point {:?} off the circle", p);
            }
        }
    }

    #[test]
    fn test_straight_line() {
        let xs = DVector::from_vec(vec![0.0, 1.0, 2.0]);
        let ys = DVector::from_vec(vec![0.0, 1.0]);
        // f = x - 0.5, crosses only the first column of cells
        let values = DMatrix::from_fn(2, 3, |_, j| xs[j] - 0.5);
        let segments = contour_segments(&xs, &ys, &values, 0.0);
        assert_eq!(segments.len(), 1);
        let ((x0, _), (x1, _)) = segments[0];
        assert_eq!(x0, 0.5);
        assert_eq!(x1, 0.5);
    }

    #[test]
    fn test_nan_cells_are_skipped() {
        let xs = DVector::from_vec(vec![0.0, 1.0]);
        let ys = DVector::from_vec(vec![0.0, 1.0]);
        let values = DMatrix::from_row_slice(2, 2, &[-1.0, 1.0, f64::NAN, 1.0]);
        assert!(contour_segments(&xs, &ys, &values, 0.0).is_empty());
    }

    #[test]
    fn test_saddle_gives_two_segments() {
        let xs = DVector::from_vec(vec![0.0, 1.0]);
        let ys = DVector::from_vec(vec![0.0, 1.0]);
        let values = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
        assert_eq!(contour_segments(&xs, &ys, &values, 0.0).len(), 2);
    }

    #[test]
    fn test_mismatched_axes_give_nothing() {
        let xs = DVector::from_vec(vec![0.0, 1.0, 2.0]);
        let ys = DVector::from_vec(vec![0.0, 1.0]);
        let values = DMatrix::from_element(2, 2, 1.0);
        assert!(contour_segments(&xs, &ys, &values, 0.0).is_empty());
    }
}
