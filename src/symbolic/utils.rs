use nalgebra::{DMatrix, DVector};

/// `num_values` evenly spaced points from `start` to `end`, both included.
/// The last point is exactly `end`; a single point is `start`.
pub fn linspace(start: f64, end: f64, num_values: usize) -> DVector<f64> {
    if num_values < 2 {
        return DVector::from_element(num_values, start);
    }
    let step = (end - start) / (num_values as f64 - 1.0);
    DVector::from_fn(num_values, |i, _| {
        if i == num_values - 1 {
            end
        } else {
            start + (i as f64 * step)
        }
    })
}

/// Coordinate matrices of the grid spanned by `xs` and `ys`:
/// `X[(i, j)] = xs[j]`, `Y[(i, j)] = ys[i]`.
pub fn meshgrid(xs: &DVector<f64>, ys: &DVector<f64>) -> (DMatrix<f64>, DMatrix<f64>) {
    let (nrows, ncols) = (ys.len(), xs.len());
    let x_mesh = DMatrix::from_fn(nrows, ncols, |_, j| xs[j]);
    let y_mesh = DMatrix::from_fn(nrows, ncols, |i, _| ys[i]);
    (x_mesh, y_mesh)
}
