use burn::tensor::{Tensor, TensorData, Shape};
use burn::tensor::backend::Backend;

/// Generate the homogeneous index grid of a 2D plane.
///
/// Returns a tensor of shape `[4, N]` with `N = w · h`. Column `n` holds
/// `(x, y, 0, 1)`; `x` is the outer loop and `y` the inner one, so the
/// sampled values reshape directly to `[w, h]`.
///
/// # Arguments
/// * `shape` - The plane shape `[w, h]`
/// * `device` - The device to create the tensor on
pub fn plane_index_grid<B: Backend>(shape: [usize; 2], device: &B::Device) -> Tensor<B, 2> {
    let [w, h] = shape;
    let total = w * h;

    let mut rows = vec![Vec::with_capacity(total), Vec::with_capacity(total)];
    for x in 0..w {
        for y in 0..h {
            rows[0].push(x as f32);
            rows[1].push(y as f32);
        }
    }

    let mut grid = Vec::with_capacity(total * 4);
    grid.extend(rows[0].iter());
    grid.extend(rows[1].iter());
    grid.extend(std::iter::repeat(0.0f32).take(total));
    grid.extend(std::iter::repeat(1.0f32).take(total));

    Tensor::<B, 1>::from_data(TensorData::new(grid, Shape::new([total * 4])), device)
        .reshape([4, total])
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_plane_index_grid_order() {
        let device = Default::default();
        let grid = plane_index_grid::<TestBackend>([2, 3], &device);
        assert_eq!(grid.dims(), [4, 6]);

        let values = grid.into_data().to_vec::<f32>().unwrap();
        assert_eq!(&values[0..6], &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(&values[6..12], &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        assert!(values[12..18].iter().all(|&v| v == 0.0));
        assert!(values[18..24].iter().all(|&v| v == 1.0));
    }
}
