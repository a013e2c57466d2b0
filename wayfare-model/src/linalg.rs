//! Dense linear solves for the Newton step.
#![expect(
    clippy::float_arithmetic,
    clippy::indexing_slicing,
    reason = "Gaussian elimination indexes a fixed-size square system"
)]

/// Solve `matrix · x = rhs` by Gaussian elimination with partial pivoting.
///
/// Returns `None` when a pivot falls below a tolerance relative to the
/// largest entry, i.e. when the system is singular or numerically so.
pub(crate) fn solve<const N: usize>(
    mut matrix: [[f64; N]; N],
    mut rhs: [f64; N],
) -> Option<[f64; N]> {
    let scale = matrix
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, value| acc.max(value.abs()));
    if !scale.is_finite() || scale == 0.0 {
        return None;
    }
    let threshold = f64::EPSILON * scale * dimension::<N>();

    for col in 0..N {
        let pivot =
            (col..N).max_by(|&a, &b| matrix[a][col].abs().total_cmp(&matrix[b][col].abs()))?;
        if matrix[pivot][col].abs() <= threshold {
            return None;
        }
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);
        for row in (col + 1)..N {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..N {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut solution = [0.0_f64; N];
    for row in (0..N).rev() {
        let tail: f64 = ((row + 1)..N).map(|k| matrix[row][k] * solution[k]).sum();
        solution[row] = (rhs[row] - tail) / matrix[row][row];
    }
    solution.iter().all(|v| v.is_finite()).then_some(solution)
}

fn dimension<const N: usize>() -> f64 {
    u32::try_from(N).map_or(f64::MAX, f64::from)
}
