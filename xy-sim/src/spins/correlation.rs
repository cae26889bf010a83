use super::SpinField;

/// Mean nearest-neighbor spin correlation ⟨cos(θᵢ − θⱼ)⟩.
///
/// Sums `cos(θ(i,j) − θ(i+1,j)) + cos(θ(i,j) − θ(i,j+1))` over every site
/// (periodic +1 neighbors), i.e. each of the `2n²` bonds once, and divides by
/// `2n²`. The result lies in `[-1, 1]`; the XY energy per site is
/// `-2 * spin_correlation`.
pub fn spin_correlation(field: &SpinField) -> f64 {
    let n = field.n();
    let angles = field.angles();
    let mut total = 0.0f64;

    for i in 0..n {
        let row = i * n;
        let next_row = if i + 1 == n { 0 } else { row + n };
        for j in 0..n {
            let next_col = if j + 1 == n { 0 } else { j + 1 };
            let theta = angles[row + j];
            total += (theta - angles[next_row + j]).cos() + (theta - angles[row + next_col]).cos();
        }
    }

    total / (2 * n * n) as f64
}
