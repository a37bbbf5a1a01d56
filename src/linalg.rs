//! A minimal dense linear algebra kernel, just large enough to extract the
//! [Laplacian spectrum](crate::topology) of the 256-vertex graph.
//!
//! This crate intentionally carries no BLAS/LAPACK-style dependency: the only
//! numeric operation the design needs is the eigenvalues (not eigenvectors)
//! of one dense symmetric 256x256 matrix, computed once at construction. The
//! classical cyclic Jacobi eigenvalue algorithm (see Press et al., *Numerical
//! Recipes*, §11.1, "Jacobi Transformations of a Symmetric Matrix") is a
//! direct, self-contained fit: it operates purely by a sequence of plane
//! rotations that zero out off-diagonal entries, converges reliably for
//! symmetric matrices without requiring a prior tridiagonalization pass, and
//! is easy to reason about sweep-by-sweep.
//!
//! Floating-point rounding in the eigenvalue computation is the one place
//! where this crate's byte-level reproducibility is only as strong as IEEE
//! 754 `f64` arithmetic itself: ties in the sorted spectrum, and the exact
//! rotation order within a sweep, can in principle diverge a few ULPs across
//! wildly different hardware. Fixing the algorithm (rather than leaving it to
//! "whatever the platform's eigensolver does") is what keeps this
//! implementation internally reproducible.

const MAX_SWEEPS: usize = 100;
const CONVERGENCE_EPS: f64 = 1e-10;

/// Compute the eigenvalues of the dense symmetric matrix `a`, sorted
/// ascending.
///
/// `a` is consumed (and destroyed) by the rotation sweeps; only the
/// eigenvalues are returned, since nothing in this crate needs the
/// eigenvectors. Panics are never raised on non-convergence; callers that
/// need to detect it should use
/// [`symmetric_eigenvalues_with_convergence`].
pub fn symmetric_eigenvalues(a: Vec<Vec<f64>>) -> Vec<f64> {
    symmetric_eigenvalues_with_convergence(a).0
}

/// As [`symmetric_eigenvalues`], but also reports whether the off-diagonal
/// norm fell below [`CONVERGENCE_EPS`] within [`MAX_SWEEPS`] sweeps. `false`
/// means the returned eigenvalues are the best approximation reached within
/// the sweep budget, not a converged result.
pub fn symmetric_eigenvalues_with_convergence(mut a: Vec<Vec<f64>>) -> (Vec<f64>, bool) {
    let n = a.len();
    debug_assert!(a.iter().all(|row| row.len() == n), "matrix must be square");

    let mut converged = false;
    for _ in 0..MAX_SWEEPS {
        let off_diagonal_norm: f64 = (0..n)
            .flat_map(|p| (p + 1..n).map(move |q| (p, q)))
            .map(|(p, q)| a[p][q] * a[p][q])
            .sum();
        if off_diagonal_norm.sqrt() < CONVERGENCE_EPS {
            converged = true;
            break;
        }

        for p in 0..n {
            for q in p + 1..n {
                jacobi_rotate(&mut a, p, q);
            }
        }
    }

    let mut eigenvalues: Vec<f64> = (0..n).map(|i| a[i][i]).collect();
    eigenvalues.sort_by(|x, y| x.partial_cmp(y).expect("NaN eigenvalue"));
    (eigenvalues, converged)
}

/// Apply a single Jacobi plane rotation in the `(p, q)` plane that zeros out
/// `a[p][q]` (and, by symmetry, `a[q][p]`), updating every other entry that
/// the rotation touches in place.
fn jacobi_rotate(a: &mut [Vec<f64>], p: usize, q: usize) {
    let apq = a[p][q];
    if apq == 0.0 {
        return;
    }

    let theta = (a[q][q] - a[p][p]) / (2.0 * apq);
    let t = if theta >= 0.0 {
        1.0 / (theta + (theta * theta + 1.0).sqrt())
    } else {
        -1.0 / (-theta + (theta * theta + 1.0).sqrt())
    };
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;
    let tau = s / (1.0 + c);

    a[p][p] -= t * apq;
    a[q][q] += t * apq;
    a[p][q] = 0.0;
    a[q][p] = 0.0;

    let n = a.len();
    for i in 0..n {
        if i == p || i == q {
            continue;
        }
        let aip = a[i][p];
        let aiq = a[i][q];
        a[i][p] = aip - s * (aiq + tau * aip);
        a[p][i] = a[i][p];
        a[i][q] = aiq + s * (aip - tau * aiq);
        a[q][i] = a[i][q];
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn diagonal_matrix_is_a_fixed_point() {
        let a = vec![
            vec![3.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 2.0],
        ];
        assert_eq!(symmetric_eigenvalues(a), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn two_by_two_matches_closed_form() {
        // Eigenvalues of [[2, 1], [1, 2]] are 1 and 3.
        let a = vec![vec![2.0, 1.0], vec![1.0, 2.0]];
        let eigen = symmetric_eigenvalues(a);
        assert!((eigen[0] - 1.0).abs() < 1e-6);
        assert!((eigen[1] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn path_graph_laplacian() {
        // Laplacian of the 3-vertex path 0-1-2: eigenvalues 0, 1, 3.
        let a = vec![
            vec![1.0, -1.0, 0.0],
            vec![-1.0, 2.0, -1.0],
            vec![0.0, -1.0, 1.0],
        ];
        let eigen = symmetric_eigenvalues(a);
        assert!((eigen[0] - 0.0).abs() < 1e-6);
        assert!((eigen[1] - 1.0).abs() < 1e-6);
        assert!((eigen[2] - 3.0).abs() < 1e-6);
    }
}
