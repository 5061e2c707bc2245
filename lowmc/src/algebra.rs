//! Dense linear algebra over GF(2): rank and Gauss-Jordan inversion of
//! binary matrices, used to validate and invert the generated linear layers.
//!
//! A [`Matrix`] is a `Vec` of [`Vob`] rows, following the same representation
//! used elsewhere in this family of tools for bit vectors with fast set-bit
//! iteration.

use vob::Vob;

/// `matrix!` is sugar around `Matrix::from_rows()`.
#[macro_export]
macro_rules! matrix {
    [$rows:expr] => {
        $crate::algebra::Matrix::from_rows($rows)
    };
}

/// An `n x m` matrix over GF(2), stored row-major as a `Vec<Vob>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vob>,
}

impl Matrix {
    /// An all-zero matrix of the given size.
    pub fn new(rows: usize, columns: usize) -> Matrix {
        Matrix {
            rows: (0..rows).map(|_| Vob::from_elem(columns, false)).collect(),
        }
    }

    /// Build a matrix from its rows. Panics if the rows are not all the same
    /// length.
    pub fn from_rows(rows: Vec<Vob>) -> Matrix {
        if let Some(first) = rows.get(0) {
            let width = first.len();
            assert!(
                rows.iter().all(|r| r.len() == width),
                "trying to build a matrix from rows of different lengths"
            );
        }
        Matrix { rows }
    }

    /// Build a matrix by reading `rows * columns` bits off a flat stream, in
    /// row-major order. Used directly by the rejection-sampling loop in
    /// [`crate::constants`].
    pub fn from_bits(bits: &[bool], rows: usize, columns: usize) -> Matrix {
        assert_eq!(bits.len(), rows * columns);
        let mut out = Vec::with_capacity(rows);
        for chunk in bits.chunks(columns) {
            let mut row = Vob::from_elem(columns, false);
            for (i, bit) in chunk.iter().enumerate() {
                row.set(i, *bit);
            }
            out.push(row);
        }
        Matrix { rows: out }
    }

    #[inline]
    pub fn row_size(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn column_size(&self) -> usize {
        self.rows.get(0).map_or(0, Vob::len)
    }

    #[inline]
    pub fn row(&self, i: usize) -> &Vob {
        &self.rows[i]
    }

    pub fn iter_rows(&self) -> std::slice::Iter<Vob> {
        self.rows.iter()
    }

    /// Multiply this matrix by a column vector: output bit `i` is the parity
    /// of `row[i] AND vector`.
    pub fn multiply_vec(&self, vector: &Vob) -> Vob {
        assert_eq!(self.column_size(), vector.len());
        let mut out = Vob::from_elem(self.row_size(), false);
        for (i, row) in self.rows.iter().enumerate() {
            let mut masked = row.clone();
            masked.and(vector);
            let parity = masked.iter_set_bits(..).count() % 2 != 0;
            out.set(i, parity);
        }
        out
    }
}

/// The `n x n` identity matrix.
pub fn identity(n: usize) -> Matrix {
    let mut m = Matrix::new(n, n);
    for i in 0..n {
        m.rows[i].set(i, true);
    }
    m
}

/// The rank of `mat` over GF(2), by forward (non-reduced) elimination on a
/// copy: for each column, find a pivot at or below the current row, swap it
/// up, and clear the column in every row below.
pub fn rank(mat: &Matrix) -> usize {
    let mut rows = mat.rows.clone();
    let n = rows.len();
    let m = mat.column_size();
    for c in 0..m {
        if c > n.saturating_sub(1) {
            return n;
        }
        let mut r = c;
        while !rows[r][c] {
            r += 1;
            if r >= n {
                return c;
            }
        }
        rows.swap(c, r);
        for i in (c + 1)..n {
            if rows[i][c] {
                let pivot = rows[c].clone();
                rows[i].xor(&pivot);
            }
        }
    }
    m
}

/// Invert a square, full-rank matrix over GF(2) by Gauss-Jordan elimination:
/// augment with the identity, reduce to row-echelon form top-down, then
/// clear above each pivot bottom-up. Returns the augmented half, which ends
/// as `A^-1`.
///
/// Does not itself detect a non-full-rank `mat`: a missing pivot in the
/// downward pass is silently skipped (`row` just does not advance for that
/// column), so the result is a matrix that is not actually the inverse,
/// returned without error. Callers must check [`rank`] first if `mat` is not
/// already known to be full rank.
pub fn invert(mat: &Matrix) -> Matrix {
    let n = mat.row_size();
    assert_eq!(n, mat.column_size(), "only square matrices can be inverted");
    let mut a = mat.rows.clone();
    let mut inv = identity(n).rows;

    // Downward pass.
    let mut row = 0;
    for c in 0..n {
        if !a[row][c] {
            if let Some(r) = (row + 1..n).find(|&r| a[r][c]) {
                a.swap(row, r);
                inv.swap(row, r);
            } else {
                continue;
            }
        }
        for i in (row + 1)..n {
            if a[i][c] {
                let pivot_a = a[row].clone();
                a[i].xor(&pivot_a);
                let pivot_inv = inv[row].clone();
                inv[i].xor(&pivot_inv);
            }
        }
        row += 1;
    }

    // Upward pass.
    for c in (0..n).rev() {
        for r in 0..c {
            if a[r][c] {
                let pivot_a = a[c].clone();
                a[r].xor(&pivot_a);
                let pivot_inv = inv[c].clone();
                inv[r].xor(&pivot_inv);
            }
        }
    }

    Matrix { rows: inv }
}

#[cfg(test)]
mod test {
    use super::*;
    use vob::vob;

    #[test]
    fn identity_has_full_rank() {
        let id = identity(8);
        assert_eq!(rank(&id), 8);
    }

    #[test]
    fn rank_of_dependent_rows() {
        let m = matrix![vec![
            vob![true, false, true, false],
            vob![true, false, true, false],
            vob![false, true, false, true],
            vob![false, false, false, false],
        ]];
        assert_eq!(rank(&m), 2);
    }

    #[test]
    fn invert_round_trips_to_identity() {
        let m = matrix![vec![
            vob![true, true, false, false],
            vob![false, true, true, false],
            vob![false, false, true, true],
            vob![true, false, false, true],
        ]];
        assert_eq!(rank(&m), 4);
        let inv = invert(&m);
        let mut identity_check = Vec::new();
        for i in 0..4 {
            let mut e = Vob::from_elem(4, false);
            e.set(i, true);
            identity_check.push(inv.multiply_vec(&m.multiply_vec(&e)));
        }
        for (i, col) in identity_check.iter().enumerate() {
            for (j, bit) in col.iter().enumerate() {
                assert_eq!(bit, i == j);
            }
        }
    }

    #[test]
    fn multiply_vec_matches_manual_parity() {
        let m = matrix![vec![vob![true, true, false], vob![false, true, true]]];
        let v = vob![true, false, true];
        let out = m.multiply_vec(&v);
        assert_eq!(out, vob![true, true]);
    }
}
