//! Builds the full set of per-instance constants from a [`GrainSsg`]
//! bitstream, in the exact order the bitstream is consumed (it cannot be
//! rewound): linear layers, then round constants, then round-key matrices.
//! Linear-layer inverses are derived afterwards, not read from the stream.

use crate::algebra::{self, Matrix};
use crate::bitstream::GrainSsg;
use crate::params::Params;
use log::debug;
use vob::Vob;

/// Everything a [`crate::cipher::LowMc`] instance needs beyond its
/// [`Params`]: the round linear layers and their inverses, the round
/// constants, and the round-key derivation matrices.
#[derive(Clone)]
pub struct LowMcConstants {
    pub lin_matrices: Vec<Matrix>,
    pub lin_matrices_inv: Vec<Matrix>,
    pub round_constants: Vec<Vob>,
    pub key_matrices: Vec<Matrix>,
}

/// Instantiate a full-rank `rows x columns` matrix by rejection sampling:
/// read fresh bits from `gen` until the candidate matrix has full rank.
fn sample_full_rank_matrix(gen: &mut GrainSsg, rows: usize, columns: usize) -> Matrix {
    let target_rank = rows.min(columns);
    let mut attempts = 0;
    loop {
        attempts += 1;
        let bits = gen.next_bits(rows * columns);
        let candidate = Matrix::from_bits(&bits, rows, columns);
        if algebra::rank(&candidate) >= target_rank {
            if attempts > 1 {
                debug!("matrix accepted after {attempts} rejection-sampling attempts");
            }
            return candidate;
        }
    }
}

/// Generate the constants for a LowMC instance of the given `params`,
/// consuming `gen` in the order required by the specification.
pub fn generate(params: &Params, gen: &mut GrainSsg) -> LowMcConstants {
    let n = params.blocksize;
    let k = params.keysize;

    let lin_matrices: Vec<Matrix> = (0..params.rounds)
        .map(|_| sample_full_rank_matrix(gen, n, n))
        .collect();
    let lin_matrices_inv: Vec<Matrix> = lin_matrices.iter().map(algebra::invert).collect();

    let round_constants: Vec<Vob> = (0..params.rounds)
        .map(|_| {
            let bits = gen.next_bits(n);
            let mut v = Vob::from_elem(n, false);
            for (i, bit) in bits.iter().enumerate() {
                v.set(i, *bit);
            }
            v
        })
        .collect();

    let key_matrices: Vec<Matrix> = (0..=params.rounds)
        .map(|_| sample_full_rank_matrix(gen, n, k))
        .collect();

    debug!(
        "generated constants for blocksize={n} keysize={k} rounds={}",
        params.rounds
    );

    LowMcConstants {
        lin_matrices,
        lin_matrices_inv,
        round_constants,
        key_matrices,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algebra;

    #[test]
    fn generated_linear_layers_are_full_rank_and_invertible() {
        // A handful of rounds is enough to exercise the rejection-sampling
        // loop and the inversion without the full 20-round L1 cost.
        let params = Params::new(32, 32, 3);
        let mut gen = GrainSsg::new();
        let consts = generate(&params, &mut gen);
        for (lin, inv) in consts.lin_matrices.iter().zip(consts.lin_matrices_inv.iter()) {
            assert_eq!(algebra::rank(lin), params.blocksize);
            for i in 0..params.blocksize {
                let mut e = Vob::from_elem(params.blocksize, false);
                e.set(i, true);
                assert_eq!(inv.multiply_vec(&lin.multiply_vec(&e)), e);
            }
        }
    }

    #[test]
    fn consumption_order_is_deterministic() {
        let small = Params::new(32, 32, 2);
        let mut a = GrainSsg::new();
        let mut b = GrainSsg::new();
        let ca = generate(&small, &mut a);
        let cb = generate(&small, &mut b);
        assert_eq!(ca.round_constants, cb.round_constants);
    }
}
