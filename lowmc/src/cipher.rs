//! The LowMC cipher engine: encrypt/decrypt as a fixed round structure of key
//! addition, a partial S-box layer, and full-block linear multiplication.

use crate::bits::{bits_to_bytes, bytes_to_bits};
use crate::codec;
use crate::constants::{self, LowMcConstants};
use crate::error::{Error, Result};
use crate::params::{Params, SecurityLevel};
use crate::sbox;
use rand::RngCore;
use std::path::Path;
use vob::Vob;

/// A fully initialised LowMC instance: immutable parameters and constants,
/// plus an optional private key.
///
/// Once `constants` is loaded and a key is set, a `LowMc` is a pure function
/// table for the lifetime of the instance: each `encrypt`/`decrypt` call
/// allocates its own state vector and does not mutate `self`.
pub struct LowMc {
    params: Params,
    constants: LowMcConstants,
    key: Option<Vob>,
}

impl LowMc {
    /// Build an instance directly from already-generated constants. Used by
    /// the generator (to self-test immediately after generation, without a
    /// filesystem round-trip) and by tests.
    pub fn with_constants(params: Params, constants: LowMcConstants) -> Self {
        LowMc {
            params,
            constants,
            key: None,
        }
    }

    /// Load an instance from `<tag>.dat` in the current working directory.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let level = SecurityLevel::from_tag(tag)?;
        let params = level.params();
        let path = Path::new(tag).with_extension("dat");
        let constants = codec::read(&path, &params)?;
        Ok(LowMc::with_constants(params, constants))
    }

    pub fn params(&self) -> Params {
        self.params
    }

    /// Set the private key from a big-endian byte array of length
    /// `keysize / 8`.
    pub fn set_key(&mut self, key_bytes: &[u8]) -> Result<()> {
        let expected = self.params.keysize / 8;
        if key_bytes.len() != expected {
            return Err(Error::WrongLength {
                what: "private key",
                expected: self.params.keysize,
                found: key_bytes.len() * 8,
            });
        }
        self.key = Some(bytes_to_bits(key_bytes));
        Ok(())
    }

    /// Generate a fresh private key from the OS cryptographic random source
    /// and set it as this instance's key.
    pub fn generate_key(&mut self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.params.keysize / 8];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        self.key = Some(bytes_to_bits(&bytes));
        bytes
    }

    /// The current private key, if set, as big-endian bytes.
    pub fn key(&self) -> Option<Vec<u8>> {
        self.key.as_ref().map(bits_to_bytes)
    }

    fn key_bits(&self) -> Result<&Vob> {
        self.key.as_ref().ok_or(Error::KeyNotSet)
    }

    /// `k_r`, derived on the fly from the private key and round-key matrix
    /// `r`, per the key-addition formula in the spec.
    fn round_key(&self, r: usize) -> Result<Vob> {
        Ok(self.constants.key_matrices[r].multiply_vec(self.key_bits()?))
    }

    fn key_addition(&self, state: &mut Vob, r: usize) -> Result<()> {
        let round_key = self.round_key(r)?;
        state.xor(&round_key);
        Ok(())
    }

    /// Encrypt a `blocksize`-bit plaintext block.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.check_block_len(plaintext, "plaintext")?;
        let mut state = bytes_to_bits(plaintext);

        self.key_addition(&mut state, 0)?;
        for i in 0..self.params.rounds {
            sbox::apply_layer(&mut state, self.params.n_sboxes);
            state = self.constants.lin_matrices[i].multiply_vec(&state);
            state.xor(&self.constants.round_constants[i]);
            self.key_addition(&mut state, i + 1)?;
        }

        Ok(bits_to_bytes(&state))
    }

    /// Decrypt a `blocksize`-bit ciphertext block.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.check_block_len(ciphertext, "ciphertext")?;
        let mut state = bytes_to_bits(ciphertext);

        for i in (1..=self.params.rounds).rev() {
            self.key_addition(&mut state, i)?;
            state.xor(&self.constants.round_constants[i - 1]);
            state = self.constants.lin_matrices_inv[i - 1].multiply_vec(&state);
            sbox::apply_inverse_layer(&mut state, self.params.n_sboxes);
        }
        self.key_addition(&mut state, 0)?;

        Ok(bits_to_bytes(&state))
    }

    fn check_block_len(&self, block: &[u8], what: &'static str) -> Result<()> {
        let expected_bytes = self.params.blocksize / 8;
        if block.len() != expected_bytes {
            return Err(Error::WrongLength {
                what,
                expected: self.params.blocksize,
                found: block.len() * 8,
            });
        }
        Ok(())
    }
}

/// Generate a brand-new instance for `level` in memory, without touching the
/// filesystem — the path the generator CLI uses right before writing the
/// constants file out, and the path tests use to avoid file I/O.
pub fn new_instance(level: SecurityLevel) -> LowMc {
    let params = level.params();
    let mut gen = crate::bitstream::GrainSsg::new();
    let constants = constants::generate(&params, &mut gen);
    LowMc::with_constants(params, constants)
}


#[cfg(test)]
mod property_test {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]
        #[test]
        fn round_trips_for_arbitrary_key_and_block(
            key in prop::collection::vec(any::<u8>(), 16),
            block in prop::collection::vec(any::<u8>(), 16),
        ) {
            let mut lowmc = new_instance(SecurityLevel::L1);
            lowmc.set_key(&key).unwrap();
            let ciphertext = lowmc.encrypt(&block).unwrap();
            let plaintext = lowmc.decrypt(&ciphertext).unwrap();
            prop_assert_eq!(plaintext, block);
        }
    }
}
