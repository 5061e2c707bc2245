//! A from-scratch implementation of the LowMC block cipher, parameterised for
//! the three Picnic security levels (L1, L3, L5).
//!
//! The crate is split into the constant-generation side (`bitstream`,
//! `algebra`, `constants`, `codec`) and the cipher side (`sbox`, `cipher`).
//! `params` ties both together by naming the three supported instances.

#[macro_use]
pub mod algebra;
pub mod bits;
pub mod bitstream;
pub mod cipher;
pub mod codec;
pub mod constants;
pub mod error;
pub mod params;
pub mod sbox;

pub use cipher::LowMc;
pub use error::{Error, Result};
pub use params::{Params, SecurityLevel};
