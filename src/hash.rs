pub mod sha2;

pub use sha2::{Sha224, Sha256, Sha512, Sha512Trunc256};

/// A cryptographic hash function.
///
/// Maps an input byte string of arbitrary length to a fixed-size digest, such
/// that finding two distinct inputs with the same digest (a collision), or
/// recovering an input from its digest (a preimage), is computationally
/// infeasible.
pub trait Hash {
    type Output;

    fn hash(&self, input: &[u8]) -> Self::Output;
}
