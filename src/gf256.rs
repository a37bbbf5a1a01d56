//! Arithmetic in the Galois field $GF(2^8)$ reduced modulo the AES polynomial
//! $m(x) = x^8 + x^4 + x^3 + x + 1 \equiv \mathrm{1b_{16}}$.
//!
//! Addition in this field is XOR. Multiplication by the trivial polynomial $x$
//! (`0x02`) is a left shift with a conditional reduction, exactly as in AES's
//! own [MixColumns](crate::spn::mix_columns) step; every other multiplier used
//! by this crate is built out of repeated applications of it. See
//! `cipher/block/aes.rs` in this crate's history for the original derivation
//! of this identity.

use docext::docext;

/// Multiply `b` by `0x02` in $GF(2^8)$.
///
/// Implemented as a left shift with a conditional XOR against the reduction
/// polynomial `0x1b` when the high bit would otherwise overflow the field.
#[docext]
pub fn xtime(b: u8) -> u8 {
    let shifted = b << 1;
    if b & 0x80 != 0 {
        shifted ^ 0x1b
    } else {
        shifted
    }
}

/// Multiply `b` by `0x03` in $GF(2^8)$.
///
/// $03_{16} = 02_{16} \oplus 01_{16}$, so this is `xtime(b) ^ b`.
#[docext]
pub fn times_03(b: u8) -> u8 {
    xtime(b) ^ b
}

pub fn times_02(b: u8) -> u8 {
    xtime(b)
}
