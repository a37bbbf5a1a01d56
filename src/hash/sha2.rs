//! SHA-2 is a family of hash functions specified by [FIPS
//! 180-4](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf).
//!
//! The 32-bit members of the family ([SHA-256](Sha256), [SHA-224](Sha224))
//! and the 64-bit members ([SHA-512](Sha512), its truncated sibling
//! [SHA-512/256](Sha512Trunc256)) share the same overall shape: a message
//! schedule derived from the preimage block, 64 or 80 rounds of a fixed
//! mixing function over the internal state, and Merkle-Damgard-style length
//! padding. Only the word size, round count, round constants, rotation
//! amounts, and initial hash value differ between the two families.
//!
//! This crate uses SHA-512 as the entropy primitive for its
//! [hash-chain graph construction](crate::graph), and SHA-256 to derive the
//! [S-box affine constant](crate::sbox) and the
//! [round-key schedule](crate::roundkeys).

use {crate::hash::Hash, docext::docext};

/// The $K_t^{256}$ constants for [SHA-256](Sha256) and [SHA-224](Sha224).
#[docext]
pub const KT_256: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// The $K_t^{512}$ constants for [SHA-512](Sha512) and
/// [SHA-512/256](Sha512Trunc256).
#[docext]
pub const KT_512: [u64; 80] = [
    0x428a2f98d728ae22, 0x7137449123ef65cd, 0xb5c0fbcfec4d3b2f, 0xe9b5dba58189dbbc,
    0x3956c25bf348b538, 0x59f111f1b605d019, 0x923f82a4af194f9b, 0xab1c5ed5da6d8118,
    0xd807aa98a3030242, 0x12835b0145706fbe, 0x243185be4ee4b28c, 0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f, 0x80deb1fe3b1696b1, 0x9bdc06a725c71235, 0xc19bf174cf692694,
    0xe49b69c19ef14ad2, 0xefbe4786384f25e3, 0x0fc19dc68b8cd5b5, 0x240ca1cc77ac9c65,
    0x2de92c6f592b0275, 0x4a7484aa6ea6e483, 0x5cb0a9dcbd41fbd4, 0x76f988da831153b5,
    0x983e5152ee66dfab, 0xa831c66d2db43210, 0xb00327c898fb213f, 0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2, 0xd5a79147930aa725, 0x06ca6351e003826f, 0x142929670a0e6e70,
    0x27b70a8546d22ffc, 0x2e1b21385c26c926, 0x4d2c6dfc5ac42aed, 0x53380d139d95b3df,
    0x650a73548baf63de, 0x766a0abb3c77b2a8, 0x81c2c92e47edaee6, 0x92722c851482353b,
    0xa2bfe8a14cf10364, 0xa81a664bbc423001, 0xc24b8b70d0f89791, 0xc76c51a30654be30,
    0xd192e819d6ef5218, 0xd69906245565a910, 0xf40e35855771202a, 0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8, 0x1e376c085141ab53, 0x2748774cdf8eeb99, 0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63, 0x4ed8aa4ae3418acb, 0x5b9cca4f7763e373, 0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc, 0x78a5636f43172f60, 0x84c87814a1f0ab72, 0x8cc702081a6439ec,
    0x90befffa23631e28, 0xa4506cebde82bde9, 0xbef9a3f7b2c67915, 0xc67178f2e372532b,
    0xca273eceea26619c, 0xd186b8c721c0c207, 0xeada7dd6cde0eb1e, 0xf57d4f7fee6ed178,
    0x06f067aa72176fba, 0x0a637dc5a2c898a6, 0x113f9804bef90dae, 0x1b710b35131c471b,
    0x28db77f523047d84, 0x32caab7b40c72493, 0x3c9ebe0a15c9bebc, 0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6, 0x597f299cfc657e2a, 0x5fcb6fab3ad6faec, 0x6c44198c4a475817,
];

const BLOCK_BYTES_256: usize = 64;
const BLOCK_BYTES_512: usize = 128;

/// [SHA-256](Sha256) hash specified by FIPS 180-4.
///
/// SHA-256 is vulnerable to length-extension attacks. Used in this crate
/// purely as a fixed-output mixing/expansion primitive, never as a MAC.
#[derive(Debug, Default)]
pub struct Sha256(());

impl Hash for Sha256 {
    type Output = [u8; 32];

    fn hash(&self, input: &[u8]) -> Self::Output {
        let state = compress_256(
            input,
            [
                0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab,
                0x5be0cd19,
            ],
        );
        pack_be32(state)
    }
}

/// [SHA-224](Sha224) hash specified by FIPS 180-4: [SHA-256](Sha256) with a
/// different initial hash value, truncated to 224 bits.
#[derive(Debug, Default)]
pub struct Sha224(());

impl Hash for Sha224 {
    type Output = [u8; 28];

    fn hash(&self, input: &[u8]) -> Self::Output {
        let state = compress_256(
            input,
            [
                0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7,
                0xbefa4fa4,
            ],
        );
        let full = pack_be32(state);
        let mut out = [0; 28];
        out.copy_from_slice(&full[..28]);
        out
    }
}

/// [SHA-512](Sha512) hash specified by FIPS 180-4.
///
/// Used by [`crate::graph`] as the per-round mixing function of the seed's
/// hash chain: 64-bit words give 80 rounds of diffusion per 64-byte digest,
/// which is the entropy source the graph edges are read out of.
#[derive(Debug, Default)]
pub struct Sha512(());

impl Hash for Sha512 {
    type Output = [u8; 64];

    fn hash(&self, input: &[u8]) -> Self::Output {
        let state = compress_512(
            input,
            [
                0x6a09e667f3bcc908,
                0xbb67ae8584caa73b,
                0x3c6ef372fe94f82b,
                0xa54ff53a5f1d36f1,
                0x510e527fade682d1,
                0x9b05688c2b3e6c1f,
                0x1f83d9abfb41bd6b,
                0x5be0cd19137e2179,
            ],
        );
        pack_be64(state)
    }
}

/// SHA-512/256 hash specified by FIPS 180-4 Section 5.3.6: [SHA-512](Sha512)
/// with a distinct initial hash value (so it is not simply a truncation of
/// the SHA-512 digest), truncated to 256 bits.
///
/// Because the initial hash value differs from SHA-512's, SHA-512/256 is not
/// vulnerable to length-extension attacks the way a naive truncation would
/// be, while still running the faster 64-bit compression function on 64-bit
/// hardware.
#[derive(Debug, Default)]
pub struct Sha512Trunc256(());

impl Hash for Sha512Trunc256 {
    type Output = [u8; 32];

    fn hash(&self, input: &[u8]) -> Self::Output {
        let state = compress_512(
            input,
            [
                0x22312194fc2bf72c,
                0x9f555fa3c84c64c2,
                0x2393b86b6f53b151,
                0x963877195940eabd,
                0x96283ee2a88effe3,
                0xbe5e1e2553863992,
                0x2b0199fc2c85b8aa,
                0x0eb72ddc81c52ca2,
            ],
        );
        let full = pack_be64(state);
        let mut out = [0; 32];
        out.copy_from_slice(&full[..32]);
        out
    }
}

/// Run the [SHA-256](Sha256)/[SHA-224](Sha224) compression function over
/// every padded block of `input`, starting from `iv`.
fn compress_256(input: &[u8], iv: [u32; 8]) -> [u32; 8] {
    let mut state = iv;
    for block in pad_256(input) {
        state = round_256(state, block);
    }
    state
}

/// Run the [SHA-512](Sha512)/[SHA-512/256](Sha512Trunc256) compression
/// function over every padded block of `input`, starting from `iv`.
fn compress_512(input: &[u8], iv: [u64; 8]) -> [u64; 8] {
    let mut state = iv;
    for block in pad_512(input) {
        state = round_512(state, block);
    }
    state
}

/// One application of the 64-round SHA-256 mixing function, defined in
/// Section 6.2.2 of the FIPS 180-4 specification.
///
/// $$
/// T_1 = h + \Sigma_1^{256}(e) + Ch(e, f, g) + K_t^{256} + W_t \pmod{2^{32}}\\
/// T_2 = \Sigma_0^{256}(a) + Maj(a, b, c) \pmod{2^{32}}
/// $$
///
/// followed by the usual word rotation $h, g, f, e, d, c, b, a \gets g, f, e,
/// d + T_1, c, b, a, T_1 + T_2$, and a final modular addition of the
/// pre-round state into the post-round state (the Davies-Meyer step).
#[docext]
fn round_256(state: [u32; 8], block: [u8; BLOCK_BYTES_256]) -> [u32; 8] {
    let mut w = [0u32; 64];
    for (i, chunk) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes(chunk.try_into().unwrap());
    }
    for t in 16..64 {
        w[t] = lowercase_sigma_1_32(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(lowercase_sigma_0_32(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = state;
    for t in 0..64 {
        let t1 = h
            .wrapping_add(uppercase_sigma_1_32(e))
            .wrapping_add(ch32(e, f, g))
            .wrapping_add(KT_256[t])
            .wrapping_add(w[t]);
        let t2 = uppercase_sigma_0_32(a).wrapping_add(maj32(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    [
        state[0].wrapping_add(a),
        state[1].wrapping_add(b),
        state[2].wrapping_add(c),
        state[3].wrapping_add(d),
        state[4].wrapping_add(e),
        state[5].wrapping_add(f),
        state[6].wrapping_add(g),
        state[7].wrapping_add(h),
    ]
}

/// One application of the 80-round SHA-512 mixing function. Identical in
/// shape to [`round_256`], but over 64-bit words, with 80 rounds instead of
/// 64, [`KT_512`] instead of [`KT_256`], and different rotation amounts in
/// the $\Sigma$ and $\sigma$ helper functions.
#[docext]
fn round_512(state: [u64; 8], block: [u8; BLOCK_BYTES_512]) -> [u64; 8] {
    let mut w = [0u64; 80];
    for (i, chunk) in block.chunks_exact(8).enumerate() {
        w[i] = u64::from_be_bytes(chunk.try_into().unwrap());
    }
    for t in 16..80 {
        w[t] = lowercase_sigma_1_64(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(lowercase_sigma_0_64(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = state;
    for t in 0..80 {
        let t1 = h
            .wrapping_add(uppercase_sigma_1_64(e))
            .wrapping_add(ch64(e, f, g))
            .wrapping_add(KT_512[t])
            .wrapping_add(w[t]);
        let t2 = uppercase_sigma_0_64(a).wrapping_add(maj64(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    [
        state[0].wrapping_add(a),
        state[1].wrapping_add(b),
        state[2].wrapping_add(c),
        state[3].wrapping_add(d),
        state[4].wrapping_add(e),
        state[5].wrapping_add(f),
        state[6].wrapping_add(g),
        state[7].wrapping_add(h),
    ]
}

/// Helper function $Ch(x, y, z) = (x \land y) \oplus (\neg x \land z)$,
/// shared by every member of the SHA-2 family regardless of word size.
#[docext]
fn ch32(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ ((!x) & z)
}

fn ch64(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ ((!x) & z)
}

/// Helper function $Maj(x, y, z) = (x \land y) \oplus (x \land z) \oplus (y
/// \land z)$.
#[docext]
fn maj32(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

fn maj64(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ (x & z) ^ (y & z)
}

fn uppercase_sigma_0_32(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

fn uppercase_sigma_1_32(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

fn lowercase_sigma_0_32(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

fn lowercase_sigma_1_32(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

fn uppercase_sigma_0_64(x: u64) -> u64 {
    x.rotate_right(28) ^ x.rotate_right(34) ^ x.rotate_right(39)
}

fn uppercase_sigma_1_64(x: u64) -> u64 {
    x.rotate_right(14) ^ x.rotate_right(18) ^ x.rotate_right(41)
}

fn lowercase_sigma_0_64(x: u64) -> u64 {
    x.rotate_right(1) ^ x.rotate_right(8) ^ (x >> 7)
}

fn lowercase_sigma_1_64(x: u64) -> u64 {
    x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6)
}

fn pack_be32(state: [u32; 8]) -> [u8; 32] {
    let mut out = [0; 32];
    for (word, chunk) in state.iter().zip(out.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

fn pack_be64(state: [u64; 8]) -> [u8; 64] {
    let mut out = [0; 64];
    for (word, chunk) in state.iter().zip(out.chunks_exact_mut(8)) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// SHA-256 length padding: append `0x80`, zero-pad to 448 bits mod 512, then
/// the bit length of `input` as a big-endian 64-bit integer.
fn pad_256(input: &[u8]) -> Vec<[u8; BLOCK_BYTES_256]> {
    pad_length_bytes::<BLOCK_BYTES_256>(input, 8, |len_bytes, block| {
        block[BLOCK_BYTES_256 - 8..].copy_from_slice(&len_bytes[8..]);
    })
}

/// SHA-512 length padding: identical in spirit to [`pad_256`], but blocks are
/// 1024 bits and the trailing length field is a full 128-bit big-endian
/// integer (this crate's inputs never approach 2^64 bits, so the high 64
/// bits are always zero).
fn pad_512(input: &[u8]) -> Vec<[u8; BLOCK_BYTES_512]> {
    pad_length_bytes::<BLOCK_BYTES_512>(input, 16, |len_bytes, block| {
        block[BLOCK_BYTES_512 - 16..].copy_from_slice(len_bytes);
    })
}

fn pad_length_bytes<const BLOCK_BYTES: usize>(
    input: &[u8],
    len_field_bytes: usize,
    write_len: impl Fn(&[u8], &mut [u8; BLOCK_BYTES]),
) -> Vec<[u8; BLOCK_BYTES]> {
    // The length field always holds the bit length as a 128-bit big-endian
    // integer; callers slice out the low 64 or full 128 bits of it.
    let bit_len: u128 = (input.len() as u128).wrapping_mul(8);
    let len_bytes = bit_len.to_be_bytes();
    debug_assert!(len_field_bytes <= 16);

    let mut blocks = Vec::with_capacity(input.len() / BLOCK_BYTES + 2);
    let mut chunks = input.chunks_exact(BLOCK_BYTES);
    for chunk in chunks.by_ref() {
        blocks.push(chunk.try_into().expect("chunks_exact yields full blocks"));
    }
    let rem = chunks.remainder();

    let mut tail = [0u8; BLOCK_BYTES];
    tail[..rem.len()].copy_from_slice(rem);
    tail[rem.len()] = 0x80;

    if BLOCK_BYTES - rem.len() - 1 >= len_field_bytes {
        write_len(&len_bytes, &mut tail);
        blocks.push(tail);
    } else {
        blocks.push(tail);
        let mut last = [0u8; BLOCK_BYTES];
        write_len(&len_bytes, &mut last);
        blocks.push(last);
    }
    blocks
}

#[cfg(test)]
mod test {
    use super::*;

    fn decode_hex(hex: &str) -> Vec<u8> {
        (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn sha256_fips_vectors() {
        assert_eq!(
            Sha256::default().hash(b"").to_vec(),
            decode_hex("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
        assert_eq!(
            Sha256::default().hash(b"abc").to_vec(),
            decode_hex("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn sha224_fips_vector() {
        assert_eq!(
            Sha224::default().hash(b"abc").to_vec(),
            decode_hex("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7")
        );
    }

    #[test]
    fn sha512_fips_vectors() {
        assert_eq!(
            Sha512::default().hash(b"").to_vec(),
            decode_hex(
                "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
            )
        );
        assert_eq!(
            Sha512::default().hash(b"abc").to_vec(),
            decode_hex(
                "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
            )
        );
    }

    #[test]
    fn sha512_trunc256_fips_vectors() {
        assert_eq!(
            Sha512Trunc256::default().hash(b"").to_vec(),
            decode_hex("c672b8d1ef56ed28ab87c3622c5114069bdd3ad7b8f9737498d0c01ecef0967a")
        );
        assert_eq!(
            Sha512Trunc256::default().hash(b"abc").to_vec(),
            decode_hex("53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23")
        );
    }

    #[test]
    fn same_input_same_digest() {
        let a = Sha256::default().hash(b"determinism check");
        let b = Sha256::default().hash(b"determinism check");
        assert_eq!(a, b);
    }

    #[test]
    fn long_input_spans_multiple_blocks() {
        let input = vec![0x61u8; 1_000_003];
        let digest_a = Sha512::default().hash(&input);
        let digest_b = Sha512::default().hash(&input);
        assert_eq!(digest_a, digest_b);
    }
}
