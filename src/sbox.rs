//! Construction of the 256-entry substitution box `S` used by
//! [`SubBytes`](crate::spn::sub_bytes), and the differential-uniformity /
//! nonlinearity diagnostics used to verify it.
//!
//! The canonical construction (and the only one with a reproducibility
//! guarantee) is [`SboxMode::Affine`]: an affine transform over $GF(2)$
//! composed on top of the [AES S-box](crate::aesconsts::AES_SBOX). Affine
//! equivalence preserves differential uniformity and nonlinearity, so the
//! resulting table inherits the AES S-box's optimal values (DU 4, NL 112) for
//! free. [`SboxMode::Direct`] and [`SboxMode::Hybrid`] are experimental
//! alternatives with no such guarantee; see [`crate::config`].

use crate::{aesconsts, config::SboxMode, hash::{Hash, Sha256}};

/// Build the S-box for the given `mode` from `topo_bytes` and the first 8
/// absolute Laplacian eigenvalues.
pub fn build(topo_bytes: &[u8; 256], laplacian_spectrum: &[f64; 256], mode: SboxMode) -> [u8; 256] {
    match mode {
        SboxMode::Affine => build_affine(topo_bytes, laplacian_spectrum),
        SboxMode::Direct => build_direct(topo_bytes),
        SboxMode::Hybrid => {
            let affine = build_affine(topo_bytes, laplacian_spectrum);
            let direct = build_direct(topo_bytes);
            fixup_to_permutation(&affine, &direct)
        }
    }
}

/// The canonical construction: `S[x] = affine_matrix(AES_SBOX[x]) XOR b`,
/// where `b` mixes a hash of the topology digest with the magnitude of the
/// graph's low-frequency Laplacian eigenvalues.
fn build_affine(topo_bytes: &[u8; 256], laplacian_spectrum: &[f64; 256]) -> [u8; 256] {
    let b0 = Sha256::default().hash(topo_bytes)[0];

    let e: [f64; 8] = std::array::from_fn(|i| laplacian_spectrum[i].abs());
    let e_max = e.iter().cloned().fold(0.0, f64::max);
    let l: [u8; 8] = if e_max > 0.0 {
        std::array::from_fn(|i| (255.0 * e[i] / e_max).round() as u8)
    } else {
        [0u8; 8]
    };
    let b = l.iter().fold(b0, |acc, &li| acc ^ li);

    std::array::from_fn(|x| aesconsts::apply_affine_matrix(aesconsts::AES_SBOX[x]) ^ b)
}

/// A non-canonical construction: a Fisher-Yates shuffle of the identity
/// permutation, driven by a hash chain seeded from `topo_bytes`. Carries no
/// differential-uniformity or nonlinearity guarantee; offered purely for
/// experimentation behind [`SboxMode::Direct`].
fn build_direct(topo_bytes: &[u8; 256]) -> [u8; 256] {
    let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
    let mut rng = HashChainStream::new(topo_bytes);

    for i in (1..table.len()).rev() {
        let j = rng.next_below(i as u32 + 1) as usize;
        table.swap(i, j);
    }

    table
}

/// Combine `affine` and `direct` by XOR, then repair the result into a
/// permutation: whenever a value collides with one already assigned, the
/// first unused value (scanning up from that value, wrapping at 256) takes
/// its place. Processed in ascending input order, so the result is a
/// deterministic function of the two input tables.
fn fixup_to_permutation(affine: &[u8; 256], direct: &[u8; 256]) -> [u8; 256] {
    let mut out = [0u8; 256];
    let mut used = [false; 256];

    for x in 0..256 {
        let candidate = affine[x] ^ direct[x];
        let mut value = candidate;
        while used[value as usize] {
            value = value.wrapping_add(1);
        }
        out[x] = value;
        used[value as usize] = true;
    }

    out
}

/// A deterministic byte stream driven by repeated SHA-256 hashing of
/// `topo_bytes` concatenated with a round counter, used to seed the
/// Fisher-Yates shuffle in [`build_direct`].
struct HashChainStream {
    digest: [u8; 32],
    offset: usize,
    round: u8,
    seed: [u8; 256],
}

impl HashChainStream {
    fn new(topo_bytes: &[u8; 256]) -> Self {
        let mut stream = Self {
            digest: [0u8; 32],
            offset: 32,
            round: 0,
            seed: *topo_bytes,
        };
        stream.refill();
        stream
    }

    fn refill(&mut self) {
        let mut preimage = self.seed.to_vec();
        preimage.push(self.round);
        self.digest = Sha256::default().hash(&preimage);
        self.round = self.round.wrapping_add(1);
        self.offset = 0;
    }

    fn next_byte(&mut self) -> u8 {
        if self.offset == self.digest.len() {
            self.refill();
        }
        let byte = self.digest[self.offset];
        self.offset += 1;
        byte
    }

    /// Sample a uniform integer in `0..bound` via rejection sampling over
    /// bytes from the hash chain.
    fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0 && bound <= 256);
        let limit = 256 - (256 % bound);
        loop {
            let candidate = self.next_byte() as u32;
            if candidate < limit {
                return candidate % bound;
            }
        }
    }
}

/// Maximum, over all nonzero input differences `a` and all output
/// differences `b`, of `|{x : S(x XOR a) XOR S(x) = b}|`.
///
/// Optimal (lowest achievable) for an 8-bit bijection is 4.
pub fn differential_uniformity(s: &[u8; 256]) -> u32 {
    let mut max_count = 0u32;
    for a in 1..=255u16 {
        let a = a as u8;
        let mut counts = [0u32; 256];
        for x in 0..=255u16 {
            let x = x as u8;
            let b = s[(x ^ a) as usize] ^ s[x as usize];
            counts[b as usize] += 1;
        }
        let local_max = counts.iter().cloned().max().unwrap_or(0);
        max_count = max_count.max(local_max);
    }
    max_count
}

/// Nonlinearity of `s`: the minimum, over every nonzero linear combination of
/// output bits, of that Boolean function's distance to the nearest affine
/// function. Computed via the Walsh-Hadamard spectrum.
///
/// Optimal (highest achievable) for an 8-bit bijection is 112.
pub fn nonlinearity(s: &[u8; 256]) -> u32 {
    let mut min_nl = u32::MAX;
    for b in 1..=255u16 {
        let b = b as u8;
        let mut max_walsh = 0i32;
        for a in 0..=255u16 {
            let a = a as u8;
            let mut sum = 0i32;
            for x in 0..=255u16 {
                let x = x as u8;
                let f = (b & s[x as usize]).count_ones() % 2;
                let l = (a & x).count_ones() % 2;
                sum += if f == l { 1 } else { -1 };
            }
            max_walsh = max_walsh.max(sum.abs());
        }
        let nl = 128 - max_walsh / 2;
        min_nl = min_nl.min(nl as u32);
    }
    min_nl
}

#[cfg(test)]
mod test {
    use super::*;

    fn dummy_topo_bytes() -> [u8; 256] {
        std::array::from_fn(|i| (i * 101 + 7) as u8)
    }

    fn dummy_spectrum() -> [f64; 256] {
        std::array::from_fn(|i| i as f64 * 0.5)
    }

    #[test]
    fn affine_mode_is_a_permutation_of_aes_sbox_values() {
        let s = build_affine(&dummy_topo_bytes(), &dummy_spectrum());
        let mut seen = [false; 256];
        for &v in s.iter() {
            assert!(!seen[v as usize]);
            seen[v as usize] = true;
        }
    }

    #[test]
    fn affine_mode_preserves_aes_cryptanalytic_properties() {
        let s = build_affine(&dummy_topo_bytes(), &dummy_spectrum());
        assert_eq!(differential_uniformity(&s), 4);
        assert_eq!(nonlinearity(&s), 112);
    }

    #[test]
    fn direct_mode_is_a_permutation() {
        let s = build_direct(&dummy_topo_bytes());
        let mut seen = [false; 256];
        for &v in s.iter() {
            assert!(!seen[v as usize]);
            seen[v as usize] = true;
        }
    }

    #[test]
    fn hybrid_mode_is_a_permutation() {
        let s = build(&dummy_topo_bytes(), &dummy_spectrum(), SboxMode::Hybrid);
        let mut seen = [false; 256];
        for &v in s.iter() {
            assert!(!seen[v as usize]);
            seen[v as usize] = true;
        }
    }

    #[test]
    fn aes_sbox_itself_has_known_du_and_nl() {
        assert_eq!(differential_uniformity(&aesconsts::AES_SBOX), 4);
        assert_eq!(nonlinearity(&aesconsts::AES_SBOX), 112);
    }
}
