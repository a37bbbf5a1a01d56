//! The 128-position bit permutation `π`, derived from the low half of
//! [`topo_bytes`](crate::topology::Topology::topo_bytes) and applied to the
//! SPN [state](crate::spn) once per round.

/// Number of bits a [`Permutation`] operates on, and the length of
/// [`Permutation::forward`]/[`Permutation::inverse`].
pub const NUM_BITS: usize = 128;

/// A bijection `{0,...,127} -> {0,...,127}`, plus its precomputed inverse.
pub struct Permutation {
    /// `forward[k]` is the source bit position that output position `k`
    /// reads from.
    forward: [u8; NUM_BITS],
    /// `inverse[forward[k]] == k`.
    inverse: [u8; NUM_BITS],
}

impl Permutation {
    /// Build `π` from the first 128 bytes of `topo_bytes`: pair each byte
    /// with its index, stable-sort ascending by byte value (equal values
    /// keep their original relative order, i.e. break ties by index), and
    /// read `π[k]` off the sorted sequence's `k`-th original index.
    pub fn from_topo_bytes(topo_bytes: &[u8; crate::graph::NUM_VERTICES]) -> Self {
        let mut indexed: Vec<(u8, u8)> = topo_bytes[..NUM_BITS]
            .iter()
            .enumerate()
            .map(|(i, &b)| (b, i as u8))
            .collect();
        indexed.sort_by_key(|&(value, _)| value);

        let mut forward = [0u8; NUM_BITS];
        for (k, &(_, original_index)) in indexed.iter().enumerate() {
            forward[k] = original_index;
        }

        let mut inverse = [0u8; NUM_BITS];
        for (k, &source) in forward.iter().enumerate() {
            inverse[source as usize] = k as u8;
        }

        Self { forward, inverse }
    }

    /// Apply `π` to a 128-bit state: `out[k] = state[π[k]]`, where bit `i`
    /// of the state is byte `i / 8`, bit `i % 8` (LSB-first within the
    /// byte, byte 0 first across the array).
    pub fn apply(&self, state: &[u8; 16]) -> [u8; 16] {
        permute(state, &self.forward)
    }

    /// Apply `π⁻¹`, undoing [`apply`](Self::apply).
    pub fn invert(&self, state: &[u8; 16]) -> [u8; 16] {
        permute(state, &self.inverse)
    }
}

fn permute(state: &[u8; 16], table: &[u8; NUM_BITS]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (k, &source) in table.iter().enumerate() {
        if get_bit(state, source) {
            set_bit(&mut out, k as u8);
        }
    }
    out
}

fn get_bit(state: &[u8; 16], index: u8) -> bool {
    let byte = index as usize / 8;
    let bit = index as usize % 8;
    state[byte] & (1 << bit) != 0
}

fn set_bit(state: &mut [u8; 16], index: u8) {
    let byte = index as usize / 8;
    let bit = index as usize % 8;
    state[byte] |= 1 << bit;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn forward_is_a_bijection_of_0_to_127() {
        let topo_bytes = std::array::from_fn(|i| (i * 37 % 256) as u8);
        let perm = Permutation::from_topo_bytes(&topo_bytes);
        let mut seen = [false; NUM_BITS];
        for &v in perm.forward.iter() {
            assert!(!seen[v as usize], "duplicate target {v}");
            seen[v as usize] = true;
        }
    }

    #[test]
    fn invert_undoes_apply() {
        let topo_bytes = std::array::from_fn(|i| (i * 37 % 256) as u8);
        let perm = Permutation::from_topo_bytes(&topo_bytes);
        let state: [u8; 16] = std::array::from_fn(|i| (i * 17 + 3) as u8);
        let permuted = perm.apply(&state);
        assert_eq!(perm.invert(&permuted), state);
    }

    #[test]
    fn constant_topo_bytes_yields_identity() {
        let topo_bytes = [0u8; crate::graph::NUM_VERTICES];
        let perm = Permutation::from_topo_bytes(&topo_bytes);
        for (k, &source) in perm.forward.iter().enumerate() {
            assert_eq!(source, k as u8);
        }
    }
}
