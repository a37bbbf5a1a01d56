//! Derivation of the 13 round keys consumed by
//! [`AddRoundKey`](crate::spn::add_round_key) from the seed and the topology
//! digest.

use crate::hash::{Hash, Sha256};

/// Number of round keys (12 SPN rounds plus the initial whitening key).
pub const NUM_ROUND_KEYS: usize = 13;

/// Derive `RK[0..=12]`.
///
/// `anchor = SHA-256(seed || topo_bytes[0..32])`, then `RK[r] =
/// SHA-256(anchor || "RK" || byte(r))[0..16]`.
pub fn derive(seed: &[u8], topo_bytes: &[u8; 256]) -> [[u8; 16]; NUM_ROUND_KEYS] {
    let sha256 = Sha256::default();

    let mut anchor_preimage = seed.to_vec();
    anchor_preimage.extend_from_slice(&topo_bytes[..32]);
    let anchor = sha256.hash(&anchor_preimage);

    std::array::from_fn(|r| {
        let mut preimage = anchor.to_vec();
        preimage.extend_from_slice(b"RK");
        preimage.push(r as u8);
        let digest = sha256.hash(&preimage);
        let mut key = [0u8; 16];
        key.copy_from_slice(&digest[..16]);
        key
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deterministic_in_seed_and_topology() {
        let topo_bytes = [7u8; 256];
        let a = derive(b"seed", &topo_bytes);
        let b = derive(b"seed", &topo_bytes);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_round_keys() {
        let topo_bytes = std::array::from_fn(|i| i as u8);
        let keys = derive(b"seed", &topo_bytes);
        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                assert_ne!(keys[i], keys[j], "RK[{i}] == RK[{j}]");
            }
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let topo_bytes = [0u8; 256];
        let a = derive(b"seed-a", &topo_bytes);
        let b = derive(b"seed-b", &topo_bytes);
        assert_ne!(a, b);
    }
}
