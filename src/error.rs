//! Errors surfaced from [`crate::GraphCrypto::try_new`].

use {
    crate::hash::{Hash, Sha256},
    std::fmt,
};

/// Failure to construct a [`crate::GraphCrypto`] instance.
///
/// Only ever produced by `try_new`; every operation on an already-constructed
/// instance is total.
#[derive(Debug)]
pub enum ConstructionError {
    /// The Laplacian eigendecomposition did not converge within the fixed
    /// sweep budget.
    EigendecompositionDidNotConverge {
        seed_len: usize,
        seed_digest: [u8; 32],
    },
    /// Topology normalization degenerated because the graph had no edges at
    /// all (every feature vector was constant, and even the normalization
    /// epsilon could not produce a meaningful byte spread).
    DegenerateTopology {
        seed_len: usize,
        seed_digest: [u8; 32],
    },
}

impl ConstructionError {
    pub(crate) fn eigendecomposition_did_not_converge(seed: &[u8]) -> Self {
        Self::EigendecompositionDidNotConverge {
            seed_len: seed.len(),
            seed_digest: Sha256::default().hash(seed),
        }
    }

    pub(crate) fn degenerate_topology(seed: &[u8]) -> Self {
        Self::DegenerateTopology {
            seed_len: seed.len(),
            seed_digest: Sha256::default().hash(seed),
        }
    }
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EigendecompositionDidNotConverge {
                seed_len,
                seed_digest,
            } => write!(
                f,
                "Laplacian eigendecomposition did not converge (seed length {}, seed digest {})",
                seed_len,
                hex(seed_digest)
            ),
            Self::DegenerateTopology {
                seed_len,
                seed_digest,
            } => write!(
                f,
                "topology normalization degenerated on an edgeless graph (seed length {}, seed digest {})",
                seed_len,
                hex(seed_digest)
            ),
        }
    }
}

impl std::error::Error for ConstructionError {}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_never_includes_raw_seed_bytes() {
        let secret = b"super secret seed material";
        let err = ConstructionError::eigendecomposition_did_not_converge(secret);
        let message = err.to_string();
        assert!(!message.contains("super secret"));
        assert!(message.contains(&secret.len().to_string()));
    }
}
