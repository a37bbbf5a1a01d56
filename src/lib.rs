//! A deterministic pseudorandom byte generator and block cipher whose key
//! schedule and substitution/permutation primitives are all derived from the
//! topology of a seed-generated undirected graph on 256 vertices.
//!
//! Construction runs a fixed pipeline, leaf-first:
//!
//! 1. [`graph`]: hash the seed into a chain of SHA-512 digests and read edges
//!    out of them, producing an undirected graph on 256 vertices.
//! 2. [`topology`]: extract degree, local clustering, betweenness
//!    centrality, and the Laplacian spectrum of that graph, normalize each to
//!    a byte per vertex, and fuse the four vectors by XOR into `topo_bytes`.
//! 3. [`sbox`] and [`permutation`]: derive the substitution box and the
//!    128-bit bit permutation from `topo_bytes`.
//! 4. [`roundkeys`]: derive the 13 round keys from the seed and `topo_bytes`.
//! 5. [`spn`]: the 12-round substitution-permutation network built from the
//!    above, applied in [counter mode](GraphCrypto::generate_block) to
//!    produce a keystream, or directly to [encrypt](GraphCrypto::encrypt)
//!    caller-supplied blocks.
//!
//! Every one of those steps is a pure function of the seed; the only mutable
//! state in a constructed [`GraphCrypto`] is its counter. Two instances built
//! from the same seed produce bit-identical output.

mod aesconsts;
mod config;
mod error;
mod gf256;
mod graph;
mod hash;
mod linalg;
mod permutation;
mod roundkeys;
mod sbox;
mod spn;
mod topology;

pub use {
    config::{Config, SboxMode},
    error::ConstructionError,
    sbox::{differential_uniformity, nonlinearity},
};

use {graph::Graph, permutation::Permutation, roundkeys::NUM_ROUND_KEYS, topology::Topology};

/// Diagnostic snapshot returned by [`GraphCrypto::stats`].
///
/// Exists so the surrounding demo/analysis layer this crate's core does not
/// own (heatmaps, JSON reports) has something to read without reaching into
/// private fields; it carries no data that isn't already implied by the
/// seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Always [`graph::NUM_VERTICES`] (256); included for convenience at the
    /// call site rather than forcing callers to hardcode it.
    pub nodes: usize,
    /// `|E(G)|` of the seed-generated graph.
    pub edges: u32,
    /// `|{x : S[x] != AES_SBOX[x]}|`, i.e. how far the derived S-box drifted
    /// from the stock AES S-box it was built on top of.
    pub sbox_diff_from_aes: u32,
}

/// A constructed instance of the cipher: an immutable seed-derived S-box,
/// bit permutation, and round-key schedule, plus a mutable 128-bit counter.
///
/// Construction ([`new`](Self::new)/[`try_new`](Self::try_new)) does all the
/// expensive work (graph construction, topology extraction, including the
/// `O(V^3)` Laplacian eigendecomposition); every method afterwards is a fast,
/// total function of the counter.
pub struct GraphCrypto {
    sbox: [u8; 256],
    pi: Permutation,
    round_keys: [[u8; 16]; NUM_ROUND_KEYS],
    counter: u128,
    num_edges: u32,
}

impl GraphCrypto {
    /// Construct an instance from `seed` using [`Config::default`] (affine
    /// S-box mode).
    ///
    /// Panics on the same conditions [`try_new`](Self::try_new) reports as a
    /// [`ConstructionError`] — non-convergence of the Laplacian
    /// eigendecomposition, or a pathologically edgeless graph. Neither is
    /// expected to occur for a 256-vertex graph built from the 48-round hash
    /// chain in [`graph`]; callers that need to handle the (practically
    /// unreachable) failure explicitly should call [`try_new`](Self::try_new).
    pub fn new(seed: &[u8]) -> Self {
        match Self::try_new(seed, Config::default()) {
            Ok(instance) => instance,
            Err(err) => panic!("{err}"),
        }
    }

    /// Construct an instance from `seed` under an explicit [`Config`].
    pub fn try_new(seed: &[u8], config: Config) -> Result<Self, ConstructionError> {
        let graph = Graph::from_seed(seed);
        if config.log_construction_enabled() {
            log::debug!(
                "graph built: {} edges over {} vertices",
                graph.num_edges(),
                graph.num_vertices()
            );
        }
        if graph.num_edges() == 0 {
            return Err(ConstructionError::degenerate_topology(seed));
        }

        let topology = Topology::extract(&graph);
        if !topology.eigendecomposition_converged {
            return Err(ConstructionError::eigendecomposition_did_not_converge(seed));
        }
        if config.log_construction_enabled() {
            log::trace!("topology extracted, {} eigenvalues", topology.laplacian_spectrum.len());
        }

        let sbox = sbox::build(
            &topology.topo_bytes,
            &topology.laplacian_spectrum,
            config.sbox_mode_value(),
        );
        let pi = Permutation::from_topo_bytes(&topology.topo_bytes);
        let round_keys = roundkeys::derive(seed, &topology.topo_bytes);
        if config.log_construction_enabled() {
            log::debug!(
                "S-box ({:?} mode), bit permutation, and {} round keys derived",
                config.sbox_mode_value(),
                round_keys.len()
            );
        }

        Ok(Self {
            sbox,
            pi,
            round_keys,
            counter: 0,
            num_edges: graph.num_edges(),
        })
    }

    /// Encrypt the current counter value and advance the counter by one.
    ///
    /// The counter is encoded as a 16-byte big-endian integer, run through
    /// the 12-round [SPN](spn::encrypt_block), then incremented modulo
    /// `2^128`.
    pub fn generate_block(&mut self) -> [u8; 16] {
        let state = self.counter.to_be_bytes();
        let block = spn::encrypt_block(state, &self.sbox, &self.pi, &self.round_keys);
        self.counter = self.counter.wrapping_add(1);
        block
    }

    /// Produce `n` bytes of keystream: `ceil(n / 16)` blocks of
    /// [`generate_block`](Self::generate_block), concatenated and truncated
    /// to exactly `n` bytes.
    pub fn generate_bytes(&mut self, n: u64) -> Vec<u8> {
        let n = n as usize;
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            out.extend_from_slice(&self.generate_block());
        }
        out.truncate(n);
        out
    }

    /// Encrypt `plaintext` by XORing it with keystream blocks.
    ///
    /// The final chunk is zero-padded up to 16 bytes before XORing, so the
    /// output length is always `plaintext.len()` rounded up to the next
    /// multiple of 16. The original length is not recorded anywhere in the
    /// output — a caller who zero-pads their own plaintext cannot tell where
    /// it ended. Use [`encrypt_framed`](Self::encrypt_framed) for a
    /// length-preserving variant.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(ceil_to_block(plaintext.len()));
        for chunk in plaintext.chunks(16) {
            let mut block = [0u8; 16];
            block[..chunk.len()].copy_from_slice(chunk);
            let keystream = self.generate_block();
            for (byte, ks) in block.iter_mut().zip(keystream.iter()) {
                *byte ^= ks;
            }
            out.extend_from_slice(&block);
        }
        out
    }

    /// As [`encrypt`](Self::encrypt), but prefixes an 8-byte big-endian
    /// original-length tag so [`decrypt_framed`](Self::decrypt_framed) can
    /// strip the zero-padding back off.
    ///
    /// This does not change the byte contract of [`encrypt`](Self::encrypt)
    /// itself — it is an additive, explicitly opt-in alternative for callers
    /// who need exact round trips, resolving the framing question the core
    /// design left open by documenting (rather than fixing) zero-padded,
    /// untagged ciphertext.
    pub fn encrypt_framed(&mut self, plaintext: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + ceil_to_block(plaintext.len()));
        out.extend_from_slice(&(plaintext.len() as u64).to_be_bytes());
        out.extend_from_slice(&self.encrypt(plaintext));
        out
    }

    /// Undo [`encrypt_framed`](Self::encrypt_framed): read back the 8-byte
    /// length tag, XOR the remaining body with the same keystream positions,
    /// and truncate to the original length.
    ///
    /// The counter-mode keystream only lines up if this instance is at the
    /// same counter position the encrypting instance was at when it produced
    /// `ciphertext` — in the common case, a freshly constructed instance from
    /// the same seed, used for exactly one framed round trip.
    pub fn decrypt_framed(&mut self, ciphertext: &[u8]) -> Vec<u8> {
        assert!(
            ciphertext.len() >= 8,
            "ciphertext produced by encrypt_framed carries an 8-byte length tag"
        );
        let (len_bytes, body) = ciphertext.split_at(8);
        let original_len = u64::from_be_bytes(len_bytes.try_into().expect("split_at(8) above")) as usize;
        let mut plaintext = self.encrypt(body);
        plaintext.truncate(original_len);
        plaintext
    }

    /// A diagnostic snapshot: vertex/edge counts of the seed-generated graph,
    /// and how far the derived S-box drifted from the stock AES S-box.
    pub fn stats(&self) -> Stats {
        let sbox_diff_from_aes = self
            .sbox
            .iter()
            .zip(aesconsts::AES_SBOX.iter())
            .filter(|(derived, aes)| derived != aes)
            .count() as u32;
        log::trace!(
            "stats queried: {} edges, sbox differs from AES at {} positions",
            self.num_edges,
            sbox_diff_from_aes
        );
        Stats {
            nodes: graph::NUM_VERTICES,
            edges: self.num_edges,
            sbox_diff_from_aes,
        }
    }
}

fn ceil_to_block(len: usize) -> usize {
    (len + 15) / 16 * 16
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_seed_constructs_with_edges() {
        let crypto = GraphCrypto::new(b"");
        assert!(crypto.stats().edges > 0);
        assert_eq!(crypto.stats().nodes, 256);
    }

    #[test]
    fn same_seed_yields_identical_streams() {
        let mut a = GraphCrypto::new(b"my_secret_seed");
        let mut b = GraphCrypto::new(b"my_secret_seed");
        for _ in 0..8 {
            assert_eq!(a.generate_block(), b.generate_block());
        }
    }

    #[test]
    fn generate_bytes_matches_concatenated_blocks() {
        let mut by_bytes = GraphCrypto::new(b"my_secret_seed");
        let mut by_blocks = GraphCrypto::new(b"my_secret_seed");

        let bytes = by_bytes.generate_bytes(16 * 3);
        let mut blocks = Vec::new();
        for _ in 0..3 {
            blocks.extend_from_slice(&by_blocks.generate_block());
        }
        assert_eq!(bytes, blocks);
    }

    #[test]
    fn generate_bytes_zero_is_empty_and_advances_nothing_extra() {
        let mut crypto = GraphCrypto::new(b"seed");
        assert_eq!(crypto.generate_bytes(0), Vec::<u8>::new());
        let first = crypto.generate_block();
        let mut fresh = GraphCrypto::new(b"seed");
        assert_eq!(fresh.generate_block(), first);
    }

    #[test]
    fn generate_bytes_one_advances_counter_by_a_full_block() {
        let mut crypto = GraphCrypto::new(b"seed");
        let one = crypto.generate_bytes(1);
        assert_eq!(one.len(), 1);
        let next_block = crypto.generate_block();

        let mut reference = GraphCrypto::new(b"seed");
        let first_block = reference.generate_block();
        assert_eq!(one[0], first_block[0]);
        assert_eq!(next_block, reference.generate_block());
    }

    #[test]
    fn generate_bytes_1024_covers_the_byte_alphabet_with_low_bias() {
        let mut crypto = GraphCrypto::new(b"my_secret_seed");
        let bytes = crypto.generate_bytes(1024);
        assert_eq!(bytes.len(), 1024);

        let mut seen = [false; 256];
        let mut ones = 0u32;
        for &b in &bytes {
            seen[b as usize] = true;
            ones += b.count_ones();
        }
        assert!(seen.iter().all(|&s| s), "not every byte value occurred");

        let total_bits = bytes.len() as f64 * 8.0;
        let bias = (ones as f64 / total_bits - 0.5).abs();
        assert!(bias < 0.01, "bit bias {bias} too high");
    }

    #[test]
    fn distinct_seeds_diverge_with_avalanche() {
        let mut a = GraphCrypto::new(b"a");
        let mut b = GraphCrypto::new(b"b");
        let block_a = a.generate_block();
        let block_b = b.generate_block();

        let hamming: u32 = block_a
            .iter()
            .zip(block_b.iter())
            .map(|(x, y)| (x ^ y).count_ones())
            .sum();
        assert!(hamming >= 40, "Hamming distance {hamming} too low");
    }

    #[test]
    fn sbox_invariants_hold_for_test_seed() {
        let crypto = GraphCrypto::new(b"test");
        assert_eq!(differential_uniformity(&crypto.sbox), 4);
        assert_eq!(nonlinearity(&crypto.sbox), 112);
    }

    #[test]
    fn stats_edges_matches_reconstructed_graph() {
        let crypto = GraphCrypto::new(b"stats-check");
        let graph = Graph::from_seed(b"stats-check");
        assert_eq!(crypto.stats().edges, graph.num_edges());
    }

    #[test]
    fn encrypt_of_zero_block_is_the_keystream() {
        let mut cipher = GraphCrypto::new(b"seed");
        let mut keystream = GraphCrypto::new(b"seed");
        assert_eq!(cipher.encrypt(&[0u8; 16]), keystream.generate_block());
    }

    #[test]
    fn encrypt_pads_the_final_chunk_to_a_full_block() {
        let mut cipher = GraphCrypto::new(b"seed");
        let out = cipher.encrypt(b"short");
        assert_eq!(out.len(), 16);
    }

    #[test]
    fn framed_round_trip_recovers_arbitrary_length_plaintext() {
        let plaintext = b"graph-derived ciphers are a fun teaching exercise";
        let mut encryptor = GraphCrypto::new(b"framing-seed");
        let ciphertext = encryptor.encrypt_framed(plaintext);

        let mut decryptor = GraphCrypto::new(b"framing-seed");
        let recovered = decryptor.decrypt_framed(&ciphertext);
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn single_byte_seed_constructs_successfully() {
        let crypto = GraphCrypto::new(&[0x42]);
        assert!(crypto.stats().edges > 0);
    }

    #[test]
    fn large_seed_constructs_successfully() {
        let seed = vec![0x7a; 1024 * 1024 + 1];
        let crypto = GraphCrypto::new(&seed);
        assert!(crypto.stats().edges > 0);
    }

    #[test]
    fn non_default_sbox_modes_still_yield_a_permutation_stream() {
        let config = Config::new().sbox_mode(SboxMode::Direct);
        let mut crypto = GraphCrypto::try_new(b"seed", config).expect("construction succeeds");
        let block = crypto.generate_block();
        assert_eq!(block.len(), 16);
    }

    /// Invariants 1-5 of the core, checked against a handful of random
    /// seeds rather than the literal scenario seeds alone: this is the same
    /// "construct N random seeds, assert the invariants hold for all of
    /// them" shape this crate's `rand` dev-dependency already exists for.
    #[test]
    fn invariants_hold_across_random_seeds() {
        use rand::RngCore;

        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let mut seed = vec![0u8; 1 + (rng.next_u32() % 64) as usize];
            rng.fill_bytes(&mut seed);

            let crypto = GraphCrypto::new(&seed);
            let stats = crypto.stats();
            assert_eq!(stats.nodes, 256);
            assert!(stats.edges > 0, "seed {seed:?} produced an edgeless graph");

            let mut seen = [false; 256];
            for &v in crypto.sbox.iter() {
                assert!(!seen[v as usize], "S-box not a permutation for seed {seed:?}");
                seen[v as usize] = true;
            }
            assert_eq!(differential_uniformity(&crypto.sbox), 4);
            assert_eq!(nonlinearity(&crypto.sbox), 112);
        }
    }

    /// Smoke-tests that the construction-time log events this crate emits
    /// don't panic or otherwise misbehave when a real `log`-compatible
    /// backend is installed, mirroring how a caller would actually wire
    /// logging up (`RUST_LOG=debug` against `env_logger`).
    #[test]
    fn construction_logs_without_a_backend_installed_are_harmless() {
        let _ = env_logger::builder().is_test(true).try_init();
        let crypto = GraphCrypto::new(b"logging-smoke-test");
        assert!(crypto.stats().edges > 0);
    }
}
