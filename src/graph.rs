//! The seed-generated graph that every other derived structure in this crate
//! ([topology](crate::topology), [S-box](crate::sbox),
//! [bit permutation](crate::permutation), [round keys](crate::roundkeys)) is
//! ultimately a function of.
//!
//! The construction is a hash chain: each step hashes the previous digest
//! together with a round counter, and reads 32 candidate edges out of the
//! resulting 64-byte [SHA-512](crate::hash::Sha512) digest. This is the same
//! "hash entropy into a block of random-looking bytes, read structure off of
//! it" idea this crate already uses to
//! [seed a CSPRNG](crate::random::fortuna) from an entropy source, applied to
//! edges of a graph instead of key bytes.

use crate::hash::{Hash, Sha512};

/// Number of vertices in the graph. Fixed by the design, not configurable.
pub const NUM_VERTICES: usize = 256;

/// Number of hash-chain rounds used to seed the edge set.
const NUM_ROUNDS: u8 = 48;

/// An undirected simple graph on exactly [`NUM_VERTICES`] vertices, with no
/// self-loops and no parallel edges.
///
/// Stored as a dense symmetric adjacency bitmap — 256 rows of 256 bits each,
/// packed into four `u64`s per row — since the vertex set is small and fixed,
/// and topology extraction ([`crate::topology`]) needs fast adjacency
/// queries far more than it needs a sparse representation.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: [[u64; 4]; NUM_VERTICES],
    edge_count: u32,
}

impl Graph {
    /// Build the graph deterministically from `seed`, following the
    /// hash-chain construction: `h[0] = seed`, `h[r+1] =
    /// SHA-512(h[r] || r)` for `r` in `0..48`, and each `h[r+1]` contributes
    /// up to 32 candidate edges `(h[2i], h[2i+1])` for `i` in `0..32`.
    ///
    /// Self-loops (`u == v`) are silently dropped; duplicate edges collapse
    /// (inserting an edge that already exists is a no-op). The vertex set is
    /// always exactly `0..256`, including any vertex that ends up with no
    /// incident edges.
    pub fn from_seed(seed: &[u8]) -> Self {
        let mut graph = Self {
            adjacency: [[0u64; 4]; NUM_VERTICES],
            edge_count: 0,
        };

        let sha512 = Sha512::default();
        let mut digest = seed.to_vec();
        for round in 0..NUM_ROUNDS {
            let mut preimage = digest;
            preimage.push(round);
            digest = sha512.hash(&preimage).to_vec();

            for i in 0..32 {
                let u = digest[2 * i];
                let v = digest[2 * i + 1];
                if u != v {
                    graph.insert_edge(u, v);
                }
            }
        }

        graph
    }

    /// Insert the undirected edge `{u, v}`. A no-op if `u == v` or the edge
    /// is already present.
    fn insert_edge(&mut self, u: u8, v: u8) {
        if u == v {
            return;
        }
        if self.set_bit(u, v) {
            self.set_bit(v, u);
            self.edge_count += 1;
        }
    }

    /// Set the adjacency bit for `(row, col)`. Returns whether it was
    /// previously unset (i.e. whether this call actually changed anything).
    fn set_bit(&mut self, row: u8, col: u8) -> bool {
        let word = col as usize / 64;
        let bit = col as usize % 64;
        let mask = 1u64 << bit;
        let was_set = self.adjacency[row as usize][word] & mask != 0;
        self.adjacency[row as usize][word] |= mask;
        !was_set
    }

    /// Whether `u` and `v` are adjacent. `u == v` is always `false` (no
    /// self-loops by construction).
    pub fn has_edge(&self, u: u8, v: u8) -> bool {
        let word = v as usize / 64;
        let bit = v as usize % 64;
        self.adjacency[u as usize][word] & (1u64 << bit) != 0
    }

    /// Neighbors of `v`, in ascending order.
    pub fn neighbors(&self, v: u8) -> impl Iterator<Item = u8> + '_ {
        let row = &self.adjacency[v as usize];
        (0..NUM_VERTICES).filter_map(move |u| {
            let word = u / 64;
            let bit = u % 64;
            (row[word] & (1u64 << bit) != 0).then_some(u as u8)
        })
    }

    /// Degree of vertex `v`.
    pub fn degree(&self, v: u8) -> u32 {
        self.adjacency[v as usize].iter().map(|w| w.count_ones()).sum()
    }

    /// Total number of vertices, always [`NUM_VERTICES`].
    pub fn num_vertices(&self) -> usize {
        NUM_VERTICES
    }

    /// Total number of edges in the graph.
    pub fn num_edges(&self) -> u32 {
        self.edge_count
    }
}
