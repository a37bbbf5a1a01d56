//! Extraction of topological features from the [seed-generated
//! graph](crate::graph), and their fusion into a single 256-byte string that
//! every other derived structure ([S-box](crate::sbox),
//! [bit permutation](crate::permutation), [round keys](crate::roundkeys))
//! reads from.
//!
//! Four length-256 real-valued feature vectors are computed — degree, local
//! clustering, betweenness centrality, and the Laplacian spectrum — each
//! independently normalized to a byte per vertex, then fused by XOR.

use crate::{graph::Graph, linalg};

/// Number of vertices; mirrors [`crate::graph::NUM_VERTICES`].
const N: usize = crate::graph::NUM_VERTICES;

/// Smallest denominator allowed during min-max normalization, to avoid
/// division by zero when a feature vector is constant across all vertices
/// (e.g. a graph so sparse every vertex has degree 0).
const NORMALIZATION_EPS: f64 = 1e-12;

/// The fused, byte-level topology digest derived from a [`Graph`], plus the
/// raw Laplacian spectrum (needed again, separately, by the
/// [S-box builder](crate::sbox)).
pub struct Topology {
    /// `topo_bytes[i] = degree_byte[i] ^ clustering_byte[i] ^
    /// betweenness_byte[i] ^ laplacian_byte[i]`.
    pub topo_bytes: [u8; N],
    /// Laplacian eigenvalues, ascending. `laplacian_spectrum[0]` is `0` for
    /// any graph with at least one connected component (always true here).
    pub laplacian_spectrum: [f64; N],
    /// Whether the Jacobi eigensolver converged within its fixed sweep
    /// budget. `false` signals a [`crate::error::ConstructionError`].
    pub eigendecomposition_converged: bool,
}

impl Topology {
    /// Run the full topology extraction pipeline over `graph`.
    pub fn extract(graph: &Graph) -> Self {
        let degree = degree_vector(graph);
        let clustering = clustering_vector(graph, &degree);
        let betweenness = betweenness_vector(graph);
        let (laplacian_spectrum, eigendecomposition_converged) = laplacian_spectrum(graph);

        let degree_f64: Vec<f64> = degree.iter().map(|&d| d as f64).collect();
        let degree_byte = normalize_to_bytes(&degree_f64);
        let clustering_byte = normalize_to_bytes(&clustering);
        let betweenness_byte = normalize_to_bytes(&betweenness);
        let laplacian_byte = normalize_to_bytes(&laplacian_spectrum);

        let mut topo_bytes = [0u8; N];
        for i in 0..N {
            topo_bytes[i] =
                degree_byte[i] ^ clustering_byte[i] ^ betweenness_byte[i] ^ laplacian_byte[i];
        }

        Self {
            topo_bytes,
            laplacian_spectrum,
            eigendecomposition_converged,
        }
    }
}

/// Degree of every vertex, in vertex order.
fn degree_vector(graph: &Graph) -> [u32; N] {
    let mut degree = [0u32; N];
    for v in 0..N {
        degree[v] = graph.degree(v as u8);
    }
    degree
}

/// Local clustering coefficient of every vertex: the fraction of a vertex's
/// possible neighbor-pair triangles that are actually closed, or `0` for any
/// vertex with degree less than 2 (the coefficient is undefined there, so
/// it is fixed to 0 rather than left undefined).
fn clustering_vector(graph: &Graph, degree: &[u32; N]) -> Vec<f64> {
    (0..N)
        .map(|v| {
            let d = degree[v];
            if d < 2 {
                return 0.0;
            }
            let neighbors: Vec<u8> = graph.neighbors(v as u8).collect();
            let mut triangles = 0u64;
            for (i, &a) in neighbors.iter().enumerate() {
                for &b in &neighbors[i + 1..] {
                    if graph.has_edge(a, b) {
                        triangles += 1;
                    }
                }
            }
            let possible = d as u64 * (d as u64 - 1) / 2;
            triangles as f64 / possible as f64
        })
        .collect()
}

/// Unweighted betweenness centrality of every vertex, via Brandes' algorithm
/// (Brandes, *A Faster Algorithm for Betweenness Centrality*, 2001), run once
/// per source vertex in ascending vertex order so that tie-breaking among
/// equal-length shortest paths is deterministic across implementations.
///
/// Summing Brandes' per-source dependency accumulation over every source
/// yields, for each vertex `v`, twice the sum over *unordered* pairs `{s, t}`
/// of the fraction of `s`-`t` shortest paths through `v` (once for the
/// ordered pair `(s, t)`, once for `(t, s)`, which carry the same fraction in
/// an undirected graph). The standard normalization factor `2/((n-1)(n-2))`
/// applied to the unordered-pair sum is therefore equivalent to dividing this
/// routine's raw (ordered-pair) accumulation by `(n-1)(n-2)` directly, which
/// is what this function returns.
fn betweenness_vector(graph: &Graph) -> Vec<f64> {
    let mut betweenness = vec![0.0f64; N];

    for s in 0u8..=255 {
        let s = s as usize;
        let mut dist = [-1i32; N];
        let mut sigma = [0.0f64; N];
        let mut predecessors: Vec<Vec<u8>> = vec![Vec::new(); N];
        let mut order = Vec::with_capacity(N);

        dist[s] = 0;
        sigma[s] = 1.0;
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(s as u8);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            for w in graph.neighbors(v) {
                let w_idx = w as usize;
                if dist[w_idx] < 0 {
                    dist[w_idx] = dist[v as usize] + 1;
                    queue.push_back(w);
                }
                if dist[w_idx] == dist[v as usize] + 1 {
                    sigma[w_idx] += sigma[v as usize];
                    predecessors[w_idx].push(v);
                }
            }
        }

        let mut delta = [0.0f64; N];
        for &w in order.iter().rev() {
            let w_idx = w as usize;
            for &v in &predecessors[w_idx] {
                let v_idx = v as usize;
                delta[v_idx] += (sigma[v_idx] / sigma[w_idx]) * (1.0 + delta[w_idx]);
            }
            if w_idx != s {
                betweenness[w_idx] += delta[w_idx];
            }
        }
    }

    let scale = ((N - 1) * (N - 2)) as f64;
    betweenness.iter().map(|&b| b / scale).collect()
}

/// Eigenvalues of the graph Laplacian `L = D - A`, ascending, plus whether
/// the eigensolver converged.
fn laplacian_spectrum(graph: &Graph) -> ([f64; N], bool) {
    let mut l = vec![vec![0.0f64; N]; N];
    for i in 0..N {
        l[i][i] = graph.degree(i as u8) as f64;
        for j in graph.neighbors(i as u8) {
            l[i][j as usize] = -1.0;
        }
    }

    let (eigenvalues, converged) = linalg::symmetric_eigenvalues_with_convergence(l);
    let mut out = [0.0; N];
    out.copy_from_slice(&eigenvalues);
    (out, converged)
}

/// Min-max normalize `values` into bytes: `round(255 * (v - min) / max(max -
/// min, eps))`.
fn normalize_to_bytes(values: &[f64]) -> Vec<u8> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(NORMALIZATION_EPS);
    values
        .iter()
        .map(|&v| (255.0 * (v - min) / span).round().clamp(0.0, 255.0) as u8)
        .collect()
}
