//! Social network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format.  Given an
//! `AgentId a`, its neighbors occupy the slice:
//!
//! ```text
//! neighbors[ neighbor_start[a] .. neighbor_start[a+1] ]
//! ```
//!
//! Links are undirected: every accepted link `(a, b)` is stored in both
//! rows.  Neighbor lookup is therefore a contiguous memory scan with no
//! allocation — the influence signal is computed once per agent per tick.
//!
//! # Invariants
//!
//! - every neighbor id is `< node_count` (checked at `add_link` time),
//! - no self-loops (rejected at `add_link` time),
//! - duplicate links collapse to one (deduplicated in `build`),
//! - topology is immutable after `build`.

use fa_core::{AgentId, FaError, FaResult};

// ── SocialNetwork ─────────────────────────────────────────────────────────────

/// Undirected household graph in CSR format.
///
/// Do not construct directly; use [`SocialNetworkBuilder`] or
/// [`generate`][crate::generate::generate].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SocialNetwork {
    /// CSR row pointer.  Neighbors of agent `a` are at
    /// `neighbors[neighbor_start[a] .. neighbor_start[a+1]]`.
    /// Length = `node_count + 1`.
    neighbor_start: Vec<u32>,

    /// Flattened neighbor lists, sorted ascending within each row.
    neighbors: Vec<AgentId>,
}

impl SocialNetwork {
    /// A network of `n` agents with no links at all (the "no network" case:
    /// every influence signal is 0).
    pub fn unconnected(n: usize) -> Self {
        Self {
            neighbor_start: vec![0; n + 1],
            neighbors:      Vec::new(),
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.neighbor_start.len() - 1
    }

    /// Number of undirected links (each stored twice internally).
    pub fn link_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Mean number of neighbors per agent.
    pub fn mean_degree(&self) -> f64 {
        if self.node_count() == 0 {
            return 0.0;
        }
        self.neighbors.len() as f64 / self.node_count() as f64
    }

    // ── Neighbor access ───────────────────────────────────────────────────

    /// The neighbors of `agent`, as a contiguous sorted slice.
    ///
    /// Empty slice for an isolated agent — a valid state, not an error.
    #[inline]
    pub fn neighbors(&self, agent: AgentId) -> &[AgentId] {
        let start = self.neighbor_start[agent.index()] as usize;
        let end = self.neighbor_start[agent.index() + 1] as usize;
        &self.neighbors[start..end]
    }

    /// Number of neighbors of `agent`.
    #[inline]
    pub fn degree(&self, agent: AgentId) -> usize {
        self.neighbors(agent).len()
    }

    /// Fraction of `agent`'s neighbors currently adapted, in `[0, 1]`.
    ///
    /// `adopted` is the adoption map snapshot for the tick, indexed by
    /// `AgentId`.  An isolated agent gets exactly `0.0`.
    pub fn influence_signal(&self, agent: AgentId, adopted: &[bool]) -> f64 {
        let neighbors = self.neighbors(agent);
        if neighbors.is_empty() {
            return 0.0;
        }
        let adapted = neighbors.iter().filter(|n| adopted[n.index()]).count();
        adapted as f64 / neighbors.len() as f64
    }
}

// ── SocialNetworkBuilder ──────────────────────────────────────────────────────

/// Construct a [`SocialNetwork`] incrementally, then call [`build`](Self::build).
///
/// Links may be added in any order; `build()` sorts them into CSR rows and
/// removes duplicates.
pub struct SocialNetworkBuilder {
    node_count: usize,
    links:      Vec<(AgentId, AgentId)>,
}

impl SocialNetworkBuilder {
    /// Builder for a graph over agents `0..n`.
    pub fn new(n: usize) -> Self {
        Self { node_count: n, links: Vec::new() }
    }

    /// Pre-allocate for the expected number of links.
    pub fn with_capacity(n: usize, links: usize) -> Self {
        Self {
            node_count: n,
            links:      Vec::with_capacity(links),
        }
    }

    /// Add an undirected link between `a` and `b`.
    ///
    /// Rejects self-loops and ids outside the population.
    pub fn add_link(&mut self, a: AgentId, b: AgentId) -> FaResult<()> {
        if a == b {
            return Err(FaError::invalid("network", format!("self-loop on {a}")));
        }
        if a.index() >= self.node_count || b.index() >= self.node_count {
            return Err(FaError::invalid(
                "network",
                format!("link ({a}, {b}) references an agent outside the population of {}", self.node_count),
            ));
        }
        // Normalise so (a,b) and (b,a) dedup to the same entry.
        let link = if a < b { (a, b) } else { (b, a) };
        self.links.push(link);
        Ok(())
    }

    /// `true` if the (normalised) link is already present.
    ///
    /// O(links) — intended for generator-time checks on small candidate sets,
    /// not hot-path queries.
    pub fn has_link(&self, a: AgentId, b: AgentId) -> bool {
        let link = if a < b { (a, b) } else { (b, a) };
        self.links.contains(&link)
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Consume the builder and produce a [`SocialNetwork`].
    ///
    /// Time complexity: O(L log L) for the link sort, L = links.
    pub fn build(self) -> SocialNetwork {
        let n = self.node_count;

        // Deduplicate normalised links, then mirror into both directions.
        let mut links = self.links;
        links.sort_unstable();
        links.dedup();

        let mut directed: Vec<(AgentId, AgentId)> = Vec::with_capacity(links.len() * 2);
        for &(a, b) in &links {
            directed.push((a, b));
            directed.push((b, a));
        }
        directed.sort_unstable();

        // Build CSR row pointer.
        let mut neighbor_start = vec![0u32; n + 1];
        for &(from, _) in &directed {
            neighbor_start[from.index() + 1] += 1;
        }
        for i in 1..=n {
            neighbor_start[i] += neighbor_start[i - 1];
        }
        debug_assert_eq!(neighbor_start[n] as usize, directed.len());

        let neighbors: Vec<AgentId> = directed.into_iter().map(|(_, to)| to).collect();

        SocialNetwork { neighbor_start, neighbors }
    }
}
