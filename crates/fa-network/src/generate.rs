//! Seeded random-topology generators.
//!
//! All generators draw exclusively from the `SimRng` passed in, so a run's
//! topology is fully reproducible from the master seed.  The supported
//! topologies match the reference model: Erdős–Rényi, Barabási–Albert,
//! Watts–Strogatz, and no network at all.

use fa_core::{AgentId, FaError, FaResult, SimRng};

use crate::graph::{SocialNetwork, SocialNetworkBuilder};

/// Which topology to build, with its parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NetworkTopology {
    /// No links; every influence signal is 0.
    NoNetwork,

    /// Each of the n·(n−1)/2 possible links exists independently with
    /// `edge_probability`.
    ErdosRenyi { edge_probability: f64 },

    /// Preferential attachment: each new node links to `edges_per_node`
    /// distinct existing nodes, weighted by current degree.
    BarabasiAlbert { edges_per_node: usize },

    /// Ring lattice with `nearest_neighbors` links per node (must be even),
    /// each link rewired with `rewire_probability`.
    WattsStrogatz {
        nearest_neighbors:  usize,
        rewire_probability: f64,
    },
}

/// Build the network for a population of `n` agents.
///
/// Fails fast on out-of-range parameters before touching the RNG, so an
/// invalid configuration never perturbs downstream seed streams.
pub fn generate(n: usize, topology: &NetworkTopology, rng: &mut SimRng) -> FaResult<SocialNetwork> {
    match *topology {
        NetworkTopology::NoNetwork => Ok(SocialNetwork::unconnected(n)),
        NetworkTopology::ErdosRenyi { edge_probability } => erdos_renyi(n, edge_probability, rng),
        NetworkTopology::BarabasiAlbert { edges_per_node } => barabasi_albert(n, edges_per_node, rng),
        NetworkTopology::WattsStrogatz { nearest_neighbors, rewire_probability } => {
            watts_strogatz(n, nearest_neighbors, rewire_probability, rng)
        }
    }
}

// ── Erdős–Rényi ───────────────────────────────────────────────────────────────

fn erdos_renyi(n: usize, p: f64, rng: &mut SimRng) -> FaResult<SocialNetwork> {
    if !(0.0..=1.0).contains(&p) || p.is_nan() {
        return Err(FaError::invalid(
            "edge_probability",
            format!("must be in [0, 1], got {p}"),
        ));
    }
    let mut b = SocialNetworkBuilder::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(p) {
                b.add_link(AgentId(i as u32), AgentId(j as u32))?;
            }
        }
    }
    Ok(b.build())
}

// ── Barabási–Albert ───────────────────────────────────────────────────────────

fn barabasi_albert(n: usize, m: usize, rng: &mut SimRng) -> FaResult<SocialNetwork> {
    if m == 0 || m >= n {
        return Err(FaError::invalid(
            "edges_per_node",
            format!("must satisfy 1 <= m < population ({n}), got {m}"),
        ));
    }

    let mut b = SocialNetworkBuilder::with_capacity(n, (n - m) * m);

    // `repeated` holds one entry per link endpoint, so uniform sampling from
    // it is degree-weighted sampling — the classic preferential-attachment
    // trick.
    let mut repeated: Vec<AgentId> = Vec::with_capacity(2 * (n - m) * m);
    let mut targets: Vec<AgentId> = (0..m as u32).map(AgentId).collect();

    for source in m..n {
        let source = AgentId(source as u32);
        for &target in &targets {
            b.add_link(source, target)?;
            repeated.push(source);
            repeated.push(target);
        }
        // Draw m distinct targets for the next node.
        targets.clear();
        while targets.len() < m {
            let pick = repeated[rng.gen_range(0..repeated.len())];
            if !targets.contains(&pick) {
                targets.push(pick);
            }
        }
    }

    Ok(b.build())
}

// ── Watts–Strogatz ────────────────────────────────────────────────────────────

fn watts_strogatz(n: usize, k: usize, p: f64, rng: &mut SimRng) -> FaResult<SocialNetwork> {
    if k == 0 || k % 2 != 0 || k >= n {
        return Err(FaError::invalid(
            "nearest_neighbors",
            format!("must be even and satisfy 0 < k < population ({n}), got {k}"),
        ));
    }
    if !(0.0..=1.0).contains(&p) || p.is_nan() {
        return Err(FaError::invalid(
            "rewire_probability",
            format!("must be in [0, 1], got {p}"),
        ));
    }

    // Build the full ring lattice first, then rewire in place.  Rewiring
    // moves links without adding or removing any, so the link count is
    // exactly n·k/2 regardless of p.
    let mut adjacency: Vec<std::collections::BTreeSet<u32>> = vec![Default::default(); n];
    for i in 0..n {
        for j in 1..=(k / 2) {
            let v = (i + j) % n;
            adjacency[i].insert(v as u32);
            adjacency[v].insert(i as u32);
        }
    }

    for i in 0..n {
        for j in 1..=(k / 2) {
            if !rng.gen_bool(p) {
                continue;
            }
            let v = ((i + j) % n) as u32;
            if adjacency[i].len() >= n - 1 {
                continue; // row already saturated, nowhere to rewire to
            }
            // Draw until the target is neither `i` nor an existing neighbor.
            let w = loop {
                let candidate = rng.gen_range(0..n as u32);
                if candidate as usize != i && !adjacency[i].contains(&candidate) {
                    break candidate;
                }
            };
            adjacency[i].remove(&v);
            adjacency[v as usize].remove(&(i as u32));
            adjacency[i].insert(w);
            adjacency[w as usize].insert(i as u32);
        }
    }

    let mut b = SocialNetworkBuilder::with_capacity(n, n * k / 2);
    for (i, row) in adjacency.iter().enumerate() {
        for &v in row.iter().filter(|&&v| v as usize > i) {
            b.add_link(AgentId(i as u32), AgentId(v))?;
        }
    }
    Ok(b.build())
}
