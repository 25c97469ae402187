//! Unit tests for the social network graph and generators.

use fa_core::{AgentId, SimRng};

use crate::{generate, NetworkTopology, SocialNetwork, SocialNetworkBuilder};

// ── Graph / builder ───────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use super::*;

    #[test]
    fn links_are_undirected() {
        let mut b = SocialNetworkBuilder::new(3);
        b.add_link(AgentId(0), AgentId(2)).unwrap();
        let net = b.build();
        assert_eq!(net.neighbors(AgentId(0)), &[AgentId(2)]);
        assert_eq!(net.neighbors(AgentId(2)), &[AgentId(0)]);
        assert_eq!(net.link_count(), 1);
    }

    #[test]
    fn duplicate_links_collapse() {
        let mut b = SocialNetworkBuilder::new(3);
        b.add_link(AgentId(0), AgentId(1)).unwrap();
        b.add_link(AgentId(1), AgentId(0)).unwrap();
        b.add_link(AgentId(0), AgentId(1)).unwrap();
        let net = b.build();
        assert_eq!(net.link_count(), 1);
        assert_eq!(net.degree(AgentId(0)), 1);
    }

    #[test]
    fn self_loops_rejected() {
        let mut b = SocialNetworkBuilder::new(3);
        assert!(b.add_link(AgentId(1), AgentId(1)).is_err());
    }

    #[test]
    fn out_of_range_ids_rejected() {
        let mut b = SocialNetworkBuilder::new(3);
        assert!(b.add_link(AgentId(0), AgentId(3)).is_err());
    }

    #[test]
    fn isolated_agent_signal_is_zero_not_error() {
        let net = SocialNetwork::unconnected(4);
        let adopted = vec![true, true, true, true];
        assert_eq!(net.influence_signal(AgentId(2), &adopted), 0.0);
        assert!(net.neighbors(AgentId(2)).is_empty());
    }

    #[test]
    fn influence_signal_is_adapted_fraction() {
        // 0 — 1, 0 — 2, 0 — 3; agents 1 and 3 adapted
        let mut b = SocialNetworkBuilder::new(4);
        b.add_link(AgentId(0), AgentId(1)).unwrap();
        b.add_link(AgentId(0), AgentId(2)).unwrap();
        b.add_link(AgentId(0), AgentId(3)).unwrap();
        let net = b.build();

        let adopted = vec![false, true, false, true];
        let signal = net.influence_signal(AgentId(0), &adopted);
        assert!((signal - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(net.influence_signal(AgentId(1), &adopted), 0.0); // neighbor 0 not adapted
    }
}

// ── Generators ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generators {
    use super::*;

    fn degrees(net: &SocialNetwork) -> Vec<usize> {
        (0..net.node_count())
            .map(|i| net.degree(AgentId(i as u32)))
            .collect()
    }

    #[test]
    fn no_network_has_no_links() {
        let mut rng = SimRng::new(1);
        let net = generate(50, &NetworkTopology::NoNetwork, &mut rng).unwrap();
        assert_eq!(net.node_count(), 50);
        assert_eq!(net.link_count(), 0);
    }

    #[test]
    fn same_seed_same_topology() {
        let topo = NetworkTopology::ErdosRenyi { edge_probability: 0.1 };
        let a = generate(60, &topo, &mut SimRng::new(9)).unwrap();
        let b = generate(60, &topo, &mut SimRng::new(9)).unwrap();
        assert_eq!(degrees(&a), degrees(&b));
        assert_eq!(a.link_count(), b.link_count());
    }

    #[test]
    fn different_seed_usually_differs() {
        let topo = NetworkTopology::ErdosRenyi { edge_probability: 0.1 };
        let a = generate(60, &topo, &mut SimRng::new(9)).unwrap();
        let b = generate(60, &topo, &mut SimRng::new(10)).unwrap();
        assert_ne!(degrees(&a), degrees(&b));
    }

    #[test]
    fn erdos_renyi_extremes() {
        let none = generate(20, &NetworkTopology::ErdosRenyi { edge_probability: 0.0 }, &mut SimRng::new(1)).unwrap();
        assert_eq!(none.link_count(), 0);
        let full = generate(20, &NetworkTopology::ErdosRenyi { edge_probability: 1.0 }, &mut SimRng::new(1)).unwrap();
        assert_eq!(full.link_count(), 20 * 19 / 2);
    }

    #[test]
    fn erdos_renyi_rejects_bad_probability() {
        assert!(generate(10, &NetworkTopology::ErdosRenyi { edge_probability: 1.5 }, &mut SimRng::new(1)).is_err());
    }

    #[test]
    fn barabasi_albert_link_count_and_degrees() {
        let m = 3;
        let n = 100;
        let net = generate(n, &NetworkTopology::BarabasiAlbert { edges_per_node: m }, &mut SimRng::new(5)).unwrap();
        // (n - m) joining nodes each add m links
        assert_eq!(net.link_count(), (n - m) * m);
        // every joining node has degree >= m
        for i in m..n {
            assert!(net.degree(AgentId(i as u32)) >= m);
        }
    }

    #[test]
    fn barabasi_albert_rejects_bad_m() {
        assert!(generate(10, &NetworkTopology::BarabasiAlbert { edges_per_node: 0 }, &mut SimRng::new(1)).is_err());
        assert!(generate(10, &NetworkTopology::BarabasiAlbert { edges_per_node: 10 }, &mut SimRng::new(1)).is_err());
    }

    #[test]
    fn watts_strogatz_unrewired_is_ring_lattice() {
        let net = generate(
            12,
            &NetworkTopology::WattsStrogatz { nearest_neighbors: 4, rewire_probability: 0.0 },
            &mut SimRng::new(2),
        )
        .unwrap();
        assert_eq!(net.link_count(), 12 * 4 / 2);
        for d in degrees(&net) {
            assert_eq!(d, 4);
        }
    }

    #[test]
    fn watts_strogatz_rewiring_preserves_link_count() {
        let net = generate(
            50,
            &NetworkTopology::WattsStrogatz { nearest_neighbors: 4, rewire_probability: 0.3 },
            &mut SimRng::new(2),
        )
        .unwrap();
        // rewiring moves links, it does not add or remove them
        assert_eq!(net.link_count(), 50 * 4 / 2);
        assert!((net.mean_degree() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn watts_strogatz_rejects_odd_k() {
        assert!(generate(
            10,
            &NetworkTopology::WattsStrogatz { nearest_neighbors: 3, rewire_probability: 0.1 },
            &mut SimRng::new(1),
        )
        .is_err());
    }
}
