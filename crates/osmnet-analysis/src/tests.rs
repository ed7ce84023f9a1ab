//! Unit tests for osmnet-analysis.

#[cfg(test)]
mod helpers {
    use osmnet_core::{GeoPoint, ModeSet, TravelMode, VertexId};
    use osmnet_graph::{RoadGraph, RoadGraphBuilder, WayInfo};

    /// Two-way graph; segment lengths are the great-circle distances and
    /// every road runs at 10 m/s.  Each segment is its own way.
    pub fn graph(points: &[(f64, f64)], segments: &[(u32, u32)]) -> RoadGraph {
        let mut b = RoadGraphBuilder::new(TravelMode::Walk);
        for (i, &(lat, lon)) in points.iter().enumerate() {
            b.add_vertex(1_000 + i as i64, GeoPoint::new(lat, lon));
        }
        for (i, &(a, c)) in segments.iter().enumerate() {
            let len = b.vertex_pos(VertexId(a)).distance_m(b.vertex_pos(VertexId(c)));
            let way = b.add_way(WayInfo::new(i as i64 + 1, "residential").named(&format!("Road {i}")));
            b.add_segment(VertexId(a), VertexId(c), way, len, len / 10.0, ModeSet::only(TravelMode::Walk));
        }
        b.build()
    }

    /// `n` vertices along the equator, 0.001° apart.
    pub fn line(n: usize) -> Vec<(f64, f64)> {
        (0..n).map(|i| (0.0, i as f64 * 0.001)).collect()
    }

    pub fn chain(n: usize) -> RoadGraph {
        let segs: Vec<(u32, u32)> = (1..n as u32).map(|i| (i - 1, i)).collect();
        graph(&line(n), &segs)
    }

    /// `side × side` lattice, 0.001° spacing.
    pub fn grid(side: usize) -> RoadGraph {
        let mut points = Vec::new();
        let mut segs = Vec::new();
        for r in 0..side {
            for c in 0..side {
                points.push((r as f64 * 0.001, c as f64 * 0.001));
                let v = (r * side + c) as u32;
                if c + 1 < side {
                    segs.push((v, v + 1));
                }
                if r + 1 < side {
                    segs.push((v, v + side as u32));
                }
            }
        }
        graph(&points, &segs)
    }
}

// ── Connectivity ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod components {
    use osmnet_core::{SampleRng, TravelMode};
    use osmnet_graph::{RoadGraph, UndirectedGraph};

    use super::helpers::{chain, graph, line};
    use crate::{connected_components, connectivity};

    #[test]
    fn edge_plus_isolated_vertex() {
        let g = graph(&line(3), &[(0, 1)]);
        let r = connectivity(&g);
        assert_eq!(r.num_components, 2);
        assert!(!r.is_connected);
        assert_eq!(r.sizes, [2, 1]);
        assert_eq!(r.largest_size, 2);
        assert_eq!(r.dead_ends, 2);
    }

    #[test]
    fn chain_is_connected() {
        let r = connectivity(&chain(5));
        assert_eq!(r.num_components, 1);
        assert!(r.is_connected);
        assert_eq!(r.largest_share, 1.0);
    }

    #[test]
    fn empty_graph_has_no_components() {
        let r = connectivity(&RoadGraph::empty(TravelMode::Drive));
        assert_eq!(r.num_components, 0);
        assert!(!r.is_connected);
        assert_eq!(r.largest_share, 0.0);
    }

    #[test]
    fn labels_follow_smallest_vertex() {
        let g = graph(&line(5), &[(3, 4), (1, 2)]);
        let comps = connected_components(&UndirectedGraph::from_graph(&g));
        assert_eq!(comps.labels, [0, 1, 1, 2, 2]);
        assert_eq!(comps.largest(), Some(1));
        assert_eq!(comps.members(2).len(), 2);
    }

    #[test]
    fn invariant_under_relabeling() {
        let segs = [(0, 1), (1, 2), (3, 4), (5, 6), (6, 7), (7, 5)];
        let points = line(9);
        let base = connectivity(&graph(&points, &segs));

        for seed in 0..5 {
            // Random permutation of vertex ids.
            let mut perm: Vec<u32> = (0..9).collect();
            let mut rng = SampleRng::new(seed);
            for i in (1..perm.len()).rev() {
                let j = rng.gen_range(0..=i);
                perm.swap(i, j);
            }
            let mut moved = vec![(0.0, 0.0); 9];
            for (old, &new) in perm.iter().enumerate() {
                moved[new as usize] = points[old];
            }
            let relabeled: Vec<(u32, u32)> = segs.iter().map(|&(a, b)| (perm[a as usize], perm[b as usize])).collect();
            let r = connectivity(&graph(&moved, &relabeled));
            assert_eq!(r.num_components, base.num_components);
            assert_eq!(r.sizes, base.sizes);
            assert_eq!(r.dead_ends, base.dead_ends);
        }
    }
}

// ── Bridges ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bridges {
    use osmnet_core::{SampleRng, VertexId};
    use osmnet_graph::UndirectedGraph;

    use super::helpers::{chain, graph, grid, line};
    use crate::{BottleneckConfig, bottlenecks, scan_bridges};

    #[test]
    fn three_chain_has_two_bridges() {
        let r = bottlenecks(&chain(3), &BottleneckConfig::default());
        assert_eq!(r.bridge_count, 2);
        assert!(r.bridges.iter().all(|b| b.importance == 1));
        assert_eq!(r.articulation_count, 1);
        assert_eq!(r.articulation_points[0].vertex, VertexId(1));
        assert_eq!(r.articulation_points[0].extra_components, 1);
    }

    #[test]
    fn every_tree_edge_is_a_bridge() {
        for seed in 0..10 {
            let n = 40;
            let mut rng = SampleRng::new(seed);
            let segs: Vec<(u32, u32)> = (1..n).map(|v| (rng.gen_range(0..v), v)).collect();
            let points: Vec<(f64, f64)> = (0..n).map(|i| ((i / 8) as f64 * 0.001, (i % 8) as f64 * 0.001)).collect();
            let g = graph(&points, &segs);
            let scan = scan_bridges(&UndirectedGraph::from_graph(&g));
            assert_eq!(scan.bridges.len(), n as usize - 1, "seed {seed}");
        }
    }

    #[test]
    fn cycles_and_parallel_roads_are_not_bridges() {
        let g = grid(3);
        assert_eq!(bottlenecks(&g, &BottleneckConfig::default()).bridge_count, 0);

        // Two distinct ways between the same pair of junctions.
        let g = graph(&line(2), &[(0, 1), (0, 1)]);
        let scan = scan_bridges(&UndirectedGraph::from_graph(&g));
        assert!(scan.bridges.is_empty());
    }

    #[test]
    fn ranks_by_smaller_side() {
        // Triangle 0-1-2, bridge 2-3, triangle 3-4-5, stub 5-6.
        let segs = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3), (5, 6)];
        let g = graph(&line(7), &segs);
        let r = bottlenecks(&g, &BottleneckConfig::default());
        assert_eq!(r.bridge_count, 2);
        assert_eq!((r.bridges[0].segment.a, r.bridges[0].segment.b), (VertexId(2), VertexId(3)));
        assert_eq!(r.bridges[0].importance, 3);
        assert_eq!(r.bridges[1].importance, 1);

        let cut: Vec<VertexId> = r.articulation_points.iter().map(|p| p.vertex).collect();
        assert_eq!(cut, [VertexId(2), VertexId(3), VertexId(5)]);

        let top = bottlenecks(&g, &BottleneckConfig { top_n: 1 });
        assert_eq!(top.bridges.len(), 1);
        assert_eq!(top.bridge_count, 2);
    }

    #[test]
    fn star_centre_splits_into_many() {
        let g = graph(&line(5), &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let scan = scan_bridges(&UndirectedGraph::from_graph(&g));
        assert_eq!(scan.articulation, [(VertexId(0), 3)]);
    }
}

// ── Centrality ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod centrality {
    use osmnet_core::{ErrorKind, TravelMode, VertexId};
    use osmnet_graph::RoadGraph;

    use super::helpers::{chain, grid};
    use crate::{CentralityConfig, betweenness};

    #[test]
    fn chain_middle_carries_most_traffic() {
        let g = chain(5);
        let r = betweenness(&g, &CentralityConfig::default()).unwrap();
        assert_eq!(r.sources, 5);
        assert!((r.vertex_score[2] - 1.6).abs() < 1e-12);
        assert!((r.vertex_score[1] - 1.2).abs() < 1e-12);
        assert_eq!(r.vertex_score[0], 0.0);
        assert_eq!(r.vertex_score[4], 0.0);
        assert_eq!(r.top_vertices[0].vertex, VertexId(2));
        // Endpoints never lie strictly between two others.
        assert!(r.top_vertices.iter().all(|s| s.vertex != VertexId(0)));
    }

    #[test]
    fn edge_scores_count_destinations() {
        let g = chain(3);
        let r = betweenness(&g, &CentralityConfig::default()).unwrap();
        let e01 = g.find_edge(VertexId(0), VertexId(1)).unwrap();
        // From source 0 the edge carries trips to 1 and 2; no other source uses it.
        assert!((r.edge_score[e01.index()] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let g = grid(6);
        let cfg = CentralityConfig { sample_size: 10, top_n: 5, ..CentralityConfig::default() };
        let a = betweenness(&g, &cfg).unwrap();
        let b = betweenness(&g, &cfg).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.sources, 10);
        assert_eq!(a.top_vertices.len(), 5);
        assert!(a.top_vertices.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn rejects_degenerate_input() {
        let err = betweenness(&chain(3), &CentralityConfig { sample_size: 0, ..Default::default() }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = betweenness(&RoadGraph::empty(TravelMode::Bike), &CentralityConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoData);
    }
}

// ── Detour factor ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod detour {
    use osmnet_core::{ErrorKind, GeoPoint, VertexId};
    use osmnet_graph::Network;

    use super::helpers::{chain, graph, grid, line};
    use crate::{
        DetourFactor, DetourRating, DetourSampleConfig, DetourStats, detour_between, detour_factor,
        detour_statistics,
    };

    #[test]
    fn even_sample_median_averages_middle_pair() {
        let factor = |f: f64| DetourFactor {
            origin:      VertexId(0),
            destination: VertexId(1),
            straight_m:  100.0,
            network_m:   100.0 * f,
            factor:      f,
        };
        let stats = DetourStats::from_samples(5, [1.6, 1.0, 1.4, 1.2].map(factor).to_vec());
        assert!((stats.median - 1.3).abs() < 1e-12, "got {}", stats.median);
        assert_eq!(stats.samples[0].factor, 1.6);

        let stats = DetourStats::from_samples(5, [1.6, 1.0, 1.4].map(factor).to_vec());
        assert_eq!(stats.median, 1.4);
    }

    #[test]
    fn straight_road_is_direct() {
        let g = chain(4);
        let d = detour_between(&g, VertexId(0), VertexId(3)).unwrap();
        assert!((d.factor - 1.0).abs() < 1e-6, "got {}", d.factor);
    }

    #[test]
    fn right_angle_is_root_two() {
        let g = graph(&[(0.0, 0.0), (0.0, 0.001), (0.001, 0.001)], &[(0, 1), (1, 2)]);
        let d = detour_between(&g, VertexId(0), VertexId(2)).unwrap();
        assert!((d.factor - 2f64.sqrt()).abs() < 1e-3, "got {}", d.factor);
    }

    #[test]
    fn undefined_cases() {
        let g = graph(&line(4), &[(0, 1), (2, 3)]);
        assert!(detour_between(&g, VertexId(0), VertexId(3)).is_none());
        assert!(detour_between(&g, VertexId(1), VertexId(1)).is_none());
    }

    #[test]
    fn point_query_snaps_to_vertices() {
        let net = Network::from_graph(chain(4));
        let d = detour_factor(&net, GeoPoint::new(0.0001, 0.0), GeoPoint::new(0.0, 0.0031)).unwrap().unwrap();
        assert_eq!((d.origin, d.destination), (VertexId(0), VertexId(3)));
    }

    #[test]
    fn sampled_statistics_are_ordered() {
        let g = grid(5);
        let cfg = DetourSampleConfig { pairs: 40, ..Default::default() };
        let s = detour_statistics(&g, &cfg).unwrap();
        assert_eq!(s.samples.len(), 40);
        assert_eq!(s.component_size, 25);
        assert!(s.min >= 1.0 - 1e-9);
        assert!(s.min <= s.p10 && s.p10 <= s.median && s.median <= s.p90 && s.p90 <= s.max);
        assert!(s.samples.iter().all(|d| d.straight_m >= 100.0));
        // Manhattan over Euclid never exceeds √2 on a lattice.
        assert!(s.max <= 2f64.sqrt() + 1e-3);
        assert_ne!(s.rating(), DetourRating::Poor);

        assert_eq!(detour_statistics(&g, &cfg).unwrap(), s);
    }

    #[test]
    fn sample_is_capped_by_available_pairs() {
        let s = detour_statistics(&chain(3), &DetourSampleConfig::default()).unwrap();
        assert!(s.samples.len() <= 3);
    }

    #[test]
    fn rating_bands() {
        assert_eq!(DetourRating::from_mean(1.1), DetourRating::Excellent);
        assert_eq!(DetourRating::from_mean(1.3), DetourRating::Good);
        assert_eq!(DetourRating::from_mean(1.5), DetourRating::Average);
        assert_eq!(DetourRating::from_mean(2.0), DetourRating::Poor);
    }

    #[test]
    fn zero_pairs_is_invalid() {
        let err = detour_statistics(&grid(3), &DetourSampleConfig { pairs: 0, ..Default::default() }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
