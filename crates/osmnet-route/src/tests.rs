//! Unit tests for osmnet-route.
//!
//! Networks are hand-built with explicit lengths and times so expected
//! costs can be asserted exactly.

#[cfg(test)]
mod helpers {
    use osmnet_core::{GeoPoint, ModeSet, OsmNode, OsmWay, TravelMode, VertexId};
    use osmnet_graph::{Network, RoadGraph, RoadGraphBuilder, RoutingProfiles, WayInfo};

    /// `(a, b, length_m, time_s, name)` segments over the given positions.
    /// Two-way unless `directed`.
    pub fn graph(
        points: &[(f64, f64)],
        segments: &[(u32, u32, f64, f64, &str)],
        directed: bool,
    ) -> RoadGraph {
        let mut b = RoadGraphBuilder::new(TravelMode::Drive);
        for (i, &(lat, lon)) in points.iter().enumerate() {
            b.add_vertex(i as i64 + 1, GeoPoint::new(lat, lon));
        }
        for (i, &(a, c, len, time, name)) in segments.iter().enumerate() {
            let way = b.add_way(WayInfo::new(100 + i as i64, "residential").named(name));
            let modes = ModeSet::only(TravelMode::Drive);
            if directed {
                b.add_directed_edge(VertexId(a), VertexId(c), way, len, time, modes);
            } else {
                b.add_segment(VertexId(a), VertexId(c), way, len, time, modes);
            }
        }
        b.build()
    }

    /// ```text
    ///   3 ──Top── 4
    ///   │         │
    ///  West     North
    ///   │         │
    ///   0 ─Main─ 1 ─Main─ 2
    /// ```
    ///
    /// Fastest 0→4 is 0-1-2-4 (30 s, 300 m); shortest is 0-3-4 (40+15 s, 150 m).
    pub fn diamond() -> RoadGraph {
        graph(
            &[(0.0, 0.0), (0.0, 0.001), (0.0, 0.002), (0.001, 0.0), (0.001, 0.002)],
            &[
                (0, 1, 100.0, 10.0, "Main"),
                (1, 2, 100.0, 10.0, "Main"),
                (2, 4, 100.0, 10.0, "North"),
                (0, 3, 50.0, 40.0, "West"),
                (3, 4, 100.0, 15.0, "Top"),
            ],
            false,
        )
    }

    /// A–B–C.
    pub fn chain() -> RoadGraph {
        graph(
            &[(0.0, 0.0), (0.0, 0.001), (0.0, 0.002)],
            &[(0, 1, 100.0, 10.0, "A"), (1, 2, 100.0, 10.0, "B")],
            false,
        )
    }

    /// Two separate two-vertex roads.
    pub fn split() -> RoadGraph {
        graph(
            &[(0.0, 0.0), (0.0, 0.001), (0.01, 0.0), (0.01, 0.001)],
            &[(0, 1, 100.0, 10.0, "Left"), (2, 3, 100.0, 10.0, "Right")],
            false,
        )
    }

    /// Oneway triangle 0→1→2→0.
    pub fn oneway_loop() -> RoadGraph {
        graph(
            &[(0.0, 0.0), (0.0, 0.001), (0.001, 0.0)],
            &[(0, 1, 100.0, 10.0, "a"), (1, 2, 150.0, 15.0, "b"), (2, 0, 120.0, 12.0, "c")],
            true,
        )
    }

    /// Elements around Sydney for point-level queries.
    pub fn sydney(mode: TravelMode) -> Network {
        let nodes = vec![
            OsmNode::new(1, -33.900, 151.200),
            OsmNode::new(2, -33.900, 151.201),
            OsmNode::new(3, -33.901, 151.201),
        ];
        let ways = vec![
            OsmWay::new(10, vec![1, 2, 3]).with_tag("highway", "residential").with_tag("name", "George St"),
        ];
        let set = osmnet_core::ElementSet::new(nodes, ways);
        Network::build(&set, mode, &RoutingProfiles::default())
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dijkstra {
    use osmnet_core::{EdgeId, Optimize, SampleRng, VertexId};
    use osmnet_graph::RoadGraph;

    use super::helpers::{diamond, graph};
    use crate::shortest_path_tree;

    #[test]
    fn full_tree_costs() {
        let g = diamond();
        let tree = shortest_path_tree(&g, VertexId(0), &Optimize::Time, None, None);
        let costs: Vec<f64> = (0..5).map(|i| tree.cost[i]).collect();
        assert_eq!(costs, [0.0, 10.0, 20.0, 40.0, 30.0]);
        assert_eq!(tree.settled[0], VertexId(0));
        assert!(tree.prev_edge[0] == EdgeId::INVALID);
    }

    #[test]
    fn cost_limit_bounds_search() {
        let g = diamond();
        let tree = shortest_path_tree(&g, VertexId(0), &Optimize::Time, None, Some(15.0));
        assert_eq!(tree.settled, [VertexId(0), VertexId(1)]);
        assert!(!tree.reached(VertexId(2)));
        assert_eq!(tree.cost_to(VertexId(4)), None);
    }

    #[test]
    fn accumulate_follows_tree() {
        let g = diamond();
        let tree = shortest_path_tree(&g, VertexId(0), &Optimize::Time, None, None);
        let dist = tree.accumulate(&g, |e| g.edge_length_m[e.index()]);
        assert_eq!(dist[4], 300.0);
        assert_eq!(dist[3], 50.0);
    }

    /// Minimum cost over all simple paths by exhaustive DFS.
    fn brute_force(g: &RoadGraph, from: VertexId, to: VertexId) -> Option<f64> {
        fn dfs(g: &RoadGraph, v: VertexId, to: VertexId, seen: &mut Vec<bool>, acc: f64, best: &mut Option<f64>) {
            if v == to {
                *best = Some(best.map_or(acc, |b: f64| b.min(acc)));
                return;
            }
            for e in g.out_edges(v) {
                let next = g.edge_to[e.index()];
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    dfs(g, next, to, seen, acc + g.edge_time_s[e.index()], best);
                    seen[next.index()] = false;
                }
            }
        }
        let mut seen = vec![false; g.vertex_count()];
        seen[from.index()] = true;
        let mut best = None;
        dfs(g, from, to, &mut seen, 0.0, &mut best);
        best
    }

    #[test]
    fn matches_brute_force_on_random_graphs() {
        for seed in 0..20u64 {
            let mut rng = SampleRng::new(seed);
            let n = 7usize;
            let points: Vec<(f64, f64)> = (0..n).map(|i| (0.0, i as f64 * 0.001)).collect();
            let mut segs = Vec::new();
            for _ in 0..12 {
                let a = rng.gen_range(0..n as u32);
                let b = rng.gen_range(0..n as u32);
                let t: f64 = rng.gen_range(1.0..50.0);
                segs.push((a, b, t * 10.0, t, "r"));
            }
            let g = graph(&points, &segs, true);

            for from in 0..n as u32 {
                let tree = shortest_path_tree(&g, VertexId(from), &Optimize::Time, None, None);
                for to in 0..n as u32 {
                    let expected = brute_force(&g, VertexId(from), VertexId(to));
                    let got = tree.cost_to(VertexId(to));
                    match (expected, got) {
                        (None, None) => {}
                        (Some(want), Some(have)) => {
                            assert!((want - have).abs() < 1e-9, "seed {seed}: {from}->{to} {want} vs {have}")
                        }
                        other => panic!("seed {seed}: {from}->{to} reachability mismatch {other:?}"),
                    }
                }
            }
        }
    }
}

// ── Routes ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use osmnet_core::{GeoPoint, Optimize, TravelMode, VertexId};

    use super::helpers::{diamond, split, sydney};
    use crate::{DijkstraRouter, PathOutcome, Router, route_between};

    #[test]
    fn same_vertex_is_trivial() {
        let g = diamond();
        let r = DijkstraRouter.shortest_path(&g, VertexId(2), VertexId(2), Optimize::Time);
        let r = r.into_route().unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.vertices, [VertexId(2)]);
        assert_eq!(r.distance_m, 0.0);
        assert_eq!(r.time_s, 0.0);
    }

    #[test]
    fn fastest_and_shortest_differ() {
        let g = diamond();
        let fast = DijkstraRouter.shortest_path(&g, VertexId(0), VertexId(4), Optimize::Time);
        let fast = fast.route().unwrap();
        assert_eq!(fast.vertices, [VertexId(0), VertexId(1), VertexId(2), VertexId(4)]);
        assert_eq!(fast.time_s, 30.0);
        assert_eq!(fast.distance_m, 300.0);

        let short = DijkstraRouter.shortest_path(&g, VertexId(0), VertexId(4), Optimize::Distance);
        let short = short.route().unwrap();
        assert_eq!(short.vertices, [VertexId(0), VertexId(3), VertexId(4)]);
        assert_eq!(short.distance_m, 150.0);
        assert_eq!(short.time_s, 55.0);
    }

    #[test]
    fn disconnected_is_unreachable() {
        let g = split();
        let r = DijkstraRouter.shortest_path(&g, VertexId(0), VertexId(3), Optimize::Time);
        assert_eq!(r, PathOutcome::Unreachable);
    }

    #[test]
    fn route_detail() {
        let g = diamond();
        let r = DijkstraRouter.shortest_path(&g, VertexId(0), VertexId(4), Optimize::Time).into_route().unwrap();
        assert_eq!(r.way_transitions(&g), ["Main", "North"]);
        assert_eq!(r.polyline(&g).len(), 4);
        let segs = r.segments(&g);
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2].name.as_deref(), Some("North"));
        assert_eq!(segs[0].from, GeoPoint::new(0.0, 0.0));
    }

    #[test]
    fn origin_equals_destination_by_point() {
        let net = sydney(TravelMode::Drive);
        let p = GeoPoint::new(-33.900, 151.200);
        let outcome = route_between(&net, &DijkstraRouter, p, p, Optimize::Time).unwrap();
        assert_eq!(outcome.route().unwrap().distance_m, 0.0);
    }

    #[test]
    fn route_between_points() {
        let net = sydney(TravelMode::Walk);
        let outcome = route_between(
            &net,
            &DijkstraRouter,
            GeoPoint::new(-33.900, 151.200),
            GeoPoint::new(-33.901, 151.201),
            Optimize::Distance,
        )
        .unwrap();
        let r = outcome.route().unwrap();
        assert_eq!(r.edges.len(), 2);
        assert!((r.distance_m - (92.4 + 111.2)).abs() < 1.0, "got {}", r.distance_m);
    }
}

// ── Waypoints ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod waypoints {
    use osmnet_core::{ErrorKind, Optimize, VertexId};

    use super::helpers::{diamond, split};
    use crate::{DijkstraRouter, WaypointOutcome, route_waypoints};

    #[test]
    fn needs_two_waypoints() {
        let g = diamond();
        let err = route_waypoints(&g, &DijkstraRouter, &[VertexId(0)], Optimize::Time).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn legs_are_concatenated_in_order() {
        let g = diamond();
        let out = route_waypoints(&g, &DijkstraRouter, &[VertexId(0), VertexId(2), VertexId(3)], Optimize::Time)
            .unwrap();
        let WaypointOutcome::Found(multi) = out else { panic!("expected a route") };
        assert_eq!(multi.legs.len(), 2);
        assert_eq!(
            multi.route.vertices,
            [VertexId(0), VertexId(1), VertexId(2), VertexId(4), VertexId(3)]
        );
        assert_eq!(multi.route.time_s, 45.0);
        assert_eq!(multi.route.edges.len(), multi.route.vertices.len() - 1);
    }

    #[test]
    fn reports_failing_leg() {
        let g = split();
        let out = route_waypoints(&g, &DijkstraRouter, &[VertexId(1), VertexId(0), VertexId(2)], Optimize::Time)
            .unwrap();
        assert_eq!(out, WaypointOutcome::LegUnreachable { leg: 1, from: VertexId(0), to: VertexId(2) });
    }
}

// ── Alternatives ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod alternatives {
    use osmnet_core::{ErrorKind, Optimize, VertexId};

    use super::helpers::{chain, diamond, split};
    use crate::{AlternativesConfig, alternative_routes};

    #[test]
    fn zero_count_is_invalid() {
        let err = alternative_routes(&diamond(), VertexId(0), VertexId(4), 0, Optimize::Time, &AlternativesConfig::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn chain_has_exactly_one_route() {
        let routes = alternative_routes(&chain(), VertexId(0), VertexId(2), 100, Optimize::Time, &AlternativesConfig::default())
            .unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].time_s, 20.0);
    }

    #[test]
    fn diamond_offers_two_distinct_routes() {
        let routes = alternative_routes(&diamond(), VertexId(0), VertexId(4), 3, Optimize::Time, &AlternativesConfig::default())
            .unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].time_s, 30.0);
        assert_eq!(routes[1].vertices, [VertexId(0), VertexId(3), VertexId(4)]);
        // True cost, not the penalised one.
        assert_eq!(routes[1].time_s, 55.0);
        assert!(routes[1].overlap(&routes[0]) < 0.8);
    }

    #[test]
    fn degenerate_queries() {
        let cfg = AlternativesConfig::default();
        let same = alternative_routes(&diamond(), VertexId(1), VertexId(1), 5, Optimize::Time, &cfg).unwrap();
        assert_eq!(same.len(), 1);
        assert!(same[0].is_trivial());

        let none = alternative_routes(&split(), VertexId(0), VertexId(2), 5, Optimize::Time, &cfg).unwrap();
        assert!(none.is_empty());
    }
}

// ── Directions ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod directions {
    use osmnet_core::{Optimize, VertexId};

    use super::helpers::diamond;
    use crate::{DijkstraRouter, Maneuver, Route, Router, directions};

    #[test]
    fn turn_bands() {
        assert_eq!(Maneuver::from_delta(5.0), Maneuver::Straight);
        assert_eq!(Maneuver::from_delta(-19.9), Maneuver::Straight);
        assert_eq!(Maneuver::from_delta(45.0), Maneuver::SlightRight);
        assert_eq!(Maneuver::from_delta(-90.0), Maneuver::Left);
        assert_eq!(Maneuver::from_delta(150.0), Maneuver::SharpRight);
        assert_eq!(Maneuver::from_delta(-150.0), Maneuver::SharpLeft);
        assert_eq!(Maneuver::from_delta(180.0), Maneuver::UTurn);
    }

    #[test]
    fn groups_by_road_and_classifies_turns() {
        let g = diamond();
        let r = DijkstraRouter.shortest_path(&g, VertexId(0), VertexId(4), Optimize::Time).into_route().unwrap();
        let steps = directions(&g, &r);
        let kinds: Vec<Maneuver> = steps.iter().map(|s| s.maneuver).collect();
        assert_eq!(kinds, [Maneuver::Depart, Maneuver::Left, Maneuver::Arrive]);
        assert_eq!(steps[0].text(), "Head east on Main");
        assert_eq!(steps[0].distance_m, 200.0);
        assert_eq!(steps[1].text(), "Turn left onto North");
        assert_eq!(steps[2].text(), "Arrive at destination");

        let total: f64 = steps.iter().map(|s| s.distance_m).sum();
        assert_eq!(total, r.distance_m);
    }

    #[test]
    fn trivial_route_only_arrives() {
        let g = diamond();
        let steps = directions(&g, &Route::trivial(VertexId(3)));
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].maneuver, Maneuver::Arrive);
    }
}

// ── Distance matrix ───────────────────────────────────────────────────────────

#[cfg(test)]
mod matrix {
    use osmnet_core::{ErrorKind, GeoPoint, Optimize, TravelMode};
    use osmnet_graph::Network;

    use super::helpers::{diamond, oneway_loop, sydney};
    use crate::distance_matrix;

    fn positions(net: &Network) -> Vec<GeoPoint> {
        net.graph.vertex_pos.clone()
    }

    #[test]
    fn needs_two_points() {
        let net = Network::from_graph(diamond());
        let err = distance_matrix(&net, &[GeoPoint::new(0.0, 0.0)], Optimize::Time).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn two_way_network_is_symmetric() {
        let net = Network::from_graph(diamond());
        let m = distance_matrix(&net, &positions(&net), Optimize::Time).unwrap();
        for i in 0..m.len() {
            assert_eq!(m.distance_m[i][i], Some(0.0));
            for j in 0..m.len() {
                let (a, b) = (m.time_s[i][j].unwrap(), m.time_s[j][i].unwrap());
                assert!((a - b).abs() < 1e-9);
            }
        }
        assert_eq!(m.time_s[0][4], Some(30.0));
        assert_eq!(m.distance_m[0][4], Some(300.0));
    }

    #[test]
    fn walk_mode_matrix_is_symmetric() {
        let net = sydney(TravelMode::Walk);
        let m = distance_matrix(&net, &positions(&net), Optimize::Distance).unwrap();
        for i in 0..m.len() {
            for j in 0..m.len() {
                assert!((m.distance_m[i][j].unwrap() - m.distance_m[j][i].unwrap()).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn oneway_network_is_asymmetric() {
        let net = Network::from_graph(oneway_loop());
        let m = distance_matrix(&net, &positions(&net), Optimize::Time).unwrap();
        assert_eq!(m.time_s[0][1], Some(10.0));
        assert_eq!(m.time_s[1][0], Some(27.0));
        assert_eq!(m.unreachable_pairs(), 0);
    }

    #[test]
    fn unresolved_point_only_blanks_its_row_and_column() {
        let net = Network::from_graph(diamond()).with_max_snap(Some(1_000.0));
        let pts = [GeoPoint::new(0.0, 0.0), GeoPoint::new(5.0, 5.0), GeoPoint::new(0.001, 0.002)];
        let m = distance_matrix(&net, &pts, Optimize::Time).unwrap();
        assert!(m.vertices[1].is_none());
        assert!(m.time_s[1].iter().all(Option::is_none));
        assert!(m.time_s.iter().all(|row| row[1].is_none()));
        assert_eq!(m.time_s[0][2], Some(30.0));
        assert_eq!(m.unreachable_pairs(), 4);
    }
}

// ── Reachability ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod reach {
    use osmnet_core::{ErrorKind, VertexId};

    use super::helpers::diamond;
    use crate::{IsochroneConfig, batch_isochrones, isochrone};

    #[test]
    fn bands_are_monotone() {
        let g = diamond();
        let iso = isochrone(&g, VertexId(0), &[45.0, 10.0, 30.0, 10.0], &IsochroneConfig::default()).unwrap();
        let thresholds: Vec<f64> = iso.bands.iter().map(|b| b.threshold_s).collect();
        assert_eq!(thresholds, [10.0, 30.0, 45.0]);

        assert_eq!(iso.bands[0].vertices, [VertexId(0), VertexId(1)]);
        assert_eq!(iso.bands[1].vertices, [VertexId(0), VertexId(1), VertexId(2), VertexId(4)]);
        assert_eq!(iso.bands[2].vertices.len(), 5);

        for pair in iso.bands.windows(2) {
            assert!(pair[0].vertices.iter().all(|v| pair[1].vertices.contains(v)));
            assert!(pair[0].max_distance_m <= pair[1].max_distance_m);
        }
    }

    #[test]
    fn boundaries_are_nested() {
        let g = diamond();
        let cfg = IsochroneConfig { resolution: 8 };
        let iso = isochrone(&g, VertexId(0), &[10.0, 45.0], &cfg).unwrap();
        let (inner, outer) = (&iso.bands[0].boundary, &iso.bands[1].boundary);
        assert_eq!(inner.len(), 8);
        assert_eq!(outer.len(), 8);
        for (a, b) in inner.iter().zip(outer) {
            assert!(iso.center.distance_m(*a) <= iso.center.distance_m(*b) + 1e-6);
        }
    }

    #[test]
    fn zero_threshold_is_degenerate_point() {
        let g = diamond();
        let iso = isochrone(&g, VertexId(0), &[0.0], &IsochroneConfig::default()).unwrap();
        assert_eq!(iso.bands[0].vertices, [VertexId(0)]);
        assert_eq!(iso.bands[0].boundary, [iso.center]);
    }

    #[test]
    fn rejects_bad_parameters() {
        let g = diamond();
        let cfg = IsochroneConfig::default();
        assert_eq!(isochrone(&g, VertexId(0), &[], &cfg).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert!(isochrone(&g, VertexId(0), &[-5.0], &cfg).is_err());
        assert!(isochrone(&g, VertexId(0), &[f64::NAN], &cfg).is_err());
        assert!(isochrone(&g, VertexId(0), &[10.0], &IsochroneConfig { resolution: 2 }).is_err());
    }

    #[test]
    fn batch_preserves_origin_order() {
        let g = diamond();
        let origins = [VertexId(4), VertexId(0), VertexId(2)];
        let out = batch_isochrones(&g, &origins, &[20.0], &IsochroneConfig::default()).unwrap();
        let got: Vec<VertexId> = out.iter().map(|i| i.origin).collect();
        assert_eq!(got, origins);
    }
}
