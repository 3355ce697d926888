use crate::error::Error;
use crate::net::{Node, Topology};

const GBPS: u64 = 1_000_000_000;

fn topology_with(nodes: &[&str], links: &[(&str, &str)]) -> Topology {
    let mut topo = Topology::new();
    for name in nodes {
        topo.add_node(Node::switch(*name).unwrap()).unwrap();
    }
    for (a, b) in links {
        topo.add_link(a, b, GBPS).unwrap();
    }
    topo
}

#[test]
fn shortest_path_follows_a_line() {
    let topo = topology_with(
        &["h0", "s0", "s1", "h1"],
        &[("h0", "s0"), ("s0", "s1"), ("s1", "h1")],
    );
    let path = topo.shortest_path("h0", "h1").unwrap();
    assert_eq!(path, vec!["h0", "s0", "s1", "h1"]);
}

#[test]
fn shortest_path_takes_fewest_hops_on_a_diamond() {
    // a - b - d and a - c - d, plus a detour b - e - d.
    let topo = topology_with(
        &["a", "b", "c", "d", "e"],
        &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("b", "e"), ("e", "d")],
    );
    let path = topo.shortest_path("a", "d").unwrap();
    assert_eq!(path.len(), 3, "expected a 2-hop path, got {path:?}");
    assert_eq!(path.first().map(String::as_str), Some("a"));
    assert_eq!(path.last().map(String::as_str), Some("d"));
    // Either middle node is a valid shortest path; the tie-break is not API.
    assert!(path[1] == "b" || path[1] == "c", "unexpected middle {path:?}");
}

#[test]
fn shortest_path_to_itself_is_the_single_node() {
    let topo = topology_with(&["a", "b"], &[("a", "b")]);
    assert_eq!(topo.shortest_path("a", "a").unwrap(), vec!["a"]);
}

#[test]
fn disconnected_queries_fail_with_no_path_found() {
    let topo = topology_with(&["a", "b", "c", "d"], &[("a", "b"), ("c", "d")]);
    let err = topo.shortest_path("a", "d").unwrap_err();
    assert!(matches!(err, Error::NoPathFound { .. }), "got {err}");
}

#[test]
fn unknown_endpoints_fail_with_unknown_node() {
    let topo = topology_with(&["a", "b"], &[("a", "b")]);
    assert!(matches!(
        topo.shortest_path("a", "ghost").unwrap_err(),
        Error::UnknownNode(_)
    ));
    assert!(matches!(
        topo.shortest_path("ghost", "b").unwrap_err(),
        Error::UnknownNode(_)
    ));
}
