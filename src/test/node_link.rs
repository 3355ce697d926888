use crate::error::Error;
use crate::net::{Node, NodeKind, Port, Topology, canonical_name, split_directed_name};

#[test]
fn node_name_may_not_contain_separator() {
    let err = Node::switch("sw-0").unwrap_err();
    assert!(
        matches!(err, Error::InvalidTopologyConstruction(_)),
        "unexpected error: {err}"
    );
    assert!(Node::host("").is_err());
    assert!(Node::host("h0").is_ok());
}

#[test]
fn node_identity_is_kind_and_name() {
    let a = Node::switch("a").unwrap();
    let b = Node::switch("a").unwrap();
    let c = Node::host("a").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.kind(), NodeKind::Switch);
    assert_eq!(c.kind(), NodeKind::Host);
}

#[test]
fn link_name_is_canonical_regardless_of_argument_order() {
    let mut topo = Topology::new();
    topo.add_node(Node::host("b").unwrap()).unwrap();
    topo.add_node(Node::host("a").unwrap()).unwrap();
    let name = topo.add_link("b", "a", 1_000_000_000).unwrap().name().to_string();
    assert_eq!(name, "a-b");

    let fwd = topo.link_between("a", "b").expect("link a,b");
    let rev = topo.link_between("b", "a").expect("link b,a");
    assert_eq!(fwd.name(), rev.name());
    assert_eq!(fwd.bandwidth_bps(), rev.bandwidth_bps());
}

#[test]
fn ports_are_assigned_sequentially_per_node() {
    let mut topo = Topology::new();
    topo.add_node(Node::switch("s0").unwrap()).unwrap();
    for host in ["h1", "h2", "h3"] {
        topo.add_node(Node::host(host).unwrap()).unwrap();
    }
    topo.add_link("s0", "h1", 1_000_000_000).unwrap();
    topo.add_link("s0", "h2", 1_000_000_000).unwrap();
    topo.add_link("s0", "h3", 1_000_000_000).unwrap();

    // The switch's counter advances once per attached link; every host got
    // its first port.
    for (i, host) in ["h1", "h2", "h3"].iter().enumerate() {
        let link = topo.link_between("s0", host).unwrap();
        assert_eq!(link.port_of("s0").unwrap(), Port(i as u32 + 1));
        assert_eq!(link.port_of(host).unwrap(), Port(1));
        assert_eq!(link.other_end("s0"), *host);
        assert_eq!(link.other_end(host), "s0");
    }
}

#[test]
fn self_links_and_unregistered_endpoints_are_rejected() {
    let mut topo = Topology::new();
    topo.add_node(Node::host("a").unwrap()).unwrap();

    let err = topo.add_link("a", "a", 1_000_000_000).unwrap_err();
    assert!(matches!(err, Error::InvalidTopologyConstruction(_)));

    let err = topo.add_link("a", "ghost", 1_000_000_000).unwrap_err();
    assert!(matches!(err, Error::InvalidTopologyConstruction(_)));
}

#[test]
fn relinking_an_existing_pair_is_rejected() {
    let mut topo = Topology::new();
    topo.add_node(Node::host("a").unwrap()).unwrap();
    topo.add_node(Node::host("b").unwrap()).unwrap();
    topo.add_link("a", "b", 1_000_000_000).unwrap();

    // Same pair in either order: rejected, and no further ports are burned.
    assert!(topo.add_link("b", "a", 500_000_000).is_err());
    let link = topo.link_between("a", "b").unwrap();
    assert_eq!(link.port_of("a").unwrap(), Port(1));
    assert_eq!(link.port_of("b").unwrap(), Port(1));
}

#[test]
fn directed_names_round_trip_and_reject_malformed_strings() {
    assert_eq!(split_directed_name("a-b").unwrap(), ("a", "b"));
    for bad in ["ab", "a-b-c", "-b", "a-", "-"] {
        let err = split_directed_name(bad).unwrap_err();
        assert!(
            matches!(err, Error::UnknownDirectedLink(_)),
            "expected UnknownDirectedLink for {bad:?}, got {err}"
        );
    }
    assert_eq!(canonical_name("b", "a"), "a-b");
    assert_eq!(canonical_name("a", "b"), "a-b");
}
