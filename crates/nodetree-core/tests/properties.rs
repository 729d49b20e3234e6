//! Property-based tests for freezing and link resolution.
//!
//! Generates random authoring trees (regular nodes mixed with reroutes, random
//! links, cycles allowed) and checks the invariants every frozen tree must
//! hold regardless of shape.

use proptest::prelude::*;
use nodetree_core::{
    AuthoringLink, AuthoringNode, AuthoringSocket, AuthoringTree, FreezeOptions, SocketId,
    TreeBuilder, VirtualTree,
};

/// `(is_reroute, inputs, outputs)` per node, then `(from_pick, to_pick)` per
/// link. Picks are reduced modulo the available sockets.
type Shape = (Vec<(bool, usize, usize)>, Vec<(usize, usize)>);

fn shape() -> impl Strategy<Value = Shape> {
    (
        prop::collection::vec((any::<bool>(), 0usize..4, 0usize..4), 1..16),
        prop::collection::vec((any::<usize>(), any::<usize>()), 0..32),
    )
}

fn build_tree((nodes, links): &Shape) -> AuthoringTree {
    let mut tree = AuthoringTree::new("random");
    let mut outputs = Vec::new();
    let mut inputs = Vec::new();

    for (index, &(is_reroute, n_in, n_out)) in nodes.iter().enumerate() {
        let name = format!("n{index}");
        let node = if is_reroute {
            outputs.push((name.clone(), "Output".to_string()));
            inputs.push((name.clone(), "Input".to_string()));
            AuthoringNode::new(&name, "NodeReroute")
                .with_input(AuthoringSocket::new("Input", "SocketAny"))
                .with_output(AuthoringSocket::new("Output", "SocketAny"))
        } else {
            let mut node = AuthoringNode::new(&name, format!("Kind{}", index % 3));
            for i in 0..n_in {
                let id = format!("in{i}");
                inputs.push((name.clone(), id.clone()));
                node = node.with_input(AuthoringSocket::new(id, "SocketFloat"));
            }
            for o in 0..n_out {
                let id = format!("out{o}");
                outputs.push((name.clone(), id.clone()));
                node = node.with_output(AuthoringSocket::new(id, "SocketFloat"));
            }
            node
        };
        tree = tree.with_node(node);
    }

    if !inputs.is_empty() && !outputs.is_empty() {
        for &(from, to) in links {
            let (from_node, from_socket) = &outputs[from % outputs.len()];
            let (to_node, to_socket) = &inputs[to % inputs.len()];
            tree = tree.with_link(AuthoringLink::new(
                from_node.as_str(),
                from_socket.as_str(),
                to_node.as_str(),
                to_socket.as_str(),
            ));
        }
    }
    tree
}

fn freeze<'a>(tree: &'a AuthoringTree, options: &FreezeOptions) -> VirtualTree<'a> {
    let mut builder = TreeBuilder::new();
    builder.add_all_of_tree(tree).unwrap();
    builder.freeze_and_index_with(options).unwrap()
}

fn resolved_ids(vtree: &VirtualTree<'_>) -> Vec<Vec<SocketId>> {
    vtree
        .sockets()
        .map(|s| s.links().map(|l| l.id()).collect())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Socket ids are `0..socket_count()`, grouped by node with inputs first.
    #[test]
    fn socket_ids_dense(shape in shape()) {
        let tree = build_tree(&shape);
        let vtree = freeze(&tree, &FreezeOptions::default());

        prop_assert_eq!(vtree.socket_count(), tree.socket_count());
        let mut next = 0;
        for node in vtree.nodes() {
            for socket in node.inputs() {
                prop_assert_eq!(socket.id().index(), next);
                next += 1;
            }
            for socket in node.outputs() {
                prop_assert_eq!(socket.id().index(), next);
                next += 1;
            }
        }
        prop_assert_eq!(next, vtree.socket_count());
    }

    /// Freezing the same authoring tree twice gives identical indices.
    #[test]
    fn freezing_is_deterministic(shape in shape()) {
        let tree = build_tree(&shape);
        let first = freeze(&tree, &FreezeOptions::default());
        let second = freeze(&tree, &FreezeOptions::default());

        prop_assert_eq!(first.stats(), second.stats());
        prop_assert_eq!(resolved_ids(&first), resolved_ids(&second));
    }

    /// Direct links are symmetric and mirror the authored link list.
    #[test]
    fn direct_links_are_symmetric(shape in shape()) {
        let tree = build_tree(&shape);
        let vtree = freeze(&tree, &FreezeOptions::default());

        let mut direct_total = 0;
        for socket in vtree.sockets() {
            for other in socket.direct_links() {
                prop_assert_ne!(other.direction(), socket.direction());
                prop_assert!(other.direct_links().any(|back| back == socket));
                direct_total += 1;
            }
        }
        prop_assert_eq!(direct_total, 2 * vtree.link_count());
    }

    /// Resolved links never point at pass-through nodes, never repeat, and
    /// always point at the opposite direction.
    #[test]
    fn resolved_links_skip_pass_through(shape in shape()) {
        let tree = build_tree(&shape);
        let vtree = freeze(&tree, &FreezeOptions::default());

        for socket in vtree.sockets() {
            let mut seen = Vec::new();
            for other in socket.links() {
                prop_assert!(!other.node().is_pass_through());
                prop_assert_ne!(other.direction(), socket.direction());
                prop_assert!(!seen.contains(&other.id()));
                seen.push(other.id());
            }
        }
    }

    /// With no pass-through idnames, resolved links equal direct links up to
    /// duplicates.
    #[test]
    fn literal_resolution_is_direct(shape in shape()) {
        let tree = build_tree(&shape);
        let vtree = freeze(&tree, &FreezeOptions::literal());

        for socket in vtree.sockets() {
            let mut direct: Vec<SocketId> = Vec::new();
            for other in socket.direct_links() {
                if !direct.contains(&other.id()) {
                    direct.push(other.id());
                }
            }
            let resolved: Vec<SocketId> = socket.links().map(|s| s.id()).collect();
            prop_assert_eq!(direct, resolved);
        }
    }

    /// `inputs_with_links` is exactly the linked inputs, in id order.
    #[test]
    fn inputs_with_links_matches_filter(shape in shape()) {
        let tree = build_tree(&shape);
        let vtree = freeze(&tree, &FreezeOptions::default());

        let expected: Vec<SocketId> = vtree
            .sockets()
            .filter(|s| s.is_input() && s.is_linked())
            .map(|s| s.id())
            .collect();
        let actual: Vec<SocketId> = vtree.inputs_with_links().map(|s| s.id()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Every node appears exactly once in the idname index.
    #[test]
    fn idname_index_partitions_nodes(shape in shape()) {
        let tree = build_tree(&shape);
        let vtree = freeze(&tree, &FreezeOptions::default());

        let total: usize = vtree.idnames().map(|idname| vtree.nodes_with_idname(idname).len()).sum();
        prop_assert_eq!(total, vtree.node_count());
    }
}
