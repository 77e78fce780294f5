//! Generate-then-parse round trips over random graphs

use keelson::prelude::*;
use keelson::{generate_flowchart, parse_er, parse_flowchart};
use proptest::prelude::*;

fn shape() -> impl Strategy<Value = NodeShape> {
    prop::sample::select(NodeShape::ALL.to_vec())
}

fn arrow() -> impl Strategy<Value = ArrowType> {
    prop::sample::select(ArrowType::ALL.to_vec())
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn node_label() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,7}( [A-Za-z0-9]{1,6})?"
}

fn edge_label() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z]{1,6}"]
}

prop_compose! {
    fn flowchart()(
        nodes in prop::collection::vec((node_label(), shape()), 1..6),
        edges in prop::collection::vec((any::<usize>(), any::<usize>(), arrow(), edge_label()), 0..8),
    ) -> FlowchartGraph {
        let mut graph = FlowchartGraph::new();
        for (i, (label, shape)) in nodes.iter().enumerate() {
            graph.add_node(FlowNode::with_shape(format!("n{i}"), label.clone(), *shape));
        }
        for (i, (from, to, arrow, label)) in edges.into_iter().enumerate() {
            graph.add_edge(
                FlowEdge::new(
                    format!("edge{i}"),
                    format!("n{}", from % nodes.len()),
                    format!("n{}", to % nodes.len()),
                )
                .with_arrow(arrow)
                .with_label(label),
            );
        }
        graph
    }
}

proptest! {
    #[test]
    fn flowchart_survives_generation(graph in flowchart(), direction in direction()) {
        let text = generate_flowchart(&graph, direction);
        let parsed = parse_flowchart(&text);

        prop_assert_eq!(parsed.nodes.len(), graph.nodes.len(), "{}", text);
        for (original, reparsed) in graph.nodes.iter().zip(&parsed.nodes) {
            prop_assert_eq!(&reparsed.id, &original.id);
            prop_assert_eq!(&reparsed.label, &original.label);
            prop_assert_eq!(reparsed.shape, original.shape);
        }

        prop_assert_eq!(parsed.edges.len(), graph.edges.len(), "{}", text);
        for (original, reparsed) in graph.edges.iter().zip(&parsed.edges) {
            prop_assert_eq!(&reparsed.source, &original.source);
            prop_assert_eq!(&reparsed.target, &original.target);
            prop_assert_eq!(&reparsed.label, &original.label);
            prop_assert_eq!(reparsed.arrow_type, original.arrow_type);
        }
    }

    #[test]
    fn er_cardinality_survives_generation(
        cardinalities in prop::collection::vec(prop::sample::select(Cardinality::ALL.to_vec()), 1..6),
    ) {
        let mut graph = ErGraph::new();
        graph.add_node(Table::new("LEFT"));
        graph.add_node(Table::new("RIGHT"));
        for (i, cardinality) in cardinalities.iter().enumerate() {
            graph.add_edge(
                Relation::new(format!("r{}", i + 1), "LEFT", "RIGHT").with_cardinality(*cardinality),
            );
        }

        let text = ErGenerator::new().generate(&graph);
        let parsed = parse_er(&text);

        let recovered: Vec<Cardinality> = parsed.relations.iter().map(|r| r.cardinality).collect();
        prop_assert_eq!(recovered, cardinalities);
    }
}

#[test]
fn test_reserved_identifiers_are_prefixed_once() {
    let mut graph = FlowchartGraph::new();
    graph.add_node(FlowNode::new("end", "Finish"));
    graph.add_node(FlowNode::with_shape("start", "Begin", NodeShape::Stadium));
    graph.add_edge(FlowEdge::new("e1", "start", "end"));

    let text = generate_flowchart(&graph, Direction::TopDown);
    let parsed = parse_flowchart(&text);

    let ids: Vec<&str> = parsed.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["node_end", "node_start"]);
    assert_eq!(parsed.nodes[1].shape, NodeShape::Stadium);
    assert_eq!(parsed.edges[0].source, "node_start");
    assert_eq!(parsed.edges[0].target, "node_end");

    // Regenerating the parsed graph leaves the prefixed names alone
    assert_eq!(
        generate_flowchart(&parsed, Direction::TopDown),
        "flowchart TD\n    node_end[Finish]\n    node_start([Begin])\n    node_start --> node_end\n"
    );
}
