//! Edge case tests for diagram parsing and generation
//!
//! Boundary conditions, unusual inputs and lenient decoding.

// =============================================================================
// Empty Input Tests
// =============================================================================

mod empty_inputs {
    use keelson::prelude::*;
    use keelson::{parse_er, parse_flowchart};

    #[test]
    fn test_flowchart_empty_input() {
        assert!(parse_flowchart("").is_empty());
        assert!(parse_flowchart("   \n\n  \t  \n").is_empty());
    }

    #[test]
    fn test_flowchart_header_only() {
        let graph = parse_flowchart("flowchart LR\n");
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_er_empty_input() {
        assert!(parse_er("").is_empty());
        assert!(parse_er("erDiagram").is_empty());
        assert!(parse_er("erDiagram\n\n   \n").is_empty());
    }

    #[test]
    fn test_er_without_header() {
        let graph = parse_er("USER ||--o{ ORDER : places");
        assert!(graph.is_empty());
    }
}

// =============================================================================
// Flowchart Parsing
// =============================================================================

mod flowchart_parsing {
    use keelson::prelude::*;
    use keelson::{generate_flowchart, parse_flowchart};
    use keelson::plugins::flowchart::detect_direction;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_comments_and_unknown_lines_are_dropped() {
        let graph = parse_flowchart(
            "flowchart TD
  %% A --> Hidden
  click A callback
  A --> B",
        );

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_redefinition_keeps_first_position() {
        let graph = parse_flowchart("A[One]\nB[Mid]\nA((Two))");

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].id, "A");
        assert_eq!(graph.nodes[0].label, "Two");
        assert_eq!(graph.nodes[0].shape, NodeShape::Circle);
        assert_eq!(graph.nodes[1].id, "B");
    }

    #[test]
    fn test_definition_wins_over_edge_decoration() {
        let graph = parse_flowchart("A[Defined]\nA(Other) --> B");

        assert_eq!(graph.nodes[0].label, "Defined");
        assert_eq!(graph.nodes[0].shape, NodeShape::Rectangle);
    }

    #[test]
    fn test_chained_edge_lines_are_dropped() {
        let graph = parse_flowchart("flowchart TD\n  A-->B-->C\n  A ==> B ==> C\n  A -.-> B -.-> C");
        assert!(graph.is_empty());
    }

    #[test]
    fn test_edge_decoration_labels_synthesized_rectangle() {
        let graph = parse_flowchart("A --> B((Round))");
        assert_eq!(graph.nodes[1].label, "Round");
        assert_eq!(graph.nodes[1].shape, NodeShape::Rectangle);
    }

    #[test]
    fn test_self_loop() {
        let graph = parse_flowchart("A --> A");
        assert_eq!(graph.node_count(), 1);
        assert!(graph.edges[0].is_self_loop());
    }

    #[test]
    fn test_quoted_edge_label_round_trip() {
        let graph = parse_flowchart(r#"A -->|"a.b"| B"#);
        assert_eq!(graph.edges[0].label, "a.b");

        let text = generate_flowchart(&graph, Direction::TopDown);
        assert!(text.contains(r#"A -->|"a.b"| B"#), "{text}");
    }

    #[test]
    fn test_cjk_identifiers() {
        let graph = parse_flowchart("開始[スタート] --> 終了");

        assert_eq!(graph.nodes[0].id, "開始");
        assert_eq!(graph.nodes[0].label, "スタート");
        assert_eq!(graph.nodes[1].id, "終了");
        assert_eq!(
            generate_flowchart(&graph, Direction::TopDown),
            "flowchart TD\n    開始[スタート]\n    終了[終了]\n    開始 --> 終了\n"
        );
    }

    #[test]
    fn test_detect_direction() {
        assert_eq!(detect_direction("graph TB\nA-->B"), Some(Direction::TopDown));
        assert_eq!(detect_direction("flowchart RL"), Some(Direction::RightLeft));
        assert_eq!(detect_direction("flowchart"), Some(Direction::TopDown));
        assert_eq!(detect_direction("A --> B"), None);
    }
}

// =============================================================================
// ER Parsing
// =============================================================================

mod er_parsing {
    use keelson::prelude::*;
    use keelson::parse_er;

    #[test]
    fn test_missing_relation_label_defaults() {
        let graph = parse_er("erDiagram\n  A ||--|| B :");
        assert_eq!(graph.relations.len(), 1);
        assert_eq!(graph.relations[0].label, "relation");
    }

    #[test]
    fn test_malformed_relation_is_dropped() {
        let graph = parse_er("erDiagram\n  A -- B : nope\n  A ||--|| B");
        assert!(graph.relations.is_empty());
    }

    #[test]
    fn test_unlisted_symbol_decodes_to_default() {
        let graph = parse_er("erDiagram\n  A |o--o| B : odd");
        assert_eq!(graph.relations[0].cardinality, Cardinality::OneToMany);
    }

    #[test]
    fn test_undashed_marker_symbols_decode_to_default() {
        let graph = parse_er("erDiagram\n  A |--| B : x\n  C }|--|{ D : y");
        assert_eq!(graph.relations.len(), 2);
        assert_eq!(graph.relations[0].cardinality, Cardinality::OneToMany);
        assert_eq!(graph.relations[1].cardinality, Cardinality::OneToMany);
    }

    #[test]
    fn test_column_attribute_tails() {
        let graph = parse_er(
            "erDiagram
  T {
    int id \"PK of table\"
    int x PK, FK
    string s NOT_NULL
    int code UK \"external\"
  }",
        );

        let table = graph.table_by_name("T").unwrap();
        let summary: Vec<(&str, bool, bool)> = table
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.pk, c.uk))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("id", true, false),
                ("x", true, false),
                ("s", false, false),
                ("code", false, true),
            ]
        );
    }

    #[test]
    fn test_column_with_two_keys_is_dropped() {
        let graph = parse_er(
            "erDiagram
  T {
    int id PK UK
    string name \"display name\"
  }",
        );

        let table = graph.table_by_name("T").unwrap();
        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.columns[0].name, "name");
    }

    #[test]
    fn test_comments_are_ignored() {
        let graph = parse_er("erDiagram\n  %% A ||--|| B : hidden\n  C ||--|| D : shown");
        let names: Vec<&str> = graph.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["C", "D"]);
    }

    #[test]
    fn test_columns_outside_block_are_ignored() {
        let graph = parse_er("erDiagram\n  int id PK\n  }\n  A {\n  }");
        assert_eq!(graph.tables.len(), 1);
        assert!(graph.tables[0].columns.is_empty());
    }
}

// =============================================================================
// Lenient JSON Decoding
// =============================================================================

mod json_decoding {
    use keelson::prelude::*;

    #[test]
    fn test_unknown_enum_names_fall_back() {
        let graph = FlowchartGraph::from_json(
            r#"{"nodes":[{"id":"A","label":"x","shapeType":"trapezoid"}],
                "edges":[{"id":"e1","source":"A","target":"A","arrowType":"wavy"}]}"#,
        )
        .unwrap();

        assert_eq!(graph.nodes[0].shape, NodeShape::Rectangle);
        assert_eq!(graph.nodes[0].variable_name, None);
        assert_eq!(graph.edges[0].arrow_type, ArrowType::Arrow);
        assert_eq!(graph.edges[0].label, "");

        let graph = ErGraph::from_json(
            r#"{"tables":[],"relations":[{"id":"r1","source":"A","target":"B","cardinality":"lots"}]}"#,
        )
        .unwrap();
        assert_eq!(graph.relations[0].cardinality, Cardinality::OneToMany);
        assert_eq!(graph.relations[0].label, "relation");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = FlowchartGraph::from_json("{nodes:").unwrap_err();
        assert!(err.to_string().contains("JSON error"));
        assert!(ErGraph::from_json("42").is_err());
    }

    #[test]
    fn test_unknown_direction_falls_back() {
        let direction: Direction = serde_json::from_str(r#""sideways""#).unwrap();
        assert_eq!(direction, Direction::TopDown);
        assert!("sideways".parse::<Direction>().is_err());
    }
}

// =============================================================================
// Geometry
// =============================================================================

mod geometry {
    use keelson::prelude::*;
    use keelson::{calculate_edge_offset, detect_parallel_edges};

    fn assert_close(actual: EdgeOffset, x: f64, y: f64) {
        assert!((actual.offset_x - x).abs() < 1e-9, "{actual:?}");
        assert!((actual.offset_y - y).abs() < 1e-9, "{actual:?}");
    }

    #[test]
    fn test_self_loops_spread_on_circles() {
        let edges = vec![FlowEdge::new("e1", "A", "A"), FlowEdge::new("e2", "A", "A")];

        assert_close(calculate_edge_offset(&edges[0], &edges, 20.0), 20.0, 0.0);
        assert_close(calculate_edge_offset(&edges[1], &edges, 20.0), -40.0, 0.0);
    }

    #[test]
    fn test_parallel_edges_are_centered() {
        let edges = vec![
            FlowEdge::new("e1", "A", "B"),
            FlowEdge::new("e2", "A", "B"),
            FlowEdge::new("e3", "A", "B"),
            FlowEdge::new("e4", "B", "C"),
        ];

        let groups = detect_parallel_edges(&edges);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["A->B"].len(), 3);

        assert_close(calculate_edge_offset(&edges[0], &edges, 20.0), 0.0, -20.0);
        assert_close(calculate_edge_offset(&edges[1], &edges, 20.0), 0.0, 0.0);
        assert_close(calculate_edge_offset(&edges[2], &edges, 20.0), 0.0, 20.0);
        assert_close(calculate_edge_offset(&edges[3], &edges, 20.0), 0.0, 0.0);
    }

    #[test]
    fn test_cycle_takes_priority_over_parallel() {
        let edges = vec![
            FlowEdge::new("e1", "A", "B"),
            FlowEdge::new("e2", "A", "B"),
            FlowEdge::new("e3", "B", "A"),
        ];

        // Group "A-B" is [e1, e2, e3]
        assert_close(calculate_edge_offset(&edges[0], &edges, 10.0), 10.0, 10.0);
        assert_close(calculate_edge_offset(&edges[1], &edges, 10.0), -10.0, -10.0);
        assert_close(calculate_edge_offset(&edges[2], &edges, 10.0), -20.0, 20.0);
    }

    #[test]
    fn test_unknown_edge_is_not_moved() {
        let edges = vec![FlowEdge::new("e1", "A", "B"), FlowEdge::new("e2", "B", "A")];
        let stranger = FlowEdge::new("x", "A", "B");

        assert_eq!(calculate_edge_offset(&stranger, &edges, 20.0), EdgeOffset::ZERO);
    }
}
