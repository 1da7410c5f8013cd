use std::io::Write;
use tricount::{
    load_config, load_graph, Algorithm, GraphFormat, GraphSpec, IntersectionStrategy, TriangleCounter,
    TriangleError,
};

#[test]
fn test_load_configure_and_count() {
    let dir = tempfile::tempdir().unwrap();

    let graph_path = dir.path().join("wheel.txt");
    let mut file = std::fs::File::create(&graph_path).unwrap();
    writeln!(file, "# wheel with hub 0 and rim 1..=5").unwrap();
    for i in 1..=5 {
        writeln!(file, "0 {i}").unwrap();
        writeln!(file, "{} {}", i, i % 5 + 1).unwrap();
    }
    drop(file);

    let config_path = dir.path().join("count.yaml");
    std::fs::write(&config_path, "intersection: partitioned\norientation: degree\n").unwrap();

    let graph = load_graph(&graph_path, GraphFormat::Auto).unwrap();
    let config = load_config(&config_path).unwrap();
    assert_eq!(config.intersection, IntersectionStrategy::Partitioned);

    let counter = TriangleCounter::new(config);
    for algorithm in Algorithm::ALL {
        assert_eq!(counter.count(&graph, algorithm).unwrap().triangles, 5, "{algorithm}");
    }
}

#[test]
fn test_generated_graphs_meet_their_expected_counts() {
    let counter = TriangleCounter::default();
    for spec in ["complete:12", "cycle:3", "cycle:50", "friendship:30", "strip:200"] {
        let spec: GraphSpec = spec.parse().unwrap();
        let graph = spec.build().unwrap();
        let reports = counter.run_all(&graph).unwrap();
        assert_eq!(Some(reports[0].triangles), spec.expected_triangles(), "{spec:?}");
    }
}

#[test]
fn test_malformed_file_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.mtx");
    std::fs::write(
        &path,
        "%%MatrixMarket matrix coordinate pattern symmetric\n% comment\n3 3 2\n2 1\n3 one\n",
    )
    .unwrap();
    match load_graph(&path, GraphFormat::Auto) {
        Err(TriangleError::Parse { line, .. }) => assert_eq!(line, 5),
        other => panic!("expected a parse error, got {other:?}"),
    }
}
