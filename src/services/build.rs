use std::time::Instant;

use tracing::info;

use crate::{
    ingestion::{
        cache::resolve_path,
        csv::{Direction, load_routemap_file},
    },
    structures::{BuildConfig, Graph, Ingestor},
};

pub fn build_graph(config: &BuildConfig) -> Result<Graph, String> {
    let mut g = Graph::new();

    let mut ordered: Vec<&Ingestor> = config.inputs.iter().collect();
    ordered.sort_by_key(|i| i.phase());

    for input in ordered {
        info!("Loading '{}'...", input.label());
        let before = Instant::now();

        let path = input
            .location()
            .and_then(resolve_path)
            .map_err(|e| format!("Failed to resolve '{}': {e}", input.label()))?;
        let mode = input.mode().to_transport_mode()?;
        let direction = match input {
            Ingestor::CsvRoad(_) => Direction::Bidirectional,
            Ingestor::CsvRoute(_) => Direction::Forward,
        };

        let summary = load_routemap_file(&path, mode, direction, &mut g)
            .map_err(|e| format!("Failed to ingest '{}': {e}", input.label()))?;

        info!(
            rows = summary.rows,
            edges = summary.edges,
            nodes = g.node_count(),
            elapsed_ms = before.elapsed().as_millis() as u64,
            "Loaded '{}'",
            input.label()
        );
    }

    info!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        modes = g.mode_count(),
        "Graph built"
    );
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::{Config, NodeID};

    #[test]
    fn builds_in_phase_order() {
        let dir = tempfile::tempdir().unwrap();
        let roads = dir.path().join("roads.csv");
        let metro = dir.path().join("metro.csv");
        std::fs::write(&roads, "Road,90.40,23.70,90.41,23.71\n").unwrap();
        std::fs::write(&metro, "Metro,90.42,23.72,90.43,23.73\n").unwrap();

        // Routes are listed first but load after roads.
        let yaml = format!(
            r#"
build:
  output: graph.bin
  inputs:
    - ingestor: csv/route
      url: path:{}
      mode: {{ name: Metro, fare_rate: 5, speed: 15, interval: 5, service_hours: [1, 23] }}
    - ingestor: csv/road
      url: path:{}
      mode: {{ name: Car, fare_rate: 20, speed: 20 }}
"#,
            metro.display(),
            roads.display()
        );
        let config = Config::parse(&yaml).unwrap();
        let g = build_graph(&config.build).unwrap();

        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.mode_name(g.edges(NodeID(0))[0].mode), "Car");
        assert_eq!(g.mode_name(g.edges(NodeID(2))[0].mode), "Metro");
    }

    #[test]
    fn missing_input_fails() {
        let config = Config::parse(
            r#"
build:
  output: graph.bin
  inputs:
    - ingestor: csv/road
      url: path:/nonexistent/roads.csv
      mode: { name: Car, fare_rate: 20, speed: 20 }
"#,
        )
        .unwrap();
        let err = build_graph(&config.build).err().unwrap();
        assert!(err.contains("Failed to resolve 'Car'"));
    }
}
