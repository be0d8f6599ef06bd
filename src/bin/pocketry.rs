use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pocketry::graph::{load_adjacency_files, load_graph_file};
use pocketry::{DetectConfig, DetectPockets, EntityGraph};

#[derive(Parser)]
#[command(name = "pocketry")]
#[command(about = "Find pockets in the face-adjacency graph of a solid model")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Detect pockets and print the face-to-pocket map as JSON
    Detect {
        /// Adjacency document (`{"<face>": ["<neighbor>", ...]}`)
        #[arg(long, requires = "metadata", conflicts_with = "graph")]
        adjacency: Option<PathBuf>,
        /// Edge classification document (`{"<face>-<neighbor>": [code, ...]}`)
        #[arg(long, requires = "adjacency")]
        metadata: Option<PathBuf>,
        /// Graph in the native JSON form
        #[arg(long)]
        graph: Option<PathBuf>,
        /// Detection parameters as JSON
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the map here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cmd = Cmd::parse();
    match cmd.action {
        Action::Detect {
            adjacency,
            metadata,
            graph,
            config,
            out,
        } => {
            let graph = load_input(adjacency, metadata, graph)?;
            let config = load_config(config)?;
            detect(&graph, config, out)
        }
    }
}

fn load_input(
    adjacency: Option<PathBuf>,
    metadata: Option<PathBuf>,
    graph: Option<PathBuf>,
) -> Result<EntityGraph> {
    match (adjacency, metadata, graph) {
        (Some(adjacency), Some(metadata), None) => Ok(load_adjacency_files(adjacency, metadata)?),
        (None, None, Some(graph)) => Ok(load_graph_file(graph)?),
        _ => bail!("pass either --adjacency with --metadata, or --graph"),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<DetectConfig> {
    let Some(path) = path else {
        return Ok(DetectConfig::default());
    };
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn detect(graph: &EntityGraph, config: DetectConfig, out: Option<PathBuf>) -> Result<()> {
    tracing::info!(faces = graph.len(), ?config, "detect");
    let pockets = DetectPockets::new(config).execute(graph)?;

    for pocket in pockets.pockets() {
        let faces: Vec<String> = pocket.faces.iter().map(ToString::to_string).collect();
        tracing::info!(
            pocket = %pocket.id,
            size = pocket.faces.len(),
            faces = %faces.join(","),
            "pocket"
        );
    }

    let json = pockets.to_json()?;
    match out {
        Some(path) => fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn graph_conflicts_with_split_inputs() {
        let parsed = Cmd::try_parse_from([
            "pocketry", "detect", "--adjacency", "a.json", "--metadata", "m.json", "--graph",
            "g.json",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn adjacency_requires_metadata() {
        assert!(Cmd::try_parse_from(["pocketry", "detect", "--adjacency", "a.json"]).is_err());
        assert!(Cmd::try_parse_from(["pocketry", "detect", "--metadata", "m.json"]).is_err());
        assert!(Cmd::try_parse_from(["pocketry", "detect", "--graph", "g.json"]).is_ok());
    }

    #[test]
    fn input_is_required() {
        assert!(load_input(None, None, None).is_err());
    }

    #[test]
    fn split_inputs_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let adjacency = write(&dir, "adj.json", r#"{"1": ["2"], "2": ["1"]}"#);
        let metadata = write(&dir, "meta.json", r#"{"1-2": [0], "2-1": [0]}"#);
        let graph = load_input(Some(adjacency), Some(metadata), None).unwrap();
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn config_defaults_when_absent() {
        assert_eq!(load_config(None).unwrap(), DetectConfig::default());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "config.json", r#"{"min_cluster_size": 4}"#);
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.min_cluster_size, 4);
        let bad = write(&dir, "bad.json", "[");
        assert!(load_config(Some(bad)).is_err());
    }

    #[test]
    fn detect_writes_the_map() {
        let dir = tempfile::tempdir().unwrap();
        let mut graph = EntityGraph::new();
        for face in [2, 3, 4] {
            graph.connect(
                pocketry::EntityId(1),
                pocketry::EntityId(face),
                pocketry::EdgeClass::CONVEX,
            );
        }
        graph.connect(pocketry::EntityId(2), pocketry::EntityId(3), pocketry::EdgeClass::CONCAVE);
        graph.connect(pocketry::EntityId(3), pocketry::EntityId(4), pocketry::EdgeClass::CONCAVE);
        let out = dir.path().join("pockets.json");
        detect(&graph, DetectConfig::default(), Some(out.clone())).unwrap();
        assert_eq!(fs::read_to_string(out).unwrap(), r#"{"2":0,"3":0,"4":0}"#);
    }
}
