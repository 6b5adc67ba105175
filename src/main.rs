use std::error::Error;
use std::path::PathBuf;

use campus_router::{loader, Algorithm, Coord, NodeRecord, Router};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
#[error("{0} + {1}: {2}")]
struct DatasetLoadError(PathBuf, PathBuf, #[source] loader::Error);

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DatasetArgs {
    /// The path to the edge table (CSV, optionally gzip or bzip2 compressed)
    edges: PathBuf,

    /// The path to the node table (CSV, optionally gzip or bzip2 compressed)
    nodes: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Find the shortest walking route between two nodes
    Route {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Id of the start node
        start: String,

        /// Id of the end node
        end: String,

        /// Search algorithm: "astar" or "dijkstra"
        #[arg(long, default_value_t = Algorithm::AStar)]
        algorithm: Algorithm,
    },

    /// Find the shortest walking route between the nodes closest to two positions
    RouteCoords {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Latitude of the start point
        start_lat: f64,

        /// Longitude of the start point
        start_lon: f64,

        /// Latitude of the end point
        end_lat: f64,

        /// Longitude of the end point
        end_lon: f64,

        /// Search algorithm: "astar" or "dijkstra"
        #[arg(long, default_value_t = Algorithm::AStar)]
        algorithm: Algorithm,
    },

    /// List named locations
    Nodes {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// List unnamed nodes as well
        #[arg(long)]
        all: bool,
    },

    /// Search named locations by name
    Search {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Words which must all appear in the location name
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = campus_router::DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            dataset,
            start,
            end,
            algorithm,
        } => {
            let router = load_router(&dataset, algorithm)?;
            let route = router.route_str(&start, &end)?;
            println!("{}", serde_json::to_string_pretty(&route)?);
        }

        Command::RouteCoords {
            dataset,
            start_lat,
            start_lon,
            end_lat,
            end_lon,
            algorithm,
        } => {
            let router = load_router(&dataset, algorithm)?;
            let start = nearest_node(&router, Coord::new(start_lat, start_lon))?;
            let end = nearest_node(&router, Coord::new(end_lat, end_lon))?;
            let route = router.route(start, end)?;
            println!("{}", serde_json::to_string_pretty(&route)?);
        }

        Command::Nodes { dataset, all } => {
            let router = load_router(&dataset, Algorithm::default())?;
            let nodes = if all {
                router.directory().list()
            } else {
                router.directory().named_locations()
            };
            let records: Vec<NodeRecord> = nodes.iter().map(NodeRecord::from).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Command::Search {
            dataset,
            query,
            limit,
        } => {
            let router = load_router(&dataset, Algorithm::default())?;
            let records: Vec<NodeRecord> = router
                .directory()
                .search(&query, limit)
                .into_iter()
                .map(NodeRecord::from)
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}

fn load_router(dataset: &DatasetArgs, algorithm: Algorithm) -> Result<Router, DatasetLoadError> {
    match loader::load_from_files(&dataset.edges, &dataset.nodes, &loader::Options::default()) {
        Ok(d) => Ok(Router::new(d.graph, d.directory, algorithm)),
        Err(e) => Err(DatasetLoadError(
            dataset.edges.clone(),
            dataset.nodes.clone(),
            e,
        )),
    }
}

fn nearest_node(router: &Router, position: Coord) -> Result<i64, Box<dyn Error>> {
    let (node, distance) = router
        .directory()
        .find_nearest(position)
        .ok_or("the campus map has no nodes")?;
    log::info!(
        "snapped ({}, {}) to {} ({:.1} m away)",
        position.lat,
        position.lon,
        node.display_name(),
        distance
    );
    Ok(node.id)
}
