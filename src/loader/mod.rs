// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading of the campus map from an edge table and a node table.
//!
//! Both tables are CSV files with a header row. The edge table needs `from`, `to`
//! and `weight` (meters) columns, and usually a `geometry` column with a WKT `LINESTRING`
//! in `lon lat` order. The node table needs `node_id`, `x` (longitude) and `y` (latitude)
//! columns, and an optional `name` column.
//!
//! Rows which can't be used (malformed values, negative weights, edges between unknown
//! nodes) are skipped with a warning, and malformed geometries are replaced by empty ones.
//! Only unreadable input or missing columns fail the whole load.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use table::TableReader;

use crate::{Graph, GraphBuilder, NodeDirectory};

mod model;
mod table;

/// Format of an input table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the compression based on the content
    #[default]
    Unknown,

    /// Force uncompressed CSV
    Csv,

    /// Force CSV with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    CsvGz,

    /// Force CSV with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    CsvBz2,
}

impl FileFormat {
    /// Guesses the format from the first bytes of the data.
    fn detect(head: &[u8]) -> Self {
        if head.starts_with(&[0x1F, 0x8B]) {
            Self::CsvGz
        } else if head.starts_with(b"BZh") {
            Self::CsvBz2
        } else {
            Self::Csv
        }
    }
}

/// Additional controls for loading the campus map.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Format of both input tables.
    pub file_format: FileFormat,
}

/// Error conditions which abort loading of the campus map.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("{table} table is missing the {column:?} column")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

/// A loaded campus map: the routing [Graph] and the [NodeDirectory] describing its nodes.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub graph: Graph,
    pub directory: NodeDirectory,
}

fn decode<'a, R: io::Read + 'a>(
    reader: R,
    format: FileFormat,
) -> Result<Box<dyn io::Read + 'a>, Error> {
    let mut b = io::BufReader::new(reader);
    let format = match format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        f => f,
    };

    Ok(match format {
        FileFormat::Unknown | FileFormat::Csv => Box::new(b),
        FileFormat::CsvGz => Box::new(flate2::read::MultiGzDecoder::new(b)),
        FileFormat::CsvBz2 => Box::new(bzip2::read::MultiBzDecoder::new(b)),
    })
}

/// Loads the campus map from two streams, as per the provided [Options].
///
/// The node table is read first, so that edges can be checked against known nodes.
pub fn load_from_io<E: io::Read, N: io::Read>(
    edges: E,
    nodes: N,
    options: &Options,
) -> Result<Dataset, Error> {
    let mut b = GraphBuilder::new();
    {
        let mut r = TableReader::new(&mut b);
        r.add_nodes(decode(nodes, options.file_format)?)?;
        r.add_edges(decode(edges, options.file_format)?)?;
        r.finish();
    }

    let graph = b.build();
    let directory = NodeDirectory::from_graph(&graph);
    log::info!(
        "campus map ready: {} nodes ({} named locations), {} edges",
        graph.len(),
        directory.named_locations().len(),
        graph.edge_count()
    );
    Ok(Dataset { graph, directory })
}

/// Loads the campus map from files at the provided paths, as per the provided [Options].
pub fn load_from_files<E: AsRef<Path>, N: AsRef<Path>>(
    edges: E,
    nodes: N,
    options: &Options,
) -> Result<Dataset, Error> {
    let edges = File::open(edges)?;
    let nodes = File::open(nodes)?;
    load_from_io(edges, nodes, options)
}

/// Loads the campus map from in-memory buffers, as per the provided [Options].
pub fn load_from_buffers(edges: &[u8], nodes: &[u8], options: &Options) -> Result<Dataset, Error> {
    load_from_io(edges, nodes, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Algorithm, Coord, RouteError, Router};

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-4),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    const EDGES: &[u8] = include_bytes!("test_fixtures/edges.csv");
    const NODES: &[u8] = include_bytes!("test_fixtures/nodes.csv");

    fn check_campus(d: &Dataset) {
        //  Library(1) ── 2 ── Canteen(3)
        //                │       │
        //                4 ── Rectorate(5)          Stadium(6)
        let g = &d.graph;

        // Node with an invalid id is skipped
        assert_eq!(g.len(), 6);

        // Duplicate edge: last one wins
        assert_almost_eq!(g.get_edge(1, 2).unwrap(), 110.5);

        // Negative weight and dangling edges are skipped, bad row is skipped
        assert_eq!(g.get_edge(4, 3), None);
        assert_eq!(g.get_edge(2, 9), None);
        assert_eq!(g.edge_count(), 10);

        // WKT is converted from lon-lat to lat-lon
        assert_eq!(
            g.edge_geometry(2, 4),
            &[Coord::new(-7.28, 112.796), Coord::new(-7.281, 112.796)]
        );

        // Malformed geometry is replaced by an empty one
        assert_almost_eq!(g.get_edge(5, 4).unwrap(), 110.4);
        assert!(g.edge_geometry(5, 4).is_empty());

        // Node directory
        let named: Vec<&str> = d
            .directory
            .named_locations()
            .iter()
            .filter_map(|n| n.name.as_deref())
            .collect();
        assert_eq!(named, vec!["Canteen", "Library", "Rectorate", "Stadium"]);
        assert_eq!(d.directory.get(4).unwrap().display_name(), "Node 4");
    }

    fn load(edges: &[u8], nodes: &[u8], file_format: FileFormat) -> Dataset {
        load_from_buffers(edges, nodes, &Options { file_format }).unwrap()
    }

    #[test]
    fn load_csv() {
        check_campus(&load(EDGES, NODES, FileFormat::Csv));
    }

    #[test]
    fn load_csv_detected() {
        check_campus(&load(EDGES, NODES, FileFormat::Unknown));
    }

    #[test]
    fn load_gz() {
        const EDGES_GZ: &[u8] = include_bytes!("test_fixtures/edges.csv.gz");
        const NODES_GZ: &[u8] = include_bytes!("test_fixtures/nodes.csv.gz");
        check_campus(&load(EDGES_GZ, NODES_GZ, FileFormat::CsvGz));
        check_campus(&load(EDGES_GZ, NODES_GZ, FileFormat::Unknown));
    }

    #[test]
    fn load_bz2() {
        const EDGES_BZ2: &[u8] = include_bytes!("test_fixtures/edges.csv.bz2");
        const NODES_BZ2: &[u8] = include_bytes!("test_fixtures/nodes.csv.bz2");
        check_campus(&load(EDGES_BZ2, NODES_BZ2, FileFormat::CsvBz2));
        check_campus(&load(EDGES_BZ2, NODES_BZ2, FileFormat::Unknown));
    }

    #[test]
    fn detect() {
        assert_eq!(FileFormat::detect(&[0x1F, 0x8B, 0x08]), FileFormat::CsvGz);
        assert_eq!(FileFormat::detect(b"BZh91AY"), FileFormat::CsvBz2);
        assert_eq!(FileFormat::detect(b"from,to"), FileFormat::Csv);
        assert_eq!(FileFormat::detect(b""), FileFormat::Csv);
    }

    #[test]
    fn missing_file() {
        let err = load_from_files(
            "test_fixtures/does_not_exist.csv",
            "test_fixtures/does_not_exist.csv",
            &Options::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn missing_node_column() {
        let err = load_from_buffers(EDGES, b"id,x,y\n1,0,0\n", &Options::default()).unwrap_err();
        assert_eq!(err.to_string(), "node table is missing the \"node_id\" column");
    }

    #[test]
    fn routes_over_loaded_map() {
        let d = load(EDGES, NODES, FileFormat::Csv);
        for algorithm in [Algorithm::Dijkstra, Algorithm::AStar] {
            let router = Router::new(d.graph.clone(), d.directory.clone(), algorithm);

            let r = router.route(1, 5).unwrap();
            assert_eq!(r.path, vec![1, 2, 4, 5]);
            assert_eq!(r.distance, 332.2);
            assert_eq!(r.walking_time, "3min");
            assert_eq!(
                r.coords,
                vec![
                    Coord::new(-7.28, 112.795),
                    Coord::new(-7.28, 112.7955),
                    Coord::new(-7.28, 112.796),
                    Coord::new(-7.281, 112.796),
                    Coord::new(-7.281, 112.797),
                ]
            );

            // 5 -> 4 has no geometry, so the polyline starts at 4
            let r = router.route(5, 1).unwrap();
            assert_eq!(r.path, vec![5, 4, 2, 1]);
            assert_eq!(r.distance, 332.1);
            assert_eq!(r.coords.first(), Some(&Coord::new(-7.281, 112.796)));
            assert_eq!(r.coords.last(), Some(&Coord::new(-7.28, 112.795)));

            assert_eq!(
                router.route(1, 6),
                Err(RouteError::NoRoute { start: 1, end: 6 })
            );
        }
    }
}
