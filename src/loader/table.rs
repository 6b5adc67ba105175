// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use wkt::TryFromWkt;

use super::model::{EdgeRow, NodeRow, EDGE_COLUMNS, NODE_COLUMNS};
use super::Error;
use crate::{Coord, Edge, GraphBuilder, Node};

/// Helper object which feeds rows of the node and edge tables into a [GraphBuilder],
/// skipping (and logging) rows which can't be used.
pub(super) struct TableReader<'a> {
    b: &'a mut GraphBuilder,
    skipped_rows: usize,
    empty_geometries: usize,
}

impl<'a> TableReader<'a> {
    pub(super) fn new(b: &'a mut GraphBuilder) -> Self {
        Self {
            b,
            skipped_rows: 0,
            empty_geometries: 0,
        }
    }

    /// Adds all rows of a node table. Returns the number of accepted nodes.
    pub(super) fn add_nodes<R: io::Read>(&mut self, reader: R) -> Result<usize, Error> {
        let mut r = csv_reader(reader);
        check_columns(&mut r, "node", NODE_COLUMNS)?;

        let mut added = 0;
        for row in r.deserialize::<NodeRow>() {
            match row {
                Ok(row) => {
                    if self.add_node(row) {
                        added += 1;
                    }
                }
                Err(e) => {
                    log::warn!("node table: skipping malformed row: {}", e);
                    self.skipped_rows += 1;
                }
            }
        }

        log::info!("loaded {} nodes", added);
        Ok(added)
    }

    fn add_node(&mut self, row: NodeRow) -> bool {
        if !row.x.is_finite() || !row.y.is_finite() {
            log::warn!("node {} has invalid position ({}, {}), skipping", row.node_id, row.y, row.x);
            self.skipped_rows += 1;
            return false;
        }

        let name = row
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        self.b.add_node(Node {
            id: row.node_id,
            position: Coord::new(row.y, row.x),
            name,
        });
        true
    }

    /// Adds all rows of an edge table. Returns the number of accepted edges.
    pub(super) fn add_edges<R: io::Read>(&mut self, reader: R) -> Result<usize, Error> {
        let mut r = csv_reader(reader);
        check_columns(&mut r, "edge", EDGE_COLUMNS)?;

        let mut added = 0;
        for row in r.deserialize::<EdgeRow>() {
            match row {
                Ok(row) => {
                    if self.add_edge(row) {
                        added += 1;
                    }
                }
                Err(e) => {
                    log::warn!("edge table: skipping malformed row: {}", e);
                    self.skipped_rows += 1;
                }
            }
        }

        log::info!("loaded {} edges", added);
        Ok(added)
    }

    fn add_edge(&mut self, row: EdgeRow) -> bool {
        let geometry = match row.geometry.as_deref().map(str::trim) {
            None | Some("") => {
                log::debug!("edge {} -> {} has no geometry", row.from, row.to);
                self.empty_geometries += 1;
                Vec::default()
            }
            Some(wkt) => parse_geometry(wkt).unwrap_or_else(|| {
                log::warn!(
                    "edge {} -> {} has malformed geometry {:?}, using an empty one",
                    row.from,
                    row.to,
                    wkt
                );
                self.empty_geometries += 1;
                Vec::default()
            }),
        };

        let accepted = self.b.add_edge(
            row.from,
            Edge {
                to: row.to,
                weight: row.weight,
                geometry,
            },
        );
        if !accepted {
            self.skipped_rows += 1;
        }
        accepted
    }

    /// Logs a summary of data quality issues encountered so far.
    pub(super) fn finish(self) {
        if self.skipped_rows > 0 || self.empty_geometries > 0 {
            log::warn!(
                "skipped {} rows, {} edges without geometry",
                self.skipped_rows,
                self.empty_geometries
            );
        }
    }
}

fn csv_reader<R: io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn check_columns<R: io::Read>(
    r: &mut csv::Reader<R>,
    table: &'static str,
    required: &[&'static str],
) -> Result<(), Error> {
    let headers = r.headers()?;
    for &column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MissingColumn { table, column });
        }
    }
    Ok(())
}

/// Parses a WKT `LINESTRING` with `lon lat` pairs into a sequence of [Coords](Coord).
/// Returns [None] for anything else.
pub(super) fn parse_geometry(wkt: &str) -> Option<Vec<Coord>> {
    let line = geo_types::LineString::<f64>::try_from_wkt_str(wkt).ok()?;
    Some(line.coords().map(|c| Coord::new(c.y, c.x)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry() {
        assert_eq!(
            parse_geometry("LINESTRING (112.795 -7.28, 112.796 -7.281)"),
            Some(vec![Coord::new(-7.28, 112.795), Coord::new(-7.281, 112.796)])
        );
    }

    #[test]
    fn malformed_geometry() {
        assert_eq!(parse_geometry("LINESTRING (oops)"), None);
        assert_eq!(parse_geometry("POINT (112.795 -7.28)"), None);
        assert_eq!(parse_geometry("not wkt at all"), None);
    }

    #[test]
    fn nodes_without_names() {
        let mut b = GraphBuilder::new();
        let mut r = TableReader::new(&mut b);
        let added = r
            .add_nodes("node_id,x,y\n1,112.79,-7.28\n2,112.80,-7.29\n".as_bytes())
            .unwrap();
        r.finish();
        let g = b.build();

        assert_eq!(added, 2);
        assert_eq!(g.get_node(1).unwrap().name, None);
        assert_eq!(g.get_node(2).unwrap().position, Coord::new(-7.29, 112.80));
    }

    #[test]
    fn blank_names_are_unnamed() {
        let mut b = GraphBuilder::new();
        let mut r = TableReader::new(&mut b);
        r.add_nodes("node_id,x,y,name\n1,112.79,-7.28,   \n2,112.80,-7.29, Gate \n".as_bytes())
            .unwrap();
        let g = b.build();

        assert_eq!(g.get_node(1).unwrap().name, None);
        assert_eq!(g.get_node(2).unwrap().name.as_deref(), Some("Gate"));
    }

    #[test]
    fn missing_column() {
        let mut b = GraphBuilder::new();
        let mut r = TableReader::new(&mut b);
        let err = r.add_edges("from,to,geometry\n1,2,\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumn {
                table: "edge",
                column: "weight"
            }
        ));
    }
}
