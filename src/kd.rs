// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{earth_distance, Coord};

/// KDTree implements the [k-d tree data structure](https://en.wikipedia.org/wiki/K-d_tree)
/// over node positions, used to snap arbitrary positions (e.g. a tap on a map)
/// to the closest node of the campus graph.
///
/// This implementation assumes euclidean geometry, even though the distance function
/// used is [earth_distance]. This results in undefined behavior when points
/// are close to the ante meridian (180°/-180° longitude) or poles (90°/-90° latitude),
/// which is of no concern for a single campus.
#[derive(Debug, Clone)]
pub struct KDTree {
    pivot_id: i64,
    pivot: Coord,
    left: Option<Box<KDTree>>,
    right: Option<Box<KDTree>>,
}

impl KDTree {
    /// Finds the id of the closest node to the given position,
    /// together with the distance to it in meters.
    pub fn find_nearest(&self, position: Coord) -> (i64, f64) {
        self.find_nearest_impl(position, false)
    }

    fn find_nearest_impl(&self, position: Coord, lon_divides: bool) -> (i64, f64) {
        // Start by assuming that pivot is the closest
        let mut best = self.pivot_id;
        let mut best_dist = earth_distance(position, self.pivot);

        // Select which branch to recurse into first
        let first_left = if lon_divides {
            position.lon < self.pivot.lon
        } else {
            position.lat < self.pivot.lat
        };
        let (first, second) = if first_left {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        if let Some(ref branch) = first {
            let (alt, alt_dist) = branch.find_nearest_impl(position, !lon_divides);
            if alt_dist < best_dist {
                best = alt;
                best_dist = alt_dist;
            }
        }

        if let Some(ref branch) = second {
            // A closer node is possible in the second branch if and only if
            // the splitting axis is closer than the current best candidate.
            let axis = if lon_divides {
                Coord::new(position.lat, self.pivot.lon)
            } else {
                Coord::new(self.pivot.lat, position.lon)
            };

            if earth_distance(position, axis) < best_dist {
                let (alt, alt_dist) = branch.find_nearest_impl(position, !lon_divides);
                if alt_dist < best_dist {
                    best = alt;
                    best_dist = alt_dist;
                }
            }
        }

        (best, best_dist)
    }

    /// Builds a k-d tree from `(node id, position)` pairs.
    /// Returns [None] if there are no points.
    pub fn build<I: IntoIterator<Item = (i64, Coord)>>(points: I) -> Option<Self> {
        let mut points = points.into_iter().collect::<Vec<_>>();
        Self::build_impl(points.as_mut_slice(), false)
    }

    fn build_impl(points: &mut [(i64, Coord)], lon_divides: bool) -> Option<Self> {
        match points.len() {
            0 => None,
            1 => Some(Self {
                pivot_id: points[0].0,
                pivot: points[0].1,
                left: None,
                right: None,
            }),
            _ => {
                if lon_divides {
                    points.sort_by(|a, b| a.1.lon.total_cmp(&b.1.lon));
                } else {
                    points.sort_by(|a, b| a.1.lat.total_cmp(&b.1.lat));
                }
                let median = points.len() / 2;
                let (pivot_id, pivot) = points[median];
                let (left, right_and_pivot) = points.split_at_mut(median);
                let right = &mut right_and_pivot[1..];
                Some(Self {
                    pivot_id,
                    pivot,
                    left: Self::build_impl(left, !lon_divides).map(Box::new),
                    right: Self::build_impl(right, !lon_divides).map(Box::new),
                })
            }
        }
    }
}
