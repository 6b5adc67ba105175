// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod algorithm;
mod best_first;

pub use algorithm::{find_path, Algorithm, ParseAlgorithmError};
pub use best_first::{find_path_with, Path};
