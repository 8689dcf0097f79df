// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run configuration loaded from environment variables.

use std::str::FromStr;

use voxel_kernels_synth::Generator;

/// How the final report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Logical grid width.
    pub width: usize,
    /// Logical grid height.
    pub height: usize,
    /// Logical grid depth (number of slices).
    pub slice: usize,
    /// Grid source.
    pub generator: Generator,
    /// Number of voxels placed by the random generators.
    pub voxel_count: usize,
    /// RNG seed for the random generators.
    pub seed: u64,
    /// Number of worker threads for parallel passes.
    pub worker_threads: usize,
    /// Build the K2 mask table and cross-check it against the live detector.
    pub precompute_masks: bool,
    /// Include every clique's member ids in the report.
    pub list_cliques: bool,
    /// Report format.
    pub output: OutputFormat,
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn parse_flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1") | Some("true") | Some("yes") | Some("on")
    )
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unparseable values fall back to their defaults, except an unknown
    /// generator name, which is logged.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let generator = match lookup("GENERATOR") {
            Some(name) => name.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "Falling back to the default generator");
                Generator::default()
            }),
            None => Generator::default(),
        };

        Self {
            width: parse_or(lookup("GRID_WIDTH"), 100),
            height: parse_or(lookup("GRID_HEIGHT"), 100),
            slice: parse_or(lookup("GRID_SLICE"), 100),
            generator,
            voxel_count: parse_or(lookup("VOXEL_COUNT"), 5000),
            seed: parse_or(lookup("SEED"), 15164),
            worker_threads: parse_or(lookup("WORKER_THREADS"), num_cpus::get()),
            precompute_masks: parse_flag(lookup("PRECOMPUTE_MASKS")),
            list_cliques: parse_flag(lookup("LIST_CLIQUES")),
            output: parse_or(lookup("OUTPUT_FORMAT"), OutputFormat::Text),
        }
    }

    /// Logical grid dimensions.
    pub fn dimensions(&self) -> [usize; 3] {
        [self.width, self.height, self.slice]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[]);
        assert_eq!(c.dimensions(), [100, 100, 100]);
        assert_eq!(c.generator, Generator::Skeleton);
        assert_eq!(c.voxel_count, 5000);
        assert_eq!(c.seed, 15164);
        assert!(c.worker_threads >= 1);
        assert!(!c.precompute_masks);
        assert!(!c.list_cliques);
        assert_eq!(c.output, OutputFormat::Text);
    }

    #[test]
    fn overrides() {
        let c = config(&[
            ("GRID_WIDTH", "12"),
            ("GRID_SLICE", " 7 "),
            ("GENERATOR", "bertrand"),
            ("SEED", "99"),
            ("PRECOMPUTE_MASKS", "true"),
            ("LIST_CLIQUES", "1"),
            ("OUTPUT_FORMAT", "JSON"),
        ]);
        assert_eq!(c.dimensions(), [12, 100, 7]);
        assert_eq!(c.generator, Generator::Bertrand);
        assert_eq!(c.seed, 99);
        assert!(c.precompute_masks);
        assert!(c.list_cliques);
        assert_eq!(c.output, OutputFormat::Json);
    }

    #[test]
    fn bad_values_fall_back() {
        let c = config(&[
            ("GRID_HEIGHT", "tall"),
            ("GENERATOR", "sphere"),
            ("PRECOMPUTE_MASKS", "maybe"),
        ]);
        assert_eq!(c.height, 100);
        assert_eq!(c.generator, Generator::Skeleton);
        assert!(!c.precompute_masks);
    }
}
