//! Serializable solver configuration.
//!
//! ```json
//! {
//!   "problem": "max_independent_set",
//!   "oracle": { "kind": "exact", "beta": 3.0, "max_nodes": 16 },
//!   "two_points_polarity": "inverted"
//! }
//! ```
//!
//! Omitted fields take their defaults.

use crate::{
    correlation::{CorrelationOracle, ExactOracle, SamplingOracle, TableOracle},
    errors::{ConfigurationError, QiroError},
    graph::NumNodes,
    problem::ProblemKind,
    reduction::{Polarity, QiroSolver, RuleSet},
};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

pub type DynOracle = Box<dyn CorrelationOracle + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QiroConfig {
    pub problem: ProblemKind,
    pub oracle: OracleConfig,
    pub one_point_polarity: Polarity,
    pub two_points_polarity: Polarity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OracleConfig {
    Exact(ExactConfig),
    Sampling(SamplingConfig),
    Table(TableConfig),
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig::Sampling(Default::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExactConfig {
    pub beta: f64,
    pub max_nodes: NumNodes,
}

impl Default for ExactConfig {
    fn default() -> Self {
        let oracle = ExactOracle::default();
        Self {
            beta: oracle.beta(),
            max_nodes: oracle.max_nodes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub samples: usize,
    pub elite_fraction: f64,
    pub seed: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        let oracle = SamplingOracle::default();
        Self {
            samples: oracle.samples(),
            elite_fraction: oracle.elite_fraction(),
            seed: oracle.seed(),
        }
    }
}

/// Scores replayed from a JSON file of correlation entries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub path: Option<PathBuf>,
    /// Score for nodes and edges missing from the file
    pub default: Option<f64>,
}

impl OracleConfig {
    pub fn build(&self) -> Result<DynOracle, QiroError> {
        let oracle: DynOracle = match self {
            OracleConfig::Exact(c) => Box::new(ExactOracle::new(c.beta, c.max_nodes)?),
            OracleConfig::Sampling(c) => {
                Box::new(SamplingOracle::new(c.samples, c.elite_fraction, c.seed)?)
            }
            OracleConfig::Table(c) => {
                let mut table = match &c.path {
                    Some(path) => TableOracle::from_json_file(path)?,
                    None => TableOracle::new(),
                };
                if let Some(score) = c.default {
                    table = table.with_default(score);
                }
                Box::new(table)
            }
        };
        Ok(oracle)
    }
}

impl QiroConfig {
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self, ConfigurationError> {
        serde_json::from_reader(reader).map_err(|e| ConfigurationError::InvalidParameter {
            name: "config",
            reason: e.to_string(),
        })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let file = File::open(path.as_ref()).map_err(|e| ConfigurationError::InvalidParameter {
            name: "config",
            reason: format!("cannot open {}: {e}", path.as_ref().display()),
        })?;
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn rules(&self) -> RuleSet {
        RuleSet::for_kind(self.problem, self.one_point_polarity, self.two_points_polarity)
    }

    pub fn build_solver(&self) -> Result<QiroSolver<DynOracle, RuleSet>, QiroError> {
        Ok(QiroSolver::new(self.oracle.build()?, self.rules()))
    }
}
