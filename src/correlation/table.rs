use super::*;
use fxhash::FxHashMap;
use std::{fs::File, io::BufReader, path::Path};

/// Replays fixed scores. Nodes and edges without a stored score receive the default
/// score of their kind if one is configured and fail with [`OracleError::MissingScore`]
/// otherwise.
#[derive(Clone, Debug, Default)]
pub struct TableOracle {
    one_point: FxHashMap<Node, f64>,
    two_points: FxHashMap<Edge, f64>,
    default_one_point: Option<f64>,
    default_two_points: Option<f64>,
}

impl TableOracle {
    pub fn new() -> Self {
        Default::default()
    }

    /// Every node scores `one_point` and every edge scores `two_points` unless overridden
    pub fn uniform(one_point: f64, two_points: f64) -> Self {
        Self {
            default_one_point: Some(one_point),
            default_two_points: Some(two_points),
            ..Default::default()
        }
    }

    /// Uses `score` for every node and edge without a stored score
    pub fn with_default(mut self, score: f64) -> Self {
        self.default_one_point = Some(score);
        self.default_two_points = Some(score);
        self
    }

    pub fn set_one_point(&mut self, node: Node, score: f64) -> &mut Self {
        self.one_point.insert(node, score);
        self
    }

    pub fn set_two_points(&mut self, u: Node, v: Node, score: f64) -> &mut Self {
        self.two_points.insert(Edge(u, v).normalized(), score);
        self
    }

    /// Stores every entry; later entries overwrite earlier ones for the same pair
    pub fn insert_entries(&mut self, entries: impl IntoIterator<Item = CorrelationEntry>) {
        for entry in entries {
            let (u, v) = entry.pair;
            if entry.is_one_point() {
                self.set_one_point(u, entry.score);
            } else {
                self.set_two_points(u, v, entry.score);
            }
        }
    }

    /// Reads a JSON array of entries, e.g. `[{"score": -0.3, "pair": [0, 1]}]`
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self, OracleError> {
        let entries: Vec<CorrelationEntry> = serde_json::from_reader(reader)
            .map_err(|e| OracleError::Configuration(format!("cannot parse entries: {e}")))?;

        let mut table = Self::new();
        table.insert_entries(entries);
        Ok(table)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, OracleError> {
        let file = File::open(path.as_ref()).map_err(|e| {
            OracleError::Configuration(format!("cannot open {}: {e}", path.as_ref().display()))
        })?;
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.one_point.len() + self.two_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CorrelationOracle for TableOracle {
    fn compute(&self, problem: &Problem) -> Result<Vec<CorrelationEntry>, OracleError> {
        canonical_entries(
            problem,
            |u| {
                self.one_point
                    .get(&u)
                    .copied()
                    .or(self.default_one_point)
                    .ok_or(OracleError::MissingScore(Edge(u, u)))
            },
            |edge| {
                self.two_points
                    .get(&edge)
                    .copied()
                    .or(self.default_two_points)
                    .ok_or(OracleError::MissingScore(edge))
            },
        )
    }
}
