use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Lines},
    path::Path,
};

use crate::{
    graph::{Edge, EdgeOps, GraphEdgeEditing, GraphNew, NumEdges, NumNodes},
    problem::ProblemKind,
};

pub type Result<T> = std::io::Result<T>;

/// Reads graphs in the PACE format: a header `p <kind> <n> <m>`, then one edge `u v`
/// per line with 1-based labels. Lines starting with `c` are comments. Self-loops are
/// rejected and duplicate edges collapse.
pub trait GraphPaceReader: Sized {
    fn try_read_pace<R: BufRead>(reader: R) -> Result<Self>;
    fn try_read_pace_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl<G> GraphPaceReader for G
where
    G: GraphNew + GraphEdgeEditing,
{
    fn try_read_pace<R: BufRead>(reader: R) -> Result<Self> {
        let pace_reader = PaceReader::try_new(reader)?;
        let mut graph = Self::new(pace_reader.number_of_nodes());

        for edge in pace_reader {
            let Edge(u, v) = edge?;
            graph.try_add_edge(u, v);
        }

        Ok(graph)
    }

    fn try_read_pace_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_pace(buf_reader)
    }
}

pub struct PaceReader<R> {
    lines: Lines<R>,
    kind: String,
    number_of_nodes: NumNodes,
    number_of_edges: NumEdges,
}

impl<R: BufRead> PaceReader<R> {
    pub fn try_new(reader: R) -> Result<Self> {
        let mut pace_reader = Self {
            lines: reader.lines(),
            kind: String::new(),
            number_of_nodes: 0,
            number_of_edges: 0,
        };

        (
            pace_reader.kind,
            pace_reader.number_of_nodes,
            pace_reader.number_of_edges,
        ) = pace_reader.parse_header()?;
        Ok(pace_reader)
    }

    pub fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }

    /// The raw kind token of the header, e.g. `vc` in `p vc 5 4`
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The problem named by the header, if the kind token is a known problem
    pub fn problem_hint(&self) -> Option<ProblemKind> {
        self.kind.parse().ok()
    }
}

impl<R: BufRead> Iterator for PaceReader<R> {
    type Item = Result<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_edge_line()
            .map(|edge| edge.map(|Edge(u, v)| Edge(u - 1, v - 1)))
            .transpose()
    }
}

macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(std::io::Error::new($kind, $info));
        }
    };
}

macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            ErrorKind::InvalidData,
            format!("Premature end of line when parsing {}.", $name)
        );

        let parsed = next.unwrap().parse();
        raise_error_unless!(
            parsed.is_ok(),
            ErrorKind::InvalidData,
            format!("Invalid value found. Cannot parse {}.", $name)
        );

        parsed.unwrap()
    }};
}

impl<R: BufRead> PaceReader<R> {
    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        loop {
            let line = self.lines.next();
            match line {
                None => return Ok(None),
                Some(Err(x)) => return Err(x),
                Some(Ok(line)) if line.trim_start().starts_with('c') => continue,
                Some(Ok(line)) if line.trim().is_empty() => continue,
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }

    fn parse_header(&mut self) -> Result<(String, NumNodes, NumEdges)> {
        let line = self.next_non_comment_line()?;

        raise_error_unless!(line.is_some(), ErrorKind::InvalidData, "No header found");
        let line = line.unwrap();

        let mut parts = line.split_whitespace();

        raise_error_unless!(
            parts.next() == Some("p"),
            ErrorKind::InvalidData,
            "Invalid header found; line should start with p"
        );

        let kind = parts.next();
        raise_error_unless!(
            kind.is_some(),
            ErrorKind::InvalidData,
            "Invalid header found; missing problem kind"
        );
        let kind = kind.unwrap().to_string();

        let number_of_nodes = parse_next_value!(parts, "Header>Number of nodes");
        let number_of_edges = parse_next_value!(parts, "Header>Number of edges");

        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            "Invalid header found; expected end of line"
        );

        Ok((kind, number_of_nodes, number_of_edges))
    }

    fn parse_edge_line(&mut self) -> Result<Option<Edge>> {
        let line = self.next_non_comment_line()?;
        if let Some(line) = line {
            let mut parts = line.split_whitespace();

            let from: NumNodes = parse_next_value!(parts, "Source node");
            let dest: NumNodes = parse_next_value!(parts, "Target node");

            raise_error_unless!(
                (1..=self.number_of_nodes).contains(&from)
                    && (1..=self.number_of_nodes).contains(&dest),
                ErrorKind::InvalidData,
                format!(
                    "Edge ({from}, {dest}) out of range 1..={}",
                    self.number_of_nodes
                )
            );

            raise_error_unless!(
                !Edge(from, dest).is_loop(),
                ErrorKind::InvalidData,
                format!("Self-loop at node {from}")
            );

            Ok(Some(Edge(from, dest)))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::*;

    use glob::glob;
    use itertools::Itertools;
    use std::collections::HashSet;
    use std::fs::File;
    use std::io::BufReader;

    #[test]
    fn test_success() {
        const DEMO_FILE: &str = "c TEST\n p  vc 6  5 \n1 2\nc TEST\n2 3\n\n3 4\n4 5\n5 6";
        let buf_reader = std::io::BufReader::new(DEMO_FILE.as_bytes());
        let pace_reader = PaceReader::try_new(buf_reader).unwrap();

        assert_eq!(pace_reader.number_of_nodes(), 6);
        assert_eq!(pace_reader.number_of_edges(), 5);
        assert_eq!(pace_reader.kind(), "vc");
        assert_eq!(pace_reader.problem_hint(), Some(ProblemKind::MinVertexCover));

        let edges: Vec<_> = pace_reader.collect::<Result<_>>().unwrap();
        assert_eq!(
            edges,
            vec![Edge(0, 1), Edge(1, 2), Edge(2, 3), Edge(3, 4), Edge(4, 5)]
        );
    }

    #[test]
    fn test_unknown_kind() {
        let pace_reader = PaceReader::try_new("p ds 2 1\n1 2".as_bytes()).unwrap();
        assert_eq!(pace_reader.problem_hint(), None);
    }

    #[test]
    fn test_errors() {
        assert!(PaceReader::try_new("".as_bytes()).is_err());
        assert!(PaceReader::try_new("q vc 2 1".as_bytes()).is_err());
        assert!(PaceReader::try_new("p vc two 1".as_bytes()).is_err());
        assert!(PaceReader::try_new("p vc 2 1 7".as_bytes()).is_err());

        for body in ["1 3", "0 1", "2 2", "1"] {
            let input = format!("p vc 2 1\n{body}");
            let result = AdjArray::try_read_pace(input.as_bytes());
            assert_eq!(
                result.unwrap_err().kind(),
                ErrorKind::InvalidData,
                "{body}"
            );
        }
    }

    #[test]
    fn test_duplicate_edges() {
        let graph = AdjArray::try_read_pace("p mis 3 3\n1 2\n2 1\n2 3".as_bytes()).unwrap();
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 2);
    }

    #[test]
    fn test_read_tiny_instances() {
        let files = glob("instances/tiny/*.gr")
            .expect("Failed to glob")
            .map(|r| r.expect("Failed to access globbed path"))
            .collect_vec();

        assert!(!files.is_empty());

        for file in files {
            let reader = File::open(file.clone()).expect("Cannot open file");
            let buf_reader = BufReader::new(reader);

            let pace_reader =
                PaceReader::try_new(buf_reader).expect("Could not construct PaceReader");
            let expected_edges = pace_reader.number_of_edges();

            let edges: Vec<Edge> = pace_reader
                .collect::<Result<_>>()
                .expect("Could not read edges");

            assert_eq!(edges.len() as NumEdges, expected_edges, "{file:?}");
            assert!(edges.iter().all(|edge| !edge.is_loop()));
            let edges_hash: HashSet<_> = edges.iter().copied().collect();
            assert!(
                edges
                    .iter()
                    .all(|edge| !edges_hash.contains(&edge.reverse()))
            );

            let graph = AdjArray::try_read_pace_file(&file).unwrap();
            assert_eq!(graph.number_of_edges(), expected_edges);
        }
    }
}
