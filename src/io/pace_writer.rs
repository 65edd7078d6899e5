use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use super::super::graph::*;

/// Writes a graph in the format read by [`super::GraphPaceReader`]. Labels are compacted
/// to `1..=n` in ascending order, so graphs with removed nodes stay readable.
pub trait PaceWriter {
    fn try_write_pace<W: Write>(&self, kind: &str, writer: W) -> Result<(), std::io::Error>;
    fn try_write_pace_file<P: AsRef<Path>>(&self, kind: &str, path: P)
    -> Result<(), std::io::Error>;
}

impl<T> PaceWriter for T
where
    T: AdjacencyList + GraphEdgeOrder,
{
    fn try_write_pace<W: Write>(&self, kind: &str, mut writer: W) -> Result<(), std::io::Error> {
        writeln!(
            writer,
            "p {kind} {} {}",
            self.number_of_nodes(),
            self.number_of_edges()
        )?;

        let mut new_label = vec![0 as Node; self.vertices_range().end as usize];
        for (i, u) in self.vertices().enumerate() {
            new_label[u as usize] = i as Node + 1;
        }

        for Edge(u, v) in self.ordered_edges() {
            writeln!(
                writer,
                "{} {}",
                new_label[u as usize],
                new_label[v as usize]
            )?;
        }

        Ok(())
    }

    fn try_write_pace_file<P: AsRef<Path>>(
        &self,
        kind: &str,
        path: P,
    ) -> Result<(), std::io::Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_pace(kind, &mut writer)?;
        writer.flush()
    }
}
