pub mod pace_reader;
pub use pace_reader::{GraphPaceReader, PaceReader};
pub mod pace_writer;
pub use pace_writer::PaceWriter;
