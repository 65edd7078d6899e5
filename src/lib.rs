pub mod algorithm;
pub mod config;
pub mod correlation;
pub mod errors;
pub mod graph;
pub mod io;
pub mod log;
pub mod problem;
pub mod reduction;
pub mod utils;

pub mod prelude {
    pub use super::algorithm::*;
    pub use super::correlation::*;
    pub use super::errors::*;
    pub use super::graph::*;
    pub use super::io::*;
    pub use super::problem::*;
    pub use super::reduction::*;
    pub use super::utils::*;
}

#[cfg(test)]
mod testing;
