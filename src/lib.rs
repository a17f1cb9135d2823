pub mod check;
pub mod error;
pub mod io;
pub mod pipelines;
pub mod processing;
pub mod sampling;
pub mod scoring;
