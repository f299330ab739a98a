pub mod envelope;
pub mod level;
pub mod snapshot;
