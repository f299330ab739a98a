pub mod meter;
pub mod tap;
