pub mod config;
pub mod device;
pub mod error;
pub mod reading;
pub mod state;
