pub mod core;
pub mod distributions;
pub mod metropolis;
pub mod regression;
pub mod stats;
