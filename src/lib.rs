pub mod dataset;
pub mod league;
pub mod state;
pub mod store;
pub mod strategy;
pub mod summary;
