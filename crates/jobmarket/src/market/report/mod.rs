mod insights;
mod summary;
pub mod views;

pub use summary::{GroupStats, MarketReport};

pub(crate) use insights::generate_insights;
