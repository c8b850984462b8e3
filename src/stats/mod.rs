pub mod handlers;
pub mod impact;

pub use impact::ImpactStats;
