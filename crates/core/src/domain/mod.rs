pub mod contract;
pub mod series;
