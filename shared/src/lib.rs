pub mod primitives;
pub mod units;
