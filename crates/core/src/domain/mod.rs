pub mod assessment;
pub mod market;
