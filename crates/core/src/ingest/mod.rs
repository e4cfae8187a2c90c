pub mod provider;
pub mod ticker;
pub mod types;
