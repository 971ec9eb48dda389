/// Data layer: raw records, loading, filtering/joining, and geography.
pub mod filter;
pub mod geo;
pub mod loader;
pub mod model;
