pub mod engine;

pub use engine::{CONTRIBUTING_THRESHOLD, QueryEngine};
