//! Graph analyses over the dependency map.
pub mod topology;
