//! Analysis pipelines built from store operations and tool invocations.
//!
//! Each stage takes the store and tool configuration explicitly and returns
//! typed errors; HTTP concerns stay in the api layer.

pub mod acquire;
pub mod align;
pub mod screen;
pub mod upload;
