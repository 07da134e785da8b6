//! Composable REST path builders.
//!
//! Every path object is an immutable value built by joining a base path and a
//! segment with `/`. Nothing here performs I/O.

pub mod apiv3;
pub mod queries;
pub mod resources;

pub use apiv3::*;
pub use queries::*;
pub use resources::*;
