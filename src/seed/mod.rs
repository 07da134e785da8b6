pub mod data;
pub mod demo;

pub use data::*;
pub use demo::*;
