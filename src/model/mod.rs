pub mod board;
pub mod changeset;
pub mod common;
pub mod query;
pub mod resource;
pub mod work_package;

pub use board::*;
pub use changeset::*;
pub use common::*;
pub use query::*;
pub use resource::*;
pub use work_package::*;
