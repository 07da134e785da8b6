pub mod action_kind;
pub mod available_values;
pub mod board_action;
pub mod board_lists;
pub mod filter_values;

pub use action_kind::*;
pub use available_values::*;
pub use board_action::*;
pub use board_lists::*;
pub use filter_values::*;
