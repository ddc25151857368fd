//! Application state module

mod app_state;
mod catalog;
mod forms;
mod records;
mod validate;

pub use app_state::*;
pub use catalog::*;
pub use forms::*;
pub use records::*;
pub use validate::*;
