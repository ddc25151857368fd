//! Form state management and field value objects

mod field;
mod form_state;

pub use field::*;
pub use form_state::*;
