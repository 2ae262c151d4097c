pub mod expand;
pub mod validate;

pub use expand::{expand, expand_all, localize_midnight};
pub use validate::{validate_row, validate_rows};
