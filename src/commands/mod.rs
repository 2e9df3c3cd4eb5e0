mod generate;
mod inspect;
mod validate;

pub use generate::generate_command;
pub use inspect::{InspectTarget, inspect_command};
pub use validate::validate_command;
