//! Domain Services
//!
//! Pure functions over domain types. The prompt builder and the parser
//! share the response format defined in `prompt`.

mod parser;
mod prompt;

pub use parser::*;
pub use prompt::*;
