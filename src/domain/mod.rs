mod account;
mod aggregate;
pub mod date;
mod transaction;

pub use account::*;
pub use aggregate::*;
pub use date::{format_output_date, parse_input_date, parse_optional_input_date, ParseDateError};
pub use transaction::*;
