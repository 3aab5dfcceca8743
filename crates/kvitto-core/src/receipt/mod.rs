//! Receipt field extraction module.

mod parser;
pub mod rules;

pub use parser::ReceiptParser;
pub use rules::Roster;
