pub mod parser;
pub mod script;
