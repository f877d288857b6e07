pub mod form_field;
pub mod global_config;
