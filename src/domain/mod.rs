pub mod assembler;
pub mod builder;
pub mod geo;
pub mod global_config;
pub mod node;
pub mod node_store;
pub mod overlay;
pub mod placement;
pub mod translator;
pub mod utils;
