pub mod node;
pub mod node_kind;
pub mod parameter_draft;
pub mod parameters;
