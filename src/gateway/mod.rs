pub mod archive;
pub mod client;
pub mod endpoint;
