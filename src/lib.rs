use std::path::Path;

use crate::domain::assembler::Assembly;
use crate::error::Result;
use crate::loader::script::{load_script, replay};

pub mod api;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod loader;
pub mod logger;
pub mod settings;

/// Replays the authoring script at `file_path` and assembles the request
/// body of the resulting scenario.
pub fn assemble_script(file_path: impl AsRef<Path>) -> Result<Assembly> {
    let script = load_script(file_path)?;
    log::info!("Script parsed successfully.");

    let builder = replay(script)?;
    log::info!("Builder state reconstructed with {} node(s).", builder.store().len());

    Ok(builder.assemble()?)
}
