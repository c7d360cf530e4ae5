//! Flow definition load/save helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::definition::FlowDefinition;

/// Load a flow definition from a TOML file.
pub fn load_definition(path: &Path) -> Result<FlowDefinition> {
    debug!(path = %path.display(), "loading flow definition");
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read flow definition {}", path.display()))?;
    FlowDefinition::from_toml(&contents).with_context(|| format!("load {}", path.display()))
}

/// Atomically write a flow definition to disk.
pub fn write_definition(path: &Path, definition: &FlowDefinition) -> Result<()> {
    let mut buf = definition.to_toml()?;
    if !buf.ends_with('\n') {
        buf.push('\n');
    }
    super::write_atomic(path, &buf)
}
