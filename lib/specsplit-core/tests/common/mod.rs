use std::path::Path;

use serde_json::Value;
use tracing::info;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

/// Reads a written YAML file back into a document tree.
pub fn read_yaml(path: impl AsRef<Path>) -> anyhow::Result<Value> {
    let value = specsplit_core::load_document(path)?;
    Ok(value)
}
