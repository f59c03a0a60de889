//! Platform export loading.
//!
//! An export is a JSON document holding either a top-level array of song
//! objects or an object with a `songs` array. Entries are returned as raw
//! values; shape checks happen in [`crate::normalize`].

use std::path::Path;

use serde_json::Value;

use arcadex_core::{Error, Result};

/// Read a platform export from `path`.
pub fn load_platform_source(path: &Path) -> Result<Vec<Value>> {
    let contents = std::fs::read_to_string(path)?;
    let records = parse_platform_source(&contents)?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse the text of a platform export.
pub fn parse_platform_source(contents: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(contents)? {
        Value::Array(records) => Ok(records),
        Value::Object(mut root) => match root.remove("songs") {
            Some(Value::Array(records)) => Ok(records),
            Some(_) => Err(Error::InvalidData(
                "`songs` must be an array".to_string(),
            )),
            None => Err(Error::InvalidData(
                "expected an array or an object with a `songs` array".to_string(),
            )),
        },
        _ => Err(Error::InvalidData(
            "expected an array or an object with a `songs` array".to_string(),
        )),
    }
}
