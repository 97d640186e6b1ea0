//! Whole-file JSON records
//!
//! Files are read and overwritten as a unit. There is no envelope, version
//! field or partial update.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Read and decode a record file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Encode and overwrite a record file
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_json::<HashMap<String, u32>>(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let result = read_json::<HashMap<String, u32>>(&path);
        assert!(matches!(result, Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        let mut map = HashMap::new();
        map.insert("Ann".to_string(), 50u32);
        write_json(&path, &map).unwrap();
        let back: HashMap<String, u32> = read_json(&path).unwrap();
        assert_eq!(back.get("Ann"), Some(&50));
    }
}
