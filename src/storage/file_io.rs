//! JSON record files
//!
//! Reads tolerate a missing file; writes go through a sibling temp file
//! and a rename so a record file is never left half-written.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinanceError;

fn storage_error<'a>(action: &str, path: &'a Path) -> impl Fn(std::io::Error) -> FinanceError + 'a {
    let action = action.to_string();
    move |e| FinanceError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Read a record file, or `T::default()` when it does not exist yet
pub fn read_json<T, P>(path: P) -> Result<T, FinanceError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("read", path)(e)),
    };

    serde_json::from_str(&text).map_err(|e| {
        FinanceError::Storage(format!(
            "Failed to parse {} (line {}): {}",
            path.display(),
            e.line(),
            e
        ))
    })
}

/// Write a record file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinanceError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let body = serde_json::to_string_pretty(data)
        .map_err(|e| FinanceError::Storage(format!("Failed to serialize {}: {}", path.display(), e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(storage_error("create directory for", path))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(storage_error("create temp file for", path))?;
    file.write_all(body.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(storage_error("write", &temp_path))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(storage_error("replace", path)(e));
    }

    tracing::debug!(path = %path.display(), bytes = body.len(), "saved record file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded: Sample = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("sample.json");
        let data = Sample {
            name: "budgets".into(),
            count: 3,
        };

        write_json_atomic(&path, &data).unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let loaded: Sample = read_json(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result: Result<Sample, _> = read_json(&path);
        assert!(matches!(result, Err(FinanceError::Storage(_))));
    }
}
