//! Load-or-default JSON storage for networks and datasets.
//!
//! The `try_*` functions report every failure. `save` and `load_or_default` never fail: a
//! failed save is logged and dropped, a failed load is logged and replaced by `T::default()`.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{info, warn};
use serde::{Serialize, de::DeserializeOwned};

/// Where a network is stored when no path is given.
pub const NETWORK_PATH: &str = "saves/network.json";

/// Where a dataset is stored when no path is given.
pub const DATASET_PATH: &str = "saves/dataset.json";

/// Serializes `value` into `path`, creating its parent directories.
///
/// # Errors
/// Any io or serialization error.
pub fn try_save<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = parent_dir(path) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_vec(value)?;
    fs::write(path, json)?;

    info!("saved to {}", path.display());
    Ok(())
}

/// Deserializes a value from `path`.
///
/// # Errors
/// Any io or deserialization error.
pub fn try_load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> io::Result<T> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Saves `value` into `path`, logging instead of failing.
pub fn save<T: Serialize, P: AsRef<Path>>(value: &T, path: P) {
    let path = path.as_ref();
    if let Err(e) = try_save(value, path) {
        warn!("couldn't save to {}: {e}", path.display());
    }
}

/// Loads a value from `path`, falling back to `T::default()` if it can't be read.
pub fn load_or_default<T, P>(path: P) -> T
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    try_load(path).unwrap_or_else(|e| {
        warn!("couldn't load {}, using the default: {e}", path.display());
        T::default()
    })
}

/// The async version of `save`.
pub async fn save_async<T: Serialize, P: AsRef<Path>>(value: &T, path: P) {
    let path = path.as_ref();
    if let Err(e) = try_save_async(value, path).await {
        warn!("couldn't save to {}: {e}", path.display());
    }
}

/// The async version of `load_or_default`.
pub async fn load_or_default_async<T, P>(path: P) -> T
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    try_load_async(path).await.unwrap_or_else(|e| {
        warn!("couldn't load {}, using the default: {e}", path.display());
        T::default()
    })
}

/// The async version of `try_save`.
///
/// # Errors
/// Any io or serialization error.
pub async fn try_save_async<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = parent_dir(path) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_vec(value)?;
    tokio::fs::write(path, json).await?;

    info!("saved to {}", path.display());
    Ok(())
}

/// The async version of `try_load`.
///
/// # Errors
/// Any io or deserialization error.
pub async fn try_load_async<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> io::Result<T> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn parent_dir(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, Example};

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.push(Example {
            inputs: vec![-0.5, 0.1, 0.5],
            ideal: vec![0., 1., 0.],
        });
        dataset
    }

    #[test]
    fn saving_creates_the_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("saves").join("dataset.json");

        try_save(&dataset(), &path).unwrap();
        assert!(path.exists());
        assert_eq!(try_load::<Dataset, _>(&path).unwrap(), dataset());
    }

    #[test]
    fn missing_files_load_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Dataset = load_or_default(dir.path().join("missing.json"));
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupted_files_load_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        fs::write(&path, b"{ definitely not a dataset").unwrap();

        assert!(try_load::<Dataset, _>(&path).is_err());
        let loaded: Dataset = load_or_default(&path);
        assert!(loaded.is_empty());
    }

    #[test]
    fn failed_saves_are_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"").unwrap();

        // The parent is a regular file, so the directory can't be created.
        save(&dataset(), blocker.join("dataset.json"));
        assert!(try_save(&dataset(), blocker.join("dataset.json")).is_err());
    }

    #[tokio::test]
    async fn async_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saves").join("dataset.json");

        save_async(&dataset(), &path).await;
        let loaded: Dataset = load_or_default_async(&path).await;
        assert_eq!(loaded, dataset());

        let missing: Dataset = load_or_default_async(dir.path().join("missing.json")).await;
        assert!(missing.is_empty());
    }
}
