use std::{
    fmt,
    future::Future,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
};

use futures::StreamExt;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};

use crate::{Res, warning};

#[derive(Debug)]
pub enum CacheError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::IoError(e) => write!(f, "cache i/o error: {}", e),
            CacheError::SerdeError(e) => write!(f, "cache serialization error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<Error> for CacheError {
    fn from(err: Error) -> Self {
        CacheError::IoError(err)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerdeError(err)
    }
}

#[derive(Serialize, Deserialize)]
struct CacheEntry<T> {
    function: String,
    args: serde_json::Value,
    value: T,
}

/// Persisted memoization of function results.
///
/// Entries are keyed by the function name and the JSON form of its
/// arguments; API clients are never part of the arguments, so any client
/// instance hits the same entries. Each entry is a JSON file stored at
/// `<location>/<function>/<sha256>.json`.
pub struct CacheStore {
    location: PathBuf,
}

impl CacheStore {
    pub async fn open(location: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let location = location.into();
        async_fs::create_dir_all(&location).await?;
        Ok(Self { location })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Hex SHA-256 of the function name and its serialized arguments.
    pub fn key<A: Serialize + ?Sized>(function: &str, args: &A) -> Result<String, CacheError> {
        let args = serde_json::to_string(args)?;
        let mut hasher = Sha256::new();
        hasher.update(function.as_bytes());
        hasher.update(b"\n");
        hasher.update(args.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Returns the stored result for `(function, args)` or computes, stores
    /// and returns it.
    ///
    /// An unreadable entry is treated as a miss and overwritten.
    pub async fn get_or_compute<A, T, F, Fut>(&self, function: &str, args: &A, compute: F) -> Res<T>
    where
        A: Serialize + ?Sized,
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Res<T>>,
    {
        let path = self.entry_path(function, &Self::key(function, args)?);

        match self.read_entry::<T>(&path).await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) => warning!("Ignoring cache entry {}: {}", path.display(), e),
        }

        let value = compute().await?;

        let entry = CacheEntry {
            function: function.to_string(),
            args: serde_json::to_value(args)?,
            value,
        };
        self.write_entry(&path, &entry).await?;
        Ok(entry.value)
    }

    /// Removes every entry of every function.
    pub async fn clear(&self) -> Result<(), CacheError> {
        match async_fs::remove_dir_all(&self.location).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(CacheError::IoError(e)),
        }
        async_fs::create_dir_all(&self.location).await?;
        Ok(())
    }

    /// Number of stored entries across all functions.
    pub async fn count(&self) -> Result<usize, CacheError> {
        let mut functions = match async_fs::read_dir(&self.location).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(CacheError::IoError(e)),
        };

        let mut count = 0;
        while let Some(function) = functions.next().await {
            let function = function?;
            if function.file_type().await?.is_dir() {
                count += async_fs::read_dir(function.path()).await?.count().await;
            }
        }
        Ok(count)
    }

    pub fn close(self) {}

    fn entry_path(&self, function: &str, key: &str) -> PathBuf {
        let mut path = self.location.clone();
        path.push(function);
        path.push(format!("{key}.json"));
        path
    }

    async fn read_entry<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, CacheError> {
        let json = match async_fs::read_to_string(path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::IoError(e)),
        };
        let entry: CacheEntry<T> = serde_json::from_str(&json)?;
        Ok(Some(entry.value))
    }

    async fn write_entry<T: Serialize>(
        &self,
        path: &Path,
        entry: &CacheEntry<T>,
    ) -> Result<(), CacheError> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(entry)?;
        async_fs::write(path, json).await?;
        Ok(())
    }
}
