use std::{marker::PhantomData, path::PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::warn;

use crate::errors::ServiceError;

/// Generic JSON file-backed list store.
///
/// Persists a `Vec<T>` as one pretty-printed JSON array and rewrites the
/// whole file on every save. The file is the single source of truth; no
/// copy of the collection is cached between calls. Intended for small
/// collections where a database is overkill.
///
/// Not internally synchronized: `load` and `save` must only run inside the
/// caller's critical section, otherwise concurrent load-mutate-save cycles
/// lose updates.
pub struct JsonListStore<T> {
    file_path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Initialize the store at a path, creating parent directories as
    /// needed. The file itself is created on first `load`.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }
        Ok(Self { file_path, _marker: PhantomData })
    }

    /// Read the full collection from the backing file.
    ///
    /// A missing file is created holding `[]`. Content that fails to parse
    /// as a JSON array of `T` is overwritten with `[]` and an empty
    /// collection is returned; the repair is logged but not surfaced.
    /// Other I/O failures propagate.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.write_atomic(b"[]").await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };

        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(
                    path = %self.file_path.display(),
                    error = %e,
                    "backing file unparsable; resetting to empty collection"
                );
                self.write_atomic(b"[]").await?;
                Ok(Vec::new())
            }
        }
    }

    /// Serialize the full collection and rewrite the backing file.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items).map_err(ServiceError::storage)?;
        self.write_atomic(&data).await
    }

    /// Whole-file rewrite via a temp file in the same directory followed by
    /// a rename, so a crash mid-write leaves the prior content intact.
    async fn write_atomic(&self, data: &[u8]) -> Result<(), ServiceError> {
        let tmp = self.file_path.with_extension("tmp");
        fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(ServiceError::storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn tmp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("json_list_store_{tag}_{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn load_creates_missing_file_with_empty_array() -> Result<(), anyhow::Error> {
        let path = tmp_path("missing");
        let store = JsonListStore::<u32>::new(&path).await?;
        let items = store.load().await?;
        assert!(items.is_empty());
        let on_disk = tokio::fs::read_to_string(&path).await?;
        assert_eq!(on_disk, "[]");
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_round_trips_in_order() -> Result<(), anyhow::Error> {
        let path = tmp_path("order");
        let store = JsonListStore::<u32>::new(&path).await?;
        store.save(&[3, 1, 2]).await?;
        assert_eq!(store.load().await?, vec![3, 1, 2]);
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn save_pretty_prints_the_array() -> Result<(), anyhow::Error> {
        let path = tmp_path("pretty");
        let store = JsonListStore::<u32>::new(&path).await?;
        store.save(&[1, 2]).await?;
        let on_disk = tokio::fs::read_to_string(&path).await?;
        assert!(on_disk.contains('\n'), "expected indented output, got {on_disk:?}");
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_reset_to_empty_array() -> Result<(), anyhow::Error> {
        let path = tmp_path("corrupt");
        tokio::fs::write(&path, b"{not json").await?;
        let store = JsonListStore::<u32>::new(&path).await?;
        assert!(store.load().await?.is_empty());
        let on_disk = tokio::fs::read_to_string(&path).await?;
        assert_eq!(on_disk, "[]");
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn non_array_json_is_also_reset() -> Result<(), anyhow::Error> {
        let path = tmp_path("non_array");
        tokio::fs::write(&path, br#"{"id": 1}"#).await?;
        let store = JsonListStore::<u32>::new(&path).await?;
        assert!(store.load().await?.is_empty());
        assert_eq!(tokio::fs::read_to_string(&path).await?, "[]");
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file_behind() -> Result<(), anyhow::Error> {
        let path = tmp_path("tmpfile");
        let store = JsonListStore::<u32>::new(&path).await?;
        store.save(&[1]).await?;
        assert!(tokio::fs::metadata(path.with_extension("tmp")).await.is_err());
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
