// Key-Value Store
// Untyped persistence boundary shared by every setting

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

/// Flat, weakly typed key-value persistence. Reads are synchronous against
/// the open handle; every mutating call returns only after the change is
/// durable. A read whose stored value has a different primitive type yields
/// `None`, the same as an absent key.
#[async_trait]
pub trait KvStore: Send + Sync {
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_int(&self, key: &str) -> Option<i64>;
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_double(&self, key: &str) -> Option<f64>;
    fn get_string_list(&self, key: &str) -> Option<Vec<String>>;

    async fn set_string(&self, key: &str, value: &str) -> io::Result<()>;
    async fn set_int(&self, key: &str, value: i64) -> io::Result<()>;
    async fn set_bool(&self, key: &str, value: bool) -> io::Result<()>;
    async fn set_double(&self, key: &str, value: f64) -> io::Result<()>;
    async fn set_string_list(&self, key: &str, value: &[String]) -> io::Result<()>;

    async fn remove(&self, key: &str) -> io::Result<()>;
}

fn lock_entries(entries: &Mutex<BTreeMap<String, Value>>) -> MutexGuard<'_, BTreeMap<String, Value>> {
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read_value<T>(
    entries: &Mutex<BTreeMap<String, Value>>,
    key: &str,
    convert: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    lock_entries(entries).get(key).and_then(|value| convert(value))
}

fn string_list_value(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|element| element.as_str().map(|s| s.to_string()))
        .collect()
}

fn double_value(value: f64) -> io::Result<Value> {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "non-finite value"))
}

/// Production backend: a flat JSON object persisted to one file in the
/// platform's application-support directory. The map is held in memory and
/// rewritten as a whole on every mutation; a write gate serializes the
/// mutate-serialize-persist sequence so concurrent setters cannot interleave
/// file contents.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
    write_gate: tokio::sync::Mutex<()>,
}

impl FileKvStore {
    /// Open the store at `path`. A missing file opens empty; an unreadable or
    /// unparseable file fails the open so the caller can decide on recovery.
    pub async fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<BTreeMap<String, Value>>(&bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
            write_gate: tokio::sync::Mutex::new(()),
        })
    }

    /// Default store location under the application-support directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "localsend", "localsend")
            .map(|dirs| dirs.data_dir().join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_entry(&self, key: &str, value: Value) -> io::Result<()> {
        let _gate = self.write_gate.lock().await;
        lock_entries(&self.entries).insert(key.to_string(), value);
        self.persist().await
    }

    /// Flush the current map to disk. Callers must hold the write gate.
    async fn persist(&self) -> io::Result<()> {
        let payload = {
            let entries = lock_entries(&self.entries);
            serde_json::to_vec_pretty(&*entries)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::File::create(&self.path).await?;
        file.write_all(&payload).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    fn get_string(&self, key: &str) -> Option<String> {
        read_value(&self.entries, key, |v| v.as_str().map(|s| s.to_string()))
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        read_value(&self.entries, key, Value::as_i64)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        read_value(&self.entries, key, Value::as_bool)
    }

    fn get_double(&self, key: &str) -> Option<f64> {
        read_value(&self.entries, key, Value::as_f64)
    }

    fn get_string_list(&self, key: &str) -> Option<Vec<String>> {
        read_value(&self.entries, key, string_list_value)
    }

    async fn set_string(&self, key: &str, value: &str) -> io::Result<()> {
        self.write_entry(key, Value::String(value.to_string())).await
    }

    async fn set_int(&self, key: &str, value: i64) -> io::Result<()> {
        self.write_entry(key, Value::from(value)).await
    }

    async fn set_bool(&self, key: &str, value: bool) -> io::Result<()> {
        self.write_entry(key, Value::Bool(value)).await
    }

    async fn set_double(&self, key: &str, value: f64) -> io::Result<()> {
        self.write_entry(key, double_value(value)?).await
    }

    async fn set_string_list(&self, key: &str, value: &[String]) -> io::Result<()> {
        let list = value.iter().map(|s| Value::String(s.clone())).collect();
        self.write_entry(key, Value::Array(list)).await
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        let _gate = self.write_gate.lock().await;
        let removed = lock_entries(&self.entries).remove(key).is_some();
        if removed {
            self.persist().await?;
        }
        Ok(())
    }
}

/// In-memory backend with the same contract minus the disk. Clones share
/// contents, which lets tests keep a handle on the map across a simulated
/// restart of the consuming store.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<Mutex<BTreeMap<String, Value>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        lock_entries(&self.entries).contains_key(key)
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    fn get_string(&self, key: &str) -> Option<String> {
        read_value(&self.entries, key, |v| v.as_str().map(|s| s.to_string()))
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        read_value(&self.entries, key, Value::as_i64)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        read_value(&self.entries, key, Value::as_bool)
    }

    fn get_double(&self, key: &str) -> Option<f64> {
        read_value(&self.entries, key, Value::as_f64)
    }

    fn get_string_list(&self, key: &str) -> Option<Vec<String>> {
        read_value(&self.entries, key, string_list_value)
    }

    async fn set_string(&self, key: &str, value: &str) -> io::Result<()> {
        lock_entries(&self.entries).insert(key.to_string(), Value::String(value.to_string()));
        Ok(())
    }

    async fn set_int(&self, key: &str, value: i64) -> io::Result<()> {
        lock_entries(&self.entries).insert(key.to_string(), Value::from(value));
        Ok(())
    }

    async fn set_bool(&self, key: &str, value: bool) -> io::Result<()> {
        lock_entries(&self.entries).insert(key.to_string(), Value::Bool(value));
        Ok(())
    }

    async fn set_double(&self, key: &str, value: f64) -> io::Result<()> {
        lock_entries(&self.entries).insert(key.to_string(), double_value(value)?);
        Ok(())
    }

    async fn set_string_list(&self, key: &str, value: &[String]) -> io::Result<()> {
        let list = value.iter().map(|s| Value::String(s.clone())).collect();
        lock_entries(&self.entries).insert(key.to_string(), Value::Array(list));
        Ok(())
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        lock_entries(&self.entries).remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_round_trip_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = FileKvStore::open(&path).await.unwrap();
        store.set_string("ls_alias", "Clever Mango").await.unwrap();
        store.set_int("ls_port", 53317).await.unwrap();
        store.set_bool("ls_https", false).await.unwrap();
        store.set_double("ls_window_width", 1280.5).await.unwrap();
        store
            .set_string_list("ls_receive_history", &["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        drop(store);

        let reopened = FileKvStore::open(&path).await.unwrap();
        assert_eq!(reopened.get_string("ls_alias").as_deref(), Some("Clever Mango"));
        assert_eq!(reopened.get_int("ls_port"), Some(53317));
        assert_eq!(reopened.get_bool("ls_https"), Some(false));
        assert_eq!(reopened.get_double("ls_window_width"), Some(1280.5));
        assert_eq!(
            reopened.get_string_list("ls_receive_history"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[tokio::test]
    async fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path().join("settings.json")).await.unwrap();
        assert_eq!(store.get_string("ls_alias"), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, b"{not json").unwrap();

        let err = FileKvStore::open(&path).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn test_type_mismatch_reads_as_absent() {
        let store = MemoryKvStore::new();
        store.set_int("ls_port", 53317).await.unwrap();
        assert_eq!(store.get_string("ls_port"), None);
        assert_eq!(store.get_bool("ls_port"), None);
        assert_eq!(store.get_string_list("ls_port"), None);
    }

    #[tokio::test]
    async fn test_remove_deletes_the_key() {
        let store = MemoryKvStore::new();
        store.set_string("ls_destination", "192.168.1.10").await.unwrap();
        store.remove("ls_destination").await.unwrap();
        assert!(!store.contains_key("ls_destination"));
    }

    #[tokio::test]
    async fn test_memory_clones_share_contents() {
        let store = MemoryKvStore::new();
        let twin = store.clone();
        store.set_string("ls_alias", "Quiet Kiwi").await.unwrap();
        assert_eq!(twin.get_string("ls_alias").as_deref(), Some("Quiet Kiwi"));
    }
}
