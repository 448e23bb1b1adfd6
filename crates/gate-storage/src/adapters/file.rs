//! File-backed store for deployments without RocksDB.
//!
//! Persists both namespaces to a single binary file, rewritten atomically
//! (temp file + fsync + rename) on every new key. Promotions are rare, so
//! full rewrites are acceptable. A sibling `.lock` file holds an exclusive
//! `flock` for the lifetime of the backend.
//!
//! Record format, repeated until EOF:
//! `[namespace:u8][key_len:u32 LE][key][value_len:u32 LE][value]`

use crate::errors::BackendError;
use crate::ports::{ApprovalBackend, Namespace};
use fs2::FileExt;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

type Records = BTreeMap<(Namespace, Vec<u8>), Vec<u8>>;

/// Durable single-file backend.
pub struct FileBackedBackend {
    data: RwLock<Records>,
    path: PathBuf,
    _lock: File,
}

impl FileBackedBackend {
    /// Open (or create) the store at `path`.
    ///
    /// Fails if another process holds the lock or the file is corrupt.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BackendError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let lock = acquire_lock(&path)?;
        let data = load_from_file(&path)?;

        if data.is_empty() {
            tracing::info!(path = %path.display(), "Approval store file empty or not found");
        } else {
            tracing::info!(path = %path.display(), keys = data.len(), "Loaded approval store file");
        }

        Ok(Self {
            data: RwLock::new(data),
            path,
            _lock: lock,
        })
    }

    /// Location of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_to_file(&self, data: &Records) -> Result<(), BackendError> {
        let mut bytes = Vec::new();

        for ((namespace, key), value) in data {
            bytes.push(namespace.tag());
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;

        std::fs::rename(&temp_path, &self.path).map_err(io_error)
    }
}

impl ApprovalBackend for FileBackedBackend {
    fn list_keys(&self, namespace: Namespace) -> Result<Vec<Vec<u8>>, BackendError> {
        Ok(self
            .data
            .read()
            .keys()
            .filter(|(ns, _)| *ns == namespace)
            .map(|(_, key)| key.clone())
            .collect())
    }

    fn put(&self, namespace: Namespace, key: &[u8], value: &[u8]) -> Result<(), BackendError> {
        let mut data = self.data.write();
        let record = (namespace, key.to_vec());

        if data.get(&record).is_some_and(|v| v.as_slice() == value) {
            return Ok(());
        }

        data.insert(record.clone(), value.to_vec());
        if let Err(e) = self.save_to_file(&data) {
            // Keep memory consistent with disk
            data.remove(&record);
            return Err(e);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

fn acquire_lock(path: &Path) -> Result<File, BackendError> {
    let lock_path = path.with_extension("lock");
    let lock = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(io_error)?;

    lock.try_lock_exclusive().map_err(|_| BackendError::Locked {
        path: lock_path.display().to_string(),
    })?;
    Ok(lock)
}

fn load_from_file(path: &Path) -> Result<Records, BackendError> {
    let mut bytes = Vec::new();
    match File::open(path) {
        Ok(mut file) => {
            file.read_to_end(&mut bytes).map_err(io_error)?;
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Records::new()),
        Err(e) => return Err(io_error(e)),
    }

    let mut data = Records::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let tag = bytes[cursor];
        cursor += 1;
        let namespace = Namespace::from_tag(tag).ok_or_else(|| BackendError::CorruptionError {
            message: format!("unknown namespace tag {tag} at offset {}", cursor - 1),
        })?;

        let key = read_chunk(&bytes, &mut cursor)?;
        let value = read_chunk(&bytes, &mut cursor)?;
        data.insert((namespace, key), value);
    }

    Ok(data)
}

fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, BackendError> {
    let truncated = || BackendError::CorruptionError {
        message: format!("truncated record at offset {}", *cursor),
    };

    let len_bytes: [u8; 4] = bytes
        .get(*cursor..*cursor + 4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(truncated)?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    let chunk = bytes
        .get(*cursor + 4..*cursor + 4 + len)
        .ok_or_else(truncated)?
        .to_vec();
    *cursor += 4 + len;
    Ok(chunk)
}

fn io_error(e: std::io::Error) -> BackendError {
    BackendError::IOError {
        message: e.to_string(),
    }
}
