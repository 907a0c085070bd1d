use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::state::GameSnapshot;

/// Ошибки хранилища снапшотов.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Snapshot is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Абстракция хранилища снапшота партии.
///
/// Удобна:
/// - для тестов (in-memory);
/// - для CLI / приложения, которое переживает перезапуск (файл).
pub trait SnapshotStorage {
    /// Загрузить сохранённую партию (если она есть).
    fn load(&self) -> Result<Option<GameSnapshot>, StorageError>;

    /// Сохранить партию, заменив предыдущую.
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), StorageError>;

    /// Забыть сохранённую партию.
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStorage {
    snapshot: Option<GameSnapshot>,
}

impl InMemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for InMemorySnapshotStorage {
    fn load(&self) -> Result<Option<GameSnapshot>, StorageError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), StorageError> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.snapshot = None;
        Ok(())
    }
}

/// Снапшот в JSON-файле.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStorage {
    path: PathBuf,
}

impl JsonFileSnapshotStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStorage for JsonFileSnapshotStorage {
    fn load(&self) -> Result<Option<GameSnapshot>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(GameSnapshot::from_json(&raw)?))
    }

    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
