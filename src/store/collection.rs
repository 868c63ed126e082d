use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use spdlog::{debug, info};

use crate::error::{FolioError, Result};
use crate::model::Record;

/// One JSON array file held in memory and written back on every change.
pub struct Collection<T: Record> {
    file: PathBuf,
    items: Vec<T>,
}

impl<T: Record> Collection<T> {
    /// Loads the file, a missing file being an empty collection.
    pub fn open(file: PathBuf) -> Result<Self> {
        let items = match fs::read_to_string(&file) {
            Ok(content) => Self::parse(&file, &content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", file.display());
                vec![]
            }
            Err(e) => return Err(e.into()),
        };

        info!("Loaded {} {} record(s) from {}", items.len(), T::KIND, file.display());
        Ok(Collection { file, items })
    }

    fn parse(file: &Path, content: &str) -> Result<Vec<T>> {
        if content.trim().is_empty() {
            return Ok(vec![]);
        }
        serde_json::from_str::<Vec<T>>(content).map_err(|source| FolioError::Json {
            file: file.to_path_buf(),
            source,
        })
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn get(&self, id: u64) -> Result<&T> {
        self.items.iter()
            .find(|item| item.id() == id)
            .ok_or_else(|| FolioError::not_found(T::KIND, id))
    }

    /// Assigns the next free id, stores the record and returns it.
    pub fn insert(&mut self, mut item: T) -> Result<T> {
        item.validate()?;
        item.set_id(self.next_id());
        let mut items = self.items.clone();
        items.push(item.clone());
        self.commit(items)?;
        Ok(item)
    }

    /// Replaces the record with the same id, keeping its position.
    pub fn update(&mut self, id: u64, mut item: T) -> Result<T> {
        item.validate()?;
        item.set_id(id);
        let index = self.position(id)?;
        let mut items = self.items.clone();
        items[index] = item.clone();
        self.commit(items)?;
        Ok(item)
    }

    /// Applies `change` to a copy of the record and persists it. Validation is skipped, `change` must keep the record valid.
    pub fn modify<F>(&mut self, id: u64, change: F) -> Result<T>
    where
        F: FnOnce(&mut T),
    {
        let index = self.position(id)?;
        let mut items = self.items.clone();
        change(&mut items[index]);
        let updated = items[index].clone();
        self.commit(items)?;
        Ok(updated)
    }

    pub fn delete(&mut self, id: u64) -> Result<T> {
        let index = self.position(id)?;
        let mut items = self.items.clone();
        let removed = items.remove(index);
        self.commit(items)?;
        Ok(removed)
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.items.iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| FolioError::not_found(T::KIND, id))
    }

    fn next_id(&self) -> u64 {
        self.items.iter().map(|item| item.id()).max().unwrap_or(0) + 1
    }

    /// Writes `items` to disk and only then makes them the in-memory state.
    fn commit(&mut self, items: Vec<T>) -> Result<()> {
        Self::persist(&self.file, &items)?;
        self.items = items;
        Ok(())
    }

    fn persist(file: &Path, items: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(items).map_err(|source| FolioError::Json {
            file: file.to_path_buf(),
            source,
        })?;

        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }

        // Never leaves a half written file behind
        let tmp_file = file.with_extension("json.tmp");
        fs::write(&tmp_file, json)?;
        fs::rename(&tmp_file, file)?;
        Ok(())
    }
}
