use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A flat collection of named files.
///
/// The operations only ever see file names, so tests can swap the directory
/// for an in-memory fixture.
pub trait FileProvider {
    /// Names of every file in the collection, in the order they should be
    /// processed.
    fn file_names(&self) -> Result<Vec<String>>;

    fn read(&self, file_name: &str) -> Result<Vec<u8>>;

    /// Creates or overwrites a file.
    fn write(&self, file_name: &str, data: String) -> Result<()>;
}

/// Files of a single directory on disk, listed in byte order of their names.
#[derive(Clone, Debug)]
pub struct DirProvider {
    path: PathBuf,
}

impl DirProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Like [`DirProvider::new`] but creates the directory if needed.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)
            .with_context(|| format!("could not create {}", path.display()))?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileProvider for DirProvider {
    fn file_names(&self) -> Result<Vec<String>> {
        let entries = read_data_dir(&self.path)?;
        let mut names = Vec::new();

        for dir_entry in entries {
            let dir_entry = dir_entry?;

            if dir_entry.file_type()?.is_dir() {
                continue;
            }

            if let Some(name) = dir_entry.file_name().to_str() {
                names.push(name.to_owned());
            }
        }

        names.sort();

        Ok(names)
    }

    fn read(&self, file_name: &str) -> Result<Vec<u8>> {
        let path = self.path.join(file_name);

        fs::read(&path).with_context(|| format!("could not read {}", path.display()))
    }

    fn write(&self, file_name: &str, data: String) -> Result<()> {
        write_data(&self.path.join(file_name), data)
    }
}

/// In-memory file collection, listed in name order.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    files: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, file_name: &str, data: impl Into<Vec<u8>>) -> Self {
        self.files
            .borrow_mut()
            .insert(file_name.to_owned(), data.into());

        self
    }

    pub fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(file_name).cloned()
    }
}

impl FileProvider for MemoryProvider {
    fn file_names(&self) -> Result<Vec<String>> {
        Ok(self.files.borrow().keys().cloned().collect())
    }

    fn read(&self, file_name: &str) -> Result<Vec<u8>> {
        self.get(file_name)
            .with_context(|| format!("no file named {file_name}"))
    }

    fn write(&self, file_name: &str, data: String) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(file_name.to_owned(), data.into_bytes());

        Ok(())
    }
}

fn read_data_dir(data_path: &Path) -> Result<fs::ReadDir> {
    let data_path = fs::canonicalize(data_path)
        .with_context(|| format!("could not open {}", data_path.display()))?;
    let entries = fs::read_dir(data_path)?;

    Ok(entries)
}

pub fn write_data(path: &Path, data: String) -> Result<()> {
    fs::write(path, format!("{data}\n"))
        .with_context(|| format!("could not write {}", path.display()))?;

    Ok(())
}
