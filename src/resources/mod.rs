//! Named resources stored as files in a directory.
//!
//! A store maps resource names to files `<dir>/<name><ext>`. Listing is
//! non-recursive and strips the extension, so names round-trip through
//! [`ResourceStore::put`] and [`ResourceStore::get`].

pub mod model;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::RoiBridgeError;

/// A collection of named resources of type `T`.
pub trait ResourceStore<T> {
    /// Names of all stored resources, sorted.
    fn names(&self) -> Result<Vec<String>, RoiBridgeError>;

    /// Loads a resource by name.
    ///
    /// # Errors
    /// Returns [`RoiBridgeError::NotFound`] if no resource has that name.
    fn get(&self, name: &str) -> Result<T, RoiBridgeError>;

    /// Stores a resource, replacing any existing resource with the same name.
    fn put(&mut self, name: &str, resource: &T) -> Result<(), RoiBridgeError>;
}

/// Shared file layout for directory-backed stores.
#[derive(Clone, Debug)]
struct FileLayout {
    dir: PathBuf,
    ext: String,
}

impl FileLayout {
    fn new(dir: impl Into<PathBuf>, ext: &str) -> Self {
        let ext = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{ext}")
        };
        Self {
            dir: dir.into(),
            ext,
        }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}{}", self.ext))
    }

    fn list(&self) -> Result<Vec<String>, RoiBridgeError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(self.ext.as_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn existing(&self, name: &str) -> Result<PathBuf, RoiBridgeError> {
        let path = self.path_for(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(RoiBridgeError::NotFound {
                name: name.to_string(),
            })
        }
    }

    fn ensure_dir(&self) -> Result<(), RoiBridgeError> {
        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

/// Plain-text resources, e.g. scripts. Defaults to the `.txt` extension.
#[derive(Clone, Debug)]
pub struct TextResourceStore {
    layout: FileLayout,
}

impl TextResourceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_extension(dir, ".txt")
    }

    /// Creates a store using `ext`; a leading dot is added if missing.
    pub fn with_extension(dir: impl Into<PathBuf>, ext: &str) -> Self {
        Self {
            layout: FileLayout::new(dir, ext),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.layout.dir
    }

    pub fn extension(&self) -> &str {
        &self.layout.ext
    }
}

impl ResourceStore<String> for TextResourceStore {
    fn names(&self) -> Result<Vec<String>, RoiBridgeError> {
        self.layout.list()
    }

    fn get(&self, name: &str) -> Result<String, RoiBridgeError> {
        let path = self.layout.existing(name)?;
        Ok(fs::read_to_string(path)?)
    }

    fn put(&mut self, name: &str, resource: &String) -> Result<(), RoiBridgeError> {
        self.layout.ensure_dir()?;
        fs::write(self.layout.path_for(name), resource)?;
        tracing::debug!(name, dir = %self.layout.dir.display(), "stored text resource");
        Ok(())
    }
}

/// Resources serialized as JSON with serde, stored with the `.json` extension.
#[derive(Debug)]
pub struct JsonResourceStore<T> {
    layout: FileLayout,
    _resource: PhantomData<fn() -> T>,
}

impl<T> JsonResourceStore<T> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            layout: FileLayout::new(dir, ".json"),
            _resource: PhantomData,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.layout.dir
    }
}

impl<T> ResourceStore<T> for JsonResourceStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn names(&self) -> Result<Vec<String>, RoiBridgeError> {
        self.layout.list()
    }

    fn get(&self, name: &str) -> Result<T, RoiBridgeError> {
        let path = self.layout.existing(name)?;
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader).map_err(|source| RoiBridgeError::ResourceJson {
            name: name.to_string(),
            source,
        })
    }

    fn put(&mut self, name: &str, resource: &T) -> Result<(), RoiBridgeError> {
        self.layout.ensure_dir()?;
        let file = File::create(self.layout.path_for(name))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, resource).map_err(|source| {
            RoiBridgeError::ResourceJson {
                name: name.to_string(),
                source,
            }
        })?;
        writer.flush()?;
        tracing::debug!(name, dir = %self.layout.dir.display(), "stored JSON resource");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_gets_leading_dot() {
        let store = TextResourceStore::with_extension("scripts", "groovy");
        assert_eq!(store.extension(), ".groovy");
        let store = TextResourceStore::with_extension("scripts", ".py");
        assert_eq!(store.extension(), ".py");
        assert_eq!(TextResourceStore::new("scripts").extension(), ".txt");
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let store = TextResourceStore::new("/definitely/not/a/real/dir/roibridge");
        assert_eq!(store.names().expect("list names"), Vec::<String>::new());
    }

    #[test]
    fn missing_resource_is_not_found() {
        let store = TextResourceStore::new("/definitely/not/a/real/dir/roibridge");
        match store.get("absent") {
            Err(RoiBridgeError::NotFound { name }) => assert_eq!(name, "absent"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
