//! JSON documents holding batches of regions.
//!
//! These are the files the CLI reads and writes, and a convenient way to
//! inspect what a conversion produced.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::RoiBridgeError;
use crate::plane::PlaneIndex;
use crate::source::SourceRegion;
use crate::toolkit::ToolkitRegion;

/// Regions in the source platform's model. Each region carries its own plane.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub regions: Vec<SourceRegion>,
}

/// Regions in the toolkit's model, all on one image plane.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolkitDocument {
    #[serde(default)]
    pub plane: PlaneIndex,
    pub regions: Vec<ToolkitRegion>,
}

/// Reads a source document from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_source_json(path: &Path) -> Result<SourceDocument, RoiBridgeError> {
    read_json(path)
}

/// Writes a source document to a JSON file (pretty-printed).
pub fn write_source_json(path: &Path, doc: &SourceDocument) -> Result<(), RoiBridgeError> {
    write_json(path, doc)
}

/// Reads a toolkit document from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_toolkit_json(path: &Path) -> Result<ToolkitDocument, RoiBridgeError> {
    read_json(path)
}

/// Writes a toolkit document to a JSON file (pretty-printed).
pub fn write_toolkit_json(path: &Path, doc: &ToolkitDocument) -> Result<(), RoiBridgeError> {
    write_json(path, doc)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RoiBridgeError> {
    let file = File::open(path).map_err(RoiBridgeError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| RoiBridgeError::RegionJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), RoiBridgeError> {
    let file = File::create(path).map_err(RoiBridgeError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(|source| RoiBridgeError::RegionJsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn source_from_str(json: &str) -> Result<SourceDocument, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn source_from_slice(bytes: &[u8]) -> Result<SourceDocument, serde_json::Error> {
    serde_json::from_slice(bytes)
}

pub fn source_to_string(doc: &SourceDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

pub fn toolkit_from_str(json: &str) -> Result<ToolkitDocument, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn toolkit_from_slice(bytes: &[u8]) -> Result<ToolkitDocument, serde_json::Error> {
    serde_json::from_slice(bytes)
}

pub fn toolkit_to_string(doc: &ToolkitDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}
