//! Curriculum Loading
//!
//! Reads a curriculum bundle from the embedded data directory (compiled in
//! via `include_dir!`) or from a directory on disk:
//!
//! ```text
//! data/
//! ├── manifest.json
//! ├── syllabus.json
//! └── levels/
//!     ├── fundamentals.json
//!     └── variables.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::curriculum::Manifest;
use crate::error::{CurriculumError, Result};
use crate::level::Level;
use crate::syllabus::Syllabus;

static BUILTIN: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/data");

const MANIFEST_FILE: &str = "manifest.json";
const SYLLABUS_FILE: &str = "syllabus.json";
const LEVELS_DIR: &str = "levels";

/// Raw contents of a curriculum bundle, before assembly
#[derive(Debug, Clone)]
pub struct Bundle {
    pub manifest: Manifest,
    /// Levels in file-name order; the manifest decides progression order
    pub levels: Vec<Level>,
    pub syllabus: Syllabus,
}

/// Load the bundle compiled into the crate
pub fn load_builtin() -> Result<Bundle> {
    load_from_embedded(&BUILTIN)
}

/// Load a bundle from an embedded directory
pub fn load_from_embedded(dir: &'static Dir<'static>) -> Result<Bundle> {
    let manifest = parse_embedded(dir, Path::new(MANIFEST_FILE))?;
    let syllabus = parse_embedded(dir, Path::new(SYLLABUS_FILE))?;

    let mut level_files: Vec<_> = dir
        .get_dir(LEVELS_DIR)
        .map(|levels| levels.files().filter(|f| is_json(f.path())).collect())
        .unwrap_or_default();
    level_files.sort_by(|a, b| a.path().cmp(b.path()));

    let mut levels = Vec::with_capacity(level_files.len());
    for file in level_files {
        let content = file.contents_utf8().ok_or_else(|| CurriculumError::InvalidFormat {
            path: file.path().to_path_buf(),
            message: "file is not valid UTF-8".to_string(),
        })?;
        tracing::debug!(path = %file.path().display(), "Parsing embedded level");
        levels.push(parse(file.path(), content)?);
    }

    Ok(Bundle {
        manifest,
        levels,
        syllabus,
    })
}

/// Load a bundle from a filesystem directory
pub fn load_from_directory(root: &Path) -> Result<Bundle> {
    tracing::debug!(root = %root.display(), "Loading curriculum from directory");

    let manifest = read_and_parse(&root.join(MANIFEST_FILE))?;
    let syllabus = read_and_parse(&root.join(SYLLABUS_FILE))?;

    let levels_dir = root.join(LEVELS_DIR);
    let mut levels = Vec::new();
    if levels_dir.is_dir() {
        for entry in WalkDir::new(&levels_dir).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && is_json(entry.path()) {
                levels.push(read_and_parse(entry.path())?);
            }
        }
    } else {
        tracing::warn!(path = %levels_dir.display(), "No levels directory found");
    }

    Ok(Bundle {
        manifest,
        levels,
        syllabus,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}

fn parse_embedded<T: DeserializeOwned>(dir: &'static Dir<'static>, path: &Path) -> Result<T> {
    let content = dir
        .get_file(path)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| CurriculumError::InvalidFormat {
            path: path.to_path_buf(),
            message: "missing from embedded bundle".to_string(),
        })?;
    parse(path, content)
}

fn read_and_parse<T: DeserializeOwned>(path: &Path) -> Result<T> {
    tracing::debug!(path = %path.display(), "Reading");
    let content = fs::read_to_string(path)?;
    parse(path, &content)
}

fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|e| CurriculumError::InvalidFormat {
        path: PathBuf::from(path),
        message: e.to_string(),
    })
}
