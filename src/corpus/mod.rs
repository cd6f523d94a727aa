#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// A single corpus entry: id derived from the filename stem, body trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    /// Human-readable form of the id: underscores to spaces, title case
    #[inline]
    pub fn display_name(&self) -> String {
        display_name(&self.id)
    }
}

#[inline]
pub fn display_name(id: &str) -> String {
    id.split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<String>>()
        .join(" ")
}

/// Uppercase the first character, leaving the rest of the text untouched
#[inline]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// The two corpus categories, concatenated into one ranking universe.
///
/// Landmarks come first, municipalities second, and both `documents` and
/// `location_ids` iterate in that single fixed order. The same sequence is
/// used to build embeddings and to map search positions back to ids, so the
/// two can never drift apart.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub landmarks: Vec<Document>,
    pub municipalities: Vec<Document>,
}

impl Corpus {
    /// Load both categories from their directories. Missing directories are
    /// treated as empty categories, not errors.
    #[inline]
    pub fn load(landmarks_dir: &Path, municipalities_dir: &Path) -> Result<Self> {
        let landmarks = load_documents(landmarks_dir)
            .with_context(|| format!("Failed to load landmarks from {}", landmarks_dir.display()))?;
        let municipalities = load_documents(municipalities_dir).with_context(|| {
            format!(
                "Failed to load municipalities from {}",
                municipalities_dir.display()
            )
        })?;

        info!(
            "Loaded corpus: {} landmarks, {} municipalities",
            landmarks.len(),
            municipalities.len()
        );

        Ok(Self {
            landmarks,
            municipalities,
        })
    }

    /// All documents in ranking order: landmarks, then municipalities
    #[inline]
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.landmarks.iter().chain(self.municipalities.iter())
    }

    /// Location ids in the same order as `documents`
    #[inline]
    pub fn location_ids(&self) -> Vec<String> {
        self.documents().map(|doc| doc.id.clone()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.landmarks.len() + self.municipalities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty() && self.municipalities.is_empty()
    }
}

/// Read every `.txt` file in a directory into a Document, sorted by
/// filename so corpus order is stable across runs. Non-`.txt` files and
/// files that are empty after trimming are skipped.
#[inline]
pub fn load_documents(dir: &Path) -> Result<Vec<Document>> {
    if !dir.exists() {
        warn!("Corpus directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut paths: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to list directory {}", dir.display()))?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        })
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
            warn!("Skipping file with non-UTF-8 name: {}", path.display());
            continue;
        };

        let body = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let text = body.trim();

        if text.is_empty() {
            debug!("Skipping empty document {}", path.display());
            continue;
        }

        documents.push(Document {
            id: id.to_string(),
            text: text.to_string(),
        });
    }

    debug!("Loaded {} documents from {}", documents.len(), dir.display());
    Ok(documents)
}
