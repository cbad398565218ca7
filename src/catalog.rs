//! City → data file mapping.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Cities shipped with the tool, in the order they are offered to the user.
static DEFAULT_CITIES: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// Maps lowercase city names to the CSV file holding their trips.
///
/// Built once at startup and only borrowed afterwards. File names are
/// resolved against `data_dir`.
///
/// A replacement catalog can be loaded from a plain JSON object:
/// ```json
/// {
///   "chicago": "chicago.csv",
///   "boston": "boston_2017.csv"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CityCatalog {
    data_dir: PathBuf,
    entries: IndexMap<String, String>,
}

impl CityCatalog {
    /// The built-in three-city catalog rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let entries = DEFAULT_CITIES
            .iter()
            .map(|(city, file)| (city.to_string(), file.to_string()))
            .collect();
        Self {
            data_dir: data_dir.into(),
            entries,
        }
    }

    /// Loads a catalog from a JSON file at `path`. Keys are lowercased so they
    /// match normalized user input.
    pub fn load(path: &Path, data_dir: impl Into<PathBuf>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog '{}'", path.display()))?;
        let raw: IndexMap<String, String> = serde_json::from_str(&content).with_context(|| {
            format!("catalog '{}' is not a JSON object of strings", path.display())
        })?;

        if raw.is_empty() {
            bail!("catalog '{}' does not list any cities", path.display());
        }

        let entries = raw
            .into_iter()
            .map(|(city, file)| (city.trim().to_lowercase(), file))
            .collect();

        Ok(Self {
            data_dir: data_dir.into(),
            entries,
        })
    }

    /// Returns `true` if `city` (already normalized) is a supported city.
    pub fn contains(&self, city: &str) -> bool {
        self.entries.contains_key(city)
    }

    /// Full path of the data file for `city`, if the city is known.
    pub fn path_for(&self, city: &str) -> Option<PathBuf> {
        self.entries.get(city).map(|file| self.data_dir.join(file))
    }

    /// City names in catalog order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over all `(city, file)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
