//! City name to API city code resolution.
//!
//! The index is built from a JSON array of `{"city_name", "city_code"}`
//! records (extra fields are ignored). Lookups are exact: the raw name is
//! tried first, then the name with each administrative suffix appended.

use crate::types::{CityIndexError, WeatherError};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Suffixes tried, in order, after the unmodified name misses
pub const ADMIN_SUFFIXES: [&str; 3] = ["市", "县", "区"];

/// Longest city name accepted from user input, in characters
pub const MAX_CITY_NAME_CHARS: usize = 20;

/// Reference dataset shipped with the crate
pub static BUNDLED_DATASET: &[u8] = include_bytes!("../data/citycode.json");

#[derive(Debug, Deserialize)]
struct CityRecord {
    city_name: String,
    city_code: String,
}

/// Immutable name -> code lookup table
#[derive(Debug, Clone, Default)]
pub struct CityCodeIndex {
    codes: HashMap<String, String>,
    skipped: usize,
}

impl CityCodeIndex {
    /// Build an index from a JSON dataset.
    ///
    /// Elements that are not objects or lack either string field are
    /// skipped. Later records overwrite earlier ones with the same name.
    ///
    /// # Errors
    ///
    /// Returns `DatasetUnavailable` if `source` is not JSON or its root is
    /// not an array.
    pub fn load(source: &[u8]) -> Result<Self, CityIndexError> {
        let root: Value = serde_json::from_slice(source)
            .map_err(|e| CityIndexError::DatasetUnavailable(format!("invalid JSON: {}", e)))?;

        let Value::Array(entries) = root else {
            return Err(CityIndexError::DatasetUnavailable(
                "dataset root is not an array".to_string(),
            ));
        };

        let mut index = Self::default();
        for entry in entries {
            match serde_json::from_value::<CityRecord>(entry) {
                Ok(record) => {
                    index.codes.insert(record.city_name, record.city_code);
                }
                _ => index.skipped += 1,
            }
        }

        tracing::debug!(
            "Built city index with {} names ({} records skipped)",
            index.codes.len(),
            index.skipped
        );
        Ok(index)
    }

    /// Like `load`, but an unusable dataset yields an empty index
    pub fn load_or_empty(source: &[u8]) -> Self {
        Self::load(source).unwrap_or_else(|e| {
            tracing::warn!("{}; every city lookup will miss", e);
            Self::default()
        })
    }

    /// Read and build a dataset from disk.
    ///
    /// # Errors
    ///
    /// Returns `DatasetUnavailable` if the file can't be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, CityIndexError> {
        let bytes = std::fs::read(path).map_err(|e| {
            CityIndexError::DatasetUnavailable(format!("{}: {}", path.display(), e))
        })?;
        Self::load(&bytes)
    }

    /// Index over the dataset shipped with the crate
    pub fn bundled() -> Self {
        Self::load_or_empty(BUNDLED_DATASET)
    }

    /// Look up the code for `name`, trying `name`, `name市`, `name县`, `name区`.
    ///
    /// The first candidate present in the index decides the result; if its
    /// code is empty the lookup misses without trying later suffixes.
    /// Matching is exact: no trimming, case folding or partial matches.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let (candidate, code) = candidates(name)
            .find_map(|candidate| self.codes.get(&candidate).map(|code| (candidate, code)))?;
        if code.is_empty() {
            tracing::debug!("{:?} matched {:?} which has no city code", name, candidate);
            return None;
        }
        tracing::debug!("Resolved {:?} via {:?} -> {}", name, candidate, code);
        Some(code.as_str())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of dataset records that were not usable
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for CityCodeIndex {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        Self {
            codes: iter
                .into_iter()
                .map(|(name, code)| (name.into(), code.into()))
                .collect(),
            skipped: 0,
        }
    }
}

/// Lookup keys for `name` in resolution order
pub fn candidates(name: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(name.to_string())
        .chain(ADMIN_SUFFIXES.iter().map(move |suffix| format!("{}{}", name, suffix)))
}

/// Where a lazily built index reads its records from
#[derive(Debug, Clone)]
pub enum DatasetSource {
    Bundled,
    Path(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug)]
struct BuiltIndex {
    index: CityCodeIndex,
    error: Option<String>,
}

/// City index that is built on first lookup and never rebuilt.
///
/// A dataset that fails to load produces an empty index, so every lookup
/// misses; the failure stays observable through `load_error()`. Lookups
/// are safe from several threads once built.
#[derive(Debug)]
pub struct LazyCityIndex {
    source: DatasetSource,
    built: OnceCell<BuiltIndex>,
}

impl LazyCityIndex {
    pub fn new(source: DatasetSource) -> Self {
        Self {
            source,
            built: OnceCell::new(),
        }
    }

    pub fn bundled() -> Self {
        Self::new(DatasetSource::Bundled)
    }

    /// Use `path` when given, otherwise the bundled dataset
    pub fn from_optional_path(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::new(DatasetSource::Path(p.to_path_buf())),
            None => Self::bundled(),
        }
    }

    /// The index, building it now if this is the first access
    pub fn index(&self) -> &CityCodeIndex {
        &self.built().index
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        let code = self.index().resolve(name);
        if code.is_none() {
            tracing::info!("No city code for {:?}", name);
        }
        code
    }

    pub fn is_built(&self) -> bool {
        self.built.get().is_some()
    }

    /// Why the dataset could not be used, once the index has been built
    pub fn load_error(&self) -> Option<&str> {
        self.built.get().and_then(|b| b.error.as_deref())
    }

    fn built(&self) -> &BuiltIndex {
        self.built.get_or_init(|| {
            let result = match &self.source {
                DatasetSource::Bundled => CityCodeIndex::load(BUNDLED_DATASET),
                DatasetSource::Path(path) => CityCodeIndex::from_path(path),
                DatasetSource::Bytes(bytes) => CityCodeIndex::load(bytes),
            };
            match result {
                Ok(index) => {
                    tracing::info!("City index ready with {} names", index.len());
                    BuiltIndex { index, error: None }
                }
                Err(e) => {
                    tracing::warn!("{}; every city lookup will miss", e);
                    BuiltIndex {
                        index: CityCodeIndex::default(),
                        error: Some(e.to_string()),
                    }
                }
            }
        })
    }
}

/// Check a user-typed city name and return it trimmed.
///
/// Accepts 1 to 20 characters drawn from CJK unified ideographs, ASCII
/// letters and ASCII digits.
///
/// # Errors
///
/// Returns `InvalidCityName` for empty, overlong or non-conforming input.
pub fn validate_city_name(input: &str) -> Result<&str, WeatherError> {
    let name = input.trim();
    let len = name.chars().count();
    let allowed = |c: char| c.is_ascii_alphanumeric() || ('\u{4e00}'..='\u{9fa5}').contains(&c);

    if len == 0 || len > MAX_CITY_NAME_CHARS || !name.chars().all(allowed) {
        return Err(WeatherError::InvalidCityName(input.to_string()));
    }
    Ok(name)
}
