//! Package.json reading.
//!
//! A manifest is validated once, when it is parsed: every dependency category
//! is an optional mapping, and a category that is present but not an object
//! is read as empty.

use crate::error::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::trace;

/// A dependency category of package.json, in declaration-set order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Prod,
    Dev,
    Optional,
}

impl DependencyKind {
    /// All categories in the order they contribute to the declared set.
    pub const ALL: [Self; 3] = [Self::Prod, Self::Dev, Self::Optional];

    /// The package.json field holding this category.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Prod => "dependencies",
            Self::Dev => "devDependencies",
            Self::Optional => "optionalDependencies",
        }
    }
}

/// Name to version-specifier pairs of one category, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyTable(Vec<(String, String)>);

impl DependencyTable {
    #[must_use]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// Version specifier declared for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The parts of package.json this tool cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,

    #[serde(default, deserialize_with = "lenient_table")]
    pub dependencies: DependencyTable,

    #[serde(default, deserialize_with = "lenient_table")]
    pub dev_dependencies: DependencyTable,

    #[serde(default, deserialize_with = "lenient_table")]
    pub optional_dependencies: DependencyTable,
}

impl Manifest {
    /// Parse manifest text.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(strip_bom(content))?;
        Self::from_value(&value)
    }

    /// Build a manifest from an already parsed JSON document.
    ///
    /// The document root must be an object.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(<serde_json::Error as serde::de::Error>::custom(format!(
                "package.json must be a JSON object, got {}",
                json_type_name(value)
            )));
        }
        Self::deserialize(value)
    }

    /// The dependency table for a category.
    #[must_use]
    pub fn table(&self, kind: DependencyKind) -> &DependencyTable {
        match kind {
            DependencyKind::Prod => &self.dependencies,
            DependencyKind::Dev => &self.dev_dependencies,
            DependencyKind::Optional => &self.optional_dependencies,
        }
    }
}

/// Read and parse a package.json file.
///
/// A missing file is reported as [`Error::ManifestNotFound`] straight from the
/// read attempt; there is no separate existence check.
pub async fn read_manifest(path: &Path) -> Result<Manifest, Error> {
    read_manifest_document(path).await.map(|(manifest, _)| manifest)
}

/// Read a package.json file, returning both the typed manifest and the raw document.
pub(crate) async fn read_manifest_document(path: &Path) -> Result<(Manifest, Value), Error> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(Error::ManifestRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    trace!(path = %path.display(), bytes = content.len(), "read manifest");

    let parse_error = |source: serde_json::Error| Error::ManifestParse {
        path: path.to_path_buf(),
        source,
    };
    let value: Value = serde_json::from_str(strip_bom(&content)).map_err(parse_error)?;
    let manifest = Manifest::from_value(&value).map_err(parse_error)?;

    Ok((manifest, value))
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_table<'de, D>(deserializer: D) -> Result<DependencyTable, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(DependencyTable::default());
    };

    let entries = map
        .into_iter()
        .map(|(name, spec)| {
            let spec = match spec {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (name, spec)
        })
        .collect();

    Ok(DependencyTable(entries))
}

/// Get a human-readable type name for a JSON value.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;
    use tempfile::tempdir;

    fn write_package_json(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("package.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_keeps_document_order() {
        let manifest = Manifest::parse(
            r#"{
                "name": "app",
                "version": "1.0.0",
                "dependencies": { "left-pad": "1.0.0", "chalk": "2.0.0", "abbrev": "1.1.1" }
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = manifest.dependencies.names().collect();
        assert_eq!(names, ["left-pad", "chalk", "abbrev"]);
        assert_eq!(manifest.name.as_deref(), Some("app"));
        assert_eq!(manifest.version.as_deref(), Some("1.0.0"));
        assert_eq!(manifest.dependencies.get("chalk"), Some("2.0.0"));
    }

    #[test]
    fn test_missing_categories_are_empty() {
        let manifest = Manifest::parse(r#"{ "name": "bare" }"#).unwrap();

        for kind in DependencyKind::ALL {
            assert!(manifest.table(kind).is_empty(), "{}", kind.field_name());
        }
    }

    #[test]
    fn test_non_object_categories_are_empty() {
        let manifest = Manifest::parse(
            r#"{
                "dependencies": "not an object",
                "devDependencies": ["a", "b"],
                "optionalDependencies": null
            }"#,
        )
        .unwrap();

        assert!(manifest.dependencies.is_empty());
        assert!(manifest.dev_dependencies.is_empty());
        assert!(manifest.optional_dependencies.is_empty());
    }

    #[test]
    fn test_non_string_specifier_is_kept() {
        let manifest = Manifest::parse(r#"{ "dependencies": { "odd": 123, "ok": "^1.0.0" } }"#)
            .unwrap();

        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(manifest.dependencies.get("odd"), Some("123"));
    }

    #[test]
    fn test_non_string_name_is_ignored() {
        let manifest = Manifest::parse(r#"{ "name": 42, "version": true }"#).unwrap();
        assert_eq!(manifest.name, None);
        assert_eq!(manifest.version, None);
    }

    #[test]
    fn test_non_object_root() {
        assert!(Manifest::parse("[1, 2, 3]").is_err());
        assert!(Manifest::parse("null").is_err());
        assert!(Manifest::parse("\"text\"").is_err());
    }

    #[test]
    fn test_byte_order_mark() {
        let manifest = Manifest::parse("\u{feff}{\"dependencies\":{\"a\":\"1\"}}").unwrap();
        assert_eq!(manifest.dependencies.len(), 1);
    }

    #[test]
    fn test_kind_field_names() {
        let fields: Vec<&str> = DependencyKind::ALL
            .iter()
            .map(|k| k.field_name())
            .collect();
        assert_eq!(
            fields,
            ["dependencies", "devDependencies", "optionalDependencies"]
        );
    }

    #[tokio::test]
    async fn test_read_manifest() {
        let dir = tempdir().unwrap();
        let path = write_package_json(dir.path(), r#"{"dependencies":{"a":"^1.0.0"}}"#);

        let manifest = read_manifest(&path).await.unwrap();
        assert_eq!(manifest.dependencies.get("a"), Some("^1.0.0"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");

        let err = read_manifest(&path).await.unwrap_err();
        assert_eq!(err.code(), codes::CONSIST_MANIFEST_NOT_FOUND);
        assert!(matches!(err, Error::ManifestNotFound { path: p } if p == path));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let path = write_package_json(dir.path(), "not valid json {{{");

        let err = read_manifest(&path).await.unwrap_err();
        assert_eq!(err.code(), codes::CONSIST_MANIFEST_INVALID);
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[tokio::test]
    async fn test_non_object_root_file() {
        let dir = tempdir().unwrap();
        let path = write_package_json(dir.path(), "[1, 2, 3]");

        let err = read_manifest(&path).await.unwrap_err();
        assert_eq!(err.code(), codes::CONSIST_MANIFEST_INVALID);
    }

    #[tokio::test]
    async fn test_directory_in_place_of_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::create_dir(&path).unwrap();

        let err = read_manifest(&path).await.unwrap_err();
        assert_eq!(err.code(), codes::CONSIST_MANIFEST_READ_FAILED);
    }

    #[tokio::test]
    async fn test_raw_document_is_returned() {
        let dir = tempdir().unwrap();
        let path = write_package_json(dir.path(), r#"{"name":"x","custom":{"k":1}}"#);

        let (manifest, raw) = read_manifest_document(&path).await.unwrap();
        assert_eq!(manifest.name.as_deref(), Some("x"));
        assert_eq!(raw["custom"]["k"], 1);
    }
}
