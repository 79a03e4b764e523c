//! Dependency and package manifests
//!
//! Both manifests are JSON objects read from a fixed file name inside a
//! project directory. Key order is preserved on read and on write.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};
use std::fs;

/// Parse manifest text into a non-empty JSON object
fn parse_object(file: &str, content: &str) -> Result<Map<String, Value>> {
    if content.trim().is_empty() {
        return Err(Error::manifest_empty(file));
    }

    let value: Value =
        serde_json::from_str(content).map_err(|e| Error::manifest_parse(file, e.to_string()))?;

    match value {
        Value::Null => Err(Error::manifest_empty(file)),
        Value::Object(map) if map.is_empty() => Err(Error::manifest_empty(file)),
        Value::Object(map) => Ok(map),
        _ => Err(Error::invalid_manifest(file, "expected a JSON object")),
    }
}

fn read_manifest(dir: &Utf8Path, file: &str) -> Result<(Utf8PathBuf, String)> {
    let path = dir.join(file);
    if !path.is_file() {
        return Err(Error::manifest_not_found(file, dir.as_str()));
    }
    let content = fs::read_to_string(&path)?;
    Ok((path, content))
}

/// Inter-repository dependency set (`dependencies.json`)
#[derive(Debug, Clone)]
pub struct DependencyManifest {
    entries: Map<String, Value>,
}

impl DependencyManifest {
    /// Load the manifest named `file` from `dir`
    pub fn load(dir: &Utf8Path, file: &str) -> Result<Self> {
        let (_, content) = read_manifest(dir, file)?;
        Self::parse(file, &content)
    }

    /// Parse manifest text; `file` is only used in error messages
    pub fn parse(file: &str, content: &str) -> Result<Self> {
        Ok(Self {
            entries: parse_object(file, content)?,
        })
    }

    /// Names of entries tracking `branch`, in file order.
    ///
    /// Entries that are not objects or have no string `branch` are skipped.
    pub fn tracking<'a>(&'a self, branch: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().filter_map(move |(name, value)| {
            let tracked = value.as_object()?.get("branch")?.as_str()?;
            (tracked == branch).then_some(name.as_str())
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Package metadata (`package.json`)
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: Utf8PathBuf,
    root: Map<String, Value>,
}

impl PackageManifest {
    /// Load the manifest named `file` from `dir`
    pub fn load(dir: &Utf8Path, file: &str) -> Result<Self> {
        let (path, content) = read_manifest(dir, file)?;
        Ok(Self {
            root: parse_object(file, &content)?,
            path,
        })
    }

    /// Location the manifest was read from
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Current `scripts.build` entry
    pub fn build_script(&self) -> Option<&str> {
        self.root.get("scripts")?.get("build")?.as_str()
    }

    /// Insert `scripts.build = default` if missing, `null` or empty.
    ///
    /// Returns `true` when the manifest was changed. Nothing is written to
    /// disk; call [`PackageManifest::save`] afterwards.
    pub fn ensure_build_script(&mut self, default: &str) -> Result<bool> {
        let file = self.file_name();
        let scripts = self
            .root
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));

        let scripts = match scripts {
            Value::Object(scripts) => scripts,
            _ => return Err(Error::invalid_manifest(file, "'scripts' must be an object")),
        };

        match scripts.get("build") {
            None | Some(Value::Null) => {}
            Some(Value::String(existing)) if existing.is_empty() => {}
            Some(Value::String(_)) => return Ok(false),
            Some(_) => {
                return Err(Error::invalid_manifest(
                    file,
                    "'scripts.build' must be a string",
                ))
            }
        }

        scripts.insert("build".to_string(), Value::String(default.to_string()));
        Ok(true)
    }

    /// Write the manifest back with two-space indentation
    pub fn save(&self) -> Result<()> {
        let mut content = serde_json::to_string_pretty(&self.root)?;
        content.push('\n');
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn file_name(&self) -> String {
        self.path.file_name().unwrap_or(self.path.as_str()).to_string()
    }
}
