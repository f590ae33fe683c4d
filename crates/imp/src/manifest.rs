use std::fs;
use std::path::{Path, PathBuf};

use imp_options::{Cast, OptionBuilder, OptionDef, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

pub const DEFAULT_MANIFEST_NAME: &str = "imp.json";

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum BootError {
    #[error("Couldn't load app at {0}")]
    NotFound(String),

    #[error("failed to read manifest: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest JSON: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("command '{command}' inherits from '{parent}', which is not declared before it")]
    UnknownParent { command: String, parent: String },
}

/// Contents of an `imp.json` application manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Entries merged into the application config at boot.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub config: IndexMap<String, JsonValue>,

    #[serde(default)]
    pub commands: Vec<CommandManifest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandManifest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Name of an earlier command whose options and actions are inherited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionManifest>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,

    /// Extra paths routed to this command, on top of its own name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteManifest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionManifest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    /// Suppress the derived short form.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_short: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Cast>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl OptionManifest {
    pub fn to_builder(&self) -> OptionBuilder {
        let mut builder = OptionDef::define(self.name.clone()).required(self.required);
        if let Some(long) = &self.long {
            builder = builder.long(long.clone());
        }
        if self.no_short {
            builder = builder.no_short();
        } else if let Some(short) = &self.short {
            builder = builder.short(short.clone());
        }
        if let Some(description) = &self.description {
            builder = builder.description(description.clone());
        }
        if let Some(default) = &self.default {
            builder = builder.default(default.clone());
        }
        if let Some(cast) = self.cast {
            builder = builder.cast(cast);
        }
        builder
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteManifest {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Manifest {
    /// A minimal manifest with one `hello` command.
    pub fn starter(name: impl Into<String>) -> Self {
        Self {
            schema_version: Some(SCHEMA_VERSION),
            name: Some(name.into()),
            config: IndexMap::new(),
            commands: vec![CommandManifest {
                name: "hello".to_string(),
                summary: Some("Say hello".to_string()),
                options: vec![OptionManifest {
                    name: "loud".to_string(),
                    default: Some(Value::Bool(false)),
                    description: Some("Shout the greeting".to_string()),
                    ..Default::default()
                }],
                actions: vec!["default".to_string()],
                ..Default::default()
            }],
        }
    }
}

/// A parsed manifest together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub manifest_path: PathBuf,
    pub root_path: PathBuf,
    pub manifest: Manifest,
}

/// Find the manifest for an application at `path`.
///
/// Accepts the manifest file itself, the manifest path without its `.json`
/// suffix, or a directory holding `imp.json`.
pub fn locate_manifest(path: &Path) -> Result<PathBuf, BootError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    let mut with_suffix = path.as_os_str().to_owned();
    with_suffix.push(".json");
    let with_suffix = PathBuf::from(with_suffix);
    if with_suffix.is_file() {
        return Ok(with_suffix);
    }

    let in_dir = path.join(DEFAULT_MANIFEST_NAME);
    if path.is_dir() && in_dir.is_file() {
        return Ok(in_dir);
    }

    Err(BootError::NotFound(path.display().to_string()))
}

/// Locate, read and parse the manifest for the application at `path`.
///
/// The root path is the manifest's directory unless the manifest's config
/// sets `root_path`, which is then taken relative to that directory.
pub fn load_manifest(path: &Path) -> Result<LoadedManifest, BootError> {
    let manifest_path = locate_manifest(path)?;
    let contents = fs::read_to_string(&manifest_path).map_err(|source| BootError::Read {
        path: manifest_path.clone(),
        source,
    })?;
    let manifest: Manifest = serde_json::from_str(&contents).map_err(|source| BootError::Parse {
        path: manifest_path.clone(),
        source,
    })?;

    let base_dir = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let root_path = match manifest
        .config
        .get(crate::config::ROOT_PATH)
        .and_then(JsonValue::as_str)
    {
        Some(root) => base_dir.join(root),
        None => base_dir,
    };

    tracing::debug!(
        manifest = %manifest_path.display(),
        root = %root_path.display(),
        commands = manifest.commands.len(),
        "loaded manifest"
    );

    Ok(LoadedManifest {
        manifest_path,
        root_path,
        manifest,
    })
}
