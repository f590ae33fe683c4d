use anyhow::{Context, Result, bail};
use imp::Manifest;
use imp::manifest::DEFAULT_MANIFEST_NAME;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a starter `imp.json` into `project_dir`, creating the directory.
pub fn write_starter_manifest(project_dir: &Path, name: Option<String>) -> Result<PathBuf> {
    fs::create_dir_all(project_dir)
        .with_context(|| format!("failed to create directory: {}", project_dir.display()))?;

    let dest = project_dir.join(DEFAULT_MANIFEST_NAME);
    if dest.exists() {
        bail!("{DEFAULT_MANIFEST_NAME} already exists in {}", project_dir.display());
    }

    let name = name
        .or_else(|| guess_project_name(project_dir))
        .unwrap_or_else(|| "my-app".to_string());
    let manifest = Manifest::starter(name);

    let mut out = serde_json::to_string_pretty(&manifest).context("failed to serialize manifest")?;
    out.push('\n');

    let tmp = dest.with_extension("tmp");
    fs::write(&tmp, out.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, &dest)
        .with_context(|| format!("failed to move {} into place", dest.display()))?;
    Ok(dest)
}

fn guess_project_name(project_dir: &Path) -> Option<String> {
    let usable = |s: &&str| !s.is_empty() && *s != "." && *s != "..";

    if let Some(name) = project_dir
        .file_name()
        .and_then(|s| s.to_str())
        .filter(usable)
    {
        return Some(name.to_string());
    }

    let cwd = std::env::current_dir().ok()?;
    cwd.file_name()
        .and_then(|s| s.to_str())
        .filter(usable)
        .map(|s| s.to_string())
}
