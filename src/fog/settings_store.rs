use crate::fog::settings::FogSettings;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

pub const FOG_SETTINGS_FILE_NAME: &str = "fog_settings.json";

pub fn settings_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(FOG_SETTINGS_FILE_NAME))
}

pub fn resolve_settings_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    settings_path_from_exe_path(&exe_path)
}

pub fn load() -> Result<FogSettings> {
    let path = resolve_settings_path()?;
    load_from_path(&path)
}

/// Writes the sanitized settings beside the executable, creating the file
/// with every default spelled out when it did not exist yet.
pub fn save(settings: &FogSettings) -> Result<PathBuf> {
    let path = resolve_settings_path()?;
    save_to_path(&path, settings)?;
    tracing::info!(path = %path.display(), "fog settings written");
    Ok(path)
}

pub fn load_from_path(path: &Path) -> Result<FogSettings> {
    if !path.exists() {
        return Ok(FogSettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read fog settings file {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(FogSettings::default());
    }

    let mut loaded: FogSettings = serde_json::from_str(&content)
        .with_context(|| format!("deserialize fog settings file {}", path.display()))?;
    loaded.sanitize();
    Ok(loaded)
}

pub fn save_to_path(path: &Path, settings: &FogSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create fog settings parent folder {}", parent.display()))?;
    }

    let mut sanitized = settings.clone();
    sanitized.sanitize();
    let json = serde_json::to_string_pretty(&sanitized).context("serialize fog settings")?;
    std::fs::write(path, json)
        .with_context(|| format!("write fog settings file {}", path.display()))
}
