use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use getcomments::Lookback;

use crate::output::OutputFormat;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub default: Option<Profile>,
    pub profiles: Option<HashMap<String, Profile>>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Profile {
    pub func_lookback: Option<Lookback>,
    pub decl_lookback: Option<Lookback>,
    pub literal_name: Option<String>,
    pub format: Option<OutputFormat>,
}

impl Profile {
    /// Merge another profile into this one (other takes priority for set fields).
    pub fn merge(&mut self, other: &Profile) {
        if other.func_lookback.is_some() {
            self.func_lookback = other.func_lookback;
        }
        if other.decl_lookback.is_some() {
            self.decl_lookback = other.decl_lookback;
        }
        if other.literal_name.is_some() {
            self.literal_name = other.literal_name.clone();
        }
        if other.format.is_some() {
            self.format = other.format;
        }
    }

    fn apply(&mut self, cfg: &ConfigFile, profile_name: &str) {
        if let Some(default) = &cfg.default {
            self.merge(default);
        }
        if profile_name != "default" {
            if let Some(named) = cfg.profiles.as_ref().and_then(|p| p.get(profile_name)) {
                self.merge(named);
            }
        }
    }
}

/// Walk up from the current directory looking for `.getcomments/config.toml`.
pub fn find_project_config() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(".getcomments").join("config.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Global config path: `~/.config/getcomments/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("getcomments").join("config.toml"))
}

fn load_file(path: &Path) -> Result<Option<ConfigFile>, String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Ok(None);
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| format!("invalid config {}: {e}", path.display()))
}

/// Resolve a profile from `paths` in increasing priority order.
pub fn load_from(paths: &[PathBuf], profile_name: &str) -> Result<Profile, String> {
    let mut result = Profile::default();
    for path in paths {
        if let Some(cfg) = load_file(path)? {
            tracing::debug!(path = %path.display(), profile = profile_name, "loaded config");
            result.apply(&cfg, profile_name);
        }
    }
    Ok(result)
}

/// Resolve a profile by name, merging global defaults → project defaults → named profile.
pub fn load_config(profile_name: &str) -> Result<Profile, String> {
    let paths: Vec<PathBuf> = global_config_path()
        .into_iter()
        .chain(find_project_config())
        .collect();
    load_from(&paths, profile_name)
}
