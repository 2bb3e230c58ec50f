/// Config file loading and creation for the pairrank CLI.
///
/// Config lives at $XDG_CONFIG_HOME/pairrank/config.toml, or
/// ~/.config/pairrank/config.toml when XDG_CONFIG_HOME is unset.
/// All fields are optional; CLI args override config values.
///
/// Paths in the file may be absolute, start with `~/`, or be relative to the
/// directory holding the config file.
use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PairrankConfig {
    /// Default items file.
    pub items: Option<PathBuf>,
    /// Default JSON Lines vote snapshot.
    pub save_votes: Option<PathBuf>,
    /// Print the final ranking as JSON.
    pub json: Option<bool>,
}

impl PairrankConfig {
    fn resolve_paths(self, base_dir: &Path, home: Option<&Path>) -> Self {
        let resolve = |path: PathBuf| resolve_path(path, base_dir, home);
        PairrankConfig {
            items: self.items.map(resolve),
            save_votes: self.save_votes.map(resolve),
            json: self.json,
        }
    }
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# pairrank configuration
# All values here can be overridden by CLI flags.
# Relative paths are resolved against this file's directory; ~/ expands to
# your home directory.

# Items file: JSON array (strings or {id, name, artist, uri} objects)
# or plain text with one song per line.
# items = \"songs.json\"

# Vote snapshot (JSON Lines). A new session refuses to overwrite a snapshot
# that already holds votes; continue it with --resume instead.
# save_votes = \"~/pairrank-votes.jsonl\"

# Print the final ranking as JSON instead of a table.
# json = false
";

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").filter(|h| !h.is_empty()).map(PathBuf::from)
}

fn resolve_path(path: PathBuf, base_dir: &Path, home: Option<&Path>) -> PathBuf {
    if let (Ok(rest), Some(home)) = (path.strip_prefix("~"), home) {
        return home.join(rest);
    }
    if path.is_relative() {
        base_dir.join(path)
    } else {
        path
    }
}

fn default_config_path(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    // XDG says relative values are invalid and must be ignored.
    let base = xdg_config_home
        .filter(|dir| dir.is_absolute())
        .or_else(|| home.map(|h| h.join(".config")))?;
    Some(base.join("pairrank").join("config.toml"))
}

/// Returns the default config path for the current environment.
pub fn config_path() -> Result<PathBuf, String> {
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    default_config_path(xdg, home_dir())
        .ok_or_else(|| "Neither XDG_CONFIG_HOME nor HOME is set; pass --config".to_string())
}

/// Parse config file content, resolving relative paths against `base_dir`.
pub fn parse_config(content: &str, base_dir: &Path) -> Result<PairrankConfig, toml::de::Error> {
    let raw: PairrankConfig = toml::from_str(content)?;
    Ok(raw.resolve_paths(base_dir, home_dir().as_deref()))
}

/// Load config from a file path. Returns default (all None) if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<PairrankConfig, String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
            parse_config(&content, base_dir)
                .map_err(|e| format!("Failed to parse config at {}: {e}", path.display()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(PairrankConfig::default()),
        Err(e) => Err(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Write the commented template to `path`. Errors if it already exists.
pub fn create_default_config(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {e}", parent.display()))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(format!("Config file already exists at {}", path.display()));
        }
        Err(e) => return Err(format!("Failed to create {}: {e}", path.display())),
    };
    file.write_all(DEFAULT_CONFIG_TEMPLATE.as_bytes())
        .map_err(|e| format!("Failed to write config to {}: {e}", path.display()))
}
