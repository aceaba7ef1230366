use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cursor::Mode;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub mode: Option<Mode>,
    pub verbose: bool,
    pub quiet: bool,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            mode: other.mode.or(self.mode),
            verbose: self.verbose || other.verbose,
            quiet: self.quiet || other.quiet,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("linecursor").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("linecursor")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("linecursor").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("linecursor")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".linecursorrc")
}

/// Load flags from a config file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, creating its directory if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# linecursor defaults (saved with --save)".to_string()];
    if let Some(mode) = flags.mode {
        lines.push(format!("--mode {}", mode.as_str()));
    }
    if flags.verbose {
        lines.push("--verbose".to_string());
    }
    if flags.quiet {
        lines.push("--quiet".to_string());
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a saved config file if present.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of raw arguments or config-file tokens.
///
/// Unknown tokens (the program name, input paths, `--save`) are ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--verbose" | "-v" => flags.verbose = true,
            "--quiet" | "-q" => flags.quiet = true,
            "--mode" => {
                if let Some(next) = tokens.get(i + 1) {
                    flags.mode = parse_mode(next);
                    i += 1;
                }
            }
            _ => {
                if let Some(value) = token.strip_prefix("--mode=") {
                    flags.mode = parse_mode(value);
                }
            }
        }
        i += 1;
    }
    flags
}

fn parse_mode(s: &str) -> Option<Mode> {
    match s {
        "lax" => Some(Mode::Lax),
        "strict" => Some(Mode::Strict),
        _ => None,
    }
}
