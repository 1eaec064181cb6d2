//! Persisted CLI flag defaults.
//!
//! Defaults live in a `.scrawlrc` flag file: one CLI token per
//! whitespace-separated entry, `#` comments allowed. A global file under
//! the platform config directory is merged with a local `.scrawlrc`
//! override, and CLI flags win over both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub emit_text: bool,
    pub verbose: bool,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            emit_text: self.emit_text || other.emit_text,
            verbose: self.verbose || other.verbose,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("scrawl").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("scrawl")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("scrawl").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("scrawl").join("config");
        }
    }

    PathBuf::from(".scrawlrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".scrawlrc")
}

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

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# scrawl defaults (saved with --save)".to_string());
    if let Some(width) = flags.width {
        lines.push(format!("--width {width}"));
    }
    if let Some(height) = flags.height {
        lines.push(format!("--height {height}"));
    }
    if flags.emit_text {
        lines.push("--emit-text".to_string());
    }
    if flags.verbose {
        lines.push("--verbose".to_string());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--emit-text" {
            flags.emit_text = true;
        } else if token == "--verbose" {
            flags.verbose = true;
        } else if token == "--width" {
            if let Some(next) = tokens.get(i + 1) {
                flags.width = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--width=") {
            flags.width = value.parse().ok();
        } else if token == "--height" {
            if let Some(next) = tokens.get(i + 1) {
                flags.height = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--height=") {
            flags.height = value.parse().ok();
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "scrawl".to_string(),
            "--width".to_string(),
            "800".to_string(),
            "--height=600".to_string(),
            "--emit-text".to_string(),
            "diagram.md".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.width, Some(800));
        assert_eq!(flags.height, Some(600));
        assert!(flags.emit_text);
        assert!(!flags.verbose);
    }

    #[test]
    fn test_parse_ignores_malformed_dimension() {
        let args = vec!["--width".to_string(), "huge".to_string()];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.width, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            width: Some(500),
            emit_text: true,
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            width: Some(1000),
            verbose: true,
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert_eq!(merged.width, Some(1000), "cli should override width");
        assert!(merged.emit_text, "file flags should remain enabled");
        assert!(merged.verbose);
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".scrawlrc");
        let flags = ConfigFlags {
            width: Some(640),
            height: Some(480),
            emit_text: true,
            verbose: true,
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }
}
