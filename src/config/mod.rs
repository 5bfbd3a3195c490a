mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the ffmpeg binary.
pub const FFMPEG_ENV: &str = "TRIMFORGE_FFMPEG";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_paths(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./trimforge.toml",
        "~/.config/trimforge/config.toml",
        "/etc/trimforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

fn expand_paths(config: &mut Config) {
    let expand = |p: &mut Option<PathBuf>| {
        if let Some(path) = p.as_mut() {
            *path = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref());
        }
    };
    expand(&mut config.tools.ffmpeg_path);
    expand(&mut config.trim.workdir);
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if let Some(ref workdir) = config.trim.workdir {
        if !workdir.is_dir() {
            anyhow::bail!("Configured workdir is not a directory: {:?}", workdir);
        }
    }

    if let Some(ref ffmpeg) = config.tools.ffmpeg_path {
        if ffmpeg.as_os_str().is_empty() {
            anyhow::bail!("tools.ffmpeg_path cannot be empty");
        }
    }

    Ok(())
}

impl Config {
    /// Locate ffmpeg: `TRIMFORGE_FFMPEG`, then `tools.ffmpeg_path`, then `PATH`.
    pub fn ffmpeg_path(&self) -> Result<PathBuf> {
        self.ffmpeg_path_with_env(std::env::var_os(FFMPEG_ENV))
    }

    fn ffmpeg_path_with_env(&self, env: Option<OsString>) -> Result<PathBuf> {
        let from_env = env.filter(|v| !v.is_empty()).map(PathBuf::from);
        let configured = from_env.as_deref().or(self.tools.ffmpeg_path.as_deref());
        trimforge_av::get_tool_path(trimforge_av::tools::FFMPEG, configured)
            .context("ffmpeg is required; install it or set tools.ffmpeg_path")
    }
}
