use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub trim: TrimConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrimConfig {
    /// Base directory for working directories (system temp dir when unset)
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Keep `<stem>.orig.<ext>` when the input is replaced
    #[serde(default = "default_true")]
    pub keep_backup: bool,

    /// Remove intermediate files after a run
    #[serde(default = "default_true")]
    pub cleanup: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            keep_backup: default_true(),
            cleanup: default_true(),
        }
    }
}
