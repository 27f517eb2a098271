//! 走査設定（TOML）
//!
//! ```toml
//! extensions = ["kif", "kifu"]
//! max_cache_ply = 30
//! stop_on_error = false
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// `scan` サブコマンドの設定
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// 対象とする拡張子（大文字小文字は区別しない）
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// 序盤局面として数える手数の上限（評価値キャッシュの対象範囲と同じ）
    #[serde(default = "default_max_cache_ply")]
    pub max_cache_ply: usize,
    /// 読めない棋譜があったら中断する
    #[serde(default)]
    pub stop_on_error: bool,
}

fn default_extensions() -> Vec<String> {
    vec!["kif".to_string()]
}

fn default_max_cache_ply() -> usize {
    rkifu_kif::ScoreCache::DEFAULT_MAX_PLY
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            max_cache_ply: default_max_cache_ply(),
            stop_on_error: false,
        }
    }
}

impl ScanConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ScanConfig = toml::from_str(text).context("parse scan config")?;
        if config.extensions.is_empty() {
            anyhow::bail!("scan config: extensions must not be empty");
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scan config: {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }
}
