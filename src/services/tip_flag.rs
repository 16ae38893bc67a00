//! The one persisted flag: whether the keyboard-shortcuts tip was shown.
//!
//! Read once at startup, written once after the first display. A missing or
//! unreadable file just means the tip has not been seen.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct TipFile {
    #[serde(default)]
    seen_shortcuts_tip: bool,
}

#[derive(Debug, Clone)]
pub struct TipFlags {
    path: Option<PathBuf>,
    seen_shortcuts_tip: bool,
}

impl TipFlags {
    /// Load from the given file. `None` disables persistence (used by
    /// `--no-tips` and tests that want a throwaway state).
    pub fn load(path: Option<PathBuf>) -> Self {
        let seen = path
            .as_deref()
            .and_then(|p| fs::read_to_string(p).ok())
            .and_then(|raw| serde_json::from_str::<TipFile>(&raw).ok())
            .map(|file| file.seen_shortcuts_tip)
            .unwrap_or(false);
        Self {
            path,
            seen_shortcuts_tip: seen,
        }
    }

    /// Platform state file, e.g. `~/.local/state/termfolio/tips.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_dir)
            .map(|dir| dir.join("termfolio").join("tips.json"))
    }

    pub fn seen_shortcuts_tip(&self) -> bool {
        self.seen_shortcuts_tip
    }

    /// Persist that the tip was shown. Idempotent.
    pub fn mark_shortcuts_tip_seen(&mut self) -> Result<()> {
        if self.seen_shortcuts_tip {
            return Ok(());
        }
        self.seen_shortcuts_tip = true;
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        self.write(&path)
    }

    fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating state dir {}", parent.display()))?;
        }
        let file = TipFile {
            seen_shortcuts_tip: self.seen_shortcuts_tip,
        };
        fs::write(path, serde_json::to_string_pretty(&file)?)
            .with_context(|| format!("writing tip state to {}", path.display()))
    }
}
