// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::storage::{Storage, TaskStorage};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pocketbook", "pocketbook"));

pub const DATA_DIR_ENV: &str = "POCKETBOOK_HOME";
pub const LEDGER_FILE: &str = "wallet.json";
pub const TASKS_FILE: &str = "tasks.json";

/// Where the data files live.
#[derive(Debug, Clone)]
pub struct Config {
    data_dir: PathBuf,
}

impl Config {
    /// Uses `data_dir` when given (from `--data-dir` or `POCKETBOOK_HOME`),
    /// else the platform data directory. The directory is created if needed.
    pub fn resolve(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(p) => p.to_path_buf(),
            None => default_data_dir()?,
        };
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(LEDGER_FILE)
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE)
    }

    pub fn storage(&self) -> Storage {
        Storage::new(self.ledger_path())
    }

    pub fn task_storage(&self) -> TaskStorage {
        TaskStorage::new(self.tasks_path())
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}
