// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where every pre-trained artifact lives, file names are relative to `dir`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub dir: PathBuf,
    pub predicted_ratings: PathBuf,
    pub similarity: PathBuf,
    pub content: PathBuf,
    /// When missing the index map is derived from the content table order
    pub indices: Option<PathBuf>,
    pub linear_regression: PathBuf,
    pub boosted_regression: PathBuf,
    pub logistic_classification: PathBuf,
    pub boosted_classification: PathBuf,
}

impl ArtifactsConfig {
    pub fn path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.dir.join(file)
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: "models".into(),
            predicted_ratings: "predicted_ratings.csv".into(),
            similarity: "cosine_sim.csv".into(),
            content: "content.csv".into(),
            indices: None,
            linear_regression: "linear_regression.json".into(),
            boosted_regression: "xgboost_regression.json".into(),
            logistic_classification: "logistic_regression.json".into(),
            boosted_classification: "xgboost_classification.json".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub default_top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { default_top_n: 5 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub artifacts: ArtifactsConfig,
    pub engine: EngineConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        let parsed: Self = toml::from_str(contents)?;
        Ok(parsed)
    }
}
