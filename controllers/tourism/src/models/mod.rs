// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod boosted;
pub mod encoder;
pub mod linear;

use anyhow::Error;
use boosted::{BoostedClassifier, BoostedRegressor};
use controller::{Classifier, FeatureRecord, ModelChoice, PredictionError, Regressor};
use linear::{LinearRegressor, LogisticClassifier};
use serde::Deserialize;
use std::path::Path;

pub(crate) fn finite(value: f64) -> Result<f64, PredictionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PredictionError::NonFiniteOutput)
    }
}

/// Index of the largest value, the first one wins on ties
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = i;
        }
    }

    best
}

/// Serialized regressor, tagged by `"model"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum RegressorArtifact {
    Linear(LinearRegressor),
    GradientBoosted(BoostedRegressor),
}

impl Regressor for RegressorArtifact {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError> {
        match self {
            Self::Linear(model) => model.predict(record),
            Self::GradientBoosted(model) => model.predict(record),
        }
    }
}

/// Serialized classifier, tagged by `"model"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    Logistic(LogisticClassifier),
    GradientBoosted(BoostedClassifier),
}

impl Classifier for ClassifierArtifact {
    fn predict(&self, record: &FeatureRecord) -> Result<String, PredictionError> {
        match self {
            Self::Logistic(model) => model.predict(record),
            Self::GradientBoosted(model) => model.predict(record),
        }
    }
}

pub fn load_regressor(path: impl AsRef<Path>) -> Result<RegressorArtifact, Error> {
    let file = std::fs::File::open(path)?;
    let model = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(model)
}

pub fn load_classifier(path: impl AsRef<Path>) -> Result<ClassifierArtifact, Error> {
    let file = std::fs::File::open(path)?;
    let model = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(model)
}

/// The two regressors and two classifiers a controller dispatches to
pub struct Models {
    pub linear_regressor: Box<dyn Regressor>,
    pub boosted_regressor: Box<dyn Regressor>,
    pub logistic_classifier: Box<dyn Classifier>,
    pub boosted_classifier: Box<dyn Classifier>,
}

impl Models {
    pub fn regressor(&self, choice: ModelChoice) -> &dyn Regressor {
        match choice {
            ModelChoice::Linear => self.linear_regressor.as_ref(),
            ModelChoice::GradientBoosted => self.boosted_regressor.as_ref(),
        }
    }

    pub fn classifier(&self, choice: ModelChoice) -> &dyn Classifier {
        match choice {
            ModelChoice::Linear => self.logistic_classifier.as_ref(),
            ModelChoice::GradientBoosted => self.boosted_classifier.as_ref(),
        }
    }
}
