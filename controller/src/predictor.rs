// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::PredictionError;
use crate::record::FeatureRecord;
use std::fmt::{self, Display};
use std::str::FromStr;

/// A trained model that predicts an attraction rating
pub trait Regressor: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError>;
}

/// A trained model that predicts a visit mode label
pub trait Classifier: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> Result<String, PredictionError>;
}

/// Which of the two interchangeable models of a task answers a query
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ModelChoice {
    Linear,
    GradientBoosted,
}

impl FromStr for ModelChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" | "linear_regression" | "logistic" | "logistic_regression" => Ok(Self::Linear),
            "xgboost" | "xgb" | "boosted" | "gradient_boosted" => Ok(Self::GradientBoosted),
            other => Err(format!("Unknown model '{}'", other)),
        }
    }
}

impl Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelChoice::Linear => write!(f, "linear"),
            ModelChoice::GradientBoosted => write!(f, "gradient boosted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_model_choices() {
        assert_eq!("linear".parse(), Ok(ModelChoice::Linear));
        assert_eq!("logistic_regression".parse(), Ok(ModelChoice::Linear));
        assert_eq!("xgboost".parse(), Ok(ModelChoice::GradientBoosted));
        assert_eq!("xgb".parse(), Ok(ModelChoice::GradientBoosted));
        assert!("random_forest".parse::<ModelChoice>().is_err());
    }
}
