// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::encoder::{check_width, FeatureEncoder};
use super::{argmax, finite};
use controller::{Classifier, FeatureRecord, PredictionError, Regressor};
use serde::Deserialize;

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearRegressor {
    encoder: FeatureEncoder,
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearRegressor {
    pub fn new(encoder: FeatureEncoder, intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            encoder,
            intercept,
            coefficients,
        }
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError> {
        let x = self.encoder.encode(record)?;
        check_width(self.coefficients.len(), x.len())?;

        finite(self.intercept + dot(&self.coefficients, &x))
    }
}

/// Multinomial (or binary, with a single coefficient row) logistic regression
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogisticClassifier {
    encoder: FeatureEncoder,
    classes: Vec<String>,
    intercepts: Vec<f64>,
    coefficients: Vec<Vec<f64>>,
}

impl LogisticClassifier {
    pub fn new(
        encoder: FeatureEncoder,
        classes: Vec<String>,
        intercepts: Vec<f64>,
        coefficients: Vec<Vec<f64>>,
    ) -> Self {
        Self {
            encoder,
            classes,
            intercepts,
            coefficients,
        }
    }

    fn margins(&self, x: &[f64]) -> Result<Vec<f64>, PredictionError> {
        if self.coefficients.len() != self.intercepts.len() {
            return Err(PredictionError::MalformedModel(format!(
                "{} coefficient rows for {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }

        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                check_width(row.len(), x.len())?;
                finite(intercept + dot(row, x))
            })
            .collect()
    }
}

impl Classifier for LogisticClassifier {
    fn predict(&self, record: &FeatureRecord) -> Result<String, PredictionError> {
        let x = self.encoder.encode(record)?;
        let margins = self.margins(&x)?;

        let class = match (self.classes.len(), margins.len()) {
            (2, 1) => {
                if margins[0] > 0.0 {
                    1
                } else {
                    0
                }
            }
            (n, m) if n == m && n > 0 => argmax(&margins),
            (n, m) => {
                return Err(PredictionError::MalformedModel(format!(
                    "{} classes for {} coefficient rows",
                    n, m
                )))
            }
        };

        Ok(self.classes[class].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::super::encoder::{Column, HandleUnknown};
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use controller::Feature;

    fn record(continent: &str, month: i32) -> FeatureRecord {
        FeatureRecord {
            continent: continent.into(),
            visit_year: 2019,
            visit_month: month,
            ..Default::default()
        }
    }

    fn encoder() -> FeatureEncoder {
        FeatureEncoder::new(vec![
            Column::categorical(Feature::Continent, &["Asia", "Europe"], HandleUnknown::Error),
            Column::numeric(Feature::VisitMonth),
        ])
    }

    #[test]
    fn linear_prediction() {
        let model = LinearRegressor::new(encoder(), 3.0, vec![0.5, 1.0, 0.1]);

        assert_approx_eq!(model.predict(&record("Europe", 6)).unwrap(), 4.6);
        assert_approx_eq!(model.predict(&record("Asia", 1)).unwrap(), 3.6);
    }

    #[test]
    fn linear_shape_mismatch() {
        let model = LinearRegressor::new(encoder(), 3.0, vec![0.5, 1.0]);

        assert_eq!(
            model.predict(&record("Europe", 6)),
            Err(PredictionError::ShapeMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn multinomial_picks_largest_margin() {
        let model = LogisticClassifier::new(
            encoder(),
            vec!["Business".into(), "Family".into(), "Solo".into()],
            vec![0.0, 0.0, 0.0],
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.2],
            ],
        );

        assert_eq!(model.predict(&record("Asia", 1)).unwrap(), "Business");
        assert_eq!(model.predict(&record("Europe", 1)).unwrap(), "Family");
        assert_eq!(model.predict(&record("Europe", 12)).unwrap(), "Solo");
    }

    #[test]
    fn binary_uses_margin_sign() {
        let model = LogisticClassifier::new(
            encoder(),
            vec!["Couples".into(), "Friends".into()],
            vec![-0.6],
            vec![vec![0.0, 0.0, 0.1]],
        );

        assert_eq!(model.predict(&record("Asia", 3)).unwrap(), "Couples");
        assert_eq!(model.predict(&record("Asia", 9)).unwrap(), "Friends");
    }

    #[test]
    fn unknown_category_propagates() {
        let model = LinearRegressor::new(encoder(), 3.0, vec![0.5, 1.0, 0.1]);

        assert!(matches!(
            model.predict(&record("Antarctica", 6)),
            Err(PredictionError::UnknownCategory { .. })
        ));
    }
}
