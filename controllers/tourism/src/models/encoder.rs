// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use controller::{Feature, FeatureRecord, FeatureValue, PredictionError};
use serde::Deserialize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    Error,
    Ignore,
}

impl Default for HandleUnknown {
    fn default() -> Self {
        Self::Error
    }
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Column {
    /// One-hot over the known categories
    Categorical {
        feature: Feature,
        categories: Vec<String>,
        #[serde(default)]
        handle_unknown: HandleUnknown,
    },

    /// Standardized as `(x - mean) / scale`
    Numeric {
        feature: Feature,
        #[serde(default)]
        mean: f64,
        #[serde(default = "one")]
        scale: f64,
    },
}

impl Column {
    pub fn categorical(feature: Feature, categories: &[&str], handle_unknown: HandleUnknown) -> Self {
        Self::Categorical {
            feature,
            categories: categories.iter().map(|&c| c.to_owned()).collect(),
            handle_unknown,
        }
    }

    pub fn numeric(feature: Feature) -> Self {
        Self::Numeric {
            feature,
            mean: 0.0,
            scale: 1.0,
        }
    }

    fn width(&self) -> usize {
        match self {
            Self::Categorical { categories, .. } => categories.len(),
            Self::Numeric { .. } => 1,
        }
    }
}

/// Turns a feature record into the dense vector a model was trained on
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureEncoder {
    columns: Vec<Column>,
}

impl FeatureEncoder {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn width(&self) -> usize {
        self.columns.iter().map(Column::width).sum()
    }

    pub fn encode(&self, record: &FeatureRecord) -> Result<Vec<f64>, PredictionError> {
        let mut encoded = Vec::with_capacity(self.width());

        for column in &self.columns {
            match column {
                Column::Categorical {
                    feature,
                    categories,
                    handle_unknown,
                } => {
                    let value = match record.value(*feature) {
                        FeatureValue::Text(text) => text.to_owned(),
                        FeatureValue::Number(number) => number.to_string(),
                    };

                    let hot = categories.iter().position(|category| *category == value);
                    if hot.is_none() && *handle_unknown == HandleUnknown::Error {
                        return Err(PredictionError::UnknownCategory {
                            feature: *feature,
                            value,
                        });
                    }

                    encoded.extend((0..categories.len()).map(|i| {
                        if Some(i) == hot {
                            1.0
                        } else {
                            0.0
                        }
                    }));
                }

                Column::Numeric {
                    feature,
                    mean,
                    scale,
                } => {
                    let value = match record.value(*feature) {
                        FeatureValue::Number(number) => number,
                        FeatureValue::Text(text) => {
                            text.trim()
                                .parse::<f64>()
                                .map_err(|_| PredictionError::NotNumeric {
                                    feature: *feature,
                                    value: text.to_owned(),
                                })?
                        }
                    };

                    let scale = if *scale == 0.0 { 1.0 } else { *scale };
                    encoded.push((value - mean) / scale);
                }
            }
        }

        Ok(encoded)
    }
}

/// Fails when a model's parameters don't cover exactly the encoded features
pub(crate) fn check_width(expected: usize, found: usize) -> Result<(), PredictionError> {
    if expected == found {
        Ok(())
    } else {
        Err(PredictionError::ShapeMismatch { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn record() -> FeatureRecord {
        FeatureRecord {
            continent: "Europe".into(),
            region: "Western Europe".into(),
            country: "France".into(),
            city_name: "Paris".into(),
            visit_year: 2018,
            visit_month: 5,
            attraction_type: "Museums".into(),
        }
    }

    #[test]
    fn one_hot_and_scaled_columns() {
        let encoder = FeatureEncoder::new(vec![
            Column::categorical(
                Feature::Continent,
                &["Asia", "Europe", "America"],
                HandleUnknown::Error,
            ),
            Column::Numeric {
                feature: Feature::VisitYear,
                mean: 2016.0,
                scale: 2.0,
            },
            Column::numeric(Feature::VisitMonth),
        ]);

        assert_eq!(encoder.width(), 5);

        let encoded = encoder.encode(&record()).expect("known categories");
        assert_eq!(&encoded[..3], &[0.0, 1.0, 0.0]);
        assert_approx_eq!(encoded[3], 1.0);
        assert_approx_eq!(encoded[4], 5.0);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let encoder = FeatureEncoder::new(vec![Column::categorical(
            Feature::AttractionType,
            &["Beaches", "Water Parks"],
            HandleUnknown::Error,
        )]);

        assert_eq!(
            encoder.encode(&record()),
            Err(PredictionError::UnknownCategory {
                feature: Feature::AttractionType,
                value: "Museums".into()
            })
        );
    }

    #[test]
    fn unknown_category_is_ignored() {
        let encoder = FeatureEncoder::new(vec![Column::categorical(
            Feature::AttractionType,
            &["Beaches", "Water Parks"],
            HandleUnknown::Ignore,
        )]);

        assert_eq!(encoder.encode(&record()), Ok(vec![0.0, 0.0]));
    }

    #[test]
    fn numbers_as_categories() {
        let encoder = FeatureEncoder::new(vec![Column::categorical(
            Feature::VisitYear,
            &["2017", "2018"],
            HandleUnknown::Error,
        )]);

        assert_eq!(encoder.encode(&record()), Ok(vec![0.0, 1.0]));
    }

    #[test]
    fn text_in_numeric_column() {
        let encoder = FeatureEncoder::new(vec![Column::numeric(Feature::CityName)]);

        assert_eq!(
            encoder.encode(&record()),
            Err(PredictionError::NotNumeric {
                feature: Feature::CityName,
                value: "Paris".into()
            })
        );
    }

    #[test]
    fn deserialize_columns() {
        let json = r#"{
            "columns": [
                {"kind": "categorical", "feature": "Continent", "categories": ["Asia"], "handle_unknown": "ignore"},
                {"kind": "numeric", "feature": "VisitMonth", "mean": 6.5}
            ]
        }"#;

        let encoder: FeatureEncoder = serde_json::from_str(json).expect("valid encoder");
        assert_eq!(
            encoder,
            FeatureEncoder::new(vec![
                Column::categorical(Feature::Continent, &["Asia"], HandleUnknown::Ignore),
                Column::Numeric {
                    feature: Feature::VisitMonth,
                    mean: 6.5,
                    scale: 1.0
                },
            ])
        );
    }
}
