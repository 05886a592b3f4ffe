// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::encoder::FeatureEncoder;
use super::{argmax, finite};
use controller::{Classifier, FeatureRecord, PredictionError, Regressor};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

/// A regression tree stored as a node array, node 0 is the root
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Samples go left when `x[feature] < threshold`
    pub fn evaluate(&self, x: &[f64]) -> Result<f64, PredictionError> {
        let mut current = 0;

        // A well formed tree reaches a leaf in fewer steps than it has nodes
        for _ in 0..self.nodes.len() {
            match self.nodes.get(current) {
                Some(Node::Leaf(value)) => return Ok(*value),

                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = x.get(*feature).ok_or(PredictionError::ShapeMismatch {
                        expected: feature + 1,
                        found: x.len(),
                    })?;

                    current = if value < threshold { *left } else { *right };
                }

                None => {
                    return Err(PredictionError::MalformedModel(format!(
                        "node {} doesn't exist",
                        current
                    )))
                }
            }
        }

        Err(PredictionError::MalformedModel("tree never reaches a leaf".into()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoostedRegressor {
    encoder: FeatureEncoder,
    #[serde(default)]
    base_score: f64,
    trees: Vec<Tree>,
}

impl BoostedRegressor {
    pub fn new(encoder: FeatureEncoder, base_score: f64, trees: Vec<Tree>) -> Self {
        Self {
            encoder,
            base_score,
            trees,
        }
    }
}

impl Regressor for BoostedRegressor {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError> {
        let x = self.encoder.encode(record)?;

        let mut prediction = self.base_score;
        for tree in &self.trees {
            prediction += tree.evaluate(&x)?;
        }

        finite(prediction)
    }
}

/// Tree `i` adds to the margin of class `i % classes`, two classes share one margin
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoostedClassifier {
    encoder: FeatureEncoder,
    classes: Vec<String>,
    #[serde(default)]
    base_score: f64,
    trees: Vec<Tree>,
}

impl BoostedClassifier {
    pub fn new(
        encoder: FeatureEncoder,
        classes: Vec<String>,
        base_score: f64,
        trees: Vec<Tree>,
    ) -> Self {
        Self {
            encoder,
            classes,
            base_score,
            trees,
        }
    }
}

impl Classifier for BoostedClassifier {
    fn predict(&self, record: &FeatureRecord) -> Result<String, PredictionError> {
        let groups = match self.classes.len() {
            0 | 1 => {
                return Err(PredictionError::MalformedModel(format!(
                    "{} classes",
                    self.classes.len()
                )))
            }
            2 => 1,
            n => n,
        };

        let x = self.encoder.encode(record)?;

        let mut margins = vec![self.base_score; groups];
        for (i, tree) in self.trees.iter().enumerate() {
            margins[i % groups] += tree.evaluate(&x)?;
        }

        for &margin in &margins {
            finite(margin)?;
        }

        let class = if groups == 1 {
            if margins[0] > 0.0 {
                1
            } else {
                0
            }
        } else {
            argmax(&margins)
        };

        Ok(self.classes[class].clone())
    }
}
