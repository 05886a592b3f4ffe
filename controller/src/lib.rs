// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod artifacts;
pub mod entity;
pub mod error;
pub mod predictor;
pub mod record;
pub mod values;

use std::collections::HashMap;

pub use artifacts::{Attraction, ContentTable, SimilarityMatrix};
pub use entity::{recommendations_table, Entity, ToTable};
pub use error::{ConfigurationError, ErrorKind, PredictionError, ValueError};
pub use predictor::{Classifier, ModelChoice, Regressor};
pub use record::{Feature, FeatureRecord, FeatureValue};
pub use values::{Field, Type, Value};

pub type UserId = i64;
pub type AttractionId = i64;

pub type Result<T> = std::result::Result<T, ErrorKind>;
pub type Ratings<I = AttractionId, Value = f64> = HashMap<I, Value>;
pub type MapedRatings<K = UserId, I = AttractionId, Value = f64> = HashMap<K, Ratings<I, Value>>;
/// Maps an attraction id to its similarity matrix position
pub type Indices = HashMap<AttractionId, usize>;

/// A ranked attraction, `score` is a predicted rating or a similarity
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub attraction_id: AttractionId,
    pub attraction: Option<String>,
    pub score: f64,
}

/// Read-only access to the loaded artifacts
pub trait Controller {
    /// Predicted ratings of a user, keyed by attraction
    fn user_ratings(&self, user_id: UserId) -> Result<&Ratings>;

    /// Similarity matrix position of an attraction
    fn position_of(&self, attraction_id: AttractionId) -> Result<usize>;

    /// Similarity scores between the attraction at `position` and every position
    fn similarity_row(&self, position: usize) -> Result<&[f64]>;

    /// Content table row at a similarity matrix position
    fn attraction_at(&self, position: usize) -> Result<&Attraction>;

    /// Content table row by attraction id
    fn attraction(&self, attraction_id: AttractionId) -> Result<&Attraction>;

    fn regressor(&self, choice: ModelChoice) -> &dyn Regressor;

    fn classifier(&self, choice: ModelChoice) -> &dyn Classifier;
}
