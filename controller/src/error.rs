// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::record::Feature;
use crate::{AttractionId, UserId};
use std::fmt::Display;
use std::path::Path;
use thiserror::Error as DError;

#[derive(Debug, Clone, PartialEq, DError)]
pub enum ErrorKind {
    #[error("Couldn't found user with id({0})")]
    UserNotFound(UserId),

    #[error("Couldn't found attraction with id({0})")]
    AttractionNotFound(AttractionId),

    #[error("User id must be a positive integer, got {0}")]
    InvalidUserId(UserId),

    #[error("Position {0} is outside of the similarity matrix")]
    PositionOutOfBounds(usize),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl ErrorKind {
    /// True for unknown users and unknown attractions
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::AttractionNotFound(_))
    }
}

/// A predictor couldn't process a feature record
#[derive(Debug, Clone, PartialEq, DError)]
pub enum PredictionError {
    #[error("Unknown category '{value}' for feature {feature}")]
    UnknownCategory { feature: Feature, value: String },

    #[error("Feature {feature} expects a number, got '{value}'")]
    NotNumeric { feature: Feature, value: String },

    #[error("Model expects {expected} encoded features, got {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("Malformed model ({0})")]
    MalformedModel(String),

    #[error("Model produced a non finite value")]
    NonFiniteOutput,
}

/// An artifact couldn't be loaded or is inconsistent with the others
#[derive(Debug, Clone, PartialEq, DError)]
#[error("Failed to load artifact '{artifact}': {reason}")]
pub struct ConfigurationError {
    pub artifact: String,
    pub reason: String,
}

impl ConfigurationError {
    pub fn new(artifact: impl AsRef<Path>, reason: impl Display) -> Self {
        Self {
            artifact: artifact.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Invalid user input while building a record from a form or a command
#[derive(Debug, Clone, PartialEq, DError)]
pub enum ValueError {
    #[error("Failed to cast to some value ({0})")]
    ValueConvert(String),

    #[error("Couldn't cast value to {0}")]
    CastingValue(&'static str),

    #[error("Field '{0}' is required")]
    MissingField(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
}
