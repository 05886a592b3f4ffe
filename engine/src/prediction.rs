// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use std::fmt::{self, Display};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Task {
    Rating,
    VisitMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Rating(f64),
    VisitMode(String),
}

impl Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Rating(rating) => write!(f, "Predicted Rating: {:.2}", rating),
            Prediction::VisitMode(mode) => write!(f, "Predicted Visit Mode: {}", mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_rounds_to_two_decimals() {
        assert_eq!(
            Prediction::Rating(4.3729).to_string(),
            "Predicted Rating: 4.37"
        );
        assert_eq!(
            Prediction::VisitMode("Family".into()).to_string(),
            "Predicted Visit Mode: Family"
        );
    }
}
