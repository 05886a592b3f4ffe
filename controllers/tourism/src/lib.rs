// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod loader;
pub mod models;

use anyhow::Error;
use config::ArtifactsConfig;
use controller::{
    Attraction, AttractionId, Classifier, ConfigurationError, ContentTable, Controller, ErrorKind,
    Indices, MapedRatings, ModelChoice, Ratings, Regressor, SimilarityMatrix, UserId,
};
use models::Models;
use std::collections::HashSet;
use std::path::Path;

type Result<T> = std::result::Result<T, ErrorKind>;

/// Every artifact the dashboard queries, loaded once and never mutated
pub struct TourismController {
    ratings: MapedRatings,
    similarity: SimilarityMatrix,
    content: ContentTable,
    indices: Indices,
    models: Models,
}

fn load<T>(path: &Path, loader: impl FnOnce(&Path) -> std::result::Result<T, Error>) -> Result<T> {
    log::info!("Loading {}", path.display());
    loader(path).map_err(|e| ConfigurationError::new(path, format!("{:#}", e)).into())
}

impl TourismController {
    pub fn load(config: &ArtifactsConfig) -> Result<Self> {
        let ratings = load(&config.path(&config.predicted_ratings), loader::load_ratings)?;
        let similarity = load(&config.path(&config.similarity), loader::load_similarity)?;
        let content = load(&config.path(&config.content), loader::load_content)?;

        let indices = match &config.indices {
            Some(indices) => load(&config.path(indices), loader::load_indices)?,
            None => {
                log::info!("No index map configured, using content table order");
                content.indices()
            }
        };

        let models = Models {
            linear_regressor: Box::new(load(
                &config.path(&config.linear_regression),
                |path| models::load_regressor(path),
            )?),
            boosted_regressor: Box::new(load(
                &config.path(&config.boosted_regression),
                |path| models::load_regressor(path),
            )?),
            logistic_classifier: Box::new(load(
                &config.path(&config.logistic_classification),
                |path| models::load_classifier(path),
            )?),
            boosted_classifier: Box::new(load(
                &config.path(&config.boosted_classification),
                |path| models::load_classifier(path),
            )?),
        };

        Self::from_parts(ratings, similarity, content, indices, models)
    }

    /// Checks that the similarity matrix, content table and index map agree
    pub fn from_parts(
        ratings: MapedRatings,
        similarity: SimilarityMatrix,
        content: ContentTable,
        indices: Indices,
        models: Models,
    ) -> Result<Self> {
        let inconsistent = |artifact: &str, reason: String| -> ErrorKind {
            ConfigurationError {
                artifact: artifact.into(),
                reason,
            }
            .into()
        };

        if content.len() != similarity.size() {
            return Err(inconsistent(
                "content",
                format!(
                    "{} attractions for a {}x{} similarity matrix",
                    content.len(),
                    similarity.size(),
                    similarity.size()
                ),
            ));
        }

        if indices.len() != content.len() {
            return Err(inconsistent(
                "indices",
                format!(
                    "{} entries for {} attractions",
                    indices.len(),
                    content.len()
                ),
            ));
        }

        let mut seen = HashSet::with_capacity(indices.len());
        for (&id, &position) in &indices {
            match content.at(position) {
                Some(attraction) if attraction.id == id => {}
                Some(attraction) => {
                    return Err(inconsistent(
                        "indices",
                        format!(
                            "attraction {} maps to position {} which holds attraction {}",
                            id, position, attraction.id
                        ),
                    ))
                }
                None => {
                    return Err(inconsistent(
                        "indices",
                        format!("attraction {} maps to missing position {}", id, position),
                    ))
                }
            }

            if !seen.insert(position) {
                return Err(inconsistent(
                    "indices",
                    format!("position {} is used more than once", position),
                ));
            }
        }

        let violations = similarity.diagonal_violations();
        if !violations.is_empty() {
            log::warn!(
                "{} similarity rows score another attraction above themselves, first at position {}",
                violations.len(),
                violations[0]
            );
        }

        log::info!(
            "Loaded {} users, {} attractions",
            ratings.len(),
            content.len()
        );

        Ok(Self {
            ratings,
            similarity,
            content,
            indices,
            models,
        })
    }

    pub fn users_count(&self) -> usize {
        self.ratings.len()
    }

    pub fn attractions_count(&self) -> usize {
        self.content.len()
    }

    pub fn diagonal_violations(&self) -> Vec<usize> {
        self.similarity.diagonal_violations()
    }
}

impl Controller for TourismController {
    fn user_ratings(&self, user_id: UserId) -> Result<&Ratings> {
        self.ratings
            .get(&user_id)
            .ok_or(ErrorKind::UserNotFound(user_id))
    }

    fn position_of(&self, attraction_id: AttractionId) -> Result<usize> {
        self.indices
            .get(&attraction_id)
            .copied()
            .ok_or(ErrorKind::AttractionNotFound(attraction_id))
    }

    fn similarity_row(&self, position: usize) -> Result<&[f64]> {
        self.similarity.row(position)
    }

    fn attraction_at(&self, position: usize) -> Result<&Attraction> {
        self.content
            .at(position)
            .ok_or(ErrorKind::PositionOutOfBounds(position))
    }

    fn attraction(&self, attraction_id: AttractionId) -> Result<&Attraction> {
        self.content
            .by_id(attraction_id)
            .ok_or(ErrorKind::AttractionNotFound(attraction_id))
    }

    fn regressor(&self, choice: ModelChoice) -> &dyn Regressor {
        self.models.regressor(choice)
    }

    fn classifier(&self, choice: ModelChoice) -> &dyn Classifier {
        self.models.classifier(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_macros::hash_map;
    use controller::FeatureRecord;

    fn sample_config() -> ArtifactsConfig {
        ArtifactsConfig {
            dir: "data/sample".into(),
            indices: Some("indices.csv".into()),
            ..Default::default()
        }
    }

    fn parts() -> (MapedRatings, SimilarityMatrix, ContentTable, Models) {
        let config = sample_config();

        let ratings = hash_map! { 1 => hash_map! { 10 => 4.0 } };
        let similarity =
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.4], vec![0.4, 1.0]]).expect("square");
        let content = ContentTable::new(vec![
            Attraction::new(10, "Beach"),
            Attraction::new(20, "Museum"),
        ])
        .expect("unique ids");

        let models = Models {
            linear_regressor: Box::new(
                models::load_regressor(config.path(&config.linear_regression)).expect("model"),
            ),
            boosted_regressor: Box::new(
                models::load_regressor(config.path(&config.boosted_regression)).expect("model"),
            ),
            logistic_classifier: Box::new(
                models::load_classifier(config.path(&config.logistic_classification))
                    .expect("model"),
            ),
            boosted_classifier: Box::new(
                models::load_classifier(config.path(&config.boosted_classification))
                    .expect("model"),
            ),
        };

        (ratings, similarity, content, models)
    }

    #[test]
    fn load_sample_artifacts() -> std::result::Result<(), Error> {
        let controller = TourismController::load(&sample_config())?;

        assert_eq!(controller.users_count(), 4);
        assert_eq!(controller.attractions_count(), 5);
        assert!(controller.diagonal_violations().is_empty());

        assert_eq!(controller.position_of(3)?, 2);
        assert_eq!(controller.attraction_at(2)?.name, "Tanah Lot Temple");
        assert_eq!(controller.user_ratings(42)?.len(), 3);

        Ok(())
    }

    #[test]
    fn derived_indices_match_file() -> std::result::Result<(), Error> {
        let config = ArtifactsConfig {
            indices: None,
            ..sample_config()
        };
        let controller = TourismController::load(&config)?;

        for id in 1..=5 {
            assert_eq!(controller.position_of(id)?, (id - 1) as usize);
        }

        Ok(())
    }

    #[test]
    fn missing_artifact_is_a_configuration_error() {
        let config = ArtifactsConfig {
            content: "missing.csv".into(),
            ..sample_config()
        };

        match TourismController::load(&config) {
            Err(ErrorKind::Configuration(e)) => assert!(e.artifact.ends_with("missing.csv")),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("loaded a missing artifact"),
        }
    }

    #[test]
    fn unknown_ids() -> std::result::Result<(), Error> {
        let controller = TourismController::load(&sample_config())?;

        assert_eq!(
            controller.user_ratings(9999).err(),
            Some(ErrorKind::UserNotFound(9999))
        );
        assert_eq!(
            controller.position_of(9999).err(),
            Some(ErrorKind::AttractionNotFound(9999))
        );
        assert_eq!(
            controller.attraction(9999).err(),
            Some(ErrorKind::AttractionNotFound(9999))
        );

        Ok(())
    }

    #[test]
    fn sample_models_answer() -> std::result::Result<(), Error> {
        let controller = TourismController::load(&sample_config())?;
        let record = FeatureRecord {
            continent: "Asia".into(),
            region: "South East Asia".into(),
            country: "Indonesia".into(),
            city_name: "Ubud".into(),
            visit_year: 2019,
            visit_month: 7,
            attraction_type: "Nature & Wildlife Areas".into(),
        };

        for &choice in &[ModelChoice::Linear, ModelChoice::GradientBoosted] {
            let rating = controller.regressor(choice).predict(&record)?;
            assert!(rating > 1.0 && rating < 5.0);

            let mode = controller.classifier(choice).predict(&record)?;
            assert!(["Business", "Couples", "Family", "Friends", "Solo"].contains(&mode.as_str()));
        }

        Ok(())
    }

    #[test]
    fn mismatched_sizes() {
        let (ratings, _, content, models) = parts();
        let similarity = SimilarityMatrix::from_rows(vec![vec![1.0]]).expect("square");
        let indices = content.indices();

        let controller = TourismController::from_parts(ratings, similarity, content, indices, models);
        assert!(matches!(controller, Err(ErrorKind::Configuration(_))));
    }

    #[test]
    fn index_pointing_at_other_attraction() {
        let (ratings, similarity, content, models) = parts();
        let indices = hash_map! { 10 => 1, 20 => 0 };

        let controller = TourismController::from_parts(ratings, similarity, content, indices, models);
        assert!(matches!(controller, Err(ErrorKind::Configuration(_))));
    }

    #[test]
    fn index_out_of_range() {
        let (ratings, similarity, content, models) = parts();
        let indices = hash_map! { 10 => 0, 20 => 7 };

        let controller = TourismController::from_parts(ratings, similarity, content, indices, models);
        assert!(matches!(controller, Err(ErrorKind::Configuration(_))));
    }
}
