// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod prediction;
pub mod ranking;

use config::EngineConfig;
use controller::{
    Attraction, AttractionId, Controller, ErrorKind, FeatureRecord, ModelChoice, Recommendation,
    UserId,
};
pub use prediction::{Prediction, Task};
use ranking::Ranked;

pub type Result<T> = std::result::Result<T, ErrorKind>;

/// Recommendation and prediction queries over a loaded controller
pub struct Engine<'a, C>
where
    C: Controller,
{
    controller: &'a C,
    default_top_n: usize,
}

impl<'a, C> Engine<'a, C>
where
    C: Controller,
{
    pub fn with_controller(controller: &'a C) -> Self {
        Self::with_config(controller, &EngineConfig::default())
    }

    pub fn with_config(controller: &'a C, config: &EngineConfig) -> Self {
        Self {
            controller,
            default_top_n: config.default_top_n,
        }
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    pub fn attraction(&self, attraction_id: AttractionId) -> Result<&'a Attraction> {
        self.controller.attraction(attraction_id)
    }

    /// Attractions with the highest predicted rating for a user
    pub fn collaborative(&self, user_id: UserId, top_n: usize) -> Result<Vec<Recommendation>> {
        if user_id <= 0 {
            return Err(ErrorKind::InvalidUserId(user_id));
        }

        let ratings = self.controller.user_ratings(user_id)?;
        let ranked = ranking::top_n(top_n, ratings.iter().map(|(&id, &rating)| (id, rating)));

        log::debug!(
            "User {} has {} predicted ratings, keeping {}",
            user_id,
            ratings.len(),
            ranked.len()
        );

        let recommendations = ranked
            .into_iter()
            .map(|Ranked(attraction_id, score)| Recommendation {
                attraction_id,
                attraction: self
                    .controller
                    .attraction(attraction_id)
                    .ok()
                    .map(|attraction| attraction.name.clone()),
                score,
            })
            .collect();

        Ok(recommendations)
    }

    /// Attractions most similar to the given one, never the attraction itself
    pub fn content_based(
        &self,
        attraction_id: AttractionId,
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        let position = self.controller.position_of(attraction_id)?;
        let row = self.controller.similarity_row(position)?;

        let candidates = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(other, _)| *other != position);

        ranking::top_n(top_n, candidates)
            .into_iter()
            .map(|Ranked(other, score)| -> Result<Recommendation> {
                let attraction = self.controller.attraction_at(other)?;

                Ok(Recommendation {
                    attraction_id: attraction.id,
                    attraction: Some(attraction.name.clone()),
                    score,
                })
            })
            .collect()
    }

    pub fn predict(
        &self,
        task: Task,
        choice: ModelChoice,
        record: &FeatureRecord,
    ) -> Result<Prediction> {
        log::debug!("Predicting {:?} with the {} model", task, choice);

        let prediction = match task {
            Task::Rating => Prediction::Rating(self.controller.regressor(choice).predict(record)?),
            Task::VisitMode => {
                Prediction::VisitMode(self.controller.classifier(choice).predict(record)?)
            }
        };

        Ok(prediction)
    }
}
