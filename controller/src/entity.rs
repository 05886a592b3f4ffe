// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::artifacts::Attraction;
use crate::{AttractionId, Recommendation};
use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, table, Table};
use std::collections::HashMap;

pub trait Entity {
    type Id;

    fn get_id(&self) -> Self::Id;
    fn get_data(&self) -> HashMap<String, String> {
        Default::default()
    }
}

pub trait ToTable {
    fn to_table(&self) -> Table;
}

impl<I: ToString, E: Entity<Id = I>> ToTable for E {
    fn to_table(&self) -> Table {
        let mut table = table![["id", self.get_id()]];

        let mut data: Vec<_> = self.get_data().into_iter().collect();
        data.sort();

        for (key, val) in data {
            table.add_row(row![key, val]);
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}

impl Entity for Attraction {
    type Id = AttractionId;

    fn get_id(&self) -> Self::Id {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut data: HashMap<_, _> = self
            .details
            .iter()
            .map(|(key, val)| (key.clone(), val.clone()))
            .collect();

        data.insert("name".into(), self.name.clone());
        data
    }
}

/// Ranked recommendations, `score` names the score column
pub fn recommendations_table(recommendations: &[Recommendation], score: &str) -> Table {
    let mut table = table![["#", "AttractionId", "Attraction", score]];

    for (rank, recommendation) in recommendations.iter().enumerate() {
        table.add_row(row![
            rank + 1,
            recommendation.attraction_id,
            recommendation.attraction.as_deref().unwrap_or(""),
            format!("{:.4}", recommendation.score)
        ]);
    }

    table.set_format(*FORMAT_NO_LINESEP);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attraction_table_includes_details() {
        let mut attraction = Attraction::new(7, "Tanah Lot Temple");
        attraction
            .details
            .insert("AttractionType".into(), "Religious Sites".into());

        let data = attraction.get_data();
        assert_eq!(data.get("name").map(String::as_str), Some("Tanah Lot Temple"));
        assert_eq!(
            data.get("AttractionType").map(String::as_str),
            Some("Religious Sites")
        );

        let rendered = attraction.to_table().to_string();
        assert!(rendered.contains("Religious Sites"));
    }

    #[test]
    fn recommendations_render_in_rank_order() {
        let recommendations = vec![
            Recommendation {
                attraction_id: 2,
                attraction: Some("Museum".into()),
                score: 4.9,
            },
            Recommendation {
                attraction_id: 9,
                attraction: None,
                score: 4.5,
            },
        ];

        let table = recommendations_table(&recommendations, "PredictedRating");
        assert_eq!(table.len(), 3);

        let rendered = table.to_string();
        assert!(rendered.contains("Museum"));
        assert!(rendered.contains("4.9000"));
        assert!(rendered.find("4.9000") < rendered.find("4.5000"));
    }
}
