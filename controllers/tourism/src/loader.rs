// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::{anyhow, bail, Error};
use controller::{Attraction, AttractionId, ContentTable, Indices, MapedRatings, SimilarityMatrix};
use indicatif::ProgressIterator;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Read;
use std::path::Path;

fn builder(has_headers: bool) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        .delimiter(b',')
        .trim(csv::Trim::All);

    builder
}

fn reader(path: &Path, has_headers: bool) -> Result<csv::Reader<std::fs::File>, Error> {
    Ok(builder(has_headers).from_path(path)?)
}

/// Wide table, first column is the user id and every other header an attraction id
pub fn load_ratings(path: &Path) -> Result<MapedRatings, Error> {
    read_ratings(reader(path, true)?)
}

fn read_ratings<R: Read>(mut csv: csv::Reader<R>) -> Result<MapedRatings, Error> {
    let mut seen = HashSet::new();
    let mut attraction_ids = Vec::new();

    for id in csv.headers()?.iter().skip(1) {
        let id = id
            .parse::<AttractionId>()
            .map_err(|_| anyhow!("invalid attraction id '{}' in header", id))?;

        if !seen.insert(id) {
            bail!("attraction {} appears more than once in the header", id);
        }
        attraction_ids.push(id);
    }

    log::debug!("Collecting predicted ratings for {} attractions", attraction_ids.len());
    let records: Vec<_> = csv.records().collect::<Result<_, _>>()?;

    let mut maped_ratings = HashMap::with_capacity(records.len());
    for record in records.iter().progress() {
        let user_id: i64 = record[0]
            .parse()
            .map_err(|_| anyhow!("invalid user id '{}'", &record[0]))?;

        let mut ratings = HashMap::new();
        for (attraction_id, cell) in attraction_ids.iter().zip(record.iter().skip(1)) {
            if cell.is_empty() {
                continue;
            }

            let rating: f64 = cell
                .parse()
                .map_err(|_| anyhow!("invalid rating '{}' for user {}", cell, user_id))?;
            ratings.insert(*attraction_id, rating);
        }

        if ratings.is_empty() {
            log::debug!("User {} has no predicted ratings", user_id);
        }

        if maped_ratings.insert(user_id, ratings).is_some() {
            bail!("user {} appears more than once", user_id);
        }
    }

    Ok(maped_ratings)
}

/// Headerless square matrix
pub fn load_similarity(path: &Path) -> Result<SimilarityMatrix, Error> {
    let mut csv = reader(path, false)?;

    let mut rows = Vec::new();
    for (i, record) in csv.records().enumerate() {
        let row = record?
            .iter()
            .map(|cell| {
                cell.parse::<f64>()
                    .map_err(|_| anyhow!("invalid score '{}' in row {}", cell, i))
            })
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(row);
    }

    SimilarityMatrix::from_rows(rows)
        .map_err(|row| anyhow!("matrix is not square, row {} has a different length", row))
}

/// Requires `AttractionId` and `Attraction` columns, the rest become details
pub fn load_content(path: &Path) -> Result<ContentTable, Error> {
    let mut csv = reader(path, true)?;

    let headers = csv.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| anyhow!("missing column '{}'", name))
    };

    let id_column = column("AttractionId")?;
    let name_column = column("Attraction")?;

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record?;

        let id: AttractionId = record[id_column]
            .parse()
            .map_err(|_| anyhow!("invalid attraction id '{}'", &record[id_column]))?;

        let details: BTreeMap<_, _> = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(i, _)| *i != id_column && *i != name_column)
            .map(|(_, (header, value))| (header.to_owned(), value.to_owned()))
            .collect();

        rows.push(Attraction {
            id,
            name: record[name_column].to_owned(),
            details,
        });
    }

    ContentTable::new(rows).map_err(|id| anyhow!("attraction {} appears more than once", id))
}

/// `AttractionId,Position` pairs
pub fn load_indices(path: &Path) -> Result<Indices, Error> {
    let mut csv = reader(path, true)?;

    let mut indices = HashMap::new();
    for record in csv.deserialize() {
        let (id, position): (AttractionId, usize) = record?;

        if indices.insert(id, position).is_some() {
            bail!("attraction {} appears more than once", id);
        }
    }

    Ok(indices)
}
