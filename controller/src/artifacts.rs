// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use crate::{AttractionId, Indices};
use std::collections::{BTreeMap, HashMap};

/// One row of the content table
#[derive(Debug, Clone, PartialEq)]
pub struct Attraction {
    pub id: AttractionId,
    pub name: String,
    /// Any other column the content table carries (type, city, ...)
    pub details: BTreeMap<String, String>,
}

impl Attraction {
    pub fn new(id: AttractionId, name: &str) -> Self {
        Self {
            id,
            name: name.into(),
            details: BTreeMap::new(),
        }
    }
}

/// Attractions ordered by their similarity matrix position
#[derive(Debug, Clone, Default)]
pub struct ContentTable {
    rows: Vec<Attraction>,
    by_id: HashMap<AttractionId, usize>,
}

impl ContentTable {
    /// Fails with the first duplicated attraction id
    pub fn new(rows: Vec<Attraction>) -> Result<Self, AttractionId> {
        let mut by_id = HashMap::with_capacity(rows.len());

        for (position, attraction) in rows.iter().enumerate() {
            if by_id.insert(attraction.id, position).is_some() {
                return Err(attraction.id);
            }
        }

        Ok(Self { rows, by_id })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn at(&self, position: usize) -> Option<&Attraction> {
        self.rows.get(position)
    }

    pub fn by_id(&self, id: AttractionId) -> Option<&Attraction> {
        self.by_id.get(&id).and_then(|&position| self.rows.get(position))
    }

    /// Index map implied by row order
    pub fn indices(&self) -> Indices {
        self.by_id.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attraction> {
        self.rows.iter()
    }
}

/// Square, row-major matrix of similarity scores
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Fails with the index of the first row that doesn't have `rows.len()` columns
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, usize> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(i);
            }

            values.extend(row);
        }

        Ok(Self { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, position: usize) -> Result<&[f64], ErrorKind> {
        if position >= self.size {
            return Err(ErrorKind::PositionOutOfBounds(position));
        }

        let start = position * self.size;
        Ok(&self.values[start..start + self.size])
    }

    /// Positions whose diagonal entry is not the row maximum
    pub fn diagonal_violations(&self) -> Vec<usize> {
        (0..self.size)
            .filter(|&i| {
                let row = &self.values[i * self.size..(i + 1) * self.size];
                row.iter().any(|&score| score > row[i])
            })
            .collect()
    }
}
