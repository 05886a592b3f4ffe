// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ValueError;
use crate::values::{Field, Type, Value};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::ops::RangeInclusive;

pub const VISIT_YEAR_RANGE: RangeInclusive<i32> = 2000..=2030;
pub const VISIT_MONTH_RANGE: RangeInclusive<i32> = 1..=12;

/// Columns of a feature record, named as the training pipeline names them
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize)]
pub enum Feature {
    Continent,
    Region,
    Country,
    CityName,
    VisitYear,
    VisitMonth,
    AttractionType,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::Continent,
        Feature::Region,
        Feature::Country,
        Feature::CityName,
        Feature::VisitYear,
        Feature::VisitMonth,
        Feature::AttractionType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Continent => "Continent",
            Feature::Region => "Region",
            Feature::Country => "Country",
            Feature::CityName => "CityName",
            Feature::VisitYear => "VisitYear",
            Feature::VisitMonth => "VisitMonth",
            Feature::AttractionType => "AttractionType",
        }
    }

    pub fn value_type(self) -> Type {
        match self {
            Feature::VisitYear | Feature::VisitMonth => Type::Int32,
            _ => Type::String,
        }
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FeatureValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// The single row both regressors and classifiers are queried with
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FeatureRecord {
    pub continent: String,
    pub region: String,
    pub country: String,
    pub city_name: String,
    pub visit_year: i32,
    pub visit_month: i32,
    pub attraction_type: String,
}

impl FeatureRecord {
    /// Fields asked by the interactive form, in display order
    pub fn fields() -> Vec<Field<'static>> {
        Feature::ALL
            .iter()
            .map(|feature| Field::new(feature.name(), feature.value_type()))
            .collect()
    }

    pub fn from_prototype(proto: &HashMap<&str, Value>) -> Result<Self, ValueError> {
        let get = |feature: Feature| {
            proto
                .get(feature.name())
                .ok_or_else(|| ValueError::MissingField(feature.name().into()))
        };

        Ok(Self {
            continent: get(Feature::Continent)?.as_string()?.to_owned(),
            region: get(Feature::Region)?.as_string()?.to_owned(),
            country: get(Feature::Country)?.as_string()?.to_owned(),
            city_name: get(Feature::CityName)?.as_string()?.to_owned(),
            visit_year: get(Feature::VisitYear)?.as_i32()?,
            visit_month: get(Feature::VisitMonth)?.as_i32()?,
            attraction_type: get(Feature::AttractionType)?.as_string()?.to_owned(),
        })
    }

    pub fn value(&self, feature: Feature) -> FeatureValue<'_> {
        match feature {
            Feature::Continent => FeatureValue::Text(&self.continent),
            Feature::Region => FeatureValue::Text(&self.region),
            Feature::Country => FeatureValue::Text(&self.country),
            Feature::CityName => FeatureValue::Text(&self.city_name),
            Feature::VisitYear => FeatureValue::Number(f64::from(self.visit_year)),
            Feature::VisitMonth => FeatureValue::Number(f64::from(self.visit_month)),
            Feature::AttractionType => FeatureValue::Text(&self.attraction_type),
        }
    }

    /// Year and month limits the input surface enforces before querying a model
    pub fn check_ranges(&self) -> Result<(), ValueError> {
        let checks = [
            ("VisitYear", VISIT_YEAR_RANGE, self.visit_year),
            ("VisitMonth", VISIT_MONTH_RANGE, self.visit_month),
        ];

        for (field, range, value) in checks.iter() {
            if !range.contains(value) {
                return Err(ValueError::OutOfRange {
                    field: *field,
                    min: i64::from(*range.start()),
                    max: i64::from(*range.end()),
                    value: i64::from(*value),
                });
            }
        }

        Ok(())
    }
}
