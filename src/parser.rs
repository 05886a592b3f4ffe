// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

mod basics;

use basics::{parse_count, parse_i32, parse_ident, parse_number, parse_separator, parse_string};
use controller::{AttractionId, FeatureRecord, ModelChoice, UserId};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::char;
use nom::combinator::{map, map_res, opt};
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Statement {
    Collaborative(UserId, Option<usize>),
    Similar(AttractionId, Option<usize>),
    Attraction(AttractionId),
    PredictRating(ModelChoice, Option<FeatureRecord>),
    PredictVisitMode(ModelChoice, Option<FeatureRecord>),
}

fn parse_model(input: &str) -> IResult<&str, ModelChoice> {
    map_res(parse_ident, |s: &str| s.parse::<ModelChoice>())(input)
}

// 'Continent', 'Region', 'Country', 'City', year, month, 'AttractionType'
fn parse_record(input: &str) -> IResult<&str, FeatureRecord> {
    let (input, (continent, _, region, _, country, _, city_name, _, visit_year, _, visit_month, _, attraction_type)) =
        tuple((
            parse_string,
            parse_separator,
            parse_string,
            parse_separator,
            parse_string,
            parse_separator,
            parse_string,
            parse_separator,
            parse_i32,
            parse_separator,
            parse_i32,
            parse_separator,
            parse_string,
        ))(input)?;

    let record = FeatureRecord {
        continent: continent.into(),
        region: region.into(),
        country: country.into(),
        city_name: city_name.into(),
        visit_year,
        visit_month,
        attraction_type: attraction_type.into(),
    };

    Ok((input, record))
}

/// `(id)` or `(id, n)`
fn parse_lookup(input: &str) -> IResult<&str, (i64, Option<usize>)> {
    delimited(
        char('('),
        tuple((parse_number, opt(preceded(parse_separator, parse_count)))),
        char(')'),
    )(input)
}

/// `(model)` or `(model, <record>)`
fn parse_prediction(input: &str) -> IResult<&str, (ModelChoice, Option<FeatureRecord>)> {
    delimited(
        char('('),
        tuple((parse_model, opt(preceded(parse_separator, parse_record)))),
        char(')'),
    )(input)
}

fn parse_statement(input: &str) -> IResult<&str, Statement> {
    alt((
        map(preceded(tag("collaborative"), parse_lookup), |(id, n)| {
            Statement::Collaborative(id, n)
        }),
        map(preceded(tag("similar"), parse_lookup), |(id, n)| {
            Statement::Similar(id, n)
        }),
        map(
            preceded(
                tag("attraction"),
                delimited(char('('), parse_number, char(')')),
            ),
            Statement::Attraction,
        ),
        map(preceded(tag("predict_rating"), parse_prediction), |(model, record)| {
            Statement::PredictRating(model, record)
        }),
        map(preceded(tag("predict_mode"), parse_prediction), |(model, record)| {
            Statement::PredictVisitMode(model, record)
        }),
    ))(input)
}

pub fn parse_line(input: &str) -> Option<Statement> {
    let input = input.trim();
    let (rest, statement) = parse_statement(input).ok()?;

    if rest.is_empty() {
        Some(statement)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> FeatureRecord {
        FeatureRecord {
            continent: "Europe".into(),
            region: "Western Europe".into(),
            country: "France".into(),
            city_name: "Paris".into(),
            visit_year: 2022,
            visit_month: 7,
            attraction_type: "Museums".into(),
        }
    }

    #[test]
    fn collaborative_statement() {
        let parsed = parse_statement("collaborative(42)");
        let expected = ("", Statement::Collaborative(42, None));

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_statement("collaborative(42, 10)");
        let expected = ("", Statement::Collaborative(42, Some(10)));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn similar_statement() {
        let parsed = parse_statement("similar(369,3)");
        let expected = ("", Statement::Similar(369, Some(3)));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn attraction_statement() {
        let parsed = parse_statement("attraction(640)");
        let expected = ("", Statement::Attraction(640));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn predict_statements_without_record() {
        let parsed = parse_statement("predict_rating(xgboost)");
        let expected = (
            "",
            Statement::PredictRating(ModelChoice::GradientBoosted, None),
        );

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_statement("predict_mode(logistic)");
        let expected = ("", Statement::PredictVisitMode(ModelChoice::Linear, None));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn predict_statement_with_record() {
        let parsed = parse_line(
            "predict_rating(linear, 'Europe', 'Western Europe', 'France', 'Paris', 2022, 7, 'Museums')",
        );

        assert_eq!(
            parsed,
            Some(Statement::PredictRating(ModelChoice::Linear, Some(paris())))
        );
    }

    #[test]
    fn record_with_empty_text() {
        let parsed = parse_line("predict_mode(xgb, '', '', '', '', 2020, 1, '')");

        let record = FeatureRecord {
            visit_year: 2020,
            visit_month: 1,
            ..Default::default()
        };
        assert_eq!(
            parsed,
            Some(Statement::PredictVisitMode(
                ModelChoice::GradientBoosted,
                Some(record)
            ))
        );
    }

    #[test]
    fn unknown_model() {
        assert!(parse_line("predict_rating(random_forest)").is_none());
    }

    #[test]
    fn parse_invalid_line() {
        assert!(parse_line("collaborative();").is_none());
        assert!(parse_line("collaborative(-4)").is_none());
        assert!(parse_line("similar(3, 2").is_none());
        assert!(parse_line("predict_rating(linear, 'Europe')").is_none());
    }

    #[test]
    fn zero_results_rejected() {
        assert!(parse_line("collaborative(42, 0)").is_none());
        assert!(parse_line("similar(3, 0)").is_none());
    }

    #[test]
    fn huge_result_count() {
        let parsed = parse_line("collaborative(42, 18446744073709551615)");
        assert_eq!(parsed, Some(Statement::Collaborative(42, Some(usize::MAX))));
    }

    #[test]
    fn parse_valid_line() {
        let parsed = parse_line("  similar(12, 5)  ");
        assert_eq!(parsed, Some(Statement::Similar(12, Some(5))));
    }
}
