// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use controller::{FeatureRecord, Field, Value};
use rustyline::Editor;
use std::collections::HashMap;

/// Anything the form can read lines from
pub(crate) trait LineReader {
    fn read_line(&mut self, prompt: &str) -> rustyline::Result<String>;
}

impl LineReader for Editor<()> {
    fn read_line(&mut self, prompt: &str) -> rustyline::Result<String> {
        self.readline(prompt)
    }
}

macro_rules! field {
    ($ed:ident, $name:expr, $ty:expr) => {{
        use rustyline::error::ReadlineError;

        let msg = format!("{}{} ({}): ", $crate::PROMPT, $name, $ty);

        match $ed.read_line(&msg) {
            Ok(line) => Ok(Some(line)),

            // CTRL-C or CTRL-D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),

            Err(e) => Err(e),
        }
    }};
}

/// `None` when the form is cancelled
fn build_prototype<'a, R>(
    rl: &mut R,
    fields: Vec<Field<'a>>,
) -> Result<Option<HashMap<&'a str, Value>>, Error>
where
    R: LineReader,
{
    let mut prototype = HashMap::new();

    for field in fields {
        let (name, ty) = field.into_tuple();

        loop {
            let input: Option<String> = field!(rl, name, ty)?;

            let input = match input {
                Some(input) => input,
                None => return Ok(None),
            };

            match Value::from_str(input.trim(), ty) {
                Ok(value) => {
                    prototype.insert(name, value);
                    break;
                }

                Err(e) => {
                    log::error!("Invalid value received!");
                    log::error!("Reason: {}", e);
                }
            }
        }
    }

    Ok(Some(prototype))
}

/// Asks every feature of a record, one line per field
pub(crate) fn read_record<R: LineReader>(rl: &mut R) -> Result<Option<FeatureRecord>, Error> {
    println!("Fill the visit details, an empty line is a valid text value");
    println!("Press CTRL-C or CTRL-D to cancel");

    match build_prototype(rl, FeatureRecord::fields())? {
        Some(prototype) => Ok(Some(FeatureRecord::from_prototype(&prototype)?)),
        None => Ok(None),
    }
}
