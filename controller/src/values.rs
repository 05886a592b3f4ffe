// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ValueError;
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Type {
    String,
    Int32,
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::String => write!(f, "text"),
            Type::Int32 => write!(f, "integer"),
        }
    }
}

/// A required form field
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Field<'a> {
    pub name: &'a str,
    pub ty: Type,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, ty: Type) -> Self {
        Self { name, ty }
    }

    pub fn into_tuple(self) -> (&'a str, Type) {
        (self.name, self.ty)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Value {
    String(String),
    Int32(i32),
}

impl Value {
    pub fn from_str(value: &str, tp: Type) -> Result<Self, ValueError> {
        let value = match tp {
            Type::String => Self::String(value.to_owned()),
            Type::Int32 => {
                let value: i32 = value
                    .trim()
                    .parse()
                    .map_err(|e: <i32 as FromStr>::Err| ValueError::ValueConvert(e.to_string()))?;
                Self::Int32(value)
            }
        };

        Ok(value)
    }

    pub fn as_string(&self) -> Result<&str, ValueError> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(ValueError::CastingValue("String")),
        }
    }

    pub fn as_i32(&self) -> Result<i32, ValueError> {
        match self {
            Self::Int32(v) => Ok(*v),
            _ => Err(ValueError::CastingValue("i32")),
        }
    }
}
