//! Value type definitions
//!
//! Supported types:
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - str: UTF-8 string
//! - char: single character
//! - picture: opaque binary payload
//! - realInvl: closed real interval

use std::fmt;

use super::interval::RealInterval;
use super::picture::Picture;

/// Declared type of a column. The tag strings are part of the persisted format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// UTF-8 string
    Str,
    /// Exactly one character
    Char,
    /// Binary picture payload
    Picture,
    /// Real-number interval
    RealInterval,
}

impl DataType {
    /// All tags, in declaration order
    pub const ALL: [DataType; 6] = [
        DataType::Int,
        DataType::Float,
        DataType::Str,
        DataType::Char,
        DataType::Picture,
        DataType::RealInterval,
    ];

    /// Returns the persisted tag for this type
    pub fn tag(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Str => "str",
            DataType::Char => "char",
            DataType::Picture => "picture",
            DataType::RealInterval => "realInvl",
        }
    }

    /// Parses a persisted tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<DataType> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    Char(char),
    Picture(Picture),
    Interval(RealInterval),
}

impl Value {
    /// Returns the type tag matching this value's variant
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Integer(_) => DataType::Int,
            Value::Float(_) => DataType::Float,
            Value::Text(_) => DataType::Str,
            Value::Char(_) => DataType::Char,
            Value::Picture(_) => DataType::Picture,
            Value::Interval(_) => DataType::RealInterval,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => v.fmt(f),
            Value::Float(v) => v.fmt(f),
            Value::Text(v) => f.write_str(v),
            Value::Char(v) => v.fmt(f),
            Value::Picture(v) => v.fmt(f),
            Value::Interval(v) => v.fmt(f),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<Picture> for Value {
    fn from(v: Picture) -> Self {
        Value::Picture(v)
    }
}

impl From<RealInterval> for Value {
    fn from(v: RealInterval) -> Self {
        Value::Interval(v)
    }
}
