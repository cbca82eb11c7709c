//! Attribute filters over linked close approaches.
//!
//! An [`AttributeFilter`] compares one attribute of a [`LinkedApproach`] to a
//! reference value: `extract(approach) OP value`. Which attribute is read is
//! decided by the filter's [`Attribute`], each of which carries a plain
//! function pointer ([`Extractor`]) chosen when the filter is built. New kinds
//! of filters are added with [`Attribute::Other`] and
//! [`AttributeFilter::with_extractor`] without touching the existing ones.

// used for the date attribute and date reference values
use chrono::NaiveDate;

use std::cmp::Ordering;
use std::fmt;

use crate::error::{NeowsError, Result};
use crate::model::LinkedApproach;

// ------------- Value -------------
/// A reference value or an extracted attribute.
///
/// Values of different kinds are never equal nor ordered, and a `NaN`
/// float compares false to everything, so such comparisons silently fail
/// instead of raising errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Date(NaiveDate),
    Float(f64),
    Flag(bool),
}
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Date(a), Value::Date(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Flag(a), Value::Flag(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}
impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}
impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Flag(b)
    }
}
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Date(d) => write!(f, "{}", d),
            Value::Float(x) => write!(f, "{}", x),
            Value::Flag(b) => write!(f, "{}", b),
        }
    }
}

// ------------- Comparator -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}
impl Comparator {
    /// Evaluates `left OP right`.
    pub fn apply(self, left: &Value, right: &Value) -> bool {
        match self {
            Comparator::Eq => left == right,
            Comparator::Ne => left != right,
            Comparator::Lt => left < right,
            Comparator::Le => left <= right,
            Comparator::Gt => left > right,
            Comparator::Ge => left >= right,
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            Comparator::Eq => "eq",
            Comparator::Ne => "ne",
            Comparator::Lt => "lt",
            Comparator::Le => "le",
            Comparator::Gt => "gt",
            Comparator::Ge => "ge",
        }
    }
}
impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Attribute -------------
/// Reads the attribute of interest from a linked approach. Must be pure.
pub type Extractor = fn(&LinkedApproach<'_>) -> Value;

fn extract_distance(linked: &LinkedApproach<'_>) -> Value {
    Value::Float(linked.approach().distance())
}
fn extract_velocity(linked: &LinkedApproach<'_>) -> Value {
    Value::Float(linked.approach().velocity())
}
fn extract_diameter(linked: &LinkedApproach<'_>) -> Value {
    Value::Float(linked.neo().diameter())
}
fn extract_hazardous(linked: &LinkedApproach<'_>) -> Value {
    Value::Flag(linked.neo().hazardous())
}
// time of day is discarded
fn extract_date(linked: &LinkedApproach<'_>) -> Value {
    Value::Date(linked.approach().time().date())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Distance,
    Velocity,
    Diameter,
    Hazardous,
    Date,
    /// An attribute this crate has no built-in extractor for.
    Other(&'static str),
}
impl Attribute {
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Distance => "Distance",
            Attribute::Velocity => "Velocity",
            Attribute::Diameter => "Diameter",
            Attribute::Hazardous => "Hazardous",
            Attribute::Date => "Date",
            Attribute::Other(name) => name,
        }
    }
    pub fn extractor(self) -> Option<Extractor> {
        match self {
            Attribute::Distance => Some(extract_distance as Extractor),
            Attribute::Velocity => Some(extract_velocity as Extractor),
            Attribute::Diameter => Some(extract_diameter as Extractor),
            Attribute::Hazardous => Some(extract_hazardous as Extractor),
            Attribute::Date => Some(extract_date as Extractor),
            Attribute::Other(_) => None,
        }
    }
}

// ------------- AttributeFilter -------------
#[derive(Debug, Clone, Copy)]
pub struct AttributeFilter {
    attribute: Attribute,
    comparator: Comparator,
    value: Value,
    extract: Option<Extractor>,
}

impl AttributeFilter {
    /// Builds a filter using the built-in extractor of `attribute`, if any.
    pub fn new(attribute: Attribute, comparator: Comparator, value: impl Into<Value>) -> Self {
        Self {
            attribute,
            comparator,
            value: value.into(),
            extract: attribute.extractor(),
        }
    }
    pub fn with_extractor(
        attribute: Attribute,
        comparator: Comparator,
        value: impl Into<Value>,
        extract: Extractor,
    ) -> Self {
        Self {
            attribute,
            comparator,
            value: value.into(),
            extract: Some(extract),
        }
    }
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }
    pub fn comparator(&self) -> Comparator {
        self.comparator
    }
    pub fn value(&self) -> Value {
        self.value
    }
    pub fn is_supported(&self) -> bool {
        self.extract.is_some()
    }
    /// Evaluates the filter on a linked approach.
    ///
    /// Fails with [`NeowsError::UnsupportedCriterion`] when the filter was
    /// built without an extractor, which is a programming error rather
    /// than bad input.
    pub fn test(&self, linked: &LinkedApproach<'_>) -> Result<bool> {
        let extract = self
            .extract
            .ok_or_else(|| NeowsError::UnsupportedCriterion(self.to_string()))?;
        Ok(self.comparator.apply(&extract(linked), &self.value))
    }
}
impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}Filter(op={}, value={})",
            self.attribute.name(),
            self.comparator,
            self.value
        )
    }
}
