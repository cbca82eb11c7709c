// used for approach timestamps (UTC, minute precision)
use chrono::{Month, NaiveDate, NaiveDateTime, NaiveTime};
// so the date-hour pattern doesn't have to be recompiled
use lazy_static::lazy_static;
use regex::Regex;
// raw records are deserialized straight from the neo csv
use serde::Deserialize;

// used to print out readable forms of the entities
use std::fmt;
use std::str::FromStr;

use crate::error::{NeowsError, Result};

// ------------- Identities -------------
// Entities refer to each other through their position in the
// tables owned by the database, never through direct references.
pub type NeoId = usize;
pub type ApproachId = usize;

// The only pha value that marks an object as potentially hazardous.
pub const HAZARDOUS_FLAG: &str = "Y";
pub const DATE_HOUR_FORMAT: &str = "%Y-%m-%d %H:%M";

lazy_static! {
    static ref DATE_HOUR: Regex = Regex::new(
        r"^(?P<year>\d{4})-(?P<month>[A-Za-z]{3}|\d{1,2})-(?P<day>\d{1,2}) (?P<hour>\d{1,2})(?::(?P<minute>\d{2}))?$"
    )
    .unwrap();
}

/// Parses a compact date-hour such as `1900-Jan-01 00:00` or `2020-Mar-5 7`.
///
/// The month may be an English three-letter abbreviation or a number, the
/// minutes are optional and seconds are never present.
pub fn parse_date_hour(s: &str) -> Result<NaiveDateTime> {
    let invalid = || NeowsError::parse(format!("invalid date-hour '{s}'"));
    let caps = DATE_HOUR.captures(s.trim()).ok_or_else(invalid)?;
    let number = |name: &str| -> Result<u32> {
        match caps.name(name) {
            Some(m) => m.as_str().parse::<u32>().map_err(|_| invalid()),
            None => Ok(0),
        }
    };
    let month = match caps["month"].parse::<u32>() {
        Ok(m) => m,
        Err(_) => Month::from_str(&caps["month"])
            .map_err(|_| invalid())?
            .number_from_month(),
    };
    let year = number("year")? as i32;
    let date = NaiveDate::from_ymd_opt(year, month, number("day")?).ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(number("hour")?, number("minute")?, 0).ok_or_else(invalid)?;
    Ok(NaiveDateTime::new(date, time))
}

pub fn format_date_hour(time: &NaiveDateTime) -> String {
    time.format(DATE_HOUR_FORMAT).to_string()
}

// Empty string is the "not known" sentinel in the raw data.
fn optional(field: &str) -> Option<&str> {
    let field = field.trim();
    if field.is_empty() { None } else { Some(field) }
}

fn parse_float(what: &str, owner: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| NeowsError::parse(format!("{what} '{raw}' of {owner}: {e}")))
}

// ------------- Raw records -------------
/// One row of the neo csv, before any interpretation of its sentinels.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NeoRecord {
    pub pdes: String,
    pub name: String,
    pub diameter: String,
    pub pha: String,
}

/// One entry of the close approach data, before parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApproachRecord {
    pub des: String,
    pub cd: String,
    pub dist: String,
    pub v_rel: String,
}

// ------------- NearEarthObject -------------
#[derive(Debug, Clone, PartialEq)]
pub struct NearEarthObject {
    designation: String,
    name: Option<String>,
    diameter: f64, // km, NaN when unknown
    hazardous: bool,
    // populated once by the database when linking
    pub(crate) approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: f64,
        hazardous: bool,
    ) -> Result<Self> {
        let designation = designation.into();
        if designation.trim().is_empty() {
            return Err(NeowsError::InvalidRecord(String::from("empty designation")));
        }
        if diameter < 0.0 {
            return Err(NeowsError::InvalidRecord(format!(
                "negative diameter {diameter} for {designation}"
            )));
        }
        Ok(Self {
            designation,
            name: name.filter(|n| !n.is_empty()),
            diameter,
            hazardous,
            approaches: Vec::new(),
        })
    }
    pub fn from_record(record: &NeoRecord) -> Result<Self> {
        let designation = record.pdes.trim();
        let diameter = match optional(&record.diameter) {
            Some(raw) => parse_float("diameter", designation, raw)?,
            None => f64::NAN,
        };
        Self::new(
            designation,
            optional(&record.name).map(String::from),
            diameter,
            record.pha.trim() == HAZARDOUS_FLAG,
        )
    }
    // Fields are only exposed through getters so that an object
    // stays immutable after creation.
    pub fn designation(&self) -> &str {
        &self.designation
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn diameter(&self) -> f64 {
        self.diameter
    }
    pub fn hazardous(&self) -> bool {
        self.hazardous
    }
    pub fn approaches(&self) -> &[ApproachId] {
        &self.approaches
    }
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} {}", self.designation, name),
            None => self.designation.clone(),
        }
    }
}
impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NEO {} has a diameter of ", self.fullname())?;
        if self.diameter.is_nan() {
            write!(f, "unknown")?;
        } else {
            write!(f, "{:.3}", self.diameter)?;
        }
        let not = if self.hazardous { "" } else { "not " };
        write!(f, " km and is {not}potentially hazardous.")
    }
}

// ------------- CloseApproach -------------
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    // only needed until the database has linked the approach
    pub(crate) designation: String,
    time: NaiveDateTime,
    distance: f64, // au
    velocity: f64, // km/s
    pub(crate) neo: Option<NeoId>,
}

impl CloseApproach {
    pub fn new(
        designation: impl Into<String>,
        time: NaiveDateTime,
        distance: f64,
        velocity: f64,
    ) -> Result<Self> {
        let designation = designation.into();
        if designation.trim().is_empty() {
            return Err(NeowsError::InvalidRecord(String::from(
                "close approach without designation",
            )));
        }
        // negated so that NaN is rejected as well
        if !(distance >= 0.0) || !(velocity >= 0.0) {
            return Err(NeowsError::InvalidRecord(format!(
                "distance {distance} and velocity {velocity} of {designation} must be non-negative"
            )));
        }
        Ok(Self {
            designation,
            time,
            distance,
            velocity,
            neo: None,
        })
    }
    pub fn from_record(record: &ApproachRecord) -> Result<Self> {
        let designation = record.des.trim();
        Self::new(
            designation,
            parse_date_hour(&record.cd)?,
            parse_float("distance", designation, &record.dist)?,
            parse_float("velocity", designation, &record.v_rel)?,
        )
    }
    pub fn time(&self) -> NaiveDateTime {
        self.time
    }
    pub fn time_str(&self) -> String {
        format_date_hour(&self.time)
    }
    pub fn distance(&self) -> f64 {
        self.distance
    }
    pub fn velocity(&self) -> f64 {
        self.velocity
    }
    pub fn neo(&self) -> Option<NeoId> {
        self.neo
    }
}
impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "On {} approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            self.distance,
            self.velocity
        )
    }
}

// ------------- LinkedApproach -------------
/// A close approach viewed together with the object making it.
///
/// This is what filters are evaluated against, since some attributes
/// (diameter, hazard) live on the object rather than on the approach.
#[derive(Debug, Clone, Copy)]
pub struct LinkedApproach<'a> {
    approach: &'a CloseApproach,
    neo: &'a NearEarthObject,
}

impl<'a> LinkedApproach<'a> {
    pub fn new(approach: &'a CloseApproach, neo: &'a NearEarthObject) -> Self {
        Self { approach, neo }
    }
    pub fn approach(&self) -> &'a CloseApproach {
        self.approach
    }
    pub fn neo(&self) -> &'a NearEarthObject {
        self.neo
    }
}
impl fmt::Display for LinkedApproach<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.approach.time_str(),
            self.neo.fullname(),
            self.approach.distance,
            self.approach.velocity
        )
    }
}
