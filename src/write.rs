use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{NeowsError, Result};
use crate::model::LinkedApproach;

// Column order of the csv output.
#[derive(Serialize)]
struct CsvRow<'a> {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    designation: &'a str,
    name: &'a str,
    diameter_km: String,
    potentially_hazardous: bool,
}

impl<'a> From<LinkedApproach<'a>> for CsvRow<'a> {
    fn from(linked: LinkedApproach<'a>) -> Self {
        let (approach, neo) = (linked.approach(), linked.neo());
        Self {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance(),
            velocity_km_s: approach.velocity(),
            designation: neo.designation(),
            name: neo.name().unwrap_or(""),
            diameter_km: if neo.diameter().is_nan() {
                String::from("nan")
            } else {
                neo.diameter().to_string()
            },
            potentially_hazardous: neo.hazardous(),
        }
    }
}

#[derive(Serialize)]
struct JsonNeo<'a> {
    designation: &'a str,
    name: &'a str,
    // json has no NaN, unknown diameters become null
    diameter_km: Option<f64>,
    potentially_hazardous: bool,
}

#[derive(Serialize)]
struct JsonApproach<'a> {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    neo: JsonNeo<'a>,
}

impl<'a> From<LinkedApproach<'a>> for JsonApproach<'a> {
    fn from(linked: LinkedApproach<'a>) -> Self {
        let (approach, neo) = (linked.approach(), linked.neo());
        Self {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance(),
            velocity_km_s: approach.velocity(),
            neo: JsonNeo {
                designation: neo.designation(),
                name: neo.name().unwrap_or(""),
                diameter_km: Some(neo.diameter()).filter(|d| !d.is_nan()),
                potentially_hazardous: neo.hazardous(),
            },
        }
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| NeowsError::Io(format!("{}: {e}", path.display())))
}

/// Writes one csv row per approach, returning how many were written.
pub fn write_csv<'a, W, I>(writer: W, results: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let mut writer = csv::Writer::from_writer(writer);
    let mut written = 0;
    for linked in results {
        writer.serialize(CsvRow::from(linked))?;
        written += 1;
    }
    if written == 0 {
        // serialize() writes the header lazily, so an empty result still needs one
        writer.write_record([
            "datetime_utc",
            "distance_au",
            "velocity_km_s",
            "designation",
            "name",
            "diameter_km",
            "potentially_hazardous",
        ])?;
    }
    writer.flush()?;
    Ok(written)
}

/// Writes the approaches as a json array, returning how many were written.
pub fn write_json<'a, W, I>(mut writer: W, results: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let rows: Vec<JsonApproach> = results.into_iter().map(JsonApproach::from).collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(rows.len())
}

pub fn write_to_csv<'a, I>(results: I, path: impl AsRef<Path>) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let path = path.as_ref();
    let written = write_csv(create(path)?, results)?;
    info!(path = %path.display(), written, "wrote csv results");
    Ok(written)
}

pub fn write_to_json<'a, I>(results: I, path: impl AsRef<Path>) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let path = path.as_ref();
    let written = write_json(create(path)?, results)?;
    info!(path = %path.display(), written, "wrote json results");
    Ok(written)
}
