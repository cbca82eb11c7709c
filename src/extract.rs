//! Loading of near-Earth objects (csv) and close approaches (json).
//!
//! The neo csv is expected to have a header row; only the `pdes`, `name`,
//! `diameter` and `pha` columns are read. The close approach json follows
//! the layout of NASA's close approach data api: a `fields` list naming the
//! columns and a `data` list of rows holding strings.
//!
//! A missing column always fails the load. What happens to a single row that
//! cannot be turned into an object or approach is chosen with [`OnMalformed`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{NeowsError, Result};
use crate::model::{ApproachRecord, CloseApproach, NearEarthObject, NeoRecord};

const NEO_COLUMNS: [&str; 4] = ["pdes", "name", "diameter", "pha"];

/// What a loader does with a row it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnMalformed {
    #[default]
    Fail,
    /// Log a warning and carry on with the next row.
    Skip,
}

impl OnMalformed {
    fn handle<T>(self, what: &str, row: usize, parsed: Result<T>) -> Result<Option<T>> {
        match (parsed, self) {
            (Ok(value), _) => Ok(Some(value)),
            (Err(e), OnMalformed::Fail) => Err(e),
            (Err(e), OnMalformed::Skip) => {
                warn!(what, row, error = %e, "skipping malformed row");
                Ok(None)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct CadFile {
    fields: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<Option<String>>>,
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| NeowsError::Io(format!("{}: {e}", path.display())))
}

pub fn load_neos(path: impl AsRef<Path>, on_malformed: OnMalformed) -> Result<Vec<NearEarthObject>> {
    let path = path.as_ref();
    let neos = read_neos_with(open(path)?, on_malformed)?;
    info!(path = %path.display(), count = neos.len(), "loaded near-earth objects");
    Ok(neos)
}

pub fn read_neos<R: Read>(reader: R) -> Result<Vec<NearEarthObject>> {
    read_neos_with(reader, OnMalformed::Fail)
}

pub fn read_neos_with<R: Read>(reader: R, on_malformed: OnMalformed) -> Result<Vec<NearEarthObject>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?;
    if let Some(missing) = NEO_COLUMNS.iter().find(|&&column| !headers.iter().any(|h| h == column)) {
        return Err(NeowsError::parse(format!("neo csv has no '{missing}' column")));
    }
    let mut neos = Vec::new();
    for (row, record) in reader.deserialize::<NeoRecord>().enumerate() {
        let parsed = record
            .map_err(NeowsError::from)
            .and_then(|record| NearEarthObject::from_record(&record));
        if let Some(neo) = on_malformed.handle("neo", row, parsed)? {
            neos.push(neo);
        }
    }
    Ok(neos)
}

pub fn load_approaches(path: impl AsRef<Path>, on_malformed: OnMalformed) -> Result<Vec<CloseApproach>> {
    let path = path.as_ref();
    let approaches = read_approaches_with(open(path)?, on_malformed)?;
    info!(path = %path.display(), count = approaches.len(), "loaded close approaches");
    Ok(approaches)
}

pub fn read_approaches<R: Read>(reader: R) -> Result<Vec<CloseApproach>> {
    read_approaches_with(reader, OnMalformed::Fail)
}

pub fn read_approaches_with<R: Read>(reader: R, on_malformed: OnMalformed) -> Result<Vec<CloseApproach>> {
    let cad: CadFile = serde_json::from_reader(reader)?;
    let column = |name: &str| -> Result<usize> {
        cad.fields
            .iter()
            .position(|field| field == name)
            .ok_or_else(|| NeowsError::parse(format!("close approach data has no '{name}' field")))
    };
    let (des, cd, dist, v_rel) = (column("des")?, column("cd")?, column("dist")?, column("v_rel")?);

    let mut approaches = Vec::with_capacity(cad.data.len());
    for (row, entry) in cad.data.iter().enumerate() {
        let cell = |i: usize| -> Result<String> {
            entry
                .get(i)
                .cloned()
                .flatten()
                .ok_or_else(|| NeowsError::parse(format!("close approach row {row} has no '{}'", cad.fields[i])))
        };
        let parsed = (|| -> Result<CloseApproach> {
            let record = ApproachRecord {
                des: cell(des)?,
                cd: cell(cd)?,
                dist: cell(dist)?,
                v_rel: cell(v_rel)?,
            };
            CloseApproach::from_record(&record)
        })();
        if let Some(approach) = on_malformed.handle("close approach", row, parsed)? {
            approaches.push(approach);
        }
    }
    Ok(approaches)
}
