// the indexes are keyed by strings, seahash is quick on those
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::slice;

use tracing::{debug, info, warn};

use crate::error::{NeowsError, Result};
use crate::filter::AttributeFilter;
use crate::model::{ApproachId, CloseApproach, LinkedApproach, NearEarthObject, NeoId};

pub type IndexHasher = BuildHasherDefault<SeaHasher>;

// ------------- Database -------------
// Owns every object and approach, and is the only place where
// the two are linked to each other.
#[derive(Debug)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    // lookups (similar to database indexes)
    designation_index: HashMap<String, NeoId, IndexHasher>,
    name_index: HashMap<String, NeoId, IndexHasher>,
}

impl NeoDatabase {
    /// Indexes the objects and links every approach to its object.
    ///
    /// Fails if two objects share a designation or if an approach refers
    /// to a designation that no object has.
    pub fn new(mut neos: Vec<NearEarthObject>, mut approaches: Vec<CloseApproach>) -> Result<Self> {
        let mut designation_index = HashMap::<String, NeoId, IndexHasher>::default();
        let mut name_index = HashMap::<String, NeoId, IndexHasher>::default();
        for (id, neo) in neos.iter().enumerate() {
            match designation_index.entry(neo.designation().to_owned()) {
                Entry::Vacant(e) => {
                    e.insert(id);
                }
                Entry::Occupied(_) => {
                    return Err(NeowsError::DuplicateDesignation(neo.designation().to_owned()));
                }
            }
            if let Some(name) = neo.name() {
                match name_index.entry(name.to_owned()) {
                    Entry::Vacant(e) => {
                        e.insert(id);
                    }
                    Entry::Occupied(e) => {
                        warn!(
                            name,
                            kept = neos[*e.get()].designation(),
                            ignored = neo.designation(),
                            "name is shared, keeping the first object"
                        );
                    }
                }
            }
        }

        // the one and only linking pass
        for neo in neos.iter_mut() {
            neo.approaches.clear();
        }
        for (approach_id, approach) in approaches.iter_mut().enumerate() {
            let neo_id = *designation_index
                .get(&approach.designation)
                .ok_or_else(|| NeowsError::UnknownDesignation(approach.designation.clone()))?;
            approach.neo = Some(neo_id);
            neos[neo_id].approaches.push(approach_id);
        }

        info!(
            neos = neos.len(),
            approaches = approaches.len(),
            named = name_index.len(),
            "linked close approaches"
        );
        Ok(Self {
            neos,
            approaches,
            designation_index,
            name_index,
        })
    }
    pub fn neo_count(&self) -> usize {
        self.neos.len()
    }
    pub fn approach_count(&self) -> usize {
        self.approaches.len()
    }
    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id)
    }
    pub fn approach(&self, id: ApproachId) -> Option<&CloseApproach> {
        self.approaches.get(id)
    }
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.designation_index
            .get(designation)
            .and_then(|&id| self.neos.get(id))
    }
    // Objects without a name can never be found this way.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.name_index.get(name).and_then(|&id| self.neos.get(id))
    }
    /// Pairs an approach with the object it was linked to.
    pub fn link<'a>(&'a self, approach: &'a CloseApproach) -> Option<LinkedApproach<'a>> {
        approach
            .neo()
            .and_then(|id| self.neos.get(id))
            .map(|neo| LinkedApproach::new(approach, neo))
    }
    /// The approaches of the object with `designation`, in load order, or
    /// `None` if no such object is in this database.
    pub fn approaches_of<'a>(
        &'a self,
        designation: &str,
    ) -> Option<impl Iterator<Item = LinkedApproach<'a>> + use<'a>> {
        let neo = self.get_neo_by_designation(designation)?;
        Some(
            neo.approaches()
                .iter()
                .filter_map(move |&id| self.approaches.get(id))
                .map(move |approach| LinkedApproach::new(approach, neo)),
        )
    }
    /// Streams the linked approaches that satisfy every one of `filters`.
    ///
    /// Nothing is evaluated until the returned iterator is advanced, and an
    /// empty slice of filters matches every approach.
    pub fn query<'a, 'f>(&'a self, filters: &'f [AttributeFilter]) -> Query<'a, 'f> {
        debug!(filters = filters.len(), approaches = self.approaches.len(), "query started");
        Query {
            database: self,
            filters,
            approaches: self.approaches.iter(),
            failed: false,
        }
    }
}

// ------------- Query -------------
/// Lazy result stream of [`NeoDatabase::query`].
///
/// Yields approaches in the order they were loaded. A filter that cannot be
/// evaluated ends the stream with its error.
pub struct Query<'a, 'f> {
    database: &'a NeoDatabase,
    filters: &'f [AttributeFilter],
    approaches: slice::Iter<'a, CloseApproach>,
    failed: bool,
}

impl<'a> Iterator for Query<'a, '_> {
    type Item = Result<LinkedApproach<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for approach in self.approaches.by_ref() {
            let Some(linked) = self.database.link(approach) else {
                continue;
            };
            match matches_all(self.filters, &linked) {
                Ok(true) => return Some(Ok(linked)),
                Ok(false) => (),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

// logical AND, stopping at the first filter that fails
fn matches_all(filters: &[AttributeFilter], linked: &LinkedApproach<'_>) -> Result<bool> {
    for filter in filters {
        if !filter.test(linked)? {
            return Ok(false);
        }
    }
    Ok(true)
}
