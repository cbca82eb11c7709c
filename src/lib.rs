//! Neows – explore the recorded close approaches of near-Earth objects.
//!
//! The data model consists of two kinds of entities:
//! * A [`model::NearEarthObject`] (NEO) identified by its primary designation,
//!   with an optional name, a diameter in kilometers (`NaN` when unknown) and
//!   a flag telling whether it is potentially hazardous.
//! * A [`model::CloseApproach`] recording when (UTC, minute precision), how
//!   close (au) and how fast (km/s) a NEO passed by Earth.
//!
//! Both are owned by a [`database::NeoDatabase`], which links every approach
//! to its object exactly once, using positions in its own tables rather than
//! references between the entities. Queries see approaches together with
//! their object as a [`model::LinkedApproach`].
//!
//! ## Modules
//! * [`model`] – Entities, raw records and the date-hour format.
//! * [`filter`] – [`filter::AttributeFilter`], a comparison of one attribute
//!   (distance, velocity, diameter, hazard, date) against a reference value.
//! * [`criteria`] – Turns optional user [`criteria::Criteria`] into filters.
//! * [`limit`] – Caps a lazy result stream.
//! * [`database`] – Linking, lookups by designation and name, and queries.
//! * [`extract`] – Loading objects from csv and approaches from json.
//! * [`write`] – Saving query results as csv or json.
//! * [`settings`] – Layered configuration.
//!
//! ## Querying
//! All filters of a query must hold for an approach to be produced, so an
//! empty set of filters matches everything and contradictory criteria simply
//! match nothing.
//! ```
//! use neows::criteria::{create_filters, Criteria};
//! use neows::database::NeoDatabase;
//! use neows::limit::limit;
//! use neows::model::{parse_date_hour, CloseApproach, NearEarthObject};
//!
//! let neo = NearEarthObject::new("433", Some("Eros".into()), 16.84, false).unwrap();
//! let approach = CloseApproach::new("433", parse_date_hour("1900-Dec-27 01:30").unwrap(), 0.315, 5.58).unwrap();
//! let db = NeoDatabase::new(vec![neo], vec![approach]).unwrap();
//!
//! let filters = create_filters(&Criteria { distance_max: Some(0.5), ..Default::default() });
//! let results: Vec<_> = limit(db.query(&filters), Some(5)).collect::<Result<_, _>>().unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].neo().fullname(), "433 Eros");
//! ```
//!
//! Everything is synchronous and, once the database is built, read-only.

pub mod criteria;
pub mod database;
pub mod error;
pub mod extract;
pub mod filter;
pub mod limit;
pub mod model;
pub mod settings;
pub mod write;

pub use error::{NeowsError, Result};
