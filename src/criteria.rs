// used for the date criteria
use chrono::NaiveDate;
use tracing::debug;

use crate::filter::{Attribute, AttributeFilter, Comparator};

/// User supplied search criteria, each one independently optional.
///
/// `None` means "no constraint". In particular `hazardous: Some(false)`
/// asks for objects that are *not* potentially hazardous, while
/// `hazardous: None` does not look at the hazard flag at all.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Criteria {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub velocity_min: Option<f64>,
    pub velocity_max: Option<f64>,
    pub diameter_min: Option<f64>,
    pub diameter_max: Option<f64>,
    pub hazardous: Option<bool>,
}

/// Compiles criteria into one filter per supplied criterion.
///
/// The filters are meant to be combined with logical AND by the database
/// query. Contradictory criteria (an inverted date range, a minimum above
/// the maximum) are not rejected here; they simply match nothing.
pub fn create_filters(criteria: &Criteria) -> Vec<AttributeFilter> {
    let dates = [
        (criteria.date, Comparator::Eq),
        (criteria.start_date, Comparator::Ge),
        (criteria.end_date, Comparator::Le),
    ];
    let measures = [
        (criteria.distance_min, Attribute::Distance, Comparator::Ge),
        (criteria.distance_max, Attribute::Distance, Comparator::Le),
        (criteria.velocity_min, Attribute::Velocity, Comparator::Ge),
        (criteria.velocity_max, Attribute::Velocity, Comparator::Le),
        (criteria.diameter_min, Attribute::Diameter, Comparator::Ge),
        (criteria.diameter_max, Attribute::Diameter, Comparator::Le),
    ];

    let mut filters: Vec<AttributeFilter> = dates
        .into_iter()
        .filter_map(|(date, op)| date.map(|d| AttributeFilter::new(Attribute::Date, op, d)))
        .collect();
    filters.extend(
        measures
            .into_iter()
            .filter_map(|(x, attribute, op)| x.map(|x| AttributeFilter::new(attribute, op, x))),
    );
    if let Some(hazardous) = criteria.hazardous {
        filters.push(AttributeFilter::new(Attribute::Hazardous, Comparator::Eq, hazardous));
    }

    debug!(
        count = filters.len(),
        filters = %filters.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(", "),
        "compiled filters"
    );
    filters
}
