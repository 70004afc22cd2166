//! Pure aggregation helpers behind the listing and detail views
//!
//! Nothing in here touches the database; every function takes the rows and
//! the evaluation time explicitly.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::{Area, AreaVenue};
use crate::time::is_upcoming;

/// Split `items` into (upcoming, past), preserving input order within each side
pub fn partition_by_time<T, F>(
    items: impl IntoIterator<Item = T>,
    start_time: F,
    now: &DateTime<Utc>,
) -> (Vec<T>, Vec<T>)
where
    F: Fn(&T) -> DateTime<Utc>,
{
    items
        .into_iter()
        .partition(|item| is_upcoming(&start_time(item), now))
}

/// Count upcoming items per key
///
/// Keys with no upcoming items are absent from the map.
pub fn upcoming_counts<T, K, S>(
    items: &[T],
    key: K,
    start_time: S,
    now: &DateTime<Utc>,
) -> HashMap<i64, usize>
where
    K: Fn(&T) -> i64,
    S: Fn(&T) -> DateTime<Utc>,
{
    let mut counts = HashMap::new();
    for item in items {
        if is_upcoming(&start_time(item), now) {
            *counts.entry(key(item)).or_insert(0) += 1;
        }
    }
    counts
}

/// Group venues by (city, state)
///
/// Groups appear in order of first appearance in the input; venues keep their
/// input order within a group.
pub fn group_by_area(venues: impl IntoIterator<Item = (String, String, AreaVenue)>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for (city, state, venue) in venues {
        match index.get(&(city.clone(), state.clone())) {
            Some(&i) => areas[i].venues.push(venue),
            None => {
                index.insert((city.clone(), state.clone()), areas.len());
                areas.push(Area {
                    city,
                    state,
                    venues: vec![venue],
                });
            }
        }
    }

    areas
}
