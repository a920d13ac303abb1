//! Entity normalization
//!
//! The service returns ordered sequences; downstream consumers want O(1)
//! lookup by id. A duplicate id in a listing is a data-integrity smell,
//! not a fatal condition: the later occurrence wins and a warning is
//! logged.

use std::collections::HashMap;

use flowgate::{EntityId, Identified};
use tracing::warn;

/// Convert an entity sequence into an id-keyed map
pub fn index_by_id<T: Identified>(items: Vec<T>) -> HashMap<EntityId, T> {
    let mut map = HashMap::with_capacity(items.len());

    for item in items {
        let id = item.id();
        if map.insert(id, item).is_some() {
            warn!(id, "duplicate entity id in listing, keeping the later one");
        }
    }

    map
}
