#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

use crate::models::{OrderId, Price, Side};

/// Locates live orders by ID. Only the side and the price are stored: the
/// slot of an order moves every time a neighbour is inserted or removed,
/// while its price run does not, so the run is searched on lookup instead.
#[derive(Debug)]
pub(crate) struct OrderIndex {
    live: HashMap<OrderId, (Side, Price)>,
}

impl OrderIndex {
    pub fn new(capacity: usize) -> Self {
        Self {
            live: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn get(&self, id: OrderId) -> Option<(Side, Price)> {
        self.live.get(&id).copied()
    }

    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn insert(&mut self, id: OrderId, side: Side, price: Price) {
        self.live.insert(id, (side, price));
    }

    pub fn remove(&mut self, id: OrderId) -> bool {
        self.live.remove(&id).is_some()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OrderId, Side, Price)> + '_ {
        self.live
            .iter()
            .map(|(id, (side, price))| (*id, *side, *price))
    }
}
