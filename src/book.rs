use std::fmt;

use tracing::{debug, error, trace, warn};

use crate::config::{BookConfig, ViolationPolicy};
use crate::error::{BookError, InvariantError};
use crate::index::OrderIndex;
use crate::models::{
    BestQuote, BookDepth, BookEvent, Order, OrderId, Price, Qty, Side, Trade,
};
use crate::side::SideStore;

/// The live resting orders of a single instrument.
///
/// Each side keeps its orders in a bounded array sorted by price-time
/// priority, and caches its best quote so that [`best_bid`] and
/// [`best_ask`] never scan. Executions are not computed here: fills arrive
/// from the feed through [`trade`].
///
/// [`best_bid`]: #method.best_bid
/// [`best_ask`]: #method.best_ask
/// [`trade`]: #method.trade
#[derive(Debug)]
pub struct Book {
    bids: SideStore,
    asks: SideStore,
    index: OrderIndex,
    policy: ViolationPolicy,
    last_trade: Option<Trade>,
    traded_volume: u64,
    track_stats: bool,
}

impl Default for Book {
    fn default() -> Self {
        Self::with_config(BookConfig::default())
    }
}

impl Book {
    /// Creates a book holding at most `capacity` live orders per side.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(BookConfig::new(capacity))
    }

    pub fn with_config(config: BookConfig) -> Self {
        Self {
            bids: SideStore::new(Side::Bid, config.capacity),
            asks: SideStore::new(Side::Ask, config.capacity),
            index: OrderIndex::new(2 * config.capacity),
            policy: config.on_violation,
            last_trade: None,
            traded_volume: 0,
            track_stats: false,
        }
    }

    #[inline(always)]
    pub fn best_bid(&self) -> Option<BestQuote> {
        self.bids.best()
    }

    #[inline(always)]
    pub fn best_ask(&self) -> Option<BestQuote> {
        self.asks.best()
    }

    #[inline(always)]
    pub fn best(&self, side: Side) -> Option<BestQuote> {
        self.store(side).best()
    }

    /// Difference between the best ask and the best bid. `None` when a side
    /// is empty or the feed left the book crossed.
    #[inline(always)]
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(b), Some(a)) if a.price >= b.price => Some(a.price - b.price),
            _ => None,
        }
    }

    /// Total quantity resting at exactly `price` on `side`.
    pub fn depth_at(&self, side: Side, price: Price) -> Qty {
        self.store(side).depth_at(price)
    }

    pub fn depth(&self, levels: usize) -> BookDepth {
        BookDepth {
            levels,
            asks: self.asks.levels(levels),
            bids: self.bids.levels(levels),
        }
    }

    /// The live orders of one side, from the worst price to the best. Within
    /// a price the order next in line to trade comes last.
    #[inline(always)]
    pub fn orders(&self, side: Side) -> &[Order] {
        self.store(side).orders()
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        let (side, pos) = self.locate(id).ok()?;
        Some(self.store(side).get(pos))
    }

    pub fn total_qty(&self, side: Side) -> Qty {
        self.store(side).total_qty()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of live orders on each side.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.bids.capacity()
    }

    pub fn track_stats(&mut self, track: bool) {
        self.track_stats = track;
    }

    #[inline(always)]
    pub fn last_trade(&self) -> Option<Trade> {
        self.last_trade
    }

    #[inline(always)]
    pub fn traded_volume(&self) -> u64 {
        self.traded_volume
    }

    pub fn apply(&mut self, event: BookEvent) -> Result<(), BookError> {
        match event {
            BookEvent::Add {
                id,
                side,
                price,
                qty,
            } => self.add(id, side, price, qty),
            BookEvent::Cancel(id) => self.cancel(id),
            BookEvent::Modify { id, qty } => self.modify(id, qty),
            BookEvent::Trade { id, qty } => self.trade(id, qty),
        }
    }

    /// Admits a new order. It joins the back of the queue at its price.
    pub fn add(
        &mut self,
        id: OrderId,
        side: Side,
        price: Price,
        qty: Qty,
    ) -> Result<(), BookError> {
        let result = self.try_add(id, side, price, qty);
        self.enforce(result)
    }

    pub fn add_order(&mut self, order: Order) -> Result<(), BookError> {
        self.add(order.id, order.side, order.price, order.qty)
    }

    /// Removes a live order.
    pub fn cancel(&mut self, id: OrderId) -> Result<(), BookError> {
        let result = self.try_cancel(id);
        self.enforce(result)
    }

    /// Sets the resting quantity of a live order. A decrease keeps the
    /// order's place in the queue, an increase sends it to the back of the
    /// queue at its price.
    pub fn modify(&mut self, id: OrderId, qty: Qty) -> Result<(), BookError> {
        let result = self.try_modify(id, qty);
        self.enforce(result)
    }

    /// Applies a fill reported by the feed. A fill of the whole remaining
    /// quantity removes the order.
    pub fn trade(&mut self, id: OrderId, qty: Qty) -> Result<(), BookError> {
        let result = self.try_trade(id, qty);
        self.enforce(result)
    }

    /// Checks the ordering of both sides, the cached best quotes and the
    /// order index against the stored orders.
    pub fn validate(&self) -> Result<(), InvariantError> {
        self.bids.validate()?;
        self.asks.validate()?;
        for store in &[&self.bids, &self.asks] {
            for (slot, order) in store.orders().iter().enumerate() {
                let indexed = self.index.get(order.id);
                if order.side != store.side()
                    || indexed != Some((order.side, order.price))
                    || store.position(order.id, order.price) != Some(slot)
                {
                    return Err(InvariantError::IndexMismatch { id: order.id });
                }
            }
        }
        for (id, side, price) in self.index.iter() {
            if self.store(side).position(id, price).is_none() {
                return Err(InvariantError::IndexMismatch { id });
            }
        }
        Ok(())
    }

    /// Logs the full content of the book at debug level.
    pub fn dump(&self) {
        debug!("{}", self);
    }

    fn try_add(
        &mut self,
        id: OrderId,
        side: Side,
        price: Price,
        qty: Qty,
    ) -> Result<(), BookError> {
        if qty == 0 {
            return Err(BookError::ZeroQuantity { id });
        }
        if self.index.contains(id) {
            return Err(BookError::DuplicateOrder { id });
        }
        let store = self.store_mut(side);
        if store.is_full() {
            return Err(BookError::CapacityExceeded {
                side,
                capacity: store.capacity(),
            });
        }
        if store.depth_at(price).checked_add(qty).is_none() {
            return Err(BookError::QuantityOverflow { id });
        }
        let pos = store.insert(Order::new(id, side, price, qty));
        self.index.insert(id, side, price);
        trace!(%id, %side, price, qty, pos, "order added");
        Ok(())
    }

    fn try_cancel(&mut self, id: OrderId) -> Result<(), BookError> {
        let (side, pos) = self.locate(id)?;
        let order = self.remove_at(side, pos);
        trace!(%id, %side, price = order.price, qty = order.qty, "order canceled");
        Ok(())
    }

    fn try_modify(&mut self, id: OrderId, qty: Qty) -> Result<(), BookError> {
        if qty == 0 {
            return Err(BookError::ZeroQuantity { id });
        }
        let (side, pos) = self.locate(id)?;
        let store = self.store_mut(side);
        let Order {
            price, qty: old, ..
        } = *store.get(pos);
        if (store.depth_at(price) - old).checked_add(qty).is_none() {
            return Err(BookError::QuantityOverflow { id });
        }
        let pos = if qty > old { store.requeue(pos) } else { pos };
        store.set_qty(pos, qty);
        trace!(%id, %side, old, qty, pos, "order modified");
        Ok(())
    }

    fn try_trade(&mut self, id: OrderId, qty: Qty) -> Result<(), BookError> {
        let (side, pos) = self.locate(id)?;
        let order = *self.store(side).get(pos);
        if qty == 0 {
            return Ok(());
        }
        if qty > order.qty {
            return Err(BookError::OverFill {
                id,
                resting: order.qty,
                requested: qty,
            });
        }
        if qty == order.qty {
            self.remove_at(side, pos);
        } else {
            self.store_mut(side).set_qty(pos, order.qty - qty);
        }
        if self.track_stats {
            self.traded_volume = self.traded_volume.saturating_add(qty);
            self.last_trade = Some(Trade {
                side,
                price: order.price,
                qty,
            });
        }
        trace!(%id, %side, price = order.price, qty, remaining = order.qty - qty, "order traded");
        Ok(())
    }

    fn remove_at(&mut self, side: Side, pos: usize) -> Order {
        let order = self.store_mut(side).remove(pos);
        self.index.remove(order.id);
        order
    }

    fn locate(&self, id: OrderId) -> Result<(Side, usize), BookError> {
        let (side, price) =
            self.index.get(id).ok_or(BookError::UnknownOrder { id })?;
        let pos = self
            .store(side)
            .position(id, price)
            .ok_or(BookError::UnknownOrder { id })?;
        Ok((side, pos))
    }

    fn enforce(&self, result: Result<(), BookError>) -> Result<(), BookError> {
        let err = match result {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        match self.policy {
            ViolationPolicy::Propagate => Err(err),
            ViolationPolicy::Halt => {
                error!(%err, "feed integrity violation");
                panic!("feed integrity violation: {}", err);
            }
            ViolationPolicy::DropAndLog => {
                warn!(%err, "dropping event");
                Ok(())
            }
        }
    }

    #[inline(always)]
    fn store(&self, side: Side) -> &SideStore {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    #[inline(always)]
    fn store_mut(&mut self, side: Side) -> &mut SideStore {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order book:")?;
        for (name, store) in &[("Asks", &self.asks), ("Bids", &self.bids)] {
            writeln!(f, "    {}:", name)?;
            if store.len() == 0 {
                writeln!(f, "        <None>")?;
            }
            for (slot, order) in store.orders().iter().enumerate() {
                writeln!(f, "        [{:03}] {}", slot, order)?;
            }
        }
        Ok(())
    }
}
