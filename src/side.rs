use crate::error::InvariantError;
use crate::models::{BestQuote, BookLevel, Order, OrderId, Price, Qty, Side};

/// Bounded storage for the live orders of one side of the book.
///
/// Orders are kept sorted from the worst price at the front to the best
/// price at the back (ascending for bids, descending for asks), so the tail
/// slot always holds the best price. Inside a price run the oldest order
/// sits nearest the tail and new arrivals join at the head of the run.
///
/// The best quote is cached together with the number of orders resting at
/// that price and updated incrementally by every mutation.
#[derive(Debug)]
pub(crate) struct SideStore {
    side: Side,
    orders: Vec<Order>,
    capacity: usize,
    best: Option<BestQuote>,
    best_orders: usize,
}

impl SideStore {
    pub fn new(side: Side, capacity: usize) -> Self {
        Self {
            side,
            orders: Vec::with_capacity(capacity),
            capacity,
            best: None,
            best_orders: 0,
        }
    }

    #[inline(always)]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline(always)]
    pub fn best(&self) -> Option<BestQuote> {
        self.best
    }

    #[cfg(test)]
    pub fn best_orders(&self) -> usize {
        self.best_orders
    }

    #[inline(always)]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.orders.len() >= self.capacity
    }

    #[inline(always)]
    pub fn get(&self, pos: usize) -> &Order {
        &self.orders[pos]
    }

    /// First slot whose price is not strictly worse than `price`. This is
    /// the head of the run at `price` when there is one, and the insertion
    /// point of a new level otherwise.
    #[inline]
    fn run_start(&self, price: Price) -> usize {
        let side = self.side;
        self.orders
            .partition_point(|o| side.is_better(price, o.price))
    }

    fn run(&self, price: Price) -> (usize, &[Order]) {
        let start = self.run_start(price);
        let len = self.orders[start..]
            .iter()
            .take_while(|o| o.price == price)
            .count();
        (start, &self.orders[start..start + len])
    }

    /// Slot of the order with the given ID, searched within its price run.
    pub fn position(&self, id: OrderId, price: Price) -> Option<usize> {
        let (start, run) = self.run(price);
        run.iter().position(|o| o.id == id).map(|i| start + i)
    }

    pub fn depth_at(&self, price: Price) -> Qty {
        self.run(price)
            .1
            .iter()
            .fold(0, |qty: Qty, o| qty.saturating_add(o.qty))
    }

    pub fn total_qty(&self) -> Qty {
        self.orders
            .iter()
            .fold(0, |qty: Qty, o| qty.saturating_add(o.qty))
    }

    /// Inserts a new order at the head of its price run and returns its
    /// slot. The caller guarantees there is room left and that the level
    /// total fits in a `Qty`.
    pub fn insert(&mut self, order: Order) -> usize {
        debug_assert!(!self.is_full());
        let pos = self.run_start(order.price);
        self.orders.insert(pos, order);

        match self.best {
            None => self.set_best(order.price, order.qty, 1),
            Some(best) if best.price == order.price => {
                self.set_best(best.price, best.qty + order.qty, self.best_orders + 1)
            }
            Some(best) if self.side.is_better(order.price, best.price) => {
                // Nothing else can rest at a price better than the old best.
                self.set_best(order.price, order.qty, 1)
            }
            Some(_) => {}
        }
        pos
    }

    /// Removes the order at `pos`, closing the gap.
    pub fn remove(&mut self, pos: usize) -> Order {
        let order = self.orders.remove(pos);
        if let Some(best) = self.best {
            if best.price == order.price {
                if self.best_orders == 1 {
                    self.recompute_best();
                } else {
                    self.set_best(
                        best.price,
                        best.qty - order.qty,
                        self.best_orders - 1,
                    );
                }
            }
        }
        order
    }

    /// Overwrites the quantity of the order at `pos` in place and returns
    /// the previous quantity.
    pub fn set_qty(&mut self, pos: usize, qty: Qty) -> Qty {
        let order = &mut self.orders[pos];
        let old = order.qty;
        let price = order.price;
        order.qty = qty;
        if let Some(best) = self.best {
            if best.price == price {
                self.set_best(price, best.qty - old + qty, self.best_orders);
            }
        }
        old
    }

    /// Moves the order at `pos` to the head of its price run, behind every
    /// other order at that price, and returns its new slot.
    pub fn requeue(&mut self, pos: usize) -> usize {
        let head = self.run_start(self.orders[pos].price);
        self.orders[head..=pos].rotate_right(1);
        head
    }

    /// Best-first aggregated levels, at most `levels` of them.
    pub fn levels(&self, levels: usize) -> Vec<BookLevel> {
        let mut out: Vec<BookLevel> =
            Vec::with_capacity(levels.min(self.orders.len()));
        for order in self.orders.iter().rev() {
            if let Some(level) = out.last_mut() {
                if level.price == order.price {
                    level.qty += order.qty;
                    continue;
                }
            }
            if out.len() == levels {
                break;
            }
            out.push(BookLevel {
                price: order.price,
                qty: order.qty,
            });
        }
        out
    }

    pub fn validate(&self) -> Result<(), InvariantError> {
        for (i, pair) in self.orders.windows(2).enumerate() {
            if self.side.is_better(pair[0].price, pair[1].price) {
                return Err(InvariantError::Unsorted {
                    side: self.side,
                    position: i + 1,
                });
            }
        }
        if let Some(order) = self.orders.iter().find(|o| o.qty == 0) {
            return Err(InvariantError::NonPositiveQuantity { id: order.id });
        }
        let cached = self.best.map(|best| (best, self.best_orders));
        if cached != self.tail_level() {
            return Err(InvariantError::BestQuoteMismatch { side: self.side });
        }
        Ok(())
    }

    #[inline]
    fn set_best(&mut self, price: Price, qty: Qty, orders: usize) {
        self.best = Some(BestQuote { price, qty });
        self.best_orders = orders;
    }

    fn recompute_best(&mut self) {
        match self.tail_level() {
            Some((best, orders)) => self.set_best(best.price, best.qty, orders),
            None => {
                self.best = None;
                self.best_orders = 0;
            }
        }
    }

    /// The tail price run, summed from scratch.
    fn tail_level(&self) -> Option<(BestQuote, usize)> {
        let price = self.orders.last()?.price;
        let (qty, orders) = self
            .orders
            .iter()
            .rev()
            .take_while(|o| o.price == price)
            .fold((0, 0), |(qty, n): (Qty, usize), o| {
                (qty.saturating_add(o.qty), n + 1)
            });
        Some((BestQuote { price, qty }, orders))
    }
}
