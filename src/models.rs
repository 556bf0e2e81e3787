use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::BookError;

/// Unique identifier of a live order.
pub type OrderId = u128;
/// Limit price, in ticks.
pub type Price = u64;
/// Order or level quantity.
pub type Qty = u64;

/// An order book side.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    /// The bid (or buy) side.
    Bid,
    /// The ask (or sell) side.
    Ask,
}

impl Side {
    /// Returns `true` if `a` is a strictly more favourable resting price
    /// than `b` on this side (higher for bids, lower for asks).
    #[inline(always)]
    pub fn is_better(self, a: Price, b: Price) -> bool {
        match self {
            Side::Bid => a > b,
            Side::Ask => a < b,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => f.write_str("Bid"),
            Side::Ask => f.write_str("Ask"),
        }
    }
}

impl FromStr for Side {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bid" | "b" | "buy" => Ok(Side::Bid),
            "ask" | "s" | "sell" => Ok(Side::Ask),
            _ => Err(BookError::MalformedSide {
                value: s.to_string(),
            }),
        }
    }
}

/// A live order resting on one side of the book.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Order {
    /// The unique ID of this order.
    pub id: OrderId,
    /// The side this order rests on.
    pub side: Side,
    /// The limit price.
    pub price: Price,
    /// The remaining resting quantity. Always positive while the order is
    /// live.
    pub qty: Qty,
}

impl Order {
    pub fn new(id: OrderId, side: Side, price: Price, qty: Qty) -> Self {
        Self {
            id,
            side,
            price,
            qty,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order(id={},side={},price={},qty={})",
            self.id, self.side, self.price, self.qty
        )
    }
}

/// The most favourable price on one side and the total quantity resting at
/// that price.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BestQuote {
    /// The best price.
    pub price: Price,
    /// The sum of the quantities of all orders resting at `price`.
    pub qty: Qty,
}

/// An event coming from the market data feed. Every variant maps onto one
/// of the mutating operations of [`Book`].
///
/// [`Book`]: struct.Book.html
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BookEvent {
    /// A new order was admitted to the book.
    Add {
        /// The unique ID of the new order.
        id: OrderId,
        /// The side the order rests on.
        side: Side,
        /// The limit price.
        price: Price,
        /// The initial quantity.
        qty: Qty,
    },
    /// The order with the specified ID left the book.
    Cancel(OrderId),
    /// The resting quantity of an order changed. An increase forfeits time
    /// priority, a decrease does not.
    Modify {
        /// The ID of the modified order.
        id: OrderId,
        /// The new resting quantity.
        qty: Qty,
    },
    /// An order was (partially) filled by the venue.
    Trade {
        /// The ID of the resting order that traded.
        id: OrderId,
        /// The traded quantity.
        qty: Qty,
    },
}

/// A snapshot of the order book up to a certain depth level. Multiple orders
/// at the same price points are merged into a single [`BookLevel`] struct.
///
/// [`BookLevel`]: struct.BookLevel.html
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDepth {
    /// The requested level. This field will always contain the level that was
    /// requested, even if some or all levels are empty.
    pub levels: usize,
    /// Price points with the associated quantity on the ask side, best
    /// first.
    pub asks: Vec<BookLevel>,
    /// Price points with the associated quantity on the bid side, best
    /// first.
    pub bids: Vec<BookLevel>,
}

/// A single level in the order book. This struct is used both for the bid and
/// ask side.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BookLevel {
    /// The price point this level represents.
    pub price: Price,
    /// The total quantity of all orders resting at the specified price point.
    pub qty: Qty,
}

/// A fill reported by the feed against a resting order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Trade {
    /// The side of the resting order that traded.
    pub side: Side,
    /// The price of the resting order.
    pub price: Price,
    /// The traded quantity.
    pub qty: Qty,
}
