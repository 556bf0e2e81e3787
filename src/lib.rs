//! A bounded limit order book state tracker.
//!
//! [`Book`] keeps the live resting orders of one instrument in price-time
//! priority and serves the best bid and ask from a cache that is updated
//! incrementally by every event. It does not match orders: executions are
//! reported by the feed through [`Book::trade`].
//!
//! ```
//! use lobster_tracker::{BestQuote, Book, Side};
//!
//! let mut book = Book::new(100);
//! book.add(1, Side::Ask, 102, 5).unwrap();
//! book.add(2, Side::Ask, 101, 3).unwrap();
//! book.add(3, Side::Ask, 101, 4).unwrap();
//! assert_eq!(book.best_ask(), Some(BestQuote { price: 101, qty: 7 }));
//!
//! book.trade(2, 3).unwrap();
//! assert_eq!(book.best_ask(), Some(BestQuote { price: 101, qty: 4 }));
//! assert_eq!(book.depth_at(Side::Ask, 102), 5);
//! ```
//!
//! [`Book`]: struct.Book.html
//! [`Book::trade`]: struct.Book.html#method.trade

mod book;
mod config;
mod error;
mod index;
mod models;
mod side;

pub use book::Book;
pub use config::{BookConfig, ViolationPolicy, DEFAULT_CAPACITY};
pub use error::{BookError, InvariantError};
pub use models::{
    BestQuote, BookDepth, BookEvent, BookLevel, Order, OrderId, Price, Qty,
    Side, Trade,
};
