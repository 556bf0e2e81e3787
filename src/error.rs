use custom_error::custom_error;

use crate::models::{OrderId, Qty, Side};

custom_error! {
    /// A feed event that violates a precondition of the book. The book is
    /// left untouched whenever one of these is reported.
    #[derive(Clone, PartialEq)]
    pub BookError
    UnknownOrder{id: OrderId} = "no live order with id {id}",
    DuplicateOrder{id: OrderId} = "order {id} is already live",
    CapacityExceeded{side: Side, capacity: usize} =
        "{side} side is full ({capacity} live orders)",
    OverFill{id: OrderId, resting: Qty, requested: Qty} =
        "trade of {requested} exceeds the {resting} resting on order {id}",
    ZeroQuantity{id: OrderId} = "zero quantity for order {id}",
    QuantityOverflow{id: OrderId} =
        "order {id} would overflow the quantity of its price level",
    MalformedSide{value: String} = "malformed side '{value}'",
}

custom_error! {
    /// An internal consistency check of the book that did not hold.
    #[derive(Clone, PartialEq)]
    pub InvariantError
    Unsorted{side: Side, position: usize} =
        "{side} prices out of order at slot {position}",
    NonPositiveQuantity{id: OrderId} = "order {id} rests with zero quantity",
    BestQuoteMismatch{side: Side} =
        "{side} best quote does not match the tail price level",
    IndexMismatch{id: OrderId} = "order index is out of sync for order {id}",
}
