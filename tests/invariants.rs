//! Property tests: random feeds, including invalid events, must never break
//! the ordering of a side, its cached best quote or the order index.

use lobster_tracker::{Book, BookEvent, Side};
use proptest::prelude::*;

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Bid), Just(Side::Ask)]
}

/// A small id and price space so that events frequently hit live orders,
/// shared price levels and full sides.
fn arb_event() -> impl Strategy<Value = BookEvent> {
    prop_oneof![
        4 => (0u128..24, arb_side(), 95u64..105, 1u64..40).prop_map(
            |(id, side, price, qty)| BookEvent::Add {
                id,
                side,
                price,
                qty,
            }
        ),
        1 => (0u128..24).prop_map(BookEvent::Cancel),
        2 => (0u128..24, 0u64..50)
            .prop_map(|(id, qty)| BookEvent::Modify { id, qty }),
        2 => (0u128..24, 0u64..50)
            .prop_map(|(id, qty)| BookEvent::Trade { id, qty }),
    ]
}

fn ids(ob: &Book, side: Side) -> Vec<u128> {
    ob.orders(side).iter().map(|o| o.id).collect()
}

fn event_id(event: &BookEvent) -> u128 {
    match *event {
        BookEvent::Add { id, .. } => id,
        BookEvent::Cancel(id) => id,
        BookEvent::Modify { id, .. } => id,
        BookEvent::Trade { id, .. } => id,
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_event(
        events in prop::collection::vec(arb_event(), 1..300)
    ) {
        let mut ob = Book::new(10);
        for event in events {
            let target = ob.order(event_id(&event)).copied();
            let totals = (ob.total_qty(Side::Bid), ob.total_qty(Side::Ask));
            let before = ob.to_string();

            let result = ob.apply(event);
            prop_assert_eq!(ob.validate(), Ok(()));

            if result.is_err() {
                prop_assert_eq!(ob.to_string(), before);
                continue;
            }
            let side = match (event, target) {
                (BookEvent::Add { side, .. }, _) => side,
                (_, Some(order)) => order.side,
                _ => unreachable!("event on an unknown order was accepted"),
            };
            let (total_before, total_after) = match side {
                Side::Bid => (totals.0, ob.total_qty(Side::Bid)),
                Side::Ask => (totals.1, ob.total_qty(Side::Ask)),
            };
            match event {
                BookEvent::Add { qty, .. } => {
                    prop_assert_eq!(total_after, total_before + qty);
                }
                BookEvent::Cancel(_) | BookEvent::Trade { .. } => {
                    prop_assert!(total_after <= total_before);
                }
                BookEvent::Modify { qty, .. } => {
                    let old = target.map(|o| o.qty).unwrap_or_default();
                    prop_assert_eq!(total_after + old, total_before + qty);
                }
            }
        }
    }

    #[test]
    fn modify_priority(
        events in prop::collection::vec(arb_event(), 1..200),
        pick in any::<prop::sample::Index>(),
        qty in 1u64..60,
    ) {
        let mut ob = Book::new(32);
        for event in events {
            let _ = ob.apply(event);
        }
        let side = if ob.orders(Side::Bid).is_empty() { Side::Ask } else { Side::Bid };
        prop_assume!(!ob.orders(side).is_empty());

        let target = ob.orders(side)[pick.index(ob.orders(side).len())];
        let before = ids(&ob, side);
        ob.modify(target.id, qty).unwrap();
        let after = ids(&ob, side);

        if qty <= target.qty {
            prop_assert_eq!(after, before);
        } else {
            let head = ob
                .orders(side)
                .iter()
                .position(|o| o.price == target.price)
                .unwrap();
            prop_assert_eq!(after[head], target.id);
            let others = |v: &[u128]| -> Vec<u128> {
                v.iter().copied().filter(|id| *id != target.id).collect()
            };
            prop_assert_eq!(others(&after[..]), others(&before[..]));
        }
        prop_assert_eq!(ob.validate(), Ok(()));
    }
}
