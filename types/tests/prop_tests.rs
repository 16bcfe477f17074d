use proptest::prelude::*;

use eco_types::{TokenAmount, Timestamp};

proptest! {
    /// checked_add never silently wraps.
    #[test]
    fn token_amount_checked_add(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let sum = TokenAmount::new(a).checked_add(TokenAmount::new(b));
        match a.checked_add(b) {
            Some(expected) => prop_assert_eq!(sum, Some(TokenAmount::new(expected))),
            None => prop_assert_eq!(sum, None),
        }
    }

    /// checked_sub returns None exactly when the result would go negative.
    #[test]
    fn token_amount_checked_sub(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let diff = TokenAmount::new(a).checked_sub(TokenAmount::new(b));
        prop_assert_eq!(diff.is_some(), a >= b);
    }

    /// Credit and debit deltas are exact negations for amounts in range.
    #[test]
    fn token_amount_delta_signs(raw in 0u64..(i64::MAX as u64)) {
        let amount = TokenAmount::new(raw);
        prop_assert_eq!(amount.as_credit(), -(amount.as_debit()));
        prop_assert!(amount.as_credit() >= 0);
        prop_assert!(amount.as_debit() <= 0);
    }

    /// Timestamp ordering matches the underlying seconds.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }
}
