use proptest::prelude::*;
use proxymock::it;

use crate::utils::{call_args, recorder};

proptest! {
    #[test]
    fn test_first_matching_setup_answers(
        (id, tag, flag) in call_args(),
        cutoffs in prop::collection::vec(-50i32..50, 1..6),
    ) {
        let mock = recorder();
        for (position, cutoff) in cutoffs.iter().copied().enumerate() {
            mock.setup(|r| r.record(it::is(move |id: &i32| *id < cutoff), it::is_any(), it::is_any()))
                .unwrap()
                .returns(position as u32 + 1);
        }

        let expected = cutoffs
            .iter()
            .position(|cutoff| id < *cutoff)
            .map_or(0, |position| position as u32 + 1);
        prop_assert_eq!(mock.object().record(id, tag, flag), expected);
    }

    #[test]
    fn test_unconfigured_calls_are_neutral((id, tag, flag) in call_args()) {
        let mock = recorder();
        prop_assert_eq!(mock.object().record(id, tag, flag), 0);
        prop_assert_eq!(mock.object().level(), 0);
    }
}
