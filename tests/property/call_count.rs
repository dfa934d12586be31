use proptest::prelude::*;
use proxymock::{it, MockError};

use crate::utils::{calls, recorder};

proptest! {
    #[test]
    fn test_call_count_matches_filtered_invocations(
        invocations in calls(40),
        threshold in -50i32..50,
    ) {
        let mock = recorder();
        for (id, tag, flag) in &invocations {
            mock.object().record(*id, tag.clone(), *flag);
        }

        let expected = invocations
            .iter()
            .filter(|(id, _, flag)| *id >= threshold && *flag)
            .count();
        let counted = mock
            .call_count(|r| r.record(it::is(move |id: &i32| *id >= threshold), it::is_any(), true))
            .unwrap();
        prop_assert_eq!(counted, expected);

        let all = mock
            .call_count(|r| r.record(it::is_any(), it::is_any(), it::is_any()))
            .unwrap();
        prop_assert_eq!(all, invocations.len());
    }

    #[test]
    fn test_call_parameters_return_the_kth_match(invocations in calls(40)) {
        let mock = recorder();
        for (id, tag, flag) in &invocations {
            mock.object().record(*id, tag.clone(), *flag);
        }

        let matching: Vec<_> = invocations.iter().filter(|(_, tag, _)| tag == "a").collect();
        for (k, (id, tag, flag)) in matching.iter().enumerate() {
            let params = mock
                .call_parameters(|r| r.record(it::is_any(), "a", it::is_any()), k)
                .unwrap();
            prop_assert_eq!(params.get::<i32>(0), Some(id));
            prop_assert_eq!(params.get::<String>(1), Some(tag));
            prop_assert_eq!(params.get::<bool>(2), Some(flag));
        }

        let past_end = mock.call_parameters(|r| r.record(it::is_any(), "a", it::is_any()), matching.len());
        prop_assert_eq!(
            past_end.unwrap_err(),
            MockError::IndexOutOfRange { index: matching.len(), count: matching.len() }
        );
    }

    #[test]
    fn test_property_writes_are_counted_by_value(writes in prop::collection::vec(-3i64..3, 0..30)) {
        let mock = recorder();
        for level in &writes {
            mock.object().set_level(*level);
        }

        prop_assert_eq!(mock.set_call_count(|r| r.level(), it::is_any()).unwrap(), writes.len());
        let zeros = writes.iter().filter(|level| **level == 0).count();
        prop_assert_eq!(mock.set_call_count(|r| r.level(), 0i64).unwrap(), zeros);
    }
}
