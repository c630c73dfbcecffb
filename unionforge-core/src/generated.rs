//! Generic unions of arity 2 to 15.
//!
//! `UnionN<T1, ..., TN>` holds exactly one value of one of its `N` case
//! types, in variant `CaseK`. Next to the enum every arity gets exhaustive
//! `match_with`/`switch` dispatch, `map` and `bind` transforms (sync, async
//! and on pending futures through the `UnionN*FutureExt` traits), `tap_*`
//! peeks, `partition` and the `UnionNAssertions` test helpers.
//!
//! The sources are produced by the build script.

include!(concat!(env!("OUT_DIR"), "/union.rs"));
include!(concat!(env!("OUT_DIR"), "/extensions/match_extensions.rs"));
include!(concat!(env!("OUT_DIR"), "/extensions/switch_extensions.rs"));
include!(concat!(env!("OUT_DIR"), "/extensions/map_extensions.rs"));
include!(concat!(env!("OUT_DIR"), "/extensions/bind_extensions.rs"));
include!(concat!(env!("OUT_DIR"), "/extensions/tap_extensions.rs"));
include!(concat!(env!("OUT_DIR"), "/collections/partition_extensions.rs"));
include!(concat!(env!("OUT_DIR"), "/test_extensions/test_extensions.rs"));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssertionFailed;
    use std::cell::RefCell;

    type Reading = Union3<u32, String, bool>;

    #[test]
    fn test_construction_and_accessors() {
        let reading = Reading::from_case2("ok".to_string());

        assert_eq!(reading.tag(), 2);
        assert_eq!(reading.case_name(), "Case2");
        assert!(reading.is_case2());
        assert!(!reading.is_case1());
        assert_eq!(reading.try_get_case2().map(String::as_str), Some("ok"));
        assert_eq!(reading.try_get_case3(), None);
        assert_eq!(reading.clone().try_into_case1(), Err(reading));
    }

    #[test]
    fn test_match_and_switch() {
        let reading: Reading = Union3::Case1(21);
        let doubled = reading.clone().match_with(|n| n * 2, |s| s.len() as u32, u32::from);
        assert_eq!(doubled, 42);

        let seen = RefCell::new(Vec::new());
        reading.switch(
            |n| seen.borrow_mut().push(format!("number {n}")),
            |s| seen.borrow_mut().push(s),
            |b| seen.borrow_mut().push(b.to_string()),
        );
        assert_eq!(seen.into_inner(), vec!["number 21".to_string()]);
    }

    #[test]
    fn test_map_changes_case_types() {
        let reading: Reading = Union3::Case3(true);
        let mapped: Union3<u64, usize, &str> = reading.map(
            u64::from,
            |s| s.len(),
            |b| if b { "yes" } else { "no" },
        );
        assert_eq!(mapped, Union3::Case3("yes"));

        let other: Reading = Union3::Case1(5);
        assert_eq!(other.map_case2(|s| s.len()), Union3::Case1(5));
    }

    #[test]
    fn test_bind_rebinds_whole_union() {
        let parse = |s: String| -> Union2<i64, String> {
            match s.parse() {
                Ok(n) => Union2::Case1(n),
                Err(_) => Union2::Case2(s),
            }
        };

        let number: Union2<i64, String> = Union2::Case2("-8".to_string());
        assert_eq!(number.bind_case2(parse), Union2::Case1(-8));

        let word: Union2<i64, String> = Union2::Case2("eight".to_string());
        assert_eq!(word.bind_case2(parse), Union2::Case2("eight".to_string()));
    }

    #[test]
    fn test_tap_and_partition() {
        let mut peeked = 0;
        let value = Union2::<u8, char>::Case1(4).tap_case1(|n| peeked = *n);
        assert_eq!(peeked, 4);
        assert!(value.is_case1());

        let (numbers, letters) = Union2::partition(vec![
            Union2::Case1(1_u8),
            Union2::Case2('a'),
            Union2::Case1(2),
        ]);
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(letters, vec!['a']);
    }

    #[test]
    fn test_assertions() {
        let reading: Reading = Union3::Case1(7);
        assert_eq!(*reading.should_be_case1(), 7);
        assert_eq!(*reading.should_be_case1_eq(&7), 7);

        let wrong_case = AssertionFailed::catch(|| {
            reading.should_be_case3();
        });
        assert_eq!(
            wrong_case,
            Err(AssertionFailed::case_mismatch("Union3", "Case3", "Case1"))
        );

        let wrong_value = AssertionFailed::catch(|| {
            reading.should_be_case1_eq(&8);
        });
        assert_eq!(
            wrong_value,
            Err(AssertionFailed::value_mismatch("Union3", "Case1", &8_u32, &7_u32))
        );
    }

    #[tokio::test]
    async fn test_async_forms() {
        let reading: Reading = Union3::Case2("abc".to_string());
        let length = reading
            .clone()
            .match_async(
                |n| async move { n as usize },
                |s| async move { s.len() },
                |_| async { 0 },
            )
            .await;
        assert_eq!(length, 3);

        let upper = reading
            .map_case2_async(|s| async move { s.to_uppercase() })
            .await;
        assert_eq!(upper, Union3::Case2("ABC".to_string()));
    }

    #[tokio::test]
    async fn test_pending_forms() {
        let pending = async { Union2::<u8, &str>::Case1(3) };
        let text = pending
            .match_with(|n| format!("n={n}"), |s| s.to_string())
            .await;
        assert_eq!(text, "n=3");

        let pending = async { Union2::<u8, &str>::Case2("x") };
        let bound = pending
            .bind(|n| Union2::<u16, &str>::Case1(u16::from(n)), |s| Union2::Case2(s))
            .await;
        assert_eq!(bound, Union2::Case2("x"));
    }
}
