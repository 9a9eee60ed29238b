// src/tests/window_tests.rs

#![allow(non_snake_case)]

use ::more_asserts::assert_le;
use ::test_case::test_case;

use crate::data::datetime::{DateTimeU, DurationU};
use crate::data::window::SlidingWindow;
use crate::tests::common::DT_BASE;

// -------------------------------------------------------------------------------------------------

fn new_window_10s() -> SlidingWindow {
    SlidingWindow::new(DurationU::seconds(10))
}

/// record matches at the passed second offsets from the baseline; assert
/// the count remaining in the window after the last record
#[test_case(&[0], 1; "single")]
#[test_case(&[0, 1, 2, 3, 4], 5; "burst within window")]
#[test_case(&[0, 5, 10], 3; "age exactly at span is kept")]
#[test_case(&[0, 11], 1; "stale entry evicted")]
#[test_case(&[0, 1, 12, 13], 2; "two stale entries evicted")]
#[test_case(&[0, 20, 40], 1; "repeated eviction")]
#[test_case(&[0, 9, 18, 27], 2; "rolling overlap")]
fn test_SlidingWindow_record_len(
    offsets_s: &[i64],
    len_expect: usize,
) {
    let mut window = new_window_10s();
    for offset in offsets_s.iter() {
        window.record(*DT_BASE + DurationU::seconds(*offset));
    }
    assert_eq!(
        len_expect,
        window.len(),
        "Expected {} entries in the window after offsets {:?}, found {}",
        len_expect,
        offsets_s,
        window.len()
    );
}

#[test]
fn test_SlidingWindow_trim_invariant_and_order() {
    let mut window = new_window_10s();
    let offsets_s: &[i64] = &[0, 1, 3, 9, 11, 12, 25, 26, 27, 40];
    for offset in offsets_s.iter() {
        let now: DateTimeU = *DT_BASE + DurationU::seconds(*offset);
        window.record(now);
        // every remaining entry is within the span, oldest first
        let mut previous: Option<DateTimeU> = None;
        for event in window.iter() {
            assert_le!(
                now.signed_duration_since(*event),
                window.span(),
                "entry older than the window span after record at offset {}",
                offset
            );
            if let Some(previous_) = previous {
                assert_le!(previous_, *event, "entries out of order");
            }
            previous = Some(*event);
        }
    }
}

#[test]
fn test_SlidingWindow_trim_without_record() {
    let mut window = new_window_10s();
    window.record(*DT_BASE);
    window.record(*DT_BASE + DurationU::seconds(2));
    assert_eq!(2, window.len());
    // a later "now" expires entries without recording anything
    window.trim(*DT_BASE + DurationU::seconds(11));
    assert_eq!(1, window.len());
    window.trim(*DT_BASE + DurationU::seconds(13));
    assert!(window.is_empty());
}

#[test]
fn test_SlidingWindow_newest_oldest() {
    let mut window = new_window_10s();
    assert_eq!(None, window.newest());
    assert_eq!(None, window.oldest());
    window.record(*DT_BASE);
    window.record(*DT_BASE + DurationU::seconds(4));
    assert_eq!(Some(*DT_BASE), window.oldest());
    assert_eq!(Some(*DT_BASE + DurationU::seconds(4)), window.newest());
}

#[test]
fn test_SlidingWindow_clear() {
    let mut window = new_window_10s();
    window.record(*DT_BASE);
    window.record(*DT_BASE + DurationU::seconds(1));
    window.clear();
    assert!(window.is_empty());
    assert_eq!(None, window.newest());
}

#[test]
#[should_panic]
fn test_SlidingWindow_zero_span_panics() {
    SlidingWindow::new(DurationU::zero());
}
