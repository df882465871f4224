//! Carousel paging

use rstest::rstest;

use wildlife_explorer::application::{Carousel, DEFAULT_PAGE_SIZE};

#[test]
fn given_thirteen_entries_when_paging_then_three_pages() {
    // Arrange
    let entries: Vec<usize> = (0..13).collect();
    let mut carousel = Carousel::new(6);

    // Act / Assert
    assert_eq!(carousel.page(&entries), &entries[0..6]);
    assert!(!carousel.can_page_left(entries.len()));
    assert!(carousel.can_page_right(entries.len()));

    assert!(carousel.page_right(entries.len()));
    assert_eq!(carousel.page(&entries), &entries[6..12]);
    assert!(carousel.can_page_right(entries.len()));

    assert!(carousel.page_right(entries.len()));
    assert_eq!(carousel.page(&entries), &entries[12..13]);
    assert!(!carousel.can_page_right(entries.len()));
    assert!(!carousel.page_right(entries.len()));
    assert_eq!(carousel.current_page(), 2);
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(6, 1)]
#[case(7, 2)]
#[case(12, 2)]
#[case(13, 3)]
fn given_entry_count_when_counting_pages_then_ceiling(#[case] len: usize, #[case] pages: usize) {
    assert_eq!(Carousel::new(6).page_count(len), pages);
}

#[test]
fn given_exact_multiple_when_on_last_page_then_cannot_page_right() {
    let mut carousel = Carousel::new(6);
    assert!(carousel.page_right(12));
    assert!(!carousel.can_page_right(12));
}

#[test]
fn given_short_list_when_slotting_then_no_padding() {
    let entries = ["a", "b"];
    let carousel = Carousel::new(6);

    let slots = carousel.slots(&entries);

    assert_eq!(slots, vec![Some(&"a"), Some(&"b")]);
}

#[test]
fn given_last_partial_page_when_slotting_then_padded_to_page_size() {
    let entries: Vec<usize> = (0..8).collect();
    let mut carousel = Carousel::new(6);
    carousel.page_right(entries.len());

    let slots = carousel.slots(&entries);

    assert_eq!(slots.len(), 6);
    assert_eq!(slots[0], Some(&6));
    assert_eq!(slots[1], Some(&7));
    assert!(slots[2..].iter().all(Option::is_none));
}

#[test]
fn given_first_page_when_paging_left_then_noop() {
    let mut carousel = Carousel::default();
    assert_eq!(carousel.page_size(), DEFAULT_PAGE_SIZE);
    assert!(!carousel.page_left(20));
    assert_eq!(carousel.current_page(), 0);
}

#[test]
fn given_zero_page_size_when_creating_then_clamped_to_one() {
    let carousel = Carousel::new(0);
    assert_eq!(carousel.page_size(), 1);
    assert_eq!(carousel.page_count(3), 3);
}
