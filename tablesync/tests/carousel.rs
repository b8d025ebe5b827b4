use tablesync::carousel::{CarouselWrap, RowCarousel};
use tablesync::table::TableRow;

#[derive(Debug, Clone, PartialEq)]
struct Lead {
    id: String,
}

impl Lead {
    fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl TableRow for Lead {
    fn id(&self) -> String {
        self.id.clone()
    }
}

fn leads(ids: &[&str]) -> Vec<Lead> {
    ids.iter().map(|id| Lead::new(id)).collect()
}

#[test]
fn test_open_at_resolves_by_identity() {
    let rows = leads(&["a", "b", "c"]);
    let mut carousel = RowCarousel::new(CarouselWrap::Clamp);

    carousel.open_at("b", &rows);
    assert!(carousel.is_open());
    assert_eq!(carousel.index(), 1);
    assert_eq!(carousel.current(&rows), Some(&rows[1]));
}

#[test]
fn test_open_at_unknown_id_lands_on_first_row() {
    let rows = leads(&["a", "b"]);
    let mut carousel = RowCarousel::new(CarouselWrap::Clamp);
    carousel.open_at("ghost", &rows);
    assert_eq!(carousel.index(), 0);
}

#[test]
fn test_wraparound_past_the_end() {
    let rows = leads(&["a", "b", "c", "d", "e"]);
    let mut carousel = RowCarousel::new(CarouselWrap::Wrap);

    carousel.open_at("e", &rows);
    assert_eq!(carousel.index(), 4);
    assert_eq!(carousel.next(&rows), 0);

    assert_eq!(carousel.prev(&rows), 4);
}

#[test]
fn test_clamp_stops_at_the_ends() {
    let rows = leads(&["a", "b", "c", "d", "e"]);
    let mut carousel = RowCarousel::new(CarouselWrap::Clamp);

    carousel.open_at("e", &rows);
    assert_eq!(carousel.next(&rows), 4);

    carousel.open_at("a", &rows);
    assert_eq!(carousel.prev(&rows), 0);
}

#[test]
fn test_empty_collection_is_a_noop() {
    let rows: Vec<Lead> = Vec::new();
    let mut carousel = RowCarousel::new(CarouselWrap::Wrap);

    carousel.open_at("a", &rows);
    assert_eq!(carousel.index(), 0);
    assert_eq!(carousel.next(&rows), 0);
    assert_eq!(carousel.prev(&rows), 0);
    assert_eq!(carousel.current(&rows), None);
}

#[test]
fn test_refilter_re_resolves_to_a_valid_index() {
    let rows = leads(&["a", "b", "c", "d", "e"]);
    let mut carousel = RowCarousel::new(CarouselWrap::Clamp);
    carousel.open_at("e", &rows);

    // The open row disappears from the collection between calls.
    let filtered = leads(&["a", "b"]);
    let index = carousel.next(&filtered);
    assert!(index < filtered.len());
    assert!(carousel.current(&filtered).is_some());
}

#[test]
fn test_close_keeps_navigation_state() {
    let rows = leads(&["a", "b", "c"]);
    let mut carousel = RowCarousel::new(CarouselWrap::Clamp);
    carousel.open_at("c", &rows);
    carousel.close();
    assert!(!carousel.is_open());

    carousel.open_at("b", &rows);
    assert_eq!(carousel.index(), 1);
}
