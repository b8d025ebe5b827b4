//! Row carousel: a navigable window over the table's current rows.

use crate::table::TableRow;

/// Navigation behavior at the ends of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarouselWrap {
    /// Stop at the first/last row.
    #[default]
    Clamp,
    /// Wrap around past the ends.
    Wrap,
}

/// Modal navigation state over an externally supplied row collection.
///
/// The carousel never copies row data. It keeps only an index and
/// re-resolves it against the fresh collection passed to every call, so
/// live filter and sort changes are tracked without explicit
/// invalidation. Carousel state is deliberately not persisted to the
/// query string.
#[derive(Debug, Clone)]
pub struct RowCarousel {
    index: usize,
    open: bool,
    wrap: CarouselWrap,
}

impl RowCarousel {
    pub fn new(wrap: CarouselWrap) -> Self {
        Self {
            index: 0,
            open: false,
            wrap,
        }
    }

    /// Current index into the collection.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the view is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the view at the row with the given id.
    ///
    /// The position is resolved by identity lookup, never a remembered
    /// index: the collection may have been re-filtered since the last
    /// open. Unknown ids and empty collections land on index 0.
    pub fn open_at<R: TableRow>(&mut self, id: &str, rows: &[R]) {
        self.index = rows.iter().position(|row| row.id() == id).unwrap_or(0);
        self.open = true;
    }

    /// Close the view. The index is kept; the next open re-resolves it.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Advance to the next row. No-op on an empty collection.
    pub fn next<R: TableRow>(&mut self, rows: &[R]) -> usize {
        if rows.is_empty() {
            self.index = 0;
            return 0;
        }
        self.clamp(rows.len());
        self.index = match self.wrap {
            CarouselWrap::Wrap => (self.index + 1) % rows.len(),
            CarouselWrap::Clamp => (self.index + 1).min(rows.len() - 1),
        };
        self.index
    }

    /// Step back to the previous row. No-op on an empty collection.
    pub fn prev<R: TableRow>(&mut self, rows: &[R]) -> usize {
        if rows.is_empty() {
            self.index = 0;
            return 0;
        }
        self.clamp(rows.len());
        self.index = match self.wrap {
            CarouselWrap::Wrap => (self.index + rows.len() - 1) % rows.len(),
            CarouselWrap::Clamp => self.index.saturating_sub(1),
        };
        self.index
    }

    /// The row under the cursor in the supplied collection.
    pub fn current<'a, R: TableRow>(&self, rows: &'a [R]) -> Option<&'a R> {
        if rows.is_empty() {
            return None;
        }
        rows.get(self.index.min(rows.len() - 1))
    }

    fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len - 1;
        }
    }
}

impl Default for RowCarousel {
    fn default() -> Self {
        Self::new(CarouselWrap::Clamp)
    }
}
