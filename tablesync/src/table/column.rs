//! Column definitions and the augmentation pass.

/// How a column's filter input is modeled.
///
/// The declared variant decides which codec a column's query key uses:
/// free text is a scalar token, a discrete option set is a list token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMode {
    /// Free-text filter; scalar token.
    Text,
    /// Discrete options (multi-select); list token.
    Select { options: Vec<String> },
}

impl FilterMode {
    /// Whether this variant uses the list codec.
    pub fn is_list(&self) -> bool {
        matches!(self, FilterMode::Select { .. })
    }
}

/// Column configuration.
///
/// Columns define the structure this core cares about: identity,
/// sortability, and the filter variant. Rendering belongs to the host.
///
/// # Examples
///
/// ```
/// use tablesync::table::ColumnSpec;
///
/// let columns = vec![
///     ColumnSpec::new("name", "Name").sortable().text_filter(),
///     ColumnSpec::new("status", "Status")
///         .select_filter(["queued", "running", "done"]),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Unique column id; doubles as the filter query key.
    pub id: String,
    /// Column header text.
    pub title: String,
    /// Whether this column participates in sorting.
    pub sortable: bool,
    /// Filter variant, `None` for unfilterable columns.
    pub filter: Option<FilterMode>,
}

impl ColumnSpec {
    /// Create a column with the given id and header text.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sortable: false,
            filter: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Give the column a free-text filter.
    pub fn text_filter(mut self) -> Self {
        self.filter = Some(FilterMode::Text);
        self
    }

    /// Give the column a multi-select filter over discrete options.
    pub fn select_filter<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = Some(FilterMode::Select {
            options: options.into_iter().map(Into::into).collect(),
        });
        self
    }
}

/// A synthetic column injected during the augmentation pass.
///
/// Inserted immediately after its anchor column unless the caller opts it
/// out.
#[derive(Debug, Clone)]
pub struct SyntheticColumn {
    /// The column to inject.
    pub column: ColumnSpec,
    /// Id of the column the synthetic one is inserted after.
    pub anchor: String,
    /// Caller opt-out; opted-out synthetics are skipped entirely.
    pub opt_out: bool,
}

impl SyntheticColumn {
    /// A synthetic column inserted after `anchor`.
    pub fn after(anchor: impl Into<String>, column: ColumnSpec) -> Self {
        Self {
            column,
            anchor: anchor.into(),
            opt_out: false,
        }
    }

    /// Opt this synthetic column out of the augmentation pass.
    pub fn opt_out(mut self) -> Self {
        self.opt_out = true;
        self
    }
}

/// Deterministic column augmentation.
///
/// Inserts each synthetic column immediately after its anchor, appending
/// when the anchor is missing. Idempotent: an id already present in the
/// list is never inserted again, so running the pass on an already
/// augmented list returns it unchanged.
pub fn augment_columns(columns: Vec<ColumnSpec>, synthetics: &[SyntheticColumn]) -> Vec<ColumnSpec> {
    let mut augmented = columns;
    for synthetic in synthetics {
        if synthetic.opt_out {
            continue;
        }
        if augmented.iter().any(|column| column.id == synthetic.column.id) {
            continue;
        }
        let at = augmented
            .iter()
            .position(|column| column.id == synthetic.anchor)
            .map(|index| index + 1)
            .unwrap_or(augmented.len());
        augmented.insert(at, synthetic.column.clone());
    }
    augmented
}
