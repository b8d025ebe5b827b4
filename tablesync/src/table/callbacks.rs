//! Typed capability callbacks for row-level actions.

use std::fmt;
use std::sync::Arc;

/// Callback invoked with a row id.
pub type RowAction = Arc<dyn Fn(&str) + Send + Sync>;
/// Reads per-row feedback text.
pub type FeedbackGet = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;
/// Stores per-row feedback text.
pub type FeedbackSet = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Optional capabilities the host wires into a table.
///
/// Each capability the column glue can invoke (pausing a campaign row,
/// leaving feedback on a call) is a named field, absent when the host does
/// not provide it.
#[derive(Clone, Default)]
pub struct TableCallbacks {
    pub pause: Option<RowAction>,
    pub resume: Option<RowAction>,
    pub stop: Option<RowAction>,
    pub feedback_get: Option<FeedbackGet>,
    pub feedback_set: Option<FeedbackSet>,
}

impl TableCallbacks {
    /// Callbacks with every capability absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the pause capability.
    pub fn with_pause(mut self, pause: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.pause = Some(Arc::new(pause));
        self
    }

    /// Provide the resume capability.
    pub fn with_resume(mut self, resume: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.resume = Some(Arc::new(resume));
        self
    }

    /// Provide the stop capability.
    pub fn with_stop(mut self, stop: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.stop = Some(Arc::new(stop));
        self
    }

    /// Provide the feedback reader.
    pub fn with_feedback_get(
        mut self,
        get: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.feedback_get = Some(Arc::new(get));
        self
    }

    /// Provide the feedback writer.
    pub fn with_feedback_set(
        mut self,
        set: impl Fn(&str, &str) + Send + Sync + 'static,
    ) -> Self {
        self.feedback_set = Some(Arc::new(set));
        self
    }
}

impl fmt::Debug for TableCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCallbacks")
            .field("pause", &self.pause.is_some())
            .field("resume", &self.resume.is_some())
            .field("stop", &self.stop.is_some())
            .field("feedback_get", &self.feedback_get.is_some())
            .field("feedback_set", &self.feedback_set.is_some())
            .finish()
    }
}
