//! Window visibility state.

/// Whether the dashboard window is currently visible to the user.
///
/// The embedding shell reports transitions; count-driven alerts are only
/// dispatched while hidden, since a visible window already shows the
/// in-app badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// The window is in the foreground.
    #[default]
    Visible,
    /// The window is hidden or minimized.
    Hidden,
}

impl Visibility {
    /// Check whether the window is hidden.
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}
