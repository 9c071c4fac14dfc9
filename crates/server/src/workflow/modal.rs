use serde::{Deserialize, Serialize};

/// Decide the next `is_open` value of the compose modal.
///
/// Any non-zero click count on the open or close button flips the modal;
/// absent or zero counts leave it as it is.
pub fn toggle_modal(open_clicks: Option<u64>, close_clicks: Option<u64>, is_open: bool) -> bool {
    let clicked = |n: Option<u64>| n.is_some_and(|n| n > 0);
    if clicked(open_clicks) || clicked(close_clicks) {
        !is_open
    } else {
        is_open
    }
}

/// Client-held state of the compose modal.
///
/// Click counters are monotonically increasing per button. The modal only
/// reacts to a change of the `(open, close)` pair, so replaying the same
/// counts is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalState {
    /// Whether the modal is currently shown. Starts closed.
    #[serde(default)]
    pub is_open: bool,
    /// Last seen click count of the open button.
    #[serde(default)]
    pub open_clicks: Option<u64>,
    /// Last seen click count of the close button.
    #[serde(default)]
    pub close_clicks: Option<u64>,
}

impl ModalState {
    /// Record new click counts and return the resulting `is_open`.
    pub fn toggle(&mut self, open_clicks: Option<u64>, close_clicks: Option<u64>) -> bool {
        let seen = (
            self.open_clicks.unwrap_or(0),
            self.close_clicks.unwrap_or(0),
        );
        let changed = (open_clicks.unwrap_or(0), close_clicks.unwrap_or(0)) != seen;

        self.open_clicks = open_clicks;
        self.close_clicks = close_clicks;
        if changed {
            self.is_open = toggle_modal(open_clicks, close_clicks, self.is_open);
        }
        self.is_open
    }
}
