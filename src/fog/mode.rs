/// Session-local "GM mode" flag. Gates whether pointer input draws fog; the
/// fog itself is always shown to everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeController {
    editing: bool,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips edit mode and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.editing = !self.editing;
        tracing::debug!(editing = self.editing, "fog edit mode toggled");
        self.editing
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Outside edit mode the overlay must let pointer events through to the
    /// map beneath it.
    pub fn accepts_pointer_input(&self) -> bool {
        self.editing
    }

    pub fn label(&self) -> &'static str {
        if self.editing {
            "GM Mode: On"
        } else {
            "GM Mode: Off"
        }
    }
}
