//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Ctrl and ⌘
//! are interchangeable. The controller never consults this map while an
//! inline text editor has focus, so plain text keys are never hijacked.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Copy,
    Paste,
    Delete,
    Undo,
    Redo,
    /// Cancel inline edit or close the open popup.
    Cancel,
}

/// Resolves key events into shortcut actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "c" | "C" => Some(ShortcutAction::Copy),
                "v" | "V" => Some(ShortcutAction::Paste),
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        match key {
            "Delete" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Cancel),
            _ => None,
        }
    }
}
