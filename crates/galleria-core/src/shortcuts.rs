//! Gallery commands and their keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// A high-level action issued by a button or key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryCommand {
    Next,
    Prev,
    ToggleZoom,
    RotateLeft,
    RotateRight,
    /// Restore the selected slide to the identity transform.
    Reset,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Value of `KeyboardEvent.key`.
    pub key: &'static str,
    pub command: GalleryCommand,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: GalleryCommand, description: &'static str) -> Self {
        Self {
            key,
            command,
            description,
        }
    }
}

const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("ArrowRight", GalleryCommand::Next, "Next slide"),
    Shortcut::new("ArrowLeft", GalleryCommand::Prev, "Previous slide"),
    Shortcut::new("Enter", GalleryCommand::ToggleZoom, "Toggle zoom"),
    Shortcut::new("z", GalleryCommand::ToggleZoom, "Toggle zoom"),
    Shortcut::new("r", GalleryCommand::RotateRight, "Rotate right"),
    Shortcut::new("R", GalleryCommand::RotateLeft, "Rotate left"),
    Shortcut::new("Escape", GalleryCommand::Reset, "Reset slide"),
    Shortcut::new("0", GalleryCommand::Reset, "Reset slide"),
];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        SHORTCUTS
    }

    /// Look up the command bound to a `KeyboardEvent.key` value.
    pub fn command_for_key(key: &str) -> Option<GalleryCommand> {
        SHORTCUTS
            .iter()
            .find(|shortcut| shortcut.key == key)
            .map(|shortcut| shortcut.command)
    }

    /// Format the shortcut table for display.
    pub fn describe() -> String {
        let mut out = String::from("=== Keyboard Shortcuts ===\n");
        for shortcut in SHORTCUTS {
            out.push_str(&format!("  {:12} {}\n", shortcut.key, shortcut.description));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_for_key() {
        let expected = [
            ("ArrowRight", GalleryCommand::Next),
            ("ArrowLeft", GalleryCommand::Prev),
            ("Enter", GalleryCommand::ToggleZoom),
            ("z", GalleryCommand::ToggleZoom),
            ("r", GalleryCommand::RotateRight),
            ("R", GalleryCommand::RotateLeft),
            ("Escape", GalleryCommand::Reset),
            ("0", GalleryCommand::Reset),
        ];
        for (key, command) in expected {
            assert_eq!(ShortcutRegistry::command_for_key(key), Some(command), "key {key}");
        }
        assert_eq!(ShortcutRegistry::all().len(), expected.len());

        assert_eq!(ShortcutRegistry::command_for_key("q"), None);
        assert_eq!(ShortcutRegistry::command_for_key("Z"), None);
    }

    #[test]
    fn test_describe_lists_every_key() {
        let text = ShortcutRegistry::describe();
        assert!(text.starts_with("=== Keyboard Shortcuts ==="));
        for shortcut in ShortcutRegistry::all() {
            let line = format!("  {:12} {}", shortcut.key, shortcut.description);
            assert!(text.contains(shortcut.key));
            assert!(text.contains(&line), "missing line for {}", shortcut.key);
        }
    }

    #[test]
    fn test_command_serde_names() {
        let json = serde_json::to_string(&GalleryCommand::RotateRight).unwrap();
        assert_eq!(json, "\"rotate_right\"");
    }
}
