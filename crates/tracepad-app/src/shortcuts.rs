//! Keyboard shortcut registry and documentation.

use tracepad_core::Mode;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    /// Mode the shortcut is active in, or `None` for every mode.
    pub mode: Option<Mode>,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        mode: Option<Mode>,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            mode,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Enter").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }

    /// Whether the shortcut applies in `mode`.
    pub fn applies_in(&self, mode: Mode) -> bool {
        self.mode.is_none_or(|m| m == mode)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("1", false, Some(Mode::Draw), "Brush"),
            Shortcut::new("2", false, Some(Mode::Draw), "Eraser"),
            Shortcut::new("Delete", false, None, "Delete selected element"),
            Shortcut::new("Backspace", false, None, "Delete selected element"),
            Shortcut::new("Escape", false, None, "Deselect and discard text edit"),
            Shortcut::new("Enter", true, Some(Mode::Write), "Save text edit"),
            Shortcut::new(
                "Double-click",
                false,
                Some(Mode::Write),
                "Edit text label",
            ),
            Shortcut::new(
                "Double-click",
                false,
                Some(Mode::Shapes),
                "Create shape from the current preset",
            ),
        ]
    }

    /// Shortcuts active in one mode.
    pub fn for_mode(mode: Mode) -> Vec<Shortcut> {
        Self::all()
            .into_iter()
            .filter(|s| s.applies_in(mode))
            .collect()
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            let mode = shortcut.mode.map_or("any", |m| m.name());
            println!(
                "  {:16} {:8} {}",
                shortcut.format(),
                mode,
                shortcut.description
            );
        }
        println!();
    }
}
