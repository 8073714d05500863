//! Keyboard surface: key mapping and the shortcut registry.

/// Modifier keys state. `command` is Ctrl on Linux/Windows, Cmd on macOS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub command: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        command: false,
        alt: false,
    };

    pub const COMMAND: Modifiers = Modifiers {
        shift: false,
        command: true,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        command: false,
        alt: false,
    };
}

/// Commands the editor accepts from the global key handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorCommand {
    ZoomIn,
    ZoomOut,
    /// Move the selected element by a canvas-unit delta.
    Nudge { dx: f64, dy: f64 },
    DeleteSelected,
    DuplicateSelected,
    /// One z-order step towards the front.
    BringForward,
    /// All the way to the front.
    BringToFront,
    /// One z-order step towards the back.
    SendBackward,
    /// All the way to the back.
    SendToBack,
}

/// Nudge distance for a plain arrow key press.
pub const NUDGE_STEP: f64 = 1.0;
/// Nudge distance with Shift held.
pub const NUDGE_STEP_LARGE: f64 = 10.0;

/// Map a key press to an editor command.
///
/// Key names follow the web `KeyboardEvent.key` convention. Returns None
/// for keys the editor does not consume, so the host can let them bubble.
pub fn map_key(key: &str, modifiers: Modifiers) -> Option<EditorCommand> {
    let nudge = if modifiers.shift {
        NUDGE_STEP_LARGE
    } else {
        NUDGE_STEP
    };

    match key {
        "+" | "=" if modifiers.command => Some(EditorCommand::ZoomIn),
        "-" if modifiers.command => Some(EditorCommand::ZoomOut),
        "ArrowLeft" => Some(EditorCommand::Nudge { dx: -nudge, dy: 0.0 }),
        "ArrowRight" => Some(EditorCommand::Nudge { dx: nudge, dy: 0.0 }),
        "ArrowUp" => Some(EditorCommand::Nudge { dx: 0.0, dy: -nudge }),
        "ArrowDown" => Some(EditorCommand::Nudge { dx: 0.0, dy: nudge }),
        "Backspace" => Some(EditorCommand::DeleteSelected),
        "d" | "D" if modifiers.command => Some(EditorCommand::DuplicateSelected),
        "]" if modifiers.command => Some(EditorCommand::BringToFront),
        "]" => Some(EditorCommand::BringForward),
        "[" if modifiers.command => Some(EditorCommand::SendToBack),
        "[" => Some(EditorCommand::SendBackward),
        _ => None,
    }
}

/// A keyboard shortcut definition, for the help overlay.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub command: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        command: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            command,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+D").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("+", true, false, "Zoom in"),
            Shortcut::new("-", true, false, "Zoom out"),
            Shortcut::new("Arrows", false, false, "Nudge selected element"),
            Shortcut::new("Arrows", false, true, "Nudge selected element by 10"),
            Shortcut::new("Backspace", false, false, "Delete selected element"),
            Shortcut::new("D", true, false, "Duplicate selected element"),
            Shortcut::new("]", false, false, "Bring forward"),
            Shortcut::new("]", true, false, "Bring to front"),
            Shortcut::new("[", false, false, "Send backward"),
            Shortcut::new("[", true, false, "Send to back"),
        ]
    }
}
