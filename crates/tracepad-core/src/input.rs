//! Pointer and keyboard events delivered by the host.

use crate::element::ElementId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen coordinates.
///
/// `target` is the element the host found under the pointer, if it does its
/// own hit testing. When absent the canvas hit tests its store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        target: Option<ElementId>,
    },
    Move {
        position: Point,
    },
    Up,
    /// The pointer left the canvas surface.
    Leave,
    DoubleClick {
        position: Point,
        #[serde(default)]
        target: Option<ElementId>,
    },
}

impl PointerEvent {
    pub fn down(position: Point) -> Self {
        PointerEvent::Down {
            position,
            target: None,
        }
    }

    pub fn double_click(position: Point) -> Self {
        PointerEvent::DoubleClick {
            position,
            target: None,
        }
    }

    /// Screen position carried by the event.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::DoubleClick { position, .. } => Some(*position),
            PointerEvent::Up | PointerEvent::Leave => None,
        }
    }
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    Enter,
    /// A number key, `0..=9`.
    Digit(u8),
    /// Any other printable key.
    Character(char),
}

impl Key {
    /// Parse a key name as reported by browsers and windowing toolkits.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Escape" | "Esc" => Some(Key::Escape),
            "Delete" | "Del" => Some(Key::Delete),
            "Backspace" => Some(Key::Backspace),
            "Enter" | "Return" => Some(Key::Enter),
            _ => {
                let mut chars = name.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Some(match c.to_digit(10) {
                    Some(d) => Key::Digit(d as u8),
                    None => Key::Character(c),
                })
            }
        }
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Whether keyboard focus is inside a text input or text area.
    #[serde(default)]
    pub focus_in_text_input: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            focus_in_text_input: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark the event as typed into a text input.
    pub fn in_text_input(mut self) -> Self {
        self.focus_in_text_input = true;
        self
    }

    /// Ctrl+Enter (Cmd+Enter on macOS).
    pub fn is_save_gesture(&self) -> bool {
        self.key == Key::Enter && self.modifiers.command()
    }
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Detects double-clicks from a stream of pointer downs, for hosts that do
/// not report them.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_click_time: Option<Instant>,
    last_click_position: Option<Point>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer down now. Returns true if it completes a double-click.
    pub fn register_down(&mut self, position: Point) -> bool {
        self.register_down_at(position, Instant::now())
    }

    /// Record a pointer down at a given instant.
    pub fn register_down_at(&mut self, position: Point, now: Instant) -> bool {
        if let (Some(last_time), Some(last_pos)) = (self.last_click_time, self.last_click_position) {
            let elapsed = now.saturating_duration_since(last_time).as_millis();
            let distance = (position - last_pos).hypot();
            if elapsed < DOUBLE_CLICK_TIME_MS && distance < DOUBLE_CLICK_DISTANCE {
                // Reset to prevent triple-click being detected as another double-click
                self.reset();
                return true;
            }
        }
        self.last_click_time = Some(now);
        self.last_click_position = Some(position);
        false
    }

    pub fn reset(&mut self) {
        self.last_click_time = None;
        self.last_click_position = None;
    }
}
