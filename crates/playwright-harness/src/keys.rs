// Keys - Harness key vocabulary and its mapping onto Playwright key names
//
// Harnesses describe keyboard input as a mix of literal text and symbolic
// keys. Playwright understands key names ("ArrowLeft", "F5") and accelerator
// strings ("Control+Shift+T"). This module converts between the two.
//
// See: https://playwright.dev/docs/api/class-keyboard#keyboard-press

use crate::error::{Error, Result};
use playwright_rs::protocol::KeyboardModifier;
use std::fmt;

/// Symbolic key understood by component harnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestKey {
    Backspace,
    Tab,
    Enter,
    Shift,
    Control,
    Alt,
    Escape,
    PageUp,
    PageDown,
    End,
    Home,
    LeftArrow,
    UpArrow,
    RightArrow,
    DownArrow,
    Insert,
    Delete,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Meta,
    Comma,
}

impl TestKey {
    /// Harness-side name of the key, e.g. `LEFT_ARROW`.
    pub fn name(self) -> &'static str {
        match self {
            TestKey::Backspace => "BACKSPACE",
            TestKey::Tab => "TAB",
            TestKey::Enter => "ENTER",
            TestKey::Shift => "SHIFT",
            TestKey::Control => "CONTROL",
            TestKey::Alt => "ALT",
            TestKey::Escape => "ESCAPE",
            TestKey::PageUp => "PAGE_UP",
            TestKey::PageDown => "PAGE_DOWN",
            TestKey::End => "END",
            TestKey::Home => "HOME",
            TestKey::LeftArrow => "LEFT_ARROW",
            TestKey::UpArrow => "UP_ARROW",
            TestKey::RightArrow => "RIGHT_ARROW",
            TestKey::DownArrow => "DOWN_ARROW",
            TestKey::Insert => "INSERT",
            TestKey::Delete => "DELETE",
            TestKey::F1 => "F1",
            TestKey::F2 => "F2",
            TestKey::F3 => "F3",
            TestKey::F4 => "F4",
            TestKey::F5 => "F5",
            TestKey::F6 => "F6",
            TestKey::F7 => "F7",
            TestKey::F8 => "F8",
            TestKey::F9 => "F9",
            TestKey::F10 => "F10",
            TestKey::F11 => "F11",
            TestKey::F12 => "F12",
            TestKey::Meta => "META",
            TestKey::Comma => "COMMA",
        }
    }

    /// Playwright key name for this key.
    ///
    /// Fails with [`Error::UnsupportedKey`] for keys Playwright has no name for.
    pub fn playwright_key(self) -> Result<&'static str> {
        let key = match self {
            TestKey::Backspace => "Backspace",
            TestKey::Tab => "Tab",
            TestKey::Enter => "Enter",
            TestKey::Shift => "Shift",
            TestKey::Control => "Control",
            TestKey::Alt => "Alt",
            TestKey::Escape => "Escape",
            TestKey::PageUp => "PageUp",
            TestKey::PageDown => "PageDown",
            TestKey::End => "End",
            TestKey::Home => "Home",
            TestKey::LeftArrow => "ArrowLeft",
            TestKey::UpArrow => "ArrowUp",
            TestKey::RightArrow => "ArrowRight",
            TestKey::DownArrow => "ArrowDown",
            TestKey::Insert => "Insert",
            TestKey::Delete => "Delete",
            TestKey::F1 => "F1",
            TestKey::F2 => "F2",
            TestKey::F3 => "F3",
            TestKey::F4 => "F4",
            TestKey::F5 => "F5",
            TestKey::F6 => "F6",
            TestKey::F7 => "F7",
            TestKey::F8 => "F8",
            TestKey::F9 => "F9",
            TestKey::F10 => "F10",
            TestKey::F11 => "F11",
            TestKey::F12 => "F12",
            TestKey::Meta => "Meta",
            TestKey::Comma => return Err(Error::UnsupportedKey(self.to_string())),
        };
        Ok(key)
    }
}

impl fmt::Display for TestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of a `send_keys` sequence: literal text or a symbolic key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyToken {
    /// Text typed one character at a time
    Text(String),
    /// Symbolic key pressed once
    Key(TestKey),
}

impl From<&str> for KeyToken {
    fn from(text: &str) -> Self {
        KeyToken::Text(text.to_string())
    }
}

impl From<String> for KeyToken {
    fn from(text: String) -> Self {
        KeyToken::Text(text)
    }
}

impl From<TestKey> for KeyToken {
    fn from(key: TestKey) -> Self {
        KeyToken::Key(key)
    }
}

/// Modifier keys held during a pointer or keyboard action.
///
/// # Example
///
/// ```ignore
/// use playwright_harness::ModifierKeys;
///
/// let modifiers = ModifierKeys { control: true, shift: true, ..Default::default() };
/// assert_eq!(modifiers.accelerator("t"), "Control+Shift+t");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierKeys {
    pub alt: bool,
    pub control: bool,
    pub meta: bool,
    pub shift: bool,
}

impl ModifierKeys {
    /// No modifiers held.
    pub const NONE: ModifierKeys = ModifierKeys {
        alt: false,
        control: false,
        meta: false,
        shift: false,
    };

    /// Returns true when no modifier is held.
    pub fn is_empty(&self) -> bool {
        !(self.alt || self.control || self.meta || self.shift)
    }

    /// Held modifiers as Playwright click/hover modifiers (alt, control, meta, shift).
    pub fn held(&self) -> Vec<KeyboardModifier> {
        [
            (self.alt, KeyboardModifier::Alt),
            (self.control, KeyboardModifier::Control),
            (self.meta, KeyboardModifier::Meta),
            (self.shift, KeyboardModifier::Shift),
        ]
        .into_iter()
        .filter_map(|(held, modifier)| held.then_some(modifier))
        .collect()
    }

    /// Builds the accelerator string that presses `key` with these modifiers held.
    ///
    /// Prefixes are emitted in the order Control, Alt, Shift, Meta.
    pub fn accelerator(&self, key: &str) -> String {
        let mut accelerator = String::new();
        for (held, name) in [
            (self.control, "Control"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
            (self.meta, "Meta"),
        ] {
            if held {
                accelerator.push_str(name);
                accelerator.push('+');
            }
        }
        accelerator.push_str(key);
        accelerator
    }
}

/// A `send_keys` token resolved against the Playwright key table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum KeyStroke<'a> {
    /// Text typed character by character
    Type(&'a str),
    /// Key name or accelerator pressed once
    Press(String),
}

/// Resolves a key sequence into the strokes sent to Playwright.
///
/// Without modifiers, text is typed and symbolic keys are pressed by name.
/// With modifiers, every token becomes one accelerator press, because typing
/// cannot hold modifiers. Every token is resolved before anything is sent, so
/// an unsupported key fails the whole sequence.
pub(crate) fn resolve_strokes(
    modifiers: ModifierKeys,
    keys: &[KeyToken],
) -> Result<Vec<KeyStroke<'_>>> {
    keys.iter()
        .map(|token| match token {
            KeyToken::Text(text) if modifiers.is_empty() => Ok(KeyStroke::Type(text)),
            KeyToken::Text(text) => Ok(KeyStroke::Press(modifiers.accelerator(text))),
            KeyToken::Key(key) => Ok(KeyStroke::Press(
                modifiers.accelerator(key.playwright_key()?),
            )),
        })
        .collect()
}
