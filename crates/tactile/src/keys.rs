//! Named keys from the WebDriver "keyboard actions" table.
//!
//! Non-printable keys are sent as code points in the Unicode private use area
//! starting at U+E000. Printable characters are sent as themselves.

/// Key code points understood by every W3C remote end
#[derive(Debug, Clone, Copy)]
pub struct Keys;

#[allow(missing_docs)]
impl Keys {
    pub const NULL: char = '\u{E000}';
    pub const CANCEL: char = '\u{E001}';
    pub const HELP: char = '\u{E002}';
    pub const BACKSPACE: char = '\u{E003}';
    pub const TAB: char = '\u{E004}';
    pub const CLEAR: char = '\u{E005}';
    pub const RETURN: char = '\u{E006}';
    pub const ENTER: char = '\u{E007}';
    pub const SHIFT: char = '\u{E008}';
    pub const CONTROL: char = '\u{E009}';
    pub const ALT: char = '\u{E00A}';
    pub const PAUSE: char = '\u{E00B}';
    pub const ESCAPE: char = '\u{E00C}';
    pub const SPACE: char = '\u{E00D}';
    pub const PAGE_UP: char = '\u{E00E}';
    pub const PAGE_DOWN: char = '\u{E00F}';
    pub const END: char = '\u{E010}';
    pub const HOME: char = '\u{E011}';
    pub const ARROW_LEFT: char = '\u{E012}';
    pub const ARROW_UP: char = '\u{E013}';
    pub const ARROW_RIGHT: char = '\u{E014}';
    pub const ARROW_DOWN: char = '\u{E015}';
    pub const INSERT: char = '\u{E016}';
    pub const DELETE: char = '\u{E017}';
    pub const SEMICOLON: char = '\u{E018}';
    pub const EQUALS: char = '\u{E019}';

    pub const NUMPAD0: char = '\u{E01A}';
    pub const NUMPAD1: char = '\u{E01B}';
    pub const NUMPAD2: char = '\u{E01C}';
    pub const NUMPAD3: char = '\u{E01D}';
    pub const NUMPAD4: char = '\u{E01E}';
    pub const NUMPAD5: char = '\u{E01F}';
    pub const NUMPAD6: char = '\u{E020}';
    pub const NUMPAD7: char = '\u{E021}';
    pub const NUMPAD8: char = '\u{E022}';
    pub const NUMPAD9: char = '\u{E023}';
    pub const MULTIPLY: char = '\u{E024}';
    pub const ADD: char = '\u{E025}';
    pub const SEPARATOR: char = '\u{E026}';
    pub const SUBTRACT: char = '\u{E027}';
    pub const DECIMAL: char = '\u{E028}';
    pub const DIVIDE: char = '\u{E029}';

    pub const F1: char = '\u{E031}';
    pub const F2: char = '\u{E032}';
    pub const F3: char = '\u{E033}';
    pub const F4: char = '\u{E034}';
    pub const F5: char = '\u{E035}';
    pub const F6: char = '\u{E036}';
    pub const F7: char = '\u{E037}';
    pub const F8: char = '\u{E038}';
    pub const F9: char = '\u{E039}';
    pub const F10: char = '\u{E03A}';
    pub const F11: char = '\u{E03B}';
    pub const F12: char = '\u{E03C}';

    pub const META: char = '\u{E03D}';
    pub const COMMAND: char = '\u{E03D}';
    pub const ZENKAKU_HANKAKU: char = '\u{E040}';

    /// Whether `key` is a modifier that stays held across other key presses
    #[must_use]
    pub const fn is_modifier(key: char) -> bool {
        matches!(
            key,
            Self::SHIFT | Self::CONTROL | Self::ALT | Self::META
        )
    }
}
