use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indoc::indoc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Keyboard snapping on the focused window
    SnapLeft,
    SnapRight,
    SnapUp,
    SnapDown,
    // Window state
    Minimize,
    Maximize,
    Restore,
    Close,
    ToggleAlwaysOnTop,
    // Focus
    CycleNextWindow,
    CyclePrevWindow,
    /// 1-based taskbar slot.
    ActivateTaskbarItem(u8),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Quit => write!(f, "Quit"),
            Action::SnapLeft => write!(f, "Snap left"),
            Action::SnapRight => write!(f, "Snap right"),
            Action::SnapUp => write!(f, "Snap up / maximize"),
            Action::SnapDown => write!(f, "Snap down / restore / minimize"),
            Action::Minimize => write!(f, "Minimize window"),
            Action::Maximize => write!(f, "Maximize window"),
            Action::Restore => write!(f, "Restore window"),
            Action::Close => write!(f, "Close window"),
            Action::ToggleAlwaysOnTop => write!(f, "Toggle always on top"),
            Action::CycleNextWindow => write!(f, "Cycle next window"),
            Action::CyclePrevWindow => write!(f, "Cycle previous window"),
            Action::ActivateTaskbarItem(n) => write!(f, "Activate taskbar item {n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::SUPER) {
            parts.push("Super".to_string());
        }
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Short reference printed by `desk-wm --help` and shown in the demo.
pub const SHORTCUT_HELP: &str = indoc! {"
    Super+Arrows (or Ctrl+Alt+Arrows)  snap / maximize / restore / minimize
    Alt+F4                             close focused window
    Alt+Tab, Alt+BackTab               cycle windows
    Super+1..9 (or Alt+1..9)           activate taskbar item
    Ctrl+Alt+T                         toggle always on top
    Ctrl+Q                             quit
"};

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        let ctrl_alt = KeyModifiers::CONTROL | KeyModifiers::ALT;
        for (action, code) in [
            (SnapLeft, KeyCode::Left),
            (SnapRight, KeyCode::Right),
            (SnapUp, KeyCode::Up),
            (SnapDown, KeyCode::Down),
        ] {
            kb.add(action, KeyCombo::new(code, KeyModifiers::SUPER));
            kb.add(action, KeyCombo::new(code, ctrl_alt));
        }
        kb.add(Minimize, KeyCombo::new(KeyCode::Char('m'), ctrl_alt));
        kb.add(Maximize, KeyCombo::new(KeyCode::Char('x'), ctrl_alt));
        kb.add(Restore, KeyCombo::new(KeyCode::Char('r'), ctrl_alt));
        kb.add(Close, KeyCombo::new(KeyCode::F(4), KeyModifiers::ALT));
        kb.add(
            ToggleAlwaysOnTop,
            KeyCombo::new(KeyCode::Char('t'), ctrl_alt),
        );
        kb.add(
            CycleNextWindow,
            KeyCombo::new(KeyCode::Tab, KeyModifiers::ALT),
        );
        kb.add(
            CyclePrevWindow,
            KeyCombo::new(KeyCode::BackTab, KeyModifiers::ALT),
        );
        for n in 1..=9u8 {
            let digit = char::from(b'0' + n);
            kb.add(
                ActivateTaskbarItem(n),
                KeyCombo::new(KeyCode::Char(digit), KeyModifiers::SUPER),
            );
            kb.add(
                ActivateTaskbarItem(n),
                KeyCombo::new(KeyCode::Char(digit), KeyModifiers::ALT),
            );
        }
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        if let Some(list) = self.map.get(&action) {
            list.iter().any(|c| c.matches(key))
        } else {
            false
        }
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        for (act, list) in &self.map {
            if list.iter().any(|c| c.matches(key)) {
                return Some(*act);
            }
        }
        None
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }
}
