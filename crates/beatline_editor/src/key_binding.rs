// SPDX-License-Identifier: MIT OR Apache-2.0
//! Persisted key bindings.
//!
//! A binding row stores its key combination as a `+`-delimited string and
//! its action as an integer code, optionally scoped to a ruleset and variant.

use crate::app::{EditorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Editor actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    /// Play or pause the audio
    TogglePlayback,
    /// Stop and rewind
    Stop,
    /// Seek to the start of the track
    SeekToStart,
    /// Seek to the end of the track
    SeekToEnd,
    /// Switch to the next loaded beatmap
    NextBeatmap,
}

impl EditorAction {
    /// All actions
    pub const ALL: [Self; 5] = [
        Self::TogglePlayback,
        Self::Stop,
        Self::SeekToStart,
        Self::SeekToEnd,
        Self::NextBeatmap,
    ];

    /// Stored integer code
    pub fn code(self) -> i32 {
        match self {
            Self::TogglePlayback => 0,
            Self::Stop => 1,
            Self::SeekToStart => 2,
            Self::SeekToEnd => 3,
            Self::NextBeatmap => 4,
        }
    }

    /// Action for a stored code
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.code() == code)
    }
}

/// Modifier keys of a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Control key (Cmd on macOS)
    pub ctrl: bool,
    /// Shift key
    pub shift: bool,
    /// Alt key (Option on macOS)
    pub alt: bool,
}

impl Modifiers {
    /// Check if these modifiers match egui modifiers
    pub fn matches(&self, mods: &egui::Modifiers) -> bool {
        self.ctrl == (mods.ctrl || mods.command) && self.shift == mods.shift && self.alt == mods.alt
    }
}

/// A key plus modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    /// The main key
    pub key: egui::Key,
    /// Modifier keys
    pub modifiers: Modifiers,
}

impl KeyCombination {
    /// Combination without modifiers
    pub const fn new(key: egui::Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: false,
                shift: false,
                alt: false,
            },
        }
    }

    /// Parse "Ctrl+Shift+S" style text
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = Modifiers::default();
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "cmd" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                _ => {
                    // only one non-modifier key per combination
                    if key.is_some() {
                        return None;
                    }
                    key = Some(egui::Key::from_name(part)?);
                }
            }
        }

        Some(Self { key: key?, modifiers })
    }

    /// Check if this combination was pressed this frame
    pub fn is_pressed(&self, ctx: &egui::Context) -> bool {
        ctx.input(|i| self.modifiers.matches(&i.modifiers) && i.key_pressed(self.key))
    }
}

impl std::fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.alt {
            write!(f, "Alt+")?;
        }
        if self.modifiers.shift {
            write!(f, "Shift+")?;
        }
        write!(f, "{}", self.key.name())
    }
}

/// One persisted binding row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Row ID
    pub id: u32,
    /// Ruleset scope (None = global)
    pub ruleset_id: Option<i32>,
    /// Ruleset variant scope
    pub variant: Option<i32>,
    /// Key combination text
    pub keys: String,
    /// Action code
    pub action: i32,
}

impl KeyBinding {
    /// Parsed key combination
    pub fn key_combination(&self) -> Option<KeyCombination> {
        KeyCombination::parse(&self.keys)
    }

    /// Store a key combination
    pub fn set_key_combination(&mut self, combination: KeyCombination) {
        self.keys = combination.to_string();
    }

    /// Decoded action
    pub fn action(&self) -> Option<EditorAction> {
        EditorAction::from_code(self.action)
    }

    /// Store an action
    pub fn set_action(&mut self, action: EditorAction) {
        self.action = action.code();
    }
}

/// All binding rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindingStore {
    bindings: Vec<KeyBinding>,
}

impl KeyBindingStore {
    /// Global default bindings
    pub fn defaults() -> Self {
        let mut store = Self::default();
        store.insert(None, None, KeyCombination::new(egui::Key::Space), EditorAction::TogglePlayback);
        store.insert(None, None, KeyCombination::new(egui::Key::Escape), EditorAction::Stop);
        store.insert(None, None, KeyCombination::new(egui::Key::Home), EditorAction::SeekToStart);
        store.insert(None, None, KeyCombination::new(egui::Key::End), EditorAction::SeekToEnd);
        store.insert(None, None, KeyCombination::new(egui::Key::Tab), EditorAction::NextBeatmap);
        store
    }

    /// Add a binding, returning its row ID
    pub fn insert(
        &mut self,
        ruleset_id: Option<i32>,
        variant: Option<i32>,
        combination: KeyCombination,
        action: EditorAction,
    ) -> u32 {
        let id = self.bindings.iter().map(|b| b.id + 1).max().unwrap_or(1);
        let mut binding = KeyBinding {
            id,
            ruleset_id,
            variant,
            keys: String::new(),
            action: 0,
        };
        binding.set_key_combination(combination);
        binding.set_action(action);
        self.bindings.push(binding);
        id
    }

    /// Bindings for a ruleset scope
    pub fn query(&self, ruleset_id: Option<i32>, variant: Option<i32>) -> impl Iterator<Item = &KeyBinding> {
        self.bindings
            .iter()
            .filter(move |b| b.ruleset_id == ruleset_id && b.variant == variant)
    }

    /// Actions whose combination was pressed this frame
    pub fn pressed_actions(&self, ctx: &egui::Context, ruleset_id: Option<i32>, variant: Option<i32>) -> Vec<EditorAction> {
        self.query(ruleset_id, variant)
            .filter(|b| b.key_combination().is_some_and(|c| c.is_pressed(ctx)))
            .filter_map(KeyBinding::action)
            .collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Load rows from a RON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let store: Self = ron::from_str(&text).map_err(|e| EditorError::Config(e.to_string()))?;

        let unreadable = store.bindings.iter().filter(|b| b.key_combination().is_none()).count();
        if unreadable > 0 {
            tracing::warn!("{} key bindings in {:?} could not be parsed", unreadable, path);
        }
        Ok(store)
    }

    /// Save rows as RON
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| EditorError::Config(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Load from `path`, writing defaults there if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        let store = Self::defaults();
        store.save(path)?;
        tracing::info!("Wrote default key bindings to {:?}", path);
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_action_codes() {
        for action in EditorAction::ALL {
            assert_eq!(EditorAction::from_code(action.code()), Some(action));
        }
        assert_eq!(EditorAction::from_code(99), None);
    }

    #[test]
    fn test_parse_combination() {
        let combo = KeyCombination::parse("Ctrl+Shift+S").unwrap();
        assert_eq!(combo.key, egui::Key::S);
        assert!(combo.modifiers.ctrl && combo.modifiers.shift && !combo.modifiers.alt);
        assert_eq!(combo.to_string(), "Ctrl+Shift+S");

        assert_eq!(KeyCombination::parse("Space").map(|c| c.key), Some(egui::Key::Space));
        assert!(KeyCombination::parse("Ctrl+").is_none());
        assert!(KeyCombination::parse("A+B").is_none());
        assert!(KeyCombination::parse("NotAKey").is_none());
    }

    #[test]
    fn test_binding_accessors() {
        let mut binding = KeyBinding {
            id: 1,
            ruleset_id: Some(0),
            variant: None,
            keys: String::new(),
            action: 0,
        };
        binding.set_key_combination(KeyCombination::new(egui::Key::Home));
        binding.set_action(EditorAction::SeekToStart);

        assert_eq!(binding.keys, "Home");
        assert_eq!(binding.key_combination(), Some(KeyCombination::new(egui::Key::Home)));
        assert_eq!(binding.action(), Some(EditorAction::SeekToStart));
    }

    #[test]
    fn test_query_by_scope() {
        let mut store = KeyBindingStore::defaults();
        let global = store.len();
        store.insert(Some(1), Some(4), KeyCombination::new(egui::Key::Z), EditorAction::Stop);

        assert_eq!(store.query(None, None).count(), global);
        assert_eq!(store.query(Some(1), Some(4)).count(), 1);
        assert_eq!(store.query(Some(1), None).count(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let store = KeyBindingStore::defaults();
        let ids: HashSet<u32> = store.query(None, None).map(|b| b.id).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn test_serialization() {
        let store = KeyBindingStore::defaults();
        let text = ron::ser::to_string_pretty(&store, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: KeyBindingStore = ron::from_str(&text).unwrap();
        assert_eq!(loaded, store);
    }
}
