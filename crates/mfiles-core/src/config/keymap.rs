//! Key binding configuration.
//!
//! Key bindings map key names (e.g. `"j"`, `"Space"`, `"Shift+Down"`) to
//! [`Action`] values. The defaults follow vim conventions and also bind the
//! arrow keys.
//!
//! TOML files use string action identifiers (e.g. `"move_down"`); these are
//! resolved to [`Action`] via [`ActionRegistry::find_by_id`] at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::action::{Action, ActionRegistry};
use crate::error::{CoreError, CoreResult};

/// Raw TOML representation, deserialized first and then resolved.
#[derive(Debug, Clone, Deserialize)]
struct RawKeymap {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

/// Complete set of key bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
    /// Reverse map: Action → list of key strings (for the help screen).
    reverse: HashMap<Action, Vec<String>>,
}

const DEFAULT_BINDINGS: &[(&str, Action)] = &[
    ("j", Action::MoveDown),
    ("k", Action::MoveUp),
    ("Down", Action::MoveDown),
    ("Up", Action::MoveUp),
    ("J", Action::ExtendDown),
    ("K", Action::ExtendUp),
    ("Shift+Down", Action::ExtendDown),
    ("Shift+Up", Action::ExtendUp),
    ("Enter", Action::Enter),
    ("l", Action::Enter),
    ("Space", Action::Pin),
    ("Esc", Action::Escape),
    ("y", Action::StageCopy),
    ("x", Action::StageCut),
    ("p", Action::Paste),
    ("n", Action::NewFile),
    (".", Action::ToggleHidden),
    ("?", Action::Help),
    ("q", Action::Quit),
];

impl Default for Keymap {
    fn default() -> Self {
        let bindings: HashMap<String, Action> = DEFAULT_BINDINGS
            .iter()
            .map(|(key, action)| (key.to_string(), *action))
            .collect();
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }
}

/// Builds the reverse mapping from Action → Vec<key string>.
fn build_reverse(bindings: &HashMap<String, Action>) -> HashMap<Action, Vec<String>> {
    let mut reverse: HashMap<Action, Vec<String>> = HashMap::new();
    for (key, action) in bindings {
        reverse.entry(*action).or_default().push(key.clone());
    }
    // Sort keys for deterministic display
    for keys in reverse.values_mut() {
        keys.sort();
    }
    reverse
}

impl Keymap {
    /// Loads key bindings from a TOML file at `path` on top of the defaults.
    ///
    /// A binding in the file replaces the default for that key; the value
    /// `"none"` unbinds it. Unknown action ids are logged and skipped.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        let raw: RawKeymap =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        Ok(Self::default().merged(raw))
    }

    fn merged(mut self, raw: RawKeymap) -> Self {
        let registry = ActionRegistry::new();
        for (key, action_id) in raw.bindings {
            if action_id == "none" {
                self.bindings.remove(&key);
                continue;
            }
            match registry.find_by_id(&action_id) {
                Some(action) => {
                    self.bindings.insert(key, action);
                }
                None => tracing::warn!("keymap: unknown action {action_id:?} for key {key:?}"),
            }
        }
        self.reverse = build_reverse(&self.bindings);
        self
    }

    /// Returns the action mapped to `key`, or `None` if unbound.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns the key(s) bound to a given action.
    pub fn keys_for_action(&self, action: Action) -> Option<&[String]> {
        self.reverse.get(&action).map(|v| v.as_slice())
    }

    /// Returns all bindings.
    pub fn bindings(&self) -> &HashMap<String, Action> {
        &self.bindings
    }
}
