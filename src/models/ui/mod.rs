// UI models module
// Logical input actions and the key → action table

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A logical input action, decoupled from raw key names.
///
/// Components receive actions, never keys; the mapping from keys to actions
/// comes from configuration (see [`KeyBindings`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    /// Enter: select a row, activate a form element.
    Confirm,
    /// Tab: move to the adjoining pane.
    NextPane,
    /// Create a new event on the focused date.
    New,
    /// Open the editor for the selected event.
    Edit,
    /// Toggle the delete mark on the selected event.
    DeleteToggle,
    /// Escape: dismiss the current pane.
    Cancel,
}

/// Outcome of dispatching an action to a component: either consumed, or
/// bubbled up for the parent to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    Bubbled(Action),
}

/// The key → action table. Keys are the symbolic names emitted by the
/// terminal input layer ("up", "enter", "e", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(HashMap<String, Action>);

impl KeyBindings {
    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.0.get(key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert("up".to_string(), Action::Up);
        map.insert("down".to_string(), Action::Down);
        map.insert("left".to_string(), Action::Left);
        map.insert("right".to_string(), Action::Right);
        map.insert("enter".to_string(), Action::Confirm);
        map.insert("tab".to_string(), Action::NextPane);
        map.insert("n".to_string(), Action::New);
        map.insert("e".to_string(), Action::Edit);
        map.insert("d".to_string(), Action::DeleteToggle);
        map.insert("esc".to_string(), Action::Cancel);
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_the_documented_keys() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for("up"), Some(Action::Up));
        assert_eq!(keys.action_for("enter"), Some(Action::Confirm));
        assert_eq!(keys.action_for("tab"), Some(Action::NextPane));
        assert_eq!(keys.action_for("n"), Some(Action::New));
        assert_eq!(keys.action_for("e"), Some(Action::Edit));
        assert_eq!(keys.action_for("d"), Some(Action::DeleteToggle));
        assert_eq!(keys.action_for("esc"), Some(Action::Cancel));
        assert_eq!(keys.action_for("q"), None);
    }

    #[test]
    fn bindings_deserialize_from_config_tables() {
        let toml = r#"
            up = "Up"
            x = "DeleteToggle"
        "#;
        let keys: KeyBindings = toml::from_str(toml).unwrap();
        assert_eq!(keys.action_for("x"), Some(Action::DeleteToggle));
    }
}
