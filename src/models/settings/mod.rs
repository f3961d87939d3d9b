// Settings module
// User-facing configuration consumed by the interface components

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::ui::KeyBindings;

/// One configured calendar account with its display attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub readonly: bool,
}

/// Application settings, normally loaded from the TOML config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Full date format used by date entry fields and the list header.
    pub longdateformat: String,
    /// Short date format used by the detail display.
    pub dateformat: String,
    /// Time-of-day format used by time entry fields and row labels.
    pub timeformat: String,
    /// Timezone applied to events that do not carry one of their own.
    pub default_timezone: Tz,
    pub accounts: Vec<Account>,
    /// Number of months the calendar grid spans.
    pub grid_months: u32,
    pub keybindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            longdateformat: "%d.%m.%Y".to_string(),
            dateformat: "%d.%m.".to_string(),
            timeformat: "%H:%M".to_string(),
            default_timezone: chrono_tz::UTC,
            accounts: vec![Account {
                name: "private".to_string(),
                color: None,
                readonly: false,
            }],
            grid_months: 3,
            keybindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    /// The account new events are created in: the last configured one.
    pub fn default_account(&self) -> Option<&Account> {
        self.accounts.last()
    }
}
