// Event persistence status
// Mirrors the flags a sync backend needs to pick up local modifications

use serde::{Deserialize, Serialize};

/// Lifecycle status of an event as stored locally.
///
/// `Ok` rows exist upstream and are unmodified; `New` rows were created
/// locally and never pushed; `Changed` rows exist upstream but carry local
/// edits; `Deleted` marks an upstream row for removal; `NewDelete` marks a
/// never-pushed row for removal (it can simply be dropped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Ok,
    New,
    Changed,
    Deleted,
    NewDelete,
}

impl EventStatus {
    /// The delete-toggle transition. An involution on {Ok, Deleted} and on
    /// {New, NewDelete}: applying it twice restores the starting status.
    /// `Changed` rows toggle like `Ok` rows.
    pub fn toggled_delete(self) -> Self {
        match self {
            EventStatus::Ok | EventStatus::Changed => EventStatus::Deleted,
            EventStatus::Deleted => EventStatus::Ok,
            EventStatus::New => EventStatus::NewDelete,
            EventStatus::NewDelete => EventStatus::New,
        }
    }

    /// Integer code used by the SQLite store.
    pub fn as_db(self) -> i64 {
        match self {
            EventStatus::Ok => 0,
            EventStatus::New => 1,
            EventStatus::Changed => 2,
            EventStatus::Deleted => 3,
            EventStatus::NewDelete => 4,
        }
    }

    pub fn from_db(code: i64) -> Option<Self> {
        match code {
            0 => Some(EventStatus::Ok),
            1 => Some(EventStatus::New),
            2 => Some(EventStatus::Changed),
            3 => Some(EventStatus::Deleted),
            4 => Some(EventStatus::NewDelete),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(EventStatus::Ok, EventStatus::Deleted; "ok marks deleted")]
    #[test_case(EventStatus::Deleted, EventStatus::Ok; "deleted restores ok")]
    #[test_case(EventStatus::New, EventStatus::NewDelete; "new marks newdelete")]
    #[test_case(EventStatus::NewDelete, EventStatus::New; "newdelete restores new")]
    fn toggle_table(from: EventStatus, to: EventStatus) {
        assert_eq!(from.toggled_delete(), to);
    }

    #[test_case(EventStatus::Ok)]
    #[test_case(EventStatus::New)]
    #[test_case(EventStatus::Deleted)]
    #[test_case(EventStatus::NewDelete)]
    fn toggle_is_an_involution(status: EventStatus) {
        assert_eq!(status.toggled_delete().toggled_delete(), status);
    }

    #[test]
    fn changed_toggles_like_ok() {
        assert_eq!(EventStatus::Changed.toggled_delete(), EventStatus::Deleted);
    }

    #[test]
    fn db_codes_round_trip() {
        for status in [
            EventStatus::Ok,
            EventStatus::New,
            EventStatus::Changed,
            EventStatus::Deleted,
            EventStatus::NewDelete,
        ] {
            assert_eq!(EventStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(EventStatus::from_db(99), None);
    }
}
