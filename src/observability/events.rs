//! Observable events
//!
//! Events are explicit and typed. Each event carries its own severity so
//! that call sites only name what happened.

use std::fmt;

use super::logger::Severity;

/// Observable events in tablestore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Database directory
    /// Table created in the directory
    TableCreated,
    /// Table removed from the directory
    TableDeleted,
    /// Database written to disk
    DatabaseSaved,
    /// Database read from disk
    DatabaseLoaded,

    // Table mutations
    /// Row appended
    RowInserted,
    /// Row replaced in place
    RowUpdated,
    /// Row removed
    RowDeleted,
    /// Column order changed
    ColumnsReordered,
    /// Undeclared keys discarded on write
    ExtraFieldsDropped,

    // Commands
    /// Command rejected with an error
    CommandFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::TableCreated => "TABLE_CREATED",
            Event::TableDeleted => "TABLE_DELETED",
            Event::DatabaseSaved => "DATABASE_SAVED",
            Event::DatabaseLoaded => "DATABASE_LOADED",
            Event::RowInserted => "ROW_INSERTED",
            Event::RowUpdated => "ROW_UPDATED",
            Event::RowDeleted => "ROW_DELETED",
            Event::ColumnsReordered => "COLUMNS_REORDERED",
            Event::ExtraFieldsDropped => "EXTRA_FIELDS_DROPPED",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Returns the severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::RowInserted | Event::RowUpdated | Event::RowDeleted => Severity::Trace,
            Event::ExtraFieldsDropped => Severity::Warn,
            Event::CommandFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_upper_snake() {
        let events = [
            Event::ConfigLoaded,
            Event::TableCreated,
            Event::TableDeleted,
            Event::DatabaseSaved,
            Event::DatabaseLoaded,
            Event::RowInserted,
            Event::RowUpdated,
            Event::RowDeleted,
            Event::ColumnsReordered,
            Event::ExtraFieldsDropped,
            Event::CommandFailed,
        ];
        for event in events {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'), "{}", name);
            assert_eq!(event.to_string(), name);
        }
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::RowInserted.severity(), Severity::Trace);
        assert_eq!(Event::TableCreated.severity(), Severity::Info);
        assert_eq!(Event::ExtraFieldsDropped.severity(), Severity::Warn);
        assert_eq!(Event::CommandFailed.severity(), Severity::Error);
    }
}
