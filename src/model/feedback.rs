//! Client feedback log
//!
//! Entries keep the client name and text separately in memory, but the
//! persisted form is one string per record with a fixed `": "` separator.
//! Decoding splits at the first separator;
//! a record without one loads with an empty client name.

/// Separator between client name and text in the persisted form.
pub const FEEDBACK_SEPARATOR: &str = ": ";

#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackEntry {
    pub client_name: String,
    pub text: String,
}

impl FeedbackEntry {
    /// Render the persisted `"client: text"` form.
    pub fn to_record(&self) -> String {
        format!("{}{}{}", self.client_name, FEEDBACK_SEPARATOR, self.text)
    }

    /// Recover an entry from the persisted form.
    pub fn from_record(record: &str) -> Self {
        match record.split_once(FEEDBACK_SEPARATOR) {
            Some((client_name, text)) => FeedbackEntry {
                client_name: client_name.to_string(),
                text: text.to_string(),
            },
            None => FeedbackEntry {
                client_name: String::new(),
                text: record.to_string(),
            },
        }
    }
}

/// Ordered log of everything clients have said about the service.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedbackLog {
    entries: Vec<FeedbackEntry>,
}

impl FeedbackLog {
    pub fn new() -> Self {
        FeedbackLog::default()
    }

    pub fn append(&mut self, client_name: impl Into<String>, text: impl Into<String>) {
        self.entries.push(FeedbackEntry {
            client_name: client_name.into(),
            text: text.into(),
        });
    }

    pub fn entries(&self) -> &[FeedbackEntry] {
        &self.entries
    }

    pub(crate) fn replace(&mut self, entries: Vec<FeedbackEntry>) {
        self.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip() {
        let entry = FeedbackEntry {
            client_name: "alice".to_string(),
            text: "great pizza".to_string(),
        };
        assert_eq!(entry.to_record(), "alice: great pizza");
        assert_eq!(FeedbackEntry::from_record("alice: great pizza"), entry);
    }

    #[test]
    fn test_record_without_separator() {
        let entry = FeedbackEntry::from_record("anonymous praise");
        assert_eq!(entry.client_name, "");
        assert_eq!(entry.text, "anonymous praise");
    }

    #[test]
    fn test_split_is_at_first_separator() {
        // Text containing the separator survives; a name containing it
        // does not round-trip its split point (the format is lossy).
        let entry = FeedbackEntry::from_record("bob: good: really good");
        assert_eq!(entry.client_name, "bob");
        assert_eq!(entry.text, "good: really good");
    }

    #[test]
    fn test_append_keeps_order() {
        let mut log = FeedbackLog::new();
        log.append("alice", "good");
        log.append("bob", "slow");

        let names: Vec<&str> = log.entries().iter().map(|e| e.client_name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }
}
