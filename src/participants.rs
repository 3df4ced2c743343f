//! The ordered, non-empty list of names a draw picks from.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Names shown when nothing is supplied on the command line
pub const DEFAULT_PARTICIPANTS: [&str; 8] = [
    "Alice Johnson",
    "Bob Smith",
    "Charlie Brown",
    "Diana Prince",
    "Ethan Hunt",
    "Fiona Gallagher",
    "George Miller",
    "Hannah Lee",
];

/// Immutable participant names; never empty once constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantList {
    names: Vec<String>,
}

impl ParticipantList {
    /// Build a list from names as given, dropping blank entries
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name| !name.trim().is_empty())
            .collect();

        if names.is_empty() {
            return Err(ConfigError::NoParticipants);
        }
        Ok(Self { names })
    }

    /// Parse one name per line; blank lines and `#` comments are skipped
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadParticipants {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Never true for a constructed list
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for ParticipantList {
    fn default() -> Self {
        Self {
            names: DEFAULT_PARTICIPANTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_rejected() {
        let empty: Vec<String> = Vec::new();
        assert!(matches!(
            ParticipantList::new(empty),
            Err(ConfigError::NoParticipants)
        ));
        assert!(matches!(
            ParticipantList::new(["  ", ""]),
            Err(ConfigError::NoParticipants)
        ));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let list = ParticipantList::parse("# team\nAda\n\n  Grace  \n#Linus\nKen\n").unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["Ada", "Grace", "Ken"]);
        assert_eq!(list.get(1), Some("Grace"));
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn test_new_keeps_names_verbatim() {
        let list = ParticipantList::new([" Ada ", "", "Grace\t", "   "]).unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![" Ada ", "Grace\t"]);
        assert!(!list.contains("Ada"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ParticipantList::from_file(Path::new("/nonexistent/names.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/names.txt"));
    }

    #[test]
    fn test_default_list_is_populated() {
        let list = ParticipantList::default();
        assert_eq!(list.len(), DEFAULT_PARTICIPANTS.len());
        assert!(list.contains("Diana Prince"));
    }
}
