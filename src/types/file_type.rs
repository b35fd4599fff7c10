//! The closed set of target kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RusveError;

/// Kind of target a file belongs to.
///
/// The wire carries this as a proto3 enum. Values outside the enumeration are
/// rejected with [`RusveError::InvalidArgument`] rather than coerced to
/// [`FileType::Document`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Free-form document attached to a target. Zero value on the wire.
    #[default]
    Document,
    /// Profile image of a user.
    Avatar,
}

impl FileType {
    pub const ALL: [FileType; 2] = [FileType::Document, FileType::Avatar];

    /// Integer carried on the wire.
    pub fn wire_value(self) -> i32 {
        match self {
            FileType::Document => 0,
            FileType::Avatar => 1,
        }
    }

    /// Proto enum value name, as stored by the original backends.
    pub fn as_str_name(self) -> &'static str {
        match self {
            FileType::Document => "DOCUMENT",
            FileType::Avatar => "AVATAR",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str_name() == name)
    }
}

impl TryFrom<i32> for FileType {
    type Error = RusveError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|t| t.wire_value() == value)
            .ok_or_else(|| RusveError::InvalidArgument(format!("unknown file type {value}")))
    }
}

impl FromStr for FileType {
    type Err = RusveError;

    /// Accepts either the proto name (`AVATAR`) or the lowercase form (`avatar`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_name(&s.to_ascii_uppercase())
            .ok_or_else(|| RusveError::InvalidArgument(format!("unknown file type '{s}'")))
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_document() {
        assert_eq!(FileType::try_from(0).unwrap(), FileType::Document);
        assert_eq!(FileType::default(), FileType::Document);
    }

    #[test]
    fn out_of_range_is_rejected() {
        for value in [-1, 2, 42] {
            let err = FileType::try_from(value).unwrap_err();
            assert!(matches!(err, RusveError::InvalidArgument(_)), "{value}: {err}");
        }
    }

    #[test]
    fn wire_values_are_distinct() {
        assert_ne!(
            FileType::Document.wire_value(),
            FileType::Avatar.wire_value()
        );
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("avatar".parse::<FileType>().unwrap(), FileType::Avatar);
        assert_eq!("DOCUMENT".parse::<FileType>().unwrap(), FileType::Document);
        assert!("image".parse::<FileType>().is_err());
    }

    #[test]
    fn str_name_lookup() {
        assert_eq!(FileType::from_str_name("AVATAR"), Some(FileType::Avatar));
        assert_eq!(FileType::from_str_name("avatar"), None);
    }
}
