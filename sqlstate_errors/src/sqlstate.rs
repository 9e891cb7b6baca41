//! SQLSTATE code types
//!
//! A SQLSTATE is five characters from `[0-9A-Z]`: a two-character class
//! followed by a three-character subclass.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Result type for SQLSTATE parsing
pub type SqlStateResult<T> = Result<T, SqlStateError>;

/// Errors raised while parsing SQLSTATE codes and classes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqlStateError {
    #[error("SQLSTATE '{code}' must be {expected} characters long, found {found}")]
    InvalidLength {
        code: String,
        expected: usize,
        found: usize,
    },

    #[error("SQLSTATE '{code}' contains invalid character {character:?} at position {position}")]
    InvalidCharacter {
        code: String,
        position: usize,
        character: char,
    },
}

fn is_sqlstate_char(c: u8) -> bool {
    c.is_ascii_digit() || c.is_ascii_uppercase()
}

fn parse_fixed<const N: usize>(code: &str) -> SqlStateResult<[u8; N]> {
    let found = code.chars().count();
    if found != N {
        return Err(SqlStateError::InvalidLength {
            code: code.to_string(),
            expected: N,
            found,
        });
    }

    let mut bytes = [0u8; N];
    for (position, character) in code.chars().enumerate() {
        if !character.is_ascii() || !is_sqlstate_char(character as u8) {
            return Err(SqlStateError::InvalidCharacter {
                code: code.to_string(),
                position,
                character,
            });
        }
        bytes[position] = character as u8;
    }
    Ok(bytes)
}

fn ascii_str(bytes: &[u8]) -> &str {
    // Construction only admits ASCII digits and letters
    std::str::from_utf8(bytes).unwrap_or_default()
}

/// A validated five-character SQLSTATE code
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SqlState([u8; 5]);

impl SqlState {
    pub const LEN: usize = 5;

    pub fn parse(code: &str) -> SqlStateResult<Self> {
        parse_fixed::<5>(code).map(Self)
    }

    pub fn as_str(&self) -> &str {
        ascii_str(&self.0)
    }

    /// The two-character class, e.g. `23` for `23505`
    pub fn class(&self) -> SqlStateClass {
        SqlStateClass([self.0[0], self.0[1]])
    }

    /// The three-character subclass, e.g. `505` for `23505`
    pub fn subclass(&self) -> &str {
        ascii_str(&self.0[2..])
    }

    /// Whether this is the generic code of its class (subclass `000`)
    pub fn is_class_generic(&self) -> bool {
        self.subclass() == "000"
    }
}

impl std::fmt::Display for SqlState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for SqlState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqlState({})", self.as_str())
    }
}

impl FromStr for SqlState {
    type Err = SqlStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for SqlState {
    type Error = SqlStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for SqlState {
    type Error = SqlStateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SqlState> for String {
    fn from(code: SqlState) -> Self {
        code.as_str().to_string()
    }
}

/// A validated two-character SQLSTATE class
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SqlStateClass([u8; 2]);

impl SqlStateClass {
    pub const LEN: usize = 2;

    /// Class `01`, whose codes are warnings rather than errors
    pub const WARNING: SqlStateClass = SqlStateClass(*b"01");

    pub fn parse(class: &str) -> SqlStateResult<Self> {
        parse_fixed::<2>(class).map(Self)
    }

    pub fn as_str(&self) -> &str {
        ascii_str(&self.0)
    }
}

impl std::fmt::Display for SqlStateClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for SqlStateClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqlStateClass({})", self.as_str())
    }
}

impl FromStr for SqlStateClass {
    type Err = SqlStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SqlStateClass {
    type Error = SqlStateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SqlStateClass> for String {
    fn from(class: SqlStateClass) -> Self {
        class.as_str().to_string()
    }
}
