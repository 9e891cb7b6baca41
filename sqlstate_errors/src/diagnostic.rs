//! Diagnostic records reported by the database engine
//!
//! A [`DiagnosticRecord`] is the bag of fields the protocol layer extracts
//! from an error or notice response. Each field is identified on the wire
//! by a single byte; identifiers this crate does not know are kept verbatim
//! in an `extra` map.
//!
//! Records are built once and then only read.

use crate::sqlstate::SqlState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

macro_rules! diagnostic_fields {
    ($( $(#[$meta:meta])* $variant:ident => $field:ident = $code:literal; )*) => {
        /// Known diagnostic fields and their one-byte identifiers
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum DiagnosticField {
            $( $(#[$meta])* $variant, )*
        }

        impl DiagnosticField {
            pub const ALL: &'static [DiagnosticField] = &[ $( DiagnosticField::$variant, )* ];

            /// Wire identifier, e.g. `b'C'` for the SQLSTATE
            pub fn code(&self) -> u8 {
                match self {
                    $( DiagnosticField::$variant => $code, )*
                }
            }

            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $( $code => Some(DiagnosticField::$variant), )*
                    _ => None,
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $( DiagnosticField::$variant => stringify!($field), )*
                }
            }
        }

        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct DiagnosticRecord {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                $field: Option<String>,
            )*
            #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
            extra: BTreeMap<String, String>,
        }

        impl DiagnosticRecord {
            $(
                pub fn $field(&self) -> Option<&str> {
                    self.$field.as_deref()
                }
            )*

            pub fn get(&self, field: DiagnosticField) -> Option<&str> {
                match field {
                    $( DiagnosticField::$variant => self.$field(), )*
                }
            }

            fn slot_mut(&mut self, field: DiagnosticField) -> &mut Option<String> {
                match field {
                    $( DiagnosticField::$variant => &mut self.$field, )*
                }
            }
        }
    };
}

diagnostic_fields! {
    /// Localized severity (ERROR, FATAL, WARNING, ...)
    Severity => severity = b'S';
    /// Severity that is never localized
    SeverityNonlocalized => severity_nonlocalized = b'V';
    Sqlstate => sqlstate = b'C';
    MessagePrimary => message_primary = b'M';
    MessageDetail => message_detail = b'D';
    MessageHint => message_hint = b'H';
    /// 1-based character offset into the statement
    StatementPosition => statement_position = b'P';
    InternalPosition => internal_position = b'p';
    InternalQuery => internal_query = b'q';
    Context => context = b'W';
    SchemaName => schema_name = b's';
    TableName => table_name = b't';
    ColumnName => column_name = b'c';
    DatatypeName => datatype_name = b'd';
    ConstraintName => constraint_name = b'n';
    SourceFile => source_file = b'F';
    SourceLine => source_line = b'L';
    SourceFunction => source_function = b'R';
}

impl std::fmt::Display for DiagnosticField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl DiagnosticRecord {
    /// Record with only a primary message
    pub fn new(message: impl Into<String>) -> Self {
        Self::default().with_field(DiagnosticField::MessagePrimary, message)
    }

    /// Build from typed field pairs; a repeated field keeps its last value
    pub fn from_fields<I, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (DiagnosticField, V)>,
        V: Into<String>,
    {
        fields
            .into_iter()
            .fold(Self::default(), |record, (field, value)| {
                record.with_field(field, value)
            })
    }

    /// Build from `(identifier, text)` pairs as extracted from the wire
    pub fn from_raw_fields<I, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (u8, V)>,
        V: Into<String>,
    {
        let mut record = Self::default();
        for (code, value) in fields {
            match DiagnosticField::from_code(code) {
                Some(field) => *record.slot_mut(field) = Some(value.into()),
                None => {
                    log::trace!("Keeping unknown diagnostic field {:?}", char::from(code));
                    record
                        .extra
                        .insert(char::from(code).to_string(), value.into());
                }
            }
        }
        record
    }

    /// Set the SQLSTATE as received; the text is not validated here
    pub fn with_sqlstate(self, code: impl Into<String>) -> Self {
        self.with_field(DiagnosticField::Sqlstate, code)
    }

    pub fn with_field(mut self, field: DiagnosticField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    /// The SQLSTATE, if present and well formed
    pub fn sqlstate_code(&self) -> Option<SqlState> {
        self.sqlstate().and_then(|text| SqlState::parse(text).ok())
    }

    /// Known fields that are set, in wire-identifier declaration order
    pub fn fields(&self) -> impl Iterator<Item = (DiagnosticField, &str)> + '_ {
        DiagnosticField::ALL
            .iter()
            .filter_map(move |field| self.get(*field).map(|value| (*field, value)))
    }

    /// Fields with identifiers this crate does not know, keyed by identifier
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none() && self.extra.is_empty()
    }
}
