use serde::{Deserialize, Serialize};

/// Logical data types. Never dialect-specific: the type formatter owns the
/// mapping to each dialect's spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataKind {
    Undefined,
    Char,
    VarChar,
    Text,
    NChar,
    NVarChar,
    NText,
    Binary,
    VarBinary,
    Blob,
    Image,
    Boolean,
    Guid,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    Money,
    SmallMoney,
    Date,
    Time,
    DateTime,
    DateTime2,
    SmallDateTime,
    DateTimeOffset,
    Timestamp,
    Xml,
    Json,
}

impl DataKind {
    /// Every logical type, in declaration order.
    pub const ALL: &'static [DataKind] = &[
        DataKind::Undefined,
        DataKind::Char,
        DataKind::VarChar,
        DataKind::Text,
        DataKind::NChar,
        DataKind::NVarChar,
        DataKind::NText,
        DataKind::Binary,
        DataKind::VarBinary,
        DataKind::Blob,
        DataKind::Image,
        DataKind::Boolean,
        DataKind::Guid,
        DataKind::SByte,
        DataKind::Byte,
        DataKind::Int16,
        DataKind::UInt16,
        DataKind::Int32,
        DataKind::UInt32,
        DataKind::Int64,
        DataKind::UInt64,
        DataKind::Single,
        DataKind::Double,
        DataKind::Decimal,
        DataKind::Money,
        DataKind::SmallMoney,
        DataKind::Date,
        DataKind::Time,
        DataKind::DateTime,
        DataKind::DateTime2,
        DataKind::SmallDateTime,
        DataKind::DateTimeOffset,
        DataKind::Timestamp,
        DataKind::Xml,
        DataKind::Json,
    ];

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DataKind::SByte
                | DataKind::Byte
                | DataKind::Int16
                | DataKind::UInt16
                | DataKind::Int32
                | DataKind::UInt32
                | DataKind::Int64
                | DataKind::UInt64
        )
    }

    /// Whether a `(length)` suffix applies to this type.
    pub fn takes_length(self) -> bool {
        matches!(
            self,
            DataKind::Char
                | DataKind::VarChar
                | DataKind::NChar
                | DataKind::NVarChar
                | DataKind::Binary
                | DataKind::VarBinary
        )
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A data type descriptor: logical kind plus optional length/precision/scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlDataType {
    pub kind: DataKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u8>,
}

impl SqlDataType {
    pub fn new(kind: DataKind) -> Self {
        Self {
            kind,
            length: None,
            precision: None,
            scale: None,
        }
    }

    pub fn with_length(kind: DataKind, length: u32) -> Self {
        Self {
            length: Some(length),
            ..Self::new(kind)
        }
    }

    pub fn decimal(precision: u8, scale: u8) -> Self {
        Self {
            precision: Some(precision),
            scale: Some(scale),
            ..Self::new(DataKind::Decimal)
        }
    }
}

impl From<DataKind> for SqlDataType {
    fn from(kind: DataKind) -> Self {
        Self::new(kind)
    }
}
