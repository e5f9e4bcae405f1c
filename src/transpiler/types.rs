//! Type & literal formatting.
//!
//! Dialects spell the types they care about through
//! [`SqlGenerator::data_type`]; everything else falls back to the generic
//! table below.

use chrono::{NaiveDateTime, NaiveTime, Timelike};

use super::traits::SqlGenerator;
use crate::ast::{DataKind, Field, SqlDataType, Value};
use crate::error::{RenderError, RenderResult};

/// Render a data type for `generator`, falling back to the generic mapping.
pub fn format_type(generator: &dyn SqlGenerator, ty: &SqlDataType) -> RenderResult<String> {
    match generator.data_type(ty) {
        Some(name) => Ok(name),
        None => generic_type(generator.name(), ty),
    }
}

/// Column type for CREATE TABLE: the identity token wins over the mapping.
pub fn column_type(generator: &dyn SqlGenerator, field: &Field) -> RenderResult<String> {
    if field.identity {
        if let Some(token) = generator.identity_column_type(field) {
            return Ok(token);
        }
    }
    format_type(generator, &field.data_type)
}

/// The shared mapping every dialect falls back to.
pub fn generic_type(dialect: &'static str, ty: &SqlDataType) -> RenderResult<String> {
    let base = match ty.kind {
        DataKind::Undefined => {
            return Err(RenderError::unsupported(dialect, "data type Undefined"));
        }
        DataKind::Char => "Char",
        DataKind::VarChar => "VarChar",
        DataKind::Text => "Text",
        DataKind::NChar => "NChar",
        DataKind::NVarChar => "NVarChar",
        DataKind::NText => "NText",
        DataKind::Binary => "Binary",
        DataKind::VarBinary => "VarBinary",
        DataKind::Blob => "Blob",
        DataKind::Image => "Image",
        DataKind::Boolean => "Bit",
        DataKind::Guid => "UniqueIdentifier",
        DataKind::SByte | DataKind::Byte => "TinyInt",
        DataKind::Int16 => "SmallInt",
        DataKind::UInt16 | DataKind::Int32 => "Int",
        DataKind::UInt32 | DataKind::Int64 => "BigInt",
        DataKind::UInt64 => return Ok("Decimal(20,0)".to_string()),
        DataKind::Single => "Real",
        DataKind::Double => "Float",
        DataKind::Decimal => return Ok(decimal("Decimal", ty)),
        DataKind::Money => "Money",
        DataKind::SmallMoney => "SmallMoney",
        DataKind::Date => "Date",
        DataKind::Time => "Time",
        DataKind::DateTime => "DateTime",
        DataKind::DateTime2 => "DateTime2",
        DataKind::SmallDateTime => "SmallDateTime",
        DataKind::DateTimeOffset => "DateTimeOffset",
        DataKind::Timestamp => "Timestamp",
        DataKind::Xml => "Xml",
        DataKind::Json => "Json",
    };
    Ok(with_length(base, ty))
}

/// `name(length)` for length-bearing kinds, `name` otherwise.
pub fn with_length(name: &str, ty: &SqlDataType) -> String {
    match ty.length {
        Some(len) if ty.kind.takes_length() => format!("{}({})", name, len),
        _ => name.to_string(),
    }
}

/// `name(p,s)`, `name(p)` or `name`, depending on what the descriptor has.
pub fn decimal(name: &str, ty: &SqlDataType) -> String {
    match (ty.precision, ty.scale) {
        (Some(p), Some(s)) => format!("{}({},{})", name, p, s),
        (Some(p), None) => format!("{}({})", name, p),
        _ => name.to_string(),
    }
}

/// Render a literal value.
pub fn format_literal(generator: &dyn SqlGenerator, value: &Value) -> RenderResult<String> {
    Ok(match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => generator.bool_literal(*b),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(RenderError::unsupported(
                    generator.name(),
                    format!("non-finite float literal {}", f),
                ));
            }
            format!("{:?}", f)
        }
        Value::Decimal(d) => {
            if !is_plain_number(d) {
                return Err(RenderError::contract(format!(
                    "decimal literal '{}' is not a plain number",
                    d
                )));
            }
            d.clone()
        }
        Value::String(s) => generator.string_literal(s),
        Value::Date(d) => generator.date_literal(*d),
        Value::Time(t) => generator.time_literal(*t),
        Value::DateTime(dt) => generator.datetime_literal(*dt),
        Value::Binary(bytes) => generator.binary_literal(bytes),
    })
}

/// Optional sign, digits, then optionally `.` and more digits.
fn is_plain_number(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(whole) && fraction.is_none_or(digits)
}

/// `HH:MM:SS`, with milliseconds only when present.
pub fn time_text(t: NaiveTime) -> String {
    if t.nanosecond() == 0 {
        t.format("%H:%M:%S").to_string()
    } else {
        t.format("%H:%M:%S%.3f").to_string()
    }
}

/// `YYYY-MM-DD HH:MM:SS`, with milliseconds only when present.
pub fn datetime_text(dt: NaiveDateTime) -> String {
    format!("{} {}", dt.date().format("%Y-%m-%d"), time_text(dt.time()))
}

pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
