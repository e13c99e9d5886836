use time::{format_description::well_known::Rfc3339, PrimitiveDateTime};

/// Timestamps are stored as UTC `TIMESTAMP` columns and rendered as RFC 3339.
pub(crate) fn format_primitive(value: PrimitiveDateTime) -> String {
    value.assume_utc().format(&Rfc3339).unwrap_or_else(|_| value.assume_utc().to_string())
}

pub(crate) fn format_optional(value: Option<PrimitiveDateTime>) -> Option<String> {
    value.map(format_primitive)
}
