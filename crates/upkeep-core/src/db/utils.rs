//! Row decoding helpers shared by the query modules.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};

fn invalid_text(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn optional_timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Timestamp>()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
        })
        .transpose()
}

/// Reads a `YYYY-MM-DD` date column.
pub(crate) fn date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn optional_date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Date>()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
        })
        .transpose()
}

/// Reads a text column holding one of the string-backed enums.
pub(crate) fn parsed_at<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let text: String = row.get(idx)?;
    text.parse::<T>().map_err(|e| invalid_text(idx, e))
}

/// Formats an optional date for a bound parameter.
pub(crate) fn date_text(date: Option<Date>) -> Option<String> {
    date.map(|d| d.to_string())
}
