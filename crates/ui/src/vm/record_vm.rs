use chrono::NaiveDate;
use rounds_core::time::parse_iso_date;

use crate::views::ViewError;
use crate::vm::format_delta;

/// Validated contents of the record form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordInput {
    pub topic: String,
    pub delta: i64,
    pub date: NaiveDate,
}

/// Validate raw form values against the known topics.
///
/// # Errors
///
/// Returns the `ViewError` describing the first invalid field.
pub fn parse_record_form(
    topics: &[String],
    topic: &str,
    quantity: &str,
    date: &str,
) -> Result<RecordInput, ViewError> {
    if !topics.iter().any(|t| t == topic) {
        return Err(ViewError::UnknownTopic);
    }
    let delta = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| ViewError::InvalidQuantity)?;
    let date = parse_iso_date(date.trim()).map_err(|_| ViewError::InvalidDate)?;

    Ok(RecordInput {
        topic: topic.to_string(),
        delta,
        date,
    })
}

#[must_use]
pub fn confirmation_message(topic: &str, delta: i64) -> String {
    format!("{topic}: {} rounds recorded", format_delta(delta))
}
