use chrono::{NaiveDate, ParseError};
use serde_json::{Map, Value};

use super::types::{DocumentHeading, ModelSummary, SummaryEntry, SummaryWarning};
use super::SummarizingError;

/// Placeholder copied verbatim from the schema example when no date exists.
const DATE_PLACEHOLDER: &str = "dd/mm/yyyy";

/// Parse the model's JSON output into typed summary entries.
///
/// Structural problems (not JSON, no `summary` array, missing required
/// fields) are errors. Field-level problems that do not hide content become
/// warnings. `known_filenames` are the basenames of the uploaded files.
pub fn parse_summary_response(
    response: &str,
    known_filenames: &[&str],
) -> Result<(ModelSummary, Vec<SummaryWarning>), SummarizingError> {
    let root: Value = serde_json::from_str(response.trim())
        .map_err(|e| SummarizingError::InvalidSummary(format!("not valid JSON: {e}")))?;

    let items = root
        .get("summary")
        .and_then(Value::as_array)
        .ok_or_else(|| SummarizingError::InvalidSummary("missing 'summary' array".into()))?;

    let mut warnings = Vec::new();
    let mut entries = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| {
            SummarizingError::InvalidSummary(format!("item {index} is not an object"))
        })?;

        let filename = required_str(obj, "filename", index)?;
        let heading = DocumentHeading::parse(&required_str(obj, "heading", index)?);
        let body = required_str(obj, "body", index)?;

        if !known_filenames.contains(&filename.as_str()) {
            warnings.push(SummaryWarning::UnknownFilename {
                index,
                filename: filename.clone(),
            });
        }

        let date = match obj.get("date") {
            None | Some(Value::Null) => None,
            Some(value) => {
                let raw = value_as_text(value);
                match parse_summary_date(&raw) {
                    Ok(date) => date,
                    Err(_) => {
                        warnings.push(SummaryWarning::UnparseableDate { index, value: raw });
                        None
                    }
                }
            }
        };

        let page_number = match obj.get("pagenumber") {
            None | Some(Value::Null) => None,
            Some(value) => match parse_page_number(value) {
                Some(n) => Some(n),
                None => {
                    warnings.push(SummaryWarning::InvalidPageNumber {
                        index,
                        value: value.to_string(),
                    });
                    None
                }
            },
        };

        let subheading = obj
            .get("subheading")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        entries.push(SummaryEntry {
            filename,
            heading,
            subheading,
            date,
            page_number,
            body,
        });
    }

    Ok((ModelSummary { entries }, warnings))
}

fn required_str(
    obj: &Map<String, Value>,
    field: &str,
    index: usize,
) -> Result<String, SummarizingError> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            SummarizingError::InvalidSummary(format!(
                "item {index} is missing a non-empty '{field}'"
            ))
        })
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// `Ok(None)` for empty or placeholder dates, `Err` for anything unreadable.
pub fn parse_summary_date(raw: &str) -> Result<Option<NaiveDate>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(DATE_PLACEHOLDER) {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").map(Some)
}

/// Page numbers arrive as integers or numeric strings; both must be >= 1.
fn parse_page_number(value: &Value) -> Option<usize> {
    let n = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    if n >= 1 {
        usize::try_from(n).ok()
    } else {
        None
    }
}
