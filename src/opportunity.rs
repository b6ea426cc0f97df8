//! Control-vs-opportunity comparison table
//!
//! Compares a set of opportunity returns against a control cost, expressed as the
//! percentage by which each opportunity beats (or trails) the control.

use serde::Serialize;

/// Control cost used when none is supplied (percent)
pub const DEFAULT_CONTROL_COST: f64 = 7.0;

/// Opportunities shown when none are supplied (percent)
pub const DEFAULT_OPPORTUNITIES: [f64; 4] = [0.0, 5.0, 10.0, 15.0];

/// Allowed control cost range (percent)
pub const CONTROL_COST_RANGE: (f64, f64) = (0.0, 20.0);

/// Direction of a formatted return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReturnClass {
    Positive,
    Negative,
    Zero,
}

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunityRow {
    /// Opportunity return (percent)
    pub opportunity: f64,
    /// Relative return over the control (percent), None for a zero control
    pub control_return: Option<f64>,
    pub class: ReturnClass,
    /// Whether this row is the control itself
    pub is_control: bool,
}

/// Relative return of `opportunity` over `control`, in percent
///
/// Undefined for a zero control cost.
pub fn control_return(opportunity: f64, control: f64) -> Option<f64> {
    if control == 0.0 {
        return None;
    }
    Some((opportunity - control) / control * 100.0)
}

/// Round half up, the way the browser table rounds
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Format a relative return as `+N%`, `-N%` or `0%`
pub fn format_return(value: f64) -> String {
    let rounded = round_half_up(value);
    if rounded > 0.0 {
        format!("+{}%", rounded)
    } else if rounded < 0.0 {
        format!("{}%", rounded)
    } else {
        "0%".to_string()
    }
}

/// Classify a relative return after rounding
pub fn return_class(value: f64) -> ReturnClass {
    let rounded = round_half_up(value);
    if rounded > 0.0 {
        ReturnClass::Positive
    } else if rounded < 0.0 {
        ReturnClass::Negative
    } else {
        ReturnClass::Zero
    }
}

/// Clamp a control cost to the allowed range
pub fn clamp_control_cost(value: f64) -> f64 {
    value.clamp(CONTROL_COST_RANGE.0, CONTROL_COST_RANGE.1)
}

/// Parse the leading decimal number of `text`, ignoring any trailing characters
///
/// `"5%"` reads as 5 and `"10abc"` as 10. Returns `None` when no digits lead.
fn parse_leading_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

/// Parse a comma-separated opportunity list
///
/// Each entry is read by its leading number, so `"5%"` counts as 5. Entries with
/// no leading number and values outside 0..=100 are dropped. The control cost is
/// always included; the result is deduplicated and sorted ascending.
pub fn parse_opportunities(input: &str, control: f64) -> Vec<f64> {
    let mut values: Vec<f64> = input
        .split(',')
        .filter_map(|v| parse_leading_number(v.trim()))
        .filter(|v| (0.0..=100.0).contains(v))
        .collect();
    values.push(control);

    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();
    values
}

/// Build the table rows for a control cost and opportunity list
pub fn build_table(control: f64, opportunities: &[f64]) -> Vec<OpportunityRow> {
    opportunities
        .iter()
        .map(|&opportunity| {
            let control_return = control_return(opportunity, control);
            OpportunityRow {
                opportunity,
                control_return,
                class: control_return.map(return_class).unwrap_or(ReturnClass::Zero),
                is_control: opportunity == control,
            }
        })
        .collect()
}

/// Export the table as CSV with an `Opportunity,Return` header
pub fn table_to_csv(rows: &[OpportunityRow]) -> csv::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Opportunity", "Return"])?;
    for row in rows {
        let formatted = row.control_return.map(format_return).unwrap_or_else(|| "n/a".to_string());
        writer.write_record([format!("{:.1}%", row.opportunity), formatted])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
