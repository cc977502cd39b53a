use chrono::NaiveDate;

pub const MAX_SWEEP_DAYS: u32 = 14;

/// # Errors
///
/// Will return `Err` if the value is not a real `DD/MM/YYYY` date
pub fn parse_match_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y")
        .map_err(|e| format!("'{value}' is not a DD/MM/YYYY date: {e}"))
}

/// # Errors
///
/// Will return `Err` if the value is not a whole number of seconds above zero
pub fn check_positive_secs(value: &str) -> Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err("must be at least 1 second".to_string()),
        Ok(secs) => Ok(secs),
        Err(e) => Err(format!("'{value}' is not a number of seconds: {e}")),
    }
}

/// # Errors
///
/// Will return `Err` if the value is not between 0 and 14
pub fn check_sweep_days(value: &str) -> Result<u32, String> {
    let days: u32 = value
        .trim()
        .parse()
        .map_err(|e| format!("'{value}' is not a number of days: {e}"))?;
    if days > MAX_SWEEP_DAYS {
        return Err(format!("sweep days must be at most {MAX_SWEEP_DAYS}"));
    }
    Ok(days)
}
