use chrono::{Days, Local, NaiveDate};

/// A simple calendar abstraction so services and tests agree on "today".
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(NaiveDate),
}

impl Clock {
    /// Returns a clock that follows the local calendar.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock pinned to the given date.
    #[must_use]
    pub fn fixed(on: NaiveDate) -> Self {
        Self::Fixed(on)
    }

    /// Returns today's date according to the clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::Default => Local::now().date_naive(),
            Clock::Fixed(d) => *d,
        }
    }

    /// If this is a fixed clock, advance it by `days`.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance_days(&mut self, days: u64) {
        if let Clock::Fixed(d) = self {
            if let Some(next) = d.checked_add_days(Days::new(days)) {
                *d = next;
            }
        }
    }
}

/// Deterministic date for tests and examples.
pub const FIXED_TEST_DATE: (i32, u32, u32) = (2024, 1, 10);

/// Returns a deterministic `NaiveDate` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed date cannot be represented.
#[must_use]
pub fn fixed_today() -> NaiveDate {
    let (y, m, d) = FIXED_TEST_DATE;
    NaiveDate::from_ymd_opt(y, m, d).expect("fixed test date should be valid")
}

/// Returns a `Clock` fixed at the deterministic test date.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_today())
}

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns the underlying `chrono` parse error for anything else.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_by_days() {
        let mut clock = fixed_clock();
        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_iso_date(" 2024-01-10 ").unwrap(), fixed_today());
        assert!(parse_iso_date("10/01/2024").is_err());
    }
}
