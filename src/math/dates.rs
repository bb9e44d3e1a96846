//! Date arithmetic on `MM/DD/YYYY` strings.
//!
//! Dates are folded into a single integer `YYYYMMDD` so that ordering and
//! whole-year differences need no calendar logic. The voter extract only
//! needs year-of-birth granularity, so ages ignore month/day precision.

use crate::error::AppError;

/// Result of an age computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeOutcome {
    /// Whole years between birth and the reference date.
    Years(u32),
    /// The birth date lies after the reference date (bad data).
    ///
    /// `diff` is the negative `YYYYMMDD` difference.
    BornAfter { diff: i64 },
}

impl AgeOutcome {
    /// The age as a number, with the implausible case mapped to `diff / 10000`.
    ///
    /// A `BornAfter` value is never a real age; ingest only logs it.
    pub fn as_fraction(self) -> f64 {
        match self {
            AgeOutcome::Years(y) => y as f64,
            AgeOutcome::BornAfter { diff } => diff as f64 / 10_000.0,
        }
    }
}

/// Convert `MM/DD/YYYY` into `YYYY*10000 + MM*100 + DD`.
pub fn date_to_comparable_int(date: &str) -> Result<i64, AppError> {
    let tokens: Vec<&str> = date.trim().split('/').collect();
    if tokens.len() < 3 {
        return Err(AppError::format(format!(
            "Invalid date '{date}'. Expected MM/DD/YYYY."
        )));
    }

    let month = parse_token(tokens[0], date, 2)?;
    let day = parse_token(tokens[1], date, 2)?;
    let year = parse_token(tokens[2], date, 18)?;

    // Month and day fit in two digits; only the year can push past i64.
    year.checked_mul(10_000)
        .and_then(|v| v.checked_add(month * 100 + day))
        .ok_or_else(|| AppError::format(format!("Invalid date '{date}': year out of range.")))
}

/// Whole years from `birth_date` to `as_of`.
pub fn age(birth_date: &str, as_of: &str) -> Result<AgeOutcome, AppError> {
    let birth = date_to_comparable_int(birth_date)?;
    let as_of = date_to_comparable_int(as_of)?;
    let diff = as_of - birth;
    if diff < 0 {
        return Ok(AgeOutcome::BornAfter { diff });
    }
    // `diff` is non-negative here, so integer division is the floor.
    let years = u32::try_from(diff / 10_000)
        .map_err(|_| AppError::format(format!("Age out of range for birth date '{birth_date}'.")))?;
    Ok(AgeOutcome::Years(years))
}

/// True when `date` falls on or before `deadline`.
pub fn meets_deadline(date: &str, deadline: &str) -> Result<bool, AppError> {
    Ok(date_to_comparable_int(date)? <= date_to_comparable_int(deadline)?)
}

fn parse_token(token: &str, date: &str, max_digits: usize) -> Result<i64, AppError> {
    let token = token.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::format(format!(
            "Invalid date '{date}'. Expected numeric MM/DD/YYYY."
        )));
    }
    if token.len() > max_digits {
        return Err(AppError::format(format!(
            "Invalid date '{date}'. '{token}' has too many digits."
        )));
    }
    token
        .parse::<i64>()
        .map_err(|e| AppError::format(format!("Invalid date '{date}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn comparable_int_layout() {
        assert_eq!(date_to_comparable_int("11/03/2020").unwrap(), 20201103);
        assert_eq!(date_to_comparable_int(" 1/2/1999 ").unwrap(), 19990102);
    }

    #[test]
    fn comparable_int_is_chronological() {
        let dates = [
            "12/31/1999",
            "01/01/2000",
            "01/02/2000",
            "02/01/2000",
            "11/03/2020",
            "11/04/2020",
        ];
        let ints: Vec<i64> = dates
            .iter()
            .map(|d| date_to_comparable_int(d).unwrap())
            .collect();
        assert!(ints.windows(2).all(|w| w[0] <= w[1]));

        for pair in dates.windows(2) {
            assert!(meets_deadline(pair[0], pair[1]).unwrap());
            assert!(!meets_deadline(pair[1], pair[0]).unwrap());
        }
        assert!(meets_deadline("11/03/2020", "11/03/2020").unwrap());
    }

    #[test]
    fn too_few_tokens_is_a_format_error() {
        let err = date_to_comparable_int("11/2020").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(date_to_comparable_int("").is_err());
        assert!(date_to_comparable_int("aa/bb/cccc").is_err());
    }

    #[test]
    fn oversized_tokens_are_format_errors() {
        let err = date_to_comparable_int("01/01/99999999999999999").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(
            date_to_comparable_int("01/01/9999999999999999999").unwrap_err().kind(),
            ErrorKind::Format
        );
        assert!(date_to_comparable_int("001/01/2000").is_err());
        assert!(date_to_comparable_int("01/123456789012345678901/2000").is_err());
        assert!(age("01/01/99999999999999999", "11/03/2020").is_err());
    }

    #[test]
    fn age_truncates_to_whole_years() {
        assert_eq!(age("01/01/2000", "01/01/2020").unwrap(), AgeOutcome::Years(20));
        assert_eq!(age("06/15/1990", "11/03/2020").unwrap(), AgeOutcome::Years(30));
        assert_eq!(age("11/04/2002", "11/03/2020").unwrap(), AgeOutcome::Years(17));
    }

    #[test]
    fn birth_after_reference_is_tagged() {
        let outcome = age("01/01/2030", "11/03/2020").unwrap();
        assert_eq!(outcome, AgeOutcome::BornAfter { diff: 20201103 - 20300101 });
        assert!(outcome.as_fraction() < 0.0);
        assert!((outcome.as_fraction() - (-9.8998)).abs() < 1e-9);
    }
}
