use chrono::{Local, NaiveDate};
use crate::models::{
    CheckDigitRules, DocumentFormat, ExpiryValidationResult, ValidationIssue, ValidationIssueType,
};
use crate::utils::{MrzError, Result};

pub struct ExpiryValidator;

impl ExpiryValidator {
    pub fn validate<S: AsRef<str>>(lines: &[S]) -> Result<ExpiryValidationResult> {
        Self::validate_on(lines, Local::now().naive_local().date())
    }

    /// Same as [`ExpiryValidator::validate`] with an explicit "today".
    pub fn validate_on<S: AsRef<str>>(lines: &[S], today: NaiveDate) -> Result<ExpiryValidationResult> {
        let format = DocumentFormat::detect(lines)?;
        let segment = CheckDigitRules::expiry_segment(format);
        let raw = lines[segment.line]
            .as_ref()
            .get(segment.start..=segment.end)
            .ok_or_else(|| MrzError::InvalidDate("expiry date is out of range".to_string()))?;
        let expiry_date = Self::parse_date(raw)
            .ok_or_else(|| MrzError::InvalidDate(format!("Invalid expiry date: {}", raw)))?;

        let mut issues = Vec::new();
        let not_expired = expiry_date >= today;
        if !not_expired {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Expiry,
                message: format!("Document expired on {}", expiry_date),
            });
        }

        Ok(ExpiryValidationResult {
            is_valid: not_expired,
            not_expired,
            expiry_date,
            issues,
        })
    }

    // Expiry dates are YYMMDD and always read as 20YY
    fn parse_date(date_str: &str) -> Option<NaiveDate> {
        if date_str.len() != 6 || !date_str.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let year = date_str[0..2].parse::<i32>().ok()?;
        let month = date_str[2..4].parse::<u32>().ok()?;
        let day = date_str[4..6].parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(2000 + year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSPORT: [&str; 2] = [
        "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
        "L898902C36UTO7408122F1204159ZE184226B<<<<<10",
    ];

    #[test]
    fn test_expired_passport() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let result = ExpiryValidator::validate_on(&PASSPORT, today).unwrap();
        assert_eq!(result.expiry_date, NaiveDate::from_ymd_opt(2012, 4, 15).unwrap());
        assert!(!result.is_valid);
        assert_eq!(result.issues.len(), 1);
    }

    #[test]
    fn test_valid_until_expiry_day() {
        let today = NaiveDate::from_ymd_opt(2012, 4, 15).unwrap();
        assert!(ExpiryValidator::validate_on(&PASSPORT, today).unwrap().not_expired);
    }

    #[test]
    fn test_td1_reads_middle_line() {
        let lines = [
            "I<UTOD231458907<<<<<<<<<<<<<<<",
            "7408122F1204159UTO<<<<<<<<<<<6",
            "ERIKSSON<<ANNA<MARIA<<<<<<<<<<",
        ];
        let today = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let result = ExpiryValidator::validate_on(&lines, today).unwrap();
        assert_eq!(result.expiry_date, NaiveDate::from_ymd_opt(2012, 4, 15).unwrap());
    }

    #[test]
    fn test_impossible_date() {
        let lines = [
            "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
            "L898902C36UTO7408122F1213459ZE184226B<<<<<10",
        ];
        let err = ExpiryValidator::validate(&lines).unwrap_err();
        assert!(matches!(err, MrzError::InvalidDate(_)));
    }
}
