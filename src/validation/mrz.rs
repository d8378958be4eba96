use crate::models::{
    CheckDigitOutcome, CheckDigitRule, CheckDigitRules, DocumentFormat, MrzValidationResult,
    ValidationIssue, ValidationIssueType,
};
use crate::utils::{MrzError, Result};

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// ICAO 9303 check-digit validation.
pub struct MrzValidator;

impl MrzValidator {
    pub fn validate<S: AsRef<str>>(lines: &[S]) -> Result<MrzValidationResult> {
        let format = DocumentFormat::detect(lines)?;
        let lines: Vec<&[u8]> = lines.iter().map(|l| l.as_ref().as_bytes()).collect();

        let mut checks = Vec::new();
        let mut issues = Vec::new();
        for rule in CheckDigitRules::for_format(format) {
            let outcome = Self::check(&lines, rule)?;
            if !outcome.is_valid {
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::CheckDigit,
                    message: format!(
                        "{} check digit is '{}', expected {}",
                        outcome.name, outcome.found, outcome.expected
                    ),
                });
            }
            checks.push(outcome);
        }

        Ok(MrzValidationResult {
            format,
            is_valid: issues.is_empty(),
            checks,
            issues,
        })
    }

    /// Check digit of `data` on its own.
    pub fn check_digit(data: &str) -> Result<u32> {
        Self::weighted_sum(data.bytes(), 0).map(|sum| sum % 10)
    }

    /// `0-9` → 0-9, `A-Z` → 10-35, `<` → 0.
    pub fn char_value(c: u8) -> Option<u32> {
        match c {
            b'0'..=b'9' => Some((c - b'0') as u32),
            b'A'..=b'Z' => Some((c - b'A') as u32 + 10),
            b'<' => Some(0),
            _ => None,
        }
    }

    fn check(lines: &[&[u8]], rule: &CheckDigitRule) -> Result<CheckDigitOutcome> {
        let mut sum = 0;
        let mut position = 0;
        for segment in rule.segments {
            let chars = &lines[segment.line][segment.start..=segment.end];
            sum += Self::weighted_sum(chars.iter().copied(), position)?;
            position += chars.len();
        }

        let found = lines[rule.check_line][rule.check_pos];
        let expected = sum % 10;
        Ok(CheckDigitOutcome {
            name: rule.name,
            expected,
            found: found as char,
            is_valid: Self::char_value(found) == Some(expected),
        })
    }

    fn weighted_sum<I: Iterator<Item = u8>>(chars: I, offset: usize) -> Result<u32> {
        let mut sum = 0;
        for (i, c) in chars.enumerate() {
            let value = Self::char_value(c).ok_or_else(|| {
                MrzError::MrzParsing(format!("invalid MRZ character '{}'", c as char))
            })?;
            sum += value * WEIGHTS[(offset + i) % 3];
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digit_examples() {
        assert_eq!(MrzValidator::check_digit("L898902C3").unwrap(), 6);
        assert_eq!(MrzValidator::check_digit("740812").unwrap(), 2);
        assert_eq!(MrzValidator::check_digit("120415").unwrap(), 9);
        assert_eq!(MrzValidator::check_digit("<<<<").unwrap(), 0);
        assert!(MrzValidator::check_digit("ab").is_err());
    }

    #[test]
    fn test_specimens_are_valid() {
        let specimens: [&[&str]; 5] = [
            &[
                "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
                "L898902C36UTO7408122F1204159ZE184226B<<<<<10",
            ],
            &[
                "I<UTOD231458907<<<<<<<<<<<<<<<",
                "7408122F1204159UTO<<<<<<<<<<<6",
                "ERIKSSON<<ANNA<MARIA<<<<<<<<<<",
            ],
            &[
                "I<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
                "D231458907UTO7408122F1204159<<<<<<<6",
            ],
            &[
                "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
                "L8988901C4XXX4009078F96121096ZE184226B<<<<<<",
            ],
            &[
                "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
                "L8988901C4XXX4009078F9612109<<<<<<<<",
            ],
        ];
        for lines in specimens {
            let result = MrzValidator::validate(lines).unwrap();
            assert!(result.is_valid, "{:?}", result.issues);
            assert_eq!(result.checks.len(), CheckDigitRules::for_format(result.format).len());
        }
    }

    #[test]
    fn test_corrupted_birth_date_is_flagged() {
        let lines = [
            "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
            "L898902C36UTO7408132F1204159ZE184226B<<<<<10",
        ];
        let result = MrzValidator::validate(&lines).unwrap();
        assert!(!result.is_valid);
        let failed: Vec<&str> = result
            .checks
            .iter()
            .filter(|c| !c.is_valid)
            .map(|c| c.name)
            .collect();
        assert_eq!(failed, vec!["Date of birth", "Composite"]);
    }
}
