use crate::utils::{MrzError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    TD1,  // ID Card (85.6mm × 54.0mm)
    TD2,  // ID Card (105.0mm × 74.0mm)
    TD3,  // Passport (125.0mm × 88.0mm)
    MRVA, // Visa Format-A (80.0mm × 120.0mm)
    MRVB, // Visa Format-B (74.0mm × 105.0mm)
}

impl DocumentFormat {
    /// Classify MRZ lines by count, width and leading character.
    ///
    /// 3×30 is TD1. 2×44 is TD3 for a `P` document and MRV-A otherwise.
    /// 2×36 is MRV-B for a `V` document and TD2 otherwise.
    pub fn detect<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        if lines.len() != 2 && lines.len() != 3 {
            return Err(MrzError::MrzParsing(format!(
                "{} not a valid number of lines. Expecting 2 or 3 lines",
                lines.len()
            )));
        }

        let first = lines[0].as_ref();
        for line in &lines[1..] {
            if line.as_ref().len() != first.len() {
                return Err(MrzError::MrzParsing(format!(
                    "All lines must have same length: {} != {}",
                    first.len(),
                    line.as_ref().len()
                )));
            }
        }

        let leading = first.chars().next();
        match (lines.len(), first.len()) {
            (3, 30) => Ok(DocumentFormat::TD1),
            (2, 44) if leading == Some('P') => Ok(DocumentFormat::TD3),
            (2, 44) => Ok(DocumentFormat::MRVA),
            (2, 36) if leading == Some('V') => Ok(DocumentFormat::MRVB),
            (2, 36) => Ok(DocumentFormat::TD2),
            (count, width) => Err(MrzError::MrzParsing(format!(
                "Invalid MRZ format: {} lines of {} characters",
                count, width
            ))),
        }
    }

    pub fn mrz_lines(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 3,
            _ => 2,
        }
    }

    pub fn mrz_chars_per_line(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 30,
            DocumentFormat::TD2 | DocumentFormat::MRVB => 36,
            DocumentFormat::TD3 | DocumentFormat::MRVA => 44,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DocumentFormat::TD1 => "TD1",
            DocumentFormat::TD2 => "TD2",
            DocumentFormat::TD3 => "TD3",
            DocumentFormat::MRVA => "MRVA",
            DocumentFormat::MRVB => "MRVB",
        };
        f.write_str(name)
    }
}

/// Named MRZ fields in the order they appear on the document.
#[derive(Debug, Clone)]
pub struct MrzDocument {
    pub format: DocumentFormat,
    pub fields: Vec<(String, String)>,
}

impl MrzDocument {
    /// First field with the given name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn given_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(key, _)| key.starts_with("given_name_"))
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub issue_type: ValidationIssueType,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssueType {
    CheckDigit,
    Expiry,
}

/// Outcome of one check digit.
#[derive(Debug, Clone)]
pub struct CheckDigitOutcome {
    pub name: &'static str,
    pub expected: u32,
    pub found: char,
    pub is_valid: bool,
}

#[derive(Debug)]
pub struct MrzValidationResult {
    pub format: DocumentFormat,
    pub is_valid: bool,
    pub checks: Vec<CheckDigitOutcome>,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug)]
pub struct ExpiryValidationResult {
    pub is_valid: bool,
    pub not_expired: bool,
    pub expiry_date: chrono::NaiveDate,
    pub issues: Vec<ValidationIssue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_passport_and_visa() {
        let passport = [
            "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
            "L898902C36UTO7408122F1204159ZE184226B<<<<<10",
        ];
        assert_eq!(DocumentFormat::detect(&passport).unwrap(), DocumentFormat::TD3);

        let visa_a = [
            "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
            "L8988901C4XXX4009078F96121096ZE184226B<<<<<<",
        ];
        assert_eq!(DocumentFormat::detect(&visa_a).unwrap(), DocumentFormat::MRVA);
    }

    #[test]
    fn test_detect_short_formats() {
        let td2 = [
            "I<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
            "D231458907UTO7408122F1204159<<<<<<<6",
        ];
        assert_eq!(DocumentFormat::detect(&td2).unwrap(), DocumentFormat::TD2);

        let visa_b = [
            "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
            "L8988901C4XXX4009078F9612109<<<<<<<<",
        ];
        assert_eq!(DocumentFormat::detect(&visa_b).unwrap(), DocumentFormat::MRVB);

        let td1 = [
            "I<UTOD231458907<<<<<<<<<<<<<<<",
            "7408122F1204159UTO<<<<<<<<<<<6",
            "ERIKSSON<<ANNA<MARIA<<<<<<<<<<",
        ];
        assert_eq!(DocumentFormat::detect(&td1).unwrap(), DocumentFormat::TD1);
    }

    #[test]
    fn test_detect_rejects_bad_shapes() {
        assert!(DocumentFormat::detect(&["P<UTO"]).is_err());
        assert!(DocumentFormat::detect(&["ABC", "ABCD"]).is_err());
        assert!(DocumentFormat::detect(&["A".repeat(40), "A".repeat(40)]).is_err());
    }

    #[test]
    fn test_chars_per_line_matches_detection() {
        for format in [
            DocumentFormat::TD1,
            DocumentFormat::TD2,
            DocumentFormat::TD3,
            DocumentFormat::MRVA,
            DocumentFormat::MRVB,
        ] {
            assert!(format.mrz_lines() == 2 || format.mrz_lines() == 3);
            assert!(format.mrz_chars_per_line() >= 30);
        }
    }
}
