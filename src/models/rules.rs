use crate::models::DocumentFormat;

/// Inclusive character range on one MRZ line.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// A check digit and the characters it covers.
///
/// Weighting runs across all segments as if they were one string.
#[derive(Debug, Clone, Copy)]
pub struct CheckDigitRule {
    pub name: &'static str,
    pub segments: &'static [Segment],
    pub check_line: usize,
    pub check_pos: usize,
}

const fn seg(line: usize, start: usize, end: usize) -> Segment {
    Segment { line, start, end }
}

const fn rule(
    name: &'static str,
    segments: &'static [Segment],
    check_line: usize,
    check_pos: usize,
) -> CheckDigitRule {
    CheckDigitRule {
        name,
        segments,
        check_line,
        check_pos,
    }
}

// ICAO 9303 part 5, 4.2.4
const TD1_RULES: &[CheckDigitRule] = &[
    rule("Document number", &[seg(0, 5, 13)], 0, 14),
    rule("Date of birth", &[seg(1, 0, 5)], 1, 6),
    rule("Date of expiry", &[seg(1, 8, 13)], 1, 14),
    rule(
        "Upper and middle lines",
        &[seg(0, 5, 29), seg(1, 0, 6), seg(1, 8, 14), seg(1, 18, 28)],
        1,
        29,
    ),
];

// ICAO 9303 part 6, 4.2.4
const TD2_RULES: &[CheckDigitRule] = &[
    rule("Document number", &[seg(1, 0, 8)], 1, 9),
    rule("Date of birth", &[seg(1, 13, 18)], 1, 19),
    rule("Date of expiry", &[seg(1, 21, 26)], 1, 27),
    rule(
        "Composite",
        &[seg(1, 0, 9), seg(1, 13, 19), seg(1, 21, 34)],
        1,
        35,
    ),
];

// ICAO 9303 part 4, 4.2.4
const TD3_RULES: &[CheckDigitRule] = &[
    rule("Passport number", &[seg(1, 0, 8)], 1, 9),
    rule("Date of birth", &[seg(1, 13, 18)], 1, 19),
    rule("Date of expiry", &[seg(1, 21, 26)], 1, 27),
    rule("Personal number", &[seg(1, 28, 41)], 1, 42),
    rule(
        "Composite",
        &[seg(1, 0, 9), seg(1, 13, 19), seg(1, 21, 42)],
        1,
        43,
    ),
];

// ICAO 9303 part 7
const MRV_RULES: &[CheckDigitRule] = &[
    rule("Document number", &[seg(1, 0, 8)], 1, 9),
    rule("Date of birth", &[seg(1, 13, 18)], 1, 19),
    rule("Date of expiry", &[seg(1, 21, 26)], 1, 27),
];

pub struct CheckDigitRules;

impl CheckDigitRules {
    pub fn for_format(format: DocumentFormat) -> &'static [CheckDigitRule] {
        match format {
            DocumentFormat::TD1 => TD1_RULES,
            DocumentFormat::TD2 => TD2_RULES,
            DocumentFormat::TD3 => TD3_RULES,
            DocumentFormat::MRVA | DocumentFormat::MRVB => MRV_RULES,
        }
    }

    /// Line and inclusive range holding the expiry date (YYMMDD).
    pub fn expiry_segment(format: DocumentFormat) -> Segment {
        match format {
            DocumentFormat::TD1 => seg(1, 8, 13),
            _ => seg(1, 21, 26),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_stay_inside_lines() {
        for format in [
            DocumentFormat::TD1,
            DocumentFormat::TD2,
            DocumentFormat::TD3,
            DocumentFormat::MRVA,
            DocumentFormat::MRVB,
        ] {
            let width = format.mrz_chars_per_line();
            for rule in CheckDigitRules::for_format(format) {
                assert!(rule.check_pos < width, "{} {}", format, rule.name);
                for segment in rule.segments {
                    assert!(segment.start <= segment.end);
                    assert!(segment.end < width, "{} {}", format, rule.name);
                    assert!(segment.line < format.mrz_lines());
                }
            }
        }
    }
}
