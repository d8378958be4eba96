use crate::models::{DocumentFormat, MrzDocument};
use crate::utils::{MrzError, Result};
use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

lazy_static! {
    static ref TD1_LINE0: Regex = Regex::new(
        r"^([ACI][A-Z0-9<])([A-Z]{3})([A-Z0-9<]{9})([0-9])([A-Z0-9<]{15})$"
    ).unwrap();
    static ref TD1_LINE1: Regex = Regex::new(
        r"^([0-9]{6})([0-9])([MFX<])([0-9]{6})([0-9])([A-Z]{3})([A-Z0-9<]{11})([0-9])$"
    ).unwrap();
    static ref TD1_LINE2: Regex = Regex::new(r"^([A-Z0-9<]{30})$").unwrap();

    static ref TD2_LINE0: Regex = Regex::new(r"^([ACI][A-Z0-9<])([A-Z]{3})([A-Z0-9<]{31})$").unwrap();
    static ref TD2_LINE1: Regex = Regex::new(
        r"^([A-Z0-9<]{9})([0-9])([A-Z]{3})([0-9]{6})([0-9])([MFX<])([0-9]{6})([0-9])([A-Z0-9<]{7})([0-9])$"
    ).unwrap();

    static ref TD3_LINE0: Regex = Regex::new(r"^(P[A-Z0-9<])([A-Z]{3})([A-Z0-9<]{39})$").unwrap();
    static ref TD3_LINE1: Regex = Regex::new(
        r"^([A-Z0-9<]{9})([0-9])([A-Z]{3})([0-9]{6})([0-9])([MFX<])([0-9]{6})([0-9])([A-Z0-9<]{14})([0-9<])([0-9])$"
    ).unwrap();

    static ref MRVA_LINE0: Regex = Regex::new(r"^(V[A-Z0-9<])([A-Z]{3})([A-Z0-9<]{39})$").unwrap();
    static ref MRVA_LINE1: Regex = Regex::new(
        r"^([A-Z0-9<]{9})([0-9])([A-Z]{3})([0-9]{6})([0-9])([MFX<])([0-9]{6})([0-9])([A-Z0-9<]{16})$"
    ).unwrap();

    static ref MRVB_LINE0: Regex = Regex::new(r"^(V[A-Z0-9<])([A-Z]{3})([A-Z0-9<]{31})$").unwrap();
    static ref MRVB_LINE1: Regex = Regex::new(
        r"^([A-Z0-9<]{9})([0-9])([A-Z]{3})([0-9]{6})([0-9])([MFX<])([0-9]{6})([0-9])([A-Z0-9<]{8})$"
    ).unwrap();
}

// Field names for the line below the names line of TD2, TD3 and visas
const DATA_LINE_TD2: &[&str] = &[
    "doc_number", "hash", "nationality", "birth_date", "hash", "sex",
    "expiry_date", "hash", "optional_data1", "final_hash",
];
const DATA_LINE_TD3: &[&str] = &[
    "doc_number", "hash", "nationality", "birth_date", "hash", "sex",
    "expiry_date", "hash", "personal_number", "hash", "final_hash",
];
const DATA_LINE_MRV: &[&str] = &[
    "doc_number", "hash", "nationality", "birth_date", "hash", "sex",
    "expiry_date", "hash", "optional_data",
];

/// Splits MRZ text into named fields.
pub struct MrzParser;

impl MrzParser {
    /// Parse MRZ text, one line per row. Blank lines and carriage returns
    /// are ignored.
    pub fn parse_text(text: &str) -> Result<MrzDocument> {
        let lines: Vec<String> = text
            .lines()
            .map(|line| line.trim_end_matches('\r').trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        for (i, line) in lines.iter().enumerate() {
            debug!("Line #{}: {} [{}]", i, line, line.len());
        }
        Self::parse_lines(&lines)
    }

    pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<MrzDocument> {
        let format = DocumentFormat::detect(lines)?;
        let lines: Vec<&str> = lines.iter().map(|l| l.as_ref()).collect();
        let mut fields = Vec::new();

        match format {
            DocumentFormat::TD1 => {
                let caps = Self::capture(&TD1_LINE0, lines[0], 0)?;
                Self::push_all(&mut fields, &caps, &["doc", "country", "doc_number", "hash", "optional_data1"]);
                let caps = Self::capture(&TD1_LINE1, lines[1], 1)?;
                Self::push_all(
                    &mut fields,
                    &caps,
                    &[
                        "birth_date", "hash", "sex", "expiry_date", "hash",
                        "nationality", "optional_data2", "final_hash",
                    ],
                );
                let caps = Self::capture(&TD1_LINE2, lines[2], 2)?;
                Self::push_names(&mut fields, &caps[1]);
            }
            DocumentFormat::TD2 => Self::parse_two_lines(&mut fields, &lines, &TD2_LINE0, &TD2_LINE1, DATA_LINE_TD2)?,
            DocumentFormat::TD3 => Self::parse_two_lines(&mut fields, &lines, &TD3_LINE0, &TD3_LINE1, DATA_LINE_TD3)?,
            DocumentFormat::MRVA => Self::parse_two_lines(&mut fields, &lines, &MRVA_LINE0, &MRVA_LINE1, DATA_LINE_MRV)?,
            DocumentFormat::MRVB => Self::parse_two_lines(&mut fields, &lines, &MRVB_LINE0, &MRVB_LINE1, DATA_LINE_MRV)?,
        }

        Ok(MrzDocument { format, fields })
    }

    fn parse_two_lines(
        fields: &mut Vec<(String, String)>,
        lines: &[&str],
        names_line: &Regex,
        data_line: &Regex,
        data_fields: &[&str],
    ) -> Result<()> {
        let caps = Self::capture(names_line, lines[0], 0)?;
        Self::push_all(fields, &caps, &["doc", "country"]);
        Self::push_names(fields, &caps[3]);

        let caps = Self::capture(data_line, lines[1], 1)?;
        Self::push_all(fields, &caps, data_fields);
        Ok(())
    }

    fn capture<'t>(regex: &Regex, line: &'t str, index: usize) -> Result<Captures<'t>> {
        regex.captures(line).ok_or_else(|| {
            MrzError::MrzParsing(format!("line #{} does not match the expected layout: {}", index, line))
        })
    }

    fn push_all(fields: &mut Vec<(String, String)>, caps: &Captures, names: &[&str]) {
        for (i, name) in names.iter().enumerate() {
            fields.push((name.to_string(), caps[i + 1].to_string()));
        }
    }

    /// `SURNAME<<GIVEN<NAMES` → surname, given_name_0, given_name_1, ...
    fn push_names(fields: &mut Vec<(String, String)>, names_field: &str) {
        let spaced = names_field.replace('<', " ");
        let mut names = spaced.split_whitespace();
        if let Some(surname) = names.next() {
            fields.push(("surname".to_string(), surname.to_string()));
        }
        for (i, given) in names.enumerate() {
            fields.push((format!("given_name_{}", i), given.to_string()));
        }
    }
}
