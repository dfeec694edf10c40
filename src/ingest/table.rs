//! Parsing of published sheet exports into rows.
//!
//! Sheets are exported as plain comma separated text. Fields are split on
//! every comma, so a quoted value that itself contains a comma is split too.

use crate::core::error::{IngestError, IngestResult};
use std::collections::HashMap;

/// A single parsed line, keyed by the header tokens.
pub type Row = HashMap<String, String>;

fn clean(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text).trim()
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Trims a field and strips one surrounding quote character on each side.
fn unquote(field: &str) -> String {
    let field = field.trim();
    let field = field.strip_prefix('"').unwrap_or(field);
    let field = field.strip_suffix('"').unwrap_or(field);
    field.to_string()
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(unquote).collect()
}

/// Parses a tabular export. The first non-blank line is the header; every
/// following line becomes a row, with missing trailing fields set to `""`.
pub fn parse_table(text: &str) -> Vec<Row> {
    let mut lines = non_blank_lines(clean(text));
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let headers = split_fields(header);

    lines
        .map(|line| {
            let cols = split_fields(line);
            let row: Row = headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), cols.get(i).cloned().unwrap_or_default()))
                .collect();
            row
        })
        .collect()
}

/// Parses the two column `key,value` status export.
///
/// A body with fewer than two lines is an empty map. Rows with an empty key
/// are skipped and later keys overwrite earlier ones.
pub fn parse_key_value(text: &str) -> IngestResult<HashMap<String, String>> {
    let lines: Vec<&str> = non_blank_lines(clean(text)).collect();
    if lines.len() < 2 {
        return Ok(HashMap::new());
    }

    let header = lines[0].to_lowercase();
    if !header.contains("key") || !header.contains("value") {
        return Err(IngestError::Format);
    }

    let mut kv = HashMap::new();
    for line in &lines[1..] {
        let mut cols = split_fields(line).into_iter();
        let key = cols.next().unwrap_or_default();
        let value = cols.next().unwrap_or_default();
        if !key.is_empty() {
            kv.insert(key, value);
        }
    }
    Ok(kv)
}

/// Returns the trimmed field, or `""` when the row lacks the column.
pub fn field<'a>(row: &'a Row, name: &str) -> &'a str {
    row.get(name).map(|v| v.trim()).unwrap_or("")
}

/// Parses a number permissively. Blank text is zero; anything that does
/// not yield a finite number becomes `fallback`.
pub fn to_number(text: &str, fallback: f64) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => fallback,
    }
}

/// Like [`to_number`], floored to a whole number.
pub fn to_int(text: &str, fallback: i64) -> i64 {
    let n = to_number(text, f64::NAN);
    if n.is_finite() {
        n.floor() as i64
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_with_bom_and_quotes() {
        let text = "\u{feff}label,min_sec,max_sec,base_price\r\n\"0-10분\",0,600,50000\n\n 10-30분 ,601,1800,\"90000\"\n";
        let rows = parse_table(text);

        assert_eq!(rows.len(), 2);
        assert_eq!(field(&rows[0], "label"), "0-10분");
        assert_eq!(field(&rows[0], "max_sec"), "600");
        assert_eq!(field(&rows[1], "label"), "10-30분");
        assert_eq!(field(&rows[1], "base_price"), "90000");
    }

    #[test]
    fn test_parse_table_pads_missing_trailing_fields() {
        let rows = parse_table("package,edit_point,price_per_min\neconomy\n");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("package").map(String::as_str), Some("economy"));
        assert_eq!(rows[0].get("edit_point").map(String::as_str), Some(""));
        assert_eq!(rows[0].get("price_per_min").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_table_splits_quoted_commas() {
        let rows = parse_table("label,type,value\n\"a, b\",add,100\n");

        // Known limitation: the quoted comma is treated as a separator.
        assert_eq!(field(&rows[0], "label"), "a");
        assert_eq!(field(&rows[0], "type"), "b");
    }

    #[test]
    fn test_parse_table_empty_input() {
        assert!(parse_table("").is_empty());
        assert!(parse_table("\u{feff}  \n \n").is_empty());
        assert!(parse_table("label,value").is_empty());
    }

    #[test]
    fn test_parse_key_value() {
        let kv = parse_key_value("Key,Value\ncontact_open,TRUE\n,ignored\nnote,\"hi\"\n").unwrap();

        assert_eq!(kv.len(), 2);
        assert_eq!(kv["contact_open"], "TRUE");
        assert_eq!(kv["note"], "hi");
    }

    #[test]
    fn test_parse_key_value_later_key_wins() {
        let kv = parse_key_value("key,value\ncontact_open,no\ncontact_open,yes\n").unwrap();
        assert_eq!(kv["contact_open"], "yes");
    }

    #[test]
    fn test_parse_key_value_rejects_other_header() {
        let err = parse_key_value("<!DOCTYPE html>\n<html></html>\n").unwrap_err();
        assert!(matches!(err, IngestError::Format));
    }

    #[test]
    fn test_parse_key_value_short_body_is_empty() {
        assert!(parse_key_value("key,value").unwrap().is_empty());
        assert!(parse_key_value("<html>").unwrap().is_empty());
    }

    #[test]
    fn test_numbers_parse_permissively() {
        assert_eq!(to_number("1.5", 0.0), 1.5);
        assert_eq!(to_number(" 30000 ", 0.0), 30000.0);
        assert_eq!(to_number("", 7.0), 0.0);
        assert_eq!(to_number("abc", 7.0), 7.0);
        assert_eq!(to_number("inf", 7.0), 7.0);
        assert_eq!(to_number("NaN", 7.0), 7.0);

        assert_eq!(to_int("2.9", 0), 2);
        assert_eq!(to_int("-0.5", 0), -1);
        assert_eq!(to_int("ten", 4), 4);
    }
}
