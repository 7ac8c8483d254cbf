//! Text and pt-BR formatting utilities.

use chrono::{NaiveDate, NaiveDateTime};

/// Uppercase the first letter, lowercase the rest.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Capitalize each word longer than two characters; shorter words (the
/// connectives `de`, `da`, `e`, ...) stay lowercase.
pub fn capitalize_words(input: &str) -> String {
    input
        .split(' ')
        .map(|word| {
            if word.chars().count() > 2 { capitalize(word) } else { word.to_lowercase() }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// URL-friendly slug: accents folded, lowercased, spaces collapsed into
/// single hyphens, everything else dropped.
pub fn slugify(input: &str) -> String {
    let folded: String = input.to_lowercase().chars().map(fold_accent).collect();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_hyphen = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
        // other punctuation is dropped without forcing a hyphen
    }
    slug
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ã' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'õ' | 'ô' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Truncate at a character budget, appending the suffix when anything was cut.
pub fn truncate(input: &str, length: usize, suffix: &str) -> String {
    if input.chars().count() <= length {
        return input.to_string();
    }
    let cut: String = input.chars().take(length).collect();
    format!("{}{}", cut.trim_end(), suffix)
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_spaces(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a string is empty or whitespace-only.
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// Brazilian date format: `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Brazilian datetime format: `DD/MM/YYYY HH:MM`.
pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format("%d/%m/%Y %H:%M").to_string()
}

/// Whole days between two dates, regardless of order.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// Format a value as Brazilian currency: `R$ 1.234,56`.
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {},{frac:02}", thousands(whole))
}

/// Parse a `R$ 1.234,56` string back into a value.
pub fn parse_currency(input: &str) -> Option<f64> {
    let cleaned = input.replace("R$", "").replace('.', "").replace(',', ".");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() { None } else { cleaned.parse().ok() }
}

/// Format a number with pt-BR separators and a fixed number of decimals.
pub fn format_number(value: f64, decimals: usize) -> String {
    let negative = value < 0.0;
    let scale = 10f64.powi(decimals as i32);
    let scaled = (value.abs() * scale).round() as u64;
    let whole = scaled / scale as u64;
    let sign = if negative { "-" } else { "" };

    if decimals == 0 {
        return format!("{sign}{}", thousands(whole));
    }
    let frac = scaled % scale as u64;
    format!("{sign}{},{frac:0width$}", thousands(whole), width = decimals)
}

fn thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::new();
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("esperança"), "Esperança");
        assert_eq!(capitalize("ESPERANÇA"), "Esperança");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_capitalize_words_keeps_connectives() {
        assert_eq!(capitalize_words("instituto de esperança"), "Instituto de Esperança");
        assert_eq!(capitalize_words("MARIA DA SILVA"), "Maria da Silva");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Instituto Esperança"), "instituto-esperanca");
        assert_eq!(slugify("Ação & Cidadania!"), "acao-cidadania");
        assert_eq!(slugify("  vários   espaços  "), "varios-espacos");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("curto", 10, "..."), "curto");
        assert_eq!(truncate("uma frase bem comprida", 9, "..."), "uma frase...");
    }

    #[test]
    fn test_normalize_spaces_and_is_blank() {
        assert_eq!(normalize_spaces("  a   b \t c "), "a b c");
        assert!(is_blank("   "));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(format_date(date), "25/12/2024");
        let dt = date.and_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_datetime(dt), "25/12/2024 09:05");
    }

    #[test]
    fn test_days_between() {
        let a = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(days_between(a, b), 30);
        assert_eq!(days_between(b, a), 30);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(1234.5), "R$ 1.234,50");
        assert_eq!(format_currency(-9.99), "-R$ 9,99");
    }

    #[test]
    fn test_parse_currency_round_trips() {
        assert_eq!(parse_currency("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency(&format_currency(42.9)), Some(42.9));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567.0, 0), "1.234.567");
        assert_eq!(format_number(0.5, 2), "0,50");
    }
}
