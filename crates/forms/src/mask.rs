//! Progressive input masks.
//!
//! Every mask is a pure function from whatever the user has typed so far to
//! the masked rendition of it: digits are kept, separators are inserted as
//! soon as the following group starts, and anything beyond the format's
//! capacity is dropped. Re-applying a mask to its own output is a no-op.

use regex::Regex;
use std::sync::LazyLock;

static NON_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-ZÀ-ÿ\s]").expect("invalid regex"));

/// Keep only ASCII digits.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Remove a mask, leaving the bare digits.
pub fn strip(input: &str) -> String {
    digits_only(input)
}

/// Keep only letters (including Latin-1 accented ones) and whitespace.
pub fn letters_only(input: &str) -> String {
    NON_LETTERS.replace_all(input, "").into_owned()
}

/// Build a masked string from digit groups. Each entry is a separator to
/// emit before the group and the group's digit capacity; a separator appears
/// as soon as its group has at least one digit.
fn group(input: &str, pattern: &[(&str, usize)]) -> String {
    let digits = digits_only(input);
    let mut rest = digits.as_str();
    let mut out = String::new();

    for (sep, len) in pattern {
        if rest.is_empty() {
            break;
        }
        out.push_str(sep);
        let take = rest.len().min(*len);
        out.push_str(&rest[..take]);
        rest = &rest[take..];
    }

    out
}

/// CPF: `000.000.000-00`
pub fn cpf(input: &str) -> String {
    group(input, &[("", 3), (".", 3), (".", 3), ("-", 2)])
}

/// CNPJ: `00.000.000/0000-00`
pub fn cnpj(input: &str) -> String {
    group(input, &[("", 2), (".", 3), (".", 3), ("/", 4), ("-", 2)])
}

/// Phone: `(00) 0000-0000` for landlines, `(00) 00000-0000` once an 11th
/// digit shows it is a mobile number.
pub fn telefone(input: &str) -> String {
    let digits = digits_only(input);
    if digits.len() <= 10 {
        group(&digits, &[("(", 2), (") ", 4), ("-", 4)])
    } else {
        group(&digits, &[("(", 2), (") ", 5), ("-", 4)])
    }
}

/// CEP: `00000-000`
pub fn cep(input: &str) -> String {
    group(input, &[("", 5), ("-", 3)])
}

/// Date: `DD/MM/AAAA`
pub fn data(input: &str) -> String {
    group(input, &[("", 2), ("/", 2), ("/", 4)])
}

/// Time: `HH:MM`
pub fn hora(input: &str) -> String {
    group(input, &[("", 2), (":", 2)])
}

/// Credit card: `0000 0000 0000 0000`
pub fn cartao(input: &str) -> String {
    group(input, &[("", 4), (" ", 4), (" ", 4), (" ", 4)])
}

/// RG: `00.000.000-0`
pub fn rg(input: &str) -> String {
    group(input, &[("", 2), (".", 3), (".", 3), ("-", 1)])
}

/// Currency: digits are cents, rendered as `R$ 1.234,56`.
pub fn moeda(input: &str) -> String {
    let mut digits = digits_only(input);
    if digits.is_empty() {
        return String::new();
    }
    // 15 digits of cents is far beyond any donation form input.
    digits.truncate(15);

    let cents: u64 = digits.parse().unwrap_or(0);
    format!("R$ {}", format_cents(cents))
}

fn format_cents(cents: u64) -> String {
    let whole = cents / 100;
    let frac = cents % 100;

    let whole_str = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in whole_str.chars().enumerate() {
        if i > 0 && (whole_str.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{grouped},{frac:02}")
}

/// Capitalize a person's name: words longer than two characters get an upper
/// first letter, connectives (`de`, `da`, ...) stay lowercase.
pub fn nome(input: &str) -> String {
    crate::text::capitalize_words(input)
}
