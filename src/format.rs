//! Locale-aware number formatting for terminal output.

use num_format::{Locale, ToFormattedString};

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `de`, `fr`, `pt`, `nl`.
/// Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Format with thousands separators and up to two decimals, trailing zeros trimmed.
/// `None` and non-finite values print as `NA`.
pub fn format_value(v: Option<f64>, locale: &Locale, decimal_sep: char) -> String {
    let Some(x) = v.filter(|x| x.is_finite()) else {
        return "NA".to_string();
    };
    let cents = (x.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_formatted_string(locale);
    let frac = cents % 100;
    let sign = if x < 0.0 && cents > 0 { "-" } else { "" };
    if frac == 0 {
        format!("{sign}{whole}")
    } else {
        let digits = format!("{frac:02}");
        format!("{sign}{whole}{decimal_sep}{}", digits.trim_end_matches('0'))
    }
}
