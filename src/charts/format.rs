//! Number formatting for metric cards and labels.

/// Short population label: `"39.5 M"`, `"3 M"`, `"578 K"`.
///
/// Values above one million become millions (whole when exact, otherwise one
/// decimal); everything else becomes thousands, truncated. Negative values
/// are formatted by magnitude with a leading minus.
pub fn format_number(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();

    if magnitude > 1_000_000 {
        if magnitude % 1_000_000 == 0 {
            format!("{}{} M", sign, magnitude / 1_000_000)
        } else {
            format!("{}{:.1} M", sign, magnitude as f64 / 1_000_000.0)
        }
    } else {
        format!("{}{} K", sign, magnitude / 1_000)
    }
}

/// Signed variant for deltas: `"+60 K"`, `"-1.2 M"`.
pub fn format_delta(value: i64) -> String {
    if value > 0 {
        format!("+{}", format_number(value))
    } else {
        format_number(value)
    }
}

/// Full integer with thousands separators: `39,512,223`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
