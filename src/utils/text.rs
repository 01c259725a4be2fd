/// Groups the digits of `value` in threes, e.g. `1234567` becomes `1,234,567`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Reverses a right-to-left message so it reads correctly on a left-to-right terminal.
pub fn rtl(message: &str) -> String {
    message.chars().rev().collect()
}
