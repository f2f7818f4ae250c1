/// Groups the digits of `value` in threes (`11800` -> `11,800`).
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Peso amount with thousands separators (`295000` -> `₱295,000`).
pub fn format_currency(amount: i64) -> String {
    if amount < 0 {
        format!("-₱{}", format_number(-amount))
    } else {
        format!("₱{}", format_number(amount))
    }
}

/// `12.5` -> `12.5%`, `12.0` -> `12%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value}%")
}
