use super::NOT_AVAILABLE;

/// 金额/价格：千分位，固定两位小数
pub fn format_number(value: Option<f64>) -> String {
    format_fixed(value, 2)
}

/// 成交量：千分位，不保留小数
pub fn format_volume(value: Option<f64>) -> String {
    format_fixed(value, 0)
}

/// 按 en-US 习惯加千分位，保留 `decimals` 位小数；
/// 基于数值最短的十进制表示做四舍五入（远离零）
pub fn format_fixed(value: Option<f64>, decimals: usize) -> String {
    let v = match value {
        Some(v) => v,
        None => return NOT_AVAILABLE.to_string(),
    };
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    // f64 的 Display 输出最短的十进制表示，且不会使用科学计数法
    let repr = format!("{}", v.abs());
    let (int_digits, frac_digits) = round_decimal(&repr, decimals);

    let mut out = String::new();
    if v < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_digits));
    if decimals > 0 {
        out.push('.');
        out.push_str(&frac_digits);
    }
    out
}

fn round_decimal(repr: &str, decimals: usize) -> (String, String) {
    let (int_part, frac_part) = match repr.split_once('.') {
        Some((i, f)) => (i, f),
        None => (repr, ""),
    };

    if frac_part.len() <= decimals {
        let mut frac = frac_part.to_string();
        frac.push_str(&"0".repeat(decimals - frac_part.len()));
        return (int_part.to_string(), frac);
    }

    let round_up = frac_part.as_bytes()[decimals] >= b'5';
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .collect();

    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if !carry {
                break;
            }
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - decimals;
    let int_digits = String::from_utf8_lossy(&digits[..split]).into_owned();
    let frac_digits = String::from_utf8_lossy(&digits[split..]).into_owned();
    (int_digits, frac_digits)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_not_available() {
        assert_eq!(format_number(None), "N/A");
        assert_eq!(format_volume(None), "N/A");
    }

    #[test]
    fn two_decimals_with_grouping() {
        assert_eq!(format_number(Some(1234.5)), "1,234.50");
        assert_eq!(format_number(Some(0.0)), "0.00");
        assert_eq!(format_number(Some(3.0)), "3.00");
        assert_eq!(format_number(Some(999.999)), "1,000.00");
        assert_eq!(format_number(Some(2_950_000_000_000.0)), "2,950,000,000,000.00");
        assert_eq!(format_number(Some(-1234567.891)), "-1,234,567.89");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_number(Some(1.005)), "1.01");
        assert_eq!(format_number(Some(0.125)), "0.13");
        assert_eq!(format_volume(Some(2.5)), "3");
        assert_eq!(format_volume(Some(-2.5)), "-3");
    }

    #[test]
    fn never_scientific() {
        assert_eq!(format_number(Some(1e21)), "1,000,000,000,000,000,000,000.00");
        assert_eq!(format_number(Some(1e-7)), "0.00");
    }

    #[test]
    fn volume_is_integer() {
        assert_eq!(format_volume(Some(1_000_000.0)), "1,000,000");
        assert_eq!(format_volume(Some(999.4)), "999");
        assert_eq!(format_volume(Some(12.0)), "12");
    }

    #[test]
    fn non_finite() {
        assert_eq!(format_number(Some(f64::NAN)), "NaN");
        assert_eq!(format_number(Some(f64::INFINITY)), "∞");
        assert_eq!(format_volume(Some(f64::NEG_INFINITY)), "-∞");
    }
}
