use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 把 JSON 值宽松地转换为数字：数字原样返回，数字字符串解析后返回，其余视为缺失
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => text_to_f64(s),
        _ => None,
    }
}

/// 解析数字字符串，允许首尾空白和千分位逗号；空白或非数字文本视为缺失
pub fn text_to_f64(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.replace(',', "").parse::<f64>().ok()
}

/// 把 JSON 值宽松地转换为文本；null 和空字符串视为缺失
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        // 整数值的浮点数按浏览器的习惯输出，2.0 显示为 2
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() && f.is_finite() => f.to_string(),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// serde `deserialize_with` 辅助函数，记录字段从不做强校验
pub mod lenient {
    use super::*;

    pub fn number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(value_to_f64))
    }

    pub fn text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(value_to_text))
    }
}

/// 文本字段缺失时显示 N/A
pub fn or_na(text: &Option<String>) -> String {
    text.clone().unwrap_or_else(|| crate::formatters::NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_accept_numeric_strings() {
        assert_eq!(value_to_f64(&json!(12.5)), Some(12.5));
        assert_eq!(value_to_f64(&json!("150.75")), Some(150.75));
        assert_eq!(value_to_f64(&json!(" 1,234 ")), Some(1234.0));
        assert_eq!(value_to_f64(&json!("abc")), None);
        assert_eq!(value_to_f64(&json!("")), None);
        assert_eq!(value_to_f64(&Value::Null), None);
        assert_eq!(value_to_f64(&json!([1])), None);
    }

    #[test]
    fn text_treats_blank_as_absent() {
        assert_eq!(value_to_text(&json!("AAPL")), Some("AAPL".to_string()));
        assert_eq!(value_to_text(&json!("   ")), None);
        assert_eq!(value_to_text(&json!(164000)), Some("164000".to_string()));
        assert_eq!(value_to_text(&json!(true)), Some("true".to_string()));
        assert_eq!(value_to_text(&json!(-7)), Some("-7".to_string()));
        assert_eq!(value_to_text(&json!({"a": 1})), None);
    }

    #[test]
    fn whole_floats_drop_trailing_zero() {
        assert_eq!(value_to_text(&json!(2.0)), Some("2".to_string()));
        assert_eq!(value_to_text(&json!(-0.5)), Some("-0.5".to_string()));
        assert_eq!(value_to_text(&json!(1.52)), Some("1.52".to_string()));
        assert_eq!(value_to_text(&json!(0.0)), Some("0".to_string()));
    }

    #[test]
    fn or_na_substitutes() {
        assert_eq!(or_na(&None), "N/A");
        assert_eq!(or_na(&Some("NASDAQ".into())), "NASDAQ");
    }
}
