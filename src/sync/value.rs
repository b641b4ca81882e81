use serde::Serialize;
use std::fmt;

/// A decoded sync-column cell.
///
/// Numbers compare by value across integer and float spellings, text
/// compares byte for byte, and `Missing` equals nothing (not even itself).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SyncValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl SyncValue {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return SyncValue::Missing;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return SyncValue::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return SyncValue::Float(f);
        }
        SyncValue::Text(raw.to_string())
    }

    /// Cheap pre-check on the raw cell before decoding it.
    pub(crate) fn may_match(&self, raw: &str) -> bool {
        match self {
            SyncValue::Text(text) => text == raw,
            SyncValue::Missing => false,
            _ => true,
        }
    }
}

const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl PartialEq for SyncValue {
    fn eq(&self, other: &Self) -> bool {
        use SyncValue::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Integer(a), Float(b)) | (Float(b), Integer(a)) => {
                // i64::MAX as f64 rounds up to 2^63, outside the i64 range.
                b.fract() == 0.0
                    && (-I64_BOUND..I64_BOUND).contains(b)
                    && *b as i64 == *a
                    && *a as f64 == *b
            }
            (Text(a), Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for SyncValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncValue::Integer(i) => write!(f, "{}", i),
            SyncValue::Float(x) => write!(f, "{}", x),
            SyncValue::Text(s) => write!(f, "{:?}", s),
            SyncValue::Missing => write!(f, "<missing>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numbers_text_and_blanks() {
        assert!(matches!(SyncValue::parse("12"), SyncValue::Integer(12)));
        assert!(matches!(SyncValue::parse(" -3"), SyncValue::Integer(-3)));
        assert!(matches!(SyncValue::parse("1715071150.25"), SyncValue::Float(_)));
        assert!(matches!(SyncValue::parse("1e3"), SyncValue::Float(_)));
        assert!(matches!(SyncValue::parse("  "), SyncValue::Missing));
        match SyncValue::parse(" 10:41:46") {
            SyncValue::Text(s) => assert_eq!(s, " 10:41:46"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn numeric_spellings_compare_by_value() {
        assert_eq!(SyncValue::parse("12"), SyncValue::parse("12.0"));
        assert_eq!(SyncValue::parse("12"), SyncValue::parse(" 12"));
        assert_eq!(SyncValue::parse("1.50"), SyncValue::parse("1.5"));
        assert_ne!(SyncValue::parse("12"), SyncValue::parse("12.5"));
    }

    #[test]
    fn text_is_exact_and_never_equals_numbers() {
        assert_eq!(SyncValue::parse("abc"), SyncValue::parse("abc"));
        assert_ne!(SyncValue::parse("abc"), SyncValue::parse(" abc"));
        assert_ne!(SyncValue::Text("12".into()), SyncValue::Integer(12));
    }

    #[test]
    fn integer_float_equality_is_exact_at_the_i64_edge() {
        assert_ne!(SyncValue::Integer(i64::MAX), SyncValue::Float(9.223372036854776e18));
        assert_ne!(SyncValue::Float(-1e19), SyncValue::Integer(i64::MIN));
        assert_eq!(SyncValue::Integer(1 << 53), SyncValue::Float(9_007_199_254_740_992.0));
        assert_eq!(SyncValue::Integer(i64::MIN), SyncValue::Float(-9.223372036854775808e18));
    }

    #[test]
    fn missing_and_nan_never_match() {
        assert_ne!(SyncValue::Missing, SyncValue::Missing);
        assert_ne!(SyncValue::parse("NaN"), SyncValue::parse("NaN"));
    }

    #[test]
    fn text_pre_check_skips_mismatches() {
        let target = SyncValue::parse("abc");
        assert!(target.may_match("abc"));
        assert!(!target.may_match("abd"));
        assert!(SyncValue::Integer(1).may_match("1.0"));
        assert!(!SyncValue::Missing.may_match(""));
    }
}
