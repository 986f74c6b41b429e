use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{FieldType, Value};
use crate::table::RawTable;

/// Columns whose name starts with this are image file paths.
pub const FILE_PREFIX: &str = "FILE";

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").expect("integer regex"));

const BOOLEAN_LITERALS: &[&str] = &["true", "false", "True", "False", "0", "1"];

pub fn is_boolean_literal(raw: &str) -> bool {
    BOOLEAN_LITERALS.contains(&raw)
}

pub fn is_integer_literal(raw: &str) -> bool {
    INTEGER.is_match(raw)
}

pub fn is_file_column(name: &str) -> bool {
    name.starts_with(FILE_PREFIX)
}

/// Lenient boolean: only `true`, `True` and `1` are true.
pub fn to_boolean(raw: Option<&str>) -> bool {
    matches!(raw, Some("true" | "True" | "1"))
}

/// Integer prefix parse: leading whitespace, optional sign, digit run.
/// Anything after the digits is ignored; no digits means `None`.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign = usize::from(matches!(s.as_bytes().first(), Some(b'-' | b'+')));
    let digits = &s[sign..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // sign stays in the slice so i64::MIN parses
    s[..sign + end].parse().ok()
}

/// Integer cell; missing or unparseable text is `Null`.
pub fn int_cell(raw: Option<&str>) -> Value {
    raw.and_then(parse_int).map_or(Value::Null, Value::Int)
}

pub fn str_cell(raw: Option<&str>) -> Value {
    raw.map_or(Value::Null, Value::from)
}

/// Classify a column that is not part of the reserved vocabulary.
///
/// Priority: every cell a boolean literal, every cell an integer literal,
/// `FILE` name prefix, and finally categorical. Missing cells fail both
/// literal tests; an empty table passes the first one.
pub fn infer_column(table: &RawTable, col: usize, name: &str) -> FieldType {
    let ty = if table.column(col).all(|c| c.is_some_and(is_boolean_literal)) {
        FieldType::Boolean
    } else if table.column(col).all(|c| c.is_some_and(is_integer_literal)) {
        FieldType::Range
    } else if is_file_column(name) {
        FieldType::File
    } else {
        FieldType::Select
    };
    debug!(column = name, ty = %ty, "inferred column type");
    ty
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> RawTable {
        RawTable::parse(text).unwrap()
    }

    #[test]
    fn boolean_coercion() {
        for raw in ["0", "false", "False", "yes", "TRUE", ""] {
            assert!(!to_boolean(Some(raw)), "{raw}");
        }
        for raw in ["1", "true", "True"] {
            assert!(to_boolean(Some(raw)), "{raw}");
        }
        assert!(!to_boolean(None));
    }

    #[test]
    fn parse_int_is_prefix_lenient() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("  12px"), Some(12));
        assert_eq!(parse_int("+3"), Some(3));
        assert_eq!(parse_int("px"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn parse_int_covers_full_i64_range() {
        assert_eq!(parse_int("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_int("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_int("9223372036854775808"), None);
    }

    #[test]
    fn inference_priority() {
        let t = table("flag,angle,FILEimg,FILEnum,color\n1,10,a.png,1,red\n0,-20,b.png,2,blue\n");
        assert_eq!(infer_column(&t, 0, "flag"), FieldType::Boolean);
        assert_eq!(infer_column(&t, 1, "angle"), FieldType::Range);
        assert_eq!(infer_column(&t, 2, "FILEimg"), FieldType::File);
        // integers win over the file prefix
        assert_eq!(infer_column(&t, 3, "FILEnum"), FieldType::Range);
        assert_eq!(infer_column(&t, 4, "color"), FieldType::Select);
    }

    #[test]
    fn zero_and_one_only_is_boolean() {
        let t = table("x\n0\n1\n1\n");
        assert_eq!(infer_column(&t, 0, "x"), FieldType::Boolean);
    }

    #[test]
    fn missing_cells_defeat_literal_tests() {
        let t = table("a,b\n1,2\n3\n");
        assert_eq!(infer_column(&t, 1, "b"), FieldType::Select);
    }

    #[test]
    fn decimals_are_not_ranges() {
        let t = table("x\n1.5\n2\n");
        assert_eq!(infer_column(&t, 0, "x"), FieldType::Select);
    }

    #[test]
    fn empty_table_is_vacuously_boolean() {
        let t = table("x\n");
        assert_eq!(infer_column(&t, 0, "x"), FieldType::Boolean);
    }
}
