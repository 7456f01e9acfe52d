use super::model::{Dataset, FieldValue, Row};

// ---------------------------------------------------------------------------
// Numeric parsing
// ---------------------------------------------------------------------------

/// Result of parsing a text cell as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Number(f64),
    NotANumber,
}

impl Numeric {
    /// Collapse into an `f64`, using NaN as the not-a-number sentinel.
    pub fn to_f64(self) -> f64 {
        match self {
            Numeric::Number(v) => v,
            Numeric::NotANumber => f64::NAN,
        }
    }

    pub fn is_number(self) -> bool {
        matches!(self, Numeric::Number(_))
    }
}

/// Parse a text cell. Surrounding whitespace is ignored.
///
/// Anything `f64` cannot parse gives [`Numeric::NotANumber`], and so do the
/// spellings it parses to a non-finite value (`NaN`, `inf`, `infinity`).
///
/// Empty or whitespace-only input is also `NotANumber`. Unary-plus coercion
/// in JavaScript would turn it into `0`; this deliberately does not, so a
/// blank cell never lands on the axis origin.
pub fn parse_numeric(text: &str) -> Numeric {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Numeric::NotANumber;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Numeric::Number(v),
        _ => Numeric::NotANumber,
    }
}

// ---------------------------------------------------------------------------
// Dataset coercion
// ---------------------------------------------------------------------------

/// Return a copy of `dataset` with the named fields converted to numbers.
///
/// Text that fails to parse becomes `Number(NaN)`; nothing here fails. A
/// field absent from the dataset is appended as a new column holding the
/// sentinel for every row. Other fields are left untouched.
pub fn coerce_fields(dataset: &Dataset, fields: &[&str]) -> Dataset {
    let mut column_names = dataset.column_names.clone();
    let mut targets = Vec::with_capacity(fields.len());

    for field in fields {
        let existing = dataset
            .column_index(field)
            .or_else(|| column_names.iter().position(|c| c == field));
        let idx = match existing {
            Some(idx) => idx,
            None => {
                log::warn!("coercing missing column '{field}': every row becomes NaN");
                column_names.push((*field).to_string());
                column_names.len() - 1
            }
        };
        if !targets.contains(&idx) {
            targets.push(idx);
        }
    }

    let width = column_names.len();
    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            let mut values = row.values.clone();
            values.resize(width, FieldValue::Null);
            for &idx in &targets {
                values[idx] = coerce_value(&values[idx]);
            }
            Row::new(values)
        })
        .collect();

    Dataset::new(column_names, rows)
}

fn coerce_value(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(s) => FieldValue::Number(parse_numeric(s).to_f64()),
        FieldValue::Number(v) if v.is_finite() => FieldValue::Number(*v),
        FieldValue::Number(_) | FieldValue::Null => FieldValue::Number(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn parses_plain_decimals() {
        assert_eq!(parse_numeric("4.5"), Numeric::Number(4.5));
        assert_eq!(parse_numeric(" 1.3 "), Numeric::Number(1.3));
        assert_eq!(parse_numeric("2e1"), Numeric::Number(20.0));
        assert_eq!(parse_numeric("-0.25"), Numeric::Number(-0.25));
    }

    #[test]
    fn garbage_is_not_a_number() {
        assert_eq!(parse_numeric("abc"), Numeric::NotANumber);
        assert_eq!(parse_numeric(""), Numeric::NotANumber);
        assert_eq!(parse_numeric("   "), Numeric::NotANumber);
        assert_eq!(parse_numeric("NaN"), Numeric::NotANumber);
        assert_eq!(parse_numeric("1.2.3"), Numeric::NotANumber);
        assert!(parse_numeric("abc").to_f64().is_nan());
    }

    #[test]
    fn infinite_spellings_are_not_a_number() {
        for input in ["inf", "-inf", "+inf", "INF", "infinity", "Infinity", "-Infinity"] {
            assert_eq!(parse_numeric(input), Numeric::NotANumber, "input {input:?}");
        }
        // overflow parses to infinity as well
        assert_eq!(parse_numeric("1e400"), Numeric::NotANumber);
    }

    #[test]
    fn coerces_only_named_fields() {
        let ds = Dataset::new(
            vec!["petalLength".into(), "petalWidth".into(), "species".into()],
            vec![
                Row::new(vec![text("4.5"), text("1.5"), text("versicolor")]),
                Row::new(vec![text("abc"), text("0.2"), text("setosa")]),
            ],
        );

        let out = coerce_fields(&ds, &["petalLength"]);

        assert_eq!(out.column_names, ds.column_names);
        assert_eq!(out.rows[0].get(0), &FieldValue::Number(4.5));
        assert!(out.rows[1].get(0).as_f64().unwrap().is_nan());
        // untouched
        assert_eq!(out.rows[0].get(1), &text("1.5"));
        assert_eq!(out.rows[1].get(2), &text("setosa"));
        // input is not modified
        assert_eq!(ds.rows[0].get(0), &text("4.5"));
    }

    #[test]
    fn missing_field_becomes_nan_column() {
        let ds = Dataset::new(vec!["species".into()], vec![Row::new(vec![text("setosa")])]);

        let out = coerce_fields(&ds, &["petalWidth"]);

        assert_eq!(out.column_names, vec!["species".to_string(), "petalWidth".to_string()]);
        assert!(out.rows[0].get(1).as_f64().unwrap().is_nan());
    }

    #[test]
    fn numbers_stay_and_nulls_become_nan() {
        let ds = Dataset::new(
            vec!["x".into()],
            vec![
                Row::new(vec![FieldValue::Number(2.0)]),
                Row::new(vec![FieldValue::Null]),
                Row::new(vec![FieldValue::Number(f64::INFINITY)]),
            ],
        );

        let out = coerce_fields(&ds, &["x", "x"]);

        assert_eq!(out.rows[0].get(0), &FieldValue::Number(2.0));
        assert!(out.rows[1].get(0).as_f64().unwrap().is_nan());
        assert!(out.rows[2].get(0).as_f64().unwrap().is_nan());
    }
}
