use super::model::{DataError, Dataset};

// ---------------------------------------------------------------------------
// Row filtering: keep rows whose numeric fields can be placed on a chart
// ---------------------------------------------------------------------------

/// Return indices of rows where every listed column holds a finite number.
///
/// A row fails when any of the columns:
/// * is still text (not coerced) or null
/// * holds the NaN sentinel from coercion
/// * holds an infinity
pub fn plottable_indices(dataset: &Dataset, columns: &[&str]) -> Result<Vec<usize>, DataError> {
    let column_idx = columns
        .iter()
        .map(|c| dataset.require_column(c))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| column_idx.iter().all(|&idx| row.get(idx).as_finite().is_some()))
        .map(|(i, _)| i)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FieldValue, Row};
    use pretty_assertions::assert_eq;

    fn dataset() -> Dataset {
        let n = FieldValue::Number;
        Dataset::new(
            vec!["x".into(), "y".into()],
            vec![
                Row::new(vec![n(1.0), n(2.0)]),
                Row::new(vec![n(f64::NAN), n(2.0)]),
                Row::new(vec![n(1.0), FieldValue::Text("2".into())]),
                Row::new(vec![n(f64::INFINITY), n(0.0)]),
                Row::new(vec![n(3.0), n(4.0)]),
            ],
        )
    }

    #[test]
    fn keeps_only_rows_with_finite_values() {
        assert_eq!(plottable_indices(&dataset(), &["x", "y"]).unwrap(), vec![0, 4]);
        assert_eq!(plottable_indices(&dataset(), &["y"]).unwrap(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn no_columns_keeps_everything() {
        assert_eq!(plottable_indices(&dataset(), &[]).unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn unknown_column_is_an_error() {
        assert_eq!(
            plottable_indices(&dataset(), &["z"]),
            Err(DataError::MissingColumn("z".into()))
        );
    }
}
