use csv::StringRecord;

/// Coerces the cell at `index` into a number.
///
/// Missing cells, empty strings, text and non-finite values all become `None`.
pub(crate) fn cell(record: &StringRecord, index: usize) -> Option<f64> {
    record
        .get(index)
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_cells() {
        let record = StringRecord::from(vec![" 71.5 ", "", "n/a", "NaN", "inf", "-3"]);

        assert_eq!(cell(&record, 0), Some(71.5));
        assert_eq!(cell(&record, 1), None);
        assert_eq!(cell(&record, 2), None);
        assert_eq!(cell(&record, 3), None);
        assert_eq!(cell(&record, 4), None);
        assert_eq!(cell(&record, 5), Some(-3.0));
        assert_eq!(cell(&record, 6), None);
    }
}
