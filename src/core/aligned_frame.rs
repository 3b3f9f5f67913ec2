use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::core::{DataPoint, Series};

/// Series joined on a shared date index, keeping only fully populated rows.
///
/// Column order follows insertion order, which is the legend order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignedFrame {
    index: Vec<NaiveDate>,
    columns: IndexMap<String, Vec<f64>>,
}

impl AlignedFrame {
    /// Outer-joins every column on date, then drops each date where any
    /// column lacks a value.
    #[must_use]
    pub fn inner_join<'a, I, L>(columns: I) -> Self
    where
        I: IntoIterator<Item = (L, &'a Series)>,
        L: Into<String>,
    {
        let columns: Vec<(String, &Series)> = columns
            .into_iter()
            .map(|(label, series)| (label.into(), series))
            .collect();
        let width = columns.len();
        if width == 0 {
            return Self::default();
        }

        let mut rows: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
        for (column, (_, series)) in columns.iter().enumerate() {
            for obs in series.observations() {
                rows.entry(obs.date).or_insert_with(|| vec![None; width])[column] = obs.value;
            }
        }

        let mut index = Vec::new();
        let mut values: Vec<Vec<f64>> = vec![Vec::new(); width];
        for (date, row) in rows {
            let Some(complete) = row.into_iter().collect::<Option<Vec<f64>>>() else {
                continue;
            };
            index.push(date);
            for (column, value) in complete.into_iter().enumerate() {
                values[column].push(value);
            }
        }

        let columns = columns
            .into_iter()
            .map(|(label, _)| label)
            .zip(values)
            .collect();
        Self { index, columns }
    }

    #[must_use]
    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    #[must_use]
    pub fn column(&self, label: &str) -> Option<&[f64]> {
        self.columns.get(label).map(Vec::as_slice)
    }

    /// Column values paired with their dates, as plot points.
    #[must_use]
    pub fn column_points(&self, label: &str) -> Option<Vec<DataPoint>> {
        let column = self.columns.get(label)?;
        Some(
            self.index
                .iter()
                .zip(column)
                .map(|(date, value)| DataPoint::from_date(*date, *value))
                .collect(),
        )
    }
}
