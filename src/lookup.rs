//! Native evaluation of the generated lookup.
//!
//! Mirrors what `optimalSchedulingValue` computes for a query, directly on
//! the loaded table, so a schedule can be previewed without a MATLAB
//! runtime. Indices are 1-based like the generated code.

use crate::constants::{
    IN_OPERATION_ROW, POLYMER_MASS_FLOW_ROW, SECONDS_PER_MINUTE, START_UP_LEAD_MINUTES,
    SWITCHED_ON_ROW, TIME_ROW,
};
use crate::error::{CodegenError, Result};
use crate::models::Table;
use serde::Serialize;

/// Arguments of one call to the generated function
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleQuery {
    /// Reference time in seconds
    pub time: f64,
    /// Offset added to `time`, in seconds
    pub time_offset: f64,
    /// 1-based signal position
    pub field_idx: usize,
}

/// The four outputs of the generated function
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScheduleValue {
    pub value: f64,
    pub start_up_phase: bool,
    pub target_value: f64,
    /// Start of the ramp in seconds
    pub start_up_time_offset: f64,
}

/// Numeric form of the `valueMap` literal: one row per signal
#[derive(Debug, Clone, PartialEq)]
pub struct NumericMatrix {
    rows: Vec<Vec<f64>>,
}

impl NumericMatrix {
    /// Parse every cell of a rectangular table
    pub fn from_table(table: &Table) -> Result<Self> {
        let expected = table.row_count();
        let mut rows = Vec::with_capacity(table.column_count());

        for column in table.columns() {
            if column.len() != expected {
                return Err(CodegenError::RaggedTable {
                    column: column.name.clone(),
                    found: column.len(),
                    expected,
                });
            }

            let row = column
                .values
                .iter()
                .enumerate()
                .map(|(index, cell)| {
                    cell.trim()
                        .parse::<f64>()
                        .map_err(|_| CodegenError::NonNumericCell {
                            column: column.name.clone(),
                            row: index + 1,
                            value: cell.clone(),
                        })
                })
                .collect::<Result<Vec<f64>>>()?;
            rows.push(row);
        }

        Ok(Self { rows })
    }

    /// Signal rows in the matrix
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Time samples per signal
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Restrict to samples strictly after `time + time_offset` seconds
    pub fn future_samples(&self, time: f64, time_offset: f64) -> FutureSamples<'_> {
        let reference = time + time_offset;
        let columns = match self.rows.get(TIME_ROW - 1) {
            Some(times) => times
                .iter()
                .enumerate()
                .filter(|(_, minutes)| reference < SECONDS_PER_MINUTE * **minutes)
                .map(|(index, _)| index)
                .collect(),
            None => Vec::new(),
        };

        FutureSamples {
            matrix: self,
            columns,
        }
    }

    /// Evaluate the generated function for one query
    pub fn evaluate(&self, query: ScheduleQuery) -> ScheduleValue {
        let future = self.future_samples(query.time, query.time_offset);
        let mut result = ScheduleValue::default();

        if let Some(value) = future.get(query.field_idx, 1) {
            result.value = value;
        }

        if query.field_idx != POLYMER_MASS_FLOW_ROW
            || !future.is_valid(SWITCHED_ON_ROW, 1)
            || !future.is_valid(IN_OPERATION_ROW, 2)
            || !future.is_valid(POLYMER_MASS_FLOW_ROW, 2)
        {
            return result;
        }

        let switched_on = future.truthy(SWITCHED_ON_ROW, 1);
        let operating_next = future.truthy(IN_OPERATION_ROW, 2);
        let operating_now = future.truthy(IN_OPERATION_ROW, 1);

        if switched_on && operating_next && !operating_now {
            let first_future_time = future.get(TIME_ROW, 1).unwrap_or_default();
            result.start_up_time_offset =
                SECONDS_PER_MINUTE * (first_future_time - f64::from(START_UP_LEAD_MINUTES));
            result.start_up_phase = true;
        }
        result.target_value = future.get(POLYMER_MASS_FLOW_ROW, 2).unwrap_or_default();

        result
    }
}

/// Column selection of a [`NumericMatrix`], the `allFutureValues` of the
/// generated code
#[derive(Debug)]
pub struct FutureSamples<'a> {
    matrix: &'a NumericMatrix,
    columns: Vec<usize>,
}

impl FutureSamples<'_> {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Bounds check of the generated `isValid` predicate
    pub fn is_valid(&self, row: usize, column: usize) -> bool {
        row >= 1 && column >= 1 && self.matrix.row_count() >= row && self.len() >= column
    }

    /// 1-based element access
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if !self.is_valid(row, column) {
            return None;
        }
        let source_column = self.columns[column - 1];
        self.matrix.rows[row - 1].get(source_column).copied()
    }

    fn truthy(&self, row: usize, column: usize) -> bool {
        self.get(row, column).is_some_and(|value| value != 0.0)
    }
}
