//! MATLAB function emission for the scheduling lookup.
//!
//! Renders a [`Table`] as the `optimalSchedulingValue` function: a unit
//! documentation header, the table embedded as a transposed `valueMap`
//! literal (one matrix row per signal), the generic future-sample lookup and
//! the hot-melt extruder start-up rule. Output depends only on the table
//! content and the constants in [`crate::constants`].

use crate::constants::{
    FUNCTION_NAME, GENERATOR_VERSION, INPUT_NAMES, IN_OPERATION_ROW, OUTPUT_NAMES,
    POLYMER_MASS_FLOW_ROW, SECONDS_PER_MINUTE, START_UP_LEAD_MINUTES, START_UP_SIGNALS,
    SWITCHED_ON_ROW, TIME_ROW, unit_for,
};
use crate::models::Table;
use std::fmt;

/// Render the complete function text for a table
pub fn emit_function(table: &Table) -> String {
    ScheduleFunction::new(table).to_string()
}

/// Generated lookup function over a borrowed table
#[derive(Debug, Clone, Copy)]
pub struct ScheduleFunction<'a> {
    table: &'a Table,
}

impl<'a> ScheduleFunction<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    fn write_signature(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "function [{}] = {}({})",
            OUTPUT_NAMES.join(", "),
            FUNCTION_NAME,
            INPUT_NAMES.join(", ")
        )?;
        writeln!(f, "%% GENERATED CODE (Version: {})", GENERATOR_VERSION)
    }

    fn write_documentation(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, name) in self.table.column_names().enumerate() {
            writeln!(f, "%\t{} -> '{}' - {}", index + 1, name, unit_for(name))?;
        }

        let quoted: Vec<String> = self
            .table
            .column_names()
            .map(|name| format!("'{}'", name))
            .collect();
        writeln!(f, "%\tfieldNameIdxMap = [{}];", quoted.join(", "))
    }

    /// One literal row per table column; an empty table yields `[]`
    fn write_value_map(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.table.is_empty() {
            return writeln!(f, "\tvalueMap = [];\n");
        }

        let rows: Vec<String> = self
            .table
            .columns()
            .iter()
            .map(|column| column.values.join(", "))
            .collect();
        writeln!(f, "\tvalueMap = [{}];\n", rows.join(";...\n"))
    }

    fn write_lookup(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "\tisValid = @(container, idx1, idx2) size(container, 1) >= idx1 && size(container, 2) >= idx2;\n"
        )?;

        writeln!(
            f,
            "\tallTimeValuesInSeconds = {}*(valueMap({}, :));",
            SECONDS_PER_MINUTE, TIME_ROW
        )?;
        writeln!(
            f,
            "\tallFutureValues = valueMap(:, (time + timeOffset) < allTimeValuesInSeconds);\n"
        )?;

        writeln!(f, "\tvalue = 0;")?;
        writeln!(
            f,
            "\tif isValid(allFutureValues, fieldIdx, 1), value = allFutureValues(fieldIdx, 1); end\n"
        )
    }

    fn write_start_up_rule(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (signal, row) in START_UP_SIGNALS {
            writeln!(f, "\t% {} -> {}", signal, row)?;
        }
        writeln!(f, "\thmeStartUpPhase = 0;")?;
        writeln!(f, "\thmeTargetValue = 0;")?;
        writeln!(f, "\thmeStartUpPhaseTimeOffset = 0;\n")?;

        writeln!(
            f,
            "\t%   hmeSwitchedOn_k && hmeInOperation_k+1 (due to {}min start up) && (can access target value) && (polymer value selected)",
            START_UP_LEAD_MINUTES
        )?;
        writeln!(
            f,
            "\tif isValid(allFutureValues, {on}, 1) && isValid(allFutureValues, {op}, 2) && isValid(allFutureValues, {flow}, 2) && (fieldIdx == {flow})\n",
            on = SWITCHED_ON_ROW,
            op = IN_OPERATION_ROW,
            flow = POLYMER_MASS_FLOW_ROW
        )?;
        writeln!(
            f,
            "\t\tif(allFutureValues({on}, 1) && allFutureValues({op}, 2) && (~allFutureValues({op}, 1)))",
            on = SWITCHED_ON_ROW,
            op = IN_OPERATION_ROW
        )?;
        writeln!(
            f,
            "\t\t\thmeStartUpPhaseTimeOffset = {}*(allFutureValues({}, 1)-{});",
            SECONDS_PER_MINUTE, TIME_ROW, START_UP_LEAD_MINUTES
        )?;
        writeln!(f, "\t\t\thmeStartUpPhase = 1;")?;
        writeln!(f, "\t\tend\n")?;
        writeln!(
            f,
            "\t\thmeTargetValue = allFutureValues({}, 2);\n",
            POLYMER_MASS_FLOW_ROW
        )?;
        writeln!(f, "\tend")
    }
}

impl fmt::Display for ScheduleFunction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_signature(f)?;
        self.write_documentation(f)?;
        self.write_value_map(f)?;
        self.write_lookup(f)?;
        self.write_start_up_rule(f)?;
        writeln!(f, "end")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Column;

    fn table(columns: &[(&str, &[&str])]) -> Table {
        Table::new(
            columns
                .iter()
                .map(|(name, values)| Column {
                    name: name.to_string(),
                    values: values.iter().map(|v| v.to_string()).collect(),
                })
                .collect(),
        )
    }

    fn value_map_rows(code: &str) -> Vec<String> {
        let start = code.find("valueMap = [").unwrap() + "valueMap = [".len();
        let end = start + code[start..].find("];").unwrap();
        code[start..end]
            .split(";...\n")
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_signature_and_version() {
        let code = emit_function(&table(&[("time", &["0"])]));
        let mut lines = code.lines();

        assert_eq!(
            lines.next().unwrap(),
            "function [value, hmeStartUpPhase, hmeTargetValue, hmeStartUpPhaseTimeOffset] = optimalSchedulingValue(time, timeOffset, fieldIdx)"
        );
        assert_eq!(lines.next().unwrap(), "%% GENERATED CODE (Version: 2.0.1)");
        assert!(code.ends_with("\tend\nend\n"));
    }

    #[test]
    fn test_documentation_header_lists_units_in_column_order() {
        let code = emit_function(&table(&[
            ("time", &["0"]),
            ("hmeMassFlowPolymer", &["3.5"]),
            ("tabletPressBlenderSpeed", &["40"]),
        ]));

        assert!(code.contains(
            "%\t1 -> 'time' - N/A\n\
             %\t2 -> 'hmeMassFlowPolymer' - kg/h\n\
             %\t3 -> 'tabletPressBlenderSpeed' - %\n\
             %\tfieldNameIdxMap = ['time', 'hmeMassFlowPolymer', 'tabletPressBlenderSpeed'];\n"
        ));
    }

    #[test]
    fn test_value_map_is_transposed() {
        let code = emit_function(&table(&[
            ("time", &["0", "5", "10"]),
            ("a", &["1.5", "2", "0"]),
            ("b", &["x", "y", "z"]),
        ]));

        assert_eq!(
            value_map_rows(&code),
            vec!["0, 5, 10", "1.5, 2, 0", "x, y, z"]
        );
    }

    #[test]
    fn test_ragged_table_is_embedded_as_is() {
        let code = emit_function(&table(&[("time", &["0", "5"]), ("a", &["1"])]));

        assert_eq!(value_map_rows(&code), vec!["0, 5", "1"]);
    }

    #[test]
    fn test_header_only_table_emits_empty_matrix() {
        let code = emit_function(&table(&[("time", &[]), ("a", &[])]));

        assert!(code.contains("\tvalueMap = [];\n"));
        assert!(code.contains("%\t2 -> 'a' - N/A\n"));
    }

    #[test]
    fn test_empty_table_still_forms_a_function() {
        let code = emit_function(&Table::default());

        assert!(code.contains("%\tfieldNameIdxMap = [];\n"));
        assert!(code.contains("\tvalueMap = [];\n"));
        assert!(code.ends_with("end\n"));
    }

    #[test]
    fn test_generic_lookup_block() {
        let code = emit_function(&table(&[("time", &["0"])]));

        assert!(code.contains(
            "\tisValid = @(container, idx1, idx2) size(container, 1) >= idx1 && size(container, 2) >= idx2;\n"
        ));
        assert!(code.contains("\tallTimeValuesInSeconds = 60*(valueMap(1, :));\n"));
        assert!(code.contains(
            "\tallFutureValues = valueMap(:, (time + timeOffset) < allTimeValuesInSeconds);\n"
        ));
        assert!(code.contains(
            "\tvalue = 0;\n\tif isValid(allFutureValues, fieldIdx, 1), value = allFutureValues(fieldIdx, 1); end\n"
        ));
    }

    #[test]
    fn test_start_up_rule_block() {
        let code = emit_function(&table(&[("time", &["0"])]));

        assert!(code.contains(
            "\t% hmeSwitchedOn -> 6\n\t% hmeInOperation -> 11\n\t% hmeMassFlowPolymer -> 22\n"
        ));
        assert!(code.contains(
            "\tif isValid(allFutureValues, 6, 1) && isValid(allFutureValues, 11, 2) && isValid(allFutureValues, 22, 2) && (fieldIdx == 22)\n"
        ));
        assert!(code.contains(
            "\t\tif(allFutureValues(6, 1) && allFutureValues(11, 2) && (~allFutureValues(11, 1)))\n\
             \t\t\thmeStartUpPhaseTimeOffset = 60*(allFutureValues(1, 1)-5);\n\
             \t\t\thmeStartUpPhase = 1;\n\
             \t\tend\n"
        ));
        assert!(code.contains("\t\thmeTargetValue = allFutureValues(22, 2);\n"));

        let defaults = code.find("\thmeStartUpPhase = 0;").unwrap();
        let rule = code.find("\tif isValid(allFutureValues, 6, 1)").unwrap();
        assert!(defaults < rule);
    }

    #[test]
    fn test_emission_is_deterministic() {
        let t = table(&[("time", &["0", "5"]), ("hmeMassFlowPolymer", &["1", "2"])]);

        assert_eq!(emit_function(&t), emit_function(&t));
        assert_eq!(emit_function(&t), ScheduleFunction::new(&t.clone()).to_string());
    }
}
