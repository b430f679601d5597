//! Application constants for the scheduling code generator
//!
//! Default paths, the fixed shape of the generated function, the unit
//! annotations for known signals and the row positions of the start-up rule.

// =============================================================================
// Default Paths
// =============================================================================

/// Default input table exported by the scheduling optimizer
pub const DEFAULT_INPUT_PATH: &str = "./output.csv";

/// Default destination of the generated function
pub const DEFAULT_OUTPUT_PATH: &str = "./optimalSchedulingValue.m";

// =============================================================================
// Generated Function Shape
// =============================================================================

/// Version tag written into every generated function
pub const GENERATOR_VERSION: &str = "2.0.1";

/// Name of the generated function
pub const FUNCTION_NAME: &str = "optimalSchedulingValue";

/// Declared outputs, in signature order
pub const OUTPUT_NAMES: &[&str] = &[
    "value",
    "hmeStartUpPhase",
    "hmeTargetValue",
    "hmeStartUpPhaseTimeOffset",
];

/// Declared inputs, in signature order
pub const INPUT_NAMES: &[&str] = &["time", "timeOffset", "fieldIdx"];

/// Matrix row holding the sample times in minutes
pub const TIME_ROW: usize = 1;

/// Sample times are stored in minutes, queries arrive in seconds
pub const SECONDS_PER_MINUTE: f64 = 60.0;

// =============================================================================
// Hot-Melt Extruder Start-Up Rule
// =============================================================================

/// Row position of the `hmeSwitchedOn` signal
pub const SWITCHED_ON_ROW: usize = 6;

/// Row position of the `hmeInOperation` signal
pub const IN_OPERATION_ROW: usize = 11;

/// Row position of the `hmeMassFlowPolymer` signal, the only field the rule applies to
pub const POLYMER_MASS_FLOW_ROW: usize = 22;

/// Minutes the extruder ramps up before it reports being in operation
pub const START_UP_LEAD_MINUTES: u32 = 5;

/// Documented signal names for the rule rows, in the order they are listed
pub const START_UP_SIGNALS: &[(&str, usize)] = &[
    ("hmeSwitchedOn", SWITCHED_ON_ROW),
    ("hmeInOperation", IN_OPERATION_ROW),
    ("hmeMassFlowPolymer", POLYMER_MASS_FLOW_ROW),
];

// =============================================================================
// Unit Annotations
// =============================================================================

/// Annotation used for columns without a known unit
pub const UNKNOWN_UNIT: &str = "N/A";

/// Units of the known process signals, used only in documentation comments
pub const UNIT_ANNOTATIONS: &[(&str, &str)] = &[
    ("crystMassFlowIntern", "(API) ml/min"),
    ("crystMassFlowPolymer", "ml/min"),
    ("hmeMassFlowAPI", "kg/h"),
    ("hmeMassFlowPolymer", "kg/h"),
    ("hmeMassFlowIntern", "kg/h"),
    ("dcLineMassFlowPolymer", "kg/h"),
    ("dcLineMassFlowIntern", "kg/h"),
    ("dcLineMassFlowAPI", "kg/h"),
    ("tabletPressMassFlowIntern", "kg/h"),
    ("tabletPressTabletMassFlowIntern", "tablets/h"),
    ("tabletPressBlenderSpeed", "%"),
];

/// Look up the documented unit for a column name
pub fn unit_for(column: &str) -> &'static str {
    UNIT_ANNOTATIONS
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, unit)| *unit)
        .unwrap_or(UNKNOWN_UNIT)
}
