//! Generator argument model
//!
//! Declares the parameter surface a generator exposes to the web form and
//! the CLI, and parses submitted values back into typed arguments.
//!
//! # Features
//!
//! - Typed argument descriptors (float, int, bool, string, choice, sections)
//! - Argument groups matching the form's visual sections
//! - Query-string parsing with per-argument error reporting
//! - Section-list syntax (`50*3:60`) for compartment dimensions

mod sections;

pub use sections::{parse_sections, MAX_SECTIONS};

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Group name used for the shared top-level arguments of every generator
pub const DEFAULT_GROUP: &str = "Default";

/// Values an HTML checkbox submits that count as "unchecked"
const FALSEY: &[&str] = &["", "0", "false", "off", "no"];

// ============================================================
// Error Types
// ============================================================

/// Argument parsing and lookup errors
#[derive(Debug, Error)]
pub enum ArgError {
    #[error("invalid value {value:?} for `{name}`: {reason}")]
    Invalid {
        name: String,
        value: String,
        reason: String,
    },

    #[error("{value:?} is not a valid choice for `{name}` (expected one of: {choices})")]
    InvalidChoice {
        name: String,
        value: String,
        choices: String,
    },

    #[error("argument `{0}` is not declared")]
    Undeclared(String),

    #[error("argument `{name}` is {actual}, not {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ArgError>;

// ============================================================
// Core Data Structures
// ============================================================

/// Argument value types a generator can declare
#[derive(Debug, Clone, PartialEq)]
pub enum ArgType {
    /// Floating point number (dimensions, mm)
    Float,
    /// Integer count
    Int,
    /// Checkbox flag
    Bool,
    /// Free-form text
    Str,
    /// One value out of a fixed list
    Choice(Vec<String>),
    /// Section list in `50*3:60` syntax, expands to a list of floats
    Sections,
}

impl ArgType {
    /// Short name used in the JSON generator index
    pub fn name(&self) -> &'static str {
        match self {
            ArgType::Float => "float",
            ArgType::Int => "int",
            ArgType::Bool => "bool",
            ArgType::Str => "string",
            ArgType::Choice(_) => "choice",
            ArgType::Sections => "sections",
        }
    }
}

/// A parsed argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    Str(String),
    Sections(Vec<f64>),
}

impl ArgValue {
    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ArgValue::Float(_) => "float",
            ArgValue::Int(_) => "int",
            ArgValue::Bool(_) => "bool",
            ArgValue::Str(_) => "string",
            ArgValue::Sections(_) => "sections",
        }
    }

    /// Render the value the way it appears in a form field
    pub fn to_form_value(&self) -> String {
        match self {
            ArgValue::Float(v) => format_float(*v),
            ArgValue::Int(v) => v.to_string(),
            ArgValue::Bool(v) => if *v { "on" } else { "" }.to_string(),
            ArgValue::Str(v) => v.clone(),
            ArgValue::Sections(vs) => vs
                .iter()
                .map(|v| format_float(*v))
                .collect::<Vec<_>>()
                .join(":"),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_form_value())
    }
}

/// Format a float without a trailing `.0` for whole numbers
fn format_float(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// A single declared argument
#[derive(Debug, Clone)]
pub struct ArgSpec {
    /// Query parameter and form field name
    pub name: String,
    /// Value type
    pub arg_type: ArgType,
    /// Default used when the parameter is absent
    pub default: ArgValue,
    /// Help text shown as the field's tooltip, translatable
    pub help: String,
}

impl ArgSpec {
    /// Declare a float argument
    pub fn float(name: impl Into<String>, default: f64, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg_type: ArgType::Float,
            default: ArgValue::Float(default),
            help: help.into(),
        }
    }

    /// Declare an integer argument
    pub fn int(name: impl Into<String>, default: i64, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg_type: ArgType::Int,
            default: ArgValue::Int(default),
            help: help.into(),
        }
    }

    /// Declare a checkbox argument
    pub fn boolean(name: impl Into<String>, default: bool, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg_type: ArgType::Bool,
            default: ArgValue::Bool(default),
            help: help.into(),
        }
    }

    /// Declare a free-form text argument
    pub fn text(name: impl Into<String>, default: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg_type: ArgType::Str,
            default: ArgValue::Str(default.into()),
            help: help.into(),
        }
    }

    /// Declare a choice argument; `default` must be one of `choices`
    pub fn choice(
        name: impl Into<String>,
        default: impl Into<String>,
        choices: &[&str],
        help: impl Into<String>,
    ) -> Self {
        let default = default.into();
        debug_assert!(choices.iter().any(|c| *c == default));
        Self {
            name: name.into(),
            arg_type: ArgType::Choice(choices.iter().map(|c| c.to_string()).collect()),
            default: ArgValue::Str(default),
            help: help.into(),
        }
    }

    /// Declare a section-list argument (`50*3:60` syntax)
    pub fn sections(name: impl Into<String>, default: &str, help: impl Into<String>) -> Self {
        let parsed = parse_sections(default).expect("builtin section default must parse");
        Self {
            name: name.into(),
            arg_type: ArgType::Sections,
            default: ArgValue::Sections(parsed),
            help: help.into(),
        }
    }

    /// Parse one submitted value against this spec
    pub fn parse(&self, raw: &str) -> Result<ArgValue> {
        let invalid = |reason: &str| ArgError::Invalid {
            name: self.name.clone(),
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        match &self.arg_type {
            ArgType::Float => {
                let v: f64 = raw.trim().parse().map_err(|_| invalid("not a number"))?;
                if !v.is_finite() {
                    return Err(invalid("not a finite number"));
                }
                Ok(ArgValue::Float(v))
            }
            ArgType::Int => {
                let v: i64 = raw.trim().parse().map_err(|_| invalid("not an integer"))?;
                Ok(ArgValue::Int(v))
            }
            ArgType::Bool => {
                let truthy = !FALSEY.contains(&raw.trim().to_ascii_lowercase().as_str());
                Ok(ArgValue::Bool(truthy))
            }
            ArgType::Str => Ok(ArgValue::Str(raw.to_string())),
            ArgType::Choice(choices) => {
                if choices.iter().any(|c| c == raw) {
                    Ok(ArgValue::Str(raw.to_string()))
                } else {
                    Err(ArgError::InvalidChoice {
                        name: self.name.clone(),
                        value: raw.to_string(),
                        choices: choices.join(", "),
                    })
                }
            }
            ArgType::Sections => {
                let vs = parse_sections(raw).map_err(|reason| invalid(&reason))?;
                Ok(ArgValue::Sections(vs))
            }
        }
    }
}

/// A named group of arguments, rendered as one form section
#[derive(Debug, Clone)]
pub struct ArgGroup {
    /// Group title, translatable
    pub title: String,
    /// Arguments in declaration order
    pub args: Vec<ArgSpec>,
}

impl ArgGroup {
    /// Create an empty group
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument to the group
    #[must_use]
    pub fn arg(mut self, spec: ArgSpec) -> Self {
        self.args.push(spec);
        self
    }
}

// ============================================================
// Parsed Arguments
// ============================================================

/// Typed argument values resolved for one generator invocation
#[derive(Debug, Clone, Default)]
pub struct ParsedArgs {
    values: HashMap<String, ArgValue>,
}

impl ParsedArgs {
    /// Parse a submitted query multimap against the declared groups.
    ///
    /// Unknown query keys are ignored, absent arguments take their declared
    /// defaults, and bools follow checkbox semantics: absent means false.
    pub fn from_query(groups: &[ArgGroup], query: &QueryValues) -> Result<Self> {
        let mut values = HashMap::new();
        for group in groups {
            for spec in &group.args {
                let value = match query.get(&spec.name) {
                    Some(raw) => spec.parse(raw)?,
                    None if spec.arg_type == ArgType::Bool => ArgValue::Bool(false),
                    None => spec.default.clone(),
                };
                values.insert(spec.name.clone(), value);
            }
        }
        Ok(Self { values })
    }

    /// Build from declared defaults only
    pub fn defaults(groups: &[ArgGroup]) -> Self {
        let mut values = HashMap::new();
        for group in groups {
            for spec in &group.args {
                values.insert(spec.name.clone(), spec.default.clone());
            }
        }
        Self { values }
    }

    /// Override one value, parsing `raw` against the declared spec
    pub fn set(&mut self, groups: &[ArgGroup], name: &str, raw: &str) -> Result<()> {
        let spec = groups
            .iter()
            .flat_map(|g| g.args.iter())
            .find(|s| s.name == name)
            .ok_or_else(|| ArgError::Undeclared(name.to_string()))?;
        self.values.insert(name.to_string(), spec.parse(raw)?);
        Ok(())
    }

    fn get(&self, name: &str) -> Result<&ArgValue> {
        self.values
            .get(name)
            .ok_or_else(|| ArgError::Undeclared(name.to_string()))
    }

    fn wrong_type(&self, name: &str, expected: &'static str, value: &ArgValue) -> ArgError {
        ArgError::WrongType {
            name: name.to_string(),
            expected,
            actual: value.type_name(),
        }
    }

    /// Float value of a declared argument
    pub fn f64(&self, name: &str) -> Result<f64> {
        match self.get(name)? {
            ArgValue::Float(v) => Ok(*v),
            ArgValue::Int(v) => Ok(*v as f64),
            other => Err(self.wrong_type(name, "float", other)),
        }
    }

    /// Integer value of a declared argument
    pub fn i64(&self, name: &str) -> Result<i64> {
        match self.get(name)? {
            ArgValue::Int(v) => Ok(*v),
            other => Err(self.wrong_type(name, "int", other)),
        }
    }

    /// Boolean value of a declared argument
    pub fn bool(&self, name: &str) -> Result<bool> {
        match self.get(name)? {
            ArgValue::Bool(v) => Ok(*v),
            other => Err(self.wrong_type(name, "bool", other)),
        }
    }

    /// String value of a declared argument (also covers choices)
    pub fn str(&self, name: &str) -> Result<&str> {
        match self.get(name)? {
            ArgValue::Str(v) => Ok(v),
            other => Err(self.wrong_type(name, "string", other)),
        }
    }

    /// Section list of a declared argument
    pub fn sections(&self, name: &str) -> Result<&[f64]> {
        match self.get(name)? {
            ArgValue::Sections(vs) => Ok(vs),
            other => Err(self.wrong_type(name, "sections", other)),
        }
    }
}

// ============================================================
// Query Values
// ============================================================

/// Decoded query parameters, preserving duplicates in arrival order.
///
/// Lookups return the first occurrence, matching how the original front end
/// treated repeated fields.
#[derive(Debug, Clone, Default)]
pub struct QueryValues {
    pairs: Vec<(String, String)>,
}

impl QueryValues {
    /// Wrap decoded key/value pairs
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Vec<(String, String)>> for QueryValues {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_groups() -> Vec<ArgGroup> {
        vec![
            ArgGroup::new(DEFAULT_GROUP)
                .arg(ArgSpec::float("x", 100.0, "outer width in mm"))
                .arg(ArgSpec::int("count", 2, "number of compartments"))
                .arg(ArgSpec::boolean("lid", false, "add a lid"))
                .arg(ArgSpec::choice("format", "svg", &["svg", "dxf"], "output format")),
            ArgGroup::new("Compartments")
                .arg(ArgSpec::sections("sx", "50*2", "compartment widths")),
        ]
    }

    fn query(pairs: &[(&str, &str)]) -> QueryValues {
        QueryValues::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_applied() {
        let groups = demo_groups();
        let args = ParsedArgs::from_query(&groups, &query(&[])).unwrap();
        assert_eq!(args.f64("x").unwrap(), 100.0);
        assert_eq!(args.i64("count").unwrap(), 2);
        assert!(!args.bool("lid").unwrap());
        assert_eq!(args.str("format").unwrap(), "svg");
        assert_eq!(args.sections("sx").unwrap(), &[50.0, 50.0]);
    }

    #[test]
    fn test_submitted_values_override_defaults() {
        let groups = demo_groups();
        let q = query(&[("x", "120.5"), ("count", "3"), ("lid", "on"), ("format", "dxf")]);
        let args = ParsedArgs::from_query(&groups, &q).unwrap();
        assert_eq!(args.f64("x").unwrap(), 120.5);
        assert_eq!(args.i64("count").unwrap(), 3);
        assert!(args.bool("lid").unwrap());
        assert_eq!(args.str("format").unwrap(), "dxf");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let groups = demo_groups();
        let q = query(&[("render", "1"), ("language", "de"), ("x", "80")]);
        let args = ParsedArgs::from_query(&groups, &q).unwrap();
        assert_eq!(args.f64("x").unwrap(), 80.0);
    }

    #[test]
    fn test_malformed_float_is_error() {
        let groups = demo_groups();
        let err = ParsedArgs::from_query(&groups, &query(&[("x", "wide")])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("x"), "error should name the argument: {msg}");
        assert!(msg.contains("wide"));
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let groups = demo_groups();
        for raw in ["NaN", "inf", "-inf"] {
            let result = ParsedArgs::from_query(&groups, &query(&[("x", raw)]));
            assert!(result.is_err(), "{raw} must be rejected");
        }
    }

    #[test]
    fn test_invalid_choice_lists_alternatives() {
        let groups = demo_groups();
        let err = ParsedArgs::from_query(&groups, &query(&[("format", "pdf")])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("svg"));
        assert!(msg.contains("dxf"));
    }

    #[test]
    fn test_checkbox_semantics() {
        let spec = ArgSpec::boolean("lid", true, "");
        assert_eq!(spec.parse("on").unwrap(), ArgValue::Bool(true));
        assert_eq!(spec.parse("1").unwrap(), ArgValue::Bool(true));
        assert_eq!(spec.parse("TRUE").unwrap(), ArgValue::Bool(true));
        assert_eq!(spec.parse("0").unwrap(), ArgValue::Bool(false));
        assert_eq!(spec.parse("off").unwrap(), ArgValue::Bool(false));
        assert_eq!(spec.parse("").unwrap(), ArgValue::Bool(false));

        // absent checkbox parses as false even with a true default
        let groups = vec![ArgGroup::new(DEFAULT_GROUP).arg(spec)];
        let args = ParsedArgs::from_query(&groups, &query(&[])).unwrap();
        assert!(!args.bool("lid").unwrap());
    }

    #[test]
    fn test_first_query_value_wins() {
        let q = query(&[("x", "10"), ("x", "20")]);
        assert_eq!(q.get("x"), Some("10"));
    }

    #[test]
    fn test_type_mismatch_reported() {
        let groups = demo_groups();
        let args = ParsedArgs::defaults(&groups);
        let err = args.str("x").unwrap_err();
        assert!(matches!(err, ArgError::WrongType { .. }));
    }

    #[test]
    fn test_set_overrides_single_value() {
        let groups = demo_groups();
        let mut args = ParsedArgs::defaults(&groups);
        args.set(&groups, "x", "42").unwrap();
        assert_eq!(args.f64("x").unwrap(), 42.0);

        let err = args.set(&groups, "nope", "1").unwrap_err();
        assert!(matches!(err, ArgError::Undeclared(_)));
    }

    #[test]
    fn test_form_value_round_trip() {
        assert_eq!(ArgValue::Float(100.0).to_form_value(), "100");
        assert_eq!(ArgValue::Float(12.5).to_form_value(), "12.5");
        assert_eq!(ArgValue::Bool(true).to_form_value(), "on");
        assert_eq!(ArgValue::Bool(false).to_form_value(), "");
        assert_eq!(
            ArgValue::Sections(vec![50.0, 50.0, 60.0]).to_form_value(),
            "50:50:60"
        );
    }

    #[test]
    fn test_arg_type_names() {
        assert_eq!(ArgType::Float.name(), "float");
        assert_eq!(ArgType::Choice(vec![]).name(), "choice");
        assert_eq!(ArgType::Sections.name(), "sections");
    }
}
