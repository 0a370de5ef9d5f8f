use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SpecError;
use crate::input::JsonInput;

/// The `type` of a spec node.
///
/// Unrecognized names are kept as [`SpecType::Unknown`] so that a spec with
/// a typo still loads and the validator can report the offending name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpecType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
    Unknown(String),
}

impl SpecType {
    pub fn as_str(&self) -> &str {
        match self {
            SpecType::String => "string",
            SpecType::Number => "number",
            SpecType::Integer => "integer",
            SpecType::Boolean => "boolean",
            SpecType::Object => "object",
            SpecType::Array => "array",
            SpecType::Null => "null",
            SpecType::Unknown(name) => name,
        }
    }
}

impl From<&str> for SpecType {
    fn from(name: &str) -> Self {
        match name {
            "string" => SpecType::String,
            "number" => SpecType::Number,
            "integer" => SpecType::Integer,
            "boolean" => SpecType::Boolean,
            "object" => SpecType::Object,
            "array" => SpecType::Array,
            "null" => SpecType::Null,
            other => SpecType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for SpecType {
    fn from(name: String) -> Self {
        SpecType::from(name.as_str())
    }
}

impl From<SpecType> for String {
    fn from(ty: SpecType) -> Self {
        ty.as_str().to_string()
    }
}

impl fmt::Display for SpecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A conditional rule: when `if` holds for the enclosing object, the specs
/// in `then` are merged onto the named fields; otherwise those in `else`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "if")]
    pub if_expr: String,
    #[serde(default)]
    pub then: BTreeMap<String, Spec>,
    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<BTreeMap<String, Spec>>,
}

impl Condition {
    /// Start a condition guarded by `expression`.
    ///
    /// ```
    /// use vld_spec::spec::Condition;
    ///
    /// let cond = Condition::when("enabled == true")
    ///     .then("value", vld_spec::any().min_length(1))
    ///     .otherwise("value", vld_spec::any().allow_empty(true));
    /// assert_eq!(cond.then.len(), 1);
    /// assert!(cond.otherwise.is_some());
    /// ```
    pub fn when(expression: impl Into<String>) -> Self {
        Self {
            if_expr: expression.into(),
            then: BTreeMap::new(),
            otherwise: None,
        }
    }

    /// Override applied to `field` when the guard is true.
    pub fn then(mut self, field: impl Into<String>, spec: Spec) -> Self {
        self.then.insert(field.into(), spec);
        self
    }

    /// Override applied to `field` when the guard is false.
    pub fn otherwise(mut self, field: impl Into<String>, spec: Spec) -> Self {
        self.otherwise
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), spec);
        self
    }

    /// The branch selected by a guard outcome.
    pub fn branch(&self, outcome: bool) -> Option<&BTreeMap<String, Spec>> {
        if outcome {
            Some(&self.then)
        } else {
            self.otherwise.as_ref()
        }
    }
}

/// A declarative schema node.
///
/// Every field is optional: an absent constraint is not checked, and an
/// absent `type` skips type checking entirely, which is what lets condition
/// overrides carry only the constraints they change.
///
/// Specs are usually loaded from JSON:
///
/// ```
/// use vld_spec::spec::{Spec, SpecType};
///
/// let spec: Spec = r#"{"type": "string", "minLength": 2}"#.parse().unwrap();
/// assert_eq!(spec.spec_type, Some(SpecType::String));
/// assert_eq!(spec.min_length, Some(2));
/// ```
///
/// or built in code:
///
/// ```
/// let spec = vld_spec::object()
///     .property("name", vld_spec::string().min_length(2))
///     .required(["name"]);
/// assert!(spec.properties.unwrap().contains_key("name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "type_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub spec_type: Option<SpecType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Spec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Spec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_empty: Option<bool>,
}

/// `"type": ""` and `"type": null` both mean "no type".
fn type_or_absent<'de, D>(deserializer: D) -> Result<Option<SpecType>, D::Error>
where
    D: Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.filter(|n| !n.is_empty()).map(SpecType::from))
}

impl Spec {
    /// A spec with no type and no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// A spec of the given type with no constraints.
    pub fn of(spec_type: SpecType) -> Self {
        Self {
            spec_type: Some(spec_type),
            ..Self::default()
        }
    }

    /// Load a spec from any [`JsonInput`]: JSON text, bytes, a file path or
    /// an already parsed `Value`.
    pub fn parse<I: JsonInput + ?Sized>(input: &I) -> Result<Self, SpecError> {
        let value = input.to_json_value()?;
        Self::from_value(&value)
    }

    /// Interpret a JSON value as a spec.
    pub fn from_value(value: &Value) -> Result<Self, SpecError> {
        Self::deserialize(value).map_err(|e| SpecError::Invalid(e.to_string()))
    }

    /// Whether this spec, or any spec reachable through `properties` or
    /// `items`, carries a non-empty condition list.
    ///
    /// Specs without conditions validate identically everywhere from their
    /// static constraints alone.
    pub fn has_expressions(&self) -> bool {
        if self.conditions.as_ref().is_some_and(|c| !c.is_empty()) {
            return true;
        }
        if let Some(props) = &self.properties {
            if props.values().any(Spec::has_expressions) {
                return true;
            }
        }
        self.items.as_ref().is_some_and(|items| items.has_expressions())
    }

    /// Minimum numeric value (inclusive).
    pub fn min(mut self, val: f64) -> Self {
        self.min = Some(val);
        self
    }

    /// Maximum numeric value (inclusive).
    pub fn max(mut self, val: f64) -> Self {
        self.max = Some(val);
        self
    }

    /// Minimum string length or array element count.
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    /// Maximum string length or array element count.
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Regular expression the string must match.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Restrict the value to a fixed set of JSON literals.
    ///
    /// ```
    /// let spec = vld_spec::string().one_of(["admin", "user"]);
    /// assert_eq!(spec.enumeration.unwrap().len(), 2);
    /// ```
    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enumeration = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Let `""` bypass length and pattern checks.
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = Some(allow);
        self
    }

    /// Declare an object property.
    pub fn property(mut self, name: impl Into<String>, spec: Spec) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), spec);
        self
    }

    /// Replace the list of required property names.
    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Append a conditional rule. Conditions apply in the order they are added.
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions
            .get_or_insert_with(Vec::new)
            .push(condition);
        self
    }

    /// Spec applied to every array element.
    pub fn items(mut self, spec: Spec) -> Self {
        self.items = Some(Box::new(spec));
        self
    }
}

impl FromStr for Spec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
