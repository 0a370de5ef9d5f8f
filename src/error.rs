use std::fmt;

use serde_json::Value;

/// A segment in a validation error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// Object field name.
    Field(&'a str),
    /// Array index.
    Index(usize),
}

impl PathSegment<'_> {
    /// Append this segment to an existing path string.
    ///
    /// The root path is `""`. Fields are joined with `.` (no leading dot at
    /// the root), indices are appended as `[i]` without a separator.
    ///
    /// ```
    /// use vld_spec::error::PathSegment;
    ///
    /// assert_eq!(PathSegment::Field("user").append(""), "user");
    /// assert_eq!(PathSegment::Field("name").append("user"), "user.name");
    /// assert_eq!(PathSegment::Index(2).append("tags"), "tags[2]");
    /// assert_eq!(PathSegment::Index(0).append(""), "[0]");
    /// ```
    pub fn append(&self, base: &str) -> String {
        match self {
            PathSegment::Field(name) if base.is_empty() => (*name).to_string(),
            PathSegment::Field(name) if name.is_empty() => base.to_string(),
            PathSegment::Field(name) => format!("{}.{}", base, name),
            PathSegment::Index(idx) => format!("{}[{}]", base, idx),
        }
    }
}

/// A single validation failure, qualified by the path of the offending value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of one validation pass.
///
/// Errors are accumulated (not short-circuited), so every violation in the
/// value tree is reported at once. `valid` is `true` exactly when `errors`
/// is empty; the only way to add an error is [`push`](Self::push), which
/// keeps the two in step.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a passing result with no errors.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: vec![],
        }
    }

    /// Create a failing result holding a single error.
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.push(path, message);
        result
    }

    /// Record an error. Marks the result invalid.
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError::new(path, message));
    }

    /// Append every error of another result.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        for error in errors {
            self.valid = false;
            self.errors.push(error);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Errors reported at exactly `path`.
    pub fn errors_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.path == path)
    }

    /// `Ok(())` when valid, otherwise the result itself as the error.
    pub fn into_result(self) -> Result<(), ValidationResult> {
        if self.valid {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return write!(f, "valid");
        }
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationResult {}

/// Failure to turn raw input into a JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The input could not be read (file inputs only).
    Io(String),
    /// The input is not well-formed JSON.
    Json(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Io(msg) => write!(f, "failed to read file: {}", msg),
            InputError::Json(msg) => write!(f, "invalid JSON: {}", msg),
        }
    }
}

impl std::error::Error for InputError {}

/// Failure to load a [`Spec`](crate::spec::Spec) document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The document could not be read or is not JSON.
    Input(InputError),
    /// The document is JSON but does not describe a spec.
    Invalid(String),
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::Input(err) => write!(f, "{}", err),
            SpecError::Invalid(msg) => write!(f, "invalid spec: {}", msg),
        }
    }
}

impl std::error::Error for SpecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpecError::Input(err) => Some(err),
            SpecError::Invalid(_) => None,
        }
    }
}

impl From<InputError> for SpecError {
    fn from(err: InputError) -> Self {
        SpecError::Input(err)
    }
}

/// Returns the JSON type name for a value.
#[doc(hidden)]
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Format a JSON value for display in errors (short form).
pub fn format_value_short(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("Array(len={})", arr.len()),
        Value::Object(obj) => format!("Object(keys={})", obj.len()),
    }
}
