use regex_lite::Regex;
use serde_json::Value;

use super::Validator;
use crate::spec::Spec;

impl Validator {
    pub(super) fn check_string(&mut self, value: &Value, spec: &Spec, path: &str) {
        let s = match value.as_str() {
            Some(s) => s,
            None => return self.type_mismatch("string", value, path),
        };

        if spec.allow_empty == Some(true) && s.is_empty() {
            return;
        }

        let len = s.len();
        if let Some(min) = spec.min_length {
            if len < min {
                self.error(
                    path,
                    format!("string length {} is less than minimum {}", len, min),
                );
            }
        }
        if let Some(max) = spec.max_length {
            if len > max {
                self.error(
                    path,
                    format!("string length {} is greater than maximum {}", len, max),
                );
            }
        }

        if let Some(pattern) = &spec.pattern {
            match self.matches(pattern, s) {
                Ok(true) => {}
                Ok(false) => self.error(
                    path,
                    format!("string does not match pattern: {}", pattern),
                ),
                Err(err) => self.error(path, format!("invalid pattern: {}", err)),
            }
        }
    }

    /// Match `s` against `pattern`, compiling each distinct pattern once per
    /// pass.
    fn matches(&mut self, pattern: &str, s: &str) -> Result<bool, String> {
        let compiled = self
            .patterns
            .entry(pattern.to_string())
            .or_insert_with(|| {
                Regex::new(pattern).map_err(|e| {
                    tracing::warn!(pattern, error = %e, "spec pattern does not compile");
                    e.to_string()
                })
            });
        match compiled {
            Ok(re) => Ok(re.is_match(s)),
            Err(err) => Err(err.clone()),
        }
    }
}
