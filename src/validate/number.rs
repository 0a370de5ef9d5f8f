use serde_json::Value;

use super::Validator;
use crate::spec::Spec;
use crate::value::{as_number, is_integral};

impl Validator {
    pub(super) fn check_number(&mut self, value: &Value, spec: &Spec, path: &str) {
        match as_number(value) {
            Some(num) => self.check_range("number", num, spec, path),
            None => self.type_mismatch("number", value, path),
        }
    }

    pub(super) fn check_integer(&mut self, value: &Value, spec: &Spec, path: &str) {
        let num = match as_number(value) {
            Some(num) => num,
            None => return self.type_mismatch("integer", value, path),
        };
        if !is_integral(num) {
            self.error(path, format!("expected integer, got float: {}", num));
            return;
        }
        self.check_range("integer", num, spec, path);
    }

    /// Inclusive `min`/`max` bounds.
    fn check_range(&mut self, kind: &str, num: f64, spec: &Spec, path: &str) {
        if let Some(min) = spec.min {
            if num < min {
                self.error(
                    path,
                    format!("{} {} is less than minimum {}", kind, num, min),
                );
            }
        }
        if let Some(max) = spec.max {
            if num > max {
                self.error(
                    path,
                    format!("{} {} is greater than maximum {}", kind, num, max),
                );
            }
        }
    }
}
