use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// One step of the location a violation points at, e.g. `["inputs", 0, "Age"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingField,
    TypeMismatch,
    NullNotAllowed,
    MalformedBatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub loc: Vec<PathSegment>,
    pub input: Value,
    pub kind: ViolationKind,
    pub msg: String,
}

impl Violation {
    pub(crate) fn batch(input: Value, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![PathSegment::Key("inputs".to_string())],
            input,
            kind: ViolationKind::MalformedBatch,
            msg: msg.into(),
        }
    }

    pub(crate) fn record(index: usize, input: Value, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![PathSegment::Key("inputs".to_string()), PathSegment::Index(index)],
            input,
            kind: ViolationKind::MalformedBatch,
            msg: msg.into(),
        }
    }

    pub(crate) fn field(
        index: usize,
        field: &str,
        input: Value,
        kind: ViolationKind,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            loc: vec![
                PathSegment::Key("inputs".to_string()),
                PathSegment::Index(index),
                PathSegment::Key(field.to_string()),
            ],
            input,
            kind,
            msg: msg.into(),
        }
    }

    /// Index of the offending record, if the violation is record-scoped.
    pub fn record_index(&self) -> Option<usize> {
        match self.loc.get(1) {
            Some(PathSegment::Index(index)) => Some(*index),
            _ => None,
        }
    }

    /// Name of the offending field, if the violation is field-scoped.
    pub fn field_name(&self) -> Option<&str> {
        match self.loc.get(2) {
            Some(PathSegment::Key(name)) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<String> = self
            .loc
            .iter()
            .map(|segment| match segment {
                PathSegment::Index(index) => index.to_string(),
                PathSegment::Key(key) => key.clone(),
            })
            .collect();
        write!(f, "{}: {}", path.join("."), self.msg)
    }
}

/// Every violation found in a batch, in record order then schema order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.violations
    }
}

impl From<Violation> for ValidationErrors {
    fn from(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "; {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
