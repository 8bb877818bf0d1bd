//! Testing utilities for validators
//!
//! Assertion macros over [`Diagnostics`](crate::Diagnostics) and a scripted
//! set validator that records every request it receives.
//!
//! # Examples
//!
//! ```rust
//! use attrvalidator::prelude::*;
//! use attrvalidator::testing::RecordingSetValidator;
//! use attrvalidator::{assert_error_at, assert_diagnostic_count};
//!
//! let recorder = RecordingSetValidator::new("always fails").fail_all();
//! let req = SetRequest::new(
//!     Path::root("tags"),
//!     SetValue::null(AttrType::String),
//!     Config::empty(),
//! );
//! let mut resp = SetResponse::default();
//! recorder.validate_set(&Context::background(), &req, &mut resp);
//!
//! assert_diagnostic_count!(resp.diagnostics, 1);
//! assert_error_at!(resp.diagnostics, Path::root("tags"));
//! assert_eq!(recorder.calls(), 1);
//! ```

use std::sync::{Mutex, PoisonError};

use crate::diag::{Diagnostic, Severity};
use crate::path::Path;
use crate::validator::{Context, Describe, SetRequest, SetResponse, SetValidator};

/// Assert that a diagnostics collection is empty.
///
/// # Example
///
/// ```rust
/// use attrvalidator::{Diagnostics, assert_no_diagnostics};
///
/// assert_no_diagnostics!(Diagnostics::new());
/// ```
#[macro_export]
macro_rules! assert_no_diagnostics {
    ($diagnostics:expr) => {{
        let diagnostics = &$diagnostics;
        if !diagnostics.is_empty() {
            panic!("Expected no diagnostics, got: {:#?}", diagnostics);
        }
    }};
}

/// Assert the number of diagnostics in a collection.
///
/// # Example
///
/// ```rust
/// use attrvalidator::{Diagnostics, assert_diagnostic_count};
///
/// let mut diags = Diagnostics::new();
/// diags.add_warning("Heads up", "");
/// assert_diagnostic_count!(diags, 1);
/// ```
#[macro_export]
macro_rules! assert_diagnostic_count {
    ($diagnostics:expr, $expected:expr) => {{
        let diagnostics = &$diagnostics;
        let expected: usize = $expected;
        if diagnostics.len() != expected {
            panic!(
                "Expected {} diagnostics, got {}: {:#?}",
                expected,
                diagnostics.len(),
                diagnostics
            );
        }
    }};
}

/// Assert that a collection holds an error attached to `path`.
///
/// # Example
///
/// ```rust
/// use attrvalidator::{Diagnostics, Path, assert_error_at};
///
/// let mut diags = Diagnostics::new();
/// diags.add_attribute_error(Path::root("tags"), "Bad", "");
/// assert_error_at!(diags, Path::root("tags"));
/// ```
#[macro_export]
macro_rules! assert_error_at {
    ($diagnostics:expr, $path:expr) => {{
        let diagnostics = &$diagnostics;
        let path: $crate::Path = $path;
        if !diagnostics
            .errors()
            .any(|d: &$crate::Diagnostic| d.path() == Some(&path))
        {
            panic!(
                "Expected an error at {}, got: {:#?}",
                path, diagnostics
            );
        }
    }};
}

/// Summary of the diagnostics emitted by [`RecordingSetValidator`].
pub const RECORDED_FAILURE: &str = "Recorded Failure";

#[derive(Debug, Clone)]
enum Outcome {
    Pass,
    Fail(Severity),
    FailAt(Vec<Path>),
}

/// A scripted set validator that remembers what it was asked.
///
/// By default it passes everything. Configure it to fail every request, fail
/// only at chosen paths, or warn on every request.
#[derive(Debug)]
pub struct RecordingSetValidator {
    description: String,
    outcome: Outcome,
    seen: Mutex<Vec<SetRequest>>,
}

impl RecordingSetValidator {
    /// A validator that passes every request.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            outcome: Outcome::Pass,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Emit one error for every request.
    pub fn fail_all(mut self) -> Self {
        self.outcome = Outcome::Fail(Severity::Error);
        self
    }

    /// Emit one warning for every request.
    pub fn warn_all(mut self) -> Self {
        self.outcome = Outcome::Fail(Severity::Warning);
        self
    }

    /// Emit one error for requests at `path`; may be called repeatedly.
    pub fn fail_at(mut self, path: Path) -> Self {
        match &mut self.outcome {
            Outcome::FailAt(paths) => paths.push(path),
            outcome => *outcome = Outcome::FailAt(vec![path]),
        }
        self
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.lock().len()
    }

    /// Copies of every request received, in order.
    pub fn seen(&self) -> Vec<SetRequest> {
        self.lock().clone()
    }

    /// Paths of every request received, in order.
    pub fn seen_paths(&self) -> Vec<Path> {
        self.lock().iter().map(|req| req.path.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SetRequest>> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Describe for RecordingSetValidator {
    fn description(&self, _ctx: &Context) -> String {
        self.description.clone()
    }

    fn markdown_description(&self, _ctx: &Context) -> String {
        format!("`{}`", self.description)
    }
}

impl SetValidator for RecordingSetValidator {
    fn validate_set(&self, _ctx: &Context, req: &SetRequest, resp: &mut SetResponse) {
        self.lock().push(req.clone());

        let severity = match &self.outcome {
            Outcome::Pass => return,
            Outcome::Fail(severity) => *severity,
            Outcome::FailAt(paths) if paths.contains(&req.path) => Severity::Error,
            Outcome::FailAt(_) => return,
        };
        resp.diagnostics.push(Diagnostic::with_path(
            severity,
            req.path.clone(),
            RECORDED_FAILURE,
            format!("{} rejected {}", self.description, req.path),
        ));
    }
}
