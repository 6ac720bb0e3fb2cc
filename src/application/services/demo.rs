//! Demonstration service
//!
//! Runs a fixed sequence of references through every operation they can name
//! and writes one line per invocation.

use std::fmt;
use std::io::{self, Write};

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, Operation, Reference};
use crate::domain::{
    DomainResult, TypeTag, CHILD_METHOD1, CHILD_METHOD3, PARENT_METHOD1, PARENT_METHOD2,
};

/// How a step's reference comes to point at its instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// New instance bound to a reference of its own type
    Direct,
    /// New `Child` bound straight to a `Parent` reference
    NewAsParent,
    /// Existing `Child` reference widened to `Parent`
    Upcast,
    /// `Parent` reference to a `Child`, narrowed back to `Child`
    Narrowed,
}

impl Binding {
    pub fn describe(self) -> &'static str {
        match self {
            Binding::Direct => "direct",
            Binding::NewAsParent => "new Child as Parent",
            Binding::Upcast => "Child widened to Parent",
            Binding::Narrowed => "Parent narrowed to Child",
        }
    }
}

/// One reference in the demonstration and the calls made through it.
#[derive(Debug, Clone)]
pub struct Step {
    pub label: &'static str,
    pub declared: TypeTag,
    pub dynamic: TypeTag,
    pub binding: Binding,
    /// Operations in call order, each with the line it should print
    pub calls: Vec<(Operation, &'static str)>,
}

impl Step {
    /// Build the step's reference the way its binding says.
    pub fn reference(&self) -> DomainResult<Reference> {
        match self.binding {
            Binding::Direct => Reference::bind(self.dynamic, self.declared),
            Binding::NewAsParent => Reference::bind(self.dynamic, TypeTag::Parent),
            Binding::Upcast => Ok(Reference::bind(self.dynamic, self.dynamic)?.upcast()),
            Binding::Narrowed => Reference::bind(self.dynamic, TypeTag::Parent)?.narrow(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} ({})",
            self.label,
            self.declared,
            self.dynamic,
            self.binding.describe()
        )
    }
}

/// The demonstration sequence.
pub fn reference_sequence() -> Vec<Step> {
    use Operation::{Method1, Method2, Method3};

    vec![
        Step {
            label: "parent",
            declared: TypeTag::Parent,
            dynamic: TypeTag::Parent,
            binding: Binding::Direct,
            calls: vec![(Method1, PARENT_METHOD1), (Method2, PARENT_METHOD2)],
        },
        Step {
            label: "child",
            declared: TypeTag::Child,
            dynamic: TypeTag::Child,
            binding: Binding::Direct,
            calls: vec![
                (Method1, CHILD_METHOD1),
                (Method2, PARENT_METHOD2),
                (Method3, CHILD_METHOD3),
            ],
        },
        Step {
            label: "parent2",
            declared: TypeTag::Parent,
            dynamic: TypeTag::Child,
            binding: Binding::NewAsParent,
            calls: vec![(Method1, CHILD_METHOD1), (Method2, PARENT_METHOD2)],
        },
        Step {
            label: "parent3",
            declared: TypeTag::Parent,
            dynamic: TypeTag::Child,
            binding: Binding::Upcast,
            calls: vec![(Method1, CHILD_METHOD1), (Method2, PARENT_METHOD2)],
        },
        Step {
            label: "child3",
            declared: TypeTag::Child,
            dynamic: TypeTag::Child,
            binding: Binding::Narrowed,
            calls: vec![
                (Method1, CHILD_METHOD1),
                (Method2, PARENT_METHOD2),
                (Method3, CHILD_METHOD3),
            ],
        },
    ]
}

/// What a demonstration run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoReport {
    pub steps: usize,
    pub lines: usize,
}

/// Service running the demonstration sequence.
pub struct DemoService {
    steps: Vec<Step>,
    check: bool,
}

impl DemoService {
    /// Create a service over the standard sequence.
    pub fn new(check: bool) -> Self {
        Self::with_steps(reference_sequence(), check)
    }

    /// Create a service over a custom sequence.
    pub fn with_steps(steps: Vec<Step>, check: bool) -> Self {
        Self { steps, check }
    }

    /// Run every step, writing its lines to `out`.
    pub fn run(&self, out: &mut dyn Write) -> ApplicationResult<DemoReport> {
        self.run_with(out, |_, _| Ok(()))
    }

    /// Run every step, calling `on_step` before a step's first invocation.
    ///
    /// `on_step` gets the same sink the invocation lines go to, so anything it
    /// writes lands right before the step's lines. With `check` set, each line
    /// is compared with the step's expected text before it is written; the
    /// first mismatch stops the run.
    #[instrument(skip_all, fields(check = self.check))]
    pub fn run_with(
        &self,
        out: &mut dyn Write,
        mut on_step: impl FnMut(&Step, &mut dyn Write) -> io::Result<()>,
    ) -> ApplicationResult<DemoReport> {
        let mut lines = 0;
        for step in &self.steps {
            on_step(step, &mut *out).with_context("write step header")?;
            let reference = step.reference()?;
            debug!("step {}", step);

            for (operation, expected) in &step.calls {
                let mut line = Vec::new();
                reference.invoke(*operation, &mut line)?;

                if self.check {
                    let actual = String::from_utf8_lossy(&line);
                    let actual = actual.trim_end();
                    if actual != *expected {
                        return Err(ApplicationError::UnexpectedOutput {
                            step: format!("{}.{}", step.label, operation),
                            expected: expected.to_string(),
                            actual: actual.to_string(),
                        });
                    }
                }

                out.write_all(&line).with_context("write demo output")?;
                lines += 1;
            }
        }
        out.flush().with_context("flush demo output")?;

        info!("demo finished: {} steps, {} lines", self.steps.len(), lines);
        Ok(DemoReport {
            steps: self.steps.len(),
            lines,
        })
    }
}
