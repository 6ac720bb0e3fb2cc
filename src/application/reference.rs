//! Statically typed references and the operations callable through them

use std::fmt;
use std::io::Write;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Child, DomainResult, Object, ParentBehavior, TypeTag};

/// Operation names as they appear on the command line and in the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Method1,
    Method2,
    Method3,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Method1 => "method1",
            Operation::Method2 => "method2",
            Operation::Method3 => "method3",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reference with a declared type, bound to an instance.
///
/// `Parent` references hold an [`Object`] and dispatch on its dynamic type.
/// `Child` references can only ever hold a `Child`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Parent(Object),
    Child(Child),
}

impl Reference {
    /// Construct an instance of `dynamic` and bind it to a `declared` reference.
    ///
    /// A `Child` declaration goes through an explicit narrowing, so it fails
    /// when the instance is a plain `Parent`.
    pub fn bind(dynamic: TypeTag, declared: TypeTag) -> DomainResult<Self> {
        let reference = Reference::Parent(Object::new(dynamic));
        match declared {
            TypeTag::Parent => Ok(reference),
            TypeTag::Child => reference.narrow(),
        }
    }

    /// Static type of the reference.
    pub fn declared(&self) -> TypeTag {
        match self {
            Reference::Parent(_) => TypeTag::Parent,
            Reference::Child(_) => TypeTag::Child,
        }
    }

    /// Runtime type of the bound instance.
    pub fn dynamic(&self) -> TypeTag {
        match self {
            Reference::Parent(object) => object.type_tag(),
            Reference::Child(child) => child.type_tag(),
        }
    }

    /// Widen to a `Parent` reference. Always succeeds.
    pub fn upcast(self) -> Self {
        match self {
            Reference::Child(child) => Reference::Parent(Object::from(child)),
            parent => parent,
        }
    }

    /// Narrow to a `Child` reference.
    pub fn narrow(self) -> DomainResult<Self> {
        match self {
            Reference::Parent(object) => Ok(Reference::Child(Child::try_from(object)?)),
            child => Ok(child),
        }
    }

    /// Invoke `operation` through this reference, writing its line to `out`.
    pub fn invoke(&self, operation: Operation, out: &mut dyn Write) -> ApplicationResult<()> {
        debug!(
            declared = %self.declared(),
            dynamic = %self.dynamic(),
            %operation,
            "invoke"
        );
        let written = match (self, operation) {
            (Reference::Parent(_), Operation::Method3) => {
                return Err(ApplicationError::OperationNotVisible {
                    operation,
                    declared: TypeTag::Parent,
                });
            }
            (Reference::Parent(object), Operation::Method1) => object.method1(out),
            (Reference::Parent(object), Operation::Method2) => object.method2(out),
            (Reference::Child(child), Operation::Method1) => child.method1(out),
            (Reference::Child(child), Operation::Method2) => child.method2(out),
            (Reference::Child(child), Operation::Method3) => child.method3(out),
        };
        written.with_context(&format!("write {}", operation))
    }
}
