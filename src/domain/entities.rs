//! Domain entities: the `Parent`/`Child` hierarchy
//!
//! `Parent` and `Child` are stateless. The operations they share live in
//! [`ParentBehavior`], whose provided methods are the `Parent` implementations.
//! `Child` overrides `method1`, keeps `method2`, and adds `method3` as an
//! inherent method, so nothing typed as a `Parent` can name it:
//!
//! ```compile_fail
//! use dispatch_demo::domain::{Child, Object};
//!
//! let reference = Object::from(Child::new());
//! let mut out = Vec::new();
//! reference.method3(&mut out).unwrap();
//! ```
//!
//! A `Parent`-typed reference is an [`Object`]: a closed sum over both
//! dynamic types. Calls on it are resolved by matching the case, and narrowing
//! back to `Child` goes through `TryFrom`.

use std::fmt;
use std::io::{self, Write};

use tracing::trace;

use crate::domain::{DomainError, DomainResult};

pub const PARENT_METHOD1: &str = "Parent method1";
pub const PARENT_METHOD2: &str = "Parent method2";
pub const CHILD_METHOD1: &str = "Child method1";
pub const CHILD_METHOD3: &str = "Child method2";

/// Runtime type of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Parent,
    Child,
}

impl TypeTag {
    /// Subtype relation: `Child` is-a `Parent`, every type is-a itself.
    pub fn is_a(self, other: TypeTag) -> bool {
        match (self, other) {
            (_, TypeTag::Parent) => true,
            (TypeTag::Child, TypeTag::Child) => true,
            (TypeTag::Parent, TypeTag::Child) => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Parent => "Parent",
            TypeTag::Child => "Child",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn emit(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text)
}

/// Operations every `Parent` supports.
///
/// The provided methods are the `Parent` behavior. An implementor that
/// overrides one replaces it entirely; there is no call-through to the base.
pub trait ParentBehavior: fmt::Debug {
    /// Dynamic type of the instance.
    fn type_tag(&self) -> TypeTag;

    fn method1(&self, out: &mut dyn Write) -> io::Result<()> {
        emit(out, PARENT_METHOD1)
    }

    fn method2(&self, out: &mut dyn Write) -> io::Result<()> {
        emit(out, PARENT_METHOD2)
    }

    /// Instance-of check against the dynamic type.
    fn is_instance_of(&self, tag: TypeTag) -> bool {
        self.type_tag().is_a(tag)
    }
}

/// The base type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parent;

impl Parent {
    pub fn new() -> Self {
        Self
    }
}

impl ParentBehavior for Parent {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Parent
    }
}

/// The derived type. Is-a `Parent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Child;

impl Child {
    pub fn new() -> Self {
        Self
    }

    /// Only reachable through a `Child`-typed handle.
    pub fn method3(&self, out: &mut dyn Write) -> io::Result<()> {
        emit(out, CHILD_METHOD3)
    }
}

impl ParentBehavior for Child {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Child
    }

    fn method1(&self, out: &mut dyn Write) -> io::Result<()> {
        emit(out, CHILD_METHOD1)
    }
}

/// A `Parent`-typed reference bound to an instance of either dynamic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Object {
    Parent(Parent),
    Child(Child),
}

impl Object {
    /// Construct a fresh instance of `dynamic` behind a `Parent`-typed reference.
    pub fn new(dynamic: TypeTag) -> Self {
        match dynamic {
            TypeTag::Parent => Object::Parent(Parent::new()),
            TypeTag::Child => Object::Child(Child::new()),
        }
    }

    /// Narrow to a borrowed `Child` without consuming the reference.
    pub fn downcast_ref(&self) -> DomainResult<&Child> {
        match self {
            Object::Child(child) => Ok(child),
            Object::Parent(_) => Err(DomainError::InvalidDowncast {
                from: TypeTag::Parent,
                to: TypeTag::Child,
            }),
        }
    }

    fn resolved(&self) -> &dyn ParentBehavior {
        match self {
            Object::Parent(parent) => parent,
            Object::Child(child) => child,
        }
    }
}

impl ParentBehavior for Object {
    fn type_tag(&self) -> TypeTag {
        self.resolved().type_tag()
    }

    fn method1(&self, out: &mut dyn Write) -> io::Result<()> {
        trace!(dynamic = %self.type_tag(), "dispatch method1");
        self.resolved().method1(out)
    }

    fn method2(&self, out: &mut dyn Write) -> io::Result<()> {
        trace!(dynamic = %self.type_tag(), "dispatch method2");
        self.resolved().method2(out)
    }
}

impl From<Parent> for Object {
    fn from(parent: Parent) -> Self {
        Object::Parent(parent)
    }
}

impl From<Child> for Object {
    fn from(child: Child) -> Self {
        Object::Child(child)
    }
}

impl TryFrom<Object> for Child {
    type Error = DomainError;

    fn try_from(object: Object) -> DomainResult<Self> {
        object.downcast_ref().copied()
    }
}
