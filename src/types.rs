//! # Type graph nodes
//!
//! Types are referenced through the copyable [`Ty`] handle:
//!
//! - `Ty::Basic(kind)` points into the static primitive catalog
//! - `Ty::Universe(id)` points into the shared universe package
//! - `Ty::Local(id)` points into the arena of the package being looked at
//!
//! A `Local` handle is meaningless without its package, so every query takes
//! the owning [`crate::Package`] alongside the handle. Handle equality is not
//! type identity; use [`crate::identical`] for that.

use smallvec::SmallVec;
use walk_derive::WalkTypes;

use crate::arena::{Id, ListRef, Symbol};
use crate::basic::BasicKind;
use crate::object::ObjId;

pub type TypeId = Id<Type>;

/// Handle to a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ty {
    Basic(BasicKind),
    Universe(TypeId),
    Local(TypeId),
}

impl Ty {
    pub const INVALID: Ty = Ty::Basic(BasicKind::Invalid);
    pub const BOOL: Ty = Ty::Basic(BasicKind::Bool);
    pub const INT: Ty = Ty::Basic(BasicKind::Int);
    pub const INT8: Ty = Ty::Basic(BasicKind::Int8);
    pub const INT16: Ty = Ty::Basic(BasicKind::Int16);
    pub const INT32: Ty = Ty::Basic(BasicKind::Int32);
    pub const INT64: Ty = Ty::Basic(BasicKind::Int64);
    pub const UINT: Ty = Ty::Basic(BasicKind::Uint);
    pub const UINT8: Ty = Ty::Basic(BasicKind::Uint8);
    pub const UINT16: Ty = Ty::Basic(BasicKind::Uint16);
    pub const UINT32: Ty = Ty::Basic(BasicKind::Uint32);
    pub const UINT64: Ty = Ty::Basic(BasicKind::Uint64);
    pub const UINTPTR: Ty = Ty::Basic(BasicKind::Uintptr);
    pub const FLOAT32: Ty = Ty::Basic(BasicKind::Float32);
    pub const FLOAT64: Ty = Ty::Basic(BasicKind::Float64);
    pub const COMPLEX64: Ty = Ty::Basic(BasicKind::Complex64);
    pub const COMPLEX128: Ty = Ty::Basic(BasicKind::Complex128);
    pub const STRING: Ty = Ty::Basic(BasicKind::String);
    pub const UNSAFE_POINTER: Ty = Ty::Basic(BasicKind::UnsafePointer);
    pub const BYTE: Ty = Ty::Basic(BasicKind::Byte);
    pub const RUNE: Ty = Ty::Basic(BasicKind::Rune);
    pub const UNTYPED_BOOL: Ty = Ty::Basic(BasicKind::UntypedBool);
    pub const UNTYPED_INT: Ty = Ty::Basic(BasicKind::UntypedInt);
    pub const UNTYPED_RUNE: Ty = Ty::Basic(BasicKind::UntypedRune);
    pub const UNTYPED_FLOAT: Ty = Ty::Basic(BasicKind::UntypedFloat);
    pub const UNTYPED_STRING: Ty = Ty::Basic(BasicKind::UntypedString);
    pub const UNTYPED_NIL: Ty = Ty::Basic(BasicKind::UntypedNil);

    #[inline]
    pub const fn basic(kind: BasicKind) -> Ty {
        Ty::Basic(kind)
    }

    #[inline]
    pub const fn is_basic(self) -> bool {
        matches!(self, Ty::Basic(_))
    }

    /// Returns the arena index if this handle points into the owning package.
    #[inline]
    pub const fn local(self) -> Option<TypeId> {
        match self {
            Ty::Local(id) => Some(id),
            _ => None,
        }
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    SendRecv,
    SendOnly,
    RecvOnly,
}

/// Which method set a method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecvKind {
    Value,
    Pointer,
}

/// Interface lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Open,
    Completed,
}

/// Parameter, result or receiver variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkTypes)]
pub struct Param {
    #[walk(skip)]
    pub name: Symbol,
    pub ty: Ty,
}

/// Struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkTypes)]
pub struct Field {
    #[walk(skip)]
    pub name: Symbol,
    pub ty: Ty,
    pub embedded: bool,
    #[walk(skip)]
    pub tag: Option<Symbol>,
}

/// Function or method signature.
#[derive(Debug, Clone, PartialEq, Eq, WalkTypes)]
pub struct Signature {
    pub recv: Option<Param>,
    pub params: ListRef<Param>,
    pub results: ListRef<Param>,
    pub variadic: bool,
}

/// Interface shape: explicit methods plus embedded types.
///
/// Embedded method sets are not copied in; the query layer flattens them.
#[derive(Debug, Clone, PartialEq, Eq, WalkTypes)]
pub struct Interface {
    pub methods: Vec<ObjId>,
    pub embeddeds: SmallVec<[Ty; 2]>,
    #[walk(skip)]
    pub state: Completion,
}

impl Interface {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == Completion::Completed
    }

    /// True for `interface{}` (no methods, nothing embedded).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.embeddeds.is_empty()
    }
}

/// A method attached to a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkTypes)]
pub struct Method {
    pub func: ObjId,
    #[walk(skip)]
    pub recv: RecvKind,
}

/// Declared type with identity.
#[derive(Debug, Clone, PartialEq, Eq, WalkTypes)]
pub struct Named {
    /// The `TypeName` object that gives this type its identity.
    pub obj: ObjId,
    /// Set exactly once, after declaration.
    pub underlying: Option<Ty>,
    /// All attached methods, in attachment order.
    pub methods: Vec<Method>,
}

impl Named {
    /// Methods bound to `T`.
    pub fn value_methods(&self) -> impl Iterator<Item = ObjId> + '_ {
        self.methods
            .iter()
            .filter(|m| m.recv == RecvKind::Value)
            .map(|m| m.func)
    }

    /// Methods bound to `*T`.
    pub fn pointer_methods(&self) -> impl Iterator<Item = ObjId> + '_ {
        self.methods
            .iter()
            .filter(|m| m.recv == RecvKind::Pointer)
            .map(|m| m.func)
    }
}

/// Arena node for a non-basic type.
#[derive(Debug, Clone, PartialEq, Eq, WalkTypes)]
pub enum Type {
    Named(Named),
    Pointer { elem: Ty },
    Slice { elem: Ty },
    Array { elem: Ty, len: u64 },
    Map { key: Ty, elem: Ty },
    Chan {
        #[walk(skip)]
        dir: ChanDir,
        elem: Ty,
    },
    Struct { fields: ListRef<Field> },
    Signature(Signature),
    Interface(Interface),
    Tuple { vars: ListRef<Param> },
}

impl Type {
    pub fn as_named(&self) -> Option<&Named> {
        match self {
            Type::Named(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_signature(&self) -> Option<&Signature> {
        match self {
            Type::Signature(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&Interface> {
        match self {
            Type::Interface(i) => Some(i),
            _ => None,
        }
    }

    /// Short name of the node kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Named(_) => "named",
            Type::Pointer { .. } => "pointer",
            Type::Slice { .. } => "slice",
            Type::Array { .. } => "array",
            Type::Map { .. } => "map",
            Type::Chan { .. } => "chan",
            Type::Struct { .. } => "struct",
            Type::Signature(_) => "signature",
            Type::Interface(_) => "interface",
            Type::Tuple { .. } => "tuple",
        }
    }
}

/// Field description accepted by [`crate::Package::struct_of`].
#[derive(Debug, Clone, Copy)]
pub struct FieldDecl<'a> {
    pub name: &'a str,
    pub ty: Ty,
    pub embedded: bool,
    pub tag: Option<&'a str>,
}

impl<'a> FieldDecl<'a> {
    pub const fn new(name: &'a str, ty: Ty) -> Self {
        Self {
            name,
            ty,
            embedded: false,
            tag: None,
        }
    }

    /// An embedded field; its name is the embedded type's name.
    pub const fn embedded(name: &'a str, ty: Ty) -> Self {
        Self {
            name,
            ty,
            embedded: true,
            tag: None,
        }
    }

    pub const fn with_tag(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }
}
