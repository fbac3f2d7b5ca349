//! Declared objects and package scopes.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::arena::{Id, Symbol};
use crate::types::Ty;

pub type ObjId = Id<Object>;

/// Process-unique package identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(u32);

impl PackageId {
    /// Hands out a fresh id; safe to call from concurrent builders.
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Literal value carried by a constant declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(Box<str>),
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Bool(b) => write!(f, "{b}"),
            ConstValue::Int(i) => write!(f, "{i}"),
            ConstValue::Uint(u) => write!(f, "{u}"),
            ConstValue::Float(x) => write!(f, "{x}"),
            ConstValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// Predeclared functions (universe and `unsafe`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Append,
    Cap,
    Clear,
    Close,
    Complex,
    Copy,
    Delete,
    Imag,
    Len,
    Make,
    Max,
    Min,
    New,
    Panic,
    Print,
    Println,
    Real,
    Recover,

    // package unsafe
    Add,
    Alignof,
    Offsetof,
    Sizeof,
    Slice,
    SliceData,
    String,
    StringData,
}

impl Builtin {
    pub const UNIVERSE: [Builtin; 18] = [
        Builtin::Append,
        Builtin::Cap,
        Builtin::Clear,
        Builtin::Close,
        Builtin::Complex,
        Builtin::Copy,
        Builtin::Delete,
        Builtin::Imag,
        Builtin::Len,
        Builtin::Make,
        Builtin::Max,
        Builtin::Min,
        Builtin::New,
        Builtin::Panic,
        Builtin::Print,
        Builtin::Println,
        Builtin::Real,
        Builtin::Recover,
    ];

    pub const UNSAFE: [Builtin; 8] = [
        Builtin::Add,
        Builtin::Alignof,
        Builtin::Offsetof,
        Builtin::Sizeof,
        Builtin::Slice,
        Builtin::SliceData,
        Builtin::String,
        Builtin::StringData,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Append => "append",
            Builtin::Cap => "cap",
            Builtin::Clear => "clear",
            Builtin::Close => "close",
            Builtin::Complex => "complex",
            Builtin::Copy => "copy",
            Builtin::Delete => "delete",
            Builtin::Imag => "imag",
            Builtin::Len => "len",
            Builtin::Make => "make",
            Builtin::Max => "max",
            Builtin::Min => "min",
            Builtin::New => "new",
            Builtin::Panic => "panic",
            Builtin::Print => "print",
            Builtin::Println => "println",
            Builtin::Real => "real",
            Builtin::Recover => "recover",
            Builtin::Add => "Add",
            Builtin::Alignof => "Alignof",
            Builtin::Offsetof => "Offsetof",
            Builtin::Sizeof => "Sizeof",
            Builtin::Slice => "Slice",
            Builtin::SliceData => "SliceData",
            Builtin::String => "String",
            Builtin::StringData => "StringData",
        }
    }
}

/// Object variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Const(ConstValue),
    Var,
    Func,
    TypeName,
    Label,
    PkgName { imported: Box<str> },
    Builtin(Builtin),
    Nil,
}

/// A declared entity. Identity is `(pkg, name)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub name: Symbol,
    pub ty: Ty,
    /// Declaring package; `None` only for `nil` and builtins.
    pub pkg: Option<PackageId>,
    pub kind: ObjectKind,
}

impl Object {
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ObjectKind::Const(_) => "const",
            ObjectKind::Var => "var",
            ObjectKind::Func => "func",
            ObjectKind::TypeName => "type",
            ObjectKind::Label => "label",
            ObjectKind::PkgName { .. } => "package",
            ObjectKind::Builtin(_) => "builtin",
            ObjectKind::Nil => "nil",
        }
    }

    pub fn const_value(&self) -> Option<&ConstValue> {
        match &self.kind {
            ObjectKind::Const(v) => Some(v),
            _ => None,
        }
    }
}

/// Insertion-ordered name → object map with unique names.
#[derive(Debug, Default)]
pub struct Scope {
    entries: Vec<ObjId>,
    index: HashMap<Symbol, ObjId>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `obj` under `name`; on collision returns the existing object.
    pub fn insert(&mut self, name: Symbol, obj: ObjId) -> Result<(), ObjId> {
        if let Some(&existing) = self.index.get(&name) {
            return Err(existing);
        }
        self.index.insert(name, obj);
        self.entries.push(obj);
        Ok(())
    }

    #[inline]
    pub fn get(&self, name: Symbol) -> Option<ObjId> {
        self.index.get(&name).copied()
    }

    /// Objects in insertion order.
    #[inline]
    pub fn objects(&self) -> &[ObjId] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
