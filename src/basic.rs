//! Primitive type catalog.
//!
//! Basic types are not allocated in any package arena. A `Ty::Basic(kind)`
//! handle resolves through [`lookup`] to an entry of a static table, so every
//! package shares the same canonical primitives without synchronization.

use std::fmt;

/// Kinds of predeclared scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BasicKind {
    Invalid,

    // Typed
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,

    // Untyped
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedComplex,
    UntypedString,
    UntypedNil,

    // Aliases
    Byte,
    Rune,
}

impl BasicKind {
    /// Every kind, in catalog order.
    pub const ALL: [BasicKind; 28] = [
        BasicKind::Invalid,
        BasicKind::Bool,
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Uintptr,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::Complex64,
        BasicKind::Complex128,
        BasicKind::String,
        BasicKind::UnsafePointer,
        BasicKind::UntypedBool,
        BasicKind::UntypedInt,
        BasicKind::UntypedRune,
        BasicKind::UntypedFloat,
        BasicKind::UntypedComplex,
        BasicKind::UntypedString,
        BasicKind::UntypedNil,
        BasicKind::Byte,
        BasicKind::Rune,
    ];

    /// Resolves the `byte`/`rune` aliases to the kind they stand for.
    #[inline]
    pub const fn canonical(self) -> BasicKind {
        match self {
            BasicKind::Byte => BasicKind::Uint8,
            BasicKind::Rune => BasicKind::Int32,
            k => k,
        }
    }
}

/// Property flags of a basic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BasicInfo(u16);

impl BasicInfo {
    pub const NONE: Self = Self(0);
    pub const BOOLEAN: Self = Self(1 << 0);
    pub const INTEGER: Self = Self(1 << 1);
    pub const UNSIGNED: Self = Self(1 << 2);
    pub const FLOAT: Self = Self(1 << 3);
    pub const COMPLEX: Self = Self(1 << 4);
    pub const STRING: Self = Self(1 << 5);
    pub const UNTYPED: Self = Self(1 << 6);

    pub const NUMERIC: Self = Self(Self::INTEGER.0 | Self::FLOAT.0 | Self::COMPLEX.0);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// True if any flag of `other` is set.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

/// Catalog entry for one primitive kind.
#[derive(Debug, PartialEq, Eq)]
pub struct Basic {
    pub kind: BasicKind,
    pub info: BasicInfo,
    pub name: &'static str,
}

impl Basic {
    #[inline]
    pub fn is_untyped(&self) -> bool {
        self.info.intersects(BasicInfo::UNTYPED)
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.info.intersects(BasicInfo::NUMERIC)
    }
}

impl fmt::Display for Basic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

const fn entry(kind: BasicKind, info: BasicInfo, name: &'static str) -> Basic {
    Basic { kind, info, name }
}

const INT: BasicInfo = BasicInfo::INTEGER;
const UINT: BasicInfo = BasicInfo::INTEGER.union(BasicInfo::UNSIGNED);
const UNTYPED: BasicInfo = BasicInfo::UNTYPED;

static CATALOG: [Basic; 28] = [
    entry(BasicKind::Invalid, BasicInfo::NONE, "invalid type"),
    entry(BasicKind::Bool, BasicInfo::BOOLEAN, "bool"),
    entry(BasicKind::Int, INT, "int"),
    entry(BasicKind::Int8, INT, "int8"),
    entry(BasicKind::Int16, INT, "int16"),
    entry(BasicKind::Int32, INT, "int32"),
    entry(BasicKind::Int64, INT, "int64"),
    entry(BasicKind::Uint, UINT, "uint"),
    entry(BasicKind::Uint8, UINT, "uint8"),
    entry(BasicKind::Uint16, UINT, "uint16"),
    entry(BasicKind::Uint32, UINT, "uint32"),
    entry(BasicKind::Uint64, UINT, "uint64"),
    entry(BasicKind::Uintptr, UINT, "uintptr"),
    entry(BasicKind::Float32, BasicInfo::FLOAT, "float32"),
    entry(BasicKind::Float64, BasicInfo::FLOAT, "float64"),
    entry(BasicKind::Complex64, BasicInfo::COMPLEX, "complex64"),
    entry(BasicKind::Complex128, BasicInfo::COMPLEX, "complex128"),
    entry(BasicKind::String, BasicInfo::STRING, "string"),
    entry(BasicKind::UnsafePointer, BasicInfo::NONE, "Pointer"),
    entry(BasicKind::UntypedBool, BasicInfo::BOOLEAN.union(UNTYPED), "untyped bool"),
    entry(BasicKind::UntypedInt, INT.union(UNTYPED), "untyped int"),
    entry(BasicKind::UntypedRune, INT.union(UNTYPED), "untyped rune"),
    entry(BasicKind::UntypedFloat, BasicInfo::FLOAT.union(UNTYPED), "untyped float"),
    entry(BasicKind::UntypedComplex, BasicInfo::COMPLEX.union(UNTYPED), "untyped complex"),
    entry(BasicKind::UntypedString, BasicInfo::STRING.union(UNTYPED), "untyped string"),
    entry(BasicKind::UntypedNil, UNTYPED, "untyped nil"),
    entry(BasicKind::Byte, UINT, "byte"),
    entry(BasicKind::Rune, INT, "rune"),
];

/// Returns the canonical catalog entry for `kind`.
#[inline]
pub fn lookup(kind: BasicKind) -> &'static Basic {
    &CATALOG[kind as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_kind() {
        for kind in BasicKind::ALL {
            assert_eq!(lookup(kind).kind, kind);
        }
    }

    #[test]
    fn aliases_share_identity() {
        assert_eq!(BasicKind::Byte.canonical(), BasicKind::Uint8);
        assert_eq!(BasicKind::Rune.canonical(), BasicKind::Int32);
        assert_eq!(lookup(BasicKind::Byte).name, "byte");
        assert!(std::ptr::eq(lookup(BasicKind::Int), lookup(BasicKind::Int)));
    }

    #[test]
    fn info_flags() {
        assert!(lookup(BasicKind::UntypedFloat).is_untyped());
        assert!(lookup(BasicKind::Uint64).info.intersects(BasicInfo::UNSIGNED));
        assert!(!lookup(BasicKind::String).is_numeric());
        assert!(lookup(BasicKind::Complex128).is_numeric());
    }
}
