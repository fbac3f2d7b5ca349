//! Declaration DSL over [`Package`] used by the stub builders.
//!
//! A stub reads like the Go API it mirrors:
//!
//! ```
//! use go125_stubs::{PackageBuilder, RecvKind, Ty};
//!
//! # fn main() -> Result<(), go125_stubs::StubError> {
//! let mut b = PackageBuilder::new("example.com/counter", "counter");
//! let counter = b.named("Counter", Ty::INT)?;
//! b.method(counter, RecvKind::Pointer, "Inc", &[], &[])?;
//! b.method(counter, RecvKind::Value, "Value", &[], &[Ty::INT])?;
//! b.func("New", &[], &[counter])?;
//! let pkg = b.finish()?;
//! assert!(pkg.lookup("Counter").is_some());
//! # Ok(())
//! # }
//! ```
//!
//! Results are unnamed. Interfaces built here are completed immediately.
//! Types owned by other emulated packages are replaced by the local
//! stand-ins below.

use std::collections::HashMap;

use crate::error::Result;
use crate::object::ConstValue;
use crate::package::Package;
use crate::types::{ChanDir, FieldDecl, RecvKind, Ty, TypeId};
use crate::universe;

/// Mutable front end for building one stub package.
#[derive(Debug)]
pub struct PackageBuilder {
    pkg: Package,
    recv_ptrs: HashMap<TypeId, Ty>,
    bytes: Option<Ty>,
    opaque: Option<Ty>,
    reader: Option<Ty>,
    writer: Option<Ty>,
    hash: Option<Ty>,
    block: Option<Ty>,
}

fn receiver_name(type_name: &str) -> String {
    type_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| "r".to_string())
}

impl PackageBuilder {
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            pkg: Package::new(path, name),
            recv_ptrs: HashMap::new(),
            bytes: None,
            opaque: None,
            reader: None,
            writer: None,
            hash: None,
            block: None,
        }
    }

    #[inline]
    pub fn package(&self) -> &Package {
        &self.pkg
    }

    /// Direct access to the assembler for anything the DSL does not cover.
    #[inline]
    pub fn package_mut(&mut self) -> &mut Package {
        &mut self.pkg
    }

    /// Seals the package and hands it over.
    pub fn finish(mut self) -> Result<Package> {
        self.pkg.mark_complete()?;
        Ok(self.pkg)
    }

    // ---------------------------------------------------------------------
    // Types
    // ---------------------------------------------------------------------

    #[inline]
    pub fn error(&self) -> Ty {
        universe::error_type()
    }

    #[inline]
    pub fn any(&self) -> Ty {
        universe::any_type()
    }

    /// `[]byte`
    pub fn bytes(&mut self) -> Ty {
        match self.bytes {
            Some(t) => t,
            None => {
                let t = self.pkg.slice_of(Ty::BYTE);
                *self.bytes.insert(t)
            }
        }
    }

    #[inline]
    pub fn ptr(&mut self, elem: Ty) -> Ty {
        self.pkg.pointer_to(elem)
    }

    #[inline]
    pub fn slice(&mut self, elem: Ty) -> Ty {
        self.pkg.slice_of(elem)
    }

    #[inline]
    pub fn array(&mut self, elem: Ty, len: u64) -> Ty {
        self.pkg.array_of(elem, len)
    }

    #[inline]
    pub fn map(&mut self, key: Ty, elem: Ty) -> Ty {
        self.pkg.map_of(key, elem)
    }

    #[inline]
    pub fn chan(&mut self, dir: ChanDir, elem: Ty) -> Ty {
        self.pkg.chan_of(dir, elem)
    }

    fn results(results: &[Ty]) -> Vec<(&'static str, Ty)> {
        results.iter().map(|&t| ("", t)).collect()
    }

    /// Receiver-less signature, for func types, func-typed parameters and
    /// interface methods.
    pub fn sig(&mut self, params: &[(&str, Ty)], results: &[Ty]) -> Ty {
        let results = Self::results(results);
        self.pkg.signature_of(None, params, &results, false)
    }

    /// As [`PackageBuilder::sig`], with a trailing `...T` parameter given as
    /// its slice type.
    pub fn sig_variadic(&mut self, params: &[(&str, Ty)], results: &[Ty]) -> Ty {
        let results = Self::results(results);
        self.pkg.signature_of(None, params, &results, true)
    }

    pub fn tuple(&mut self, vars: &[Ty]) -> Ty {
        let vars = Self::results(vars);
        self.pkg.tuple_of(&vars)
    }

    /// Struct with plain fields.
    pub fn struct_type(&mut self, fields: &[(&str, Ty)]) -> Ty {
        let fields: Vec<FieldDecl<'_>> = fields.iter().map(|&(n, t)| FieldDecl::new(n, t)).collect();
        self.pkg.struct_of(&fields)
    }

    /// Struct with embedded or tagged fields.
    #[inline]
    pub fn struct_of(&mut self, fields: &[FieldDecl<'_>]) -> Ty {
        self.pkg.struct_of(fields)
    }

    /// Completed interface from `(name, signature)` pairs.
    pub fn interface(&mut self, methods: &[(&str, Ty)]) -> Result<Ty> {
        self.interface_with(methods, &[])
    }

    /// Completed interface with embedded types.
    pub fn interface_with(&mut self, methods: &[(&str, Ty)], embeddeds: &[Ty]) -> Result<Ty> {
        let funcs: Vec<_> = methods
            .iter()
            .map(|&(name, sig)| self.pkg.new_func(name, sig))
            .collect();
        let iface = self.pkg.interface_of(&funcs, embeddeds);
        self.pkg.complete_interface(iface)?;
        Ok(iface)
    }

    // ---------------------------------------------------------------------
    // Stand-ins for types owned by other packages
    // ---------------------------------------------------------------------

    /// `*struct{}` placeholder for a foreign type this package only passes
    /// around.
    pub fn opaque(&mut self) -> Ty {
        match self.opaque {
            Some(t) => t,
            None => {
                let empty = self.pkg.struct_of(&[]);
                let t = self.pkg.pointer_to(empty);
                *self.opaque.insert(t)
            }
        }
    }

    /// `io.Reader`: `interface { Read(p []byte) (n int, err error) }`
    pub fn io_reader(&mut self) -> Result<Ty> {
        if let Some(t) = self.reader {
            return Ok(t);
        }
        let bytes = self.bytes();
        let err = self.error();
        let read = self.sig(&[("p", bytes)], &[Ty::INT, err]);
        let t = self.interface(&[("Read", read)])?;
        Ok(*self.reader.insert(t))
    }

    /// `io.Writer`: `interface { Write(p []byte) (n int, err error) }`
    pub fn io_writer(&mut self) -> Result<Ty> {
        if let Some(t) = self.writer {
            return Ok(t);
        }
        let bytes = self.bytes();
        let err = self.error();
        let write = self.sig(&[("p", bytes)], &[Ty::INT, err]);
        let t = self.interface(&[("Write", write)])?;
        Ok(*self.writer.insert(t))
    }

    /// `hash.Hash`: Write, Sum, Reset, Size, BlockSize.
    pub fn hash_iface(&mut self) -> Result<Ty> {
        if let Some(t) = self.hash {
            return Ok(t);
        }
        let bytes = self.bytes();
        let err = self.error();
        let write = self.sig(&[("p", bytes)], &[Ty::INT, err]);
        let sum = self.sig(&[("b", bytes)], &[bytes]);
        let reset = self.sig(&[], &[]);
        let size = self.sig(&[], &[Ty::INT]);
        let block_size = self.sig(&[], &[Ty::INT]);
        let t = self.interface(&[
            ("Write", write),
            ("Sum", sum),
            ("Reset", reset),
            ("Size", size),
            ("BlockSize", block_size),
        ])?;
        Ok(*self.hash.insert(t))
    }

    /// `cipher.Block`: BlockSize, Encrypt, Decrypt.
    pub fn cipher_block(&mut self) -> Result<Ty> {
        if let Some(t) = self.block {
            return Ok(t);
        }
        let bytes = self.bytes();
        let block_size = self.sig(&[], &[Ty::INT]);
        let encrypt = self.sig(&[("dst", bytes), ("src", bytes)], &[]);
        let decrypt = self.sig(&[("dst", bytes), ("src", bytes)], &[]);
        let t = self.interface(&[
            ("BlockSize", block_size),
            ("Encrypt", encrypt),
            ("Decrypt", decrypt),
        ])?;
        Ok(*self.block.insert(t))
    }

    // ---------------------------------------------------------------------
    // Declarations
    // ---------------------------------------------------------------------

    fn constant(&mut self, name: &str, ty: Ty, value: ConstValue) -> Result<()> {
        let obj = self.pkg.new_const(name, ty, value);
        self.pkg.insert(obj)
    }

    pub fn const_int(&mut self, name: &str, ty: Ty, value: i64) -> Result<()> {
        self.constant(name, ty, ConstValue::Int(value))
    }

    pub fn const_uint(&mut self, name: &str, ty: Ty, value: u64) -> Result<()> {
        self.constant(name, ty, ConstValue::Uint(value))
    }

    pub fn const_float(&mut self, name: &str, ty: Ty, value: f64) -> Result<()> {
        self.constant(name, ty, ConstValue::Float(value))
    }

    pub fn const_str(&mut self, name: &str, ty: Ty, value: &str) -> Result<()> {
        self.constant(name, ty, ConstValue::String(value.into()))
    }

    pub fn const_bool(&mut self, name: &str, value: bool) -> Result<()> {
        self.constant(name, Ty::UNTYPED_BOOL, ConstValue::Bool(value))
    }

    /// Consecutive `int`-valued constants of one type, like an `iota` block.
    pub fn enumerate(&mut self, ty: Ty, names: &[&str], first: i64) -> Result<()> {
        for (i, name) in (first..).zip(names) {
            self.const_int(name, ty, i)?;
        }
        Ok(())
    }

    pub fn var(&mut self, name: &str, ty: Ty) -> Result<()> {
        let obj = self.pkg.new_var(name, ty);
        self.pkg.insert(obj)
    }

    /// Sentinel `error` variables.
    pub fn error_vars(&mut self, names: &[&str]) -> Result<()> {
        let err = self.error();
        names.iter().try_for_each(|name| self.var(name, err))
    }

    pub fn func(&mut self, name: &str, params: &[(&str, Ty)], results: &[Ty]) -> Result<()> {
        let sig = self.sig(params, results);
        let obj = self.pkg.new_func(name, sig);
        self.pkg.insert(obj)
    }

    pub fn func_variadic(&mut self, name: &str, params: &[(&str, Ty)], results: &[Ty]) -> Result<()> {
        let sig = self.sig_variadic(params, results);
        let obj = self.pkg.new_func(name, sig);
        self.pkg.insert(obj)
    }

    /// Declares a named type and puts it in scope. Use
    /// [`PackageBuilder::set_underlying`] to supply the shape later.
    pub fn declare(&mut self, name: &str) -> Result<Ty> {
        let t = self.pkg.declare(name)?;
        if let Some(obj) = self.pkg.type_name_of(t) {
            self.pkg.insert(obj)?;
        }
        Ok(t)
    }

    #[inline]
    pub fn set_underlying(&mut self, named: Ty, shape: Ty) -> Result<()> {
        self.pkg.set_underlying(named, shape)
    }

    /// `type Name Underlying`, in scope.
    pub fn named(&mut self, name: &str, underlying: Ty) -> Result<Ty> {
        let t = self.declare(name)?;
        self.pkg.set_underlying(t, underlying)?;
        Ok(t)
    }

    /// Named type kept out of the scope, for unexported helpers.
    pub fn hidden(&mut self, name: &str, underlying: Ty) -> Result<Ty> {
        let t = self.pkg.declare(name)?;
        self.pkg.set_underlying(t, underlying)?;
        Ok(t)
    }

    /// `type Name = T`.
    pub fn alias(&mut self, name: &str, ty: Ty) -> Result<()> {
        let obj = self.pkg.new_type_name(name, ty);
        self.pkg.insert(obj)
    }

    /// `*T` for a receiver, shared by all pointer methods of `T`.
    pub fn recv_ptr(&mut self, named: Ty) -> Ty {
        let key = named.local();
        if let Some(t) = key.and_then(|id| self.recv_ptrs.get(&id)) {
            return *t;
        }
        let t = self.pkg.pointer_to(named);
        if let Some(id) = key {
            self.recv_ptrs.insert(id, t);
        }
        t
    }

    fn method_sig(
        &mut self,
        named: Ty,
        recv: RecvKind,
        params: &[(&str, Ty)],
        results: &[Ty],
        variadic: bool,
    ) -> Ty {
        let recv_name = self
            .pkg
            .type_name_of(named)
            .map(|obj| receiver_name(self.pkg.object_name(obj)))
            .unwrap_or_default();
        let recv_ty = match recv {
            RecvKind::Value => named,
            RecvKind::Pointer => self.recv_ptr(named),
        };
        let results = Self::results(results);
        self.pkg
            .signature_of(Some((recv_name.as_str(), recv_ty)), params, &results, variadic)
    }

    /// Attaches `func (r T) name(params) results` or its `*T` form.
    pub fn method(
        &mut self,
        named: Ty,
        recv: RecvKind,
        name: &str,
        params: &[(&str, Ty)],
        results: &[Ty],
    ) -> Result<()> {
        let sig = self.method_sig(named, recv, params, results, false);
        let func = self.pkg.new_func(name, sig);
        self.pkg.add_method(named, func)
    }

    pub fn method_variadic(
        &mut self,
        named: Ty,
        recv: RecvKind,
        name: &str,
        params: &[(&str, Ty)],
        results: &[Ty],
    ) -> Result<()> {
        let sig = self.method_sig(named, recv, params, results, true);
        let func = self.pkg.new_func(name, sig);
        self.pkg.add_method(named, func)
    }

    /// `Error() string` on `T` or `*T`, making it an `error`.
    pub fn error_method(&mut self, named: Ty, recv: RecvKind) -> Result<()> {
        self.method(named, recv, "Error", &[], &[Ty::STRING])
    }

    /// `String() string` on the value receiver.
    pub fn stringer(&mut self, named: Ty) -> Result<()> {
        self.method(named, RecvKind::Value, "String", &[], &[Ty::STRING])
    }

    /// The `hash.Hash` method set on `*T`.
    pub fn hash_methods(&mut self, named: Ty) -> Result<()> {
        let bytes = self.bytes();
        let err = self.error();
        self.method(named, RecvKind::Pointer, "Write", &[("p", bytes)], &[Ty::INT, err])?;
        self.method(named, RecvKind::Pointer, "Sum", &[("b", bytes)], &[bytes])?;
        self.method(named, RecvKind::Pointer, "Reset", &[], &[])?;
        self.method(named, RecvKind::Pointer, "Size", &[], &[Ty::INT])?;
        self.method(named, RecvKind::Pointer, "BlockSize", &[], &[Ty::INT])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receiver_names_follow_type_names() {
        assert_eq!(receiver_name("Int"), "i");
        assert_eq!(receiver_name("KeySizeError"), "k");
        assert_eq!(receiver_name(""), "r");
    }

    #[test]
    fn pointer_receivers_are_shared() {
        let mut b = PackageBuilder::new("p", "p");
        let t = b.named("T", Ty::INT).unwrap();
        let first = b.recv_ptr(t);
        assert_eq!(b.recv_ptr(t), first);
    }

    #[test]
    fn stand_ins_are_cached() {
        let mut b = PackageBuilder::new("p", "p");
        let r = b.io_reader().unwrap();
        assert_eq!(b.io_reader().unwrap(), r);
        assert_eq!(b.bytes(), b.bytes());
        assert_eq!(b.opaque(), b.opaque());
    }
}
