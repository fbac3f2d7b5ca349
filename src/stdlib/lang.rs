//! Language-support packages: `unsafe`, `iter`, `unique`, `weak`, `structs`.
//!
//! Type parameters are not modelled; generic APIs are instantiated at `int`.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::object::Builtin;
use crate::package::Package;
use crate::registry::Registry;
use crate::types::RecvKind::Value;
use crate::types::Ty;

pub(crate) fn register(registry: &mut Registry) {
    registry.register("unsafe", unsafe_);
    registry.register("iter", iter);
    registry.register("unique", unique);
    registry.register("weak", weak);
    registry.register("structs", structs);
}

pub fn unsafe_() -> Result<Package> {
    let mut b = PackageBuilder::new("unsafe", "unsafe");
    b.alias("Pointer", Ty::UNSAFE_POINTER)?;
    for builtin in Builtin::UNSAFE {
        let pkg = b.package_mut();
        let obj = pkg.new_builtin(builtin);
        pkg.insert(obj)?;
    }

    let shape = b.struct_type(&[("Data", Ty::UINTPTR), ("Len", Ty::INT), ("Cap", Ty::INT)]);
    b.named("SliceHeader", shape)?;
    let shape = b.struct_type(&[("Data", Ty::UINTPTR), ("Len", Ty::INT)]);
    b.named("StringHeader", shape)?;
    b.finish()
}

pub fn iter() -> Result<Package> {
    let mut b = PackageBuilder::new("iter", "iter");

    let yield1 = b.sig(&[("", Ty::INT)], &[Ty::BOOL]);
    let seq_fn = b.sig(&[("yield", yield1)], &[]);
    let seq = b.named("Seq", seq_fn)?;
    let yield2 = b.sig(&[("", Ty::INT), ("", Ty::INT)], &[Ty::BOOL]);
    let seq2_fn = b.sig(&[("yield", yield2)], &[]);
    let seq2 = b.named("Seq2", seq2_fn)?;

    let stop = b.sig(&[], &[]);
    let next = b.sig(&[], &[Ty::INT, Ty::BOOL]);
    b.func("Pull", &[("seq", seq)], &[next, stop])?;
    let next2 = b.sig(&[], &[Ty::INT, Ty::INT, Ty::BOOL]);
    b.func("Pull2", &[("seq", seq2)], &[next2, stop])?;
    b.finish()
}

pub fn unique() -> Result<Package> {
    let mut b = PackageBuilder::new("unique", "unique");
    let shape = b.struct_type(&[("value", Ty::INT)]);
    let handle = b.named("Handle", shape)?;
    b.func("Make", &[("value", Ty::INT)], &[handle])?;
    b.method(handle, Value, "Value", &[], &[Ty::INT])?;
    b.finish()
}

pub fn weak() -> Result<Package> {
    let mut b = PackageBuilder::new("weak", "weak");
    let empty = b.struct_type(&[]);
    let pointer = b.named("Pointer", empty)?;
    b.method(pointer, Value, "Value", &[], &[Ty::UNSAFE_POINTER])?;
    b.func("Make", &[("ptr", Ty::UNSAFE_POINTER)], &[pointer])?;
    b.finish()
}

pub fn structs() -> Result<Package> {
    let mut b = PackageBuilder::new("structs", "structs");
    let empty = b.struct_type(&[]);
    b.named("HostLayout", empty)?;
    b.finish()
}
