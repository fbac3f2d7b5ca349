//! `compress/bzip2`, `compress/lzw`, `compress/zlib`.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::registry::Registry;
use crate::types::RecvKind::{Pointer, Value};
use crate::types::Ty;

pub(crate) fn register(registry: &mut Registry) {
    registry.register("compress/bzip2", bzip2);
    registry.register("compress/lzw", lzw);
    registry.register("compress/zlib", zlib);
}

pub fn bzip2() -> Result<Package> {
    let mut b = PackageBuilder::new("compress/bzip2", "bzip2");
    let reader = b.io_reader()?;
    b.func("NewReader", &[("r", reader)], &[reader])?;
    let structural = b.named("StructuralError", Ty::STRING)?;
    b.error_method(structural, Value)?;
    b.finish()
}

pub fn lzw() -> Result<Package> {
    let mut b = PackageBuilder::new("compress/lzw", "lzw");
    let reader = b.io_reader()?;
    let writer = b.io_writer()?;

    let order = b.named("Order", Ty::INT)?;
    b.enumerate(order, &["LSB", "MSB"], 0)?;
    b.func(
        "NewReader",
        &[("r", reader), ("order", order), ("litWidth", Ty::INT)],
        &[reader],
    )?;
    b.func(
        "NewWriter",
        &[("w", writer), ("order", order), ("litWidth", Ty::INT)],
        &[writer],
    )?;
    b.finish()
}

pub fn zlib() -> Result<Package> {
    let mut b = PackageBuilder::new("compress/zlib", "zlib");
    let bytes = b.bytes();
    let err = b.error();
    let reader = b.io_reader()?;
    let writer = b.io_writer()?;

    let reset = b.sig(&[("r", reader), ("dict", bytes)], &[err]);
    let resetter = b.interface(&[("Reset", reset)])?;
    b.named("Resetter", resetter)?;

    let shape = b.struct_type(&[("data", Ty::INT)]);
    let zwriter = b.named("Writer", shape)?;
    let zwriter_ptr = b.recv_ptr(zwriter);
    b.method(zwriter, Pointer, "Write", &[("p", bytes)], &[Ty::INT, err])?;
    b.method(zwriter, Pointer, "Close", &[], &[err])?;
    b.method(zwriter, Pointer, "Flush", &[], &[err])?;
    b.method(zwriter, Pointer, "Reset", &[("w", writer)], &[])?;

    b.func("NewReader", &[("r", reader)], &[reader, err])?;
    b.func("NewWriter", &[("w", writer)], &[zwriter_ptr])?;
    b.const_int("NoCompression", Ty::INT, 0)?;
    b.const_int("BestSpeed", Ty::INT, 1)?;
    b.const_int("BestCompression", Ty::INT, 9)?;
    b.const_int("DefaultCompression", Ty::INT, -1)?;
    b.const_int("HuffmanOnly", Ty::INT, -2)?;
    b.func(
        "NewWriterLevel",
        &[("w", writer), ("level", Ty::INT)],
        &[zwriter_ptr, err],
    )?;
    b.func(
        "NewReaderDict",
        &[("r", reader), ("dict", bytes)],
        &[reader, err],
    )?;
    b.func(
        "NewWriterLevelDict",
        &[("w", writer), ("level", Ty::INT), ("dict", bytes)],
        &[zwriter_ptr, err],
    )?;
    b.error_vars(&["ErrChecksum", "ErrDictionary", "ErrHeader"])?;
    b.finish()
}
