//! Non-cryptographic hashes: `hash/adler32`, `hash/crc64`, `hash/fnv`,
//! `hash/maphash`.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::registry::Registry;
use crate::types::RecvKind::Pointer;
use crate::types::Ty;

pub(crate) fn register(registry: &mut Registry) {
    registry.register("hash/adler32", adler32);
    registry.register("hash/crc64", crc64);
    registry.register("hash/fnv", fnv);
    registry.register("hash/maphash", maphash);
}

pub fn adler32() -> Result<Package> {
    let mut b = PackageBuilder::new("hash/adler32", "adler32");
    let bytes = b.bytes();
    let hash = b.hash_iface()?;
    b.const_int("Size", Ty::INT, 4)?;
    b.func("New", &[], &[hash])?;
    b.func("Checksum", &[("data", bytes)], &[Ty::UINT32])?;
    b.finish()
}

pub fn crc64() -> Result<Package> {
    let mut b = PackageBuilder::new("hash/crc64", "crc64");
    let bytes = b.bytes();
    let hash = b.hash_iface()?;

    let entries = b.array(Ty::UINT64, 256);
    let table = b.named("Table", entries)?;
    let table_ptr = b.ptr(table);
    b.const_int("Size", Ty::INT, 8)?;
    b.const_uint("ISO", Ty::UINT64, 0xD800_0000_0000_0000)?;
    b.const_uint("ECMA", Ty::UINT64, 0x42F0_E1EB_A9EA_3693)?;
    b.func("New", &[("tab", table_ptr)], &[hash])?;
    b.func("MakeTable", &[("poly", Ty::UINT64)], &[table_ptr])?;
    b.func("Checksum", &[("data", bytes), ("tab", table_ptr)], &[Ty::UINT64])?;
    b.func(
        "Update",
        &[("crc", Ty::UINT64), ("tab", table_ptr), ("p", bytes)],
        &[Ty::UINT64],
    )?;
    b.finish()
}

pub fn fnv() -> Result<Package> {
    let mut b = PackageBuilder::new("hash/fnv", "fnv");
    let hash = b.hash_iface()?;
    for name in ["New32", "New32a", "New64", "New64a", "New128", "New128a"] {
        b.func(name, &[], &[hash])?;
    }
    b.finish()
}

pub fn maphash() -> Result<Package> {
    let mut b = PackageBuilder::new("hash/maphash", "maphash");
    let bytes = b.bytes();
    let err = b.error();

    let empty = b.struct_type(&[]);
    let seed = b.named("Seed", empty)?;
    b.func("MakeSeed", &[], &[seed])?;
    let empty = b.struct_type(&[]);
    let hash = b.named("Hash", empty)?;
    b.method(hash, Pointer, "Write", &[("b", bytes)], &[Ty::INT, err])?;
    b.method(hash, Pointer, "WriteByte", &[("b", Ty::BYTE)], &[err])?;
    b.method(hash, Pointer, "WriteString", &[("s", Ty::STRING)], &[Ty::INT, err])?;
    b.method(hash, Pointer, "Sum64", &[], &[Ty::UINT64])?;
    b.method(hash, Pointer, "Seed", &[], &[seed])?;
    b.method(hash, Pointer, "SetSeed", &[("seed", seed)], &[])?;
    b.method(hash, Pointer, "Reset", &[], &[])?;
    b.method(hash, Pointer, "Size", &[], &[Ty::INT])?;
    b.method(hash, Pointer, "BlockSize", &[], &[Ty::INT])?;
    b.method(hash, Pointer, "Sum", &[("b", bytes)], &[bytes])?;
    b.func("Bytes", &[("seed", seed), ("b", bytes)], &[Ty::UINT64])?;
    b.func("String", &[("seed", seed), ("s", Ty::STRING)], &[Ty::UINT64])?;
    b.finish()
}
