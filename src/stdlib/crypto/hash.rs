//! Digests and key derivation: `crypto/md5`, `crypto/sha1`, `crypto/sha256`,
//! `crypto/sha3`, `crypto/sha512`, `crypto/hmac`, `crypto/hkdf`,
//! `crypto/pbkdf2`.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::types::RecvKind::Pointer;
use crate::types::Ty;

pub fn md5() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/md5", "md5");
    let bytes = b.bytes();
    let hash = b.hash_iface()?;

    b.const_int("Size", Ty::INT, 16)?;
    b.const_int("BlockSize", Ty::INT, 64)?;
    let digest = b.array(Ty::BYTE, 16);
    b.func("Sum", &[("data", bytes)], &[digest])?;
    b.func("New", &[], &[hash])?;
    b.finish()
}

pub fn sha1() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/sha1", "sha1");
    let bytes = b.bytes();
    let hash = b.hash_iface()?;

    b.const_int("Size", Ty::INT, 20)?;
    b.const_int("BlockSize", Ty::INT, 64)?;
    b.func("Sum", &[("data", bytes)], &[bytes])?;
    b.func("New", &[], &[hash])?;
    b.finish()
}

pub fn sha256() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/sha256", "sha256");
    let bytes = b.bytes();
    let hash = b.hash_iface()?;

    b.const_int("Size", Ty::INT, 32)?;
    b.const_int("Size224", Ty::INT, 28)?;
    b.const_int("BlockSize", Ty::INT, 64)?;
    let sum256 = b.array(Ty::BYTE, 32);
    let sum224 = b.array(Ty::BYTE, 28);
    b.func("Sum256", &[("data", bytes)], &[sum256])?;
    b.func("Sum224", &[("data", bytes)], &[sum224])?;
    b.func("New", &[], &[hash])?;
    b.func("New224", &[], &[hash])?;
    b.finish()
}

pub fn sha512() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/sha512", "sha512");
    let bytes = b.bytes();
    let hash = b.hash_iface()?;

    b.const_int("Size", Ty::INT, 64)?;
    b.const_int("Size224", Ty::INT, 28)?;
    b.const_int("Size256", Ty::INT, 32)?;
    b.const_int("Size384", Ty::INT, 48)?;
    b.const_int("BlockSize", Ty::INT, 128)?;
    for name in ["Sum512", "Sum384", "Sum512_224", "Sum512_256"] {
        b.func(name, &[("data", bytes)], &[bytes])?;
    }
    for name in ["New", "New384", "New512_224", "New512_256"] {
        b.func(name, &[], &[hash])?;
    }
    b.finish()
}

pub fn sha3() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/sha3", "sha3");
    let bytes = b.bytes();
    let err = b.error();

    let empty = b.struct_type(&[]);
    let sha3 = b.named("SHA3", empty)?;
    b.hash_methods(sha3)?;
    let sha3_ptr = b.recv_ptr(sha3);

    let empty = b.struct_type(&[]);
    let shake = b.named("SHAKE", empty)?;
    b.method(shake, Pointer, "Write", &[("p", bytes)], &[Ty::INT, err])?;
    b.method(shake, Pointer, "Read", &[("p", bytes)], &[Ty::INT, err])?;
    b.method(shake, Pointer, "Reset", &[], &[])?;
    b.method(shake, Pointer, "BlockSize", &[], &[Ty::INT])?;
    let shake_ptr = b.recv_ptr(shake);

    for name in ["New224", "New256", "New384", "New512"] {
        b.func(name, &[], &[sha3_ptr])?;
    }
    b.func("NewSHAKE128", &[], &[shake_ptr])?;
    b.func("NewSHAKE256", &[], &[shake_ptr])?;
    b.func("NewCSHAKE128", &[("N", bytes), ("S", bytes)], &[shake_ptr])?;
    b.func("NewCSHAKE256", &[("N", bytes), ("S", bytes)], &[shake_ptr])?;
    for (name, len) in [("Sum224", 28), ("Sum256", 32), ("Sum384", 48), ("Sum512", 64)] {
        let digest = b.array(Ty::BYTE, len);
        b.func(name, &[("data", bytes)], &[digest])?;
    }
    b.func("SumSHAKE128", &[("data", bytes), ("length", Ty::INT)], &[bytes])?;
    b.func("SumSHAKE256", &[("data", bytes), ("length", Ty::INT)], &[bytes])?;
    b.finish()
}

pub fn hmac() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/hmac", "hmac");
    let bytes = b.bytes();
    let hash = b.hash_iface()?;
    let factory = b.sig(&[], &[hash]);

    b.func("New", &[("h", factory), ("key", bytes)], &[hash])?;
    b.func("Equal", &[("mac1", bytes), ("mac2", bytes)], &[Ty::BOOL])?;
    b.finish()
}

pub fn hkdf() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/hkdf", "hkdf");
    let bytes = b.bytes();
    let err = b.error();
    let hash = b.hash_iface()?;
    let factory = b.sig(&[], &[hash]);

    b.func(
        "Extract",
        &[("h", factory), ("secret", bytes), ("salt", bytes)],
        &[bytes, err],
    )?;
    b.func(
        "Expand",
        &[
            ("h", factory),
            ("pseudorandomKey", bytes),
            ("info", Ty::STRING),
            ("keyLength", Ty::INT),
        ],
        &[bytes, err],
    )?;
    b.func(
        "Key",
        &[
            ("h", factory),
            ("secret", bytes),
            ("salt", bytes),
            ("info", Ty::STRING),
            ("keyLength", Ty::INT),
        ],
        &[bytes, err],
    )?;
    b.finish()
}

pub fn pbkdf2() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/pbkdf2", "pbkdf2");
    let bytes = b.bytes();
    let err = b.error();
    let hash = b.hash_iface()?;
    let factory = b.sig(&[], &[hash]);

    b.func(
        "Key",
        &[
            ("h", factory),
            ("password", Ty::STRING),
            ("salt", bytes),
            ("iter", Ty::INT),
            ("keyLength", Ty::INT),
        ],
        &[bytes, err],
    )?;
    b.finish()
}
