//! The `crypto` family.

mod cipher;
mod hash;
mod pubkey;
mod tls;
mod x509;

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::registry::Registry;
use crate::types::RecvKind::Value;
use crate::types::Ty;

pub(crate) fn register(registry: &mut Registry) {
    registry.register("crypto", crypto);
    registry.register("crypto/aes", cipher::aes);
    registry.register("crypto/cipher", cipher::cipher);
    registry.register("crypto/des", cipher::des);
    registry.register("crypto/dsa", pubkey::dsa);
    registry.register("crypto/ecdh", pubkey::ecdh);
    registry.register("crypto/ecdsa", pubkey::ecdsa);
    registry.register("crypto/ed25519", pubkey::ed25519);
    registry.register("crypto/elliptic", pubkey::elliptic);
    registry.register("crypto/fips140", fips140);
    registry.register("crypto/hkdf", hash::hkdf);
    registry.register("crypto/hmac", hash::hmac);
    registry.register("crypto/hpke", pubkey::hpke);
    registry.register("crypto/md5", hash::md5);
    registry.register("crypto/mlkem", pubkey::mlkem);
    registry.register("crypto/pbkdf2", hash::pbkdf2);
    registry.register("crypto/rand", rand);
    registry.register("crypto/rc4", cipher::rc4);
    registry.register("crypto/rsa", pubkey::rsa);
    registry.register("crypto/sha1", hash::sha1);
    registry.register("crypto/sha256", hash::sha256);
    registry.register("crypto/sha3", hash::sha3);
    registry.register("crypto/sha512", hash::sha512);
    registry.register("crypto/subtle", subtle);
    registry.register("crypto/tls", tls::tls);
    registry.register("crypto/x509", x509::x509);
    registry.register("crypto/x509/pkix", x509::pkix);
}

pub fn crypto() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto", "crypto");
    let err = b.error();
    let any = b.any();
    let bytes = b.bytes();
    let reader = b.io_reader()?;
    let hash_iface = b.hash_iface()?;

    let hash = b.named("Hash", Ty::UINT)?;
    for (name, id) in [
        ("MD4", 1),
        ("MD5", 2),
        ("SHA1", 3),
        ("SHA224", 4),
        ("SHA256", 5),
        ("SHA384", 6),
        ("SHA512", 7),
        ("SHA512_224", 12),
        ("SHA512_256", 13),
        ("MD5SHA1", 8),
        ("SHA3_224", 10),
        ("SHA3_256", 11),
        ("SHA3_384", 14),
        ("SHA3_512", 15),
        ("BLAKE2s_256", 16),
        ("BLAKE2b_256", 17),
        ("BLAKE2b_512", 19),
        ("RIPEMD160", 20),
    ] {
        b.const_uint(name, hash, id)?;
    }
    b.method(hash, Value, "Available", &[], &[Ty::BOOL])?;
    b.method(hash, Value, "Size", &[], &[Ty::INT])?;
    b.method(hash, Value, "HashFunc", &[], &[hash])?;
    b.method(hash, Value, "BlockSize", &[], &[Ty::INT])?;
    b.stringer(hash)?;
    b.const_uint("BLAKE2b_384", hash, 18)?;
    let factory = b.sig(&[], &[hash_iface]);
    b.func("RegisterHash", &[("h", hash), ("f", factory)], &[])?;

    let hash_func = b.sig(&[], &[hash]);
    let opts_iface = b.interface(&[("HashFunc", hash_func)])?;
    let signer_opts = b.named("SignerOpts", opts_iface)?;
    let empty = b.interface(&[])?;
    let decrypter_opts = b.named("DecrypterOpts", empty)?;
    let empty = b.interface(&[])?;
    let public_key = b.named("PublicKey", empty)?;
    b.alias("PrivateKey", any)?;

    let public = b.sig(&[], &[public_key]);
    let sign = b.sig(
        &[("rand", reader), ("digest", bytes), ("opts", signer_opts)],
        &[bytes, err],
    );
    let signer_iface = b.interface(&[("Public", public), ("Sign", sign)])?;
    let signer = b.named("Signer", signer_iface)?;

    let public = b.sig(&[], &[public_key]);
    let decrypt = b.sig(
        &[("rand", reader), ("msg", bytes), ("opts", decrypter_opts)],
        &[bytes, err],
    );
    let decrypter_iface = b.interface(&[("Public", public), ("Decrypt", decrypt)])?;
    b.named("Decrypter", decrypter_iface)?;
    b.method(hash, Value, "New", &[], &[hash_iface])?;

    let sign_message = b.sig(
        &[("rand", reader), ("message", bytes), ("opts", signer_opts)],
        &[bytes, err],
    );
    let message_signer = b.interface(&[("SignMessage", sign_message)])?;
    b.named("MessageSigner", message_signer)?;
    b.func(
        "SignMessage",
        &[
            ("signer", signer),
            ("rand", reader),
            ("message", bytes),
            ("opts", signer_opts),
        ],
        &[bytes, err],
    )?;
    b.finish()
}

pub fn fips140() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/fips140", "fips140");
    b.func("Enabled", &[], &[Ty::BOOL])?;
    b.finish()
}

pub fn rand() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/rand", "rand");
    let err = b.error();
    let bytes = b.bytes();
    let reader = b.io_reader()?;

    b.var("Reader", reader)?;
    b.func("Read", &[("b", bytes)], &[Ty::INT, err])?;
    let empty = b.struct_type(&[]);
    let big_int = b.hidden("bigInt", empty)?;
    let big_int_ptr = b.ptr(big_int);
    b.func(
        "Int",
        &[("rand", reader), ("max", big_int_ptr)],
        &[big_int_ptr, err],
    )?;
    b.func("Prime", &[("rand", reader), ("bits", Ty::INT)], &[big_int_ptr, err])?;
    b.func("Text", &[], &[Ty::STRING])?;
    b.finish()
}

pub fn subtle() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/subtle", "subtle");
    let bytes = b.bytes();

    b.func("ConstantTimeCompare", &[("x", bytes), ("y", bytes)], &[Ty::INT])?;
    b.func(
        "ConstantTimeSelect",
        &[("v", Ty::INT), ("x", Ty::INT), ("y", Ty::INT)],
        &[Ty::INT],
    )?;
    b.func("ConstantTimeEq", &[("x", Ty::INT32), ("y", Ty::INT32)], &[Ty::INT])?;
    b.func("XORBytes", &[("dst", bytes), ("x", bytes), ("y", bytes)], &[Ty::INT])?;
    b.func("ConstantTimeByteEq", &[("x", Ty::UINT8), ("y", Ty::UINT8)], &[Ty::INT])?;
    b.func("ConstantTimeCopy", &[("v", Ty::INT), ("x", bytes), ("y", bytes)], &[])?;
    b.func("ConstantTimeLessOrEq", &[("x", Ty::INT), ("y", Ty::INT)], &[Ty::INT])?;
    b.finish()
}
