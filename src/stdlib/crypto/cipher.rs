//! Symmetric ciphers: `crypto/cipher`, `crypto/aes`, `crypto/des`, `crypto/rc4`.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::types::RecvKind::{Pointer, Value};
use crate::types::{FieldDecl, Ty};

/// `type KeySizeError int` with its `Error` method.
fn key_size_error(b: &mut PackageBuilder) -> Result<Ty> {
    let t = b.named("KeySizeError", Ty::INT)?;
    b.error_method(t, Value)?;
    Ok(t)
}

pub fn aes() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/aes", "aes");
    let bytes = b.bytes();
    let err = b.error();
    let block = b.cipher_block()?;

    key_size_error(&mut b)?;
    b.const_int("BlockSize", Ty::INT, 16)?;
    b.func("NewCipher", &[("key", bytes)], &[block, err])?;
    b.finish()
}

pub fn des() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/des", "des");
    let bytes = b.bytes();
    let err = b.error();
    let block = b.cipher_block()?;

    key_size_error(&mut b)?;
    b.const_int("BlockSize", Ty::INT, 8)?;
    b.func("NewCipher", &[("key", bytes)], &[block, err])?;
    b.func("NewTripleDESCipher", &[("key", bytes)], &[block, err])?;
    b.finish()
}

pub fn rc4() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/rc4", "rc4");
    let bytes = b.bytes();
    let err = b.error();

    let shape = b.struct_type(&[("s", Ty::INT)]);
    let cipher = b.named("Cipher", shape)?;
    let cipher_ptr = b.recv_ptr(cipher);
    b.func("NewCipher", &[("key", bytes)], &[cipher_ptr, err])?;
    b.method(cipher, Pointer, "XORKeyStream", &[("dst", bytes), ("src", bytes)], &[])?;
    b.method(cipher, Pointer, "Reset", &[], &[])?;
    b.finish()
}

pub fn cipher() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/cipher", "cipher");
    let bytes = b.bytes();
    let err = b.error();

    let block_iface = b.cipher_block()?;
    let block = b.named("Block", block_iface)?;

    let xor = b.sig(&[("dst", bytes), ("src", bytes)], &[]);
    let stream_iface = b.interface(&[("XORKeyStream", xor)])?;
    let stream = b.named("Stream", stream_iface)?;

    let nonce_size = b.sig(&[], &[Ty::INT]);
    let overhead = b.sig(&[], &[Ty::INT]);
    let seal = b.sig(
        &[("dst", bytes), ("nonce", bytes), ("plaintext", bytes), ("additionalData", bytes)],
        &[bytes],
    );
    let open = b.sig(
        &[("dst", bytes), ("nonce", bytes), ("ciphertext", bytes), ("additionalData", bytes)],
        &[bytes, err],
    );
    let aead_iface = b.interface(&[
        ("NonceSize", nonce_size),
        ("Overhead", overhead),
        ("Seal", seal),
        ("Open", open),
    ])?;
    let aead = b.named("AEAD", aead_iface)?;

    let block_size = b.sig(&[], &[Ty::INT]);
    let crypt_blocks = b.sig(&[("dst", bytes), ("src", bytes)], &[]);
    let mode_iface = b.interface(&[("BlockSize", block_size), ("CryptBlocks", crypt_blocks)])?;
    let block_mode = b.named("BlockMode", mode_iface)?;

    b.func("NewGCM", &[("cipher", block)], &[aead, err])?;
    b.func("NewCFBEncrypter", &[("block", block), ("iv", bytes)], &[stream])?;
    b.func("NewCFBDecrypter", &[("block", block), ("iv", bytes)], &[stream])?;
    b.func("NewCBCEncrypter", &[("b", block), ("iv", bytes)], &[block_mode])?;
    b.func("NewCBCDecrypter", &[("b", block), ("iv", bytes)], &[block_mode])?;
    b.func("NewCTR", &[("block", block), ("iv", bytes)], &[stream])?;
    b.func("NewOFB", &[("b", block), ("iv", bytes)], &[stream])?;
    b.func("NewGCMWithNonceSize", &[("cipher", block), ("size", Ty::INT)], &[aead, err])?;
    b.func("NewGCMWithTagSize", &[("cipher", block), ("tagSize", Ty::INT)], &[aead, err])?;

    let reader = b.io_reader()?;
    let writer = b.io_writer()?;

    let shape = b.struct_of(&[FieldDecl::new("S", stream), FieldDecl::new("R", reader)]);
    let stream_reader = b.named("StreamReader", shape)?;
    b.method(stream_reader, Value, "Read", &[("dst", bytes)], &[Ty::INT, err])?;

    let shape = b.struct_of(&[
        FieldDecl::new("S", stream),
        FieldDecl::new("W", writer),
        FieldDecl::new("Err", err),
    ]);
    let stream_writer = b.named("StreamWriter", shape)?;
    b.method(stream_writer, Value, "Write", &[("src", bytes)], &[Ty::INT, err])?;
    b.method(stream_writer, Value, "Close", &[], &[err])?;

    b.finish()
}
