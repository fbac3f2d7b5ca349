//! Public-key cryptography: `crypto/dsa`, `crypto/ecdh`, `crypto/ecdsa`,
//! `crypto/ed25519`, `crypto/elliptic`, `crypto/rsa`, `crypto/mlkem`,
//! `crypto/hpke`.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::types::RecvKind::{Pointer, Value};
use crate::types::{FieldDecl, Ty};

/// `interface{ HashFunc() crypto.Hash }` with the hash id as a plain int.
fn signer_opts(b: &mut PackageBuilder) -> Result<Ty> {
    let hash_func = b.sig(&[], &[Ty::INT]);
    b.interface(&[("HashFunc", hash_func)])
}

pub fn dsa() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/dsa", "dsa");

    let sizes = b.named("ParameterSizes", Ty::INT)?;
    b.enumerate(sizes, &["L1024N160", "L2048N224", "L2048N256", "L3072N256"], 0)?;

    let shape = b.struct_type(&[("Y", Ty::INT)]);
    b.named("PublicKey", shape)?;
    let shape = b.struct_type(&[("X", Ty::INT)]);
    b.named("PrivateKey", shape)?;
    b.error_vars(&["ErrInvalidPublicKey"])?;
    b.finish()
}

pub fn ecdh() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/ecdh", "ecdh");
    let bytes = b.bytes();
    let err = b.error();
    let any = b.any();

    let empty = b.struct_type(&[]);
    let curve = b.named("Curve", empty)?;
    for name in ["P256", "P384", "P521", "X25519"] {
        b.func(name, &[], &[curve])?;
    }

    let empty = b.struct_type(&[]);
    let private = b.named("PrivateKey", empty)?;
    let private_ptr = b.recv_ptr(private);
    let empty = b.struct_type(&[]);
    let public = b.named("PublicKey", empty)?;
    let public_ptr = b.recv_ptr(public);

    b.method(private, Pointer, "PublicKey", &[], &[public_ptr])?;
    b.method(private, Pointer, "Bytes", &[], &[bytes])?;
    b.method(private, Pointer, "ECDH", &[("remote", public_ptr)], &[bytes, err])?;
    b.method(public, Pointer, "Bytes", &[], &[bytes])?;
    b.method(private, Pointer, "Curve", &[], &[curve])?;
    b.method(private, Pointer, "Equal", &[("x", any)], &[Ty::BOOL])?;
    b.method(private, Pointer, "Public", &[], &[any])?;
    b.method(public, Pointer, "Curve", &[], &[curve])?;
    b.method(public, Pointer, "Equal", &[("x", any)], &[Ty::BOOL])?;

    let reader = b.io_reader()?;
    b.func("GenerateKey", &[("curve", curve), ("rand", reader)], &[private_ptr, err])?;
    b.method(curve, Value, "GenerateKey", &[("rand", reader)], &[private_ptr, err])?;
    b.method(curve, Value, "NewPublicKey", &[("key", bytes)], &[public_ptr, err])?;
    b.method(curve, Value, "NewPrivateKey", &[("key", bytes)], &[private_ptr, err])?;
    b.finish()
}

pub fn ecdsa() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/ecdsa", "ecdsa");
    let bytes = b.bytes();
    let err = b.error();
    let any = b.any();
    let reader = b.io_reader()?;
    let big_int = b.opaque();

    let curve_params = b.opaque();
    let params = b.sig(&[], &[curve_params]);
    let is_on_curve = b.sig(&[("x", big_int), ("y", big_int)], &[Ty::BOOL]);
    let curve = b.interface(&[("Params", params), ("IsOnCurve", is_on_curve)])?;

    let shape = b.struct_type(&[("Curve", curve), ("X", big_int), ("Y", big_int)]);
    let public = b.named("PublicKey", shape)?;
    let shape = b.struct_of(&[
        FieldDecl::embedded("PublicKey", public),
        FieldDecl::new("D", big_int),
    ]);
    let private = b.named("PrivateKey", shape)?;
    let private_ptr = b.recv_ptr(private);
    let public_ptr = b.recv_ptr(public);

    b.func("GenerateKey", &[("c", curve), ("rand", reader)], &[private_ptr, err])?;

    let ecdh_key = b.opaque();
    let opts = signer_opts(&mut b)?;
    b.method(public, Pointer, "Equal", &[("x", any)], &[Ty::BOOL])?;
    b.method(public, Pointer, "ECDH", &[], &[ecdh_key, err])?;
    b.method(private, Pointer, "Public", &[], &[any])?;
    b.method(
        private,
        Pointer,
        "Sign",
        &[("rand", reader), ("digest", bytes), ("opts", opts)],
        &[bytes, err],
    )?;
    b.method(private, Pointer, "Equal", &[("x", any)], &[Ty::BOOL])?;
    b.method(private, Pointer, "ECDH", &[], &[ecdh_key, err])?;

    b.func(
        "SignASN1",
        &[("rand", reader), ("priv", private_ptr), ("hash", bytes)],
        &[bytes, err],
    )?;
    b.func(
        "VerifyASN1",
        &[("pub", public_ptr), ("hash", bytes), ("sig", bytes)],
        &[Ty::BOOL],
    )?;
    b.func(
        "Sign",
        &[("rand", reader), ("priv", private_ptr), ("hash", bytes)],
        &[big_int, big_int, err],
    )?;
    b.func(
        "Verify",
        &[("pub", public_ptr), ("hash", bytes), ("r", big_int), ("s", big_int)],
        &[Ty::BOOL],
    )?;
    b.func("ParseRawPrivateKey", &[("key", bytes), ("curve", curve)], &[private_ptr, err])?;
    b.func(
        "ParseUncompressedPublicKey",
        &[("curve", curve), ("key", bytes)],
        &[public_ptr, err],
    )?;
    b.method(private, Pointer, "Bytes", &[], &[bytes])?;
    b.method(public, Pointer, "Bytes", &[], &[bytes])?;
    b.finish()
}

pub fn ed25519() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/ed25519", "ed25519");
    let bytes = b.bytes();
    let err = b.error();
    let any = b.any();
    let reader = b.io_reader()?;

    let public = b.named("PublicKey", bytes)?;
    b.method(public, Value, "Equal", &[("x", any)], &[Ty::BOOL])?;
    let private = b.named("PrivateKey", bytes)?;

    b.func("GenerateKey", &[("rand", reader)], &[public, private, err])?;
    b.func("Sign", &[("privateKey", private), ("message", bytes)], &[bytes])?;
    b.func(
        "Verify",
        &[("publicKey", public), ("message", bytes), ("sig", bytes)],
        &[Ty::BOOL],
    )?;

    let opts = signer_opts(&mut b)?;
    b.method(private, Value, "Public", &[], &[any])?;
    b.method(private, Value, "Seed", &[], &[bytes])?;
    b.method(
        private,
        Value,
        "Sign",
        &[("rand", reader), ("message", bytes), ("opts", opts)],
        &[bytes, err],
    )?;
    b.method(private, Value, "Equal", &[("x", any)], &[Ty::BOOL])?;
    b.func("NewKeyFromSeed", &[("seed", bytes)], &[private])?;

    let shape = b.struct_type(&[("Hash", Ty::INT), ("Context", Ty::STRING)]);
    let options = b.named("Options", shape)?;
    b.method(options, Pointer, "HashFunc", &[], &[Ty::INT])?;
    let options_ptr = b.recv_ptr(options);
    b.func(
        "VerifyWithOptions",
        &[
            ("publicKey", public),
            ("message", bytes),
            ("sig", bytes),
            ("opts", options_ptr),
        ],
        &[err],
    )?;

    b.const_int("PublicKeySize", Ty::INT, 32)?;
    b.const_int("PrivateKeySize", Ty::INT, 64)?;
    b.const_int("SignatureSize", Ty::INT, 64)?;
    b.const_int("SeedSize", Ty::INT, 32)?;
    b.finish()
}

pub fn elliptic() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/elliptic", "elliptic");
    let bytes = b.bytes();
    let err = b.error();
    let any = b.any();
    let reader = b.io_reader()?;
    let big = b.opaque();

    let params = b.sig(&[], &[any]);
    let is_on_curve = b.sig(&[("x", big), ("y", big)], &[Ty::BOOL]);
    let add = b.sig(&[("x1", big), ("y1", big), ("x2", big), ("y2", big)], &[big, big]);
    let double = b.sig(&[("x1", big), ("y1", big)], &[big, big]);
    let scalar_mult = b.sig(&[("Bx", big), ("By", big), ("k", bytes)], &[big, big]);
    let scalar_base_mult = b.sig(&[("k", bytes)], &[big, big]);
    let curve_iface = b.interface(&[
        ("Params", params),
        ("IsOnCurve", is_on_curve),
        ("Add", add),
        ("Double", double),
        ("ScalarMult", scalar_mult),
        ("ScalarBaseMult", scalar_base_mult),
    ])?;
    let curve = b.named("Curve", curve_iface)?;

    let shape = b.struct_type(&[
        ("P", big),
        ("N", big),
        ("B", big),
        ("Gx", big),
        ("Gy", big),
        ("BitSize", Ty::INT),
        ("Name", Ty::STRING),
    ]);
    b.named("CurveParams", shape)?;

    for name in ["P256", "P384", "P521", "P224"] {
        b.func(name, &[], &[curve])?;
    }
    b.func(
        "GenerateKey",
        &[("curve", curve), ("rand", reader)],
        &[bytes, big, big, err],
    )?;
    b.func("Marshal", &[("curve", curve), ("x", big), ("y", big)], &[bytes])?;
    b.func("MarshalCompressed", &[("curve", curve), ("x", big), ("y", big)], &[bytes])?;
    b.func("Unmarshal", &[("curve", curve), ("data", bytes)], &[big, big])?;
    b.func("UnmarshalCompressed", &[("curve", curve), ("data", bytes)], &[big, big])?;
    b.finish()
}

pub fn rsa() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/rsa", "rsa");
    let bytes = b.bytes();
    let err = b.error();
    let any = b.any();
    let reader = b.io_reader()?;
    let hash = b.hash_iface()?;

    let shape = b.struct_type(&[("N", Ty::INT), ("E", Ty::INT)]);
    let public = b.named("PublicKey", shape)?;
    let public_ptr = b.recv_ptr(public);
    b.method(public, Pointer, "Size", &[], &[Ty::INT])?;
    b.method(public, Pointer, "Equal", &[("x", any)], &[Ty::BOOL])?;

    let shape = b.struct_type(&[("Exp", Ty::INT), ("Coeff", Ty::INT), ("R", Ty::INT)]);
    let crt_value = b.named("CRTValue", shape)?;
    let crt_values = b.slice(crt_value);
    let shape = b.struct_type(&[
        ("Dp", Ty::INT),
        ("Dq", Ty::INT),
        ("Qinv", Ty::INT),
        ("CRTValues", crt_values),
    ]);
    let precomputed = b.named("PrecomputedValues", shape)?;

    let shape = b.struct_type(&[("SessionKeyLen", Ty::INT)]);
    b.named("PKCS1v15DecryptOptions", shape)?;

    let int_ptr = b.ptr(Ty::INT);
    let primes = b.slice(int_ptr);
    let shape = b.struct_type(&[
        ("PublicKey", public),
        ("D", Ty::INT),
        ("Primes", primes),
        ("Precomputed", precomputed),
    ]);
    let private = b.named("PrivateKey", shape)?;
    let private_ptr = b.recv_ptr(private);

    let opts = signer_opts(&mut b)?;
    b.method(private, Pointer, "Public", &[], &[any])?;
    b.method(
        private,
        Pointer,
        "Sign",
        &[("rand", reader), ("digest", bytes), ("opts", opts)],
        &[bytes, err],
    )?;
    b.method(private, Pointer, "Validate", &[], &[err])?;
    b.method(
        private,
        Pointer,
        "Decrypt",
        &[("rand", reader), ("ciphertext", bytes), ("opts", any)],
        &[bytes, err],
    )?;
    b.method(private, Pointer, "Precompute", &[], &[])?;
    b.method(private, Pointer, "Equal", &[("x", any)], &[Ty::BOOL])?;

    let shape = b.struct_type(&[("SaltLength", Ty::INT), ("Hash", Ty::INT)]);
    let pss = b.named("PSSOptions", shape)?;
    let shape = b.struct_type(&[("Hash", Ty::INT), ("Label", bytes)]);
    b.named("OAEPOptions", shape)?;
    b.method(pss, Pointer, "HashFunc", &[], &[Ty::INT])?;
    let pss_ptr = b.recv_ptr(pss);

    b.const_int("PSSSaltLengthAuto", Ty::INT, 0)?;
    b.const_int("PSSSaltLengthEqualsHash", Ty::INT, -1)?;
    b.error_vars(&["ErrDecryption", "ErrVerification", "ErrMessageTooLong"])?;

    b.func("GenerateKey", &[("random", reader), ("bits", Ty::INT)], &[private_ptr, err])?;
    b.func(
        "SignPKCS1v15",
        &[("rand", reader), ("priv", private_ptr), ("hash", Ty::INT), ("hashed", bytes)],
        &[bytes, err],
    )?;
    b.func(
        "VerifyPKCS1v15",
        &[("pub", public_ptr), ("hash", Ty::INT), ("hashed", bytes), ("sig", bytes)],
        &[err],
    )?;
    b.func(
        "SignPSS",
        &[
            ("rand", reader),
            ("priv", private_ptr),
            ("hash", Ty::INT),
            ("digest", bytes),
            ("opts", pss_ptr),
        ],
        &[bytes, err],
    )?;
    b.func(
        "VerifyPSS",
        &[
            ("pub", public_ptr),
            ("hash", Ty::INT),
            ("digest", bytes),
            ("sig", bytes),
            ("opts", pss_ptr),
        ],
        &[err],
    )?;
    b.func(
        "EncryptOAEP",
        &[
            ("hash", hash),
            ("random", reader),
            ("pub", public_ptr),
            ("msg", bytes),
            ("label", bytes),
        ],
        &[bytes, err],
    )?;
    b.func(
        "DecryptOAEP",
        &[
            ("hash", hash),
            ("random", reader),
            ("priv", private_ptr),
            ("ciphertext", bytes),
            ("label", bytes),
        ],
        &[bytes, err],
    )?;
    b.func(
        "EncryptPKCS1v15",
        &[("rand", reader), ("pub", public_ptr), ("msg", bytes)],
        &[bytes, err],
    )?;
    b.func(
        "DecryptPKCS1v15",
        &[("rand", reader), ("priv", private_ptr), ("ciphertext", bytes)],
        &[bytes, err],
    )?;
    b.func(
        "DecryptPKCS1v15SessionKey",
        &[("rand", reader), ("priv", private_ptr), ("ciphertext", bytes), ("key", bytes)],
        &[err],
    )?;
    b.func(
        "GenerateMultiPrimeKey",
        &[("random", reader), ("nprimes", Ty::INT), ("bits", Ty::INT)],
        &[private_ptr, err],
    )?;
    b.finish()
}

pub fn mlkem() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/mlkem", "mlkem");
    let bytes = b.bytes();
    let err = b.error();

    b.const_int("SharedKeySize", Ty::INT, 32)?;
    b.const_int("CiphertextSize768", Ty::INT, 1088)?;
    b.const_int("EncapsulationKeySize768", Ty::INT, 1184)?;
    b.const_int("CiphertextSize1024", Ty::INT, 1568)?;
    b.const_int("EncapsulationKeySize1024", Ty::INT, 1568)?;
    b.const_int("SeedSize", Ty::INT, 64)?;

    for level in ["768", "1024"] {
        let empty = b.struct_type(&[]);
        let dk = b.named(&format!("DecapsulationKey{level}"), empty)?;
        let dk_ptr = b.recv_ptr(dk);
        let empty = b.struct_type(&[]);
        let ek = b.named(&format!("EncapsulationKey{level}"), empty)?;
        let ek_ptr = b.recv_ptr(ek);

        b.func(&format!("GenerateKey{level}"), &[], &[dk_ptr, err])?;
        b.func(&format!("NewDecapsulationKey{level}"), &[("seed", bytes)], &[dk_ptr, err])?;
        b.func(&format!("NewEncapsulationKey{level}"), &[("key", bytes)], &[ek_ptr, err])?;

        b.method(dk, Pointer, "Bytes", &[], &[bytes])?;
        b.method(dk, Pointer, "EncapsulationKey", &[], &[ek_ptr])?;
        b.method(dk, Pointer, "Decapsulate", &[("ciphertext", bytes)], &[bytes, err])?;
        b.method(ek, Pointer, "Bytes", &[], &[bytes])?;
        b.method(ek, Pointer, "Encapsulate", &[], &[bytes, bytes])?;
    }
    b.finish()
}

pub fn hpke() -> Result<Package> {
    let mut b = PackageBuilder::new("crypto/hpke", "hpke");
    let bytes = b.bytes();
    let err = b.error();

    b.const_uint("DHKEM_X25519_HKDF_SHA256", Ty::UINT16, 0x0020)?;
    b.const_uint("KDF_HKDF_SHA256", Ty::UINT16, 0x0001)?;
    b.const_uint("AEAD_AES_128_GCM", Ty::UINT16, 0x0001)?;
    b.const_uint("AEAD_AES_256_GCM", Ty::UINT16, 0x0002)?;
    b.const_uint("AEAD_ChaCha20Poly1305", Ty::UINT16, 0x0003)?;

    let empty = b.struct_type(&[]);
    let sender = b.named("Sender", empty)?;
    let sender_ptr = b.recv_ptr(sender);
    let empty = b.struct_type(&[]);
    let recipient = b.named("Recipient", empty)?;
    let recipient_ptr = b.recv_ptr(recipient);

    b.method(sender, Pointer, "Seal", &[("aad", bytes), ("plaintext", bytes)], &[bytes, err])?;
    b.method(
        recipient,
        Pointer,
        "Open",
        &[("aad", bytes), ("ciphertext", bytes)],
        &[bytes, err],
    )?;

    let private_key = b.opaque();
    b.func(
        "SetupSender",
        &[
            ("kem", Ty::UINT16),
            ("kdf", Ty::UINT16),
            ("aead", Ty::UINT16),
            ("recipientKey", bytes),
            ("info", bytes),
        ],
        &[bytes, sender_ptr, err],
    )?;
    b.func(
        "SetupRecipient",
        &[
            ("kem", Ty::UINT16),
            ("kdf", Ty::UINT16),
            ("aead", Ty::UINT16),
            ("privateKey", private_key),
            ("info", bytes),
            ("encapsulatedKey", bytes),
        ],
        &[recipient_ptr, err],
    )?;
    b.func(
        "ParseKey",
        &[("kem", Ty::UINT16), ("privateKeyBytes", bytes)],
        &[private_key, err],
    )?;
    b.finish()
}
