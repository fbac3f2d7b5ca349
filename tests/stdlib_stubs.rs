use std::sync::Arc;

use go125_stubs::predicates::method_set;
use go125_stubs::universe::{any_type, error_type};
use go125_stubs::{
    identical, implements, lookup_method, method_at, num_methods, universe, Builtin, ConstValue,
    ObjectKind, Package, PackageBuilder, RecvKind, Registry, RegistryConfig, Resolved, Ty, Type,
};

fn load(path: &str) -> Arc<Package> {
    let registry = Registry::with_stdlib(RegistryConfig::default());
    registry.package_for(path).unwrap()
}

fn constant(pkg: &Package, name: &str) -> ConstValue {
    let id = pkg.lookup(name).unwrap_or_else(|| panic!("{name} missing"));
    pkg.object(id).const_value().cloned().unwrap()
}

fn results(pkg: &Package, func: &str) -> Vec<Ty> {
    let id = pkg.lookup(func).unwrap_or_else(|| panic!("{func} missing"));
    let sig = pkg.signature_of_func(id).unwrap();
    pkg.params(sig.results).iter().map(|p| p.ty).collect()
}

fn params(pkg: &Package, func: &str) -> Vec<Ty> {
    let id = pkg.lookup(func).unwrap_or_else(|| panic!("{func} missing"));
    let sig = pkg.signature_of_func(id).unwrap();
    pkg.params(sig.params).iter().map(|p| p.ty).collect()
}

fn node(pkg: &Package, ty: Ty) -> &Type {
    match pkg.resolve(ty) {
        Resolved::Node { node, .. } => node,
        Resolved::Basic(b) => panic!("expected a node, got {}", b.name),
    }
}

fn method_names(pkg: &Package, ty: Ty) -> Vec<&str> {
    (0..num_methods(pkg, ty).unwrap())
        .map(|i| method_at(pkg, ty, i).unwrap().unwrap().name())
        .collect()
}

#[test]
fn sha256_digests_are_fixed_arrays() {
    let pkg = load("crypto/sha256");
    assert_eq!(constant(&pkg, "Size"), ConstValue::Int(32));
    assert_eq!(constant(&pkg, "BlockSize"), ConstValue::Int(64));

    let mut scratch = Package::new("scratch", "scratch");
    let digest = scratch.array_of(Ty::BYTE, 32);
    let short = scratch.array_of(Ty::BYTE, 28);
    assert!(identical(&pkg, results(&pkg, "Sum256")[0], &scratch, digest));
    assert!(identical(&pkg, results(&pkg, "Sum224")[0], &scratch, short));

    let hash = results(&pkg, "New")[0];
    assert_eq!(
        method_names(&pkg, hash),
        ["Write", "Sum", "Reset", "Size", "BlockSize"]
    );
}

#[test]
fn local_digests_satisfy_the_hash_stand_in() {
    let sha = load("crypto/sha256");
    let hash = results(&sha, "New")[0];

    let mut b = PackageBuilder::new("example.com/digest", "digest");
    let empty = b.struct_type(&[]);
    let d = b.named("Digest", empty).unwrap();
    b.hash_methods(d).unwrap();
    let d_ptr = b.ptr(d);
    let pkg = b.finish().unwrap();

    assert!(implements(&pkg, d_ptr, &sha, hash).unwrap());
    assert!(!implements(&pkg, d, &sha, hash).unwrap());
}

#[test]
fn crypto_hash_is_an_enumerated_uint() {
    let pkg = load("crypto");
    let hash = pkg.lookup_type("Hash").unwrap();
    assert_eq!(pkg.named(hash).unwrap().underlying, Some(Ty::UINT));
    assert_eq!(constant(&pkg, "SHA256"), ConstValue::Uint(5));
    assert_eq!(constant(&pkg, "BLAKE2b_384"), ConstValue::Uint(18));
    assert_eq!(pkg.object(pkg.lookup("SHA256").unwrap()).ty, hash);

    let available = lookup_method(&pkg, hash, "Available").unwrap().unwrap();
    assert_eq!(available.name(), "Available");
    assert!(lookup_method(&pkg, hash, "New").unwrap().is_some());

    let u = universe().package();
    let private_key = pkg.lookup_type("PrivateKey").unwrap();
    assert!(identical(&pkg, private_key, u, any_type()));
}

#[test]
fn key_size_errors_are_errors() {
    let u = universe().package();
    for path in ["crypto/aes", "crypto/des"] {
        let pkg = load(path);
        let kse = pkg.lookup_type("KeySizeError").unwrap();
        assert!(implements(&pkg, kse, u, error_type()).unwrap(), "{path}");
    }
}

#[test]
fn aes_returns_a_cipher_block() {
    let aes = load("crypto/aes");
    let cipher = load("crypto/cipher");
    let returned = results(&aes, "NewCipher")[0];
    let block = cipher.lookup_type("Block").unwrap();
    assert_eq!(method_names(&aes, returned), ["BlockSize", "Encrypt", "Decrypt"]);
    // Same method set, different identities: one is a named type.
    assert!(!identical(&aes, returned, &cipher, block));
    let shape = cipher.named(block).unwrap().underlying.unwrap();
    assert!(identical(&aes, returned, &cipher, shape));
}

#[test]
fn tls_constants_carry_wire_values() {
    let pkg = load("crypto/tls");
    assert_eq!(constant(&pkg, "VersionTLS13"), ConstValue::Uint(0x0304));
    assert_eq!(constant(&pkg, "TLS_AES_128_GCM_SHA256"), ConstValue::Uint(0x1301));
    assert_eq!(constant(&pkg, "Ed25519"), ConstValue::Uint(0x0807));

    let scheme = pkg.lookup_type("SignatureScheme").unwrap();
    assert_eq!(pkg.object(pkg.lookup("Ed25519").unwrap()).ty, scheme);
    assert!(lookup_method(&pkg, scheme, "String").unwrap().is_some());
}

#[test]
fn math_constants() {
    let pkg = load("math");
    assert_eq!(constant(&pkg, "Pi"), ConstValue::Float(std::f64::consts::PI));
    assert_eq!(constant(&pkg, "MaxInt64"), ConstValue::Int(i64::MAX));
    let max = pkg.lookup("MaxInt8").unwrap();
    assert_eq!(pkg.object(max).ty, Ty::UNTYPED_INT);
}

#[test]
fn big_int_methods_live_on_the_pointer() {
    let pkg = load("math/big");
    let int = pkg.lookup_type("Int").unwrap();
    let named = pkg.named(int).unwrap();
    assert_eq!(named.value_methods().count(), 0);
    assert!(named.pointer_methods().count() > 10);

    let add = lookup_method(&pkg, int, "Add").unwrap().unwrap();
    let sig = add.signature().unwrap();
    let recv = sig.recv.unwrap().ty;
    assert!(matches!(node(&pkg, recv), Type::Pointer { elem } if *elem == int));
    assert_eq!(pkg.params(sig.params).len(), 2);

    // Value `Int` has an empty method set; `*Int` has all of them.
    assert!(method_set(&pkg, int).unwrap().is_empty());
    let new_int = results(&pkg, "NewInt")[0];
    assert_eq!(method_set(&pkg, new_int).unwrap().len(), named.methods.len());
}

#[test]
fn json_errors_use_pointer_receivers() {
    let pkg = load("encoding/json");
    for name in ["SyntaxError", "UnmarshalTypeError", "InvalidUnmarshalError", "MarshalerError"] {
        let ty = pkg.lookup_type(name).unwrap();
        let named = pkg.named(ty).unwrap();
        assert_eq!(named.value_methods().count(), 0, "{name}");
        assert_eq!(pkg.object_name(named.methods[0].func), "Error", "{name}");
    }

    let marshaler = pkg.lookup_type("Marshaler").unwrap();
    assert_eq!(method_names(&pkg, marshaler), ["MarshalJSON"]);
    assert!(pkg.lookup("Buffer").is_none());
}

#[test]
fn json_v2_is_named_json() {
    let pkg = load("encoding/json/v2");
    assert_eq!(pkg.name(), "json");
    assert_eq!(pkg.path(), "encoding/json/v2");
}

#[test]
fn crc64_tables() {
    let pkg = load("hash/crc64");
    assert_eq!(constant(&pkg, "ISO"), ConstValue::Uint(0xD800_0000_0000_0000));
    assert_eq!(constant(&pkg, "ECMA"), ConstValue::Uint(0x42F0_E1EB_A9EA_3693));
    let table = pkg.lookup_type("Table").unwrap();
    let shape = pkg.named(table).unwrap().underlying.unwrap();
    assert!(matches!(node(&pkg, shape), Type::Array { len: 256, elem } if *elem == Ty::UINT64));

    let made = results(&pkg, "MakeTable")[0];
    assert!(matches!(node(&pkg, made), Type::Pointer { elem } if *elem == table));
}

#[test]
fn fnv_constructors_return_hashes() {
    let pkg = load("hash/fnv");
    for name in ["New32", "New32a", "New64", "New64a", "New128", "New128a"] {
        let hash = results(&pkg, name)[0];
        assert_eq!(num_methods(&pkg, hash).unwrap(), 5, "{name}");
    }
}

#[test]
fn maphash_hash_methods_in_order() {
    let pkg = load("hash/maphash");
    let hash = pkg.lookup_type("Hash").unwrap();
    assert_eq!(
        method_names(&pkg, hash),
        [
            "Write",
            "WriteByte",
            "WriteString",
            "Sum64",
            "Seed",
            "SetSeed",
            "Reset",
            "Size",
            "BlockSize",
            "Sum"
        ]
    );
}

#[test]
fn list_is_a_pointer_api() {
    let pkg = load("container/list");
    let list = pkg.lookup_type("List").unwrap();
    let element = pkg.lookup_type("Element").unwrap();
    let new = results(&pkg, "New")[0];
    assert!(matches!(node(&pkg, new), Type::Pointer { elem } if *elem == list));

    let push = lookup_method(&pkg, list, "PushBack").unwrap().unwrap();
    let result = pkg.params(push.signature().unwrap().results)[0].ty;
    assert!(matches!(node(&pkg, result), Type::Pointer { elem } if *elem == element));
    assert_eq!(method_names(&pkg, element), ["Next", "Prev"]);
}

#[test]
fn heap_functions_take_any() {
    let pkg = load("container/heap");
    let u = universe().package();
    for name in ["Init", "Push", "Pop", "Fix", "Remove"] {
        assert!(identical(&pkg, params(&pkg, name)[0], u, any_type()), "{name}");
    }
}

#[test]
fn zlib_writer_satisfies_its_writer_parameter() {
    let pkg = load("compress/zlib");
    assert_eq!(constant(&pkg, "HuffmanOnly"), ConstValue::Int(-2));
    assert_eq!(constant(&pkg, "BestCompression"), ConstValue::Int(9));

    let writer = pkg.lookup_type("Writer").unwrap();
    assert_eq!(method_names(&pkg, writer), ["Write", "Close", "Flush", "Reset"]);

    let w_param = params(&pkg, "NewWriter")[0];
    let w_ptr = results(&pkg, "NewWriter")[0];
    assert!(implements(&pkg, w_ptr, &pkg, w_param).unwrap());
    assert!(!implements(&pkg, writer, &pkg, w_param).unwrap());

    let u = universe().package();
    let checksum = pkg.lookup("ErrChecksum").unwrap();
    assert!(identical(&pkg, pkg.object(checksum).ty, u, error_type()));
}

#[test]
fn lzw_orders() {
    let pkg = load("compress/lzw");
    let order = pkg.lookup_type("Order").unwrap();
    assert_eq!(constant(&pkg, "LSB"), ConstValue::Int(0));
    assert_eq!(constant(&pkg, "MSB"), ConstValue::Int(1));
    assert_eq!(pkg.object(pkg.lookup("MSB").unwrap()).ty, order);
}

#[test]
fn unsafe_exposes_builtins_and_pointer() {
    let pkg = load("unsafe");
    assert_eq!(pkg.lookup_type("Pointer"), Some(Ty::UNSAFE_POINTER));
    for builtin in Builtin::UNSAFE {
        let id = pkg.lookup(builtin.name()).unwrap();
        let obj = pkg.object(id);
        assert_eq!(obj.kind, ObjectKind::Builtin(builtin));
        assert_eq!(obj.pkg, None);
    }
    assert!(pkg.lookup("SliceHeader").is_some());
}

#[test]
fn iter_sequences_are_push_functions() {
    let pkg = load("iter");
    let seq = pkg.lookup_type("Seq").unwrap();
    let shape = pkg.named(seq).unwrap().underlying.unwrap();
    let Type::Signature(sig) = node(&pkg, shape) else {
        panic!("Seq is not a func type");
    };
    let yield_ty = pkg.params(sig.params)[0].ty;
    assert!(matches!(node(&pkg, yield_ty), Type::Signature(_)));
    assert!(pkg.params(sig.results).is_empty());

    assert_eq!(results(&pkg, "Pull").len(), 2);
    assert_eq!(params(&pkg, "Pull2")[0], pkg.lookup_type("Seq2").unwrap());
}

#[test]
fn weak_and_unique_handles() {
    let weak = load("weak");
    let pointer = weak.lookup_type("Pointer").unwrap();
    let value = lookup_method(&weak, pointer, "Value").unwrap().unwrap();
    let sig = value.signature().unwrap();
    assert_eq!(sig.recv.map(|r| r.ty), Some(pointer));

    let unique = load("unique");
    let handle = unique.lookup_type("Handle").unwrap();
    assert_eq!(unique.named(handle).unwrap().methods[0].recv, RecvKind::Value);
}
