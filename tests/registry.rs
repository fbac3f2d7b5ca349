use std::sync::Arc;

use go125_stubs::{Package, PackageBuilder, Registry, RegistryConfig, RegistryError, StubError, Ty};

fn lazy() -> RegistryConfig {
    RegistryConfig::builder().eager(false).build().unwrap()
}

fn widget() -> Result<Package, StubError> {
    let mut b = PackageBuilder::new("example.com/widget", "widget");
    b.const_int("Size", Ty::INT, 3)?;
    b.finish()
}

fn broken() -> Result<Package, StubError> {
    let mut b = PackageBuilder::new("example.com/broken", "broken");
    b.const_int("Size", Ty::INT, 3)?;
    b.const_int("Size", Ty::INT, 4)?;
    b.finish()
}

fn unsealed() -> Result<Package, StubError> {
    Ok(Package::new("example.com/unsealed", "unsealed"))
}

const STDLIB: [&str; 62] = [
    "compress/bzip2",
    "compress/lzw",
    "compress/zlib",
    "container/heap",
    "container/list",
    "container/ring",
    "crypto",
    "crypto/aes",
    "crypto/cipher",
    "crypto/des",
    "crypto/dsa",
    "crypto/ecdh",
    "crypto/ecdsa",
    "crypto/ed25519",
    "crypto/elliptic",
    "crypto/fips140",
    "crypto/hkdf",
    "crypto/hmac",
    "crypto/hpke",
    "crypto/md5",
    "crypto/mlkem",
    "crypto/pbkdf2",
    "crypto/rand",
    "crypto/rc4",
    "crypto/rsa",
    "crypto/sha1",
    "crypto/sha256",
    "crypto/sha3",
    "crypto/sha512",
    "crypto/subtle",
    "crypto/tls",
    "crypto/x509",
    "crypto/x509/pkix",
    "encoding",
    "encoding/ascii85",
    "encoding/asn1",
    "encoding/base32",
    "encoding/base64",
    "encoding/binary",
    "encoding/csv",
    "encoding/gob",
    "encoding/hex",
    "encoding/json",
    "encoding/json/jsontext",
    "encoding/json/v2",
    "encoding/pem",
    "encoding/xml",
    "hash/adler32",
    "hash/crc64",
    "hash/fnv",
    "hash/maphash",
    "iter",
    "math",
    "math/big",
    "math/bits",
    "math/cmplx",
    "math/rand",
    "math/rand/v2",
    "structs",
    "unique",
    "unsafe",
    "weak",
];

#[test]
fn registers_the_whole_stdlib_set() {
    let registry = Registry::with_stdlib(lazy());
    assert_eq!(registry.paths(), STDLIB);
    assert_eq!(registry.built_count(), 0);
}

#[test]
fn every_stdlib_package_builds_sealed() {
    let registry = Registry::with_stdlib(lazy());
    for path in registry.paths() {
        let pkg = registry.package_for(path).unwrap();
        assert!(pkg.is_sealed(), "{path} not sealed");
        assert_eq!(pkg.path(), path);
        assert!(!pkg.scope().is_empty(), "{path} is empty");
        for (_, named) in pkg.named_types() {
            assert!(
                named.underlying.is_some(),
                "{path}.{} has no underlying type",
                pkg.object_name(named.obj)
            );
        }
    }
    assert_eq!(registry.built_count(), STDLIB.len());
}

#[test]
fn package_names_are_the_last_path_element() {
    let registry = Registry::with_stdlib(lazy());
    for path in registry.paths() {
        let pkg = registry.package_for(path).unwrap();
        let expected = match path {
            "encoding/json/v2" | "math/rand/v2" => path.split('/').rev().nth(1).unwrap(),
            _ => path.rsplit('/').next().unwrap(),
        };
        assert_eq!(pkg.name(), expected, "{path}");
    }
}

#[test]
fn repeated_lookups_share_one_package() {
    let registry = Registry::with_stdlib(lazy());
    let first = registry.package_for("crypto/sha256").unwrap();
    let second = registry.package_for("crypto/sha256").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.built_count(), 1);
}

#[test]
fn separate_registries_build_separate_packages() {
    let a = Registry::with_stdlib(lazy());
    let b = Registry::with_stdlib(lazy());
    let pa = a.package_for("math/big").unwrap();
    let pb = b.package_for("math/big").unwrap();
    assert_ne!(pa.id(), pb.id());

    let int_a = pa.lookup_type("Int").unwrap();
    let int_b = pb.lookup_type("Int").unwrap();
    assert!(!go125_stubs::identical(&pa, int_a, &pb, int_b));
}

#[test]
fn unknown_imports_are_not_found() {
    let registry = Registry::with_stdlib(lazy());
    for path in ["net/http", "crypto/", "", "Crypto"] {
        assert_eq!(
            registry.package_for(path).unwrap_err(),
            RegistryError::NotFound(path.to_string())
        );
    }
}

#[test]
fn eager_registries_prebuild_everything() {
    let config = RegistryConfig::builder()
        .eager(true)
        .build_threads(4)
        .build()
        .unwrap();
    let registry = Registry::with_stdlib(config);
    assert_eq!(registry.built_count(), registry.len());
    assert!(registry.package_for("unsafe").unwrap().is_sealed());
}

#[test]
fn prebuild_is_idempotent() {
    let registry = Registry::with_stdlib(lazy());
    let before = registry.package_for("encoding/json").unwrap();
    assert_eq!(registry.prebuild(), STDLIB.len());
    assert_eq!(registry.prebuild(), STDLIB.len());
    let after = registry.package_for("encoding/json").unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn concurrent_lookups_agree() {
    let registry = Registry::with_stdlib(lazy());
    let ids: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| registry.package_for("crypto/tls").unwrap().id()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn custom_builders_can_be_registered() {
    let mut registry = Registry::new(lazy());
    assert!(registry.is_empty());
    assert!(!registry.register("example.com/widget", widget));
    assert!(registry.contains("example.com/widget"));
    let pkg = registry.package_for("example.com/widget").unwrap();
    assert!(pkg.lookup("Size").is_some());

    assert!(registry.register("example.com/widget", widget));
    assert_eq!(registry.len(), 1);
}

#[test]
#[should_panic(expected = "example.com/broken")]
fn failing_builders_panic() {
    let mut registry = Registry::new(lazy());
    registry.register("example.com/broken", broken);
    let _ = registry.package_for("example.com/broken");
}

#[test]
#[should_panic(expected = "not sealed")]
fn unsealed_packages_are_refused() {
    let mut registry = Registry::new(lazy());
    registry.register("example.com/unsealed", unsealed);
    let _ = registry.package_for("example.com/unsealed");
}

#[test]
#[should_panic(expected = "wrong path")]
fn builders_must_match_their_path() {
    let mut registry = Registry::new(lazy());
    registry.register("example.com/gadget", widget);
    let _ = registry.package_for("example.com/gadget");
}
