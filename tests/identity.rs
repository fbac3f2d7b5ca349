use go125_stubs::universe::{any_type, error_type};
use go125_stubs::{identical, implements, lookup_method, FieldDecl, Package, PackageBuilder, RecvKind, StubError, Ty};

/// `type Point struct { X, Y float64 }` in a fresh package.
fn point_package(path: &str) -> (Package, Ty) {
    let mut b = PackageBuilder::new(path, path);
    let shape = b.struct_type(&[("X", Ty::FLOAT64), ("Y", Ty::FLOAT64)]);
    let point = b.named("Point", shape).unwrap();
    (b.finish().unwrap(), point)
}

/// `type Hash interface { Write(p []byte) (int, error); Sum(b []byte) []byte; Reset() }`
/// and `type S struct{}` with all three methods on `*S`.
fn hash_package() -> (Package, Ty, Ty) {
    let mut b = PackageBuilder::new("example.com/hash", "hash");
    let bytes = b.bytes();
    let err = b.error();
    let write = b.sig(&[("p", bytes)], &[Ty::INT, err]);
    let sum = b.sig(&[("b", bytes)], &[bytes]);
    let reset = b.sig(&[], &[]);
    let iface = b.interface(&[("Write", write), ("Sum", sum), ("Reset", reset)]).unwrap();
    let hash = b.named("Hash", iface).unwrap();

    let empty = b.struct_type(&[]);
    let s = b.named("S", empty).unwrap();
    b.method(s, RecvKind::Pointer, "Write", &[("p", bytes)], &[Ty::INT, err]).unwrap();
    b.method(s, RecvKind::Pointer, "Sum", &[("b", bytes)], &[bytes]).unwrap();
    b.method(s, RecvKind::Pointer, "Reset", &[], &[]).unwrap();
    (b.finish().unwrap(), hash, s)
}

#[test]
fn unnamed_shapes_compare_structurally() {
    let mut a = Package::new("a", "a");
    let mut b = Package::new("b", "b");
    let x = a.slice_of(Ty::BYTE);
    let y = b.slice_of(Ty::UINT8);
    let z = a.slice_of(Ty::BYTE);
    assert!(identical(&a, x, &b, y));
    assert!(identical(&a, x, &a, z));

    let m = a.map_of(Ty::STRING, x);
    let n = b.map_of(Ty::STRING, y);
    assert!(identical(&a, m, &b, n));

    let w = b.slice_of(Ty::INT8);
    assert!(!identical(&a, x, &b, w));
}

#[test]
fn arrays_compare_lengths() {
    let mut p = Package::new("p", "p");
    let a = p.array_of(Ty::BYTE, 32);
    let b = p.array_of(Ty::BYTE, 32);
    let c = p.array_of(Ty::BYTE, 28);
    assert!(identical(&p, a, &p, b));
    assert!(!identical(&p, a, &p, c));
}

#[test]
fn struct_fields_compare_names_and_tags() {
    let mut p = Package::new("p", "p");
    let a = p.struct_of(&[FieldDecl::new("X", Ty::INT)]);
    let b = p.struct_of(&[FieldDecl::new("X", Ty::INT)]);
    let c = p.struct_of(&[FieldDecl::new("Y", Ty::INT)]);
    let d = p.struct_of(&[FieldDecl::new("X", Ty::INT).with_tag("asn1:\"optional\"")]);
    assert!(identical(&p, a, &p, b));
    assert!(!identical(&p, a, &p, c));
    assert!(!identical(&p, a, &p, d));
}

#[test]
fn signatures_ignore_names_but_not_variadic() {
    let mut p = Package::new("p", "p");
    let ints = p.slice_of(Ty::INT);
    let a = p.signature_of(None, &[("x", ints)], &[("n", Ty::INT)], false);
    let b = p.signature_of(None, &[("y", ints)], &[], false);
    let c = p.signature_of(None, &[("y", ints)], &[("", Ty::INT)], false);
    let d = p.signature_of(None, &[("y", ints)], &[("", Ty::INT)], true);
    assert!(!identical(&p, a, &p, b));
    assert!(identical(&p, a, &p, c));
    assert!(!identical(&p, c, &p, d));
}

#[test]
fn points_from_different_packages_differ() {
    let (a, pa) = point_package("a");
    let (b, pb) = point_package("b");
    assert!(!identical(&a, pa, &b, pb));
    assert!(identical(&a, pa, &a, pa));

    // Their underlying shapes are still the same.
    let ua = a.named(pa).unwrap().underlying.unwrap();
    let ub = b.named(pb).unwrap().underlying.unwrap();
    assert!(identical(&a, ua, &b, ub));
}

#[test]
fn names_distinguish_equal_shapes() {
    let mut b = PackageBuilder::new("p", "p");
    let celsius = b.named("Celsius", Ty::FLOAT64).unwrap();
    let fahrenheit = b.named("Fahrenheit", Ty::FLOAT64).unwrap();
    let pkg = b.finish().unwrap();
    assert!(!identical(&pkg, celsius, &pkg, fahrenheit));
    assert!(!identical(&pkg, celsius, &pkg, Ty::FLOAT64));
}

#[test]
fn basic_aliases_are_identical() {
    let p = Package::new("p", "p");
    assert!(identical(&p, Ty::BYTE, &p, Ty::UINT8));
    assert!(identical(&p, Ty::RUNE, &p, Ty::INT32));
    assert!(!identical(&p, Ty::INT, &p, Ty::INT64));
}

#[test]
fn universe_types_are_shared() {
    let a = Package::new("a", "a");
    let b = Package::new("b", "b");
    assert!(identical(&a, error_type(), &b, error_type()));
    assert!(!identical(&a, error_type(), &b, any_type()));
}

#[test]
fn pointer_receivers_only_serve_pointers() {
    let (mut pkg, hash, s) = hash_package();
    let s_ptr = pkg.pointer_to(s);
    assert!(implements(&pkg, s_ptr, &pkg, hash).unwrap());
    assert!(!implements(&pkg, s, &pkg, hash).unwrap());
}

#[test]
fn implementation_crosses_packages() {
    let (hp, hash, _) = hash_package();

    let mut b = PackageBuilder::new("example.com/impl", "impl");
    let bytes = b.bytes();
    let err = b.error();
    let t = b.named("Digest", Ty::UINT64).unwrap();
    b.method(t, RecvKind::Value, "Write", &[("data", bytes)], &[Ty::INT, err]).unwrap();
    b.method(t, RecvKind::Value, "Sum", &[("in", bytes)], &[bytes]).unwrap();
    b.method(t, RecvKind::Value, "Reset", &[], &[]).unwrap();
    let pkg = b.finish().unwrap();

    assert!(implements(&pkg, t, &hp, hash).unwrap());
}

#[test]
fn signatures_must_match_to_implement() {
    let (hp, hash, _) = hash_package();

    let mut b = PackageBuilder::new("example.com/impl", "impl");
    let bytes = b.bytes();
    let t = b.named("Digest", Ty::UINT64).unwrap();
    b.method(t, RecvKind::Value, "Write", &[("data", bytes)], &[Ty::INT]).unwrap();
    b.method(t, RecvKind::Value, "Sum", &[("in", bytes)], &[bytes]).unwrap();
    b.method(t, RecvKind::Value, "Reset", &[], &[]).unwrap();
    let pkg = b.finish().unwrap();

    assert!(!implements(&pkg, t, &hp, hash).unwrap());
}

#[test]
fn errors_are_implemented_by_error_methods() {
    let mut b = PackageBuilder::new("example.com/errs", "errs");
    let value_err = b.named("KeySizeError", Ty::INT).unwrap();
    b.error_method(value_err, RecvKind::Value).unwrap();
    let shape = b.struct_type(&[("Offset", Ty::INT64)]);
    let ptr_err = b.named("SyntaxError", shape).unwrap();
    b.error_method(ptr_err, RecvKind::Pointer).unwrap();
    let ptr = b.ptr(ptr_err);
    let pkg = b.finish().unwrap();

    let universe = go125_stubs::universe().package();
    assert!(implements(&pkg, value_err, universe, error_type()).unwrap());
    assert!(implements(&pkg, ptr, universe, error_type()).unwrap());
    assert!(!implements(&pkg, ptr_err, universe, error_type()).unwrap());
}

#[test]
fn everything_implements_any() {
    let (pkg, _, s) = hash_package();
    let universe = go125_stubs::universe().package();
    assert!(implements(&pkg, s, universe, any_type()).unwrap());
    assert!(implements(&pkg, Ty::INT, universe, any_type()).unwrap());
}

#[test]
fn embedded_methods_are_required() {
    let mut b = PackageBuilder::new("example.com/io", "io");
    let bytes = b.bytes();
    let err = b.error();
    let read = b.sig(&[("p", bytes)], &[Ty::INT, err]);
    let reader_iface = b.interface(&[("Read", read)]).unwrap();
    let reader = b.named("Reader", reader_iface).unwrap();
    let close = b.sig(&[], &[err]);
    let rc_iface = b.interface_with(&[("Close", close)], &[reader]).unwrap();
    let read_closer = b.named("ReadCloser", rc_iface).unwrap();

    let empty = b.struct_type(&[]);
    let file = b.named("File", empty).unwrap();
    b.method(file, RecvKind::Pointer, "Read", &[("p", bytes)], &[Ty::INT, err]).unwrap();
    let file_ptr = b.ptr(file);
    let closer = b.named("Closer", Ty::INT).unwrap();
    b.method(closer, RecvKind::Value, "Close", &[], &[err]).unwrap();
    let pipe = b.named("Pipe", Ty::INT).unwrap();
    b.method(pipe, RecvKind::Value, "Read", &[("p", bytes)], &[Ty::INT, err]).unwrap();
    b.method(pipe, RecvKind::Value, "Close", &[], &[err]).unwrap();
    let pkg = b.finish().unwrap();

    assert!(implements(&pkg, file_ptr, &pkg, reader).unwrap());
    assert!(!implements(&pkg, file_ptr, &pkg, read_closer).unwrap());
    assert!(!implements(&pkg, closer, &pkg, read_closer).unwrap());
    assert!(implements(&pkg, pipe, &pkg, read_closer).unwrap());

    // Explicit methods come first, embedded ones after.
    let close = lookup_method(&pkg, read_closer, "Close").unwrap().unwrap();
    assert_eq!(close.name(), "Close");
    assert_eq!(go125_stubs::method_at(&pkg, read_closer, 1).unwrap().unwrap().name(), "Read");
}

#[test]
fn interfaces_compare_by_method_set() {
    let mut a = PackageBuilder::new("a", "a");
    let err = a.error();
    let close = a.sig(&[], &[err]);
    let ia = a.interface(&[("Close", close)]).unwrap();
    let pa = a.finish().unwrap();

    let mut b = PackageBuilder::new("b", "b");
    let err = b.error();
    let close = b.sig(&[], &[err]);
    let ib = b.interface(&[("Close", close)]).unwrap();
    let flush = b.sig(&[], &[err]);
    let ic = b.interface(&[("Flush", flush)]).unwrap();
    let pb = b.finish().unwrap();

    assert!(identical(&pa, ia, &pb, ib));
    assert!(!identical(&pa, ia, &pb, ic));
}

#[test]
fn implements_needs_an_interface() {
    let (pkg, _, s) = hash_package();
    let err = implements(&pkg, s, &pkg, Ty::INT).unwrap_err();
    assert!(matches!(err, StubError::NotAnInterface { .. }));
}
