use go125_stubs::package::PackageState;
use go125_stubs::{
    implements, lookup_method, method_at, num_methods, ChanDir, Completion, FieldDecl, Package, PackageBuilder, RecvKind,
    ObjectKind, Resolved, StubError, Ty, Type,
};

fn node(pkg: &Package, ty: Ty) -> &Type {
    match pkg.resolve(ty) {
        Resolved::Node { node, .. } => node,
        Resolved::Basic(b) => panic!("expected a node, got basic {}", b.name),
    }
}

/// `interface { name() }` for each name, left open.
fn open_interface(pkg: &mut Package, names: &[&str]) -> Ty {
    let methods: Vec<_> = names
        .iter()
        .map(|name| {
            let sig = pkg.signature_of(None, &[], &[], false);
            pkg.new_func(name, sig)
        })
        .collect();
    pkg.interface_of(&methods, &[])
}

#[test]
fn shapes_keep_their_components() {
    let mut pkg = Package::new("example.com/shapes", "shapes");
    let bytes = pkg.slice_of(Ty::BYTE);
    let arr = pkg.array_of(Ty::UINT64, 256);
    let m = pkg.map_of(Ty::STRING, bytes);
    let ch = pkg.chan_of(ChanDir::RecvOnly, Ty::INT);
    let st = pkg.struct_of(&[
        FieldDecl::new("Name", Ty::STRING).with_tag(r#"json:"name""#),
        FieldDecl::embedded("Reader", bytes),
    ]);

    assert!(matches!(node(&pkg, bytes), Type::Slice { elem } if *elem == Ty::BYTE));
    assert!(matches!(node(&pkg, arr), Type::Array { len: 256, elem } if *elem == Ty::UINT64));
    assert!(matches!(node(&pkg, m), Type::Map { key, elem } if *key == Ty::STRING && *elem == bytes));
    assert!(matches!(node(&pkg, ch), Type::Chan { dir: ChanDir::RecvOnly, .. }));

    let Type::Struct { fields } = node(&pkg, st) else {
        panic!("expected struct");
    };
    let fields = pkg.fields(*fields);
    assert_eq!(fields.len(), 2);
    assert_eq!(pkg.symbol_str(fields[0].name), "Name");
    assert_eq!(fields[0].tag.map(|t| pkg.symbol_str(t)), Some(r#"json:"name""#));
    assert!(!fields[0].embedded);
    assert!(fields[1].embedded);
}

#[test]
fn signatures_record_receiver_params_and_results() {
    let mut pkg = Package::new("example.com/sig", "sig");
    let bytes = pkg.slice_of(Ty::BYTE);
    let sig = pkg.signature_of(
        Some(("w", Ty::INT)),
        &[("format", Ty::STRING), ("args", bytes)],
        &[("n", Ty::INT)],
        true,
    );
    let Type::Signature(s) = node(&pkg, sig) else {
        panic!("expected signature");
    };
    assert!(s.variadic);
    assert_eq!(s.recv.map(|r| r.ty), Some(Ty::INT));
    let params = pkg.params(s.params);
    assert_eq!(params.len(), 2);
    assert_eq!(pkg.symbol_str(params[0].name), "format");
    assert_eq!(params[1].ty, bytes);
    assert_eq!(pkg.params(s.results).len(), 1);
}

#[test]
fn named_types_are_two_phase() {
    let mut pkg = Package::new("example.com/list", "list");
    let node_ty = pkg.declare("Node").unwrap();
    let next = pkg.pointer_to(node_ty);
    let shape = pkg.struct_of(&[FieldDecl::new("Next", next), FieldDecl::new("Value", Ty::INT)]);
    assert!(pkg.named(node_ty).unwrap().underlying.is_none());

    pkg.set_underlying(node_ty, shape).unwrap();
    assert_eq!(pkg.named(node_ty).unwrap().underlying, Some(shape));

    let err = pkg.set_underlying(node_ty, Ty::INT).unwrap_err();
    assert!(matches!(err, StubError::UnderlyingAlreadySet { ref name, .. } if name == "Node"));
}

#[test]
fn declare_does_not_touch_the_scope() {
    let mut pkg = Package::new("example.com/p", "p");
    let t = pkg.declare("T").unwrap();
    pkg.set_underlying(t, Ty::INT).unwrap();
    assert!(pkg.lookup("T").is_none());

    let obj = pkg.type_name_of(t).unwrap();
    pkg.insert(obj).unwrap();
    assert_eq!(pkg.lookup_type("T"), Some(t));

    let err = pkg.declare("T").unwrap_err();
    assert!(matches!(err, StubError::DuplicateName { .. }));
}

#[test]
fn duplicate_scope_entries_are_rejected() {
    let mut b = PackageBuilder::new("example.com/dup", "dup");
    b.const_int("Size", Ty::INT, 4).unwrap();
    let err = b.var("Size", Ty::INT).unwrap_err();
    assert_eq!(
        err,
        StubError::DuplicateName {
            package: "example.com/dup".into(),
            name: "Size".into(),
        }
    );
}

#[test]
fn receiver_kind_follows_the_signature() {
    let mut b = PackageBuilder::new("example.com/recv", "recv");
    let t = b.named("T", Ty::INT).unwrap();
    b.method(t, RecvKind::Value, "Get", &[], &[Ty::INT]).unwrap();
    b.method(t, RecvKind::Pointer, "Set", &[("v", Ty::INT)], &[]).unwrap();

    let pkg = b.finish().unwrap();
    let named = pkg.named(t).unwrap();
    let value: Vec<_> = named.value_methods().map(|f| pkg.object_name(f)).collect();
    let pointer: Vec<_> = named.pointer_methods().map(|f| pkg.object_name(f)).collect();
    assert_eq!(value, ["Get"]);
    assert_eq!(pointer, ["Set"]);
}

#[test]
fn methods_need_a_matching_receiver() {
    let mut pkg = Package::new("example.com/recv", "recv");
    let t = pkg.declare("T").unwrap();
    pkg.set_underlying(t, Ty::INT).unwrap();
    let u = pkg.declare("U").unwrap();
    pkg.set_underlying(u, Ty::INT).unwrap();

    let no_recv = pkg.signature_of(None, &[], &[], false);
    let f = pkg.new_func("F", no_recv);
    assert!(matches!(
        pkg.add_method(t, f),
        Err(StubError::InvalidReceiver { .. })
    ));

    let other = pkg.signature_of(Some(("u", u)), &[], &[], false);
    let g = pkg.new_func("G", other);
    assert!(matches!(
        pkg.add_method(t, g),
        Err(StubError::InvalidReceiver { .. })
    ));

    let unnamed = pkg.slice_of(Ty::INT);
    let h_sig = pkg.signature_of(Some(("s", unnamed)), &[], &[], false);
    let h = pkg.new_func("H", h_sig);
    assert!(matches!(
        pkg.add_method(unnamed, h),
        Err(StubError::InvalidReceiver { .. })
    ));
}

#[test]
fn duplicate_methods_are_rejected() {
    let mut b = PackageBuilder::new("example.com/dup", "dup");
    let t = b.named("T", Ty::INT).unwrap();
    b.method(t, RecvKind::Pointer, "Close", &[], &[]).unwrap();
    let err = b.method(t, RecvKind::Pointer, "Close", &[], &[]).unwrap_err();
    assert!(matches!(err, StubError::DuplicateMethod { ref method, .. } if method == "Close"));
}

#[test]
fn value_and_pointer_methods_share_names() {
    let mut b = PackageBuilder::new("example.com/dup", "dup");
    let t = b.named("T", Ty::INT).unwrap();
    b.stringer(t).unwrap();
    let err = b
        .method(t, RecvKind::Pointer, "String", &[], &[Ty::STRING])
        .unwrap_err();
    assert!(matches!(err, StubError::DuplicateMethod { ref method, .. } if method == "String"));

    b.method(t, RecvKind::Pointer, "Reset", &[], &[]).unwrap();
    let err = b.method(t, RecvKind::Value, "Reset", &[], &[]).unwrap_err();
    assert_eq!(err.kind(), "duplicate-method");

    let pkg = b.finish().unwrap();
    assert_eq!(num_methods(&pkg, t).unwrap(), 2);
}

#[test]
fn method_order_is_attachment_order() {
    let mut b = PackageBuilder::new("compress/flate", "flate");
    let err = b.error();
    let shape = b.struct_type(&[]);
    let w = b.named("Writer", shape).unwrap();
    b.method(w, RecvKind::Pointer, "Write", &[], &[Ty::INT, err]).unwrap();
    b.method(w, RecvKind::Pointer, "Close", &[], &[err]).unwrap();
    b.method(w, RecvKind::Pointer, "Flush", &[], &[err]).unwrap();
    let pkg = b.finish().unwrap();

    assert_eq!(num_methods(&pkg, w).unwrap(), 3);
    let names: Vec<_> = (0..3)
        .map(|i| method_at(&pkg, w, i).unwrap().unwrap().name())
        .collect();
    assert_eq!(names, ["Write", "Close", "Flush"]);
    assert!(method_at(&pkg, w, 3).unwrap().is_none());
}

#[test]
fn completed_interfaces_reject_new_methods() {
    let mut pkg = Package::new("example.com/iface", "iface");
    let iface = open_interface(&mut pkg, &["Read"]);

    let sig = pkg.signature_of(None, &[], &[], false);
    let close = pkg.new_func("Close", sig);
    pkg.add_interface_method(iface, close).unwrap();
    pkg.complete_interface(iface).unwrap();
    pkg.complete_interface(iface).unwrap();

    let sig = pkg.signature_of(None, &[], &[], false);
    let late = pkg.new_func("Late", sig);
    let err = pkg.add_interface_method(iface, late).unwrap_err();
    assert!(matches!(err, StubError::InterfaceSealed { ref method, .. } if method == "Late"));
    assert_eq!(num_methods(&pkg, iface).unwrap(), 2);
}

#[test]
fn completing_an_interface_completes_its_embeddeds() {
    let mut pkg = Package::new("example.com/iface", "iface");
    let reader = open_interface(&mut pkg, &["Read"]);
    let named_reader = pkg.declare("Reader").unwrap();
    pkg.set_underlying(named_reader, reader).unwrap();
    let read_closer = pkg.interface_of(&[], &[named_reader]);

    pkg.complete_interface(read_closer).unwrap();
    let Type::Interface(i) = node(&pkg, reader) else {
        panic!("expected interface");
    };
    assert_eq!(i.state, Completion::Completed);
}

#[test]
fn only_interfaces_can_be_completed() {
    let mut pkg = Package::new("example.com/iface", "iface");
    let s = pkg.slice_of(Ty::INT);
    assert!(matches!(
        pkg.complete_interface(s),
        Err(StubError::NotAnInterface { .. })
    ));
}

#[test]
fn open_interfaces_cannot_be_queried() {
    let mut pkg = Package::new("example.com/iface", "iface");
    let iface = open_interface(&mut pkg, &["Read"]);
    assert!(matches!(
        num_methods(&pkg, iface),
        Err(StubError::InterfaceNotComplete { .. })
    ));
    assert!(matches!(
        method_at(&pkg, iface, 0),
        Err(StubError::InterfaceNotComplete { .. })
    ));
    assert!(matches!(
        lookup_method(&pkg, iface, "Read"),
        Err(StubError::InterfaceNotComplete { .. })
    ));
}

#[test]
fn satisfaction_needs_complete_interfaces() {
    let mut pkg = Package::new("example.com/iface", "iface");
    let open = open_interface(&mut pkg, &["Close"]);
    let done = open_interface(&mut pkg, &["Close"]);
    pkg.complete_interface(done).unwrap();

    // Open interface on the required side.
    assert!(matches!(
        implements(&pkg, done, &pkg, open),
        Err(StubError::InterfaceNotComplete { .. })
    ));
    // Open interface on the value side.
    assert!(matches!(
        implements(&pkg, open, &pkg, done),
        Err(StubError::InterfaceNotComplete { .. })
    ));
    assert!(implements(&pkg, done, &pkg, done).unwrap());
}

#[test]
fn open_embedded_interfaces_block_queries() {
    let mut pkg = Package::new("example.com/iface", "iface");
    let inner = pkg.declare("Inner").unwrap();
    let read = open_interface(&mut pkg, &["Read"]);
    let sig = pkg.signature_of(None, &[], &[], false);
    let close = pkg.new_func("Close", sig);
    let outer = pkg.interface_of(&[close], &[inner]);

    // Inner has no underlying yet, so completing the outer interface
    // leaves the later one open.
    pkg.complete_interface(outer).unwrap();
    pkg.set_underlying(inner, read).unwrap();

    let Type::Interface(i) = node(&pkg, outer) else {
        panic!("expected interface");
    };
    assert!(i.is_complete());
    assert!(matches!(
        num_methods(&pkg, outer),
        Err(StubError::InterfaceNotComplete { .. })
    ));
    assert!(matches!(
        method_at(&pkg, outer, 0),
        Err(StubError::InterfaceNotComplete { .. })
    ));

    pkg.complete_interface(read).unwrap();
    assert_eq!(num_methods(&pkg, outer).unwrap(), 2);
    assert_eq!(method_at(&pkg, outer, 1).unwrap().unwrap().name(), "Read");
}

#[test]
fn sealing_validates_and_completes() {
    let mut pkg = Package::new("example.com/seal", "seal");
    let iface = open_interface(&mut pkg, &["Close"]);
    let closer = pkg.declare("Closer").unwrap();
    pkg.set_underlying(closer, iface).unwrap();
    let obj = pkg.type_name_of(closer).unwrap();
    pkg.insert(obj).unwrap();

    pkg.mark_complete().unwrap();
    assert_eq!(pkg.state(), PackageState::Sealed);
    let Type::Interface(i) = node(&pkg, iface) else {
        panic!("expected interface");
    };
    assert!(i.is_complete());

    // Sealing again changes nothing.
    pkg.mark_complete().unwrap();
    assert!(pkg.is_sealed());
}

#[test]
fn sealing_fails_on_incomplete_named_types() {
    let mut pkg = Package::new("example.com/seal", "seal");
    pkg.declare("Dangling").unwrap();
    let err = pkg.mark_complete().unwrap_err();
    assert!(matches!(err, StubError::IncompleteType { ref name, .. } if name == "Dangling"));
    assert!(!pkg.is_sealed());
}

#[test]
fn sealed_packages_reject_mutation() {
    let mut b = PackageBuilder::new("example.com/sealed", "sealed");
    let t = b.named("T", Ty::INT).unwrap();
    let mut pkg = b.finish().unwrap();

    let v = pkg.new_var("Late", Ty::INT);
    assert!(matches!(pkg.insert(v), Err(StubError::TypeSealed { .. })));
    assert!(matches!(pkg.declare("U"), Err(StubError::TypeSealed { .. })));
    assert!(matches!(
        pkg.set_underlying(t, Ty::STRING),
        Err(StubError::TypeSealed { .. })
    ));
    let sig = pkg.signature_of(Some(("t", t)), &[], &[], false);
    let m = pkg.new_func("M", sig);
    assert!(matches!(pkg.add_method(t, m), Err(StubError::TypeSealed { .. })));

    // Fresh shapes may still be allocated, but nothing can attach them.
    let before = pkg.scope().len();
    let ptr = pkg.pointer_to(t);
    assert!(matches!(node(&pkg, ptr), Type::Pointer { elem } if *elem == t));
    let v = pkg.new_var("P", ptr);
    assert!(matches!(pkg.insert(v), Err(StubError::TypeSealed { .. })));
    assert_eq!(pkg.scope().len(), before);
    assert!(pkg.lookup("P").is_none());

    let iface = pkg.interface_of(&[], &[]);
    let sig = pkg.signature_of(None, &[], &[], false);
    let f = pkg.new_func("F", sig);
    assert!(matches!(
        pkg.add_interface_method(iface, f),
        Err(StubError::TypeSealed { .. })
    ));
}

#[test]
fn named_cycles_fail_sealing() {
    let mut pkg = Package::new("example.com/cycle", "cycle");
    let a = pkg.declare("A").unwrap();
    let b = pkg.declare("B").unwrap();
    pkg.set_underlying(a, b).unwrap();
    pkg.set_underlying(b, a).unwrap();
    let err = pkg.mark_complete().unwrap_err();
    assert!(matches!(err, StubError::IncompleteType { ref name, .. } if name == "A"));
    assert_eq!(pkg.state(), PackageState::Open);

    // A chain of names ending in a shape is fine.
    let mut pkg = Package::new("example.com/chain", "chain");
    let a = pkg.declare("A").unwrap();
    let b = pkg.declare("B").unwrap();
    pkg.set_underlying(a, b).unwrap();
    pkg.set_underlying(b, Ty::STRING).unwrap();
    pkg.mark_complete().unwrap();
}

#[test]
fn labels_and_package_names_enter_the_scope() {
    let mut pkg = Package::new("example.com/objs", "objs");
    let label = pkg.new_label("retry");
    let imported = pkg.new_pkg_name("sha", "crypto/sha256");
    pkg.insert(label).unwrap();
    pkg.insert(imported).unwrap();

    let obj = pkg.object(pkg.lookup("retry").unwrap());
    assert_eq!(obj.kind, ObjectKind::Label);
    assert_eq!(obj.kind_name(), "label");
    assert_eq!(obj.ty, Ty::INVALID);
    assert_eq!(obj.pkg, Some(pkg.id()));

    let obj = pkg.object(pkg.lookup("sha").unwrap());
    assert!(matches!(&obj.kind, ObjectKind::PkgName { imported } if &**imported == "crypto/sha256"));
    assert_eq!(obj.kind_name(), "package");

    let dup = pkg.new_label("retry");
    assert!(matches!(pkg.insert(dup), Err(StubError::DuplicateName { .. })));
}

#[test]
fn every_sealed_named_type_has_an_underlying() {
    let mut b = PackageBuilder::new("example.com/all", "all");
    let a = b.declare("A").unwrap();
    let bt = b.named("B", a).unwrap();
    let ptr = b.ptr(bt);
    b.set_underlying(a, ptr).unwrap();
    b.hidden("c", Ty::STRING).unwrap();
    let pkg = b.finish().unwrap();

    assert_eq!(pkg.named_types().count(), 3);
    assert!(pkg.named_types().all(|(_, n)| n.underlying.is_some()));
    assert!(pkg.lookup("c").is_none());
}

#[test]
fn scope_keeps_insertion_order() {
    let mut b = PackageBuilder::new("example.com/order", "order");
    b.const_int("B", Ty::INT, 1).unwrap();
    b.var("A", Ty::STRING).unwrap();
    b.func("C", &[], &[]).unwrap();
    let pkg = b.finish().unwrap();

    let names: Vec<_> = pkg
        .scope()
        .objects()
        .iter()
        .map(|&id| pkg.object_name(id))
        .collect();
    assert_eq!(names, ["B", "A", "C"]);
}
