use go125_stubs::{
    identical, method_at, num_methods, ChanDir, FieldDecl, Package, PackageBuilder, RecvKind, Ty,
};
use proptest::prelude::*;

/// A type expression independent of any package.
#[derive(Debug, Clone)]
enum Shape {
    Basic(Ty),
    Pointer(Box<Shape>),
    Slice(Box<Shape>),
    Array(u64, Box<Shape>),
    Map(Box<Shape>, Box<Shape>),
    Chan(ChanDir, Box<Shape>),
    Struct(Vec<(String, Shape)>),
    Func(Vec<Shape>, Vec<Shape>),
}

fn build(pkg: &mut Package, shape: &Shape) -> Ty {
    match shape {
        Shape::Basic(t) => *t,
        Shape::Pointer(e) => {
            let e = build(pkg, e);
            pkg.pointer_to(e)
        }
        Shape::Slice(e) => {
            let e = build(pkg, e);
            pkg.slice_of(e)
        }
        Shape::Array(n, e) => {
            let e = build(pkg, e);
            pkg.array_of(e, *n)
        }
        Shape::Map(k, e) => {
            let k = build(pkg, k);
            let e = build(pkg, e);
            pkg.map_of(k, e)
        }
        Shape::Chan(dir, e) => {
            let e = build(pkg, e);
            pkg.chan_of(*dir, e)
        }
        Shape::Struct(fields) => {
            let tys: Vec<_> = fields.iter().map(|(_, s)| build(pkg, s)).collect();
            let decls: Vec<_> = fields
                .iter()
                .zip(&tys)
                .map(|((name, _), &ty)| FieldDecl::new(name, ty))
                .collect();
            pkg.struct_of(&decls)
        }
        Shape::Func(params, results) => {
            let params: Vec<_> = params.iter().map(|s| ("", build(pkg, s))).collect();
            let results: Vec<_> = results.iter().map(|s| ("", build(pkg, s))).collect();
            pkg.signature_of(None, &params, &results, false)
        }
    }
}

fn basic() -> impl Strategy<Value = Ty> {
    prop_oneof![
        Just(Ty::BOOL),
        Just(Ty::INT),
        Just(Ty::UINT64),
        Just(Ty::FLOAT64),
        Just(Ty::STRING),
        Just(Ty::BYTE),
        Just(Ty::RUNE),
        Just(Ty::UNSAFE_POINTER),
    ]
}

fn chan_dir() -> impl Strategy<Value = ChanDir> {
    prop_oneof![
        Just(ChanDir::SendRecv),
        Just(ChanDir::SendOnly),
        Just(ChanDir::RecvOnly),
    ]
}

fn shape() -> impl Strategy<Value = Shape> {
    basic().prop_map(Shape::Basic).prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| Shape::Pointer(Box::new(e))),
            inner.clone().prop_map(|e| Shape::Slice(Box::new(e))),
            (0u64..64, inner.clone()).prop_map(|(n, e)| Shape::Array(n, Box::new(e))),
            (inner.clone(), inner.clone()).prop_map(|(k, e)| Shape::Map(Box::new(k), Box::new(e))),
            (chan_dir(), inner.clone()).prop_map(|(d, e)| Shape::Chan(d, Box::new(e))),
            prop::collection::vec(("[A-Z][a-z]{0,4}", inner.clone()), 0..4)
                .prop_map(Shape::Struct),
            (
                prop::collection::vec(inner.clone(), 0..3),
                prop::collection::vec(inner, 0..3)
            )
                .prop_map(|(p, r)| Shape::Func(p, r)),
        ]
    })
}

fn method_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[A-Z][a-zA-Z]{0,7}", 1..16)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn shapes_built_twice_are_identical(s in shape()) {
        let mut a = Package::new("a", "a");
        let mut b = Package::new("b", "b");
        let x = build(&mut a, &s);
        let y = build(&mut b, &s);
        let z = build(&mut a, &s);
        prop_assert!(identical(&a, x, &b, y), "{s:?}");
        prop_assert!(identical(&b, y, &a, x), "{s:?}");
        prop_assert!(identical(&a, x, &a, z), "{s:?}");
    }

    #[test]
    fn wrapping_changes_identity(s in shape()) {
        let mut p = Package::new("p", "p");
        let x = build(&mut p, &s);
        let y = build(&mut p, &s);
        let ptr = p.pointer_to(y);
        let slice = p.slice_of(y);
        prop_assert!(!identical(&p, x, &p, ptr));
        prop_assert!(!identical(&p, ptr, &p, slice));
    }

    #[test]
    fn named_wrappers_are_never_identical_across_packages(s in shape()) {
        let mut a = PackageBuilder::new("a", "a");
        let shape_a = build(a.package_mut(), &s);
        let ta = a.named("T", shape_a).unwrap();
        let a = a.finish().unwrap();

        let mut b = PackageBuilder::new("b", "b");
        let shape_b = build(b.package_mut(), &s);
        let tb = b.named("T", shape_b).unwrap();
        let b = b.finish().unwrap();

        prop_assert!(!identical(&a, ta, &b, tb));
        prop_assert!(identical(&a, ta, &a, ta));
    }

    #[test]
    fn attachment_order_is_enumeration_order(
        names in method_names(),
        pointer in prop::collection::vec(any::<bool>(), 16),
    ) {
        let mut b = PackageBuilder::new("p", "p");
        let t = b.named("T", Ty::INT).unwrap();
        for (name, &ptr) in names.iter().zip(&pointer) {
            let recv = if ptr { RecvKind::Pointer } else { RecvKind::Value };
            b.method(t, recv, name, &[], &[]).unwrap();
        }
        let pkg = b.finish().unwrap();

        prop_assert_eq!(num_methods(&pkg, t).unwrap(), names.len());
        for (i, name) in names.iter().enumerate() {
            let m = method_at(&pkg, t, i).unwrap().unwrap();
            prop_assert_eq!(m.name(), name.as_str());
        }
        prop_assert!(method_at(&pkg, t, names.len()).unwrap().is_none());
    }

    #[test]
    fn interface_methods_keep_declaration_order(names in method_names()) {
        let mut b = PackageBuilder::new("p", "p");
        let sigs: Vec<_> = names.iter().map(|_| b.sig(&[], &[])).collect();
        let methods: Vec<_> = names.iter().map(String::as_str).zip(sigs).collect();
        let iface = b.interface(&methods).unwrap();
        let pkg = b.finish().unwrap();

        let listed: Vec<_> = (0..num_methods(&pkg, iface).unwrap())
            .map(|i| method_at(&pkg, iface, i).unwrap().unwrap().name().to_string())
            .collect();
        prop_assert_eq!(listed, names);
    }
}
