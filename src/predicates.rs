//! Queries a type checker runs against sealed packages.
//!
//! Every handle travels with the package it belongs to. Children of a node
//! are resolved against the package that owns the node, so a query can cross
//! from a stub package into the universe and back without confusion.

use smallvec::SmallVec;

use crate::error::{Result, StubError};
use crate::object::ObjId;
use crate::package::{Package, Resolved};
use crate::types::{Interface, Param, Signature, Ty, Type, TypeId};

/// A method seen through the package that declares it.
#[derive(Debug, Clone, Copy)]
pub struct MethodRef<'a> {
    pub pkg: &'a Package,
    pub func: ObjId,
}

impl<'a> MethodRef<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        self.pkg.object_name(self.func)
    }

    #[inline]
    pub fn signature(&self) -> Option<&'a Signature> {
        self.pkg.signature_of_func(self.func)
    }
}

// =============================================================================
// Identity
// =============================================================================

/// Reports whether `t` (in `a`) and `u` (in `b`) denote the same type.
///
/// Named types are identical only if they come from the same declaration.
/// Unnamed shapes are compared structurally. `byte`/`uint8` and
/// `rune`/`int32` are interchangeable.
pub fn identical(a: &Package, t: Ty, b: &Package, u: Ty) -> bool {
    match (a.resolve(t), b.resolve(u)) {
        (Resolved::Basic(x), Resolved::Basic(y)) => x.kind.canonical() == y.kind.canonical(),
        (
            Resolved::Node {
                pkg: pa, node: x, ..
            },
            Resolved::Node {
                pkg: pb, node: y, ..
            },
        ) => identical_nodes(pa, x, pb, y),
        _ => false,
    }
}

fn identical_nodes(pa: &Package, x: &Type, pb: &Package, y: &Type) -> bool {
    match (x, y) {
        (Type::Named(n), Type::Named(m)) => {
            pa.id() == pb.id() && pa.object_name(n.obj) == pb.object_name(m.obj)
        }
        (Type::Pointer { elem: e }, Type::Pointer { elem: f })
        | (Type::Slice { elem: e }, Type::Slice { elem: f }) => identical(pa, *e, pb, *f),
        (Type::Array { elem: e, len: n }, Type::Array { elem: f, len: m }) => {
            n == m && identical(pa, *e, pb, *f)
        }
        (Type::Map { key: k, elem: e }, Type::Map { key: l, elem: f }) => {
            identical(pa, *k, pb, *l) && identical(pa, *e, pb, *f)
        }
        (Type::Chan { dir: d, elem: e }, Type::Chan { dir: g, elem: f }) => {
            d == g && identical(pa, *e, pb, *f)
        }
        (Type::Struct { fields: fs }, Type::Struct { fields: gs }) => {
            let (fs, gs) = (pa.fields(*fs), pb.fields(*gs));
            fs.len() == gs.len()
                && fs.iter().zip(gs).all(|(f, g)| {
                    f.embedded == g.embedded
                        && pa.symbol_str(f.name) == pb.symbol_str(g.name)
                        && f.tag.map(|t| pa.symbol_str(t)) == g.tag.map(|t| pb.symbol_str(t))
                        && identical(pa, f.ty, pb, g.ty)
                })
        }
        (Type::Signature(s), Type::Signature(r)) => identical_signatures(pa, s, pb, r),
        (Type::Tuple { vars: v }, Type::Tuple { vars: w }) => {
            identical_params(pa, pa.params(*v), pb, pb.params(*w))
        }
        (Type::Interface(i), Type::Interface(j)) => {
            let ms = flatten(pa, i, false).unwrap_or_default();
            let ns = flatten(pb, j, false).unwrap_or_default();
            ms.len() == ns.len()
                && ms.iter().all(|m| {
                    ns.iter()
                        .any(|n| m.name() == n.name() && identical_methods(m, n))
                })
        }
        _ => false,
    }
}

fn identical_params(pa: &Package, xs: &[Param], pb: &Package, ys: &[Param]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| identical(pa, x.ty, pb, y.ty))
}

/// Parameter and result names and the receiver do not take part.
fn identical_signatures(pa: &Package, s: &Signature, pb: &Package, r: &Signature) -> bool {
    s.variadic == r.variadic
        && identical_params(pa, pa.params(s.params), pb, pb.params(r.params))
        && identical_params(pa, pa.params(s.results), pb, pb.params(r.results))
}

fn identical_methods(m: &MethodRef<'_>, n: &MethodRef<'_>) -> bool {
    match (m.signature(), n.signature()) {
        (Some(s), Some(r)) => identical_signatures(m.pkg, s, n.pkg, r),
        _ => false,
    }
}

// =============================================================================
// Interfaces
// =============================================================================

/// Follows named types down to the first unnamed shape.
pub fn underlying(pkg: &Package, ty: Ty) -> Resolved<'_> {
    let mut cur = pkg.resolve(ty);
    // Sealing rejects named cycles; the bound only matters for open packages.
    for _ in 0..16 {
        match cur {
            Resolved::Node {
                pkg,
                node: Type::Named(n),
                ..
            } => match n.underlying {
                Some(u) => cur = pkg.resolve(u),
                None => return cur,
            },
            _ => return cur,
        }
    }
    cur
}

fn as_interface(r: Resolved<'_>) -> Option<(&Package, &Interface)> {
    match r {
        Resolved::Node {
            pkg,
            node: Type::Interface(i),
            ..
        } => Some((pkg, i)),
        _ => None,
    }
}

/// Explicit methods first, then embedded ones in embedding order, first
/// occurrence of a name wins. With `checked`, an open interface anywhere in
/// the embedding tree is an error.
fn flatten<'a>(pkg: &'a Package, iface: &'a Interface, checked: bool) -> Result<Vec<MethodRef<'a>>> {
    let mut out: Vec<MethodRef<'a>> = Vec::with_capacity(iface.methods.len());
    let mut seen: SmallVec<[(u32, TypeId); 4]> = SmallVec::new();
    let mut stack: Vec<(&'a Package, &'a Interface)> = vec![(pkg, iface)];

    while let Some((p, i)) = stack.pop() {
        if checked && !i.is_complete() {
            return Err(StubError::InterfaceNotComplete {
                package: p.path().to_string(),
            });
        }
        for &func in &i.methods {
            let name = p.object_name(func);
            if !out.iter().any(|m| m.name() == name) {
                out.push(MethodRef { pkg: p, func });
            }
        }
        // Reverse so the first embedded interface is expanded first.
        for &e in i.embeddeds.iter().rev() {
            let key = match p.resolve(e) {
                Resolved::Node { pkg, id, .. } => (pkg.id().as_u32(), id),
                Resolved::Basic(_) => continue,
            };
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            if let Some(inner) = as_interface(underlying(p, e)) {
                stack.push(inner);
            }
        }
    }
    Ok(out)
}

/// The complete method list of an interface type (named or not).
fn interface_methods(pkg: &Package, ty: Ty) -> Result<Option<Vec<MethodRef<'_>>>> {
    match as_interface(underlying(pkg, ty)) {
        Some((p, i)) => flatten(p, i, true).map(Some),
        None => Ok(None),
    }
}

// =============================================================================
// Method sets
// =============================================================================

/// Methods callable on a value of type `ty`.
///
/// `T` gets its value-receiver methods, `*T` gets value and pointer
/// receiver methods, an interface gets its flattened method list.
pub fn method_set(pkg: &Package, ty: Ty) -> Result<Vec<MethodRef<'_>>> {
    if let Some(ms) = interface_methods(pkg, ty)? {
        return Ok(ms);
    }
    let set = match pkg.resolve(ty) {
        Resolved::Node {
            pkg: p,
            node: Type::Named(n),
            ..
        } => n
            .value_methods()
            .map(|func| MethodRef { pkg: p, func })
            .collect(),
        Resolved::Node {
            pkg: p,
            node: Type::Pointer { elem },
            ..
        } => match p.resolve(*elem) {
            Resolved::Node {
                pkg: q,
                node: Type::Named(n),
                ..
            } if as_interface(underlying(p, *elem)).is_none() => n
                .methods
                .iter()
                .map(|m| MethodRef { pkg: q, func: m.func })
                .collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    Ok(set)
}

/// Reports whether values of type `value` (in `vp`) satisfy the interface
/// `iface` (in `ip`).
///
/// Fails with `NotAnInterface` if `iface` is not an interface type and with
/// `InterfaceNotComplete` if it, or anything it embeds, is still open.
pub fn implements(vp: &Package, value: Ty, ip: &Package, iface: Ty) -> Result<bool> {
    let Some(required) = interface_methods(ip, iface)? else {
        return Err(StubError::NotAnInterface {
            package: ip.path().to_string(),
        });
    };
    if required.is_empty() {
        return Ok(true);
    }
    let available = method_set(vp, value)?;
    Ok(required.iter().all(|want| {
        available
            .iter()
            .any(|have| have.name() == want.name() && identical_methods(have, want))
    }))
}

/// Methods enumerable on `ty`: all declared methods of a named non-interface
/// type in attachment order, or the flattened methods of an interface.
fn enumerable(pkg: &Package, ty: Ty) -> Result<Vec<MethodRef<'_>>> {
    if let Some(ms) = interface_methods(pkg, ty)? {
        return Ok(ms);
    }
    Ok(match pkg.resolve(ty) {
        Resolved::Node {
            pkg: p,
            node: Type::Named(n),
            ..
        } => n
            .methods
            .iter()
            .map(|m| MethodRef { pkg: p, func: m.func })
            .collect(),
        _ => Vec::new(),
    })
}

pub fn num_methods(pkg: &Package, ty: Ty) -> Result<usize> {
    enumerable(pkg, ty).map(|ms| ms.len())
}

/// The `i`th method of `ty` in enumeration order.
pub fn method_at(pkg: &Package, ty: Ty, i: usize) -> Result<Option<MethodRef<'_>>> {
    enumerable(pkg, ty).map(|ms| ms.get(i).copied())
}

/// Finds a method of `ty` by name, searching its full enumeration.
pub fn lookup_method<'a>(pkg: &'a Package, ty: Ty, name: &str) -> Result<Option<MethodRef<'a>>> {
    enumerable(pkg, ty).map(|ms| ms.into_iter().find(|m| m.name() == name))
}
