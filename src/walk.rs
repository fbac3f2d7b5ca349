//! Visitor over a package's type graph.
//!
//! Nodes derive `Walk` with `#[derive(WalkTypes)]`; a visitor overrides the
//! hooks it cares about. The graph is cyclic through named types (a method
//! returning `*T` leads back to `T`), so a visitor that recurses through
//! `visit_ty` must remember which nodes it has already seen.

use smallvec::SmallVec;

use crate::arena::ListRef;
use crate::object::ObjId;
use crate::package::Package;
use crate::types::{Field, Param, Ty};

pub trait Walk<'p> {
    fn walk<V: Visitor<'p> + ?Sized>(&self, p: &'p Package, v: &mut V);
}

pub trait Visitor<'p> {
    /// Called for every type handle. The default descends into local nodes
    /// only; basic and universe types are leaves from a package's view.
    #[inline]
    fn visit_ty(&mut self, p: &'p Package, ty: Ty) {
        if let Ty::Local(id) = ty {
            p.type_node(id).walk(p, self);
        }
    }

    #[inline]
    fn visit_object(&mut self, p: &'p Package, id: ObjId) {
        let ty = p.object(id).ty;
        self.visit_ty(p, ty);
    }
}

impl<'p> Walk<'p> for Ty {
    #[inline]
    fn walk<V: Visitor<'p> + ?Sized>(&self, p: &'p Package, v: &mut V) {
        v.visit_ty(p, *self);
    }
}

impl<'p> Walk<'p> for ObjId {
    #[inline]
    fn walk<V: Visitor<'p> + ?Sized>(&self, p: &'p Package, v: &mut V) {
        v.visit_object(p, *self);
    }
}

/// Resolves a list reference against the package's side buffers.
pub trait ListSlice<T> {
    fn slice(&self, r: ListRef<T>) -> &[T];
}

impl ListSlice<Param> for Package {
    #[inline]
    fn slice(&self, r: ListRef<Param>) -> &[Param] {
        self.params(r)
    }
}

impl ListSlice<Field> for Package {
    #[inline]
    fn slice(&self, r: ListRef<Field>) -> &[Field] {
        self.fields(r)
    }
}

impl<'p, T> Walk<'p> for ListRef<T>
where
    Package: ListSlice<T>,
    T: Walk<'p> + 'p,
{
    #[inline]
    fn walk<V: Visitor<'p> + ?Sized>(&self, p: &'p Package, v: &mut V) {
        for item in p.slice(*self) {
            item.walk(p, v);
        }
    }
}

impl<'p, T: Walk<'p>> Walk<'p> for Option<T> {
    #[inline]
    fn walk<V: Visitor<'p> + ?Sized>(&self, p: &'p Package, v: &mut V) {
        if let Some(x) = self {
            x.walk(p, v);
        }
    }
}

impl<'p, T: Walk<'p>> Walk<'p> for Vec<T> {
    #[inline]
    fn walk<V: Visitor<'p> + ?Sized>(&self, p: &'p Package, v: &mut V) {
        for x in self {
            x.walk(p, v);
        }
    }
}

impl<'p, T: Walk<'p>> Walk<'p> for SmallVec<[T; 2]> {
    #[inline]
    fn walk<V: Visitor<'p> + ?Sized>(&self, p: &'p Package, v: &mut V) {
        for x in self {
            x.walk(p, v);
        }
    }
}

/// Collects every local type reachable from a set of roots, once each.
#[derive(Debug)]
pub(crate) struct Reachable {
    seen: Vec<bool>,
    order: Vec<crate::types::TypeId>,
}

impl Reachable {
    pub(crate) fn new(p: &Package) -> Self {
        Self {
            seen: vec![false; p.type_count()],
            order: Vec::new(),
        }
    }

    /// Local types in first-visit order.
    pub(crate) fn into_order(self) -> Vec<crate::types::TypeId> {
        self.order
    }
}

impl<'p> Visitor<'p> for Reachable {
    fn visit_ty(&mut self, p: &'p Package, ty: Ty) {
        let Ty::Local(id) = ty else {
            return;
        };
        let slot = &mut self.seen[id.to_usize()];
        if *slot {
            return;
        }
        *slot = true;
        self.order.push(id);
        p.type_node(id).walk(p, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChanDir, FieldDecl};

    fn local(ty: Ty) -> crate::types::TypeId {
        ty.local().unwrap()
    }

    #[test]
    fn reachable_follows_handles_through_every_node() {
        let mut pkg = Package::new("example.com/walk", "walk");
        let t = pkg.declare("T").unwrap();
        let elems = pkg.slice_of(Ty::INT);
        let m = pkg.map_of(Ty::STRING, elems);
        let ch = pkg.chan_of(ChanDir::SendOnly, m);
        let arr = pkg.array_of(ch, 4);
        let st = pkg.struct_of(&[FieldDecl::new("C", arr).with_tag("x")]);
        pkg.set_underlying(t, st).unwrap();
        let ptr = pkg.pointer_to(t);
        let sig = pkg.signature_of(Some(("t", ptr)), &[], &[("", ptr)], false);
        let method = pkg.new_func("Self", sig);
        pkg.add_method(t, method).unwrap();
        let stray = pkg.slice_of(Ty::BOOL);

        let mut reach = Reachable::new(&pkg);
        reach.visit_ty(&pkg, t);
        let order = reach.into_order();

        let expected: Vec<_> = [t, st, arr, ch, m, elems, sig, ptr]
            .into_iter()
            .map(local)
            .collect();
        assert_eq!(order, expected);
        assert!(!order.contains(&local(stray)));
    }
}
