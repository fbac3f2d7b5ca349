//! # Package assembler
//!
//! A [`Package`] owns everything declared in it: a name interner, an arena of
//! objects, an arena of types, side buffers for parameter and field lists,
//! and the insertion-ordered scope.
//!
//! ## Lifecycle
//!
//! 1. `Package::new` creates an open package.
//! 2. Builders allocate shapes, `declare` named types, `set_underlying`
//!    them, `add_method`s and `insert` objects into the scope.
//! 3. `mark_complete` validates every named type, completes every reachable
//!    interface and seals the package. Sealing twice is a no-op.
//!
//! Named types are two-phase: `declare` reserves identity before the shape
//! exists, so a type can mention itself (`func (x *Int) Add(y *Int) *Int`) or
//! a sibling declared later.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::arena::{self, Arena, Interner, ListRef, Symbol};
use crate::basic::{self, Basic};
use crate::error::{Result, StubError};
use crate::object::{Builtin, ConstValue, ObjId, Object, ObjectKind, PackageId, Scope};
use crate::types::{
    ChanDir, Completion, Field, FieldDecl, Interface, Method, Named, Param, RecvKind, Signature,
    Ty, Type, TypeId,
};
use crate::universe::universe;
use crate::walk::{Reachable, Visitor};

/// A type handle followed to its definition.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Basic(&'static Basic),
    Node {
        pkg: &'a Package,
        id: TypeId,
        node: &'a Type,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageState {
    Open,
    Sealed,
}

/// Side buffers that `ListRef`s point into.
#[derive(Debug, Default)]
struct ExtraData {
    params: Vec<Param>,
    fields: Vec<Field>,
}

/// A stub package and everything declared in it.
#[derive(Debug)]
pub struct Package {
    id: PackageId,
    path: Box<str>,
    name: Box<str>,
    names: Interner,
    objects: Arena<Object>,
    types: Arena<Type>,
    extras: ExtraData,
    scope: Scope,
    /// Named types in declaration order.
    declared: Vec<TypeId>,
    declared_names: HashMap<Symbol, TypeId>,
    state: PackageState,
}

impl Package {
    /// Creates an open package.
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            id: PackageId::fresh(),
            path: path.into(),
            name: name.into(),
            names: Interner::new(),
            objects: Arena::new(),
            types: Arena::new(),
            extras: ExtraData::default(),
            scope: Scope::new(),
            declared: Vec::new(),
            declared_names: HashMap::new(),
            state: PackageState::Open,
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> PackageId {
        self.id
    }

    /// Import path, e.g. `crypto/sha256`.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Package name, e.g. `sha256`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn state(&self) -> PackageState {
        self.state
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.state == PackageState::Sealed
    }

    #[inline]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    #[inline]
    pub fn object(&self, id: ObjId) -> &Object {
        &self.objects[id]
    }

    #[inline]
    pub fn object_name(&self, id: ObjId) -> &str {
        self.names.resolve(self.objects[id].name)
    }

    #[inline]
    pub fn type_node(&self, id: TypeId) -> &Type {
        &self.types[id]
    }

    #[inline]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn symbol_str(&self, sym: Symbol) -> &str {
        self.names.resolve(sym)
    }

    #[inline]
    pub fn params(&self, r: ListRef<Param>) -> &[Param] {
        arena::slice(&self.extras.params, r)
    }

    #[inline]
    pub fn fields(&self, r: ListRef<Field>) -> &[Field] {
        arena::slice(&self.extras.fields, r)
    }

    /// Looks `name` up in the package scope.
    pub fn lookup(&self, name: &str) -> Option<ObjId> {
        let sym = self.names.get(name)?;
        self.scope.get(sym)
    }

    /// Looks `name` up and returns its type, if declared.
    pub fn lookup_type(&self, name: &str) -> Option<Ty> {
        self.lookup(name).map(|id| self.objects[id].ty)
    }

    /// Named types declared in this package, in declaration order.
    pub fn named_types(&self) -> impl Iterator<Item = (TypeId, &Named)> + '_ {
        self.declared.iter().filter_map(|&id| match &self.types[id] {
            Type::Named(n) => Some((id, n)),
            _ => None,
        })
    }

    /// Follows a handle to its node, wherever it lives.
    ///
    /// The returned package is the one the node's own child handles are
    /// relative to: `self` for local handles, the universe for universe ones.
    pub fn resolve(&self, ty: Ty) -> Resolved<'_> {
        match ty {
            Ty::Basic(kind) => Resolved::Basic(basic::lookup(kind)),
            Ty::Local(id) => Resolved::Node {
                pkg: self,
                id,
                node: &self.types[id],
            },
            Ty::Universe(id) => {
                let pkg = universe().package();
                Resolved::Node {
                    pkg,
                    id,
                    node: pkg.type_node(id),
                }
            }
        }
    }

    /// The named node behind a local handle.
    pub fn named(&self, ty: Ty) -> Option<&Named> {
        self.types[ty.local()?].as_named()
    }

    /// The signature behind a func object.
    pub fn signature_of_func(&self, func: ObjId) -> Option<&Signature> {
        self.types[self.objects[func].ty.local()?].as_signature()
    }

    // ---------------------------------------------------------------------
    // Names
    // ---------------------------------------------------------------------

    #[inline]
    pub fn intern(&mut self, s: &str) -> Symbol {
        self.names.intern(s)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_sealed() {
            return Err(StubError::TypeSealed {
                package: self.path.to_string(),
            });
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Shape constructors
    //
    // Each call allocates a fresh node; nothing is deduplicated.
    // ---------------------------------------------------------------------

    pub fn pointer_to(&mut self, elem: Ty) -> Ty {
        Ty::Local(self.types.alloc(Type::Pointer { elem }))
    }

    pub fn slice_of(&mut self, elem: Ty) -> Ty {
        Ty::Local(self.types.alloc(Type::Slice { elem }))
    }

    pub fn array_of(&mut self, elem: Ty, len: u64) -> Ty {
        Ty::Local(self.types.alloc(Type::Array { elem, len }))
    }

    pub fn map_of(&mut self, key: Ty, elem: Ty) -> Ty {
        Ty::Local(self.types.alloc(Type::Map { key, elem }))
    }

    pub fn chan_of(&mut self, dir: ChanDir, elem: Ty) -> Ty {
        Ty::Local(self.types.alloc(Type::Chan { dir, elem }))
    }

    fn param_list(&mut self, vars: &[(&str, Ty)]) -> ListRef<Param> {
        let params: SmallVec<[Param; 8]> = vars
            .iter()
            .map(|&(name, ty)| Param {
                name: self.names.intern(name),
                ty,
            })
            .collect();
        arena::push_list(&mut self.extras.params, params)
    }

    pub fn tuple_of(&mut self, vars: &[(&str, Ty)]) -> Ty {
        let vars = self.param_list(vars);
        Ty::Local(self.types.alloc(Type::Tuple { vars }))
    }

    /// Function signature. With `variadic`, the last parameter must be a
    /// slice; it is written `...T` in Go source.
    pub fn signature_of(
        &mut self,
        recv: Option<(&str, Ty)>,
        params: &[(&str, Ty)],
        results: &[(&str, Ty)],
        variadic: bool,
    ) -> Ty {
        let recv = recv.map(|(name, ty)| Param {
            name: self.names.intern(name),
            ty,
        });
        let params = self.param_list(params);
        let results = self.param_list(results);
        debug_assert!(!variadic || !params.is_empty(), "variadic signature without parameters");
        Ty::Local(self.types.alloc(Type::Signature(Signature {
            recv,
            params,
            results,
            variadic,
        })))
    }

    pub fn struct_of(&mut self, fields: &[FieldDecl<'_>]) -> Ty {
        let fields: SmallVec<[Field; 8]> = fields
            .iter()
            .map(|f| Field {
                name: self.names.intern(f.name),
                ty: f.ty,
                embedded: f.embedded,
                tag: f.tag.map(|t| self.names.intern(t)),
            })
            .collect();
        let fields = arena::push_list(&mut self.extras.fields, fields);
        Ty::Local(self.types.alloc(Type::Struct { fields }))
    }

    /// Allocates an open interface. `methods` are func objects created with
    /// [`Package::new_func`] from receiver-less signatures.
    pub fn interface_of(&mut self, methods: &[ObjId], embeddeds: &[Ty]) -> Ty {
        Ty::Local(self.types.alloc(Type::Interface(Interface {
            methods: methods.to_vec(),
            embeddeds: embeddeds.iter().copied().collect(),
            state: Completion::Open,
        })))
    }

    fn interface_mut(&mut self, iface: Ty) -> Result<&mut Interface> {
        match iface.local().map(|id| &mut self.types[id]) {
            Some(Type::Interface(i)) => Ok(i),
            _ => Err(StubError::NotAnInterface {
                package: self.path.to_string(),
            }),
        }
    }

    /// Appends a method to an open interface.
    pub fn add_interface_method(&mut self, iface: Ty, func: ObjId) -> Result<()> {
        self.ensure_open()?;
        let method = self.object_name(func).to_string();
        let package = self.path.to_string();
        let i = self.interface_mut(iface)?;
        if i.is_complete() {
            return Err(StubError::InterfaceSealed { package, method });
        }
        i.methods.push(func);
        Ok(())
    }

    /// Transitions an interface, and the local interfaces it embeds, to
    /// `Completed`. Completing twice is harmless.
    pub fn complete_interface(&mut self, iface: Ty) -> Result<()> {
        let mut pending = vec![iface];
        while let Some(ty) = pending.pop() {
            let i = self.interface_mut(ty)?;
            if i.is_complete() {
                continue;
            }
            i.state = Completion::Completed;
            let embeddeds = i.embeddeds.clone();
            for e in embeddeds {
                if let Some(inner) = self.local_interface_of(e) {
                    pending.push(inner);
                }
            }
        }
        Ok(())
    }

    /// The local interface node behind `ty`, looking through a local named
    /// type. Universe interfaces are already complete and yield `None`.
    fn local_interface_of(&self, ty: Ty) -> Option<Ty> {
        let id = ty.local()?;
        match &self.types[id] {
            Type::Interface(_) => Some(ty),
            Type::Named(n) => {
                let u = n.underlying?;
                match &self.types[u.local()?] {
                    Type::Interface(_) => Some(u),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    // ---------------------------------------------------------------------
    // Objects
    // ---------------------------------------------------------------------

    fn alloc_object(&mut self, name: &str, ty: Ty, kind: ObjectKind) -> ObjId {
        let pkg = match kind {
            ObjectKind::Nil | ObjectKind::Builtin(_) => None,
            _ => Some(self.id),
        };
        let name = self.names.intern(name);
        self.objects.alloc(Object { name, ty, pkg, kind })
    }

    pub fn new_const(&mut self, name: &str, ty: Ty, value: ConstValue) -> ObjId {
        self.alloc_object(name, ty, ObjectKind::Const(value))
    }

    pub fn new_var(&mut self, name: &str, ty: Ty) -> ObjId {
        self.alloc_object(name, ty, ObjectKind::Var)
    }

    /// Function or method object; `sig` must be a signature.
    pub fn new_func(&mut self, name: &str, sig: Ty) -> ObjId {
        debug_assert!(
            sig.local().is_some_and(|id| self.types[id].as_signature().is_some()),
            "func {name} needs a local signature"
        );
        self.alloc_object(name, sig, ObjectKind::Func)
    }

    /// Type name bound directly to `ty` (an alias, or a basic type name).
    pub fn new_type_name(&mut self, name: &str, ty: Ty) -> ObjId {
        self.alloc_object(name, ty, ObjectKind::TypeName)
    }

    pub fn new_label(&mut self, name: &str) -> ObjId {
        self.alloc_object(name, Ty::INVALID, ObjectKind::Label)
    }

    pub fn new_pkg_name(&mut self, name: &str, imported: &str) -> ObjId {
        self.alloc_object(
            name,
            Ty::INVALID,
            ObjectKind::PkgName {
                imported: imported.into(),
            },
        )
    }

    pub fn new_builtin(&mut self, builtin: Builtin) -> ObjId {
        self.alloc_object(builtin.name(), Ty::INVALID, ObjectKind::Builtin(builtin))
    }

    pub fn new_nil(&mut self) -> ObjId {
        self.alloc_object("nil", Ty::UNTYPED_NIL, ObjectKind::Nil)
    }

    /// Adds an object to the scope.
    pub fn insert(&mut self, obj: ObjId) -> Result<()> {
        self.ensure_open()?;
        let name = self.objects[obj].name;
        self.scope
            .insert(name, obj)
            .map_err(|_| StubError::DuplicateName {
                package: self.path.to_string(),
                name: self.names.resolve(name).to_string(),
            })?;
        tracing::trace!(
            target: "stubs.package",
            package = %self.path,
            name = self.names.resolve(name),
            kind = self.objects[obj].kind_name(),
            "insert"
        );
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Named types
    // ---------------------------------------------------------------------

    /// Reserves a named type's identity. The underlying shape is supplied
    /// later with [`Package::set_underlying`]. The type name is not inserted
    /// into the scope.
    pub fn declare(&mut self, name: &str) -> Result<Ty> {
        self.ensure_open()?;
        let sym = self.names.intern(name);
        if self.declared_names.contains_key(&sym) {
            return Err(StubError::DuplicateName {
                package: self.path.to_string(),
                name: name.to_string(),
            });
        }
        // Object and node point at each other; allocate the object with a
        // placeholder type and patch it once the node id is known.
        let obj = self.alloc_object(name, Ty::INVALID, ObjectKind::TypeName);
        let id = self.types.alloc(Type::Named(Named {
            obj,
            underlying: None,
            methods: Vec::new(),
        }));
        self.objects[obj].ty = Ty::Local(id);
        self.declared.push(id);
        self.declared_names.insert(sym, id);
        Ok(Ty::Local(id))
    }

    /// The `TypeName` object of a declared named type.
    pub fn type_name_of(&self, named: Ty) -> Option<ObjId> {
        self.named(named).map(|n| n.obj)
    }

    fn named_mut(&mut self, named: Ty) -> Option<&mut Named> {
        match &mut self.types[named.local()?] {
            Type::Named(n) => Some(n),
            _ => None,
        }
    }

    /// Fixes the underlying shape of a declared named type, exactly once.
    pub fn set_underlying(&mut self, named: Ty, shape: Ty) -> Result<()> {
        self.ensure_open()?;
        let package = self.path.to_string();
        let n = self
            .named_mut(named)
            .ok_or_else(|| StubError::IncompleteType {
                package: package.clone(),
                name: format!("{named:?}"),
            })?;
        if n.underlying.is_some() {
            let obj = n.obj;
            return Err(StubError::UnderlyingAlreadySet {
                package,
                name: self.object_name(obj).to_string(),
            });
        }
        n.underlying = Some(shape);
        Ok(())
    }

    /// Attaches a method to a named type.
    ///
    /// The receiver of `func`'s signature decides the method set: `T` puts
    /// it in the value set, `*T` in the pointer set.
    pub fn add_method(&mut self, named: Ty, func: ObjId) -> Result<()> {
        self.ensure_open()?;
        let method = self.object_name(func).to_string();
        let Some(n) = self.named(named) else {
            return Err(StubError::InvalidReceiver {
                package: self.path.to_string(),
                type_name: format!("{named:?}"),
                method,
            });
        };
        let type_name = self.object_name(n.obj).to_string();
        let invalid = || StubError::InvalidReceiver {
            package: self.path.to_string(),
            type_name: type_name.clone(),
            method: method.clone(),
        };

        let recv_ty = self
            .signature_of_func(func)
            .and_then(|sig| sig.recv)
            .map(|r| r.ty)
            .ok_or_else(invalid)?;
        let recv = if recv_ty == named {
            RecvKind::Value
        } else {
            match recv_ty.local().map(|id| &self.types[id]) {
                Some(Type::Pointer { elem }) if *elem == named => RecvKind::Pointer,
                _ => return Err(invalid()),
            }
        };

        // T and *T share one method namespace.
        let name = self.objects[func].name;
        let duplicate = n.methods.iter().any(|m| self.objects[m.func].name == name);
        if duplicate {
            return Err(StubError::DuplicateMethod {
                package: self.path.to_string(),
                type_name,
                method,
            });
        }

        if let Some(n) = self.named_mut(named) {
            n.methods.push(Method { func, recv });
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Sealing
    // ---------------------------------------------------------------------

    /// True if following `underlying` from `id` through local named types
    /// never reaches a non-named shape.
    fn underlying_cycles(&self, id: TypeId) -> bool {
        let mut cur = id;
        for _ in 0..=self.declared.len() {
            match &self.types[cur] {
                Type::Named(n) => match n.underlying.and_then(Ty::local) {
                    Some(next) => cur = next,
                    None => return false,
                },
                _ => return false,
            }
        }
        true
    }

    /// Validates and seals the package.
    ///
    /// Fails with `IncompleteType` if a declared named type never got an
    /// underlying shape, or if its underlying chain only leads through other
    /// named types back to itself. Every open interface reachable from the
    /// scope or a named type is completed. Sealing an already sealed package
    /// is a no-op.
    pub fn mark_complete(&mut self) -> Result<()> {
        if self.is_sealed() {
            tracing::trace!(target: "stubs.package", package = %self.path, "already sealed");
            return Ok(());
        }

        for &id in &self.declared {
            if let Type::Named(n) = &self.types[id] {
                if n.underlying.is_none() {
                    return Err(StubError::IncompleteType {
                        package: self.path.to_string(),
                        name: self.object_name(n.obj).to_string(),
                    });
                }
            }
        }
        for &id in &self.declared {
            if self.underlying_cycles(id) {
                let name = match &self.types[id] {
                    Type::Named(n) => self.object_name(n.obj).to_string(),
                    _ => format!("{id:?}"),
                };
                return Err(StubError::IncompleteType {
                    package: self.path.to_string(),
                    name,
                });
            }
        }

        let mut reach = Reachable::new(self);
        for &obj in self.scope.objects() {
            reach.visit_object(self, obj);
        }
        for &id in &self.declared {
            reach.visit_ty(self, Ty::Local(id));
        }
        let mut completed = 0usize;
        for id in reach.into_order() {
            if let Type::Interface(i) = &mut self.types[id] {
                if !i.is_complete() {
                    i.state = Completion::Completed;
                    completed += 1;
                }
            }
        }

        self.state = PackageState::Sealed;
        tracing::debug!(
            target: "stubs.package",
            package = %self.path,
            objects = self.scope.len(),
            named = self.declared.len(),
            types = self.types.len(),
            completed_interfaces = completed,
            "sealed"
        );
        Ok(())
    }
}
