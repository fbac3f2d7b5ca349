//! The predeclared scope: basic type names, `error`, `any`, `comparable`,
//! `true`/`false`/`iota`/`nil` and the builtin functions.
//!
//! Built once per process with the ordinary package engine and shared
//! read-only. Other packages reach its types through `Ty::Universe` handles;
//! inside the universe package itself those same nodes are `Ty::Local`.

use std::sync::OnceLock;

use crate::basic::BasicKind;
use crate::error::Result;
use crate::object::{Builtin, ConstValue, ObjId};
use crate::package::Package;
use crate::types::Ty;

pub const UNIVERSE_PATH: &str = "universe";

#[derive(Debug)]
pub struct Universe {
    package: Package,
    error: Ty,
    any: Ty,
}

/// Re-tags a universe-local handle for use from another package.
#[inline]
fn exported(ty: Ty) -> Ty {
    match ty {
        Ty::Local(id) => Ty::Universe(id),
        other => other,
    }
}

static UNIVERSE: OnceLock<Universe> = OnceLock::new();

/// Returns the shared universe, building it on first use.
///
/// # Panics
/// Panics if the universe definition is malformed.
pub fn universe() -> &'static Universe {
    UNIVERSE.get_or_init(|| match Universe::build() {
        Ok(u) => u,
        Err(err) => panic!("failed to build the universe scope: {err}"),
    })
}

/// `error` as seen from any other package.
#[inline]
pub fn error_type() -> Ty {
    exported(universe().error)
}

/// `any`, the empty interface.
#[inline]
pub fn any_type() -> Ty {
    exported(universe().any)
}

impl Universe {
    fn build() -> Result<Self> {
        let mut p = Package::new(UNIVERSE_PATH, "universe");

        for kind in BasicKind::ALL {
            let basic = crate::basic::lookup(kind);
            if kind == BasicKind::Invalid || basic.is_untyped() || kind == BasicKind::UnsafePointer {
                continue;
            }
            let name = basic.name;
            let obj = p.new_type_name(name, Ty::Basic(kind));
            p.insert(obj)?;
        }

        // type error interface { Error() string }
        let error = p.declare("error")?;
        let error_sig = p.signature_of(None, &[], &[("", Ty::STRING)], false);
        let error_method = p.new_func("Error", error_sig);
        let error_iface = p.interface_of(&[error_method], &[]);
        p.complete_interface(error_iface)?;
        p.set_underlying(error, error_iface)?;
        if let Some(obj) = p.type_name_of(error) {
            p.insert(obj)?;
        }

        // type any = interface{}
        let any = p.interface_of(&[], &[]);
        p.complete_interface(any)?;
        let any_obj = p.new_type_name("any", any);
        p.insert(any_obj)?;

        let comparable = p.declare("comparable")?;
        let comparable_iface = p.interface_of(&[], &[]);
        p.complete_interface(comparable_iface)?;
        p.set_underlying(comparable, comparable_iface)?;
        if let Some(obj) = p.type_name_of(comparable) {
            p.insert(obj)?;
        }

        for (name, value) in [("true", true), ("false", false)] {
            let obj = p.new_const(name, Ty::UNTYPED_BOOL, ConstValue::Bool(value));
            p.insert(obj)?;
        }
        let iota = p.new_const("iota", Ty::UNTYPED_INT, ConstValue::Int(0));
        p.insert(iota)?;
        let nil = p.new_nil();
        p.insert(nil)?;

        for builtin in Builtin::UNIVERSE {
            let obj = p.new_builtin(builtin);
            p.insert(obj)?;
        }

        p.mark_complete()?;

        Ok(Universe {
            package: p,
            error,
            any,
        })
    }

    #[inline]
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Looks a predeclared identifier up.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<ObjId> {
        self.package.lookup(name)
    }
}
