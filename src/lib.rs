//! Synthetic, fully typed Go 1.25 standard library package stubs.
//!
//! - Packages are assembled with [`Package`] (or the [`PackageBuilder`] DSL),
//!   sealed, and served read-only from a [`Registry`].
//! - Consumers query them with [`identical`], [`implements`],
//!   [`num_methods`] and [`method_at`].
//! - Only declarations exist here; nothing is evaluated or executed.

pub mod arena;
pub mod basic;
pub mod builder;
pub mod config;
pub mod error;
pub mod object;
pub mod package;
pub mod predicates;
pub mod registry;
pub mod stdlib;
pub mod types;
pub mod universe;
pub mod walk;

// Re-exports for convenience
pub use basic::{Basic, BasicInfo, BasicKind};
pub use builder::PackageBuilder;
pub use config::{ConfigError, RegistryConfig};
pub use error::{RegistryError, StubError};
pub use object::{Builtin, ConstValue, ObjId, Object, ObjectKind, PackageId};
pub use package::{Package, Resolved};
pub use predicates::{identical, implements, lookup_method, method_at, method_set, num_methods, MethodRef};
pub use registry::Registry;
pub use types::{ChanDir, Completion, FieldDecl, RecvKind, Ty, Type, TypeId};
pub use universe::universe;
