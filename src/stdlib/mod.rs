//! Builders for the emulated standard library packages.
//!
//! Each builder is a plain `fn() -> Result<Package>` that allocates
//! everything it references. Types owned by packages outside the one being
//! built are replaced by structural stand-ins (`io.Reader`, `hash.Hash`,
//! `cipher.Block`) or an opaque `*struct{}`.

mod compress;
mod container;
mod crypto;
mod encoding;
mod hash;
mod lang;
mod math;

use crate::registry::Registry;

/// Registers every emulated package with `registry`.
pub fn register_all(registry: &mut Registry) {
    crypto::register(registry);
    encoding::register(registry);
    math::register(registry);
    container::register(registry);
    hash::register(registry);
    compress::register(registry);
    lang::register(registry);
}
