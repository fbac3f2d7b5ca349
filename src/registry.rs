//! Import path → stub package.
//!
//! Each registered path owns a builder and a once-cell. The first
//! `package_for` runs the builder; every later call hands out the same
//! `Arc`. Builders never share state, so an eager prebuild fans them out over
//! scoped worker threads.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, StubError};
use crate::package::Package;

/// Builds one sealed stub package.
pub type BuildFn = fn() -> Result<Package, StubError>;

#[derive(Debug)]
struct Entry {
    build: BuildFn,
    cell: OnceLock<Arc<Package>>,
}

#[derive(Debug)]
pub struct Registry {
    entries: HashMap<&'static str, Entry>,
    config: RegistryConfig,
}

impl Registry {
    /// An empty registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
        }
    }

    /// A registry holding every emulated standard library package. With
    /// `config.eager` all of them are built before this returns.
    pub fn with_stdlib(config: RegistryConfig) -> Self {
        let mut registry = Self::new(config);
        crate::stdlib::register_all(&mut registry);
        tracing::debug!(
            target: "stubs.registry",
            packages = registry.len(),
            eager = registry.config.eager,
            "registered standard library stubs"
        );
        if registry.config.eager {
            registry.prebuild();
        }
        registry
    }

    #[inline]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers `build` under `path`, replacing any earlier builder.
    /// Returns `true` if a builder was replaced.
    pub fn register(&mut self, path: &'static str, build: BuildFn) -> bool {
        let replaced = self
            .entries
            .insert(
                path,
                Entry {
                    build,
                    cell: OnceLock::new(),
                },
            )
            .is_some();
        if replaced {
            tracing::warn!(target: "stubs.registry", path, "builder replaced");
        }
        replaced
    }

    /// Returns the sealed package for `path`, building it on first request.
    ///
    /// # Panics
    /// Panics if the package's builder fails or returns an unsealed package;
    /// a broken stub is a defect, not a condition to recover from.
    pub fn package_for(&self, path: &str) -> Result<Arc<Package>, RegistryError> {
        let Some((&key, entry)) = self.entries.get_key_value(path) else {
            tracing::debug!(target: "stubs.registry", path, "unsupported import");
            return Err(RegistryError::NotFound(path.to_string()));
        };
        Ok(Arc::clone(Self::built(key, entry)))
    }

    fn built<'a>(path: &'static str, entry: &'a Entry) -> &'a Arc<Package> {
        entry.cell.get_or_init(|| {
            let start = Instant::now();
            let pkg = match (entry.build)() {
                Ok(pkg) => pkg,
                Err(err) => {
                    tracing::error!(target: "stubs.registry", path, kind = err.kind(), %err, "stub build failed");
                    panic!("stub package {path:?} failed to build: {err}");
                }
            };
            assert!(pkg.is_sealed(), "stub package {path:?} was not sealed by its builder");
            assert_eq!(pkg.path(), path, "stub builder registered under the wrong path");
            tracing::debug!(
                target: "stubs.registry",
                path,
                objects = pkg.scope().len(),
                types = pkg.type_count(),
                elapsed_us = start.elapsed().as_micros() as u64,
                "built"
            );
            Arc::new(pkg)
        })
    }

    /// Builds every registered package that is not built yet, using up to
    /// `build_threads` workers. Returns the number of built packages.
    pub fn prebuild(&self) -> usize {
        let paths = self.paths();
        let workers = self.config.build_threads.clamp(1, paths.len().max(1));
        let next = AtomicUsize::new(0);
        let start = Instant::now();

        std::thread::scope(|s| {
            for _ in 0..workers {
                s.spawn(|| loop {
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    let Some(&path) = paths.get(i) else {
                        break;
                    };
                    if let Some(entry) = self.entries.get(path) {
                        Self::built(path, entry);
                    }
                });
            }
        });

        let built = self.built_count();
        tracing::info!(
            target: "stubs.registry",
            built,
            workers,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "prebuild finished"
        );
        built
    }

    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Registered import paths, sorted.
    pub fn paths(&self) -> Vec<&'static str> {
        let mut paths: Vec<_> = self.entries.keys().copied().collect();
        paths.sort_unstable();
        paths
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of packages whose builder has already run.
    pub fn built_count(&self) -> usize {
        self.entries.values().filter(|e| e.cell.get().is_some()).count()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_stdlib(RegistryConfig::default())
    }
}
