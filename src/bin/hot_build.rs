// src/bin/hot_build.rs
use go125_stubs::{Registry, RegistryConfig};
use std::hint::black_box as bb;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ----------------- arg parsing -----------------

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    let mut it = args.iter();
    while let Some(a) = it.next() {
        if a == key {
            return it.next().map(|s| s.as_str());
        }
    }
    None
}

fn arg_usize(args: &[String], key: &str, default: usize) -> usize {
    arg_value(args, key)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn arg_f64(args: &[String], key: &str, default: f64) -> f64 {
    arg_value(args, key)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn arg_str<'a>(args: &'a [String], key: &str, default: &'a str) -> &'a str {
    arg_value(args, key).unwrap_or(default)
}

// ----------------- hot loop -----------------

/// Builds the packages under `filter` in a fresh registry and folds their
/// sizes. An eager registry still prebuilds all of them up front.
#[inline(never)]
fn build_once(config: &RegistryConfig, filter: &str) -> u64 {
    let registry = Registry::with_stdlib(config.clone());
    let mut checksum: u64 = 0;
    let mut n: u64 = 0;

    for path in registry.paths().into_iter().filter(|p| p.starts_with(filter)) {
        let Ok(pkg) = registry.package_for(path) else {
            continue;
        };
        let pkg = bb(pkg);
        n = n.wrapping_add(1);
        checksum ^= (pkg.type_count() as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        checksum ^= (pkg.scope().len() as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    }

    checksum ^ (n.wrapping_mul(0xD6E8_FEB8_6659_FD93))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let seconds = arg_f64(&args, "--seconds", 3.0);
    let threads = arg_usize(&args, "--threads", 0);
    let filter = arg_str(&args, "--filter", "");

    let mut config = match RegistryConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("hot_build: {err}");
            std::process::exit(2);
        }
    };
    if threads > 0 {
        config.eager = true;
        config.build_threads = threads;
    }

    let dur = Duration::from_secs_f64(seconds);
    let start = Instant::now();

    let mut iters: u64 = 0;
    let mut acc: u64 = 0;

    while start.elapsed() < dur {
        acc ^= build_once(&config, filter);
        iters += 1;
    }

    eprintln!(
        "hot_build done: iters={iters}, checksum={acc}, eager={}, threads={}, filter={filter:?}",
        config.eager, config.build_threads
    );
    bb(acc);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eager_and_lazy_builds_honor_the_filter() {
        let lazy = RegistryConfig::builder().eager(false).build().unwrap();
        let eager = RegistryConfig::builder()
            .eager(true)
            .build_threads(2)
            .build()
            .unwrap();

        let hashes = build_once(&lazy, "hash/");
        assert_eq!(build_once(&eager, "hash/"), hashes);
        assert_ne!(build_once(&eager, ""), hashes);
    }
}
