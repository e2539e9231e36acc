// glbind/src/loader.rs
//
//! Resolving the declarations to function pointers at runtime.
//!
//! The caller supplies the symbol source, usually the windowing system's `GetProcAddress`
//! equivalent with a context current. Each declaration's primary symbol is tried first, then,
//! when enabled, its fallback symbols in order.

use crate::catalog::{Catalog, CommandDecl};
use crate::gl::Gl;
use crate::Error;

use fnv::FnvHashMap;
use std::os::raw::c_void;
use std::ptr;

/// Runtime loading configuration.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Try a declaration's fallback symbols when its primary symbol doesn't resolve. On by
    /// default.
    pub fallbacks: bool,
    /// Commands (by name or symbol) that must resolve for loading to succeed.
    pub required: Vec<&'static str>,
}

impl Default for LoadOptions {
    fn default() -> LoadOptions {
        LoadOptions { fallbacks: true, required: vec![] }
    }
}

impl LoadOptions {
    /// Only primary symbols, nothing required.
    #[inline]
    pub fn strict() -> LoadOptions {
        LoadOptions { fallbacks: false, required: vec![] }
    }

    #[inline]
    pub fn require(mut self, command: &'static str) -> LoadOptions {
        self.required.push(command);
        self
    }
}

/// How one declaration was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Primary,
    /// Resolved through the named fallback symbol.
    Fallback(&'static str),
    Missing,
}

/// The outcome of loading every declaration.
#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    resolutions: FnvHashMap<&'static str, Resolution>,
    loaded: usize,
    via_fallback: Vec<(&'static str, &'static str)>,
    missing: Vec<&'static str>,
}

impl LoadReport {
    fn record(&mut self, command: &'static CommandDecl, resolution: Resolution) {
        match resolution {
            Resolution::Primary => self.loaded += 1,
            Resolution::Fallback(symbol) => {
                self.loaded += 1;
                self.via_fallback.push((command.name, symbol));
            }
            Resolution::Missing => self.missing.push(command.name),
        }
        self.resolutions.insert(command.name, resolution);
    }

    /// How many declarations resolved, directly or through a fallback.
    #[inline]
    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    /// `(command name, symbol used)` for declarations resolved through a fallback.
    #[inline]
    pub fn via_fallback(&self) -> &[(&'static str, &'static str)] {
        &self.via_fallback
    }

    /// Names of declarations that didn't resolve.
    #[inline]
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    /// The resolution of a command, by name or symbol. `None` for names that aren't declared.
    pub fn resolution(&self, name: &str) -> Option<Resolution> {
        let command = Catalog::global().lookup(name)?;
        self.resolutions.get(command.name).copied()
    }

    #[inline]
    pub fn is_loaded(&self, name: &str) -> bool {
        matches!(self.resolution(name), Some(Resolution::Primary | Resolution::Fallback(_)))
    }
}

/// Resolves every declaration through `loadfn`.
///
/// `loadfn` receives a symbol name and returns its address, or null if it doesn't exist.
/// Unresolved declarations are not an error unless listed in `options.required`; calling one
/// panics.
pub fn load_with<F>(mut loadfn: F, options: &LoadOptions) -> Result<(Gl, LoadReport), Error>
where
    F: FnMut(&str) -> *const c_void,
{
    let catalog = Catalog::global();
    let mut report = LoadReport::default();

    let gl = Gl::load_with(|symbol| {
        let command = match catalog.lookup(symbol) {
            Some(command) => command,
            None => {
                // Not declared in the catalog; shouldn't happen with generated tables.
                debug!("loading undeclared symbol {}", symbol);
                return loadfn(symbol);
            }
        };
        let (address, resolution) = resolve(command, &mut loadfn, options.fallbacks);
        report.record(command, resolution);
        address
    });

    debug!("resolved {} of {} GL commands ({} through fallbacks)",
           report.loaded,
           catalog.len(),
           report.via_fallback.len());

    for &required in &options.required {
        let command = catalog.get(required)?;
        if !report.is_loaded(command.name) {
            warn!("required GL command {} could not be resolved", command.symbol);
            return Err(Error::GLFunctionNotFound(command.symbol));
        }
    }

    Ok((gl, report))
}

fn resolve<F>(command: &'static CommandDecl, loadfn: &mut F, fallbacks: bool)
              -> (*const c_void, Resolution)
where
    F: FnMut(&str) -> *const c_void,
{
    let address = loadfn(command.symbol);
    if !address.is_null() {
        trace!("{} -> {:p}", command.symbol, address);
        return (address, Resolution::Primary);
    }

    if fallbacks {
        for &fallback in command.fallbacks {
            let address = loadfn(fallback);
            if !address.is_null() {
                trace!("{} -> {:p} (via {})", command.symbol, address, fallback);
                return (address, Resolution::Fallback(fallback));
            }
        }
    }

    trace!("{} unresolved", command.symbol);
    (ptr::null(), Resolution::Missing)
}
