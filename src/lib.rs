//! OpenGL and OpenGL ES entry point declarations.
//!
//! Every native GL command (core and the vendor extensions listed in the build script) is
//! declared once, mechanically, from the Khronos registry: a function name, the native symbol
//! it resolves to, and its parameter types. The declarations are available two ways:
//!
//! * as callable function pointers on [`gl::Gl`], resolved at runtime through a loader
//!   closure (see [`loader`] and [`GlFunctions`]);
//! * as data in the [`Catalog`], where each [`CommandDecl`] carries enough type information
//!   to describe how its arguments are marshaled (strings, booleans, arrays, out pointers).
//!
//! This crate does not create contexts. Use a windowing or surface library for that, make a
//! context current, and then load the function pointers.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod catalog;
pub use crate::catalog::{Catalog, CommandDecl, ParamDecl};

pub mod error;
pub use crate::error::{Error, GLError};

mod extensions;
pub use crate::extensions::ExtensionSet;

mod functions;
pub use crate::functions::GlFunctions;

mod info;
pub use crate::info::{GLApi, GLVersion};

#[cfg(system_library)]
pub mod library;
#[cfg(system_library)]
pub use crate::library::SystemLibrary;

pub mod loader;
pub use crate::loader::{LoadOptions, LoadReport};

pub mod marshal;
pub use crate::marshal::{Marshal, MarshalFlags, NativeType, ReturnMarshal};

pub mod suffix;
pub use crate::suffix::{ExtensionSuffix, Tier};

/// The generated declarations: type aliases, enum constants, and the `Gl` function table.
#[allow(clippy::all, missing_docs, non_upper_case_globals)]
pub mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

#[cfg(test)]
mod tests;
