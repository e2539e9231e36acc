// glbind/src/functions.rs
//
//! A loaded function table with the few queries every GL client needs.

use crate::catalog::Catalog;
use crate::extensions::ExtensionSet;
use crate::gl::types::{GLboolean, GLchar, GLenum, GLint, GLsizei, GLuint};
use crate::gl::{self, Gl};
use crate::info::{GLApi, GLVersion};
use crate::loader::{self, LoadOptions, LoadReport};
use crate::marshal::{self, GlStringArray};
use crate::{Error, GLError};

#[cfg(system_library)]
use crate::library::SystemLibrary;

use std::ops::Deref;
use std::os::raw::c_void;

// Each distinct error flag is queued once, so a context can't hold more than a handful.
const MAX_QUEUED_ERRORS: usize = 16;

/// Resolved GL function pointers plus a record of how they were resolved.
///
/// Dereferences to the generated [`Gl`] table for direct (unsafe) calls.
pub struct GlFunctions {
    gl: Gl,
    report: LoadReport,
}

impl GlFunctions {
    /// Loads every declaration through `loadfn`, with fallbacks.
    pub fn load_with<F>(loadfn: F) -> Result<GlFunctions, Error>
    where
        F: FnMut(&str) -> *const c_void,
    {
        GlFunctions::load_with_options(loadfn, &LoadOptions::default())
    }

    pub fn load_with_options<F>(loadfn: F, options: &LoadOptions) -> Result<GlFunctions, Error>
    where
        F: FnMut(&str) -> *const c_void,
    {
        let (gl, report) = loader::load_with(loadfn, options)?;
        Ok(GlFunctions { gl, report })
    }

    /// Loads from the platform's GL library. A context must be current on this thread.
    #[cfg(system_library)]
    pub fn load_system() -> Result<GlFunctions, Error> {
        let library = SystemLibrary::shared()?;
        GlFunctions::load_with(|symbol| library.get_proc_address(symbol))
    }

    #[inline]
    pub fn gl(&self) -> &Gl {
        &self.gl
    }

    #[inline]
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Whether the command (by name or symbol) resolved.
    #[inline]
    pub fn supports(&self, name: &str) -> bool {
        self.report.is_loaded(name)
    }

    fn require(&self, name: &'static str) -> Result<(), Error> {
        if self.report.is_loaded(name) {
            return Ok(());
        }
        let symbol = Catalog::global().lookup(name).map_or(name, |command| command.symbol);
        Err(Error::GLFunctionNotFound(symbol))
    }

    /// Pops one error flag. `None` if there was none or `glGetError` isn't available.
    pub fn get_error(&self) -> Option<GLError> {
        if !self.supports("GetError") {
            return None;
        }
        GLError::from_gl(unsafe { self.gl.GetError() })
    }

    /// Drains the error queue, returning the first error. Later ones are logged.
    pub fn check_error(&self) -> Result<(), Error> {
        let first = match self.get_error() {
            Some(error) => error,
            None => return Ok(()),
        };
        for _ in 1..MAX_QUEUED_ERRORS {
            match self.get_error() {
                Some(error) => warn!("additional GL error queued: {}", error),
                None => break,
            }
        }
        Err(Error::GL(first))
    }

    /// `glGetString`. `Ok(None)` if GL returned null.
    pub fn get_string(&self, name: GLenum) -> Result<Option<String>, Error> {
        self.require("GetString")?;
        unsafe { Ok(marshal::from_gl_string(self.gl.GetString(name))) }
    }

    /// `glGetStringi`.
    pub fn get_string_i(&self, name: GLenum, index: GLuint) -> Result<Option<String>, Error> {
        self.require("GetStringi")?;
        unsafe { Ok(marshal::from_gl_string(self.gl.GetStringi(name, index))) }
    }

    pub fn get_integer(&self, name: GLenum) -> Result<GLint, Error> {
        self.require("GetIntegerv")?;
        let mut value = 0;
        unsafe {
            self.gl.GetIntegerv(name, &mut value);
        }
        Ok(value)
    }

    pub fn get_boolean(&self, name: GLenum) -> Result<bool, Error> {
        self.require("GetBooleanv")?;
        let mut value: GLboolean = gl::FALSE;
        unsafe {
            self.gl.GetBooleanv(name, &mut value);
        }
        Ok(marshal::from_gl_boolean(value))
    }

    /// The API and version of the current context, from `GL_VERSION`.
    pub fn version(&self) -> Result<(GLApi, GLVersion), Error> {
        let version_string = self.get_string(gl::VERSION)?.ok_or(Error::Failed)?;
        GLVersion::parse(&version_string)
    }

    /// The extensions the current context advertises.
    ///
    /// Uses the indexed query where the context has it; core profile contexts no longer accept
    /// `glGetString(GL_EXTENSIONS)`.
    pub fn extensions(&self) -> Result<ExtensionSet, Error> {
        let (_, version) = self.version()?;
        if version.has_indexed_extensions() && self.supports("GetStringi") {
            let count = self.get_integer(gl::NUM_EXTENSIONS)?.max(0) as GLuint;
            let mut extensions = ExtensionSet::new();
            for index in 0..count {
                if let Some(name) = self.get_string_i(gl::EXTENSIONS, index)? {
                    extensions.insert(&name);
                }
            }
            return Ok(extensions);
        }

        let extensions = self.get_string(gl::EXTENSIONS)?.unwrap_or_default();
        Ok(ExtensionSet::from_extension_string(&extensions))
    }

    /// `glShaderSource` with lengths, so sources need no terminator.
    pub fn shader_source(&self, shader: GLuint, sources: &[&str]) -> Result<(), Error> {
        self.require("ShaderSource")?;
        let sources = GlStringArray::new(sources.iter().copied())?;
        unsafe {
            self.gl.ShaderSource(shader, sources.count(), sources.as_ptr(), sources.lengths_ptr());
        }
        Ok(())
    }

    pub fn shader_info_log(&self, shader: GLuint) -> Result<String, Error> {
        self.require("GetShaderiv")?;
        self.require("GetShaderInfoLog")?;
        unsafe {
            let mut capacity = 0;
            self.gl.GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut capacity);
            let mut buffer = vec![0u8; capacity.max(1) as usize];
            let mut written: GLsizei = 0;
            self.gl.GetShaderInfoLog(shader,
                                     buffer.len() as GLsizei,
                                     &mut written,
                                     buffer.as_mut_ptr() as *mut GLchar);
            Ok(marshal::out_string(&buffer, written))
        }
    }

    /// `glGetUniformLocation`. `None` when the program has no active uniform by that name.
    pub fn uniform_location(&self, program: GLuint, name: &str) -> Result<Option<GLint>, Error> {
        self.require("GetUniformLocation")?;
        let name = marshal::to_gl_string(name)?;
        let location = unsafe { self.gl.GetUniformLocation(program, name.as_ptr() as *const GLchar) };
        Ok(if location < 0 { None } else { Some(location) })
    }
}

impl Deref for GlFunctions {
    type Target = Gl;

    #[inline]
    fn deref(&self) -> &Gl {
        &self.gl
    }
}
