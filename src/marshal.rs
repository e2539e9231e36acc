// glbind/src/marshal.rs
//
//! How arguments and results cross the native boundary.
//!
//! Each parameter type in the declaration list is a Rust FFI type string (`*const
//! types::GLchar`, `types::GLboolean`, ...). Parsing it gives a [`NativeType`], and from that
//! a [`Marshal`] class: whether the argument is a plain value, a boolean, a NUL-terminated
//! string, an array the caller fills in, and so on. The helpers at the bottom do the matching
//! conversions at runtime.

use crate::gl;
use crate::gl::types::{GLboolean, GLchar, GLint, GLsizei, GLubyte};
use crate::Error;

use std::ffi::{CStr, CString};
use std::fmt::{self, Display, Formatter};
use std::os::raw::c_char;
use std::ptr;

/// Every declared command is called with the platform's system calling convention: `stdcall`
/// on 32-bit Windows, the C convention elsewhere.
pub const CALLING_CONVENTION: &str = "system";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutability {
    Const,
    Mut,
}

/// The pointee or value type with indirection removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseType<'a> {
    /// `()`, only as a return type.
    Unit,
    /// `c_void`, only behind a pointer.
    Void,
    Boolean,
    Char,
    UByte,
    Integer(&'a str),
    Float(&'a str),
    Enum,
    Bitfield,
    /// Opaque driver objects passed by value: sync objects, EGL images, CL interop handles.
    Handle(&'a str),
    /// Debug message callbacks and similar function pointers.
    Callback(&'a str),
    Other(&'a str),
}

impl<'a> BaseType<'a> {
    fn classify(name: &'a str) -> BaseType<'a> {
        match name {
            "()" => BaseType::Unit,
            "c_void" => BaseType::Void,
            "GLboolean" => BaseType::Boolean,
            "GLchar" | "GLcharARB" => BaseType::Char,
            "GLubyte" => BaseType::UByte,
            "GLenum" => BaseType::Enum,
            "GLbitfield" => BaseType::Bitfield,
            "GLfloat" | "GLdouble" | "GLclampf" | "GLclampd" | "GLhalf" | "GLhalfARB"
            | "GLhalfNV" => BaseType::Float(name),
            "GLbyte" | "GLshort" | "GLushort" | "GLint" | "GLuint" | "GLsizei" | "GLint64"
            | "GLuint64" | "GLint64EXT" | "GLuint64EXT" | "GLintptr" | "GLsizeiptr"
            | "GLintptrARB" | "GLsizeiptrARB" | "GLfixed" | "GLclampx"
            | "GLvdpauSurfaceNV" => BaseType::Integer(name),
            "GLsync" | "GLeglImageOES" | "GLeglClientBufferEXT" | "GLhandleARB"
            | "_cl_context" | "_cl_event" => BaseType::Handle(name),
            _ if name.contains("PROC") => BaseType::Callback(name),
            _ => BaseType::Other(name),
        }
    }
}

/// A parsed parameter or return type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeType<'a> {
    /// The type name with module paths stripped, e.g. `GLuint` or `c_void`.
    pub name: &'a str,
    pub base: BaseType<'a>,
    /// Pointer levels, outermost first.
    pub pointers: Vec<Mutability>,
}

impl<'a> NativeType<'a> {
    /// Parses a declaration type string such as `*const *const types::GLchar`.
    pub fn parse(ty: &'a str) -> NativeType<'a> {
        let mut rest = ty.trim();
        let mut pointers = vec![];
        loop {
            if let Some(inner) = rest.strip_prefix("*const ") {
                pointers.push(Mutability::Const);
                rest = inner.trim_start();
            } else if let Some(inner) = rest.strip_prefix("*mut ") {
                pointers.push(Mutability::Mut);
                rest = inner.trim_start();
            } else {
                break;
            }
        }

        let name = rest.rsplit("::").next().unwrap_or(rest);
        NativeType { name, base: BaseType::classify(name), pointers }
    }

    #[inline]
    pub fn is_pointer(&self) -> bool {
        !self.pointers.is_empty()
    }

    /// Classifies this type as a parameter.
    pub fn param_marshal(&self) -> Marshal {
        use self::Mutability::{Const, Mut};
        match (self.pointers.as_slice(), self.base) {
            ([], BaseType::Boolean) => Marshal::Bool,
            ([], BaseType::Callback(_)) => Marshal::Callback,
            ([], _) => Marshal::Value,
            ([_], BaseType::Void) => Marshal::Pointer,
            ([Const], BaseType::Char) => Marshal::InString,
            ([Mut], BaseType::Char) => Marshal::OutString,
            ([Const], _) => Marshal::InArray,
            ([Mut], _) => Marshal::OutArray,
            ([Const, Const], BaseType::Char) => Marshal::InStringArray,
            // `void **params` and the like: GL writes through the innermost level.
            ([.., Mut], _) => Marshal::OutArray,
            ([Const, ..], _) => Marshal::InArray,
            ([Mut, ..], _) => Marshal::OutArray,
        }
    }

    /// Classifies this type as a return value.
    pub fn return_marshal(&self) -> ReturnMarshal {
        match (self.pointers.as_slice(), self.base) {
            ([], BaseType::Unit) => ReturnMarshal::Void,
            ([], BaseType::Boolean) => ReturnMarshal::Bool,
            ([], BaseType::Handle(_)) => ReturnMarshal::Handle,
            ([], _) => ReturnMarshal::Value,
            ([Mutability::Const], BaseType::UByte) | ([Mutability::Const], BaseType::Char) => {
                ReturnMarshal::String
            }
            (_, _) => ReturnMarshal::Pointer,
        }
    }

    /// Renders the type the way it would be written in an `extern` block, with the generated
    /// module paths dropped (`*const GLchar`).
    pub fn to_rust(&self) -> String {
        let mut out = String::new();
        for mutability in &self.pointers {
            out.push_str(match *mutability {
                Mutability::Const => "*const ",
                Mutability::Mut => "*mut ",
            });
        }
        out.push_str(self.name);
        out
    }
}

impl<'a> Display for NativeType<'a> {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.to_rust())
    }
}

/// How a parameter is handed to the native function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marshal {
    /// A scalar passed by value.
    Value,
    /// A `GLboolean`: one byte, zero or one.
    Bool,
    /// A NUL-terminated (or length-delimited) string read by GL.
    InString,
    /// An array of strings read by GL, as `glShaderSource` takes.
    InStringArray,
    /// A character buffer GL writes into.
    OutString,
    /// A pointer to one or more values read by GL.
    InArray,
    /// A pointer to one or more values GL writes into.
    OutArray,
    /// An untyped `void*`: buffer data, offsets into bound buffers, mapped memory.
    Pointer,
    /// A function pointer GL calls back into.
    Callback,
}

bitflags! {
    /// A summary of [`Marshal`] classes, for querying the declaration list.
    pub struct MarshalFlags: u8 {
        const IN       = 0x01;
        const OUT      = 0x02;
        const POINTER  = 0x04;
        const STRING   = 0x08;
        const BOOLEAN  = 0x10;
        const ARRAY    = 0x20;
        const CALLBACK = 0x40;
    }
}

impl Marshal {
    pub fn flags(self) -> MarshalFlags {
        match self {
            Marshal::Value => MarshalFlags::IN,
            Marshal::Bool => MarshalFlags::IN | MarshalFlags::BOOLEAN,
            Marshal::InString => MarshalFlags::IN | MarshalFlags::POINTER | MarshalFlags::STRING,
            Marshal::InStringArray => {
                MarshalFlags::IN | MarshalFlags::POINTER | MarshalFlags::STRING | MarshalFlags::ARRAY
            }
            Marshal::OutString => MarshalFlags::OUT | MarshalFlags::POINTER | MarshalFlags::STRING,
            Marshal::InArray => MarshalFlags::IN | MarshalFlags::POINTER | MarshalFlags::ARRAY,
            Marshal::OutArray => MarshalFlags::OUT | MarshalFlags::POINTER | MarshalFlags::ARRAY,
            Marshal::Pointer => MarshalFlags::POINTER,
            Marshal::Callback => MarshalFlags::IN | MarshalFlags::CALLBACK,
        }
    }
}

/// How a result comes back from the native function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReturnMarshal {
    Void,
    Value,
    Bool,
    /// A static NUL-terminated string owned by the driver (`glGetString`).
    String,
    Pointer,
    Handle,
}

impl ReturnMarshal {
    pub fn flags(self) -> MarshalFlags {
        match self {
            ReturnMarshal::Void => MarshalFlags::empty(),
            ReturnMarshal::Value | ReturnMarshal::Handle => MarshalFlags::OUT,
            ReturnMarshal::Bool => MarshalFlags::OUT | MarshalFlags::BOOLEAN,
            ReturnMarshal::String => MarshalFlags::OUT | MarshalFlags::POINTER | MarshalFlags::STRING,
            ReturnMarshal::Pointer => MarshalFlags::OUT | MarshalFlags::POINTER,
        }
    }
}

#[inline]
pub fn to_gl_boolean(value: bool) -> GLboolean {
    if value {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

/// Any nonzero value is true.
#[inline]
pub fn from_gl_boolean(value: GLboolean) -> bool {
    value != gl::FALSE
}

/// Converts a string for an [`Marshal::InString`] parameter.
pub fn to_gl_string(value: &str) -> Result<CString, Error> {
    CString::new(value).map_err(|_| Error::InteriorNul)
}

/// Copies a driver-owned string returned by [`ReturnMarshal::String`] commands.
///
/// Returns `None` for a null pointer, which GL uses to signal an error. Invalid UTF-8 is
/// replaced rather than rejected.
///
/// # Safety
///
/// `string` must be null or point to a NUL-terminated string that stays valid for the call.
pub unsafe fn from_gl_string(string: *const GLubyte) -> Option<String> {
    if string.is_null() {
        return None;
    }
    Some(CStr::from_ptr(string as *const c_char).to_string_lossy().into_owned())
}

/// Decodes a buffer GL filled through an [`Marshal::OutString`] parameter.
///
/// `written` is the length GL reported, excluding the terminator. It is clamped to the
/// buffer, and the result also stops at the first NUL.
pub fn out_string(buffer: &[u8], written: GLsizei) -> String {
    let written = (written.max(0) as usize).min(buffer.len());
    let bytes = &buffer[..written];
    let bytes = match bytes.iter().position(|&byte| byte == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    };
    String::from_utf8_lossy(bytes).into_owned()
}

/// Owned storage for an [`Marshal::InStringArray`] parameter plus its length array.
pub struct GlStringArray {
    // Owns the bytes `pointers` refers to.
    _strings: Vec<CString>,
    pointers: Vec<*const GLchar>,
    lengths: Vec<GLint>,
}

impl GlStringArray {
    pub fn new<'a, I>(strings: I) -> Result<GlStringArray, Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let strings = strings
            .into_iter()
            .map(to_gl_string)
            .collect::<Result<Vec<_>, _>>()?;
        let pointers = strings.iter().map(|string| string.as_ptr() as *const GLchar).collect();
        let lengths = strings
            .iter()
            .map(|string| string.as_bytes().len() as GLint)
            .collect();
        Ok(GlStringArray { _strings: strings, pointers, lengths })
    }

    #[inline]
    pub fn count(&self) -> GLsizei {
        self.pointers.len() as GLsizei
    }

    #[inline]
    pub fn as_ptr(&self) -> *const *const GLchar {
        if self.pointers.is_empty() {
            ptr::null()
        } else {
            self.pointers.as_ptr()
        }
    }

    #[inline]
    pub fn lengths(&self) -> &[GLint] {
        &self.lengths
    }

    #[inline]
    pub fn lengths_ptr(&self) -> *const GLint {
        if self.lengths.is_empty() {
            ptr::null()
        } else {
            self.lengths.as_ptr()
        }
    }
}
