// glbind/src/error.rs
//
//! Various errors that methods can produce.

use crate::gl;
use crate::gl::types::GLenum;

use std::fmt::{self, Display, Formatter};

/// Various errors that methods can produce.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The method failed for a miscellaneous reason.
    Failed,
    /// The system OpenGL library couldn't be located.
    NoGLLibraryFound,
    /// Looking up a required OpenGL function address failed. Carries the native symbol.
    GLFunctionNotFound(&'static str),
    /// The name doesn't match any declared command.
    UnknownCommand(String),
    /// A string passed to GL contained an interior NUL byte.
    InteriorNul,
    /// The `GL_VERSION` string couldn't be understood.
    UnrecognizedVersionString(String),
    /// `glGetError` reported an error.
    GL(GLError),
}

/// Errors reported by `glGetError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GLError {
    /// An enumeration parameter is not a legal enumeration for that function.
    InvalidEnum,
    /// A value parameter is not a legal value for that function.
    InvalidValue,
    /// The set of state for a command is not legal for the parameters given to that command.
    InvalidOperation,
    /// A stack pushing operation would overflow the stack.
    StackOverflow,
    /// A stack popping operation would underflow the stack.
    StackUnderflow,
    /// Memory couldn't be allocated for an operation.
    OutOfMemory,
    /// The framebuffer object is not complete.
    InvalidFramebufferOperation,
    /// The context has been lost, due to a graphics card reset.
    ContextLost,
    /// A code this crate doesn't know about.
    Unknown(GLenum),
}

impl GLError {
    /// Converts a `glGetError` result. `GL_NO_ERROR` maps to `None`.
    pub fn from_gl(code: GLenum) -> Option<GLError> {
        match code {
            gl::NO_ERROR => None,
            gl::INVALID_ENUM => Some(GLError::InvalidEnum),
            gl::INVALID_VALUE => Some(GLError::InvalidValue),
            gl::INVALID_OPERATION => Some(GLError::InvalidOperation),
            gl::STACK_OVERFLOW => Some(GLError::StackOverflow),
            gl::STACK_UNDERFLOW => Some(GLError::StackUnderflow),
            gl::OUT_OF_MEMORY => Some(GLError::OutOfMemory),
            gl::INVALID_FRAMEBUFFER_OPERATION => Some(GLError::InvalidFramebufferOperation),
            gl::CONTEXT_LOST => Some(GLError::ContextLost),
            other => Some(GLError::Unknown(other)),
        }
    }

    /// The raw enum value.
    pub fn to_gl(self) -> GLenum {
        match self {
            GLError::InvalidEnum => gl::INVALID_ENUM,
            GLError::InvalidValue => gl::INVALID_VALUE,
            GLError::InvalidOperation => gl::INVALID_OPERATION,
            GLError::StackOverflow => gl::STACK_OVERFLOW,
            GLError::StackUnderflow => gl::STACK_UNDERFLOW,
            GLError::OutOfMemory => gl::OUT_OF_MEMORY,
            GLError::InvalidFramebufferOperation => gl::INVALID_FRAMEBUFFER_OPERATION,
            GLError::ContextLost => gl::CONTEXT_LOST,
            GLError::Unknown(code) => code,
        }
    }
}

impl Display for GLError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            GLError::InvalidEnum => f.write_str("GL_INVALID_ENUM"),
            GLError::InvalidValue => f.write_str("GL_INVALID_VALUE"),
            GLError::InvalidOperation => f.write_str("GL_INVALID_OPERATION"),
            GLError::StackOverflow => f.write_str("GL_STACK_OVERFLOW"),
            GLError::StackUnderflow => f.write_str("GL_STACK_UNDERFLOW"),
            GLError::OutOfMemory => f.write_str("GL_OUT_OF_MEMORY"),
            GLError::InvalidFramebufferOperation => {
                f.write_str("GL_INVALID_FRAMEBUFFER_OPERATION")
            }
            GLError::ContextLost => f.write_str("GL_CONTEXT_LOST"),
            GLError::Unknown(code) => write!(f, "unknown GL error 0x{:04x}", code),
        }
    }
}

impl std::error::Error for GLError {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Error::Failed => f.write_str("operation failed"),
            Error::NoGLLibraryFound => f.write_str("no system OpenGL library could be opened"),
            Error::GLFunctionNotFound(symbol) => write!(f, "{} could not be resolved", symbol),
            Error::UnknownCommand(ref name) => write!(f, "no GL command named {}", name),
            Error::InteriorNul => f.write_str("string contains an interior NUL byte"),
            Error::UnrecognizedVersionString(ref version) => {
                write!(f, "unrecognized GL_VERSION string {:?}", version)
            }
            Error::GL(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::GL(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<GLError> for Error {
    #[inline]
    fn from(error: GLError) -> Error {
        Error::GL(error)
    }
}
