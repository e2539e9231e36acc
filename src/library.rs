// glbind/src/library.rs
//
//! Opening the platform's OpenGL library as a symbol source.
//!
//! Core entry points are exported from the library itself. Extension entry points generally
//! are not, and have to go through the window system's resolver (`glXGetProcAddressARB`,
//! `eglGetProcAddress`, `wglGetProcAddress`).
//!
//! On unix the export table is searched first, and the resolver is only asked about names with
//! an extension suffix. GLX resolvers hand out a dispatch stub for any name at all, so a non-null
//! result from one says nothing about whether the driver implements the command.

#[cfg(not(windows))]
use crate::suffix::{self, Tier};
use crate::Error;

use std::ffi::CString;
#[cfg(not(windows))]
use std::os::raw::c_char;
use std::os::raw::c_void;
use std::ptr;

#[cfg(not(windows))]
use libc::{dlclose, dlopen, dlsym, RTLD_LAZY};
#[cfg(windows)]
use winapi::shared::minwindef::HMODULE;
#[cfg(windows)]
use winapi::shared::ntdef::LPCSTR;
#[cfg(windows)]
use winapi::um::{libloaderapi, wingdi};

#[cfg(linux)]
static LIBRARY_NAMES: [&str; 5] =
    ["libGL.so.1", "libGL.so", "libOpenGL.so.0", "libGLESv2.so.2", "libGLESv2.so"];
#[cfg(android)]
static LIBRARY_NAMES: [&str; 1] = ["libGLESv2.so"];
#[cfg(macos)]
static LIBRARY_NAMES: [&str; 1] = ["/System/Library/Frameworks/OpenGL.framework/OpenGL"];
#[cfg(windows)]
static LIBRARY_NAMES: [&str; 1] = ["opengl32.dll"];
#[cfg(not(any(linux, android, macos, windows)))]
static LIBRARY_NAMES: [&str; 0] = [];

#[cfg(any(linux, android))]
static EGL_LIBRARY_NAMES: [&str; 2] = ["libEGL.so.1", "libEGL.so"];

#[cfg(not(windows))]
type ProcResolver = unsafe extern "C" fn(*const c_char) -> *const c_void;

/// An opened OpenGL library.
pub struct SystemLibrary {
    name: &'static str,
    handle: *mut c_void,
    #[cfg(not(windows))]
    resolver: Option<ProcResolver>,
}

// The handle is process-global and the lookups are thread-safe on every platform.
unsafe impl Send for SystemLibrary {}
unsafe impl Sync for SystemLibrary {}

lazy_static! {
    static ref SHARED_LIBRARY: Option<SystemLibrary> = SystemLibrary::open().ok();
}

impl SystemLibrary {
    /// Opens the first of the platform's usual library names that loads.
    pub fn open() -> Result<SystemLibrary, Error> {
        for &name in LIBRARY_NAMES.iter() {
            if let Some(library) = SystemLibrary::open_named(name) {
                debug!("opened GL library {}", name);
                return Ok(library);
            }
        }
        warn!("no GL library could be opened (tried {:?})", &LIBRARY_NAMES[..]);
        Err(Error::NoGLLibraryFound)
    }

    /// A process-wide library, opened on first use.
    pub fn shared() -> Result<&'static SystemLibrary, Error> {
        SHARED_LIBRARY.as_ref().ok_or(Error::NoGLLibraryFound)
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up `symbol`, returning null if neither the export table nor the resolver has it.
    ///
    /// For extension commands on unix the answer may come from `glXGetProcAddressARB`, which
    /// never returns null; treat such a result as "callable if the extension is advertised".
    pub fn get_proc_address(&self, symbol: &str) -> *const c_void {
        let symbol = match CString::new(symbol) {
            Ok(symbol) => symbol,
            Err(_) => return ptr::null(),
        };
        unsafe { self.lookup(&symbol) }
    }
}

#[cfg(not(windows))]
impl SystemLibrary {
    /// Opens a library by file name or path.
    pub fn open_named(name: &'static str) -> Option<SystemLibrary> {
        let handle = unsafe { open_library(name)? };
        let resolver = unsafe { find_resolver(handle) };
        Some(SystemLibrary { name, handle, resolver })
    }

    unsafe fn lookup(&self, symbol: &CString) -> *const c_void {
        let address = dlsym(self.handle, symbol.as_ptr()) as *const c_void;
        if !address.is_null() {
            return address;
        }
        match self.resolver {
            Some(resolver) if uses_resolver(symbol) => resolver(symbol.as_ptr()),
            _ => ptr::null(),
        }
    }
}

#[cfg(not(windows))]
fn uses_resolver(symbol: &CString) -> bool {
    match symbol.to_str() {
        Ok(symbol) => suffix::tier_of(symbol) != Tier::Core,
        Err(_) => false,
    }
}

#[cfg(not(windows))]
unsafe fn open_library(name: &str) -> Option<*mut c_void> {
    let name = CString::new(name).ok()?;
    let handle = dlopen(name.as_ptr(), RTLD_LAZY);
    if handle.is_null() {
        None
    } else {
        Some(handle)
    }
}

#[cfg(not(windows))]
unsafe fn symbol_in(handle: *mut c_void, symbol: &'static [u8]) -> Option<ProcResolver> {
    let address = dlsym(handle, symbol.as_ptr() as *const c_char);
    if address.is_null() {
        None
    } else {
        Some(std::mem::transmute::<*mut c_void, ProcResolver>(address))
    }
}

// GLX libraries export `glXGetProcAddressARB`; GLES and GLVND's libOpenGL leave it to EGL.
#[cfg(all(not(windows), not(macos)))]
unsafe fn find_resolver(handle: *mut c_void) -> Option<ProcResolver> {
    symbol_in(handle, b"glXGetProcAddressARB\0")
        .or_else(|| symbol_in(handle, b"glXGetProcAddress\0"))
        .or_else(|| egl_resolver())
}

// Extension lookups on macOS go through the export table.
#[cfg(macos)]
unsafe fn find_resolver(_: *mut c_void) -> Option<ProcResolver> {
    None
}

#[cfg(any(linux, android))]
lazy_static! {
    // libEGL stays open for the life of the process once found.
    static ref EGL_RESOLVER: Option<ProcResolver> = unsafe { open_egl_resolver() };
}

#[cfg(any(linux, android))]
unsafe fn egl_resolver() -> Option<ProcResolver> {
    *EGL_RESOLVER
}

#[cfg(any(linux, android))]
unsafe fn open_egl_resolver() -> Option<ProcResolver> {
    for &name in EGL_LIBRARY_NAMES.iter() {
        if let Some(handle) = open_library(name) {
            match symbol_in(handle, b"eglGetProcAddress\0") {
                Some(resolver) => return Some(resolver),
                None => {
                    dlclose(handle);
                }
            }
        }
    }
    None
}

#[cfg(not(any(linux, android, macos, windows)))]
unsafe fn egl_resolver() -> Option<ProcResolver> {
    None
}

#[cfg(windows)]
impl SystemLibrary {
    /// Opens a library by file name or path.
    pub fn open_named(name: &'static str) -> Option<SystemLibrary> {
        let c_name = CString::new(name).ok()?;
        let handle = unsafe { libloaderapi::LoadLibraryA(c_name.as_ptr() as LPCSTR) };
        if handle.is_null() {
            None
        } else {
            Some(SystemLibrary { name, handle: handle as *mut c_void })
        }
    }

    // opengl32.dll only exports GL 1.1, so everything newer, core or not, comes from the
    // context's ICD through `wglGetProcAddress`, which returns null for unknown names.
    unsafe fn lookup(&self, symbol: &CString) -> *const c_void {
        // `wglGetProcAddress` signals failure with small sentinel values as well as null.
        let address = wingdi::wglGetProcAddress(symbol.as_ptr() as LPCSTR) as isize;
        if !matches!(address, -1 | 0 | 1 | 2 | 3) {
            return address as *const c_void;
        }
        libloaderapi::GetProcAddress(self.handle as HMODULE, symbol.as_ptr() as LPCSTR)
            as *const c_void
    }
}

impl Drop for SystemLibrary {
    fn drop(&mut self) {
        unsafe {
            #[cfg(not(windows))]
            dlclose(self.handle);
            #[cfg(windows)]
            libloaderapi::FreeLibrary(self.handle as HMODULE);
        }
    }
}
