// glbind/src/tests.rs
//
//! Unit tests.
//!
//! Loading tests run against a fake driver: plain `extern "system"` functions handed out by a
//! loader closure, sharing state behind a mutex.

use crate::catalog::Catalog;
use crate::gl::types::{GLboolean, GLchar, GLenum, GLint, GLsizei, GLubyte, GLuint};
use crate::gl;
use crate::loader::{self, LoadOptions, Resolution};
use crate::marshal::{self, BaseType, GlStringArray, Marshal, MarshalFlags, Mutability};
use crate::marshal::{NativeType, ReturnMarshal};
use crate::suffix::{self, ExtensionSuffix, Tier};
use crate::{Error, ExtensionSet, GLApi, GLError, GLVersion, GlFunctions};

use serial_test::serial;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::ptr;
use std::slice;
use std::sync::Mutex;

struct FakeDriver {
    errors: Vec<GLenum>,
    version: &'static [u8],
    extension_string: &'static [u8],
    extensions: Vec<&'static [u8]>,
    sources: Vec<String>,
    info_log: &'static [u8],
}

impl FakeDriver {
    fn new() -> FakeDriver {
        FakeDriver {
            errors: vec![],
            version: b"4.6.0 Fake Driver 1.0\0",
            extension_string: b"\0",
            extensions: vec![b"GL_ARB_debug_output\0", b"GL_NV_fence\0", b"GL_EXT_debug_marker\0"],
            sources: vec![],
            info_log: b"0:1(1): error: syntax error\0",
        }
    }
}

lazy_static! {
    static ref FAKE_DRIVER: Mutex<FakeDriver> = Mutex::new(FakeDriver::new());
}

fn reset_fake_driver() {
    *FAKE_DRIVER.lock().unwrap() = FakeDriver::new();
}

extern "system" fn fake_get_error() -> GLenum {
    let mut driver = FAKE_DRIVER.lock().unwrap();
    if driver.errors.is_empty() {
        gl::NO_ERROR
    } else {
        driver.errors.remove(0)
    }
}

extern "system" fn fake_get_string(name: GLenum) -> *const GLubyte {
    let driver = FAKE_DRIVER.lock().unwrap();
    match name {
        gl::VERSION => driver.version.as_ptr(),
        gl::EXTENSIONS => driver.extension_string.as_ptr(),
        _ => ptr::null(),
    }
}

extern "system" fn fake_get_string_i(name: GLenum, index: GLuint) -> *const GLubyte {
    let driver = FAKE_DRIVER.lock().unwrap();
    if name != gl::EXTENSIONS {
        return ptr::null();
    }
    driver.extensions.get(index as usize).map_or(ptr::null(), |extension| extension.as_ptr())
}

extern "system" fn fake_get_integerv(name: GLenum, data: *mut GLint) {
    let driver = FAKE_DRIVER.lock().unwrap();
    if name == gl::NUM_EXTENSIONS {
        unsafe {
            *data = driver.extensions.len() as GLint;
        }
    }
}

extern "system" fn fake_get_booleanv(name: GLenum, data: *mut GLboolean) {
    unsafe {
        *data = if name == gl::DEPTH_WRITEMASK { 1 } else { 0 };
    }
}

extern "system" fn fake_shader_source(_: GLuint,
                                      count: GLsizei,
                                      strings: *const *const GLchar,
                                      lengths: *const GLint) {
    let mut driver = FAKE_DRIVER.lock().unwrap();
    for index in 0..count as usize {
        unsafe {
            let string = *strings.add(index) as *const u8;
            let length = *lengths.add(index) as usize;
            let bytes = slice::from_raw_parts(string, length);
            driver.sources.push(String::from_utf8_lossy(bytes).into_owned());
        }
    }
}

extern "system" fn fake_get_shaderiv(_: GLuint, name: GLenum, params: *mut GLint) {
    let driver = FAKE_DRIVER.lock().unwrap();
    if name == gl::INFO_LOG_LENGTH {
        unsafe {
            *params = driver.info_log.len() as GLint;
        }
    }
}

extern "system" fn fake_get_shader_info_log(_: GLuint,
                                            buffer_size: GLsizei,
                                            length: *mut GLsizei,
                                            info_log: *mut GLchar) {
    let driver = FAKE_DRIVER.lock().unwrap();
    let text = &driver.info_log[..driver.info_log.len() - 1];
    let copied = text.len().min((buffer_size.max(1) - 1) as usize);
    unsafe {
        ptr::copy_nonoverlapping(text.as_ptr(), info_log as *mut u8, copied);
        *info_log.add(copied) = 0;
        if !length.is_null() {
            *length = copied as GLsizei;
        }
    }
}

extern "system" fn fake_get_uniform_location(_: GLuint, name: *const GLchar) -> GLint {
    let name = unsafe { CStr::from_ptr(name) };
    if name.to_bytes() == b"u_color" {
        3
    } else {
        -1
    }
}

extern "system" fn fake_gen_buffers(count: GLsizei, buffers: *mut GLuint) {
    for index in 0..count.max(0) as usize {
        unsafe {
            *buffers.add(index) = 100 + index as GLuint;
        }
    }
}

fn fake_loader(symbol: &str) -> *const c_void {
    match symbol {
        "glGetError" => fake_get_error as *const c_void,
        "glGetString" => fake_get_string as *const c_void,
        "glGetStringi" => fake_get_string_i as *const c_void,
        "glGetIntegerv" => fake_get_integerv as *const c_void,
        "glGetBooleanv" => fake_get_booleanv as *const c_void,
        "glShaderSource" => fake_shader_source as *const c_void,
        "glGetShaderiv" => fake_get_shaderiv as *const c_void,
        "glGetShaderInfoLog" => fake_get_shader_info_log as *const c_void,
        "glGetUniformLocation" => fake_get_uniform_location as *const c_void,
        "glGenBuffers" => fake_gen_buffers as *const c_void,
        _ => ptr::null(),
    }
}

// Only the ARB spelling of the buffer entry points, as on an old driver.
fn arb_only_loader(symbol: &str) -> *const c_void {
    match symbol {
        "glGenBuffersARB" => fake_gen_buffers as *const c_void,
        _ => ptr::null(),
    }
}

fn load_fake() -> GlFunctions {
    reset_fake_driver();
    GlFunctions::load_with(fake_loader).unwrap()
}

// Declarations

#[test]
fn test_catalog_is_populated() {
    let catalog = Catalog::global();
    assert!(catalog.len() > 1000);
    assert!(!catalog.is_empty());
}

#[test]
fn test_catalog_symbols_are_prefixed_names() {
    for command in Catalog::global().commands() {
        assert_eq!(command.symbol, format!("gl{}", command.name));
        for fallback in command.fallbacks {
            assert!(fallback.starts_with("gl"));
            assert_ne!(*fallback, command.symbol);
        }
    }
}

#[test]
fn test_catalog_names_are_unique() {
    let catalog = Catalog::global();
    for command in catalog.commands() {
        assert!(std::ptr::eq(catalog.lookup(command.name).unwrap(), command));
        assert!(std::ptr::eq(catalog.lookup(command.symbol).unwrap(), command));
    }
}

#[test]
fn test_catalog_is_sorted_by_name() {
    let commands = Catalog::global().commands();
    assert!(commands.windows(2).all(|pair| pair[0].name < pair[1].name));
}

#[test]
fn test_lookup_by_name_or_symbol() {
    let catalog = Catalog::global();
    let by_name = catalog.lookup("GenBuffers").unwrap();
    let by_symbol = catalog.lookup("glGenBuffers").unwrap();
    assert_eq!(by_name, by_symbol);
    assert_eq!(by_name.symbol, "glGenBuffers");
    assert_eq!(by_name.params.len(), 2);
    assert!(catalog.is_primary_symbol("glGenBuffers"));
    assert!(!catalog.is_primary_symbol("GenBuffers"));

    match catalog.get("NotAGLCommand") {
        Err(Error::UnknownCommand(name)) => assert_eq!(name, "NotAGLCommand"),
        _ => panic!(),
    }
}

#[test]
fn test_gen_buffers_declaration() {
    let command = Catalog::global().get("GenBuffers").unwrap();
    assert_eq!(command.declaration(), "pub fn glGenBuffers(n: GLsizei, buffers: *mut GLuint);");
    assert_eq!(command.to_string(), command.declaration());

    let signature = command.signature();
    assert_eq!(signature.ret_marshal, ReturnMarshal::Void);
    let marshals: Vec<Marshal> = signature.params.iter().map(|param| param.marshal).collect();
    assert_eq!(marshals, [Marshal::Value, Marshal::OutArray]);
}

#[test]
fn test_declaration_renders_return_type() {
    let command = Catalog::global().get("glGetError").unwrap();
    assert_eq!(command.declaration(), "pub fn glGetError() -> GLenum;");
    assert_eq!(command.extern_block(), "extern \"system\" { pub fn glGetError() -> GLenum; }");
    assert_eq!(marshal::CALLING_CONVENTION, "system");
}

#[test]
fn test_pointer_out_parameters_are_written_by_gl() {
    let catalog = Catalog::global();
    let get_pointer = catalog.get("GetPointerv").unwrap().signature();
    assert_eq!(get_pointer.params[1].ty.pointers, [Mutability::Const, Mutability::Mut]);
    assert_eq!(get_pointer.params[1].marshal, Marshal::OutArray);

    let buffer_pointer = catalog.get("GetBufferPointerv").unwrap().signature();
    assert_eq!(buffer_pointer.params[2].marshal, Marshal::OutArray);

    let written: Vec<&str> = catalog
        .filter_marshal(MarshalFlags::OUT | MarshalFlags::ARRAY)
        .map(|command| command.name)
        .collect();
    assert!(written.contains(&"GetPointerv"));
    assert!(written.contains(&"GetVertexAttribPointerv"));
}

#[test]
fn test_string_marshaling_is_classified() {
    let catalog = Catalog::global();

    let shader_source = catalog.get("ShaderSource").unwrap().signature();
    let marshals: Vec<Marshal> = shader_source.params.iter().map(|param| param.marshal).collect();
    assert_eq!(marshals,
               [Marshal::Value, Marshal::Value, Marshal::InStringArray, Marshal::InArray]);

    let info_log = catalog.get("GetShaderInfoLog").unwrap().signature();
    let marshals: Vec<Marshal> = info_log.params.iter().map(|param| param.marshal).collect();
    assert_eq!(marshals, [Marshal::Value, Marshal::Value, Marshal::OutArray, Marshal::OutString]);

    let uniform_location = catalog.get("GetUniformLocation").unwrap().signature();
    assert_eq!(uniform_location.params[1].marshal, Marshal::InString);
    assert_eq!(uniform_location.ret_marshal, ReturnMarshal::Value);

    let get_string = catalog.get("GetString").unwrap().signature();
    assert_eq!(get_string.ret_marshal, ReturnMarshal::String);
}

#[test]
fn test_boolean_handle_and_callback_marshaling() {
    let catalog = Catalog::global();

    assert_eq!(catalog.get("IsEnabled").unwrap().signature().ret_marshal, ReturnMarshal::Bool);
    assert_eq!(catalog.get("FenceSync").unwrap().signature().ret_marshal, ReturnMarshal::Handle);

    let depth_mask = catalog.get("DepthMask").unwrap().signature();
    assert_eq!(depth_mask.params[0].marshal, Marshal::Bool);

    let callback = catalog.get("DebugMessageCallback").unwrap().signature();
    let marshals: Vec<Marshal> = callback.params.iter().map(|param| param.marshal).collect();
    assert_eq!(marshals, [Marshal::Callback, Marshal::Pointer]);

    let map_buffer = catalog.get("MapBuffer").unwrap().signature();
    assert_eq!(map_buffer.ret_marshal, ReturnMarshal::Pointer);
}

#[test]
fn test_filter_marshal() {
    let catalog = Catalog::global();
    let string_arrays: Vec<&str> = catalog
        .filter_marshal(MarshalFlags::STRING | MarshalFlags::ARRAY | MarshalFlags::IN)
        .map(|command| command.name)
        .collect();
    assert!(string_arrays.contains(&"ShaderSource"));
    assert!(!string_arrays.contains(&"GenBuffers"));

    let callbacks: Vec<&str> = catalog
        .filter_marshal(MarshalFlags::CALLBACK)
        .map(|command| command.name)
        .collect();
    assert!(callbacks.contains(&"DebugMessageCallback"));
}

#[test]
fn test_extension_commands_are_declared() {
    let catalog = Catalog::global();
    let nv: Vec<&str> = catalog.with_suffix(ExtensionSuffix::Nv).map(|c| c.name).collect();
    assert!(nv.contains(&"GenFencesNV"));
    assert!(nv.iter().all(|name| name.ends_with("NV")));

    let framebuffer_ext = catalog.get("glGenFramebuffersEXT").unwrap();
    assert_eq!(framebuffer_ext.suffix(), Some(ExtensionSuffix::Ext));
    assert_eq!(framebuffer_ext.base_name(), "GenFramebuffers");
    assert_eq!(framebuffer_ext.tier(), Tier::MultiVendor);

    assert_eq!(catalog.get("GenBuffers").unwrap().tier(), Tier::Core);
    assert_eq!(catalog.get("GenVertexArraysOES").unwrap().tier(), Tier::Ratified);
    assert_eq!(catalog.get("SetFenceAPPLE").unwrap().tier(), Tier::Vendor);
}

#[test]
fn test_aliases_become_fallbacks() {
    let catalog = Catalog::global();
    let arb = catalog.get("GenBuffersARB").unwrap();
    assert_eq!(arb.alias, Some("glGenBuffers"));
    assert!(arb.fallbacks.contains(&"glGenBuffers"));

    let core = catalog.get("GenBuffers").unwrap();
    assert!(core.fallbacks.contains(&"glGenBuffersARB"));
    let symbols: Vec<&str> = core.symbols().collect();
    assert_eq!(symbols[0], "glGenBuffers");
}

// Loading

#[test]
#[serial]
fn test_load_reports_resolution() {
    let functions = load_fake();
    let report = functions.report();
    assert!(report.loaded_count() >= 10);
    assert_eq!(report.resolution("GetError"), Some(Resolution::Primary));
    assert_eq!(report.resolution("glGetString"), Some(Resolution::Primary));
    assert_eq!(report.resolution("DrawArrays"), Some(Resolution::Missing));
    assert_eq!(report.resolution("NotAGLCommand"), None);
    assert!(report.missing().contains(&"DrawArrays"));
    assert!(functions.supports("glGenBuffers"));
    assert!(!functions.supports("DrawArrays"));
}

#[test]
fn test_load_uses_fallback_symbols() {
    let (gl, report) = loader::load_with(arb_only_loader, &LoadOptions::default()).unwrap();
    assert_eq!(report.resolution("GenBuffers"), Some(Resolution::Fallback("glGenBuffersARB")));
    assert_eq!(report.resolution("GenBuffersARB"), Some(Resolution::Primary));
    assert!(report.via_fallback().contains(&("GenBuffers", "glGenBuffersARB")));

    let mut buffers = [0; 3];
    unsafe {
        gl.GenBuffers(buffers.len() as GLsizei, buffers.as_mut_ptr());
    }
    assert_eq!(buffers, [100, 101, 102]);
}

#[test]
fn test_strict_load_skips_fallbacks() {
    let mut queried = vec![];
    let (_, report) = loader::load_with(|symbol| {
        queried.push(symbol.to_owned());
        arb_only_loader(symbol)
    }, &LoadOptions::strict()).unwrap();

    assert_eq!(report.resolution("GenBuffers"), Some(Resolution::Missing));
    assert_eq!(report.resolution("GenBuffersARB"), Some(Resolution::Primary));
    assert!(report.via_fallback().is_empty());
    assert_eq!(queried.len(), Catalog::global().len());
}

#[test]
fn test_required_commands() {
    let options = LoadOptions::default().require("glGenBuffers");
    assert!(loader::load_with(arb_only_loader, &options).is_ok());

    let options = LoadOptions::strict().require("glGenBuffers");
    match loader::load_with(arb_only_loader, &options) {
        Err(Error::GLFunctionNotFound(symbol)) => assert_eq!(symbol, "glGenBuffers"),
        _ => panic!(),
    }

    let options = LoadOptions::default().require("glNotAGLCommand");
    match loader::load_with(arb_only_loader, &options) {
        Err(Error::UnknownCommand(_)) => {}
        _ => panic!(),
    }
}

#[test]
#[serial]
fn test_queries_through_fake_driver() {
    let functions = load_fake();
    assert_eq!(functions.version().unwrap(), (GLApi::GL, GLVersion::new(4, 6)));
    assert!(functions.get_boolean(gl::DEPTH_WRITEMASK).unwrap());
    assert!(!functions.get_boolean(gl::BLEND).unwrap());
    assert_eq!(functions.get_string(gl::RENDERER).unwrap(), None);

    let extensions = functions.extensions().unwrap();
    assert_eq!(extensions.len(), 3);
    assert!(extensions.contains("GL_NV_fence"));
}

#[test]
#[serial]
fn test_extensions_from_string_on_old_contexts() {
    let functions = load_fake();
    {
        let mut driver = FAKE_DRIVER.lock().unwrap();
        driver.version = b"OpenGL ES 2.0 Fake Driver\0";
        driver.extension_string = b"GL_OES_mapbuffer GL_EXT_debug_marker \0";
    }
    assert_eq!(functions.version().unwrap(), (GLApi::GLES, GLVersion::new(2, 0)));
    let extensions = functions.extensions().unwrap();
    assert_eq!(extensions.iter().collect::<Vec<_>>(), ["GL_EXT_debug_marker", "GL_OES_mapbuffer"]);
}

#[test]
#[serial]
fn test_check_error_drains_queue() {
    let functions = load_fake();
    assert!(functions.check_error().is_ok());

    FAKE_DRIVER.lock().unwrap().errors = vec![gl::INVALID_ENUM, gl::OUT_OF_MEMORY];
    assert_eq!(functions.check_error(), Err(Error::GL(GLError::InvalidEnum)));
    assert_eq!(functions.get_error(), None);
}

#[test]
#[serial]
fn test_check_error_stops_after_bounded_drain() {
    let functions = load_fake();
    let mut errors = vec![gl::INVALID_VALUE];
    errors.extend(std::iter::repeat(gl::INVALID_OPERATION).take(19));
    FAKE_DRIVER.lock().unwrap().errors = errors;

    assert_eq!(functions.check_error(), Err(Error::GL(GLError::InvalidValue)));
    assert_eq!(FAKE_DRIVER.lock().unwrap().errors.len(), 4);
    assert_eq!(functions.check_error(), Err(Error::GL(GLError::InvalidOperation)));
    assert!(functions.check_error().is_ok());
}

#[test]
#[serial]
fn test_string_marshaling_through_fake_driver() {
    let functions = load_fake();
    functions.shader_source(1, &["#version 330 core\n", "void main() {}\n"]).unwrap();
    assert_eq!(FAKE_DRIVER.lock().unwrap().sources,
               ["#version 330 core\n", "void main() {}\n"]);

    assert_eq!(functions.shader_info_log(1).unwrap(), "0:1(1): error: syntax error");
    assert_eq!(functions.uniform_location(1, "u_color").unwrap(), Some(3));
    assert_eq!(functions.uniform_location(1, "u_missing").unwrap(), None);
    assert_eq!(functions.uniform_location(1, "u\0color"), Err(Error::InteriorNul));
}

#[test]
#[serial]
fn test_missing_commands_are_reported_not_called() {
    reset_fake_driver();
    let functions = GlFunctions::load_with(arb_only_loader).unwrap();
    assert_eq!(functions.get_error(), None);
    assert_eq!(functions.get_string(gl::VERSION),
               Err(Error::GLFunctionNotFound("glGetString")));
    assert_eq!(functions.get_integer(gl::NUM_EXTENSIONS),
               Err(Error::GLFunctionNotFound("glGetIntegerv")));
}

#[cfg(system_library)]
#[test]
fn test_system_library_opens_or_reports() {
    use crate::SystemLibrary;
    match SystemLibrary::open() {
        Ok(library) => {
            assert!(!library.name().is_empty());
            assert!(library.get_proc_address("glGet\0String").is_null());
            // Core names come from the export table only, so unknown ones stay null.
            assert!(library.get_proc_address("glNotARealCommandXYZ").is_null());
        }
        Err(Error::NoGLLibraryFound) => {}
        Err(_) => panic!(),
    }
    assert!(SystemLibrary::open_named("libdefinitely-not-a-gl-library.so.9").is_none());
}

// Marshaling

#[test]
fn test_parse_native_types() {
    let ty = NativeType::parse("*const *const types::GLchar");
    assert_eq!(ty.name, "GLchar");
    assert_eq!(ty.base, BaseType::Char);
    assert_eq!(ty.pointers, [Mutability::Const, Mutability::Const]);
    assert_eq!(ty.to_rust(), "*const *const GLchar");

    let ty = NativeType::parse("*mut __gl_imports::raw::c_void");
    assert_eq!(ty.base, BaseType::Void);
    assert_eq!(ty.param_marshal(), Marshal::Pointer);

    let ty = NativeType::parse("types::GLuint");
    assert_eq!(ty.base, BaseType::Integer("GLuint"));
    assert!(!ty.is_pointer());
    assert_eq!(ty.param_marshal(), Marshal::Value);

    assert_eq!(NativeType::parse("()").return_marshal(), ReturnMarshal::Void);
    assert_eq!(NativeType::parse("types::GLDEBUGPROC").param_marshal(), Marshal::Callback);
    assert_eq!(NativeType::parse("*mut types::GLboolean").param_marshal(), Marshal::OutArray);
    assert_eq!(NativeType::parse("*const types::GLfloat").param_marshal(), Marshal::InArray);
    assert_eq!(NativeType::parse("*mut *mut __gl_imports::raw::c_void").param_marshal(),
               Marshal::OutArray);
    assert_eq!(NativeType::parse("*const *mut __gl_imports::raw::c_void").param_marshal(),
               Marshal::OutArray);
    assert_eq!(NativeType::parse("*const *const types::GLuint").param_marshal(),
               Marshal::InArray);
}

#[test]
fn test_marshal_flags() {
    assert!(Marshal::InStringArray.flags().contains(MarshalFlags::STRING | MarshalFlags::ARRAY));
    assert!(Marshal::OutString.flags().contains(MarshalFlags::OUT));
    assert!(!Marshal::Value.flags().contains(MarshalFlags::POINTER));
    assert_eq!(ReturnMarshal::Void.flags(), MarshalFlags::empty());
}

#[test]
fn test_boolean_conversion() {
    assert_eq!(marshal::to_gl_boolean(true), gl::TRUE);
    assert_eq!(marshal::to_gl_boolean(false), gl::FALSE);
    assert!(marshal::from_gl_boolean(1));
    assert!(marshal::from_gl_boolean(0xff));
    assert!(!marshal::from_gl_boolean(0));
}

#[test]
fn test_string_conversion() {
    assert_eq!(marshal::to_gl_string("u_color").unwrap().as_bytes(), b"u_color");
    assert_eq!(marshal::to_gl_string("a\0b"), Err(Error::InteriorNul));

    unsafe {
        assert_eq!(marshal::from_gl_string(ptr::null()), None);
        let version = b"4.6.0\0";
        assert_eq!(marshal::from_gl_string(version.as_ptr()), Some("4.6.0".to_owned()));
    }
}

#[test]
fn test_out_string() {
    let buffer = *b"hello\0\0\0";
    assert_eq!(marshal::out_string(&buffer, 5), "hello");
    assert_eq!(marshal::out_string(&buffer, 100), "hello");
    assert_eq!(marshal::out_string(&buffer, -1), "");
    assert_eq!(marshal::out_string(&buffer, 3), "hel");
}

#[test]
fn test_string_array() {
    let array = GlStringArray::new(vec!["abc", "de"]).unwrap();
    assert_eq!(array.count(), 2);
    assert_eq!(array.lengths(), [3, 2]);
    unsafe {
        let first = CStr::from_ptr(*array.as_ptr());
        assert_eq!(first.to_bytes(), b"abc");
    }

    let empty = GlStringArray::new(Vec::new()).unwrap();
    assert_eq!(empty.count(), 0);
    assert!(empty.as_ptr().is_null());
    assert!(empty.lengths_ptr().is_null());

    assert!(GlStringArray::new(vec!["ok", "not\0ok"]).is_err());
}

// Suffixes, versions, extensions, errors

#[test]
fn test_split_suffix() {
    assert_eq!(suffix::split_suffix("GenFramebuffersEXT"),
               ("GenFramebuffers", Some(ExtensionSuffix::Ext)));
    assert_eq!(suffix::split_suffix("glBeginConditionalRenderNVX"),
               ("glBeginConditionalRender", Some(ExtensionSuffix::Nvx)));
    assert_eq!(suffix::split_suffix("TexImage4DSGIS"), ("TexImage4D", Some(ExtensionSuffix::Sgis)));
    assert_eq!(suffix::split_suffix("TexImage3D"), ("TexImage3D", None));
    assert_eq!(suffix::split_suffix("EXT"), ("EXT", None));
    assert_eq!(suffix::tier_of("DebugMessageCallbackKHR"), Tier::Ratified);
    assert_eq!(suffix::tier_of("StencilOpSeparateATI"), Tier::Vendor);
}

#[test]
fn test_suffix_from_extension_name() {
    assert_eq!(ExtensionSuffix::from_extension_name("GL_ARB_debug_output"),
               Some(ExtensionSuffix::Arb));
    assert_eq!(ExtensionSuffix::from_extension_name("GL_3DFX_texture_compression_FXT1"),
               Some(ExtensionSuffix::ThreeDfx));
    assert_eq!(ExtensionSuffix::from_extension_name("GL_WHATEVER_thing"), None);
    assert_eq!(ExtensionSuffix::from_extension_name("GL_ARB"), None);
    assert_eq!(ExtensionSuffix::from_tag("OES"), Some(ExtensionSuffix::Oes));
    assert_eq!(ExtensionSuffix::Apple.to_string(), "APPLE");
    assert_eq!(ExtensionSuffix::all().len(), 30);
}

#[test]
fn test_parse_version_strings() {
    assert_eq!(GLVersion::parse("4.6.0 NVIDIA 535.54.03").unwrap(),
               (GLApi::GL, GLVersion::new(4, 6)));
    assert_eq!(GLVersion::parse("3.3 (Core Profile) Mesa 23.0.4").unwrap(),
               (GLApi::GL, GLVersion::new(3, 3)));
    assert_eq!(GLVersion::parse("OpenGL ES 3.2 Mesa 23.0.4").unwrap(),
               (GLApi::GLES, GLVersion::new(3, 2)));
    assert_eq!(GLVersion::parse("OpenGL ES-CM 1.1").unwrap(),
               (GLApi::GLES, GLVersion::new(1, 1)));
    assert_eq!(GLVersion::parse("2.1"), Ok((GLApi::GL, GLVersion::new(2, 1))));
    assert!(GLVersion::parse("").is_err());
    assert!(GLVersion::parse("OpenGL ES").is_err());
    assert!(GLVersion::parse("four point six").is_err());

    assert!(GLVersion::new(3, 0).has_indexed_extensions());
    assert!(!GLVersion::new(2, 1).has_indexed_extensions());
    assert!(GLVersion::new(4, 1) > GLVersion::new(3, 3));
}

#[test]
fn test_extension_set() {
    let extensions = ExtensionSet::from_extension_string(
        " GL_ARB_debug_output  GL_NV_fence GL_EXT_debug_marker GL_KHR_debug GL_MADEUP_thing ");
    assert_eq!(extensions.len(), 5);
    assert!(extensions.contains("GL_KHR_debug"));
    assert!(!extensions.contains("GL_KHR"));

    let ratified: Vec<&str> = extensions.with_suffix(ExtensionSuffix::Arb).collect();
    assert_eq!(ratified, ["GL_ARB_debug_output"]);

    let tiers = extensions.count_by_tier();
    assert_eq!(tiers[&Tier::Ratified], 2);
    assert_eq!(tiers[&Tier::MultiVendor], 1);
    assert_eq!(tiers[&Tier::Vendor], 2);

    let collected: ExtensionSet = vec!["GL_NV_fence".to_owned(), " ".to_owned()].into_iter().collect();
    assert_eq!(collected.len(), 1);
}

#[test]
fn test_gl_error_codes() {
    assert_eq!(GLError::from_gl(gl::NO_ERROR), None);
    assert_eq!(GLError::from_gl(gl::INVALID_VALUE), Some(GLError::InvalidValue));
    assert_eq!(GLError::from_gl(0x1234), Some(GLError::Unknown(0x1234)));
    assert_eq!(GLError::InvalidFramebufferOperation.to_gl(), gl::INVALID_FRAMEBUFFER_OPERATION);
    assert_eq!(GLError::OutOfMemory.to_string(), "GL_OUT_OF_MEMORY");
    assert_eq!(Error::from(GLError::ContextLost).to_string(), "GL_CONTEXT_LOST");
}
