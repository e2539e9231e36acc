// glbind/build.rs
//
//! The `glbind` build script.
//!
//! Emits two files into `OUT_DIR` from the same merged GL + GLES registry:
//! `gl_bindings.rs` (the function pointer struct) and `gl_catalog.rs` (the
//! declaration list as static data). The function table is generated without fallbacks; the
//! runtime loader walks each declaration's fallback symbols itself.

use cfg_aliases::cfg_aliases;
use gl_generator::{Api, Fallbacks, Generator, Profile, Registry, StructGenerator};
use std::collections::BTreeMap;
use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

static GL_EXTENSIONS: [&str; 24] = [
    "GL_AMD_debug_output",
    "GL_APPLE_fence",
    "GL_APPLE_vertex_array_object",
    "GL_ARB_debug_output",
    "GL_ARB_framebuffer_object",
    "GL_ARB_get_program_binary",
    "GL_ARB_shader_objects",
    "GL_ARB_texture_storage",
    "GL_ARB_vertex_array_object",
    "GL_ARB_vertex_buffer_object",
    "GL_ARB_vertex_program",
    "GL_ATI_draw_buffers",
    "GL_ATI_separate_stencil",
    "GL_EXT_debug_marker",
    "GL_EXT_direct_state_access",
    "GL_EXT_framebuffer_blit",
    "GL_EXT_framebuffer_object",
    "GL_INTEL_performance_query",
    "GL_KHR_debug",
    "GL_MESA_resize_buffers",
    "GL_NV_fence",
    "GL_NV_texture_barrier",
    "GL_NVX_conditional_render",
    "GL_SGIS_texture4D",
];

static GLES_EXTENSIONS: [&str; 12] = [
    "GL_ANGLE_framebuffer_blit",
    "GL_ANGLE_instanced_arrays",
    "GL_EXT_debug_marker",
    "GL_EXT_disjoint_timer_query",
    "GL_EXT_texture_storage",
    "GL_KHR_debug",
    "GL_NV_fence",
    "GL_OES_EGL_image",
    "GL_OES_get_program_binary",
    "GL_OES_mapbuffer",
    "GL_OES_vertex_array_object",
    "GL_QCOM_tiled_rendering",
];

/// Writes the declaration list: one `CommandDecl` per registry command.
///
/// Fallbacks link each command with its registry aliases in both directions: a core command
/// falls back to the extension commands that alias it, and an extension command falls back to
/// the command it aliases and that command's other aliases.
struct CatalogGenerator;

impl Generator for CatalogGenerator {
    fn write<W>(&self, registry: &Registry, dest: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        let mut aliased_by: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for cmd in &registry.cmds {
            if let Some(ref alias) = cmd.alias {
                aliased_by
                    .entry(trim_prefix(alias))
                    .or_default()
                    .push(trim_prefix(&cmd.proto.ident));
            }
        }

        let mut cmds: Vec<_> = registry.cmds.iter().collect();
        cmds.sort_by(|a, b| a.proto.ident.cmp(&b.proto.ident));

        writeln!(dest, "pub(super) static COMMANDS: &[CommandDecl] = &[")?;
        for cmd in cmds {
            let ident = trim_prefix(&cmd.proto.ident);
            let params = cmd
                .params
                .iter()
                .map(|param| {
                    format!(
                        "ParamDecl {{ name: {:?}, ty: {:?}, group: {} }}",
                        param.ident,
                        &*param.ty,
                        quote_option(param.group.as_deref()),
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            let alias = cmd.alias.as_deref().map(trim_prefix);

            let mut fallbacks: Vec<&str> = vec![];
            let related = aliased_by
                .get(ident)
                .into_iter()
                .flatten()
                .chain(alias.iter())
                .chain(alias.and_then(|alias| aliased_by.get(alias)).into_iter().flatten());
            for &name in related {
                if name != ident && !fallbacks.contains(&name) {
                    fallbacks.push(name);
                }
            }
            let fallbacks = fallbacks
                .iter()
                .map(|name| format!("{:?}", symbol_name(name)))
                .collect::<Vec<_>>()
                .join(", ");

            writeln!(
                dest,
                "    CommandDecl {{ name: {:?}, symbol: {:?}, ret: {:?}, params: &[{}], \
                 alias: {}, fallbacks: &[{}] }},",
                ident,
                symbol_name(ident),
                &*cmd.proto.ty,
                params,
                quote_option(alias.map(symbol_name).as_deref()),
                fallbacks,
            )?;
        }
        writeln!(dest, "];")
    }
}

// Registry idents have the `gl` prefix stripped; aliases may not.
fn trim_prefix(ident: &str) -> &str {
    match ident.strip_prefix("gl") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => rest,
        _ => ident,
    }
}

fn symbol_name(ident: &str) -> String {
    format!("gl{}", trim_prefix(ident))
}

fn quote_option(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("Some({:?})", value),
        None => "None".to_owned(),
    }
}

fn main() {
    // Setup aliases for #[cfg] checks
    cfg_aliases! {
        windows: { target_os = "windows" },
        macos: { target_os = "macos" },
        android: { target_os = "android" },
        linux: { all(unix, not(any(macos, android))) },
        system_library: { feature = "system-library" },
    }

    let dest = PathBuf::from(&env::var("OUT_DIR").unwrap());

    let gl_registry = Registry::new(
        Api::Gl,
        (4, 6),
        Profile::Compatibility,
        Fallbacks::None,
        GL_EXTENSIONS,
    );
    let gles_registry = Registry::new(
        Api::Gles2,
        (3, 2),
        Profile::Core,
        Fallbacks::None,
        GLES_EXTENSIONS,
    );
    let registry = gl_registry + gles_registry;

    let mut file = File::create(dest.join("gl_bindings.rs")).unwrap();
    registry.write_bindings(StructGenerator, &mut file).unwrap();

    let mut file = File::create(dest.join("gl_catalog.rs")).unwrap();
    registry.write_bindings(CatalogGenerator, &mut file).unwrap();
    file.flush().unwrap();
}
