// glbind/src/catalog.rs
//
//! The declaration list as data.
//!
//! The build script writes one [`CommandDecl`] per native command, in the same pass that
//! writes the `Gl` function table, so the two always describe the same set of entry points.

use crate::marshal::{self, Marshal, MarshalFlags, NativeType, ReturnMarshal};
use crate::suffix::{self, ExtensionSuffix, Tier};
use crate::Error;

use fnv::FnvHashMap;
use std::fmt::{self, Display, Formatter};

mod generated {
    use super::{CommandDecl, ParamDecl};
    include!(concat!(env!("OUT_DIR"), "/gl_catalog.rs"));
}

/// One native entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandDecl {
    /// The name without the `gl` prefix, as it appears on [`crate::gl::Gl`].
    pub name: &'static str,
    /// The exported symbol.
    pub symbol: &'static str,
    /// The return type in generated Rust syntax, `()` for `void`.
    pub ret: &'static str,
    pub params: &'static [ParamDecl],
    /// The symbol of the command this one is an alias of, if the registry records one.
    pub alias: Option<&'static str>,
    /// Alternative symbols tried when `symbol` itself doesn't resolve.
    pub fallbacks: &'static [&'static str],
}

/// One parameter of a [`CommandDecl`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: &'static str,
    /// The type in generated Rust syntax.
    pub ty: &'static str,
    /// The registry's enum group for `GLenum` parameters.
    pub group: Option<&'static str>,
}

/// A parsed parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub ty: NativeType<'static>,
    pub marshal: Marshal,
}

/// A parsed declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub ret: NativeType<'static>,
    pub ret_marshal: ReturnMarshal,
    pub params: Vec<Param>,
}

impl ParamDecl {
    #[inline]
    pub fn native_type(&self) -> NativeType<'static> {
        NativeType::parse(self.ty)
    }

    #[inline]
    pub fn marshal(&self) -> Marshal {
        self.native_type().param_marshal()
    }

    /// The name as usable in Rust source; registry names such as `type` and `ref` are keywords.
    pub fn rust_name(&self) -> String {
        match self.name {
            "type" | "ref" | "in" | "fn" | "box" | "impl" | "loop" | "match" | "mod" | "move"
            | "use" | "where" => format!("{}_", self.name),
            name => name.to_owned(),
        }
    }
}

impl CommandDecl {
    pub fn signature(&self) -> Signature {
        let ret = NativeType::parse(self.ret);
        let ret_marshal = ret.return_marshal();
        let params = self
            .params
            .iter()
            .map(|param| {
                let ty = param.native_type();
                let marshal = ty.param_marshal();
                Param { name: param.name, ty, marshal }
            })
            .collect();
        Signature { ret, ret_marshal, params }
    }

    #[inline]
    pub fn suffix(&self) -> Option<ExtensionSuffix> {
        suffix::split_suffix(self.name).1
    }

    /// The name with any extension suffix removed: `GenFramebuffers` for `GenFramebuffersEXT`.
    #[inline]
    pub fn base_name(&self) -> &'static str {
        suffix::split_suffix(self.name).0
    }

    #[inline]
    pub fn tier(&self) -> Tier {
        suffix::tier_of(self.name)
    }

    /// The union of the marshal classes of every parameter and the return value.
    pub fn marshal_flags(&self) -> MarshalFlags {
        let signature = self.signature();
        signature
            .params
            .iter()
            .fold(signature.ret_marshal.flags(), |flags, param| flags | param.marshal.flags())
    }

    /// Every symbol that can stand in for this command, primary first.
    pub fn symbols(&self) -> impl Iterator<Item = &'static str> {
        Some(self.symbol).into_iter().chain(self.fallbacks.iter().copied())
    }

    /// Renders the declaration as a Rust `extern "system"` item:
    /// `pub fn glGenBuffers(n: GLsizei, buffers: *mut GLuint);`
    pub fn declaration(&self) -> String {
        let signature = self.signature();
        let params = self
            .params
            .iter()
            .zip(signature.params.iter())
            .map(|(decl, param)| format!("{}: {}", decl.rust_name(), param.ty))
            .collect::<Vec<_>>()
            .join(", ");
        match signature.ret_marshal {
            ReturnMarshal::Void => format!("pub fn {}({});", self.symbol, params),
            _ => format!("pub fn {}({}) -> {};", self.symbol, params, signature.ret),
        }
    }

    /// The declaration wrapped in a foreign block with the calling convention GL uses:
    /// `extern "system" { pub fn glGetError() -> GLenum; }`
    pub fn extern_block(&self) -> String {
        format!("extern \"{}\" {{ {} }}", marshal::CALLING_CONVENTION, self.declaration())
    }
}

impl Display for CommandDecl {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.declaration())
    }
}

/// An index over a declaration list.
pub struct Catalog {
    commands: &'static [CommandDecl],
    by_name: FnvHashMap<&'static str, usize>,
}

lazy_static! {
    static ref GLOBAL_CATALOG: Catalog = Catalog::new(generated::COMMANDS);
}

impl Catalog {
    /// Indexes `commands` by name and by symbol.
    pub fn new(commands: &'static [CommandDecl]) -> Catalog {
        let mut by_name = FnvHashMap::default();
        for (index, command) in commands.iter().enumerate() {
            by_name.insert(command.name, index);
            by_name.insert(command.symbol, index);
        }
        Catalog { commands, by_name }
    }

    /// The catalog of every command this crate declares.
    #[inline]
    pub fn global() -> &'static Catalog {
        &GLOBAL_CATALOG
    }

    /// Finds a command by managed name (`GenBuffers`) or native symbol (`glGenBuffers`).
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&'static CommandDecl> {
        let commands = self.commands;
        self.by_name.get(name).map(|&index| &commands[index])
    }

    pub fn get(&self, name: &str) -> Result<&'static CommandDecl, Error> {
        self.lookup(name).ok_or_else(|| Error::UnknownCommand(name.to_owned()))
    }

    #[inline]
    pub fn commands(&self) -> &'static [CommandDecl] {
        self.commands
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands whose name ends in `suffix`.
    pub fn with_suffix(&self, suffix: ExtensionSuffix)
                       -> impl Iterator<Item = &'static CommandDecl> {
        self.commands.iter().filter(move |command| command.suffix() == Some(suffix))
    }

    /// Commands with at least one parameter or return value in every class in `flags`.
    pub fn filter_marshal(&self, flags: MarshalFlags)
                          -> impl Iterator<Item = &'static CommandDecl> {
        self.commands.iter().filter(move |command| command.marshal_flags().contains(flags))
    }

    /// Whether `symbol` is the primary symbol of some command.
    #[inline]
    pub fn is_primary_symbol(&self, symbol: &str) -> bool {
        self.lookup(symbol).map_or(false, |command| command.symbol == symbol)
    }
}
