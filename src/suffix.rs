// glbind/src/suffix.rs
//
//! Extension suffixes on command and extension names.
//!
//! Extension commands carry the namespace of the group that defined them as a trailing tag:
//! `glGenFramebuffersEXT`, `glDebugMessageCallbackARB`, `glGenFencesNV`. Core commands carry
//! none.

use std::fmt::{self, Display, Formatter};

/// A vendor or working-group namespace tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtensionSuffix {
    Arb,
    Ext,
    Khr,
    Oes,
    Nv,
    Nvx,
    Ati,
    Amd,
    Apple,
    Intel,
    Mesa,
    Sgi,
    Sgis,
    Sgix,
    Sun,
    Ibm,
    Hp,
    Ingr,
    Pgi,
    Rend,
    Img,
    Qcom,
    Angle,
    Arm,
    Ovr,
    ThreeDfx,
    Gremedy,
    Oml,
    S3,
    Win,
}

/// How broadly an entry point is standardized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Part of a core GL or GLES version; no suffix.
    Core,
    /// Approved by the Khronos working groups: `ARB`, `KHR`, `OES`.
    Ratified,
    /// Shipped by more than one vendor: `EXT`.
    MultiVendor,
    /// Specific to one vendor.
    Vendor,
}

static ALL_SUFFIXES: [ExtensionSuffix; 30] = [
    ExtensionSuffix::Arb,
    ExtensionSuffix::Ext,
    ExtensionSuffix::Khr,
    ExtensionSuffix::Oes,
    ExtensionSuffix::Nv,
    ExtensionSuffix::Nvx,
    ExtensionSuffix::Ati,
    ExtensionSuffix::Amd,
    ExtensionSuffix::Apple,
    ExtensionSuffix::Intel,
    ExtensionSuffix::Mesa,
    ExtensionSuffix::Sgi,
    ExtensionSuffix::Sgis,
    ExtensionSuffix::Sgix,
    ExtensionSuffix::Sun,
    ExtensionSuffix::Ibm,
    ExtensionSuffix::Hp,
    ExtensionSuffix::Ingr,
    ExtensionSuffix::Pgi,
    ExtensionSuffix::Rend,
    ExtensionSuffix::Img,
    ExtensionSuffix::Qcom,
    ExtensionSuffix::Angle,
    ExtensionSuffix::Arm,
    ExtensionSuffix::Ovr,
    ExtensionSuffix::ThreeDfx,
    ExtensionSuffix::Gremedy,
    ExtensionSuffix::Oml,
    ExtensionSuffix::S3,
    ExtensionSuffix::Win,
];

impl ExtensionSuffix {
    /// Every known suffix.
    #[inline]
    pub fn all() -> &'static [ExtensionSuffix] {
        &ALL_SUFFIXES
    }

    /// The tag as it appears in names.
    pub fn as_str(self) -> &'static str {
        match self {
            ExtensionSuffix::Arb => "ARB",
            ExtensionSuffix::Ext => "EXT",
            ExtensionSuffix::Khr => "KHR",
            ExtensionSuffix::Oes => "OES",
            ExtensionSuffix::Nv => "NV",
            ExtensionSuffix::Nvx => "NVX",
            ExtensionSuffix::Ati => "ATI",
            ExtensionSuffix::Amd => "AMD",
            ExtensionSuffix::Apple => "APPLE",
            ExtensionSuffix::Intel => "INTEL",
            ExtensionSuffix::Mesa => "MESA",
            ExtensionSuffix::Sgi => "SGI",
            ExtensionSuffix::Sgis => "SGIS",
            ExtensionSuffix::Sgix => "SGIX",
            ExtensionSuffix::Sun => "SUN",
            ExtensionSuffix::Ibm => "IBM",
            ExtensionSuffix::Hp => "HP",
            ExtensionSuffix::Ingr => "INGR",
            ExtensionSuffix::Pgi => "PGI",
            ExtensionSuffix::Rend => "REND",
            ExtensionSuffix::Img => "IMG",
            ExtensionSuffix::Qcom => "QCOM",
            ExtensionSuffix::Angle => "ANGLE",
            ExtensionSuffix::Arm => "ARM",
            ExtensionSuffix::Ovr => "OVR",
            ExtensionSuffix::ThreeDfx => "3DFX",
            ExtensionSuffix::Gremedy => "GREMEDY",
            ExtensionSuffix::Oml => "OML",
            ExtensionSuffix::S3 => "S3",
            ExtensionSuffix::Win => "WIN",
        }
    }

    pub fn tier(self) -> Tier {
        match self {
            ExtensionSuffix::Arb | ExtensionSuffix::Khr | ExtensionSuffix::Oes => Tier::Ratified,
            ExtensionSuffix::Ext => Tier::MultiVendor,
            _ => Tier::Vendor,
        }
    }

    /// Parses a bare tag such as `"NV"`.
    pub fn from_tag(tag: &str) -> Option<ExtensionSuffix> {
        ALL_SUFFIXES.iter().copied().find(|suffix| suffix.as_str() == tag)
    }

    /// Extracts the namespace from an extension string such as `GL_ARB_debug_output`.
    pub fn from_extension_name(extension: &str) -> Option<ExtensionSuffix> {
        let mut parts = extension.splitn(3, '_');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(_api), Some(tag), Some(rest)) if !rest.is_empty() => {
                ExtensionSuffix::from_tag(tag)
            }
            _ => None,
        }
    }
}

impl Display for ExtensionSuffix {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits a command name into its base and extension suffix.
///
/// Picks the longest matching suffix so that `NVX` wins over `NV` and `SGIX` over `SGI`. The
/// base must be non-empty.
pub fn split_suffix(name: &str) -> (&str, Option<ExtensionSuffix>) {
    let mut best: Option<ExtensionSuffix> = None;
    for &suffix in ALL_SUFFIXES.iter() {
        let tag = suffix.as_str();
        if name.len() > tag.len() && name.ends_with(tag) {
            match best {
                Some(current) if current.as_str().len() >= tag.len() => {}
                _ => best = Some(suffix),
            }
        }
    }

    match best {
        Some(suffix) => (&name[..name.len() - suffix.as_str().len()], Some(suffix)),
        None => (name, None),
    }
}

/// The tier of a command name.
#[inline]
pub fn tier_of(name: &str) -> Tier {
    split_suffix(name).1.map_or(Tier::Core, ExtensionSuffix::tier)
}
