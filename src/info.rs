//! OpenGL information.

use crate::Error;

/// The API (OpenGL or OpenGL ES).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GLApi {
    GL,
    GLES,
}

/// An OpenGL or OpenGL ES version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GLVersion {
    pub major: u8,
    pub minor: u8,
}

impl GLVersion {
    #[inline]
    pub fn new(major: u8, minor: u8) -> GLVersion {
        GLVersion { major, minor }
    }

    /// Parses a `GL_VERSION` string.
    ///
    /// Desktop drivers report `<major>.<minor>[.<release>] [vendor info]`. OpenGL ES drivers
    /// report `OpenGL ES <major>.<minor> [vendor info]`, or `OpenGL ES-CM`/`ES-CL` for 1.x.
    pub fn parse(version_string: &str) -> Result<(GLApi, GLVersion), Error> {
        let unrecognized = || Error::UnrecognizedVersionString(version_string.to_owned());

        let trimmed = version_string.trim();
        let (api, rest) = match trimmed.strip_prefix("OpenGL ES") {
            Some(rest) => {
                // Skip the optional profile tag ("-CM", "-CL").
                let rest = match rest.strip_prefix('-') {
                    Some(tagged) => tagged.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
                    None => rest,
                };
                (GLApi::GLES, rest.trim_start())
            }
            None => (GLApi::GL, trimmed),
        };

        let number = rest.split_whitespace().next().ok_or_else(unrecognized)?;
        let mut components = number.split('.');
        let major = components
            .next()
            .and_then(|major| major.parse::<u8>().ok())
            .ok_or_else(unrecognized)?;
        let minor = components
            .next()
            .map(|minor| {
                minor
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect::<String>()
            })
            .and_then(|minor| minor.parse::<u8>().ok())
            .ok_or_else(unrecognized)?;

        Ok((api, GLVersion::new(major, minor)))
    }

    /// Whether the indexed `glGetStringi(GL_EXTENSIONS, i)` query is available. Both GL and
    /// GLES introduced it in 3.0.
    #[inline]
    pub fn has_indexed_extensions(self) -> bool {
        self.major >= 3
    }
}
