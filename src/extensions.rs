//! The set of extensions a context advertises.

use crate::suffix::{ExtensionSuffix, Tier};

use fnv::{FnvHashMap, FnvHashSet};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    names: FnvHashSet<String>,
}

impl ExtensionSet {
    #[inline]
    pub fn new() -> ExtensionSet {
        ExtensionSet::default()
    }

    /// Parses the space-separated form returned by `glGetString(GL_EXTENSIONS)`.
    pub fn from_extension_string(extensions: &str) -> ExtensionSet {
        extensions.split_whitespace().collect()
    }

    #[inline]
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_owned())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The extension names, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let mut names: Vec<&str> = self.names.iter().map(|name| name.as_str()).collect();
        names.sort_unstable();
        names.into_iter()
    }

    /// Extensions from the given vendor or working group.
    pub fn with_suffix(&self, suffix: ExtensionSuffix) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(move |name| ExtensionSuffix::from_extension_name(name) == Some(suffix))
    }

    /// How many extensions fall in each tier. Names with an unknown namespace count as
    /// vendor extensions.
    pub fn count_by_tier(&self) -> FnvHashMap<Tier, usize> {
        let mut counts = FnvHashMap::default();
        for name in &self.names {
            let tier = ExtensionSuffix::from_extension_name(name).map_or(Tier::Vendor, |s| s.tier());
            *counts.entry(tier).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> FromIterator<&'a str> for ExtensionSet {
    fn from_iter<I>(names: I) -> ExtensionSet
    where
        I: IntoIterator<Item = &'a str>,
    {
        ExtensionSet {
            names: names
                .into_iter()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| name.to_owned())
                .collect(),
        }
    }
}

impl FromIterator<String> for ExtensionSet {
    fn from_iter<I>(names: I) -> ExtensionSet
    where
        I: IntoIterator<Item = String>,
    {
        let mut set = ExtensionSet::new();
        for name in names {
            let name = name.trim();
            if !name.is_empty() {
                set.insert(name);
            }
        }
        set
    }
}
