//! Zone lists
//!
//! The order of the list is the order of block 2 in the suite and the
//! index space of the randomized sampler, so it must be stable. Discovered
//! lists are sorted; list files keep their own order.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Magic bytes opening every compiled zone file
const TZIF_MAGIC: &[u8; 4] = b"TZif";

/// Top-level trees that duplicate the main zones
const SKIPPED_DIRS: &[&str] = &["posix", "right"];

/// Compiled files that are not zones of their own
const SKIPPED_FILES: &[&str] = &["posixrules", "localtime", "Factory"];

/// An ordered list of distinct zone names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneList {
    zones: Vec<String>,
}

impl ZoneList {
    /// Build from names, keeping their order
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoneList`] for empty names, names with
    /// whitespace, or duplicates.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut zones = Vec::new();
        for name in names {
            let name = name.into();
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(Error::InvalidZoneList(format!("bad zone name {name:?}")));
            }
            if !seen.insert(name.clone()) {
                return Err(Error::InvalidZoneList(format!("duplicate zone {name}")));
            }
            zones.push(name);
        }
        Ok(Self { zones })
    }

    /// Parse a list file: one zone per line, `#` comments and blank lines
    /// ignored
    ///
    /// # Errors
    ///
    /// See [`ZoneList::from_names`].
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_names(
            text.lines()
                .map(|line| line.split('#').next().unwrap_or("").trim())
                .filter(|line| !line.is_empty()),
        )
    }

    /// Read a list file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Every compiled zone under a zoneinfo directory, sorted by name
    ///
    /// Only regular files (following symlinks) starting with the TZif
    /// magic count. Unreadable entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is not a readable directory.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a directory", dir.display()),
            )
            .into());
        }

        let mut names: Vec<String> = WalkDir::new(dir)
            .follow_links(true)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| {
                !(entry.depth() == 1
                    && entry.file_type().is_dir()
                    && SKIPPED_DIRS.iter().any(|d| entry.file_name() == *d))
            })
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| !SKIPPED_FILES.iter().any(|f| entry.file_name() == *f))
            .filter(|entry| has_tzif_magic(entry.path()))
            .filter_map(|entry| zone_name(dir, entry.path()))
            .collect();

        names.sort();
        names.dedup();
        Self::from_names(names)
    }

    /// Keep only `wanted`, in list order
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoneList`] if a wanted zone is not listed.
    pub fn restrict(&self, wanted: &[String]) -> Result<Self> {
        if let Some(missing) = wanted.iter().find(|w| !self.zones.contains(w)) {
            return Err(Error::InvalidZoneList(format!("unknown zone {missing}")));
        }
        Ok(Self {
            zones: self
                .zones
                .iter()
                .filter(|z| wanted.contains(z))
                .cloned()
                .collect(),
        })
    }

    /// Number of zones
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// True if there are no zones
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zone at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.zones.get(index).map(String::as_str)
    }

    /// Zones in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.zones.iter().map(String::as_str)
    }

    /// Zones as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.zones
    }
}

impl<'a> IntoIterator for &'a ZoneList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}

fn has_tzif_magic(path: &Path) -> bool {
    let mut magic = [0u8; 4];
    File::open(path)
        .and_then(|mut f| f.read_exact(&mut magic))
        .is_ok_and(|()| &magic == TZIF_MAGIC)
}

fn zone_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}
