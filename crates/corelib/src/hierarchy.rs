//! Hierarchy path value type.
//!
//! A hierarchy path is the ordered root-to-leaf sequence of resource names
//! describing where a data object lives in the resource tree. On the wire it
//! is the names joined by `";"`, root first, e.g. `"rootResc;midResc;leafResc"`.
//!
//! Parsing is purely syntactic: it never checks that the named resources
//! exist. Existence validation belongs to [`crate::resource::ResourceTree`].

use crate::error::{Error, Result};
use std::fmt;

/// Delimiter between resource names in the wire format.
pub const DELIMITER: char = ';';

/// Immutable root-to-leaf sequence of resource names.
///
/// # Invariants
///
/// - Always holds at least one element. "No hierarchy" is expressed as
///   `Option<HierarchyPath>` in APIs and as the empty string on the wire.
/// - No element contains the delimiter.
///
/// Cheap to clone; all mutating-looking operations return new values.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct HierarchyPath {
    levels: Vec<String>,
}

impl HierarchyPath {
    /// Parse a wire-format hierarchy string.
    ///
    /// Round-trip law: `parse(s).to_string() == s` for any well-formed `s`.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::EmptyHierarchy);
        }
        let levels: Vec<String> = s.split(DELIMITER).map(str::to_owned).collect();
        if levels.iter().any(|l| l.is_empty()) {
            return Err(Error::MalformedHierarchy(s.to_owned()));
        }
        Ok(Self { levels })
    }

    /// Single-element hierarchy consisting of just a root resource name.
    pub fn from_root(name: &str) -> Result<Self> {
        Self::check_name(name)?;
        Ok(Self {
            levels: vec![name.to_owned()],
        })
    }

    /// The root (first) resource name.
    pub fn root(&self) -> &str {
        // levels is non-empty by construction
        &self.levels[0]
    }

    /// The leaf (last) resource name.
    pub fn leaf(&self) -> &str {
        &self.levels[self.levels.len() - 1]
    }

    /// Number of levels in the hierarchy.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Iterate the names root first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(String::as_str)
    }

    /// New hierarchy with `name` appended below the current leaf.
    pub fn append(&self, name: &str) -> Result<Self> {
        Self::check_name(name)?;
        let mut levels = self.levels.clone();
        levels.push(name.to_owned());
        Ok(Self { levels })
    }

    /// New hierarchy with `name` prepended above the current root.
    pub fn prepend(&self, name: &str) -> Result<Self> {
        Self::check_name(name)?;
        let mut levels = Vec::with_capacity(self.levels.len() + 1);
        levels.push(name.to_owned());
        levels.extend(self.levels.iter().cloned());
        Ok(Self { levels })
    }

    /// True if `name` appears at any level of this hierarchy.
    pub fn contains(&self, name: &str) -> bool {
        self.levels.iter().any(|l| l == name)
    }

    fn check_name(name: &str) -> Result<()> {
        if name.is_empty() || name.contains(DELIMITER) {
            return Err(Error::MalformedHierarchy(name.to_owned()));
        }
        Ok(())
    }
}

impl fmt::Display for HierarchyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.levels.join(";"))
    }
}

impl std::str::FromStr for HierarchyPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let hier = HierarchyPath::parse("rootResc;midResc;leafResc").unwrap();
        assert_eq!(hier.to_string(), "rootResc;midResc;leafResc");
        assert_eq!(hier.depth(), 3);
    }

    #[test]
    fn test_root_and_leaf() {
        let hier = HierarchyPath::parse("a;b;c").unwrap();
        assert_eq!(hier.root(), "a");
        assert_eq!(hier.leaf(), "c");

        // Single-element path: root == leaf
        let single = HierarchyPath::parse("a").unwrap();
        assert_eq!(single.root(), "a");
        assert_eq!(single.leaf(), "a");
    }

    #[test]
    fn test_empty_is_an_error() {
        assert_eq!(HierarchyPath::parse(""), Err(Error::EmptyHierarchy));
    }

    #[test]
    fn test_empty_segment_is_malformed() {
        assert!(matches!(
            HierarchyPath::parse("a;;c"),
            Err(Error::MalformedHierarchy(_))
        ));
        assert!(matches!(
            HierarchyPath::parse("a;b;"),
            Err(Error::MalformedHierarchy(_))
        ));
    }

    #[test]
    fn test_append_prepend() {
        let hier = HierarchyPath::from_root("root").unwrap();
        let hier = hier.append("leaf").unwrap();
        assert_eq!(hier.to_string(), "root;leaf");

        let hier = hier.prepend("super").unwrap();
        assert_eq!(hier.to_string(), "super;root;leaf");
        assert_eq!(hier.root(), "super");
        assert_eq!(hier.leaf(), "leaf");
    }

    #[test]
    fn test_name_with_delimiter_rejected() {
        assert!(HierarchyPath::from_root("a;b").is_err());
        let hier = HierarchyPath::from_root("root").unwrap();
        assert!(hier.append("x;y").is_err());
    }
}
