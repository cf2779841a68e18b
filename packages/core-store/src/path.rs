//! Colon-delimited paths into a store tree.

use std::fmt;

/// Separator between path segments.
pub const SEPARATOR: char = ':';

/// Errors related to path parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path string was empty.
    #[error("invalid path: empty path")]
    Empty,
    /// A segment between two separators (or at either end) was empty.
    #[error("invalid path: empty segment at position {position}")]
    EmptySegment { position: usize },
    /// A segment handed in pre-split still contained a separator.
    #[error("invalid path: segment at position {position} contains ':'")]
    SeparatorInSegment { position: usize },
}

/// A parsed path: an ordered, non-empty list of property names.
///
/// Segments never contain the `:` separator and are never empty. There is no
/// escaping and no special meaning for numeric segments.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Parse a path string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use permstore_core::Path;
    ///
    /// let path = Path::parse("display:colors:background").unwrap();
    /// assert_eq!(path.len(), 3);
    ///
    /// assert!(Path::parse("").is_err());
    /// assert!(Path::parse("display::colors").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        let segments: Vec<String> = s.split(SEPARATOR).map(str::to_string).collect();
        Self::try_from_segments(segments)
    }

    /// Build a path from already-split segments, validating each one.
    pub fn try_from_segments(segments: Vec<String>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        for (position, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment { position });
            }
            if segment.contains(SEPARATOR) {
                return Err(PathError::SeparatorInSegment { position });
            }
        }
        Ok(Path { segments })
    }

    /// Number of segments. Always at least one.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Parsed paths are never empty; kept for the usual `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over segments.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Split into the final segment and the segments leading up to it.
    pub fn split_last(&self) -> (&str, &[String]) {
        match self.segments.split_last() {
            Some((last, parents)) => (last.as_str(), parents),
            // Construction guarantees at least one segment.
            None => ("", &[]),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(":"))
    }
}

impl std::str::FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

/// Macro for creating paths from literals.
///
/// # Example
///
/// ```rust
/// use permstore_core::path;
///
/// let p = path!("users:alice:name");
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s).expect("invalid path literal")
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_paths() {
        assert_eq!(Path::parse("foo").unwrap().len(), 1);
        assert_eq!(Path::parse("foo:bar").unwrap().len(), 2);
        assert_eq!(Path::parse("foo:bar:baz").unwrap().len(), 3);
    }

    #[test]
    fn empty_path_rejected() {
        assert_eq!(Path::parse(""), Err(PathError::Empty));
    }

    #[test]
    fn empty_segments_rejected() {
        assert_eq!(
            Path::parse("foo::bar"),
            Err(PathError::EmptySegment { position: 1 })
        );
        assert_eq!(
            Path::parse(":foo"),
            Err(PathError::EmptySegment { position: 0 })
        );
        assert_eq!(
            Path::parse("foo:"),
            Err(PathError::EmptySegment { position: 1 })
        );
    }

    #[test]
    fn segments_are_not_validated_beyond_emptiness() {
        let p = Path::parse("with space:0:ünïcode/slash").unwrap();
        let segments: Vec<&str> = p.iter().collect();
        assert_eq!(segments, vec!["with space", "0", "ünïcode/slash"]);
    }

    #[test]
    fn try_from_segments_rejects_separator() {
        let result = Path::try_from_segments(vec!["a".to_string(), "b:c".to_string()]);
        assert_eq!(result, Err(PathError::SeparatorInSegment { position: 1 }));
        assert_eq!(Path::try_from_segments(Vec::new()), Err(PathError::Empty));
    }

    #[test]
    fn split_last_works() {
        let p = path!("a:b:c");
        let (last, parents) = p.split_last();
        assert_eq!(last, "c");
        assert_eq!(parents, &["a".to_string(), "b".to_string()]);

        let single = path!("a");
        let (last, parents) = single.split_last();
        assert_eq!(last, "a");
        assert!(parents.is_empty());
    }

    #[test]
    fn display_rejoins_with_colons() {
        assert_eq!(path!("foo:bar:baz").to_string(), "foo:bar:baz");
    }

    #[test]
    fn from_str_parses() {
        let p: Path = "a:b".parse().unwrap();
        assert_eq!(p, path!("a:b"));
    }

    #[test]
    fn error_display() {
        assert!(PathError::Empty.to_string().contains("empty path"));
        let e = PathError::EmptySegment { position: 2 };
        assert!(e.to_string().contains("position 2"));
    }

    #[test]
    #[should_panic(expected = "invalid path literal")]
    fn macro_panics_on_invalid_literal() {
        let _ = path!("a::b");
    }
}
