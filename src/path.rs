//! Typed naming paths.
//!
//! A `Path` is the root label plus one `Segment` per step down the tree. It is
//! non-empty by construction (the root label is not a segment), and segments
//! are tokens rather than raw strings so list positions and field names can
//! never be confused with each other.
use std::borrow::Cow;
use std::fmt;

/// Placeholder nouns for list members, indexed by position.
/// Past the end of the vocabulary the decimal index is used.
pub const POSITION_NOUNS: [&str; 16] = [
    "Object",
    "Entity",
    "Thing",
    "Instance",
    "Constituent",
    "Specimen",
    "Gadget",
    "Widget",
    "Gizmo",
    "Part",
    "Chunk",
    "Piece",
    "Thingy",
    "Thingamajig",
    "Whatsit",
    "Doodad",
];

pub const DEFAULT_ROOT: &str = "Root";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member, named by its JSON key
    Field(String),
    /// List member at the given index
    Position(usize),
}

impl Segment {
    /// Text this segment contributes to a derived type name.
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            Segment::Field(name) => Cow::Borrowed(name.as_str()),
            Segment::Position(index) => match POSITION_NOUNS.get(*index) {
                Some(noun) => Cow::Borrowed(noun),
                None => Cow::Owned(index.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    root: String,
    segments: Vec<Segment>,
}

impl Path {
    pub fn root(label: impl Into<String>) -> Self {
        Self { root: label.into(), segments: Vec::new() }
    }

    /// Path of an object member. An empty key adds no segment.
    pub fn field(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        self.child(Segment::Field(name.to_string()))
    }

    /// Path of the list member at `index`.
    pub fn position(&self, index: usize) -> Self {
        self.child(Segment::Position(index))
    }

    fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { root: self.root.clone(), segments }
    }

    pub fn root_label(&self) -> &str {
        &self.root
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Position(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nouns_cycle_then_fall_back_to_index() {
        let root = Path::root("Root");
        assert_eq!(root.position(0).segments()[0].label(), "Object");
        assert_eq!(root.position(1).segments()[0].label(), "Entity");
        assert_eq!(root.position(15).segments()[0].label(), "Doodad");
        assert_eq!(root.position(16).segments()[0].label(), "16");
        assert_eq!(root.position(230).segments()[0].label(), "230");
    }

    #[test]
    fn empty_field_name_adds_no_segment() {
        let root = Path::root("Root");
        let same = root.field("");
        assert_eq!(same, root);
        assert!(same.segments().is_empty());
        assert!(same.is_root());
    }

    #[test]
    fn children_extend_parent_without_mutating_it() {
        let root = Path::root("Root");
        let a = root.field("a");
        let item = a.position(2);
        assert!(root.is_root());
        assert_eq!(a.segments(), &[Segment::Field("a".into())]);
        assert_eq!(
            item.segments(),
            &[Segment::Field("a".into()), Segment::Position(2)]
        );
        assert_eq!(item.root_label(), "Root");
    }

    #[test]
    fn display_is_readable() {
        let path = Path::root("Root").field("users").position(3).field("name");
        assert_eq!(path.to_string(), "Root.users[3].name");
    }
}
