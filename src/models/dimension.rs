// src/models/dimension.rs

//! Query dimensions: the jurisdictions the archive can be filtered by.

/// Which of the archive's two disjoint jurisdiction lists a dimension
/// belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionKind {
    State,
    Country,
}

impl DimensionKind {
    /// Value of the `search.method` form field for this kind.
    pub fn search_method(self) -> &'static str {
        match self {
            DimensionKind::State => "search.state",
            DimensionKind::Country => "search.country",
        }
    }

    /// Name of the form field that carries the dimension code.
    pub fn input_field(self) -> &'static str {
        match self {
            DimensionKind::State => "input.state",
            DimensionKind::Country => "input.country",
        }
    }
}

/// One jurisdiction discovered from the landing page. Immutable once
/// discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub kind: DimensionKind,

    /// The value submitted to the archive. For countries this is the
    /// composite `ABBREV,Name` form the backend expects.
    pub code: String,

    /// Human-readable label
    pub label: String,
}

impl Dimension {
    /// A state dimension from a selector option's value and text.
    pub fn state(code: &str, label: &str) -> Self {
        Self {
            kind: DimensionKind::State,
            code: code.trim().to_string(),
            label: label.trim().to_string(),
        }
    }

    /// A country dimension from the two comma-separated parts of a
    /// selector option's value.
    pub fn country(abbrev: &str, name: &str) -> Self {
        let abbrev = abbrev.trim();
        let name = name.trim();
        Self {
            kind: DimensionKind::Country,
            code: format!("{abbrev},{name}"),
            label: name.to_string(),
        }
    }
}
