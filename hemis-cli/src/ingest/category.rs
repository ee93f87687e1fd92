//! Report categories and their workbook layout
//!
//! One category corresponds to one sheet in a submitted workbook. The
//! category ↔ sheet-index coupling lives here as an explicit ordered list
//! (not a constant captured elsewhere), so partial submissions and
//! category reordering stay testable.

/// Rows of banner/title/header content above the data block.
///
/// The reporting template uses the same header depth on every sheet.
pub const HEADER_ROWS: usize = 11;

/// A program-level or report-type grouping; one sheet per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Doctorate,
    Masters,
    PostBaccalaureate,
    Baccalaureate,
    PreBaccalaureate,
    VocationalTechnical,
    Graduates,
}

/// Expected sheet order in a full submission. Index = sheet position.
pub const CATEGORY_ORDER: [Category; 7] = [
    Category::Doctorate,
    Category::Masters,
    Category::PostBaccalaureate,
    Category::Baccalaureate,
    Category::PreBaccalaureate,
    Category::VocationalTechnical,
    Category::Graduates,
];

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Doctorate => "Doctorate",
            Category::Masters => "Masters",
            Category::PostBaccalaureate => "Post-Baccalaureate",
            Category::Baccalaureate => "Baccalaureate",
            Category::PreBaccalaureate => "Pre-Baccalaureate",
            Category::VocationalTechnical => "Vocational/Technical",
            Category::Graduates => "Graduates",
        }
    }

    /// Program-level sheets map one row to program + enrollment + statistics
    /// records; the graduates sheet maps one row to one graduate record.
    pub fn is_program_level(&self) -> bool {
        !matches!(self, Category::Graduates)
    }

    /// Parse a category from its CLI/label spelling.
    pub fn parse(s: &str) -> Option<Category> {
        let normalized = s.trim().to_lowercase().replace(['-', '_', '/'], "");
        CATEGORY_ORDER.into_iter().find(|c| {
            c.label().to_lowercase().replace(['-', '/'], "") == normalized
        })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
