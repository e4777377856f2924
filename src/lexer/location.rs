use std::fmt;
use std::sync::Arc;

/// Where a token or syntax node came from.
///
/// `Concrete` locations point at a character in a source file. `Generated`
/// locations belong to tokens synthesised by the parser itself (reading past
/// the end of the token sequence) and carry no position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Concrete {
        file: Arc<str>,
        row: usize,
        column: usize,
        offset: usize,
    },
    Generated {
        file: Arc<str>,
    },
}

impl Location {
    pub fn concrete(file: Arc<str>, row: usize, column: usize, offset: usize) -> Self {
        Location::Concrete {
            file,
            row,
            column,
            offset,
        }
    }

    pub fn generated(file: Arc<str>) -> Self {
        Location::Generated { file }
    }

    pub fn file(&self) -> &str {
        match self {
            Location::Concrete { file, .. } | Location::Generated { file } => file,
        }
    }

    /// 1-based column, or `None` for generated locations.
    pub fn column(&self) -> Option<usize> {
        match self {
            Location::Concrete { column, .. } => Some(*column),
            Location::Generated { .. } => None,
        }
    }

    /// 1-based row, or `None` for generated locations.
    pub fn row(&self) -> Option<usize> {
        match self {
            Location::Concrete { row, .. } => Some(*row),
            Location::Generated { .. } => None,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Location::Generated { .. })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Concrete {
                file, row, column, ..
            } => write!(f, "{file}:{row}:{column}"),
            Location::Generated { file } => write!(f, "{file}:<generated>"),
        }
    }
}
