use std::fmt;

/// The fixed category set.
///
/// Defined once and consumed by both the entry form (cycling through
/// [`Category::ALL`]) and validation; wire payloads carry the label string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Healthcare,
    Education,
    Rent,
    Loan,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Healthcare,
        Category::Education,
        Category::Rent,
        Category::Loan,
        Category::Other,
    ];

    /// Returns the canonical wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Rent => "Rent",
            Self::Loan => "Loan",
            Self::Other => "Other",
        }
    }

    /// Maps a wire label to a category.
    ///
    /// Unknown labels normalize to [`Category::Other`] so stray backend data
    /// never fails a load.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == label)
            .unwrap_or(Self::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.as_str()), category);
        }
    }

    #[test]
    fn unknown_labels_normalize_to_other() {
        assert_eq!(Category::from_label("Groceries"), Category::Other);
        assert_eq!(Category::from_label(""), Category::Other);
    }
}
