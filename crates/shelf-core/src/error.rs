use thiserror::Error;

/// Errors surfaced while loading and joining the catalog.
///
/// The join variants are data-integrity violations: every product must
/// resolve to exactly one category, and every category to exactly one
/// owner. They are fatal at construction time; nothing downstream can
/// work with a half-resolved catalog.
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("product {product_id} references unknown category {category_id}")]
    UnknownCategory { product_id: u32, category_id: u32 },

    #[error("category {category_id} references unknown owner {owner_id}")]
    UnknownOwner { category_id: u32, owner_id: u32 },

    #[error("fixture '{name}' failed to parse: {source}")]
    Fixture {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ShelfError {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCategory { .. } => "E2001",
            Self::UnknownOwner { .. } => "E2002",
            Self::Fixture { .. } => "E1001",
        }
    }

    /// Remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::UnknownCategory { .. } => {
                "Fix the product's categoryId in fixtures/products.json."
            }
            Self::UnknownOwner { .. } => {
                "Fix the category's ownerId in fixtures/categories.json."
            }
            Self::Fixture { .. } => "Fix the JSON syntax in the named fixture file.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ShelfError;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let all = [
            ShelfError::UnknownCategory {
                product_id: 1,
                category_id: 2,
            },
            ShelfError::UnknownOwner {
                category_id: 2,
                owner_id: 3,
            },
        ];
        let mut seen = HashSet::new();
        for err in &all {
            assert!(seen.insert(err.error_code()), "duplicate {}", err.error_code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ShelfError::UnknownOwner {
            category_id: 1,
            owner_id: 9,
        }
        .error_code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn display_names_both_ids() {
        let err = ShelfError::UnknownCategory {
            product_id: 7,
            category_id: 42,
        };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("42"));
    }
}
