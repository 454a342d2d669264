use coop_core::{ValidationErrors, ValueObject};

use crate::text::{name_key, normalize_title};

pub const CATEGORY_NAME_MAX_CHARS: usize = 50;
pub const CATEGORY_DESCRIPTION_MAX_CHARS: usize = 200;

/// Raw category fields as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
        }
    }
}

/// Validated category (value object).
///
/// The name is always trimmed, title-cased and 1..=50 chars long; the
/// description, when present, is at most 200 chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    description: Option<String>,
}

impl ValueObject for Category {}

impl Category {
    /// Validate and normalize raw category input.
    pub fn parse(input: CategoryInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = normalize_title(&input.name);
        let name_len = name.chars().count();
        if name_len == 0 {
            errors.add("name", "must not be empty");
        } else if name_len > CATEGORY_NAME_MAX_CHARS {
            errors.add(
                "name",
                format!("must be at most {CATEGORY_NAME_MAX_CHARS} characters"),
            );
        }

        if let Some(description) = &input.description {
            if description.chars().count() > CATEGORY_DESCRIPTION_MAX_CHARS {
                errors.add(
                    "description",
                    format!("must be at most {CATEGORY_DESCRIPTION_MAX_CHARS} characters"),
                );
            }
        }

        errors.into_result(Self {
            name,
            description: input.description,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether `name` refers to this category once both are normalized.
    pub fn matches_name(&self, name: &str) -> bool {
        name_key(&self.name) == name_key(name)
    }
}
