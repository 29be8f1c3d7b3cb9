//! Core recipe types for recipebox.
//!
//! A [`Recipe`] carries the fields every dish shares; its [`RecipeKind`]
//! says whether it is a standard recipe or a homemade one with a source
//! label. User-entered recipes arrive as a [`RecipeDraft`] and are validated
//! into a homemade [`Recipe`].

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::storage::format::{HOMEMADE_TAG, STANDARD_TAG};

/// Source label given to homemade recipes when none is supplied.
pub const DEFAULT_SOURCE: &str = "Koleksi Pribadi";

/// Fraction of the cooking time assumed for preparation.
pub const DEFAULT_PREP_FACTOR: f64 = 0.2;

/// Label shown on the detail card for recipes without a source.
const PUBLIC_ARCHIVE: &str = "Public archive";

/// Which variant of recipe this is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecipeKind {
    /// A plain recipe.
    #[default]
    Standard,
    /// A recipe from a personal or named collection.
    Homemade {
        /// Where the recipe came from.
        source: String,
    },
}

impl RecipeKind {
    /// The discriminator used for this variant in the data file.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Standard => STANDARD_TAG,
            Self::Homemade { .. } => HOMEMADE_TAG,
        }
    }
}

/// A named dish: ingredients, steps and cooking time.
///
/// Ingredient and step entries are always trimmed and never blank;
/// [`Recipe::new`] normalizes whatever it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    name: String,
    ingredients: Vec<String>,
    steps: Vec<String>,
    cooking_time: u32,
    kind: RecipeKind,
}

impl Recipe {
    /// Create a standard recipe.
    #[must_use]
    pub fn new<I, J>(name: impl Into<String>, ingredients: I, steps: J, cooking_time: u32) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        Self {
            name: name.into().trim().to_string(),
            ingredients: normalize_entries(ingredients),
            steps: normalize_entries(steps),
            cooking_time,
            kind: RecipeKind::Standard,
        }
    }

    /// Create a homemade recipe carrying [`DEFAULT_SOURCE`].
    #[must_use]
    pub fn homemade<I, J>(
        name: impl Into<String>,
        ingredients: I,
        steps: J,
        cooking_time: u32,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        Self::new(name, ingredients, steps, cooking_time).with_source(DEFAULT_SOURCE)
    }

    /// Mark this recipe as homemade with the given source label.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.kind = RecipeKind::Homemade {
            source: source.into(),
        };
        self
    }

    /// The recipe's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ingredient names, in entry order.
    #[must_use]
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Step descriptions, in order.
    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Cooking time in minutes.
    #[must_use]
    pub fn cooking_time(&self) -> u32 {
        self.cooking_time
    }

    /// The recipe variant.
    #[must_use]
    pub fn kind(&self) -> &RecipeKind {
        &self.kind
    }

    /// The source label, for homemade recipes.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match &self.kind {
            RecipeKind::Standard => None,
            RecipeKind::Homemade { source } => Some(source),
        }
    }

    /// Whether this is a homemade recipe.
    #[must_use]
    pub fn is_homemade(&self) -> bool {
        matches!(self.kind, RecipeKind::Homemade { .. })
    }

    /// Estimated preparation time using [`DEFAULT_PREP_FACTOR`].
    #[must_use]
    pub fn prep_time(&self) -> u32 {
        self.prep_time_with(DEFAULT_PREP_FACTOR)
    }

    /// Estimated preparation time: `floor(cooking_time * factor)`.
    ///
    /// Negative or non-finite factors yield 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn prep_time_with(&self, factor: f64) -> u32 {
        let minutes = (f64::from(self.cooking_time) * factor).floor();
        if minutes.is_finite() && minutes > 0.0 {
            minutes.min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    }

    /// Whether the cooking time exceeds `threshold` minutes.
    #[must_use]
    pub fn is_long_running(&self, threshold: u32) -> bool {
        self.cooking_time > threshold
    }

    /// Whether any ingredient equals `term`, ignoring case and surrounding
    /// whitespace. `term` is expected to already be lowercase and trimmed.
    #[must_use]
    pub fn has_ingredient(&self, term: &str) -> bool {
        self.ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase() == term)
    }

    /// Cooking time, ingredients, steps and (for homemade recipes) source.
    #[must_use]
    pub fn details(&self) -> String {
        let mut details = format!(
            "Cooking time: {} minutes\nIngredients: {}\nSteps: {}",
            self.cooking_time,
            self.ingredients.join(", "),
            self.steps.join("; ")
        );
        if let Some(source) = self.source() {
            let _ = write!(details, "\nSource: {source}");
        }
        details
    }

    /// The full detail card shown when a recipe is viewed.
    #[must_use]
    pub fn card(&self, prep_factor: f64) -> String {
        format!(
            "RECIPE: {}\n\
             Estimated prep time: {} minutes\n\
             ----------------------------------------\n\
             Cooking time: {} minutes\n\
             Ingredients: {}\n\
             Steps:\n   {}\n\
             Source: {}",
            self.name,
            self.prep_time_with(prep_factor),
            self.cooking_time,
            self.ingredients.join(", "),
            self.steps.join("; "),
            self.source().unwrap_or(PUBLIC_ARCHIVE)
        )
    }
}

/// Trim every entry and drop the blank ones.
fn normalize_entries<I>(entries: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| entry.as_ref().trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// A recipe as typed into the add-recipe form, before validation.
///
/// Ingredients and steps are comma separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    /// Recipe name.
    pub name: String,
    /// Comma separated ingredient names.
    pub ingredients: String,
    /// Comma separated step descriptions.
    pub steps: String,
    /// Cooking time in minutes, as typed.
    pub cooking_time: String,
}

impl RecipeDraft {
    /// Validate the draft into a homemade recipe with the given source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any field is blank or the cooking
    /// time is not a whole, non-negative number of minutes.
    pub fn validate(&self, source: &str) -> Result<Recipe> {
        let fields = [
            ("name", &self.name),
            ("ingredients", &self.ingredients),
            ("steps", &self.steps),
            ("cooking time", &self.cooking_time),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::validation(field, "all fields are required"));
            }
        }

        let cooking_time: u32 = self.cooking_time.trim().parse().map_err(|_| {
            Error::validation(
                "cooking time",
                format!(
                    "must be a whole number of minutes, got '{}'",
                    self.cooking_time.trim()
                ),
            )
        })?;

        Ok(Recipe::new(
            self.name.as_str(),
            self.ingredients.split(','),
            self.steps.split(','),
            cooking_time,
        )
        .with_source(source))
    }
}
