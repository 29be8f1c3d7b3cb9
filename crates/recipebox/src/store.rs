//! The recipe store: recipes keyed by their unique name.

use indexmap::IndexMap;
use tracing::debug;

use crate::recipe::Recipe;

/// Recipes keyed by name, kept in insertion order.
///
/// Names are unique: adding a recipe whose name is already present is
/// rejected and leaves the existing entry in place. There is no update or
/// delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeStore {
    recipes: IndexMap<String, Recipe>,
}

impl RecipeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `recipe` under its name if that name is free.
    ///
    /// Returns `true` if the recipe was inserted.
    pub fn add(&mut self, recipe: Recipe) -> bool {
        if self.recipes.contains_key(recipe.name()) {
            debug!("Rejecting duplicate recipe '{}'", recipe.name());
            return false;
        }
        self.recipes.insert(recipe.name().to_string(), recipe);
        true
    }

    /// Look up a recipe by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(name)
    }

    /// Whether a recipe with this exact name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name)
    }

    /// Iterate over recipes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    /// Iterate over recipe names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }

    /// Number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the store holds no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Find recipes containing any of the comma separated ingredients in
    /// `query`.
    ///
    /// Terms are trimmed and compared case-insensitively against whole
    /// ingredient names. A query with no terms matches every recipe.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        let terms: Vec<String> = query
            .split(',')
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();

        if terms.is_empty() {
            return self.iter().collect();
        }

        self.iter()
            .filter(|recipe| terms.iter().any(|term| recipe.has_ingredient(term)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RecipeStore {
    type Item = &'a Recipe;
    type IntoIter = indexmap::map::Values<'a, String, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.values()
    }
}
