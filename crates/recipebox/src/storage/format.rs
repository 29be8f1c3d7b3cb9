//! On-disk JSON document for recipebox.
//!
//! The file has two top-level sections: `recipes`, a map from recipe name to
//! record, and `shopping_queue`, the queue as an ordered list. Each record
//! carries a `type` discriminator so the right variant comes back on load.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::recipe::{Recipe, RecipeKind};
use crate::shopping::ShoppingQueue;
use crate::store::RecipeStore;

/// Discriminator written for standard recipes.
pub const STANDARD_TAG: &str = "Recipe";

/// Discriminator written for homemade recipes.
pub const HOMEMADE_TAG: &str = "HomemadeRecipe";

/// The whole data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDocument {
    /// Recipes keyed by name, in store order.
    #[serde(default)]
    pub recipes: IndexMap<String, RecipeRecord>,
    /// Shopping queue, oldest first.
    #[serde(default)]
    pub shopping_queue: Vec<String>,
}

/// One persisted recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// Recipe name.
    pub name: String,
    /// Ingredient names.
    pub ingredients: Vec<String>,
    /// Step descriptions.
    pub steps: Vec<String>,
    /// Cooking time in minutes.
    pub cooking_time: u32,
    /// Variant discriminator, [`STANDARD_TAG`] or [`HOMEMADE_TAG`].
    #[serde(rename = "type", default = "default_tag")]
    pub kind: String,
    /// Source label; `null` for standard recipes.
    #[serde(default)]
    pub source: Option<String>,
}

fn default_tag() -> String {
    STANDARD_TAG.to_string()
}

impl From<&Recipe> for RecipeRecord {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name().to_string(),
            ingredients: recipe.ingredients().to_vec(),
            steps: recipe.steps().to_vec(),
            cooking_time: recipe.cooking_time(),
            kind: recipe.kind().tag().to_string(),
            source: recipe.source().map(str::to_string),
        }
    }
}

impl RecipeRecord {
    /// Rebuild the recipe variant named by the discriminator.
    ///
    /// Homemade records without a source get `default_source`. Unknown
    /// discriminators load as standard recipes.
    #[must_use]
    pub fn into_recipe(self, default_source: &str) -> Recipe {
        let recipe = Recipe::new(self.name, self.ingredients, self.steps, self.cooking_time);
        match self.kind.as_str() {
            HOMEMADE_TAG => {
                recipe.with_source(self.source.unwrap_or_else(|| default_source.to_string()))
            }
            STANDARD_TAG => recipe,
            other => {
                warn!(
                    "Unknown recipe type '{}' for '{}', loading as a standard recipe",
                    other,
                    recipe.name()
                );
                recipe
            }
        }
    }
}

impl DataDocument {
    /// Snapshot a store and queue for writing.
    #[must_use]
    pub fn from_state(store: &RecipeStore, queue: &ShoppingQueue) -> Self {
        Self {
            recipes: store
                .iter()
                .map(|recipe| (recipe.name().to_string(), RecipeRecord::from(recipe)))
                .collect(),
            shopping_queue: queue.iter().map(str::to_string).collect(),
        }
    }

    /// Rebuild the store and queue.
    ///
    /// Records whose name collides with one already loaded are skipped.
    #[must_use]
    pub fn into_state(self, default_source: &str) -> (RecipeStore, ShoppingQueue) {
        let mut store = RecipeStore::new();
        for (key, record) in self.recipes {
            if key != record.name {
                warn!(
                    "Recipe stored under '{}' is named '{}', using the record name",
                    key, record.name
                );
            }
            let recipe = record.into_recipe(default_source);
            let name = recipe.name().to_string();
            if !store.add(recipe) {
                warn!("Skipping duplicate recipe '{}' in data file", name);
            }
        }
        let queue = self.shopping_queue.into_iter().collect();
        (store, queue)
    }
}
