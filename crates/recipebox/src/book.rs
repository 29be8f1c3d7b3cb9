//! The recipe book: the store, shopping queue and view history owned
//! together and handed to whatever presents them.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::history::HistoryStack;
use crate::recipe::{Recipe, RecipeDraft};
use crate::shopping::{normalize, ShoppingQueue};
use crate::store::RecipeStore;

/// All recipe state for one running session.
///
/// Presentation layers receive a `RecipeBook` explicitly, call its
/// operations synchronously and re-render afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    store: RecipeStore,
    queue: ShoppingQueue,
    history: HistoryStack,
}

impl RecipeBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a book from previously persisted parts, with an empty
    /// history.
    #[must_use]
    pub fn from_parts(store: RecipeStore, queue: ShoppingQueue) -> Self {
        Self {
            store,
            queue,
            history: HistoryStack::new(),
        }
    }

    /// The recipe store.
    #[must_use]
    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    /// The shopping queue.
    #[must_use]
    pub fn queue(&self) -> &ShoppingQueue {
        &self.queue
    }

    /// The view history.
    #[must_use]
    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Add a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateRecipe`] if the name is taken; the store is
    /// left unchanged.
    pub fn add_recipe(&mut self, recipe: Recipe) -> Result<()> {
        let name = recipe.name().to_string();
        if self.store.add(recipe) {
            info!("Added recipe '{}'", name);
            Ok(())
        } else {
            Err(Error::duplicate(name))
        }
    }

    /// Validate a form draft and add it as a homemade recipe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a bad draft or
    /// [`Error::DuplicateRecipe`] for a taken name.
    pub fn add_draft(&mut self, draft: &RecipeDraft, source: &str) -> Result<&Recipe> {
        let recipe = draft.validate(source)?;
        let name = recipe.name().to_string();
        self.add_recipe(recipe)?;
        self.store.get(&name).ok_or_else(|| Error::not_found(name))
    }

    /// Look up a recipe for display and record the view in the history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecipeNotFound`] if no recipe has this name; the
    /// history is left unchanged.
    pub fn view(&mut self, name: &str) -> Result<&Recipe> {
        let Some(recipe) = self.store.get(name) else {
            return Err(Error::not_found(name));
        };
        self.history.push(recipe.name());
        Ok(recipe)
    }

    /// The most recently viewed recipe name.
    #[must_use]
    pub fn last_viewed(&self) -> Option<&str> {
        self.history.peek_last()
    }

    /// Find recipes by comma separated ingredients.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        self.store.search(query)
    }

    /// Put a single item, trimmed, at the back of the shopping list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the item is blank.
    pub fn add_to_shopping_list(&mut self, item: &str) -> Result<()> {
        let item = item.trim();
        if item.is_empty() {
            return Err(Error::validation("item", "must not be blank"));
        }
        self.queue.enqueue(item);
        Ok(())
    }

    /// Queue every ingredient of a recipe that is not already on the list.
    ///
    /// Comparison is trimmed and case-insensitive, against both the
    /// existing queue and ingredients queued earlier in this call. The first
    /// casing seen is the one kept. Returns how many items were added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecipeNotFound`] if no recipe has this name.
    pub fn queue_ingredients(&mut self, name: &str) -> Result<usize> {
        let recipe = self.store.get(name).ok_or_else(|| Error::not_found(name))?;

        let mut seen: Vec<String> = self.queue.iter().map(normalize).collect();
        let mut added = 0;
        for ingredient in recipe.ingredients() {
            let key = normalize(ingredient);
            if key.is_empty() || seen.contains(&key) {
                continue;
            }
            self.queue.enqueue(ingredient.as_str());
            seen.push(key);
            added += 1;
        }

        debug!("Queued {} ingredients from '{}'", added, name);
        Ok(added)
    }

    /// Take the next item off the shopping list.
    pub fn acquire_next(&mut self) -> Option<String> {
        self.queue.dequeue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> RecipeBook {
        let mut book = RecipeBook::new();
        book.add_recipe(Recipe::homemade(
            "Nasi Goreng Spesial",
            ["nasi", "telur", "bawang merah"],
            ["tumis bumbu", "masukkan nasi"],
            20,
        ))
        .unwrap();
        book.add_recipe(Recipe::new(
            "Omelet Keju Cepat",
            ["telur", "susu", "keju"],
            ["kocok telur", "goreng"],
            10,
        ))
        .unwrap();
        book
    }

    #[test]
    fn test_add_duplicate_leaves_store_unchanged() {
        let mut book = sample_book();
        let before = book.store().clone();

        let err = book
            .add_recipe(Recipe::new("Omelet Keju Cepat", ["tahu"], ["goreng"], 5))
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(book.store(), &before);
    }

    #[test]
    fn test_view_pushes_history() {
        let mut book = sample_book();
        assert_eq!(book.last_viewed(), None);

        book.view("Omelet Keju Cepat").unwrap();
        book.view("Nasi Goreng Spesial").unwrap();
        assert_eq!(book.last_viewed(), Some("Nasi Goreng Spesial"));
        assert_eq!(book.history().len(), 2);
    }

    #[test]
    fn test_view_unknown_recipe() {
        let mut book = sample_book();
        book.view("Omelet Keju Cepat").unwrap();

        let err = book.view("Rendang").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(book.last_viewed(), Some("Omelet Keju Cepat"));
        assert_eq!(book.history().len(), 1);
    }

    #[test]
    fn test_queue_ingredients_dedups_within_recipe() {
        let mut book = RecipeBook::new();
        book.add_recipe(Recipe::new("Custard", ["egg", "egg", "milk"], ["whisk"], 30))
            .unwrap();

        assert_eq!(book.queue_ingredients("Custard").unwrap(), 2);
        assert_eq!(book.queue().iter().collect::<Vec<_>>(), ["egg", "milk"]);
    }

    #[test]
    fn test_queue_ingredients_keeps_first_casing() {
        let mut book = RecipeBook::new();
        book.add_to_shopping_list("Telur").unwrap();
        book.add_recipe(Recipe::new("Omelet", ["telur", "SUSU", "susu "], ["fry"], 10))
            .unwrap();

        assert_eq!(book.queue_ingredients("Omelet").unwrap(), 1);
        assert_eq!(book.queue().iter().collect::<Vec<_>>(), ["Telur", "SUSU"]);
    }

    #[test]
    fn test_queue_ingredients_across_recipes() {
        let mut book = sample_book();
        assert_eq!(book.queue_ingredients("Nasi Goreng Spesial").unwrap(), 3);
        assert_eq!(book.queue_ingredients("Omelet Keju Cepat").unwrap(), 2);
        assert_eq!(
            book.queue().iter().collect::<Vec<_>>(),
            ["nasi", "telur", "bawang merah", "susu", "keju"]
        );
    }

    #[test]
    fn test_queue_ingredients_unknown_recipe() {
        let mut book = sample_book();
        assert!(book.queue_ingredients("Rendang").unwrap_err().is_not_found());
        assert!(book.queue().is_empty());
    }

    #[test]
    fn test_add_to_shopping_list_trims_and_rejects_blank() {
        let mut book = RecipeBook::new();
        book.add_to_shopping_list("  garam ").unwrap();

        let err = book.add_to_shopping_list("   ").unwrap_err();
        assert!(err.is_validation());
        assert!(book.add_to_shopping_list("").is_err());
        assert_eq!(book.queue().iter().collect::<Vec<_>>(), ["garam"]);
    }

    #[test]
    fn test_acquire_next() {
        let mut book = RecipeBook::new();
        assert_eq!(book.acquire_next(), None);

        book.add_to_shopping_list("tepung terigu").unwrap();
        book.add_to_shopping_list("ayam fillet").unwrap();
        assert_eq!(book.acquire_next().as_deref(), Some("tepung terigu"));
        assert_eq!(book.queue().len(), 1);
    }

    #[test]
    fn test_add_draft() {
        let mut book = RecipeBook::new();
        let draft = RecipeDraft {
            name: "Pisang Goreng".to_string(),
            ingredients: "pisang, tepung".to_string(),
            steps: "potong, goreng".to_string(),
            cooking_time: "15".to_string(),
        };
        let recipe = book.add_draft(&draft, "Dapur Nenek").unwrap();
        assert_eq!(recipe.source(), Some("Dapur Nenek"));
        assert!(book.store().contains("Pisang Goreng"));

        assert!(book.add_draft(&draft, "Dapur Nenek").unwrap_err().is_duplicate());
    }

    #[test]
    fn test_add_invalid_draft_leaves_store_unchanged() {
        let mut book = sample_book();
        let draft = RecipeDraft {
            name: "Pisang Goreng".to_string(),
            ingredients: "pisang".to_string(),
            steps: "goreng".to_string(),
            cooking_time: "soon".to_string(),
        };
        assert!(book.add_draft(&draft, "x").unwrap_err().is_validation());
        assert_eq!(book.store().len(), 2);
    }

    #[test]
    fn test_from_parts_starts_with_empty_history() {
        let mut queue = ShoppingQueue::new();
        queue.enqueue("garam");
        let book = RecipeBook::from_parts(sample_book().store().clone(), queue);
        assert_eq!(book.store().len(), 2);
        assert_eq!(book.queue().len(), 1);
        assert!(book.history().is_empty());
    }
}
