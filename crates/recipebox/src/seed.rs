//! Starter recipes and shopping items for a first run.

use tracing::info;

use crate::book::RecipeBook;
use crate::recipe::Recipe;

/// The recipes a new book starts with.
#[must_use]
pub fn default_recipes() -> Vec<Recipe> {
    vec![
        Recipe::homemade(
            "Nasi Goreng Spesial",
            ["nasi", "telur", "bawang merah", "kecap manis", "cabai"],
            [
                "panaskan minyak",
                "tumis bumbu",
                "masukkan nasi",
                "aduk rata",
                "sajikan",
            ],
            20,
        ),
        Recipe::new(
            "Omelet Keju Cepat",
            ["telur", "susu", "keju", "garam"],
            ["kocok telur", "campur semua", "goreng", "lipat"],
            10,
        ),
        Recipe::new(
            "Sup Buntut Galaxy",
            [
                "buntut sapi",
                "wortel",
                "kentang",
                "bawang bombay",
                "rempah luar angkasa",
            ],
            [
                "rebus buntut",
                "tumis bumbu",
                "campur semua",
                "didihkan",
                "sajikan dengan plasma",
            ],
            90,
        )
        .with_source("Intergalactic Cook Book v2.0"),
    ]
}

/// The shopping items a new book starts with.
#[must_use]
pub fn default_shopping_items() -> [&'static str; 3] {
    ["tepung terigu", "ayam fillet", "energi kristal"]
}

/// Add the starter recipes and shopping items to `book`.
///
/// Recipes whose names are already taken are left alone.
pub fn seed_defaults(book: &mut RecipeBook) {
    let added = default_recipes()
        .into_iter()
        .filter_map(|recipe| book.add_recipe(recipe).ok())
        .count();
    let queued = default_shopping_items()
        .into_iter()
        .filter(|item| book.add_to_shopping_list(item).is_ok())
        .count();
    info!(
        "Seeded {} starter recipes and {} shopping items",
        added, queued
    );
}
