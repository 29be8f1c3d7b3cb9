//! End-to-end checks through the public API: persist a book, reopen it, and
//! drive an interactive session against the same data file.

use recipebox::config::RecipesConfig;
use recipebox::seed::seed_defaults;
use recipebox::{DataFile, LoadStatus, Recipe, RecipeBook, RecipeKind, Session};
use tempfile::TempDir;

fn seeded_book() -> RecipeBook {
    let mut book = RecipeBook::new();
    seed_defaults(&mut book);
    book
}

#[test]
fn test_save_and_reload_book() {
    let dir = TempDir::new().unwrap();
    let data_file = DataFile::new(dir.path().join("nested").join("recipe_data.json"));

    let mut book = seeded_book();
    book.add_recipe(Recipe::homemade("Es Teh", ["teh", "es"], ["seduh"], 2).with_source("Warung"))
        .unwrap();
    book.queue_ingredients("Omelet Keju Cepat").unwrap();
    assert!(data_file.save_book(&book));

    let loaded = data_file.load();
    assert_eq!(loaded.status, LoadStatus::Loaded);

    let names: Vec<&str> = loaded.store.names().collect();
    assert_eq!(
        names,
        [
            "Nasi Goreng Spesial",
            "Omelet Keju Cepat",
            "Sup Buntut Galaxy",
            "Es Teh"
        ]
    );

    let es_teh = loaded.store.get("Es Teh").unwrap();
    assert_eq!(
        es_teh.kind(),
        &RecipeKind::Homemade {
            source: "Warung".to_string()
        }
    );
    assert_eq!(es_teh.ingredients(), ["teh", "es"]);

    let queue: Vec<&str> = loaded.queue.iter().collect();
    assert_eq!(
        queue,
        [
            "tepung terigu",
            "ayam fillet",
            "energi kristal",
            "telur",
            "susu",
            "keju",
            "garam"
        ]
    );
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recipe_data.json");
    std::fs::write(&path, "{ not json").unwrap();

    let loaded = DataFile::new(&path).load();
    assert!(matches!(loaded.status, LoadStatus::Corrupt { .. }));
    assert!(loaded.store.is_empty());
    assert!(loaded.queue.is_empty());
}

#[test]
fn test_session_persists_between_runs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recipe_data.json");

    let mut first = Session::new(seeded_book(), DataFile::new(&path), RecipesConfig::default());
    let mut out = Vec::new();
    first
        .run(
            "add Rendang | daging, santan, cabai | masak lama | 180\nqueue Rendang\ndone\nquit\n"
                .as_bytes(),
            &mut out,
        )
        .unwrap();
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Recipe 'Rendang' added (long duration: 180 minutes)."));
    assert!(output.contains("Queued 3 ingredients from 'Rendang'."));
    assert!(output.contains("Acquired 'tepung terigu'."));

    let loaded = DataFile::new(&path).load();
    assert!(loaded.status.is_loaded());
    let mut second = Session::new(loaded.into_book(), DataFile::new(&path), RecipesConfig::default());
    let mut out = Vec::new();
    second
        .run("show Rendang\nrecent\nshopping\n".as_bytes(), &mut out)
        .unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.contains("RECIPE: Rendang"));
    assert!(output.contains("Estimated prep time: 36 minutes"));
    assert!(output.contains("Source: Koleksi Pribadi"));
    assert!(output.contains("Recently viewed: Rendang"));
    assert!(output.contains("1. ayam fillet  <- next"));
    assert_eq!(second.book().queue().len(), 5);
}
