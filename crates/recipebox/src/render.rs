//! Plain-text rendering shared by the one-shot commands and the interactive
//! session.

use std::io::{self, Write};

use crate::recipe::Recipe;
use crate::shopping::ShoppingQueue;

/// Write one line per recipe: name, cooking time and a homemade marker.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn recipe_list<'a, W, I>(out: &mut W, recipes: I) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut any = false;
    for recipe in recipes {
        any = true;
        let marker = if recipe.is_homemade() { " *" } else { "" };
        writeln!(
            out,
            "  {} ({} min){}",
            recipe.name(),
            recipe.cooking_time(),
            marker
        )?;
    }
    if !any {
        writeln!(out, "  No recipes found.")?;
    }
    Ok(())
}

/// Write the shopping queue, oldest first, marking the next item.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn shopping_queue<W: Write + ?Sized>(out: &mut W, queue: &ShoppingQueue) -> io::Result<()> {
    if queue.is_empty() {
        return writeln!(out, "  No items in queue.");
    }
    for (i, item) in queue.iter().enumerate() {
        let marker = if i == 0 { "  <- next" } else { "" };
        writeln!(out, "  {}. {}{}", i + 1, item, marker)?;
    }
    Ok(())
}

/// The status line reported after a recipe is added.
#[must_use]
pub fn added_message(recipe: &Recipe, long_cook_minutes: u32) -> String {
    if recipe.is_long_running(long_cook_minutes) {
        format!(
            "Recipe '{}' added (long duration: {} minutes).",
            recipe.name(),
            recipe.cooking_time()
        )
    } else {
        format!("Recipe '{}' added.", recipe.name())
    }
}
