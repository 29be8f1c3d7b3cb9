//! `recipebox` - CLI for the recipe organizer
//!
//! This binary provides the command-line interface for browsing recipes,
//! adding new ones and managing the shopping list.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::Context;
use clap::Parser;

use recipebox::cli::{AddCommand, Cli, Command, ConfigCommand, ShopCommand};
use recipebox::storage::{DataFile, RecipeRecord};
use recipebox::{init_logging, render, seed, Config, LoadStatus, Recipe, RecipeBook, Session};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration, letting --data override the configured file
    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(data) = cli.data.clone() {
        config.storage.data_path = Some(data);
    }

    let data_file = config.data_file();

    // Execute the command
    match cli.command {
        Command::List(cmd) => {
            let (book, _) = open_book(&config, &data_file);
            handle_list(book.store(), cmd.json)
        }
        Command::Search(cmd) => {
            let (book, _) = open_book(&config, &data_file);
            handle_list(book.search(&cmd.query), cmd.json)
        }
        Command::Show(cmd) => {
            let (mut book, _) = open_book(&config, &data_file);
            let recipe = book.view(&cmd.name)?;
            println!("{}", recipe.card(config.recipes.prep_factor));
            Ok(())
        }
        Command::Add(cmd) => {
            let (mut book, _) = open_book(&config, &data_file);
            handle_add(&config, &data_file, &mut book, &cmd)
        }
        Command::Shop(shop_cmd) => {
            let (mut book, _) = open_book(&config, &data_file);
            handle_shop(&data_file, &mut book, shop_cmd)
        }
        Command::Status(cmd) => {
            let (book, status) = open_book(&config, &data_file);
            handle_status(&data_file, &book, &status, cmd.json)
        }
        Command::Shell => {
            let (book, _) = open_book(&config, &data_file);
            let mut session = Session::new(book, data_file, config.recipes.clone());
            session.run(io::stdin().lock(), &mut io::stdout())?;
            Ok(())
        }
        // Configuration commands never touch the data file
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

/// Load the book, seeding it when there was nothing to load.
fn open_book(config: &Config, data_file: &DataFile) -> (RecipeBook, LoadStatus) {
    let loaded = data_file.load();
    let status = loaded.status.clone();
    if let LoadStatus::Corrupt { reason } = &status {
        eprintln!(
            "warning: data file {} is unreadable ({reason}); starting fresh",
            data_file.path().display()
        );
    }

    let mut book = loaded.into_book();
    if !status.is_loaded() && config.seed.enabled {
        seed::seed_defaults(&mut book);
    }
    (book, status)
}

fn handle_list<'a, I>(recipes: I, json: bool) -> anyhow::Result<()>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    if json {
        let records: Vec<RecipeRecord> = recipes.into_iter().map(RecipeRecord::from).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        render::recipe_list(&mut io::stdout().lock(), recipes)?;
    }
    Ok(())
}

fn handle_add(
    config: &Config,
    data_file: &DataFile,
    book: &mut RecipeBook,
    cmd: &AddCommand,
) -> anyhow::Result<()> {
    let source = cmd
        .source
        .as_deref()
        .unwrap_or(&config.recipes.default_source);
    let recipe = book.add_draft(&cmd.draft(), source)?;
    println!(
        "{}",
        render::added_message(recipe, config.recipes.long_cook_minutes)
    );
    save(data_file, book);
    Ok(())
}

fn handle_shop(
    data_file: &DataFile,
    book: &mut RecipeBook,
    cmd: ShopCommand,
) -> anyhow::Result<()> {
    match cmd {
        ShopCommand::List => {
            render::shopping_queue(&mut io::stdout().lock(), book.queue())?;
            return Ok(());
        }
        ShopCommand::Add { item } => {
            book.add_to_shopping_list(&item)?;
            println!("Queued '{}'.", item.trim());
        }
        ShopCommand::Recipe { name } => {
            let added = book.queue_ingredients(&name)?;
            println!("Queued {added} ingredients from '{name}'.");
        }
        ShopCommand::Done => match book.acquire_next() {
            Some(item) => println!("Acquired '{item}'."),
            None => {
                println!("Shopping list is empty.");
                return Ok(());
            }
        },
    }
    save(data_file, book);
    Ok(())
}

fn handle_status(
    data_file: &DataFile,
    book: &RecipeBook,
    status: &LoadStatus,
    json: bool,
) -> anyhow::Result<()> {
    let stats = data_file.stats();
    if json {
        let report = serde_json::json!({
            "data_path": data_file.path(),
            "exists": stats.exists,
            "size_bytes": stats.size_bytes,
            "recipes": book.store().len(),
            "shopping_queue": book.queue().len(),
            "load_status": status.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("recipebox status");
        println!("----------------");
        println!("Data file:     {}", data_file.path().display());
        println!(
            "Size:          {}",
            if stats.exists {
                format!("{} bytes", stats.size_bytes)
            } else {
                "not created yet".to_string()
            }
        );
        println!("Load status:   {status}");
        println!("Recipes:       {}", book.store().len());
        println!("Shopping list: {} items", book.queue().len());
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current configuration:");
                println!();
                println!("[storage]");
                println!("  data_path = {:?}", config.data_path());
                println!("  atomic_writes = {}", config.storage.atomic_writes);
                println!();
                println!("[recipes]");
                println!("  prep_factor = {}", config.recipes.prep_factor);
                println!("  default_source = {:?}", config.recipes.default_source);
                println!("  long_cook_minutes = {}", config.recipes.long_cook_minutes);
                println!();
                println!("[seed]");
                println!("  enabled = {}", config.seed.enabled);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("invalid configuration in {}", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

/// Save the book, telling the user when it could not be written.
fn save(data_file: &DataFile, book: &RecipeBook) {
    if !data_file.save_book(book) {
        eprintln!(
            "warning: data could not be saved to {}",
            data_file.path().display()
        );
    }
}
