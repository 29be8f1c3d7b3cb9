//! Interactive session.
//!
//! A session keeps one [`RecipeBook`] alive across many commands, so the
//! view history means something, and saves the book when it ends.

use std::io::{BufRead, ErrorKind, Write};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::book::RecipeBook;
use crate::config::RecipesConfig;
use crate::error::{Error, Result};
use crate::recipe::RecipeDraft;
use crate::render;
use crate::storage::DataFile;

/// Prompt printed before each command.
const PROMPT: &str = "recipebox> ";

const HELP: &str = "\
Commands:
  list                                   list all recipes
  search <ingredient, ...>               find recipes using any of the ingredients
  show <name>                            show a recipe and mark it as viewed
  recent                                 show the most recently viewed recipe
  add <name> | <ingredients> | <steps> | <minutes>
                                         add a homemade recipe (lists comma separated)
  queue <name>                           put a recipe's ingredients on the shopping list
  buy <item>                             put one item on the shopping list
  shopping                               show the shopping list
  done                                   mark the next shopping item as acquired
  save                                   save now
  help                                   show this help
  quit | exit                            save and leave";

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// List every recipe.
    List,
    /// Search by comma separated ingredients.
    Search(String),
    /// Show a recipe and record the view.
    Show(String),
    /// Show the most recently viewed recipe name.
    Recent,
    /// Add a homemade recipe.
    Add(RecipeDraft),
    /// Queue a recipe's ingredients.
    Queue(String),
    /// Queue a single item.
    Buy(String),
    /// Show the shopping list.
    Shopping,
    /// Dequeue the next shopping item.
    Done,
    /// Save immediately.
    Save,
    /// Show help.
    Help,
    /// End the session.
    Quit,
}

impl FromStr for SessionCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let argument = |usage: &str| -> Result<String> {
            if rest.is_empty() {
                Err(Error::validation("command", format!("usage: {usage}")))
            } else {
                Ok(rest.to_string())
            }
        };

        match word.to_lowercase().as_str() {
            "list" | "ls" => Ok(Self::List),
            "search" | "find" => Ok(Self::Search(rest.to_string())),
            "show" | "view" => argument("show <name>").map(Self::Show),
            "recent" => Ok(Self::Recent),
            "add" => parse_draft(rest).map(Self::Add),
            "queue" => argument("queue <name>").map(Self::Queue),
            "buy" => argument("buy <item>").map(Self::Buy),
            "shopping" | "shop" => Ok(Self::Shopping),
            "done" | "acquired" => Ok(Self::Done),
            "save" => Ok(Self::Save),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(Error::validation(
                "command",
                format!("unknown command '{other}', try 'help'"),
            )),
        }
    }
}

/// Split `name | ingredients | steps | minutes` into a draft.
fn parse_draft(rest: &str) -> Result<RecipeDraft> {
    let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
    let [name, ingredients, steps, cooking_time] = parts.as_slice() else {
        return Err(Error::validation(
            "command",
            "usage: add <name> | <ingredients> | <steps> | <minutes>",
        ));
    };
    Ok(RecipeDraft {
        name: (*name).to_string(),
        ingredients: (*ingredients).to_string(),
        steps: (*steps).to_string(),
        cooking_time: (*cooking_time).to_string(),
    })
}

/// Whether the session keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// End the session.
    Quit,
}

/// An interactive session over a recipe book.
#[derive(Debug)]
pub struct Session {
    book: RecipeBook,
    data_file: DataFile,
    recipes: RecipesConfig,
}

impl Session {
    /// Start a session over `book`, persisting to `data_file`.
    #[must_use]
    pub fn new(book: RecipeBook, data_file: DataFile, recipes: RecipesConfig) -> Self {
        Self {
            book,
            data_file,
            recipes,
        }
    }

    /// The book this session works on.
    #[must_use]
    pub fn book(&self) -> &RecipeBook {
        &self.book
    }

    /// Read commands from `input` until `quit` or end of input, then save.
    ///
    /// Rejected commands and lines that are not valid UTF-8 are reported on
    /// `out` and the session continues. The book is saved even when the
    /// session ends on an I/O error.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let outcome = self.read_commands(input, out);
        if outcome.is_err() {
            warn!("Session ended early, saving before exit");
        }
        let saved = self.save(out);
        outcome.and(saved)
    }

    fn read_commands<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        writeln!(out, "Type 'help' for commands.")?;
        let mut line = String::new();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            line.clear();
            match input.read_line(&mut line) {
                Ok(0) => {
                    writeln!(out)?;
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    writeln!(out, "error: input is not valid UTF-8")?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
            if line.trim().is_empty() {
                continue;
            }

            let flow = match line.parse::<SessionCommand>() {
                Ok(command) => self.execute(command, out)?,
                Err(e) => {
                    writeln!(out, "error: {e}")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Execute one command, writing its output to `out`.
    ///
    /// Rejections (bad input, unknown recipe, duplicate name) are written
    /// to `out` rather than returned.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `out` fails.
    pub fn execute<W: Write + ?Sized>(
        &mut self,
        command: SessionCommand,
        out: &mut W,
    ) -> Result<Flow> {
        debug!("Executing {:?}", command);
        match self.apply(command, out) {
            Ok(flow) => Ok(flow),
            Err(Error::Io(e)) => Err(Error::Io(e)),
            Err(e) => {
                writeln!(out, "error: {e}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn apply<W: Write + ?Sized>(&mut self, command: SessionCommand, out: &mut W) -> Result<Flow> {
        match command {
            SessionCommand::List => render::recipe_list(out, self.book.store())?,
            SessionCommand::Search(query) => {
                render::recipe_list(out, self.book.search(&query))?;
            }
            SessionCommand::Show(name) => {
                let recipe = self.book.view(&name)?;
                writeln!(out, "{}", recipe.card(self.recipes.prep_factor))?;
                writeln!(out, "Recently viewed: {}", recipe.name())?;
            }
            SessionCommand::Recent => {
                let last = self.book.last_viewed().unwrap_or("-");
                writeln!(out, "Recently viewed: {last}")?;
            }
            SessionCommand::Add(draft) => {
                let recipe = self.book.add_draft(&draft, &self.recipes.default_source)?;
                writeln!(
                    out,
                    "{}",
                    render::added_message(recipe, self.recipes.long_cook_minutes)
                )?;
            }
            SessionCommand::Queue(name) => {
                let added = self.book.queue_ingredients(&name)?;
                writeln!(out, "Queued {added} ingredients from '{name}'.")?;
            }
            SessionCommand::Buy(item) => {
                self.book.add_to_shopping_list(&item)?;
                writeln!(out, "Queued '{}'.", item.trim())?;
            }
            SessionCommand::Shopping => render::shopping_queue(out, self.book.queue())?,
            SessionCommand::Done => match self.book.acquire_next() {
                Some(item) => writeln!(out, "Acquired '{item}'.")?,
                None => writeln!(out, "Shopping list is empty.")?,
            },
            SessionCommand::Save => self.save(out)?,
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn save<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        if self.data_file.save_book(&self.book) {
            writeln!(out, "Data saved to {}.", self.data_file.path().display())?;
        } else {
            writeln!(out, "Data could not be saved; see the log for details.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Recipe;
    use crate::seed::seed_defaults;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session {
        let mut book = RecipeBook::new();
        seed_defaults(&mut book);
        Session::new(
            book,
            DataFile::new(dir.path().join("recipe_data.json")),
            RecipesConfig::default(),
        )
    }

    fn run_lines(session: &mut Session, lines: &str) -> String {
        let mut out = Vec::new();
        session.run(lines.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("list".parse::<SessionCommand>().unwrap(), SessionCommand::List);
        assert_eq!(
            "  show   Omelet Keju Cepat ".parse::<SessionCommand>().unwrap(),
            SessionCommand::Show("Omelet Keju Cepat".to_string())
        );
        assert_eq!(
            "SEARCH telur, keju".parse::<SessionCommand>().unwrap(),
            SessionCommand::Search("telur, keju".to_string())
        );
        assert_eq!("exit".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_add() {
        let command: SessionCommand = "add Pisang Goreng | pisang, tepung | potong, goreng | 15"
            .parse()
            .unwrap();
        assert_eq!(
            command,
            SessionCommand::Add(RecipeDraft {
                name: "Pisang Goreng".to_string(),
                ingredients: "pisang, tepung".to_string(),
                steps: "potong, goreng".to_string(),
                cooking_time: "15".to_string(),
            })
        );
        assert!("add Pisang | pisang".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_parse_rejects_missing_argument() {
        assert!("show".parse::<SessionCommand>().unwrap_err().is_validation());
        assert!("fly away".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_history_across_commands() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        let output = run_lines(
            &mut session,
            "show Omelet Keju Cepat\nshow Nasi Goreng Spesial\nrecent\n",
        );

        assert!(output.contains("Recently viewed: Nasi Goreng Spesial"));
        assert_eq!(session.book().last_viewed(), Some("Nasi Goreng Spesial"));
    }

    #[test]
    fn test_show_unknown_recipe_keeps_going() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        let output = run_lines(&mut session, "show Rendang\nlist\n");

        assert!(output.contains("error: recipe 'Rendang' not found"));
        assert!(output.contains("Sup Buntut Galaxy (90 min)"));
        assert!(session.book().history().is_empty());
    }

    #[test]
    fn test_shopping_flow() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        let output = run_lines(
            &mut session,
            "queue Omelet Keju Cepat\ndone\nbuy garam\nshopping\n",
        );

        assert!(output.contains("Queued 4 ingredients from 'Omelet Keju Cepat'."));
        assert!(output.contains("Acquired 'tepung terigu'."));
        assert!(output.contains("Queued 'garam'."));
        let queue: Vec<&str> = session.book().queue().iter().collect();
        assert_eq!(
            queue,
            [
                "ayam fillet",
                "energi kristal",
                "telur",
                "susu",
                "keju",
                "garam",
                "garam"
            ]
        );
    }

    #[test]
    fn test_done_on_empty_queue() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(
            RecipeBook::new(),
            DataFile::new(dir.path().join("recipe_data.json")),
            RecipesConfig::default(),
        );
        let output = run_lines(&mut session, "done\n");
        assert!(output.contains("Shopping list is empty."));
    }

    #[test]
    fn test_add_and_duplicate() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        let output = run_lines(
            &mut session,
            "add Rendang | daging, santan | masak lama | 180\n\
             add Rendang | daging | masak | 10\n\
             add Teh | teh | seduh | sebentar\n",
        );

        assert!(output.contains("Recipe 'Rendang' added (long duration: 180 minutes)."));
        assert!(output.contains("error: recipe 'Rendang' already exists"));
        assert!(output.contains("error: invalid cooking time"));
        assert_eq!(session.book().store().len(), 4);
        let rendang = session.book().store().get("Rendang").unwrap();
        assert_eq!(rendang.source(), Some("Koleksi Pribadi"));
    }

    #[test]
    fn test_session_saves_on_quit() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        let output = run_lines(&mut session, "buy gula\nquit\nlist\n");

        assert!(output.contains("Data saved to"));
        assert!(!output.contains("Nasi Goreng Spesial (20 min)"));

        let loaded = DataFile::new(dir.path().join("recipe_data.json")).load();
        assert!(loaded.status.is_loaded());
        assert_eq!(loaded.store.len(), 3);
        assert_eq!(loaded.queue.iter().last(), Some("gula"));
    }

    #[test]
    fn test_session_saves_at_end_of_input() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        run_lines(&mut session, "add Es Teh | teh, es | seduh | 2");

        let loaded = DataFile::new(dir.path().join("recipe_data.json")).load();
        assert!(loaded.store.contains("Es Teh"));
    }

    #[test]
    fn test_invalid_utf8_line_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        let input: &[u8] = b"add Rendang | daging | masak | 180\nbuy caf\xe9\nbuy gula\nquit\n";
        let mut out = Vec::new();
        session.run(input, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("error: input is not valid UTF-8"));
        assert!(output.contains("Queued 'gula'."));
        let loaded = DataFile::new(dir.path().join("recipe_data.json")).load();
        assert!(loaded.store.contains("Rendang"));
        assert_eq!(loaded.queue.iter().last(), Some("gula"));
    }

    /// Input that fails after yielding its first line.
    struct FailingInput {
        first: Option<&'static [u8]>,
    }

    impl std::io::Read for FailingInput {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            unreachable!("read through BufRead only")
        }
    }

    impl BufRead for FailingInput {
        fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
            match self.first {
                Some(bytes) => Ok(bytes),
                None => Err(std::io::Error::other("terminal went away")),
            }
        }

        fn consume(&mut self, _amt: usize) {
            self.first = None;
        }
    }

    #[test]
    fn test_session_saves_when_input_fails() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        let input = FailingInput {
            first: Some(b"add Rendang | daging | masak | 180\n"),
        };
        let mut out = Vec::new();

        let err = session.run(input, &mut out).unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let loaded = DataFile::new(dir.path().join("recipe_data.json")).load();
        assert!(loaded.status.is_loaded());
        assert!(loaded.store.contains("Rendang"));
    }

    #[test]
    fn test_search_output() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        let mut out = Vec::new();
        session
            .execute(SessionCommand::Search("wortel".to_string()), &mut out)
            .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Sup Buntut Galaxy"));
        assert!(!output.contains("Omelet"));
    }

    #[test]
    fn test_show_renders_card() {
        let dir = TempDir::new().unwrap();
        let mut book = RecipeBook::new();
        book.add_recipe(Recipe::new("Omelet", ["telur"], ["goreng"], 10))
            .unwrap();
        let mut recipes = RecipesConfig::default();
        recipes.prep_factor = 0.5;
        let mut session = Session::new(book, DataFile::new(dir.path().join("d.json")), recipes);

        let mut out = Vec::new();
        session
            .execute(SessionCommand::Show("Omelet".to_string()), &mut out)
            .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Estimated prep time: 5 minutes"));
        assert!(output.contains("Source: Public archive"));
    }
}
