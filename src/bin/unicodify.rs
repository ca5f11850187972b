// Unicodify CLI
// Terminal host for the transformation engine and the autocorrect matcher

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use unicodify_core::transform::TransformationId;
use unicodify_core::{
    build_menu, AutocorrectEngine, FieldId, MenuEntry, Settings, TextField, TransformEngine,
};

/// Unicode fonts, casing and autocorrect for plain text
#[derive(Parser, Debug)]
#[command(name = "unicodify")]
#[command(version)]
#[command(about = "Unicode fonts, casing and autocorrect for plain text", long_about = None)]
struct Args {
    /// Settings file (default: ~/.config/unicodify/settings.toml)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Transform TEXT (or stdin) with a transformation such as font:serif-bold
    Transform {
        id: String,
        text: Option<String>,
    },

    /// Print the transformation menu with preview labels
    List,

    /// Type TEXT key by key through autocorrect; "\b" is a backspace, "\n" a line break
    ///
    /// Autocorrect is switched on for the replay even if the settings file
    /// leaves it off.
    Type { text: String },

    /// Print the compiled trigger and antipattern expressions
    Patterns,

    /// Validate the settings file and exit
    CheckConfig,
}

struct Application {
    settings: Settings,
}

impl Application {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let settings = match &args.config {
            Some(path) => Settings::from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => Settings::load_default().context("Failed to load default settings")?,
        };
        Ok(Self { settings })
    }

    fn transform(&self, id: &str, text: Option<String>) -> anyhow::Result<()> {
        let id: TransformationId = id.parse()?;
        let text = match text {
            Some(text) => text,
            None => read_stdin()?,
        };
        let engine = TransformEngine::new(self.settings.transform_config());
        println!("{}", engine.transform_selection(&text, id));
        Ok(())
    }

    fn list(&self) {
        let engine = TransformEngine::new(self.settings.transform_config());
        for entry in build_menu(&engine, self.settings.menu_flags()) {
            match entry {
                MenuEntry::Separator => println!(),
                MenuEntry::Item { id, label } => println!("{:<32} {}", id.to_string(), label),
            }
        }
    }

    fn type_text(&self, text: &str) -> anyhow::Result<()> {
        let mut config = self.settings.autocorrect_config();
        config.enabled = true;
        let engine = AutocorrectEngine::with_config(config);

        let mut field = TextField::new(FieldId(0), "");
        engine.replay(&mut field, &unescape_keys(text))?;
        println!("{}", field.text());
        Ok(())
    }

    fn patterns(&self) {
        let engine = AutocorrectEngine::with_config(self.settings.autocorrect_config());
        let Some(context) = engine.context() else {
            return;
        };
        let matcher = context.matcher();
        let none = || "(none)".to_string();
        println!("longest:      {}", matcher.longest());
        println!("symbols:      {}", matcher.symbols().pattern().unwrap_or_else(none));
        println!("antipatterns: {}", matcher.antipatterns().pattern().unwrap_or_else(none));
    }

    fn check_config(&self) {
        match self.settings.source_path() {
            Some(path) => println!("Configuration is valid: {}", path.display()),
            None => println!("No settings file found, using defaults"),
        }
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

/// Turn the two-character sequences `\b`, `\n` and `\\` into the keys they name
fn unescape_keys(text: &str) -> String {
    let mut keys = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            keys.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => keys.push('\u{8}'),
            Some('n') => keys.push('\n'),
            Some('\\') => keys.push('\\'),
            Some(other) => {
                keys.push('\\');
                keys.push(other);
            }
            None => keys.push('\\'),
        }
    }
    keys
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let app = Application::new(&args)?;
    log::debug!("Loaded settings: {:?}", app.settings);

    match args.command {
        Command::Transform { id, text } => app.transform(&id, text)?,
        Command::List => app.list(),
        Command::Type { text } => app.type_text(&text)?,
        Command::Patterns => app.patterns(),
        Command::CheckConfig => app.check_config(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["unicodify", "--config", "/tmp/test.toml", "list"]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
        assert!(!args.verbose);
        assert_eq!(args.command, Command::List);
    }

    #[test]
    fn test_args_transform() {
        let args = Args::parse_from(["unicodify", "transform", "font:serif-bold", "Hi", "--verbose"]);

        assert!(args.verbose);
        assert_eq!(
            args.command,
            Command::Transform {
                id: "font:serif-bold".to_string(),
                text: Some("Hi".to_string()),
            }
        );

        let args = Args::parse_from(["unicodify", "transform", "casing:uppercase"]);
        assert_eq!(
            args.command,
            Command::Transform {
                id: "casing:uppercase".to_string(),
                text: None,
            }
        );
    }

    #[test]
    fn test_args_check_config() {
        let args = Args::parse_from(["unicodify", "check-config"]);
        assert_eq!(args.command, Command::CheckConfig);
    }

    #[test]
    fn test_unescape_keys() {
        assert_eq!(unescape_keys(r"a :) \b"), "a :) \u{8}");
        assert_eq!(unescape_keys(r"x\ny\\z\q"), "x\ny\\z\\q");
        assert_eq!(unescape_keys("end\\"), "end\\");
    }

    #[test]
    fn test_type_replays_keys() {
        let app = Application {
            settings: Settings::new(),
        };
        let mut config = app.settings.autocorrect_config();
        config.enabled = true;
        let engine = AutocorrectEngine::with_config(config);
        let mut field = TextField::new(FieldId(0), "");
        engine.replay(&mut field, &unescape_keys(r"ok :) \b")).unwrap();
        assert_eq!(field.text(), "ok :) ");
    }
}
