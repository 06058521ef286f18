//! sift command line interface
//!
//! Sanitizes HTML, extracts plain text and makes URL slugs from files, inline
//! strings or standard input.
//!
//! - sift html page.html                    # Sanitize with the default allowlists
//! - sift html --tags p,a --input '<p>..'   # Sanitize with a custom tag allowlist
//! - sift tokens -v page.html               # Dump the token stream

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use owo_colors::OwoColorize;
use sift_html::{HtmlTokenizer, Token, TokenKind};
use sift_sanitize::{SanitizerConfig, sanitize_html_with, sanitize_reader, slug, text};

/// sift: allowlist HTML sanitizer, plain-text extractor and slug maker
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Sanitize a file with the default allowlists
    sift html comment.html

    # Sanitize inline markup, allowing only paragraphs and links
    sift html --tags p,a --attributes href --input '<p onclick="x()">hi</p>'

    # Load allowlists from a JSON file
    sift html --config allowlist.json comment.html

    # Strip tags for a preview
    echo '<p>Hello</p>' | sift text

    # Make a URL path and a file name
    sift path --input '/Blog/My First Post'
    sift name --input 'Résumé Final.PDF'

    # Show the tokens the sanitizer sees
    sift tokens -vv --input '<a href="/x">x</a>'
"#)]
struct Cli {
    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sanitize HTML, keeping only allowlisted tags and attributes
    Html {
        #[command(flatten)]
        source: InputArgs,

        /// Comma-separated tag allowlist (replaces the default)
        #[arg(long, value_delimiter = ',', value_name = "TAGS")]
        tags: Option<Vec<String>>,

        /// Comma-separated attribute allowlist (replaces the default)
        #[arg(long, value_delimiter = ',', value_name = "ATTRIBUTES")]
        attributes: Option<Vec<String>>,

        /// JSON file with `allowed_tags` and/or `allowed_attributes`
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Strip tags and print plain text
    Text {
        #[command(flatten)]
        source: InputArgs,
    },
    /// Make a URL path slug
    Path {
        #[command(flatten)]
        source: InputArgs,
    },
    /// Make a file name slug
    Name {
        #[command(flatten)]
        source: InputArgs,
    },
    /// Print the token stream
    Tokens {
        #[command(flatten)]
        source: InputArgs,
    },
}

/// Where the input comes from: a file, an inline string or stdin.
#[derive(Args, Debug)]
struct InputArgs {
    /// Input file (standard input if omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Use this string as input instead of a file
    #[arg(long, value_name = "STRING", conflicts_with = "file")]
    input: Option<String>,
}

impl InputArgs {
    /// Open the input as a byte stream.
    fn reader(&self) -> Result<Box<dyn Read>> {
        if let Some(ref input) = self.input {
            return Ok(Box::new(io::Cursor::new(input.clone().into_bytes())));
        }
        match self.file {
            Some(ref path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(io::stdin())),
        }
    }

    /// Read the whole input as text.
    fn read_to_string(&self) -> Result<String> {
        if let Some(ref input) = self.input {
            return Ok(input.clone());
        }
        let mut text = String::new();
        let _ = self
            .reader()?
            .read_to_string(&mut text)
            .context("failed to read input")?;
        Ok(text)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Html {
            source,
            tags,
            attributes,
            config,
        } => {
            let config = load_config(config, tags, attributes)?;
            let sanitized = match source.input {
                Some(ref input) => sanitize_html_with(input, &config),
                None => sanitize_reader(source.reader()?, &config),
            }
            .context("could not sanitize input")?;
            println!("{sanitized}");
        }
        Command::Text { source } => {
            println!("{}", text::strip_html(&source.read_to_string()?));
        }
        Command::Path { source } => {
            print_slug(&slug::path(source.read_to_string()?.trim_end_matches('\n')));
        }
        Command::Name { source } => {
            print_slug(&slug::name(source.read_to_string()?.trim_end_matches('\n')));
        }
        Command::Tokens { source } => {
            print_tokens(HtmlTokenizer::from_reader(source.reader()?))?;
        }
    }

    Ok(())
}

/// `RUST_LOG` still applies on top of the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Build the allowlists: the JSON file (or the defaults), then flag overrides.
fn load_config(
    path: Option<PathBuf>,
    tags: Option<Vec<String>>,
    attributes: Option<Vec<String>>,
) -> Result<SanitizerConfig> {
    let mut config = match path {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => SanitizerConfig::default(),
    };
    if let Some(tags) = tags {
        config = config.with_tags(tags);
    }
    if let Some(attributes) = attributes {
        config = config.with_attributes(attributes);
    }
    log::debug!(
        "allowing {} tags and {} attributes",
        config.allowed_tags().len(),
        config.allowed_attributes().len()
    );
    Ok(config)
}

fn print_slug(slug: &str) {
    if slug.is_empty() {
        log::warn!("input produced an empty slug");
    }
    println!("{slug}");
}

fn print_tokens(tokenizer: HtmlTokenizer) -> Result<()> {
    for token in tokenizer {
        let token = token.context("tokenizer stopped")?;
        let kind = token.kind().to_string();
        let label = format!("{kind:<14}");
        let detail = describe(&token);
        match token.kind() {
            TokenKind::StartTag | TokenKind::SelfClosingTag => {
                println!("{} {detail}", label.green());
            }
            TokenKind::EndTag => println!("{} {detail}", label.yellow()),
            TokenKind::Text => println!("{} {detail}", label.cyan()),
            TokenKind::Comment | TokenKind::Doctype | TokenKind::EndOfFile => {
                println!("{} {}", label.dimmed(), detail.dimmed());
            }
        }
    }
    Ok(())
}

fn describe(token: &Token) -> String {
    match token {
        Token::Text { data } | Token::Comment { data } => format!("{data:?}"),
        Token::EndOfFile => String::new(),
        Token::Doctype { .. } | Token::StartTag { .. } | Token::EndTag { .. } => token.to_string(),
    }
}
