use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use absurl_lexer::{Lexer, Token};
use absurl_rewrite::{Config, Dialect, Replacer, RuleSet};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};

#[derive(Parser)]
#[command(name = "absurl")]
#[command(about = "absurl — rewrite root-relative src/href URLs into absolute URLs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite files (or stdin) and print the result
    Rewrite {
        #[command(flatten)]
        base: BaseArgs,

        /// Input files; reads stdin when empty
        paths: Vec<PathBuf>,

        /// Write results back to the input files
        #[arg(long, conflicts_with = "output")]
        in_place: bool,

        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the token stream of a file, for debugging
    Tokens {
        #[command(flatten)]
        base: BaseArgs,

        /// Input file
        path: PathBuf,
    },
}

#[derive(Args)]
struct BaseArgs {
    /// Base URL that root-relative links are anchored at
    #[arg(long, env = "ABSURL_BASE_URL")]
    base_url: Option<String>,

    /// JSON config file (`{"baseUrl": ..., "dialect": "html"|"xml"}`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Treat input as XML (quotes escaped as &#34; / &#39;)
    #[arg(long, conflicts_with = "html")]
    xml: bool,

    /// Treat input as HTML, whatever the file extension
    #[arg(long)]
    html: bool,
}

/// Base URL and dialect after merging flags, environment and config file.
#[derive(Debug, PartialEq)]
struct Settings {
    base_url: String,
    dialect: Option<Dialect>,
}

impl Settings {
    fn dialect_for(&self, path: Option<&Path>) -> Dialect {
        match (self.dialect, path) {
            (Some(dialect), _) => dialect,
            (None, Some(path)) => Dialect::from_path(path),
            (None, None) => Dialect::Html,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Rewrite {
            base,
            paths,
            in_place,
            output,
        } => cmd_rewrite(&base, &paths, in_place, output.as_deref()),
        Command::Tokens { base, path } => cmd_tokens(&base, &path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn resolve(args: &BaseArgs) -> Result<Settings, String> {
    let config = match &args.config {
        Some(path) => Some(Config::from_file(path).map_err(|e| e.to_string())?),
        None => None,
    };

    let flag_dialect = if args.xml {
        Some(Dialect::Xml)
    } else if args.html {
        Some(Dialect::Html)
    } else {
        None
    };

    let base_url = args
        .base_url
        .clone()
        .filter(|b| !b.trim().is_empty())
        .or_else(|| config.as_ref().map(|c| c.base_url.clone()))
        .ok_or("missing base URL (use --base-url, ABSURL_BASE_URL or --config)")?;

    Ok(Settings {
        base_url,
        dialect: flag_dialect.or(config.and_then(|c| c.dialect)),
    })
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>, String> {
    match path {
        Some(p) => std::fs::read(p).map_err(|e| format!("reading {}: {e}", p.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| format!("reading stdin: {e}"))?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<(), String> {
    match path {
        Some(p) => std::fs::write(p, bytes).map_err(|e| format!("writing {}: {e}", p.display())),
        None => std::io::stdout()
            .lock()
            .write_all(bytes)
            .map_err(|e| format!("writing stdout: {e}")),
    }
}

fn cmd_rewrite(
    args: &BaseArgs,
    paths: &[PathBuf],
    in_place: bool,
    output: Option<&Path>,
) -> Result<(), String> {
    let settings = resolve(args)?;
    if output.is_some() && paths.len() > 1 {
        return Err("--output takes a single input file".into());
    }
    if in_place && paths.is_empty() {
        return Err("--in-place needs at least one input file".into());
    }

    let replacer = Replacer::new(&settings.base_url);
    debug!("base URL resolved to '{}'", replacer.rules().base());

    let inputs: Vec<Option<&Path>> = if paths.is_empty() {
        vec![None]
    } else {
        paths.iter().map(|p| Some(p.as_path())).collect()
    };

    let mut out = Vec::new();
    for input in inputs {
        let content = read_input(input)?;
        let dialect = settings.dialect_for(input);

        out.clear();
        let stats = replacer.replace_into(&content, dialect, &mut out);
        let name = input.map_or("<stdin>".into(), |p| p.display().to_string());
        info!(
            "{name}: {dialect:?}, {} rewritten, {} suppressed by {} guards",
            stats.rewritten, stats.suppressed, stats.guards
        );

        let target = if in_place { input } else { output };
        write_output(target, &out)?;
    }

    Ok(())
}

fn cmd_tokens(args: &BaseArgs, path: &Path) -> Result<(), String> {
    let settings = resolve(args)?;
    let content = read_input(Some(path))?;
    let rule_set = RuleSet::new(&settings.base_url);
    let rules = rule_set.for_dialect(settings.dialect_for(Some(path)));

    let mut listing = String::new();
    for token in Lexer::tokenize(&content, rules) {
        listing.push_str(&format_token(&token));
        listing.push('\n');
    }
    write_output(None, listing.as_bytes())
}

/// One line of the token listing: offset, kind, escaped bytes.
fn format_token(token: &Token<'_>) -> String {
    format!(
        "{:>8}  {:<14} {}",
        token.offset,
        token.kind.name(),
        token.value.escape_ascii()
    )
}
