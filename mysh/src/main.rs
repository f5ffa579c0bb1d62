use std::io::IsTerminal;

use clap::Parser;
use mysh::{Console, EditorConsole, Environment, Registry, StdConsole};
use mysh_config::{LogFormat, MyshConfig};

/// mysh - Interactive shell for local filesystem operations
#[derive(Parser, Debug)]
#[command(name = "mysh", version, about)]
struct Args {
    /// Configuration file (replaces the default search paths)
    #[arg(short, long, env = "MYSH_CONFIG")]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => mysh_config::load_from_file(path),
        None => mysh_config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mysh: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config, args.debug);

    let charset = encoding_rs::Encoding::for_label_no_replacement(config.shell.charset.as_bytes())
        .unwrap_or_else(|| {
            tracing::warn!("unsupported charset {}, using UTF-8", config.shell.charset);
            encoding_rs::UTF_8
        });

    let mut env = Environment::new(open_console(&config), Registry::with_builtins())
        .with_symbols(config.shell.symbols)
        .with_default_charset(charset);

    let termination = mysh::run(&mut env);
    // Dropping the environment saves the line-editor history.
    drop(env);
    std::process::exit(termination.exit_code());
}

fn init_logging(config: &MyshConfig, debug: bool) {
    let log_level = if debug {
        "debug"
    } else if !config.logging.filter.is_empty() {
        config.logging.filter.as_str()
    } else {
        config.logging.level.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn open_console(config: &MyshConfig) -> Box<dyn Console> {
    if std::io::stdin().is_terminal() && config.shell.history.enabled {
        match EditorConsole::new(&config.shell.history) {
            Ok(console) => return Box::new(console),
            Err(e) => tracing::warn!("line editor unavailable, using plain stdin: {}", e),
        }
    }
    Box::new(StdConsole::stdio())
}
