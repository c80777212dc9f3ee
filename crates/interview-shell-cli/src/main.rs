use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use interview_shell_config::Config;
use interview_shell_engine::{Route, discover_patterns, io};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    fs::{self, File},
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

mod app;
mod export;
mod ui;

use app::App;

const USAGE: &str = "Usage:\n  \
    interview-shell [--open <pattern-id>] [patterns-dir]\n  \
    interview-shell --export [out-dir] [patterns-dir]";

#[derive(Debug, PartialEq)]
enum Command {
    Tui {
        patterns_path: Option<PathBuf>,
        open: Option<Route>,
    },
    Export {
        out_dir: Option<PathBuf>,
        patterns_path: Option<PathBuf>,
    },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut export = false;
    let mut open = None;
    let mut positional = Vec::new();

    let mut args = args.iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--export" => export = true,
            "--open" => match args.next() {
                Some(id) => open = Some(Route::from_fragment(id)),
                None => return Err("--open needs a pattern id".to_string()),
            },
            flag if flag.starts_with("--") => return Err(format!("Unknown option {flag}")),
            path => positional.push(PathBuf::from(path)),
        }
    }

    if export {
        if open.is_some() {
            return Err("--open cannot be combined with --export".to_string());
        }
        if positional.len() > 2 {
            return Err("Too many arguments".to_string());
        }
        let mut positional = positional.into_iter();
        return Ok(Command::Export {
            out_dir: positional.next(),
            patterns_path: positional.next(),
        });
    }

    if positional.len() > 1 {
        return Err("Too many arguments".to_string());
    }
    Ok(Command::Tui {
        patterns_path: positional.pop(),
        open,
    })
}

fn init_logging(log_file: Option<File>) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_default_env();
    if let Some(file) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
}

/// Log file for the TUI; stderr would be drawn over.
fn open_log_file() -> Option<File> {
    let log_path = Config::log_path();
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    File::create(log_path).ok()
}

/// The patterns directory: the CLI argument, or the config file.
fn resolve_patterns_path(cli_path: Option<PathBuf>, config: Option<&Config>) -> PathBuf {
    let config_path = Config::config_path();
    let from_config = cli_path.is_none();

    let patterns_path = match (cli_path, config) {
        (Some(path), _) => path,
        (None, Some(config)) => {
            log::info!(
                "Loaded patterns path from config: {}",
                config.patterns_path.display()
            );
            config.patterns_path.clone()
        }
        (None, None) => {
            eprintln!("Error: No patterns path provided and no config file found");
            eprintln!("{USAGE}");
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
    };

    if let Err(e) = io::validate_patterns_dir(&patterns_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Patterns path '{}'{} is invalid: {e}",
            patterns_path.display(),
            source
        );
        process::exit(1);
    }

    patterns_path
}

fn load_config() -> Option<Config> {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    match command {
        Command::Export {
            out_dir,
            patterns_path,
        } => {
            init_logging(None);
            let config = load_config();
            let out_dir = match out_dir.or_else(|| config.as_ref()?.export_path.clone()) {
                Some(out_dir) => out_dir,
                None => {
                    eprintln!("Error: No export directory given and none set in the config file");
                    eprintln!("{USAGE}");
                    process::exit(1);
                }
            };
            let patterns_path = resolve_patterns_path(patterns_path, config.as_ref());

            let discovery = discover_patterns(&patterns_path)?;
            let written = export::export_site(&discovery.patterns, &out_dir)?;
            println!("Wrote {written} pages to {}", out_dir.display());
            Ok(())
        }
        Command::Tui {
            patterns_path,
            open,
        } => {
            init_logging(open_log_file());
            log::info!("interview-shell starting up");
            let config = if patterns_path.is_none() {
                load_config()
            } else {
                None
            };
            let patterns_path = resolve_patterns_path(patterns_path, config.as_ref());

            let mut app = App::new(discover_patterns(&patterns_path)?);
            if let Some(route) = open {
                app.open_route(&route);
            }
            run_tui(&mut app)
        }
    }
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }
    }
    log::info!("Leaving at route \"{}\"", app.route().fragment());
    Ok(())
}
