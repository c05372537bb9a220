mod platform;

use std::env;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uplan_core::Locale;
use uplan_engine::EngineHandle;
use uplan_logging::{uplan_info, LogDestination, DEFAULT_LOG_FILE};

use platform::app::{run_interactive, run_once};
use platform::config::{AppConfig, Overrides};
use platform::effects::EffectRunner;
use platform::ui::render::{render_labels, should_colorize};

#[derive(Parser, Debug)]
#[command(name = "uplan")]
#[command(version)]
#[command(about = "Create ICS calendar feeds for University of Vienna courses")]
struct Cli {
    /// Configuration file (default: ./uplan.ron if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base URL of the feed service
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    /// Log destination: file, terminal, both or off
    #[arg(long, global = true, value_name = "DEST")]
    log: Option<LogDestination>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a feed once and print the result
    Submit {
        /// Comma-separated course IDs, e.g. 051011,051012-3
        #[arg(long)]
        courses: String,

        /// Semester code, e.g. 2024W; empty selects the current semester
        #[arg(long, default_value = "")]
        semester: String,

        /// UI language (de or en)
        #[arg(long)]
        lang: Option<Locale>,
    },

    /// Fill in the form line by line (default)
    Interactive {
        /// UI language (de or en)
        #[arg(long)]
        lang: Option<Locale>,
    },

    /// Print the display strings of a language
    Labels {
        /// UI language (de or en)
        #[arg(long)]
        lang: Option<Locale>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let no_color = env::var_os("NO_COLOR");
    if !should_colorize(io::stdout().is_terminal(), no_color.as_deref()) {
        colored::control::set_override(false);
    }
    let command = cli.command.unwrap_or(Command::Interactive { lang: None });
    let language = match &command {
        Command::Submit { lang, .. }
        | Command::Interactive { lang }
        | Command::Labels { lang } => *lang,
    };

    let settings = AppConfig::load(cli.config.as_deref())
        .context("loading configuration")?
        .resolve(Overrides {
            server_url: cli.server,
            language,
            log: cli.log,
        })
        .context("resolving configuration")?;

    uplan_logging::initialize(
        settings.log,
        settings.log_level,
        &PathBuf::from(DEFAULT_LOG_FILE),
    );
    uplan_info!(
        "uplan starting server={} locale={}",
        settings.client.base_url,
        settings.locale
    );
    match &settings.config_source {
        Some(path) => uplan_info!("Loaded config from {:?}", path),
        None => uplan_info!("No config file, using defaults"),
    }

    if let Command::Labels { .. } = command {
        print!("{}", render_labels(settings.locale));
        return Ok(ExitCode::SUCCESS);
    }

    let engine = EngineHandle::new(settings.client.clone()).context("starting engine")?;
    let runner = EffectRunner::new(engine);

    match command {
        Command::Submit {
            courses, semester, ..
        } => {
            let (success, _) = run_once(runner, settings.locale, &courses, &semester, io::stdout())?;
            Ok(if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Interactive { .. } => {
            let input = BufReader::new(io::stdin());
            run_interactive(runner, settings.locale, input, io::stdout())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Labels { .. } => Ok(ExitCode::SUCCESS),
    }
}
