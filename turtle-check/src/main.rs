use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use turtle_check_rs::{
    compare, diff_alpha, parse_json_script, parse_script, run_script, verify_run, CheckOutcome,
    EngineConfig, PixelSnapshot, TurtleCommand, TurtleEngine,
};

/// turtle-check: Render turtle drawings and check them against reference images
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a turtle script to a PNG image
    Render {
        /// Path to the script (text, or a JSON command array if it ends in .json)
        #[clap(short, long)]
        script: PathBuf,

        /// Path to the PNG file to write
        #[clap(short, long)]
        output: PathBuf,

        /// Surface width in pixels, overriding the config file
        #[clap(long)]
        width: Option<u32>,

        /// Surface height in pixels, overriding the config file
        #[clap(long)]
        height: Option<u32>,

        /// Path to a JSON engine config
        #[clap(short, long)]
        config: Option<PathBuf>,
    },

    /// Compare the alpha channels of two PNG images
    Compare {
        /// First PNG image
        left: PathBuf,

        /// Second PNG image
        right: PathBuf,
    },

    /// Render a script on a surface the size of a reference PNG and check it
    Check {
        /// Path to the script (text, or a JSON command array if it ends in .json)
        #[clap(short, long)]
        script: PathBuf,

        /// Reference PNG image
        #[clap(short, long)]
        reference: PathBuf,

        /// Path to a JSON engine config
        #[clap(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Render {
            script,
            output,
            width,
            height,
            config,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(width) = width {
                config.width = width;
            }
            if let Some(height) = height {
                config.height = height;
            }
            let snapshot = render(&script, &config)?;
            let png = snapshot.to_png()?;
            std::fs::write(&output, png)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            log::info!("Wrote {}x{} image to {}", snapshot.width(), snapshot.height(), output.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Compare { left, right } => {
            let left = load_png(&left)?;
            let right = load_png(&right)?;
            let diff = diff_alpha(&left, &right);
            if compare(&left, &right) {
                println!("match");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("mismatch: {diff}");
                Ok(ExitCode::from(1))
            }
        }
        Commands::Check {
            script,
            reference,
            config,
        } => {
            let reference = load_png(&reference)?;
            let mut config = load_config(config.as_deref())?;
            config.width = reference.width();
            config.height = reference.height();

            let commands = load_script(&script)?;
            let mut engine = TurtleEngine::with_surface(&config)?;
            run_script(&mut engine, &commands)?;

            let outcome = verify_run(&engine, &reference);
            match &outcome {
                CheckOutcome::Correct => {
                    println!("{outcome}");
                    Ok(ExitCode::SUCCESS)
                }
                CheckOutcome::Incorrect(diff) => {
                    println!("{outcome}: {diff}");
                    Ok(ExitCode::from(1))
                }
                CheckOutcome::Unverifiable(err) => {
                    log::error!("{err}");
                    eprintln!("{outcome}");
                    Ok(ExitCode::from(2))
                }
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn load_script(path: &Path) -> Result<Vec<TurtleCommand>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let commands = if is_json {
        parse_json_script(&text)
            .with_context(|| format!("Failed to parse {} as JSON commands", path.display()))?
    } else {
        parse_script(&text).with_context(|| format!("Failed to parse {}", path.display()))?
    };
    Ok(commands)
}

fn load_png(path: &Path) -> Result<PixelSnapshot> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    PixelSnapshot::from_png(&bytes)
        .with_context(|| format!("Failed to decode {} as PNG", path.display()))
}

fn render(script: &Path, config: &EngineConfig) -> Result<PixelSnapshot> {
    let commands = load_script(script)?;
    let mut engine = TurtleEngine::with_surface(config)?;
    run_script(&mut engine, &commands)?;
    Ok(engine.capture()?)
}
