mod app;
mod catalog;
mod config;
mod error;
mod input;
mod lyrics;
mod player;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "singalong", version, about = "Terminal music player with synced lyrics")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Log at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Print the track catalog to stdout (headless).
    Tracks,
    /// Parse a lyric file or URL and print its cues (headless).
    Lyrics {
        source: String,
        /// Also report the cue active at this playback position.
        #[arg(long)]
        at: Option<f64>,
    },

    /// Audio output device management (mpv).
    Audio {
        #[command(subcommand)]
        cmd: AudioCommand,
    },
}

#[derive(Debug, Subcommand)]
enum AudioCommand {
    /// List mpv audio devices.
    List,
    /// Set mpv audio device (name as shown in list).
    Set { device: String },
    /// Clear mpv audio device override.
    Clear,
}

fn init_logging(verbose: bool, log_file: Option<&std::path::Path>) -> anyhow::Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level);

    match log_file {
        // The TUI owns the terminal, so log lines go to a file.
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create dir {}", parent.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let cfg_path = match cli.config.clone() {
        Some(p) => p,
        None => config::default_config_path().context("default config path")?,
    };

    let command = cli.command.unwrap_or(Command::Tui);
    let log_file = matches!(command, Command::Tui).then(|| cfg.paths.data_dir.join("singalong.log"));
    init_logging(cli.verbose, log_file.as_deref())?;

    match command {
        Command::Tui => {
            let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            let mut app = app::App::new(cfg, cfg_path)?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Tracks => {
            let catalog = catalog::Catalog::new(cfg.tracks);
            if catalog.is_empty() {
                println!("No tracks configured in {}", cfg_path.display());
            }
            for (i, t) in catalog.tracks().iter().enumerate() {
                let lyrics = match t.lyric_source.as_deref() {
                    Some(l) => format!("  (lyrics={l})"),
                    None => String::new(),
                };
                println!("{:02}. {}  [{}]{}", i + 1, t.title, t.audio_source, lyrics);
            }
        }
        Command::Lyrics { source, at } => {
            let source = catalog::resolve_source(&source, cfg.paths.media_root.as_deref());
            let fetcher =
                lyrics::SourceFetcher::new(Duration::from_secs(cfg.lyrics.fetch_timeout_secs))?;
            let parsed = lyrics::load_lyrics(&fetcher, &source).await;
            if parsed.is_empty() {
                println!("No timed lines in {source}");
            }
            for line in &parsed.lines {
                println!("[{}] {}", lyrics::format_timestamp(line.time_ms), line.text);
            }
            if let Some(pos) = at {
                match parsed.active_index(pos) {
                    Some(i) => {
                        let line = &parsed.lines[i];
                        println!("@{pos:.2}s -> #{i} {}", line.text);
                    }
                    None => println!("@{pos:.2}s -> (none)"),
                }
            }
        }
        Command::Audio { cmd } => match cmd {
            AudioCommand::List => {
                let out = tokio::process::Command::new("mpv")
                    .args(["--audio-device=help", "--no-video", "--idle=no"])
                    .output()
                    .await
                    .context("run mpv --audio-device=help")?;
                // mpv prints help to stdout.
                print!("{}", String::from_utf8_lossy(&out.stdout));
                eprint!("{}", String::from_utf8_lossy(&out.stderr));
            }
            AudioCommand::Set { device } => {
                let mut cfg = cfg;
                cfg.player.audio_device = Some(device);
                config::save(&cfg, cli.config.as_deref()).context("save config")?;
                println!("Updated audio device in config.");
            }
            AudioCommand::Clear => {
                let mut cfg = cfg;
                cfg.player.audio_device = None;
                config::save(&cfg, cli.config.as_deref()).context("save config")?;
                println!("Cleared audio device override.");
            }
        },
    }

    Ok(())
}
