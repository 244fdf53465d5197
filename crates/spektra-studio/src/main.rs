mod cli;
mod clipboard;
mod command;
mod config;
mod export;
mod logging;
mod session;
mod storage;

use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use clap::Parser;
use spektra_core::css;

use crate::cli::{Cli, Command, PaletteCommand};
use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::command::{EditorCommand, PaletteAction};
use crate::config::StudioConfig;
use crate::logging::{LoggingConfig, init_logging};
use crate::session::Session;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig { env_filter: cli.log.clone(), ..Default::default() });
    let config = StudioConfig::resolve(cli.palette_file.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Edit { load } => {
            let mut session = Session::new(config, Box::new(SystemClipboard::new()));
            if let Some(path) = load {
                session.load(&mut out, &path)?;
            }
            let stdin = io::stdin();
            session.set_prompt(stdin.is_terminal());
            session.run(stdin.lock(), &mut out)?;
        }

        Command::Css { gradient, copy } => {
            let store = gradient.build_store()?;
            writeln!(out, "{}", store.css())?;
            if copy {
                let mut clipboard = SystemClipboard::new();
                match clipboard.set_text(&css::copy_payload(&store.css())) {
                    Ok(()) => eprintln!("copied"),
                    Err(e) => log::warn!("copy failed: {e:#}"),
                }
            }
        }

        Command::Export { output, gradient, width, height } => {
            let store = gradient.build_store()?;
            let (w, h) = cli::export_size(
                width.unwrap_or(config.export_width),
                height.unwrap_or(config.export_height),
            )?;
            export::export_png(store.config(), &output, w, h)?;
            writeln!(out, "{}", output.display())?;
        }

        Command::Palette { action } => {
            let action = match action.unwrap_or(PaletteCommand::List) {
                PaletteCommand::List => PaletteAction::List,
                PaletteCommand::Add { color } => PaletteAction::Add(color),
                PaletteCommand::Remove { color } => PaletteAction::Remove(color),
                PaletteCommand::Clear => PaletteAction::Clear,
            };
            let listing = action == PaletteAction::List;
            let mut session = Session::new(config, Box::new(SystemClipboard::new()));
            session.execute(EditorCommand::Palette(action), &mut out)?;
            if !listing {
                session.execute(EditorCommand::Palette(PaletteAction::List), &mut out)?;
            }
        }
    }

    Ok(())
}
