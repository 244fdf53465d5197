use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use spektra_core::css::{self, SharePayload};
use spektra_core::{
    GradientStore, MIN_STOPS, Palette, StopId, StopPatch, color, parse_color,
};

use crate::clipboard::ClipboardSink;
use crate::command::{self, EditorCommand, HELP, PaletteAction};
use crate::config::StudioConfig;
use crate::export;
use crate::storage::{self, PaletteStore};

/// Ranges of the editor sliders. Values outside are accepted but
/// flagged.
const ANGLE_RANGE: (f64, f64) = (0.0, 360.0);
const PERCENT_RANGE: (f64, f64) = (0.0, 100.0);

/// Whether the editor loop should keep reading.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ── Session ───────────────────────────────────────────────────────────────

/// One editing session: the gradient being edited plus its collaborators.
///
/// The session owns the [`GradientStore`]; nothing else holds it. Every
/// command runs to completion before the next is read, and collaborator
/// failures are reported without touching the gradient.
pub struct Session {
    store: GradientStore,
    palette: Palette,
    palette_store: PaletteStore,
    clipboard: Box<dyn ClipboardSink>,
    config: StudioConfig,
    prompt: bool,
}

impl Session {
    pub fn new(config: StudioConfig, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self::with_store(GradientStore::new(), config, clipboard)
    }

    pub fn with_store(
        store: GradientStore,
        config: StudioConfig,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let palette_store = PaletteStore::new(config.palette_path.clone());
        let palette = palette_store.load();
        Self { store, palette, palette_store, clipboard, config, prompt: false }
    }

    /// Print a `> ` prompt before each line (for interactive terminals).
    pub fn set_prompt(&mut self, prompt: bool) {
        self.prompt = prompt;
    }

    pub fn store(&self) -> &GradientStore {
        &self.store
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        writeln!(out, "{}", self.store.css())?;
        let mut lines = input.lines();
        loop {
            if self.prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else { break };
            match command::parse(&line?) {
                Ok(Some(cmd)) => {
                    if self.execute(cmd, out)? == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => writeln!(out, "error: {e:#}")?,
            }
        }
        Ok(())
    }

    /// Applies one command. Only output failures are returned as errors;
    /// everything else is reported on `out`.
    pub fn execute(&mut self, cmd: EditorCommand, out: &mut impl Write) -> Result<Flow> {
        let revision = self.store.revision();

        match cmd {
            EditorCommand::Kind(kind) => self.store.set_kind(kind),
            EditorCommand::Angle(angle) => {
                warn_range(out, "angle", angle, ANGLE_RANGE)?;
                self.store.set_angle(angle);
            }
            EditorCommand::Center(x, y) => {
                warn_range(out, "center x", x, PERCENT_RANGE)?;
                warn_range(out, "center y", y, PERCENT_RANGE)?;
                self.store.set_center(x, y);
            }
            EditorCommand::Add(color) => {
                if let Some(msg) = color_problem(&color) {
                    writeln!(out, "{msg}")?;
                } else {
                    let id = self.store.add_color_stop(color);
                    writeln!(out, "added stop {id}")?;
                }
            }
            EditorCommand::Color(id, color) => match color_problem(&color) {
                Some(msg) => writeln!(out, "{msg}")?,
                None => self.update(out, &id, StopPatch::color(color))?,
            },
            EditorCommand::Position(id, position) => {
                warn_range(out, "position", position, PERCENT_RANGE)?;
                self.update(out, &id, StopPatch::position(position))?;
            }
            EditorCommand::Random(id) => {
                let color = color::random_hex(&mut rand::rng());
                self.update(out, &id, StopPatch::color(color))?;
            }
            EditorCommand::Remove(id) => self.remove(out, &id)?,
            EditorCommand::Show => self.show(out)?,
            EditorCommand::Css => writeln!(out, "{}", self.store.css())?,
            EditorCommand::Copy => {
                let payload = css::copy_payload(&self.store.css());
                self.copy(out, &payload)?;
            }
            EditorCommand::CopyStop(id) => match self.store.stop(&id).map(|s| s.color.clone()) {
                Some(color) => self.copy(out, &color)?,
                None => writeln!(out, "no color stop with id `{id}`")?,
            },
            EditorCommand::Share => {
                log::info!("no share target available; printing payload");
                let share = SharePayload::new(&self.store.css());
                writeln!(out, "{}\n{}", share.title, share.text)?;
            }
            EditorCommand::Export { path, size } => {
                let (w, h) = size.unwrap_or((self.config.export_width, self.config.export_height));
                self.export(out, &path, w, h)?;
            }
            EditorCommand::Save(path) => match storage::save_gradient(&path, self.store.config()) {
                Ok(()) => writeln!(out, "saved {}", path.display())?,
                Err(e) => {
                    log::warn!("save failed: {e:#}");
                    writeln!(out, "could not save: {e:#}")?;
                }
            },
            EditorCommand::Load(path) => self.load(out, &path)?,
            EditorCommand::Palette(action) => self.palette_action(out, action)?,
            EditorCommand::Reset => self.store.reset(),
            EditorCommand::Help => writeln!(out, "{HELP}")?,
            EditorCommand::Quit => return Ok(Flow::Quit),
        }

        // Re-render whenever a new snapshot was published.
        if self.store.revision() != revision {
            writeln!(out, "{}", self.store.css())?;
        }
        Ok(Flow::Continue)
    }

    /// Replaces the gradient with one read from disk.
    pub fn load(&mut self, out: &mut impl Write, path: &Path) -> Result<()> {
        match storage::load_gradient(path) {
            Ok(config) => {
                self.store.replace(config);
                writeln!(out, "loaded {}", path.display())?;
            }
            Err(e) => {
                log::warn!("load failed: {e:#}");
                writeln!(out, "could not load: {e:#}")?;
            }
        }
        Ok(())
    }

    // ── commands ──────────────────────────────────────────────────────────

    fn update(&mut self, out: &mut impl Write, id: &StopId, patch: StopPatch) -> Result<()> {
        if let Err(e) = self.store.update_color_stop(id, patch) {
            writeln!(out, "{e}")?;
        }
        Ok(())
    }

    fn remove(&mut self, out: &mut impl Write, id: &StopId) -> Result<()> {
        if self.store.stop(id).is_none() {
            writeln!(out, "no color stop with id `{id}`")?;
        } else if self.store.config().color_stops.len() <= MIN_STOPS {
            writeln!(out, "a gradient needs at least {MIN_STOPS} stops")?;
        } else {
            self.store.remove_color_stop(id);
        }
        Ok(())
    }

    fn show(&self, out: &mut impl Write) -> Result<()> {
        let cfg = self.store.config();
        writeln!(out, "type    {}", cfg.kind)?;
        if cfg.kind.uses_angle() {
            writeln!(out, "angle   {}deg", css::Num(cfg.angle))?;
        }
        if cfg.kind.uses_center() {
            writeln!(out, "center  {}% {}%", css::Num(cfg.center_x), css::Num(cfg.center_y))?;
        }
        for (i, stop) in cfg.color_stops.iter().enumerate() {
            writeln!(out, "{:>2}. {:<9}  {:<24} {}%", i + 1, stop.id, stop.color, css::Num(stop.position))?;
        }
        Ok(())
    }

    fn copy(&mut self, out: &mut impl Write, text: &str) -> Result<()> {
        match self.clipboard.set_text(text) {
            Ok(()) => writeln!(out, "copied")?,
            // No "copied" confirmation; the session carries on.
            Err(e) => log::warn!("copy failed: {e:#}"),
        }
        Ok(())
    }

    fn export(&mut self, out: &mut impl Write, path: &Path, w: u32, h: u32) -> Result<()> {
        match export::export_png(self.store.config(), path, w, h) {
            Ok(()) => writeln!(out, "exported {}", path.display())?,
            Err(e) => {
                log::warn!("export failed: {e:#}");
                writeln!(out, "export failed: {e:#}")?;
            }
        }
        Ok(())
    }

    fn palette_action(&mut self, out: &mut impl Write, action: PaletteAction) -> Result<()> {
        let changed = match action {
            PaletteAction::List => {
                for (i, color) in self.palette.colors().iter().enumerate() {
                    writeln!(out, "{:>2}. {color}", i + 1)?;
                }
                writeln!(out, "{}/{} colors", self.palette.len(), spektra_core::palette::PALETTE_CAPACITY)?;
                false
            }
            PaletteAction::Add(color) => {
                if let Some(msg) = color_problem(&color) {
                    writeln!(out, "{msg}")?;
                    false
                } else {
                    self.palette.add(color)
                }
            }
            PaletteAction::Remove(color) => self.palette.remove(&color),
            PaletteAction::Use { index, stop } => {
                match index.checked_sub(1).and_then(|i| self.palette.get(i)).map(str::to_string) {
                    Some(color) => self.update(out, &stop, StopPatch::color(color))?,
                    None => writeln!(out, "palette has no entry {index}")?,
                }
                false
            }
            PaletteAction::Clear => {
                let had_colors = !self.palette.is_empty();
                self.palette.clear();
                had_colors
            }
        };

        if changed {
            if let Err(e) = self.palette_store.save(&self.palette) {
                log::warn!("palette not saved: {e:#}");
            }
        }
        Ok(())
    }
}

/// Message describing why `color` is rejected, if it is.
fn color_problem(color: &str) -> Option<String> {
    parse_color(color).err().map(|e| format!("{color:?} is not a color ({e})"))
}

fn warn_range(out: &mut impl Write, what: &str, v: f64, (lo, hi): (f64, f64)) -> Result<()> {
    if !(lo..=hi).contains(&v) {
        writeln!(out, "note: {what} {v} is outside {lo}..{hi}")?;
    }
    Ok(())
}
