use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use spektra_core::raster::MAX_DIMENSION;
use spektra_core::{GradientKind, StopId};

/// Color used by `add` when none is given.
pub const DEFAULT_NEW_STOP_COLOR: &str = "#000000";

pub const HELP: &str = "\
commands:
  type <linear|radial|conic>     set the gradient type
  angle <deg>                    set the angle (linear, conic)
  center <x> <y>                 set the center in percent (radial, conic)
  add [color]                    append a stop at 50% (default #000000)
  color <id> <color>             recolor a stop
  pos <id> <percent>             move a stop
  random <id>                    give a stop a random color
  remove <id>                    delete a stop (at least 2 are kept)
  show                           list type, angle, center and stops
  css                            print the CSS
  copy                           copy `background: <css>;` to the clipboard
  copy <id>                      copy one stop's color to the clipboard
  share                          print a shareable message
  export <file.png> [w h]        render the gradient to PNG
  save <file.json>               save the gradient
  load <file.json>               load a saved gradient
  palette                        list saved colors
  palette add|remove <color>     edit saved colors
  palette use <n> <id>           recolor a stop from palette entry n
  palette clear                  remove all saved colors
  reset                          start over from the default gradient
  help                           show this text
  quit                           leave the editor";

/// One line of editor input.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    Kind(GradientKind),
    Angle(f64),
    Center(f64, f64),
    Add(String),
    Color(StopId, String),
    Position(StopId, f64),
    Random(StopId),
    Remove(StopId),
    Show,
    Css,
    Copy,
    /// Copies a single stop's color.
    CopyStop(StopId),
    Share,
    Export { path: PathBuf, size: Option<(u32, u32)> },
    Save(PathBuf),
    Load(PathBuf),
    Palette(PaletteAction),
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    List,
    Add(String),
    Remove(String),
    /// 1-based palette index applied to a stop.
    Use { index: usize, stop: StopId },
    Clear,
}

/// Splits off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (s, ""),
    }
}

fn number(word: &str, what: &str) -> Result<f64> {
    word.parse::<f64>()
        .with_context(|| format!("{what} must be a number, got {word:?}"))
}

fn required<'a>(word: &'a str, usage: &str) -> Result<&'a str> {
    if word.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(word)
}

/// Parses one input line. Blank lines yield `None`.
///
/// Colors may contain spaces (`rgb(1, 2, 3)`), so a color argument always
/// takes the rest of the line.
pub fn parse(line: &str) -> Result<Option<EditorCommand>> {
    let (head, rest) = split_word(line);
    if head.is_empty() {
        return Ok(None);
    }

    let cmd = match head.to_ascii_lowercase().as_str() {
        "type" => EditorCommand::Kind(required(rest, "type <linear|radial|conic>")?.parse()?),
        "angle" => EditorCommand::Angle(number(required(rest, "angle <deg>")?, "angle")?),
        "center" => {
            let (x, y) = split_word(rest);
            let y = required(y, "center <x> <y>")?;
            EditorCommand::Center(number(x, "x")?, number(y, "y")?)
        }
        "add" if rest.is_empty() => EditorCommand::Add(DEFAULT_NEW_STOP_COLOR.to_string()),
        "add" => EditorCommand::Add(rest.to_string()),
        "color" => {
            let (id, color) = split_word(rest);
            let color = required(color, "color <id> <color>")?;
            EditorCommand::Color(StopId::from(id), color.to_string())
        }
        "pos" | "position" => {
            let (id, pos) = split_word(rest);
            let pos = required(pos, "pos <id> <percent>")?;
            EditorCommand::Position(StopId::from(id), number(pos.trim_end_matches('%'), "position")?)
        }
        "random" => EditorCommand::Random(StopId::from(required(rest, "random <id>")?)),
        "remove" | "rm" => EditorCommand::Remove(StopId::from(required(rest, "remove <id>")?)),
        "show" => EditorCommand::Show,
        "css" => EditorCommand::Css,
        "copy" if rest.is_empty() => EditorCommand::Copy,
        "copy" => EditorCommand::CopyStop(StopId::from(rest)),
        "share" => EditorCommand::Share,
        "export" => parse_export(rest)?,
        "save" => EditorCommand::Save(PathBuf::from(required(rest, "save <file.json>")?)),
        "load" => EditorCommand::Load(PathBuf::from(required(rest, "load <file.json>")?)),
        "palette" => EditorCommand::Palette(parse_palette(rest)?),
        "reset" => EditorCommand::Reset,
        "help" | "?" => EditorCommand::Help,
        "quit" | "exit" => EditorCommand::Quit,
        other => bail!("unknown command {other:?} (try `help`)"),
    };
    Ok(Some(cmd))
}

fn parse_export(rest: &str) -> Result<EditorCommand> {
    let words: Vec<&str> = rest.split_whitespace().collect();
    let size = |w: &str| -> Result<u32> {
        let n = w
            .parse::<u32>()
            .with_context(|| format!("image size must be a positive integer, got {w:?}"))?;
        if n == 0 || n > MAX_DIMENSION {
            bail!("image size must be between 1 and {MAX_DIMENSION}, got {n}");
        }
        Ok(n)
    };
    match words.as_slice() {
        [path] => Ok(EditorCommand::Export { path: PathBuf::from(path), size: None }),
        [path, w, h] => Ok(EditorCommand::Export {
            path: PathBuf::from(path),
            size: Some((size(w)?, size(h)?)),
        }),
        _ => bail!("usage: export <file.png> [width height]"),
    }
}

fn parse_palette(rest: &str) -> Result<PaletteAction> {
    let (action, arg) = split_word(rest);
    Ok(match action.to_ascii_lowercase().as_str() {
        "" | "list" => PaletteAction::List,
        "add" => PaletteAction::Add(required(arg, "palette add <color>")?.to_string()),
        "remove" | "rm" => PaletteAction::Remove(required(arg, "palette remove <color>")?.to_string()),
        "use" => {
            let (n, id) = split_word(arg);
            let id = required(id, "palette use <n> <id>")?;
            let index = n
                .parse::<usize>()
                .ok()
                .filter(|&i| i > 0)
                .with_context(|| format!("palette entry must be 1 or more, got {n:?}"))?;
            PaletteAction::Use { index, stop: StopId::from(id) }
        }
        "clear" => PaletteAction::Clear,
        other => bail!("unknown palette action {other:?}"),
    })
}
