//! Line-oriented browsing over an [`ExplorerSession`].
//!
//! Reads one command per line and redraws the current frame after each.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use colored::Colorize;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{AssetCatalog, Entry, ExplorerSession, LabelConfig, View};
use crate::cli::output::entry_label;
use crate::domain::{DisplayKey, Item, WRAP_HINT};

const HELP: &str = "commands: open <name|number>, up, prev, next, left, right, reset, help, quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Open(String),
    Up,
    Prev,
    Next,
    Left,
    Right,
    Reset,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match verb.to_lowercase().as_str() {
            "open" | "o" if !rest.is_empty() => Ok(Self::Open(rest.to_string())),
            "open" | "o" => Err("open needs a name or number".into()),
            "up" | "u" => Ok(Self::Up),
            "prev" | "p" => Ok(Self::Prev),
            "next" | "n" => Ok(Self::Next),
            "left" | "l" | "<" => Ok(Self::Left),
            "right" | "r" | ">" => Ok(Self::Right),
            "reset" | "home" => Ok(Self::Reset),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Record fields in display order, empty ones left out.
pub fn item_fields(item: &Item) -> Vec<(&'static str, &str)> {
    let mut fields = vec![
        ("Scientific name", item.scientific_name.as_str()),
        ("Habitat", item.habitat.as_str()),
        ("Diet", item.diet.as_str()),
        ("Fun fact", item.fun_fact.as_str()),
        ("Local status", item.local_status.as_str()),
        ("Order", item.order.as_str()),
    ];
    if let Some(family) = &item.family {
        fields.push(("Family", family.as_str()));
    }
    fields.retain(|(_, value)| !value.is_empty());
    fields
}

fn strip_hint(s: &str) -> String {
    s.chars().filter(|&c| c != WRAP_HINT).collect()
}

/// Entry the user meant by `target`: exact name or shown label, then either
/// of those case-insensitively, then a 1-based slot number on the visible page.
///
/// At the root the shown label is the status display name.
fn resolve_target(
    entries: &[Entry],
    view: &View,
    labels: &LabelConfig,
    target: &str,
) -> Option<String> {
    let wanted = strip_hint(target);
    let shown = |e: &Entry| {
        if view.path.is_empty() {
            strip_hint(labels.status_display_name(&e.name))
        } else {
            strip_hint(&e.name)
        }
    };
    let wanted_lower = wanted.to_lowercase();
    entries
        .iter()
        .find(|e| strip_hint(&e.name) == wanted || shown(e) == wanted)
        .or_else(|| {
            entries.iter().find(|e| {
                strip_hint(&e.name).to_lowercase() == wanted_lower
                    || shown(e).to_lowercase() == wanted_lower
            })
        })
        .or_else(|| {
            let slot = wanted.parse::<usize>().ok()?.checked_sub(1)?;
            view.slots.get(slot)?.as_ref()
        })
        .map(|e| e.name.clone())
}

/// Draw the frame for the session's current state.
pub fn render<W: Write>(
    session: &ExplorerSession,
    labels: &LabelConfig,
    images: &AssetCatalog,
    out: &mut W,
) -> io::Result<()> {
    let view = session.view();
    let node = session.navigator().node();

    writeln!(out)?;
    match node.as_item() {
        Some(item) => {
            writeln!(out, "{}", item.name.cyan().bold())?;
            if let Some(up) = labels.up_label(&view.path) {
                writeln!(out, "  ^ {up}")?;
            }
            match images.image_for(&item.name) {
                Some(path) => writeln!(out, "  Image: {}", path.display())?,
                None => writeln!(out, "  (no image)")?,
            }
            for (label, value) in item_fields(item) {
                writeln!(out, "  {label}: {value}")?;
            }
        }
        None => {
            writeln!(out, "{}", labels.folder_label(&view.path).cyan().bold())?;
            if let Some(up) = labels.up_label(&view.path) {
                writeln!(out, "  ^ {up}")?;
            }
            for (i, slot) in view.slots.iter().enumerate() {
                match slot {
                    Some(entry) => {
                        let name: &str = if view.path.is_empty() {
                            labels.status_display_name(&entry.name)
                        } else {
                            &entry.name
                        };
                        writeln!(out, "  {:>2}. {}", i + 1, entry_label(name, entry.is_folder()))?;
                    }
                    None => writeln!(out, "   -")?,
                }
            }
            if view.page_count > 1 {
                writeln!(out, "  page {}/{}", view.page + 1, view.page_count)?;
            }
        }
    }

    let moves = [
        (view.can_page_left, "left"),
        (view.can_page_right, "right"),
        (view.can_go_to_prev, "prev"),
        (view.can_go_to_next, "next"),
        (view.can_go_up, "up"),
    ]
    .iter()
    .filter(|(allowed, _)| *allowed)
    .map(|(_, name)| *name)
    .join(" ");
    writeln!(out, "  [{moves}]")
}

/// Apply one command. Returns `false` once the user asked to quit.
pub fn apply<W: Write>(
    session: &mut ExplorerSession,
    labels: &LabelConfig,
    command: BrowseCommand,
    out: &mut W,
) -> io::Result<bool> {
    let moved = match command {
        BrowseCommand::Quit => return Ok(false),
        BrowseCommand::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(true);
        }
        BrowseCommand::Open(target) => {
            let entries = session.navigator().entries();
            match resolve_target(&entries, &session.view(), labels, &target) {
                Some(name) => session.push(&name),
                None => {
                    writeln!(out, "no entry '{target}' here")?;
                    return Ok(true);
                }
            }
        }
        BrowseCommand::Up => session.up(),
        BrowseCommand::Prev => session.prev(),
        BrowseCommand::Next => session.next(),
        BrowseCommand::Left => session.page_left(),
        BrowseCommand::Right => session.page_right(),
        BrowseCommand::Reset => session.reset(),
    };
    if !moved {
        writeln!(out, "(nothing there)")?;
    }
    Ok(true)
}

/// Run the read-apply-render loop until `quit` or end of input.
#[instrument(level = "debug", skip_all)]
pub fn run_browse<R: BufRead, W: Write>(
    session: &mut ExplorerSession,
    labels: &LabelConfig,
    images: &AssetCatalog,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    render(session, labels, images, out)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<BrowseCommand>() {
            Ok(command) => {
                debug!("browse command: {:?}", command);
                if !apply(session, labels, command, out)? {
                    break;
                }
                render(session, labels, images, out)?;
            }
            Err(message) => writeln!(out, "{message}\n{HELP}")?,
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("open Blue Jay".parse::<BrowseCommand>(), Ok(BrowseCommand::Open("Blue Jay".into())));
        assert_eq!("  o   2 ".parse::<BrowseCommand>(), Ok(BrowseCommand::Open("2".into())));
        assert_eq!("NEXT".parse::<BrowseCommand>(), Ok(BrowseCommand::Next));
        assert_eq!(">".parse::<BrowseCommand>(), Ok(BrowseCommand::Right));
        assert_eq!("q".parse::<BrowseCommand>(), Ok(BrowseCommand::Quit));
        assert!("open".parse::<BrowseCommand>().is_err());
        assert!("fly".parse::<BrowseCommand>().is_err());
    }

    #[test]
    fn test_item_fields_skip_empty() {
        let item = Item {
            name: "Blue Jay".into(),
            scientific_name: "Cyanocitta cristata".into(),
            habitat: String::new(),
            diet: String::new(),
            fun_fact: String::new(),
            local_status: "Native".into(),
            order: "Passeriformes".into(),
            family: None,
        };
        let labels: Vec<_> = item_fields(&item).into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Scientific name", "Local status", "Order"]);
    }
}
