//! Line-oriented editor commands for the session runner.
//!
//! One command per line; blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! select 1
//! add
//! style backgroundColor=red shape=circle
//! line dashed
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use mindmap_graph::{ConnectorShape, LineMode, NodeId};
use mindmap_suggest::SuggestionStrategy;
use tracing::{debug, info, warn};

use crate::clipboard::ClipboardItem;
use crate::editor::{Key, KeyOutcome, MindMapEditor};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(Vec<NodeId>),
    Clear,
    Add,
    Ai,
    Delete,
    Rename { id: NodeId, label: String },
    Connect { source: NodeId, target: NodeId },
    Connector(ConnectorShape),
    Line(LineMode),
    Style(serde_json::Map<String, serde_json::Value>),
    Paste(PathBuf),
    Key(Key),
    Context(NodeId),
    Show,
    Export,
}

fn node_id(line: &str, raw: Option<&str>) -> Result<NodeId> {
    let raw = raw.ok_or_else(|| Error::invalid_command(line, "missing node id"))?;
    Ok(NodeId::new(raw)?)
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| Error::invalid_command(line, "empty command"))?;

        let command = match verb.to_lowercase().as_str() {
            "select" => Self::Select(
                words
                    .map(NodeId::new)
                    .collect::<mindmap_core::Result<Vec<_>>>()?,
            ),
            "clear" => Self::Clear,
            "add" => Self::Add,
            "ai" => Self::Ai,
            "delete" => Self::Delete,
            "rename" => {
                let id = node_id(line, words.next())?;
                let label = words.collect::<Vec<_>>().join(" ");
                if label.is_empty() {
                    return Err(Error::invalid_command(line, "missing label"));
                }
                Self::Rename { id, label }
            }
            "connect" => Self::Connect {
                source: node_id(line, words.next())?,
                target: node_id(line, words.next())?,
            },
            "connector" => Self::Connector(
                words
                    .next()
                    .ok_or_else(|| Error::invalid_command(line, "missing connector shape"))?
                    .parse()?,
            ),
            "line" => Self::Line(
                words
                    .next()
                    .ok_or_else(|| Error::invalid_command(line, "missing line mode"))?
                    .parse()?,
            ),
            "style" => {
                let mut fields = serde_json::Map::new();
                for pair in words {
                    let (key, value) = pair
                        .split_once('=')
                        .ok_or_else(|| Error::invalid_command(line, format!("expected key=value, got '{pair}'")))?;
                    fields.insert(key.to_string(), serde_json::Value::String(value.to_string()));
                }
                if fields.is_empty() {
                    return Err(Error::invalid_command(line, "no fields given"));
                }
                Self::Style(fields)
            }
            "paste" => Self::Paste(PathBuf::from(
                words
                    .next()
                    .ok_or_else(|| Error::invalid_command(line, "missing file"))?,
            )),
            "key" => Self::Key(
                words
                    .next()
                    .ok_or_else(|| Error::invalid_command(line, "missing key name"))?
                    .parse()?,
            ),
            "context" => Self::Context(node_id(line, words.next())?),
            "show" => Self::Show,
            "export" => Self::Export,
            other => return Err(Error::invalid_command(other, "unknown command")),
        };
        Ok(command)
    }
}

/// Parse one script line; `None` for blanks and comments.
///
/// # Errors
///
/// Returns an error for an unknown command or bad arguments.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Apply `command`, returning text for standard output if it produces any.
///
/// # Errors
///
/// Returns an error when the command is rejected by the editor.
pub async fn apply(
    editor: &mut MindMapEditor,
    strategy: &dyn SuggestionStrategy,
    command: Command,
) -> Result<Option<String>> {
    debug!(?command, "Applying command");
    let output = match command {
        Command::Select(ids) => {
            editor.set_selection(ids);
            None
        }
        Command::Clear => {
            editor.clear_selection();
            None
        }
        Command::Add => editor.add_child().map(|id| format!("added {id}")),
        Command::Ai => editor
            .add_ai_node(strategy)
            .await
            .map(|id| format!("added {id}")),
        Command::Delete => {
            let removal = editor.delete_selected();
            Some(format!(
                "removed {} nodes, {} edges",
                removal.nodes, removal.edges
            ))
        }
        Command::Rename { id, label } => {
            if !editor.rename_node(&id, label) {
                return Err(Error::Graph(mindmap_core::Error::node_not_found(id.as_str())));
            }
            None
        }
        Command::Connect { source, target } => {
            editor.connect(&source, &target)?;
            None
        }
        Command::Connector(shape) => {
            editor.set_connector(shape);
            None
        }
        Command::Line(mode) => {
            editor.set_line_mode(mode);
            None
        }
        Command::Style(fields) => {
            let updated = editor.update_selected_json(&serde_json::Value::Object(fields))?;
            Some(format!("updated {updated} nodes"))
        }
        Command::Paste(path) => {
            let item = ClipboardItem::from_file(&path)?;
            let updated = editor.paste(&[item]);
            Some(format!("updated {updated} nodes"))
        }
        Command::Key(key) => match editor.handle_key(key, false) {
            KeyOutcome::Ignored => None,
            KeyOutcome::AddedChild(id) => Some(format!("added {id}")),
            KeyOutcome::Deleted(removal) => Some(format!(
                "removed {} nodes, {} edges",
                removal.nodes, removal.edges
            )),
        },
        Command::Context(id) => Some(editor.context_for(&id)),
        Command::Show => Some(render_outline(editor)),
        Command::Export => Some(editor.export_json()?),
    };
    Ok(output)
}

fn render_outline(editor: &MindMapEditor) -> String {
    let mut lines: Vec<String> = editor
        .nodes()
        .iter()
        .map(|n| {
            let marker = if editor.selection().contains(n.id()) { "*" } else { " " };
            format!("{marker} {} [{}] {}", n.id(), n.data().size.as_str(), n.label())
        })
        .collect();
    lines.extend(
        editor
            .edges()
            .iter()
            .map(|e| format!("  {} -> {} ({})", e.source(), e.target(), e.style())),
    );
    lines.join("\n")
}

/// Run every line of `input` against `editor`.
///
/// Command output goes to `out`; notifications and rejected lines go to
/// `err`. A bad line does not stop the run. Returns the number of rejected
/// lines.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub async fn run_script(
    editor: &mut MindMapEditor,
    strategy: &dyn SuggestionStrategy,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<usize> {
    let mut notes = editor.notifier().subscribe();
    let mut rejected: usize = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let outcome = match parse_line(&line) {
            Ok(Some(command)) => apply(editor, strategy, command).await,
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(Some(text)) => writeln!(out, "{text}")?,
            Ok(None) => {}
            Err(e) => {
                rejected = rejected.saturating_add(1);
                let line_no = index.saturating_add(1);
                if e.is_contract_violation() {
                    warn!(line = line_no, error = %e, "Command violates graph contract");
                } else {
                    info!(line = line_no, error = %e, "Command rejected");
                }
                writeln!(err, "line {line_no}: {e}")?;
            }
        }

        for note in notes.drain() {
            writeln!(err, "[{}] {}", note.level, note.message)?;
        }
    }
    Ok(rejected)
}
