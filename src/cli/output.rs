//! Output formatting for emitted entry commands.

use fake_artist::entry::EntryCommand;

/// Output format for the emitted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render a command in the given format.
pub fn render_command(command: &EntryCommand, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => command.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(command)?,
    })
}

/// Print a command to stdout for the session layer to pick up.
pub fn print_command(command: &EntryCommand, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_command(command, format)?);
    Ok(())
}
