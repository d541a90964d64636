//! Command-line interface.
//!
//! Every command loads the session from the file store, applies one
//! transition, and saves it back, so each invocation is a resumable step.

mod commands;
mod inputs;
mod session;

pub use commands::{Cli, Commands};
pub use inputs::{collect_inputs, load_inputs_file, parse_key_value};
pub use session::SessionCommands;

use crate::CopyworxConfig;
use copyworx_sections::FileSessionRepository;

/// Dispatch a parsed command line.
pub async fn run(cli: Cli, config: CopyworxConfig) -> anyhow::Result<()> {
    let repository = FileSessionRepository::new(config.storage().session_dir());
    let commands = SessionCommands::new(config, repository, cli.template_file);

    match cli.command {
        Commands::Sections { template } => commands.sections(template.as_deref()),
        Commands::Start {
            inputs,
            inputs_file,
            id,
            template,
        } => {
            let form_inputs = collect_inputs(inputs_file.as_deref(), inputs)?;
            commands.start(id, template.as_deref(), form_inputs).await?;
            Ok(())
        }
        Commands::Generate { id, approve } => commands.generate(&id, approve).await,
        Commands::Show { id, prompt, json } => commands.show(&id, prompt, json).await,
        Commands::Edit {
            id,
            index,
            html,
            file,
        } => {
            let html = match (html, file) {
                (Some(html), _) => html,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?,
                (None, None) => std::io::read_to_string(std::io::stdin())?,
            };
            commands.edit(&id, index, html).await
        }
        Commands::Approve { id } => commands.approve(&id).await,
        Commands::Redo { id, index, policy } => commands.redo(&id, index, policy).await,
        Commands::Reset { id } => commands.reset(&id).await,
        Commands::Assemble { id, output } => {
            commands.assemble(&id, output.as_deref()).await?;
            Ok(())
        }
        Commands::List {
            template,
            complete,
            open,
            limit,
        } => {
            let completion = match (complete, open) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands.list(template, completion, limit).await
        }
        Commands::Delete { id } => commands.delete(&id).await,
    }
}
