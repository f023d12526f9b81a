//! Entity command handlers.

use owo_colors::OwoColorize;
use tabled::Tabled;

use hassfly_core::{EntityState, Session};

use crate::cli::{EntitiesArgs, EntitiesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "Entity")]
    entity_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "State")]
    state: String,
}

impl From<&EntityState> for EntityRow {
    fn from(state: &EntityState) -> Self {
        Self {
            entity_id: state.entity_id.clone(),
            name: state.friendly_name().unwrap_or_default().to_owned(),
            domain: state.domain().to_owned(),
            state: state.state.clone(),
        }
    }
}

fn detail(state: &EntityState) -> String {
    let mut lines = vec![
        format!("Entity:       {}", state.entity_id),
        format!("Name:         {}", state.friendly_name().unwrap_or("-")),
        format!("State:        {}", state.state),
        format!("Last changed: {}", state.last_changed),
    ];
    if let Some(updated) = state.last_updated {
        lines.push(format!("Last updated: {updated}"));
    }
    if !state.attributes.is_empty() {
        lines.push(String::new());
        lines.push("Attributes:".into());
        for (key, value) in &state.attributes {
            lines.push(format!("  {key}: {value}"));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: EntitiesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        EntitiesCommand::List(list) => {
            let all = session.refresh().await?;
            let shown = if list.all {
                all
            } else {
                session.device_entities().await
            };
            let out = output::render_list(
                &global.output,
                &shown,
                |s: &EntityState| EntityRow::from(s),
                |s: &EntityState| s.entity_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EntitiesCommand::Get { entity_id } => {
            let state = session.entity(&entity_id).await?;
            let out =
                output::render_single(&global.output, &state, detail, |s| s.entity_id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EntitiesCommand::Toggle { entity_id } => {
            let updated = session.toggle(&entity_id).await?;
            let msg = if output::should_color(&global.color) {
                format!(
                    "{} is now {}",
                    updated.entity_id,
                    updated.state.green().bold()
                )
            } else {
                format!("{} is now {}", updated.entity_id, updated.state)
            };
            output::print_output(&msg, global.quiet);
            Ok(())
        }
    }
}
