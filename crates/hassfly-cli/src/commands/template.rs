//! Template command handler.

use hassfly_core::Session;

use crate::cli::{GlobalOpts, TemplateArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    session: &Session,
    args: TemplateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let rendered = session.render_template(&args.template).await?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
