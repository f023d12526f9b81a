//! Config command handlers.

use dialoguer::{Confirm, Input, Password};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            output::print_output(
                &hassfly_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }
        ConfigCommand::Init => init(global),
    }
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = hassfly_config::load_config_or_default();
    if cfg.token.is_some() {
        cfg.token = Some("<redacted>".into());
    }

    let rendered = toml::to_string_pretty(&cfg)
        .map_err(|e| CliError::Validation {
            field: "config".into(),
            reason: e.to_string(),
        })?;
    output::print_output(rendered.trim_end(), global.quiet);
    Ok(())
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = hassfly_config::load_config_or_default();

    let server: String = Input::new()
        .with_prompt("Home Assistant server URL")
        .with_initial_text(cfg.server.clone().unwrap_or_default())
        .validate_with(|input: &String| -> Result<(), String> {
            input
                .parse::<url::Url>()
                .map(|_| ())
                .map_err(|_| format!("invalid URL: {input}"))
        })
        .interact_text()
        .map_err(prompt_error)?;

    let token: String = Password::new()
        .with_prompt("Long-lived access token")
        .allow_empty_password(false)
        .interact()
        .map_err(prompt_error)?;

    let use_keyring = Confirm::new()
        .with_prompt("Store the token in the system keyring?")
        .default(true)
        .interact()
        .map_err(prompt_error)?;

    cfg.server = Some(server);
    if use_keyring {
        hassfly_config::store_token(&token)?;
        cfg.token = None;
    } else {
        cfg.token = Some(token);
    }

    hassfly_config::save_config(&cfg)?;
    output::print_output(
        &format!(
            "Configuration written to {}",
            hassfly_config::config_path().display()
        ),
        global.quiet,
    );
    Ok(())
}

fn prompt_error(err: dialoguer::Error) -> CliError {
    match err {
        dialoguer::Error::IO(io) => CliError::Io(io),
    }
}
