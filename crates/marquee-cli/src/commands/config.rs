use super::ui::is_interactive;
use super::{prompts, tables, Context};
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use marquee_config::{Config, OMDB_API_KEY_ENV};
use serde_json::json;

pub fn run_config(ctx: &Context, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(ctx, full, output),
        ConfigCommands::Init { api_key, password } => init_config(ctx, api_key, password, output),
    }
}

fn show_config(ctx: &Context, full: bool, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    let config = &ctx.config;
    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at {}; using defaults. Run 'marquee config init' to create it.",
            config_file.display()
        ));
    }

    let api_key = reveal(&config.omdb.api_key, full);
    let password = reveal(&config.admin.password, full);
    let log_file = config
        .logging
        .file
        .as_ref()
        .map_or_else(|| "stderr".to_string(), |p| p.display().to_string());

    let mut table = tables::themed_table(ctx.theme_preference()?.get()?);
    table.set_header(vec![Cell::new("Setting"), Cell::new("Value")]);
    let rows = [
        ("Config file", config_file.display().to_string()),
        ("Storage", ctx.paths.storage_dir().display().to_string()),
        ("OMDb API key", api_key.clone()),
        ("OMDb base URL", config.omdb.base_url.clone()),
        ("Admin password", password.clone()),
        ("Categories", config.admin.categories.join(", ")),
        ("Log file", log_file.clone()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    output.println(table.to_string());

    output.data(&json!({
        "config_file": config_file,
        "storage_dir": ctx.paths.storage_dir(),
        "omdb": { "api_key": api_key, "base_url": config.omdb.base_url },
        "admin": { "password": password, "categories": config.admin.categories },
        "logging": { "file": log_file },
    }));
    Ok(())
}

fn init_config(
    ctx: &Context,
    api_key: Option<String>,
    password: Option<String>,
    output: &Output,
) -> Result<()> {
    let config_file = ctx.paths.config_file();
    let mut config = if config_file.exists() {
        Config::load_from_file(&config_file)
            .map_err(|e| eyre!("Failed to load {}: {}", config_file.display(), e))?
    } else {
        Config::default()
    };

    let interactive = is_interactive();
    config.omdb.api_key = match api_key {
        Some(key) => key,
        None if interactive => prompts::prompt_string(
            &format!("OMDb API key (blank to use {})", OMDB_API_KEY_ENV),
            Some(&config.omdb.api_key),
        )?,
        None => std::mem::take(&mut config.omdb.api_key),
    };
    if let Some(password) = password {
        config.admin.password = password;
    } else if interactive && prompts::prompt_yes_no("Change the admin password?", false)? {
        config.admin.password = prompts::prompt_password("New admin password")?;
    }

    config
        .validate()
        .map_err(|e| eyre!("Configuration not saved: {}", e))?;
    ctx.paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Configuration saved to {}", config_file.display()));
    if config.omdb.api_key.trim().is_empty() {
        output.warn(format!(
            "No OMDb API key set. Searching needs one; set it here or via {}.",
            OMDB_API_KEY_ENV
        ));
    }
    Ok(())
}

/// Show the first and last two characters of a secret
fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.is_empty() {
        return "(not set)".to_string();
    }
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 4), tail)
}

fn reveal(value: &str, full: bool) -> String {
    if full {
        value.to_string()
    } else {
        mask(value)
    }
}
