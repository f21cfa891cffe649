use crate::commands::prompts;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Table;
use movie_log_config::{Config, PathManager};
use serde_json::json;
use std::path::PathBuf;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(output),
        ConfigCommands::Omdb { api_key } => configure_omdb(api_key, output),
        ConfigCommands::Firebase {
            project_id,
            api_key,
        } => configure_firebase(project_id, api_key, output),
        ConfigCommands::Interactive => run_interactive(output),
    }
}

fn config_file() -> PathBuf {
    PathManager::default().config_file()
}

fn load_or_default() -> Result<Config> {
    let path = config_file();
    if path.exists() {
        Config::load_from_file(&path).map_err(|e| eyre!("Failed to load configuration: {}", e))
    } else {
        Ok(Config::default())
    }
}

fn save(config: &Config) -> Result<()> {
    let path = config_file();
    config
        .save_to_file(&path)
        .map_err(|e| eyre!("Failed to save configuration to {}: {}", path.display(), e))
}

fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        "(not set)".to_string()
    } else if secret.len() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", &secret[..4])
    }
}

fn show_config(output: &Output) -> Result<()> {
    let config = load_or_default()?;

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.set_header(vec!["Setting", "Value"]);
            table.add_row(vec!["omdb.api_key".to_string(), mask_secret(&config.omdb.api_key)]);
            table.add_row(vec![
                "firebase.project_id".to_string(),
                config.firebase.project_id.clone(),
            ]);
            table.add_row(vec![
                "firebase.api_key".to_string(),
                mask_secret(&config.firebase.api_key),
            ]);
            table.add_row(vec![
                "recommendations".to_string(),
                format!("{} titles", config.recommendations.len()),
            ]);
            output.println(table.to_string());
            output.info(format!("Configuration file: {}", config_file().display()));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "omdb": { "api_key": mask_secret(&config.omdb.api_key) },
                "firebase": {
                    "project_id": config.firebase.project_id,
                    "api_key": mask_secret(&config.firebase.api_key),
                },
                "recommendations": config.recommendations,
                "path": config_file().display().to_string(),
            }));
        }
    }
    Ok(())
}

fn configure_omdb(api_key: Option<String>, output: &Output) -> Result<()> {
    let mut config = load_or_default()?;

    let api_key = match api_key {
        Some(key) => key,
        None => prompts::prompt_string("OMDb API key", None)?,
    };
    if api_key.trim().is_empty() {
        return Err(eyre!("OMDb API key cannot be empty"));
    }

    config.omdb.api_key = api_key.trim().to_string();
    save(&config)?;
    output.success("OMDb catalog configured");
    Ok(())
}

fn configure_firebase(
    project_id: Option<String>,
    api_key: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut config = load_or_default()?;

    let project_id = match project_id {
        Some(id) => id,
        None => prompts::prompt_string(
            "Firebase project id",
            Some(&config.firebase.project_id).filter(|s| !s.is_empty()).map(|s| s.as_str()),
        )?,
    };
    let api_key = match api_key {
        Some(key) => key,
        None => prompts::prompt_string("Firebase web API key", None)?,
    };
    if project_id.trim().is_empty() || api_key.trim().is_empty() {
        return Err(eyre!("Firebase project id and API key cannot be empty"));
    }

    config.firebase.project_id = project_id.trim().to_string();
    config.firebase.api_key = api_key.trim().to_string();
    save(&config)?;
    output.success("Account storage configured");
    Ok(())
}

fn run_interactive(output: &Output) -> Result<()> {
    output.info("screenlog setup");
    output.info("You need an OMDb API key and a Firebase project for account storage.\n");

    let mut config = load_or_default()?;

    config.omdb.api_key = prompts::prompt_string(
        "OMDb API key",
        Some(&config.omdb.api_key).filter(|s| !s.is_empty()).map(|s| s.as_str()),
    )?
    .trim()
    .to_string();

    config.firebase.project_id = prompts::prompt_string(
        "Firebase project id",
        Some(&config.firebase.project_id).filter(|s| !s.is_empty()).map(|s| s.as_str()),
    )?
    .trim()
    .to_string();

    config.firebase.api_key = prompts::prompt_string(
        "Firebase web API key",
        Some(&config.firebase.api_key).filter(|s| !s.is_empty()).map(|s| s.as_str()),
    )?
    .trim()
    .to_string();

    config
        .validate()
        .map_err(|e| eyre!("Configuration incomplete: {}", e))?;
    save(&config)?;

    output.success("Configuration saved");
    if prompts::prompt_yes_no("Sign in now?", Some(true))? {
        output.info("Run `screenlog login` (or `screenlog signup` for a new account).");
    }
    Ok(())
}
