use clap::ArgMatches;
use serde::Serialize;
use tracing::{error, info};

use pagepulse_core::config::loading::user_config_path;
use pagepulse_core::{PulseConfig, events};

#[derive(Serialize)]
struct EffectiveConfig {
    interval_secs: u64,
    broadcast_policy: String,
    user_config: Option<String>,
}

pub(crate) fn handle_config_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.config_started", json_output = json_output);

    let config = match PulseConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            error!(event = "cli.config_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let effective = EffectiveConfig {
        interval_secs: config.interval().as_secs(),
        broadcast_policy: config.broadcast_policy().to_string(),
        user_config: user_config_path().map(|p| p.display().to_string()),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&effective)?);
    } else {
        println!("[refresh]");
        println!("interval_secs = {}", effective.interval_secs);
        println!("broadcast_policy = \"{}\"", effective.broadcast_policy);
        if let Some(path) = &effective.user_config {
            println!();
            println!("# user config: {}", path);
        }
    }

    info!(event = "cli.config_completed");
    Ok(())
}
