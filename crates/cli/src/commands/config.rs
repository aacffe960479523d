use frontdesk_core::config::{AppConfig, LoadOptions};
use secrecy::ExposeSecret;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line("business.type", config.business.business_type.as_str()));
    lines.push(render_line("business.name", &config.business.name));
    lines.push(render_line(
        "telephony.account_sid",
        &redact_identifier(&config.telephony.account_sid),
    ));
    lines.push(render_line(
        "telephony.auth_token",
        &redact_token(config.telephony.auth_token.expose_secret()),
    ));
    lines.push(render_line("telephony.phone_number", &config.telephony.phone_number));
    lines.push(render_line(
        "knowledge.data_path",
        &config.knowledge.data_path.display().to_string(),
    ));
    lines.push(render_line("server.bind_address", &config.server.bind_address));
    lines.push(render_line("server.port", &config.server.port.to_string()));
    lines.push(render_line(
        "server.graceful_shutdown_secs",
        &config.server.graceful_shutdown_secs.to_string(),
    ));
    lines.push(render_line("logging.level", &config.logging.level));
    lines.push(render_line("logging.format", &format!("{:?}", config.logging.format)));

    lines.join("\n")
}

fn render_line(key: &str, value: &str) -> String {
    let shown = if value.is_empty() { "(unset)" } else { value };
    format!("  {key} = {shown}")
}

fn redact_token(token: &str) -> String {
    if token.is_empty() {
        String::new()
    } else {
        "***redacted***".to_string()
    }
}

fn redact_identifier(identifier: &str) -> String {
    if identifier.chars().count() <= 6 {
        identifier.to_string()
    } else {
        let prefix: String = identifier.chars().take(6).collect();
        format!("{prefix}…")
    }
}
