use crate::domain::constants::{ENDPOINT_ENV, TOKEN_ENV};
use crate::domain::models::{ConfigFile, Settings, SettingsView};
use crate::error::ReportError;
use std::path::{Path, PathBuf};

fn default_config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/pipereport/config.toml"))
}

pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !path.exists() {
        if explicit.is_some() {
            return Err(ReportError::Config(format!(
                "config file not found: {}",
                path.display()
            ))
            .into());
        }
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(&path)?;
    toml::from_str(&raw).map_err(|e| {
        anyhow::Error::from(ReportError::Config(format!("{}: {}", path.display(), e)))
    })
}

/// Layers environment and flag overrides over the file and validates the result.
pub fn resolve(
    file: ConfigFile,
    pipe_override: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ReportError> {
    let mut api = file.api;
    let mut report = file.report;
    if let Some(endpoint) = env(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
        api.endpoint = endpoint;
    }
    if let Some(pipe) = pipe_override {
        report.pipe_id = pipe.to_string();
    }
    let token = env(TOKEN_ENV).filter(|v| !v.trim().is_empty());

    if api.page_size == 0 {
        return Err(ReportError::Config("api.page_size must be positive".to_string()));
    }
    for (key, value) in [
        ("api.endpoint", &api.endpoint),
        ("report.pipe_id", &report.pipe_id),
        ("report.category_field", &report.category_field),
        ("report.terminal_phase", &report.terminal_phase),
    ] {
        if value.trim().is_empty() {
            return Err(ReportError::Config(format!("{} must not be empty", key)));
        }
    }
    if report.allowed_values.is_empty() {
        return Err(ReportError::Config(
            "report.allowed_values must list at least one value".to_string(),
        ));
    }
    let mut seen = std::collections::HashSet::new();
    report.allowed_values.retain(|v| seen.insert(v.clone()));

    Ok(Settings { api, report, token })
}

pub fn load_settings(
    explicit: Option<&Path>,
    pipe_override: Option<&str>,
) -> anyhow::Result<Settings> {
    let file = load_config(explicit)?;
    Ok(resolve(file, pipe_override, |k| std::env::var(k).ok())?)
}

pub fn redacted(settings: &Settings) -> SettingsView {
    SettingsView {
        api: settings.api.clone(),
        report: settings.report.clone(),
        token: if settings.token.is_some() { "set" } else { "unset" },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_target_the_support_pipe() {
        let s = resolve(ConfigFile::default(), None, no_env).expect("defaults valid");
        assert_eq!(s.api.page_size, 300);
        assert_eq!(s.api.endpoint, "https://api.pipefy.com/graphql");
        assert_eq!(s.report.pipe_id, "303822738");
        assert_eq!(s.report.allowed_values, ["Meu RH", "TOTVS Datasul"]);
        assert_eq!(s.report.terminal_phase, "Concluído");
        assert!(s.token.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let file: ConfigFile = toml::from_str(
            r#"[report]
allowed_values = ["A", "B", "A"]
"#,
        )
        .expect("parse");
        let s = resolve(file, Some("99"), no_env).expect("valid");
        assert_eq!(s.report.allowed_values, ["A", "B"]);
        assert_eq!(s.report.pipe_id, "99");
        assert_eq!(s.report.category_field, "Componente -> Suporte a Sistemas");
    }

    #[test]
    fn env_overrides_endpoint_and_token() {
        let env = |k: &str| match k {
            "PIPEFY_API_URL" => Some("/tmp/pages.json".to_string()),
            "PIPEFY_KEY" => Some("secret".to_string()),
            _ => None,
        };
        let s = resolve(ConfigFile::default(), None, env).expect("valid");
        assert_eq!(s.api.endpoint, "/tmp/pages.json");
        assert_eq!(s.token.as_deref(), Some("secret"));
        assert_eq!(redacted(&s).token, "set");
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let file: ConfigFile = toml::from_str("[api]\npage_size = 0\n").expect("parse");
        assert_eq!(resolve(file, None, no_env).unwrap_err().code(), "CONFIG_ERROR");

        let file: ConfigFile = toml::from_str("[report]\nallowed_values = []\n").expect("parse");
        assert!(resolve(file, None, no_env).is_err());

        let file: ConfigFile = toml::from_str("[report]\nterminal_phase = \" \"\n").expect("parse");
        assert!(resolve(file, None, no_env).is_err());
    }
}
