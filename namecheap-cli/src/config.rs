//! Profile-keyed YAML configuration.
//!
//! Layout, with environment variables taking precedence over the file:
//!
//! ```yaml
//! default_profile: default
//! profiles:
//!   default:
//!     api_user: acme
//!     api_key: "..."
//!     username: acme
//!     client_ip: 203.0.113.9
//!     sandbox: false
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use namecheap_api::Credentials;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("profile '{0}' not found in config file (and no environment credentials set)")]
    UnknownProfile(String),
    #[error(
        "missing credentials: {0}; set them in the config file or via \
         NAMECHEAP_API_USER / NAMECHEAP_API_KEY / NAMECHEAP_USERNAME / NAMECHEAP_CLIENT_IP"
    )]
    MissingCredentials(String),
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

/// Resolve the config file path: explicit override, else
/// `<config dir>/namecheap/config.yaml`.
pub fn config_path(overridden: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = overridden {
        return Ok(path.to_path_buf());
    }
    dirs::config_dir()
        .map(|dir| dir.join("namecheap").join("config.yaml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Load the config file; a missing file is an empty config, not an error.
pub fn load(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Merge profile values with environment overrides into credentials, plus
/// the effective sandbox flag (`--sandbox` wins over the profile).
pub fn resolve(
    file: &ConfigFile,
    profile_name: &str,
    sandbox_flag: bool,
) -> Result<(Credentials, bool), ConfigError> {
    resolve_with(file, profile_name, sandbox_flag, |name| {
        std::env::var(name).ok()
    })
}

fn resolve_with(
    file: &ConfigFile,
    profile_name: &str,
    sandbox_flag: bool,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(Credentials, bool), ConfigError> {
    let profile = file.profiles.get(profile_name).cloned();
    if profile.is_none() && profile_name != "default" {
        return Err(ConfigError::UnknownProfile(profile_name.to_string()));
    }
    let profile = profile.unwrap_or_default();

    let pick = |var: &str, from_file: &Option<String>| {
        env(var)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| from_file.clone())
    };
    let api_user = pick("NAMECHEAP_API_USER", &profile.api_user);
    let api_key = pick("NAMECHEAP_API_KEY", &profile.api_key);
    let username = pick("NAMECHEAP_USERNAME", &profile.username);
    let client_ip = pick("NAMECHEAP_CLIENT_IP", &profile.client_ip);

    let missing: Vec<&str> = [
        ("api_user", &api_user),
        ("api_key", &api_key),
        ("username", &username),
        ("client_ip", &client_ip),
    ]
    .iter()
    .filter(|(_, v)| v.is_none())
    .map(|(name, _)| *name)
    .collect();
    if !missing.is_empty() {
        return Err(ConfigError::MissingCredentials(missing.join(", ")));
    }

    let sandbox = sandbox_flag || profile.sandbox.unwrap_or(false);
    Ok((
        Credentials::new(
            api_user.unwrap_or_default(),
            api_key.unwrap_or_default(),
            username.unwrap_or_default(),
            client_ip.unwrap_or_default(),
        ),
        sandbox,
    ))
}

/// Write a skeleton config with one empty profile. Refuses to overwrite an
/// existing file. On unix the file is chmodded to 0600 since it will hold
/// the API key.
pub fn init(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "config file already exists; edit it instead",
            ),
        });
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let skeleton = ConfigFile {
        default_profile: Some("default".to_string()),
        profiles: BTreeMap::from([(
            "default".to_string(),
            Profile {
                api_user: Some(String::new()),
                api_key: Some(String::new()),
                username: Some(String::new()),
                client_ip: Some(String::new()),
                sandbox: Some(true),
            },
        )]),
    };
    let yaml = serde_yaml::to_string(&skeleton).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, yaml).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn sample_file() -> ConfigFile {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "work".to_string(),
            Profile {
                api_user: Some("acme".into()),
                api_key: Some("k".into()),
                username: Some("acme".into()),
                client_ip: Some("203.0.113.9".into()),
                sandbox: Some(true),
            },
        );
        ConfigFile {
            default_profile: Some("work".into()),
            profiles,
        }
    }

    #[test]
    fn profile_values_resolve() {
        let (creds, sandbox) = resolve_with(&sample_file(), "work", false, no_env).unwrap();
        assert_eq!(creds.api_user, "acme");
        assert!(sandbox, "profile sandbox flag should apply");
    }

    #[test]
    fn env_overrides_profile() {
        let env = |name: &str| {
            (name == "NAMECHEAP_API_KEY").then(|| "from-env".to_string())
        };
        let (creds, _) = resolve_with(&sample_file(), "work", false, env).unwrap();
        assert_eq!(creds.api_key, "from-env");
        assert_eq!(creds.username, "acme");
    }

    #[test]
    fn sandbox_flag_wins_over_profile() {
        let mut file = sample_file();
        if let Some(p) = file.profiles.get_mut("work") {
            p.sandbox = Some(false);
        }
        let (_, sandbox) = resolve_with(&file, "work", true, no_env).unwrap();
        assert!(sandbox);
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let err = resolve_with(&sample_file(), "nope", false, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile(_)));
    }

    #[test]
    fn default_profile_may_come_entirely_from_env() {
        let env = |name: &str| {
            Some(match name {
                "NAMECHEAP_API_USER" => "u",
                "NAMECHEAP_API_KEY" => "k",
                "NAMECHEAP_USERNAME" => "u",
                "NAMECHEAP_CLIENT_IP" => "127.0.0.1",
                _ => return None,
            })
            .map(ToString::to_string)
        };
        let (creds, sandbox) =
            resolve_with(&ConfigFile::default(), "default", false, env).unwrap();
        assert_eq!(creds.client_ip, "127.0.0.1");
        assert!(!sandbox);
    }

    #[test]
    fn missing_fields_are_listed() {
        let err = resolve_with(&ConfigFile::default(), "default", false, no_env).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("api_user"));
        assert!(message.contains("client_ip"));
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(&sample_file()).unwrap();
        let back: ConfigFile = serde_yaml::from_str(&yaml).unwrap();
        assert!(back.profiles.contains_key("work"));
        assert_eq!(back.default_profile.as_deref(), Some("work"));
    }
}
