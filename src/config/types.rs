//! Configuration type definitions.

use knuffel::Decode;
use std::path::PathBuf;

/// Expand tilde (~) prefix to the user's home directory.
/// Handles both "~" alone and "~/path/to/something" patterns.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Main configuration structure parsed from keyshell.kdl.
#[derive(Debug, Decode, Clone, Default)]
pub struct Config {
    #[knuffel(child)]
    pub defaults: Option<Defaults>,
}

/// Tool locations and file names used by the shell.
#[derive(Debug, Decode, Clone, Default)]
pub struct Defaults {
    /// Program used for every keystore operation.
    #[knuffel(property)]
    pub keytool: Option<String>,

    /// Program used to probe TLS servers and convert certificates.
    #[knuffel(property)]
    pub openssl: Option<String>,

    /// Store type passed to `keytool -import`.
    #[knuffel(property)]
    pub storetype: Option<String>,

    /// Local file that `fetch` copies a keystore into.
    #[knuffel(property(name = "working_store"))]
    pub working_store: Option<String>,

    /// File that captures the TLS probe's output before conversion.
    #[knuffel(property(name = "intermediate_file"))]
    pub intermediate_file: Option<String>,
}

impl Config {
    /// Get the keytool program, defaulting to "keytool" on the PATH
    pub fn keytool(&self) -> String {
        self.defaults
            .as_ref()
            .and_then(|d| d.keytool.clone())
            .unwrap_or_else(|| "keytool".into())
    }

    /// Get the openssl program, defaulting to "openssl" on the PATH
    pub fn openssl(&self) -> String {
        self.defaults
            .as_ref()
            .and_then(|d| d.openssl.clone())
            .unwrap_or_else(|| "openssl".into())
    }

    /// Get the store type used on import, defaulting to "jks"
    pub fn storetype(&self) -> String {
        self.defaults
            .as_ref()
            .and_then(|d| d.storetype.clone())
            .unwrap_or_else(|| "jks".into())
    }

    /// Get the working copy path used by `fetch`, defaulting to "_store.jks".
    /// Expands ~ to the user's home directory if present.
    pub fn working_store(&self) -> PathBuf {
        self.defaults
            .as_ref()
            .and_then(|d| d.working_store.as_deref())
            .map(expand_tilde)
            .unwrap_or_else(|| PathBuf::from("_store.jks"))
    }

    /// Get the intermediate file used by `download`, defaulting to "_temp_file".
    pub fn intermediate_file(&self) -> PathBuf {
        self.defaults
            .as_ref()
            .and_then(|d| d.intermediate_file.as_deref())
            .map(expand_tilde)
            .unwrap_or_else(|| PathBuf::from("_temp_file"))
    }

    /// Override the keytool program (from the command line).
    pub fn set_keytool(&mut self, program: impl Into<String>) {
        self.defaults.get_or_insert_with(Defaults::default).keytool = Some(program.into());
    }

    /// Override the openssl program (from the command line).
    pub fn set_openssl(&mut self, program: impl Into<String>) {
        self.defaults.get_or_insert_with(Defaults::default).openssl = Some(program.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.keytool(), "keytool");
        assert_eq!(config.openssl(), "openssl");
        assert_eq!(config.storetype(), "jks");
        assert_eq!(config.working_store(), PathBuf::from("_store.jks"));
        assert_eq!(config.intermediate_file(), PathBuf::from("_temp_file"));
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let mut config = Config::default();
        config.set_keytool("/opt/jdk/bin/keytool");
        config.set_openssl("libressl");
        assert_eq!(config.keytool(), "/opt/jdk/bin/keytool");
        assert_eq!(config.openssl(), "libressl");
        assert_eq!(config.storetype(), "jks");
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("store.jks"), PathBuf::from("store.jks"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/certs/a.jks"), home.join("certs/a.jks"));
        }
    }
}
