// Unicodify Settings Module
// User-configurable toggles for autocorrect and the transformation menu

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::autocorrect::{AutocorrectConfig, BoundaryPolicy};
use crate::automaton::SymbolDictionary;
use crate::transform::{MenuFlags, SpaceHandling, TransformConfig};

/// Settings for unicodify
///
/// These settings are loaded from a TOML file
/// (default: ~/.config/unicodify/settings.toml):
///
/// ```toml
/// [autocorrect]
/// enabled = true
/// quotes = false
///
/// [unicode_font]
/// change_format = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    autocorrect: AutocorrectSettings,
    unicode_font: UnicodeFontSettings,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// `[autocorrect]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutocorrectSettings {
    pub enabled: bool,
    /// Built-in symbol dictionary
    pub symbols: bool,
    pub quotes: bool,
    pub fractions: bool,
    pub numbers: bool,
    pub boundary: BoundaryPolicy,
}

impl Default for AutocorrectSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            symbols: true,
            quotes: true,
            fractions: true,
            numbers: true,
            boundary: BoundaryPolicy::default(),
        }
    }
}

/// `[unicode_font]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnicodeFontSettings {
    pub change_font: bool,
    pub change_format: bool,
    pub change_case: bool,
    pub change_code_case: bool,
    pub space: SpaceHandling,
}

impl Default for UnicodeFontSettings {
    fn default() -> Self {
        Self {
            change_font: true,
            change_format: false,
            change_case: true,
            change_code_case: true,
            space: SpaceHandling::default(),
        }
    }
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
struct SettingsToml {
    #[serde(default)]
    autocorrect: Option<HashMap<String, toml::Value>>,

    #[serde(default)]
    unicode_font: Option<HashMap<String, toml::Value>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(section) = toml_settings.autocorrect {
            let autocorrect = &mut settings.autocorrect;
            for (key, value) in section {
                match key.as_str() {
                    "enabled" => autocorrect.enabled = parse_bool_value(&value)?,
                    "symbols" => autocorrect.symbols = parse_bool_value(&value)?,
                    "quotes" => autocorrect.quotes = parse_bool_value(&value)?,
                    "fractions" => autocorrect.fractions = parse_bool_value(&value)?,
                    "numbers" => autocorrect.numbers = parse_bool_value(&value)?,
                    "boundary" => autocorrect.boundary = parse_enum_value(&key, value)?,
                    _ => return Err(unknown_key("autocorrect", &key)),
                }
            }
        }

        if let Some(section) = toml_settings.unicode_font {
            let font = &mut settings.unicode_font;
            for (key, value) in section {
                match key.as_str() {
                    "change_font" => font.change_font = parse_bool_value(&value)?,
                    "change_format" => font.change_format = parse_bool_value(&value)?,
                    "change_case" => font.change_case = parse_bool_value(&value)?,
                    "change_code_case" => font.change_code_case = parse_bool_value(&value)?,
                    "space" => font.space = parse_enum_value(&key, value)?,
                    _ => return Err(unknown_key("unicode_font", &key)),
                }
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("unicodify").join("settings.toml"))
    }

    /// Load from default location (~/.config/unicodify/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn autocorrect(&self) -> &AutocorrectSettings {
        &self.autocorrect
    }

    pub fn autocorrect_mut(&mut self) -> &mut AutocorrectSettings {
        &mut self.autocorrect
    }

    pub fn unicode_font(&self) -> &UnicodeFontSettings {
        &self.unicode_font
    }

    pub fn unicode_font_mut(&mut self) -> &mut UnicodeFontSettings {
        &mut self.unicode_font
    }

    /// Snapshot handed to the autocorrect engine
    pub fn autocorrect_config(&self) -> AutocorrectConfig {
        let autocorrect = &self.autocorrect;
        let dictionary = if autocorrect.symbols {
            SymbolDictionary::builtin()
        } else {
            SymbolDictionary::new()
        };
        AutocorrectConfig {
            enabled: autocorrect.enabled,
            quotes: autocorrect.quotes,
            fractions: autocorrect.fractions,
            numbers: autocorrect.numbers,
            boundary: autocorrect.boundary,
            dictionary,
        }
    }

    pub fn transform_config(&self) -> TransformConfig {
        TransformConfig {
            space: self.unicode_font.space,
        }
    }

    /// Families shown in the transformation menu
    pub fn menu_flags(&self) -> MenuFlags {
        let font = &self.unicode_font;
        MenuFlags {
            casing: font.change_case,
            code_casing: font.change_code_case,
            font: font.change_font,
            format: font.change_format,
        }
    }
}

fn unknown_key(section: &str, key: &str) -> SettingsError {
    SettingsError::InvalidValue(format!("Unknown setting '{}.{}'", section, key))
}

/// Parse a TOML value as a boolean
fn parse_bool_value(value: &toml::Value) -> Result<bool, SettingsError> {
    match value {
        toml::Value::Boolean(b) => Ok(*b),
        toml::Value::Integer(1) => Ok(true),
        toml::Value::Integer(0) => Ok(false),
        toml::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(SettingsError::InvalidValue(format!(
                "Cannot convert '{}' to boolean",
                s
            ))),
        },
        _ => Err(SettingsError::InvalidValue(format!(
            "Cannot convert {:?} to boolean",
            value
        ))),
    }
}

/// Parse a TOML string into one of the lowercase option names of `T`
fn parse_enum_value<T: DeserializeOwned>(key: &str, value: toml::Value) -> Result<T, SettingsError> {
    let shown = value.to_string();
    value
        .try_into()
        .map_err(|_| SettingsError::InvalidValue(format!("Invalid value {} for '{}'", shown, key)))
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Unicodify Settings
# Place this file at: ~/.config/unicodify/settings.toml

[autocorrect]
# Correct text while typing
enabled = false

# Built-in symbols such as -> (c) :)
symbols = true

# Curly quotes for ' and "
quotes = true

# 1/2 -> ½, 3/7 -> 3⁄7
fractions = true

# 0.5 -> ½, 3.141592653589793 -> π
numbers = true

# Tie-break between overlapping triggers: "absolute" or "legacy"
boundary = "absolute"

[unicode_font]
# Menu entries to show
change_font = true
change_format = false
change_case = true
change_code_case = true

# Whether fonts with a space glyph replace spaces: "preserve" or "substitute"
space = "preserve"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::new();
        assert!(!settings.autocorrect().enabled);
        assert!(settings.autocorrect().quotes);
        assert!(settings.unicode_font().change_font);
        assert!(!settings.unicode_font().change_format);
        assert_eq!(settings.unicode_font().space, SpaceHandling::Preserve);
    }

    #[test]
    fn test_default_content_matches_defaults() {
        let settings = Settings::from_toml(default_settings_content()).unwrap();
        assert_eq!(settings, Settings::new());
    }

    #[test]
    fn test_settings_from_toml() {
        let toml = r#"
[autocorrect]
enabled = true
quotes = false
boundary = "legacy"

[unicode_font]
change_format = true
space = "substitute"
"#;

        let settings = Settings::from_toml(toml).unwrap();
        assert!(settings.autocorrect().enabled);
        assert!(!settings.autocorrect().quotes);
        assert!(settings.autocorrect().fractions);
        assert_eq!(settings.autocorrect().boundary, BoundaryPolicy::Legacy);
        assert!(settings.unicode_font().change_format);
        assert_eq!(settings.unicode_font().space, SpaceHandling::Substitute);
    }

    #[test]
    fn test_settings_with_string_values() {
        let toml = r#"
[autocorrect]
enabled = "yes"
numbers = "off"
fractions = 0
"#;

        let settings = Settings::from_toml(toml).unwrap();
        assert!(settings.autocorrect().enabled);
        assert!(!settings.autocorrect().numbers);
        assert!(!settings.autocorrect().fractions);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Settings::from_toml("[autocorrect]\nenabled = \"maybe\"\n"),
            Err(SettingsError::InvalidValue(_))
        ));
        assert!(matches!(
            Settings::from_toml("[unicode_font]\nspace = \"squash\"\n"),
            Err(SettingsError::InvalidValue(_))
        ));
        assert!(matches!(
            Settings::from_toml("[autocorrect]\nemojis = true\n"),
            Err(SettingsError::InvalidValue(_))
        ));
        assert!(matches!(
            Settings::from_toml("[autocorrect"),
            Err(SettingsError::TomlParse(_))
        ));
    }

    #[test]
    fn test_autocorrect_config() {
        let mut settings = Settings::new();
        settings.autocorrect_mut().enabled = true;
        let config = settings.autocorrect_config();
        assert!(config.enabled);
        assert_eq!(config.dictionary, SymbolDictionary::builtin());

        settings.autocorrect_mut().symbols = false;
        assert!(settings.autocorrect_config().dictionary.is_empty());
    }

    #[test]
    fn test_menu_flags() {
        let mut settings = Settings::new();
        assert_eq!(settings.menu_flags(), MenuFlags::default());
        settings.unicode_font_mut().change_case = false;
        assert!(!settings.menu_flags().casing);
    }

    #[test]
    fn test_reload_without_source() {
        let mut settings = Settings::new();
        assert!(matches!(settings.reload(), Err(SettingsError::InvalidValue(_))));
    }

    #[test]
    fn test_from_file_and_reload() {
        let path = std::env::temp_dir().join(format!("unicodify-settings-{}.toml", std::process::id()));
        std::fs::write(&path, "[autocorrect]\nenabled = true\n").unwrap();

        let mut settings = Settings::from_file(&path).unwrap();
        assert!(settings.autocorrect().enabled);
        assert_eq!(settings.source_path(), Some(path.as_path()));

        std::fs::write(&path, "[autocorrect]\nenabled = false\n").unwrap();
        settings.reload().unwrap();
        assert!(!settings.autocorrect().enabled);

        std::fs::remove_file(&path).unwrap();
    }
}
