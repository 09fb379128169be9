use crate::error::SettingsError;
use crate::need::{NeedBar, NeedCategory, DEFAULT_MAX_VALUE};
use crate::markup::Markup;
use crate::page::NeedPanel;
use crate::shell::ShellConfig;
use crate::theme::ThemeVariant;
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const ENV_PREFIX: &str = "VEXIUM_";
const CONFIG_FILE: &str = "config.toml";

fn default_max_value() -> f64 {
    DEFAULT_MAX_VALUE
}

/// A configured starting level for one need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedReading {
    pub label: String,
    pub value: f64,
    #[serde(default = "default_max_value")]
    pub max_value: f64,
    pub category: NeedCategory,
    /// Trusted HTML used in the page instead of the category glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Text used in the terminal instead of the category symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl NeedReading {
    pub fn new(category: NeedCategory, value: f64) -> Self {
        Self {
            label: category.title().to_string(),
            value,
            max_value: DEFAULT_MAX_VALUE,
            category,
            icon: None,
            symbol: None,
        }
    }

    pub fn to_bar(&self) -> NeedBar {
        let mut bar = NeedBar::new(self.label.clone(), self.value, self.category)
            .with_max_value(self.max_value);
        if let Some(icon) = &self.icon {
            bar = bar.with_icon(Markup::raw(icon.clone()));
        }
        if let Some(symbol) = &self.symbol {
            bar = bar.with_symbol(symbol.clone());
        }
        bar
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: ThemeVariant,
    /// Where `render` and export write the HTML page.
    pub output: PathBuf,
    pub shell: ShellConfig,
    pub needs: Vec<NeedReading>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::default(),
            output: PathBuf::from("vexium.html"),
            shell: ShellConfig::default(),
            needs: vec![
                NeedReading::new(NeedCategory::Food, 80.0),
                NeedReading::new(NeedCategory::Water, 60.0),
                NeedReading::new(NeedCategory::Sleep, 20.0),
            ],
        }
    }
}

impl Settings {
    /// Load from the user config file, falling back to defaults on any error.
    ///
    /// A missing config file is created with the defaults.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            let settings = Self::default();
            match settings.save_to(&path) {
                Ok(()) => info!(path = %path.display(), "wrote default settings"),
                Err(e) => warn!(path = %path.display(), error = %e, "could not write default settings"),
            }
            return settings;
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    /// Defaults, then `path` (if present), then `VEXIUM_*` environment variables.
    ///
    /// Nested keys use a double underscore, e.g. `VEXIUM_SHELL__LANG=fr`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        settings.validate()?;
        debug!(path = %path.display(), needs = settings.needs.len(), "loaded settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for reading in &self.needs {
            reading
                .to_bar()
                .validate()
                .map_err(|source| SettingsError::InvalidNeed {
                    label: reading.label.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    pub fn bars(&self) -> Vec<NeedBar> {
        self.needs.iter().map(NeedReading::to_bar).collect()
    }

    pub fn panel(&self) -> NeedPanel {
        self.bars().into()
    }
}

/// Set `theme` in the file at `path`, leaving every other key as written.
///
/// Unlike [`Settings::save_to`] this never writes defaults or environment
/// overrides into the file, and a file that is not valid TOML is left alone.
pub fn save_theme(path: impl AsRef<Path>, theme: ThemeVariant) -> Result<(), SettingsError> {
    let path = path.as_ref();
    let mut table = match fs::read_to_string(path) {
        Ok(contents) => contents.parse::<toml::Table>()?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
        Err(e) => return Err(e.into()),
    };
    table.insert("theme".to_string(), toml::Value::try_from(theme)?);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(&table)?)?;
    debug!(path = %path.display(), ?theme, "saved theme");
    Ok(())
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "vexium")
}

/// `<config dir>/vexium/config.toml`, or `./config.toml` without a home directory.
pub fn config_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NeedError;
    use figment::Jail;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.theme, ThemeVariant::EverforestDark);
        assert_eq!(settings.output, PathBuf::from("vexium.html"));
        assert_eq!(settings.shell, ShellConfig::default());

        let labels: Vec<_> = settings.needs.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Food", "Water", "Sleep"]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_default_panel_flags_sleep() {
        let panel = Settings::default().panel();
        let critical: Vec<_> = panel.critical().map(|bar| bar.category).collect();
        assert_eq!(critical, vec![NeedCategory::Sleep]);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        Jail::expect_with(|_jail| {
            let settings = Settings::load_from("nope.toml").map_err(|e| e.to_string())?;
            assert_eq!(settings, Settings::default());
            Ok(())
        });
    }

    #[test]
    fn test_toml_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                theme = "EverforestLight"
                output = "out/page.html"

                [shell]
                lang = "de"

                [[needs]]
                label = "Rations"
                value = 12
                category = "food"

                [[needs]]
                label = "Rest"
                value = 3.5
                max_value = 8.0
                category = "sleep"
                "#,
            )?;

            let settings = Settings::load_from("config.toml").map_err(|e| e.to_string())?;
            assert_eq!(settings.theme, ThemeVariant::EverforestLight);
            assert_eq!(settings.output, PathBuf::from("out/page.html"));
            assert_eq!(settings.shell.lang, "de");
            assert_eq!(settings.shell.metadata.title, "Vexium Verse");
            assert_eq!(settings.needs.len(), 2);
            assert_eq!(settings.needs[0].max_value, 100.0);
            assert_eq!(settings.needs[1].max_value, 8.0);
            assert_eq!(settings.needs[1].category, NeedCategory::Sleep);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[shell]\nlang = \"de\"\n")?;
            jail.set_env("VEXIUM_SHELL__LANG", "fr");
            jail.set_env("VEXIUM_SHELL__METADATA__TITLE", "Market");

            let settings = Settings::load_from("config.toml").map_err(|e| e.to_string())?;
            assert_eq!(settings.shell.lang, "fr");
            assert_eq!(settings.shell.metadata.title, "Market");
            Ok(())
        });
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[[needs]]\nlabel = \"Heat\"\nvalue = 10.0\ncategory = \"fire\"\n",
            )?;

            let result = Settings::load_from("config.toml");
            assert!(matches!(result, Err(SettingsError::Load(_))));
            Ok(())
        });
    }

    #[test]
    fn test_zero_max_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[[needs]]\nlabel = \"Water\"\nvalue = 10.0\nmax_value = 0.0\ncategory = \"water\"\n",
            )?;

            match Settings::load_from("config.toml") {
                Err(SettingsError::InvalidNeed { label, source }) => {
                    assert_eq!(label, "Water");
                    assert_eq!(source, NeedError::NonPositiveMax(0.0));
                }
                other => panic!("expected InvalidNeed, got {:?}", other),
            }
            Ok(())
        });
    }

    #[test]
    fn test_icon_and_symbol_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [[needs]]
                label = "Bread"
                value = 40
                category = "food"
                icon = "<img src=\"/bread.png\" alt=\"\">"
                symbol = "B"
                "#,
            )?;

            let settings = Settings::load_from("config.toml").map_err(|e| e.to_string())?;
            let bar = &settings.bars()[0];
            assert_eq!(bar.symbol(), "B");
            assert_eq!(
                bar.icon,
                Some(Markup::raw("<img src=\"/bread.png\" alt=\"\">"))
            );
            Ok(())
        });
    }

    #[test]
    fn test_save_theme_keeps_other_keys() {
        Jail::expect_with(|jail| {
            let original = "output = \"mine.html\"\n\n[[needs]]\nlabel = \"Rations\"\nvalue = 10.0\nmax_value = 0.0\ncategory = \"food\"\n";
            jail.create_file("config.toml", original)?;
            jail.set_env("VEXIUM_SHELL__LANG", "fr");

            save_theme("config.toml", ThemeVariant::EverforestLight).map_err(|e| e.to_string())?;

            let written = fs::read_to_string("config.toml").map_err(|e| e.to_string())?;
            assert!(written.contains("Rations"));
            assert!(written.contains("max_value = 0.0"));
            assert!(written.contains("theme = \"EverforestLight\""));
            assert!(!written.contains("fr"));
            assert!(!written.contains("Water"));
            Ok(())
        });
    }

    #[test]
    fn test_save_theme_leaves_unparseable_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "theme = [broken")?;

            let result = save_theme("config.toml", ThemeVariant::EverforestLight);
            assert!(matches!(result, Err(SettingsError::Parse(_))));

            let written = fs::read_to_string("config.toml").map_err(|e| e.to_string())?;
            assert_eq!(written, "theme = [broken");
            Ok(())
        });
    }

    #[test]
    fn test_save_theme_creates_missing_file() {
        Jail::expect_with(|_jail| {
            save_theme("new/config.toml", ThemeVariant::EverforestLight)
                .map_err(|e| e.to_string())?;
            let loaded = Settings::load_from("new/config.toml").map_err(|e| e.to_string())?;
            assert_eq!(loaded.theme, ThemeVariant::EverforestLight);
            assert_eq!(loaded.needs, Settings::default().needs);
            Ok(())
        });
    }

    #[test]
    fn test_save_then_load() {
        Jail::expect_with(|_jail| {
            let mut settings = Settings::default();
            settings.theme = ThemeVariant::EverforestLight;
            settings.needs[2].value = 42.0;

            settings
                .save_to("nested/dir/config.toml")
                .map_err(|e| e.to_string())?;
            let loaded =
                Settings::load_from("nested/dir/config.toml").map_err(|e| e.to_string())?;
            assert_eq!(loaded, settings);
            Ok(())
        });
    }
}
