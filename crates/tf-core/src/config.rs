use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::charset::{CharRamp, DEFAULT_CHARSET, RampScaling};
use crate::error::CoreError;

/// Paramètres de conversion, résolus avant d'entrer dans le cœur.
///
/// Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use tf_core::config::ConvertConfig;
/// let config = ConvertConfig::default();
/// assert_eq!(config.charset, "shades");
/// assert!(config.width.is_none());
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConvertConfig {
    // === Conversion ===
    /// Largeur cible en caractères. `None` = largeur native.
    pub width: Option<u32>,
    /// Nom du charset prédéfini.
    pub charset: String,
    /// Caractères littéraux ; prioritaires sur `charset`.
    pub chars: Option<String>,
    /// Répartition de la luminance sur la rampe.
    pub scaling: RampScaling,
    /// Rendu des frames en parallèle.
    pub parallel: bool,

    // === Sortie ===
    /// Output file.
    pub output: PathBuf,
    /// Object the data literal is assigned to.
    pub namespace: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            width: None,
            charset: DEFAULT_CHARSET.into(),
            chars: None,
            scaling: RampScaling::Legacy,
            parallel: true,
            output: PathBuf::from("gif-data.js"),
            namespace: "window.GIF".into(),
        }
    }
}

impl ConvertConfig {
    /// Resolve the active ramp: literal `chars` first, then the named `charset`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidArgument`] for empty literal characters or
    /// an unknown charset name.
    ///
    /// # Example
    /// ```
    /// use tf_core::config::ConvertConfig;
    /// let mut config = ConvertConfig::default();
    /// config.chars = Some("AB".into());
    /// assert_eq!(config.ramp().unwrap().len(), 2);
    /// ```
    pub fn ramp(&self) -> Result<CharRamp, CoreError> {
        match self.chars.as_deref() {
            Some(chars) => CharRamp::new(chars),
            None => CharRamp::named(&self.charset),
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    convert: Option<ConvertSection>,
    output: Option<OutputSection>,
}

#[derive(Deserialize)]
struct ConvertSection {
    width: Option<u32>,
    charset: Option<String>,
    chars: Option<String>,
    scaling: Option<RampScaling>,
    parallel: Option<bool>,
}

#[derive(Deserialize)]
struct OutputSection {
    path: Option<PathBuf>,
    namespace: Option<String>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns [`CoreError::Config`] if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use tf_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("textify.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ConvertConfig, CoreError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CoreError::Config(format!("impossible de lire {} : {e}", path.display())))?;
    parse_config(&content)
        .map_err(|e| CoreError::Config(format!("{} : {e}", path.display())))
}

/// Parse TOML text into a config merged over the defaults.
///
/// # Errors
/// Returns [`CoreError::Config`] on malformed TOML.
///
/// # Example
/// ```
/// use tf_core::config::parse_config;
/// let config = parse_config("[convert]\nwidth = 40\n").unwrap();
/// assert_eq!(config.width, Some(40));
/// assert_eq!(config.charset, "shades");
/// ```
pub fn parse_config(content: &str) -> Result<ConvertConfig, CoreError> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))?;

    let mut config = ConvertConfig::default();

    if let Some(c) = file.convert {
        if c.width.is_some() {
            config.width = c.width;
        }
        if let Some(v) = c.charset {
            config.charset = v;
        }
        if c.chars.is_some() {
            config.chars = c.chars;
        }
        if let Some(v) = c.scaling {
            config.scaling = v;
        }
        if let Some(v) = c.parallel {
            config.parallel = v;
        }
    }

    if let Some(o) = file.output {
        if let Some(v) = o.path {
            config.output = v;
        }
        if let Some(v) = o.namespace {
            config.namespace = v;
        }
    }

    log::debug!("Configuration chargée : {config:?}");
    Ok(config)
}
