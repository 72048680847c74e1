use std::path::PathBuf;

use clap::Parser;
use tf_core::charset::RampScaling;
use tf_core::config::ConvertConfig;

/// textify — convertit un GIF animé en animation ASCII.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image à convertir (GIF animé, ou PNG/JPEG/BMP fixe).
    pub image: Option<PathBuf>,

    /// Number of characters to use for the image width.
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Characters to use, in ramp order. Overrides --charset.
    #[arg(short = 'c', long)]
    pub chars: Option<String>,

    /// Use a predefined character set (see --list-charsets).
    #[arg(short = 's', long)]
    pub charset: Option<String>,

    /// List predefined character sets and exit.
    #[arg(short = 'l', long, default_value_t = false)]
    pub list_charsets: bool,

    /// Fichier de sortie. Défaut : gif-data.js.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fichier de configuration TOML.
    #[arg(long, default_value = "textify.toml")]
    pub config: PathBuf,

    /// Spread opaque luminance over the whole ramp instead of the legacy scaling.
    #[arg(long, default_value_t = false)]
    pub full_range: bool,

    /// Render frames one after another on the calling thread.
    #[arg(long, default_value_t = false)]
    pub sequential: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut ConvertConfig) {
        if self.width.is_some() {
            config.width = self.width;
        }
        if let Some(ref name) = self.charset {
            config.charset.clone_from(name);
            // An explicit name beats literal characters coming from the file.
            config.chars = None;
        }
        if self.chars.is_some() {
            config.chars.clone_from(&self.chars);
        }
        if let Some(ref path) = self.output {
            config.output.clone_from(path);
        }
        if self.full_range {
            config.scaling = RampScaling::Full;
        }
        if self.sequential {
            config.parallel = false;
        }
    }
}
