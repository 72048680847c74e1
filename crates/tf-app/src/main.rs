use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tf_core::charset::NAMED_CHARSETS;
use tf_core::config::ConvertConfig;
use tf_export::JsWriter;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Sorties immédiates
    if cli.list_charsets {
        print_charsets();
        return Ok(());
    }
    let Some(image) = cli.image.as_deref() else {
        cli::Cli::command().print_help()?;
        return Ok(());
    };

    // 4. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);

    // 5. Décoder, rendre, écrire
    let doc = pipeline::convert(image, &config)?;
    JsWriter::new(config.namespace.as_str())
        .save(&doc, &config.output)
        .with_context(|| format!("Écriture échouée : {}", config.output.display()))?;

    Ok(())
}

fn print_charsets() {
    println!("Predefined character sets, selected with `--charset`:");
    println!("    textify anim.gif --charset shades");
    for (name, chars) in NAMED_CHARSETS {
        println!("  {name:<10} {chars}");
    }
}

/// Config file if present, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<ConvertConfig> {
    if cli.config.exists() {
        Ok(tf_core::config::load_config(&cli.config)?)
    } else {
        log::info!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ConvertConfig::default())
    }
}
