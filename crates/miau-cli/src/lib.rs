//! miau-cli/src/lib.rs — CLI du transpileur Miau
//!
//! Usage :
//!   miauc chat.miau            → écrit chat.c à côté de la source
//!   miauc chat.miau -o sortie.c
//!
//! La variable d'environnement `MIAUC_OUT` fixe aussi la destination ;
//! le drapeau `-o` l'emporte sur elle.

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use log::debug;

use miau_core::{Compiler, CompilerConfig};

/// Point d'entrée du binaire (à appeler depuis src/main.rs)
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = CompilerConfig::from_env();
    if let Some(out) = cli.out {
        cfg.out = Some(out);
    }
    debug!("réglages: {cfg:?}");

    let product = Compiler::new(cfg)
        .compile_file(&cli.source)
        .wrap_err_with(|| format!("compilation de {}", cli.source))?;

    eprintln!("✅  {} → {}", cli.source, product.out_path);
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "miauc", version, about = "Transpileur Miau → C")]
struct Cli {
    /// Fichier source Miau (.miau)
    source: Utf8PathBuf,

    /// Destination du C produit (défaut : la source, extension remplacée par .c)
    #[arg(short, long)]
    out: Option<Utf8PathBuf>,
}
