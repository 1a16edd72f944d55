//! config.rs — Réglages du compilateur
//!
//! Par défaut, le C sort à côté de la source (extension remplacée par `.c`).
//! L'environnement (`MIAUC_OUT`) puis la ligne de commande peuvent imposer
//! une autre destination.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

use camino::Utf8PathBuf;

#[derive(Debug, Clone, Default)]
pub struct CompilerConfig {
    /// Destination imposée du fichier C (sinon dérivée de la source).
    pub out: Option<Utf8PathBuf>,
}

impl CompilerConfig {
    /// Configuration par défaut, amendée par `MIAUC_OUT` si présent.
    pub fn from_env() -> Self {
        let out = std::env::var("MIAUC_OUT").ok().map(Utf8PathBuf::from);
        Self { out }
    }
}
