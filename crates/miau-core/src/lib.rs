//! miau-core — Cœur du transpileur Miau → C
//!
//! Tout le passage de compilation tient ici : la source Miau est découpée,
//! analysée et traduite en C en une seule passe, sans arbre intermédiaire.
//!
//! ## Modules
//! - `token`   : jetons, positions, table des mots-clés félins et opérateurs.
//! - `lexer`   : scanner à la demande (jeton par jeton).
//! - `parser`  : descente récursive, vérifications sémantiques, émission directe.
//! - `emitter` : accumulation du C (en-tête + corps), écriture disque.
//! - `config`  : réglages (destination du fichier produit).
//! - `pipeline`: compilation de chaînes et de fichiers, bout en bout.
//!
//! ## Exemple
//! ```
//! use miau_core::{Compiler, CompilerConfig};
//!
//! let c = Compiler::new(CompilerConfig::default())
//!     .compile_str("MIAU \"BONJOUR\"\n")
//!     .expect("compilation ok");
//! assert!(c.contains("printf(\"BONJOUR\\n\");"));
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

// ---------- Modules publics ----------
pub mod config;
pub mod emitter;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod token;

// ---------- Reexports de confort ----------
pub use config::CompilerConfig;
pub use emitter::Emitter;
pub use lexer::{LexError, Lexer};
pub use parser::{Parser, SemanticError, SyntaxError};
pub use pipeline::{CompileProduct, Compiler};
pub use token::{Pos, Token, TokenKind, TokenTable};

// ---------- Version ----------
/// Version du crate (lisible, via Cargo).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Renvoie une jolie bannière de version (utile pour logs/outils).
pub fn version() -> String {
    format!("miau-core {}", VERSION)
}

// ---------- Erreurs & Résultat ----------
use thiserror::Error;

/// Toute défaillance possible du passage de compilation, de l'entrée-sortie
/// au contrôle différé des étiquettes.
#[derive(Debug, Error)]
pub enum Error {
    /// Lecture de la source ou écriture du C produit.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Caractère ou chaîne impossible à découper en jeton.
    #[error("lexical: {0}")]
    Lexical(#[from] lexer::LexError),

    /// Jeton inattendu pour la grammaire.
    #[error("syntaxe: {0}")]
    Syntax(#[from] parser::SyntaxError),

    /// Symbole ou étiquette hors des règles de portée.
    #[error("sémantique: {0}")]
    Semantic(#[from] parser::SemanticError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ---------- Prelude ----------
pub mod prelude {
    pub use crate::{
        version, CompileProduct, Compiler, CompilerConfig, Emitter, Error, Lexer, Parser, Result,
        Token, TokenKind,
    };
}

/* ───────────────────────── Tests ───────────────────────── */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Pos;

    #[test]
    fn version_banner_names_the_crate() {
        assert!(version().starts_with("miau-core "));
    }

    #[test]
    fn error_messages_carry_their_kind() {
        let lex = Error::from(LexError {
            pos: Pos { line: 2, col: 5 },
            msg: "chaîne non terminée".into(),
        });
        assert_eq!(lex.to_string(), "lexical: chaîne non terminée (line 2, col 5)");

        let syn = Error::from(SyntaxError {
            pos: Pos { line: 1, col: 1 },
            msg: "attendu Newline, trouvé Eof ``".into(),
        });
        assert!(syn.to_string().starts_with("syntaxe: "));

        let sem = Error::from(SemanticError::UndefinedLabel("fin".into()));
        assert_eq!(sem.to_string(), "sémantique: étiquette jamais définie: `fin`");
    }
}
