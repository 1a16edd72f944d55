//! pipeline.rs — Enchaînement complet : source Miau → fichier C
//!
//! Le [`Compiler`] relie les étages (scanner, parseur-émetteur) et décide de
//! l'emplacement du fichier produit. Rien ne touche le disque si la
//! compilation échoue en route.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};

use crate::config::CompilerConfig;
use crate::emitter::Emitter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::Result;

/* ───────────────────────── Produit ───────────────────────── */

/// Résultat d'une compilation de fichier.
#[derive(Debug, Clone)]
pub struct CompileProduct {
    /// Texte C complet, tel qu'écrit sur disque.
    pub c_source: String,
    /// Emplacement du fichier C produit.
    pub out_path: Utf8PathBuf,
}

/* ───────────────────────── Compiler ───────────────────────── */

#[derive(Debug, Default)]
pub struct Compiler {
    cfg: CompilerConfig,
}

impl Compiler {
    pub fn new(cfg: CompilerConfig) -> Self {
        Self { cfg }
    }

    /// Passage complet en mémoire, sans entrée ni sortie disque.
    pub fn compile_str(&self, source: &str) -> Result<String> {
        Ok(self.run(source)?.output())
    }

    /// Lit la source, compile, écrit le C à côté (ou à l'emplacement imposé).
    pub fn compile_file(&self, input: &Utf8Path) -> Result<CompileProduct> {
        let source = fs::read_to_string(input)?;
        debug!("compilation de {input} ({} octets)", source.len());

        let emitter = self.run(&source)?;
        let out_path = self.resolve_out(input);
        emitter.write_to(&out_path)?;

        let c_source = emitter.output();
        info!("{out_path} écrit ({} octets)", c_source.len());

        Ok(CompileProduct { c_source, out_path })
    }

    /// Scanner + parseur, l'émetteur rempli en retour.
    fn run(&self, source: &str) -> Result<Emitter> {
        let mut emitter = Emitter::new();
        let mut parser = Parser::new(Lexer::new(source), &mut emitter)?;
        parser.program()?;
        Ok(emitter)
    }

    fn resolve_out(&self, input: &Utf8Path) -> Utf8PathBuf {
        match &self.cfg.out {
            Some(out) => out.clone(),
            None => input.with_extension("c"),
        }
    }
}

/* ───────────────────────── Tests ───────────────────────── */
