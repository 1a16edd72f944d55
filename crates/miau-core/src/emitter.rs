//! emitter.rs — Accumulation du C généré
//!
//! Deux segments de texte : l'en-tête (includes, ouverture de `main`,
//! déclarations de variables au fil de l'eau) et le corps (instructions).
//! Rien n'est écrit tant que la compilation n'a pas abouti ; `output`
//! concatène les deux segments, `write_to` pose le résultat sur disque.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

use std::fs;
use std::io;

use camino::Utf8Path;

/* ───────────────────────── Emitter ───────────────────────── */

#[derive(Debug, Default)]
pub struct Emitter {
    header: String,
    code: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute un fragment au corps, sans fin de ligne.
    pub fn emit(&mut self, text: &str) {
        self.code.push_str(text);
    }

    /// Ajoute une ligne complète au corps.
    pub fn emit_line(&mut self, text: &str) {
        self.code.push_str(text);
        self.code.push('\n');
    }

    /// Ajoute une ligne complète à l'en-tête (déclarations comprises).
    pub fn header_line(&mut self, text: &str) {
        self.header.push_str(text);
        self.header.push('\n');
    }

    /// Texte C complet, en-tête puis corps.
    pub fn output(&self) -> String {
        let mut out = String::with_capacity(self.header.len() + self.code.len());
        out.push_str(&self.header);
        out.push_str(&self.code);
        out
    }

    /// Écrit le texte C complet à l'emplacement donné.
    pub fn write_to(&self, path: &Utf8Path) -> io::Result<()> {
        fs::write(path, self.output())
    }
}

/* ───────────────────────── Tests ───────────────────────── */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_comes_before_code() {
        let mut em = Emitter::new();
        em.emit_line("corps;");
        em.header_line("entete;");
        assert_eq!(em.output(), "entete;\ncorps;\n");
    }

    #[test]
    fn emit_then_line_share_one_line() {
        let mut em = Emitter::new();
        em.emit("a = ");
        em.emit("1");
        em.emit_line(";");
        assert_eq!(em.output(), "a = 1;\n");
    }
}
