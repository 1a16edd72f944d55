//! token.rs — Modèle lexical du langage Miau
//!
//! Objectifs :
//! - Jeu fermé de catégories (`TokenKind`) : fin d'entrée, retour à la ligne,
//!   nombre, identifiant, chaîne, mots-clés félins, opérateurs.
//! - Table littéral → catégorie construite une seule fois (lazily) et triée
//!   par longueur de littéral décroissante : un opérateur à 2 caractères
//!   passe toujours avant sa version à 1 caractère (`==` n'est jamais lu
//!   comme `=` puis `=`).
//! - Mots-clés insensibles à la casse ; le jeton garde l'orthographe
//!   d'origine pour les diagnostics.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

use once_cell::sync::Lazy;

/* ───────────────────────── Positions ───────────────────────── */

/// Position 1-based (ligne/colonne) dans la source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
}

/* ───────────────────────── Jetons ───────────────────────── */

/// Catégorie lexicale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Fin & séparateur d'instructions
    Eof,
    Newline,

    // Littéraux & identifiants
    Number,
    Ident,
    Str,

    // Mots-clés félins
    KwPrint,    // MIAU
    KwInput,    // MIAU?
    KwLabel,    // MIAU!
    KwLet,      // MAU
    KwIf,       // MAU?
    KwThen,     // MAU!
    KwEndif,    // TSCHAUMAU
    KwWhile,    // MAUMAU?
    KwRepeat,   // MAUMAU!
    KwEndwhile, // TSCHAUMAUMAU
    KwGoto,     // TSCHAU

    // Opérateurs
    Eq,
    Plus,
    Minus,
    Star,
    Slash,
    EqEq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Jeton : catégorie + texte d'origine + position (diagnostics).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: Pos) -> Self {
        Self { kind, text: text.into(), pos }
    }
}

/* ───────────────────── Table mots-clés / opérateurs ───────────────────── */

/// Table littéral → catégorie, triée par longueur de littéral décroissante.
pub struct TokenTable {
    entries: Vec<(&'static str, TokenKind)>,
}

impl TokenTable {
    fn new_default() -> Self {
        use TokenKind::*;
        let mut entries = vec![
            // Mots-clés
            ("MIAU", KwPrint),
            ("MIAU?", KwInput),
            ("MIAU!", KwLabel),
            ("MAU", KwLet),
            ("MAU?", KwIf),
            ("MAU!", KwThen),
            ("TSCHAUMAU", KwEndif),
            ("MAUMAU?", KwWhile),
            ("MAUMAU!", KwRepeat),
            ("TSCHAUMAUMAU", KwEndwhile),
            ("TSCHAU", KwGoto),
            // Opérateurs
            ("=", Eq),
            ("+", Plus),
            ("-", Minus),
            ("*", Star),
            ("/", Slash),
            ("==", EqEq),
            ("!=", Ne),
            ("<", Lt),
            ("<=", Le),
            (">", Gt),
            (">=", Ge),
        ];
        // Tri stable : plus long d'abord, `==` avant `=`, `<=` avant `<`…
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { entries }
    }

    /// Table globale, construite au premier usage puis figée.
    pub fn global() -> &'static TokenTable {
        static TABLE: Lazy<TokenTable> = Lazy::new(TokenTable::new_default);
        &TABLE
    }

    /// Apparie un opérateur à partir du caractère courant et du suivant.
    /// Rend la catégorie et le nombre de caractères couverts (2 testé
    /// avant 1 grâce au tri de la table).
    pub fn operator(&self, cur: char, peek: char) -> Option<(TokenKind, usize)> {
        for (lit, kind) in &self.entries {
            let mut it = lit.chars();
            match (it.next(), it.next(), it.next()) {
                (Some(a), Some(b), None) if a == cur && b == peek => return Some((*kind, 2)),
                (Some(a), None, _) if a == cur => return Some((*kind, 1)),
                _ => {}
            }
        }
        None
    }

    /// Recherche insensible à la casse d'un mot-clé entier.
    pub fn keyword(&self, word: &str) -> Option<TokenKind> {
        self.entries
            .iter()
            .find(|(lit, _)| lit.eq_ignore_ascii_case(word))
            .map(|(_, kind)| *kind)
    }
}

/* ───────────────────────── Tests ───────────────────────── */
