//! parser.rs — Analyse descendante et émission du C, en un seul passage
//!
//! Chaque règle reconnue écrit immédiatement son C dans l'[`Emitter`] :
//! il n'y a pas d'arbre intermédiaire. Grammaire :
//!
//! ```text
//! program    ::= { statement }
//! statement  ::= MIAU ( chaîne | expression ) nl
//!              | MIAU? ident nl
//!              | MIAU! ident nl
//!              | MAU ident "=" expression nl
//!              | MAU? comparison MAU! nl { statement } TSCHAUMAU nl
//!              | MAUMAU? comparison MAUMAU! nl { statement } TSCHAUMAUMAU nl
//!              | TSCHAU ident nl
//! comparison ::= expression op expression { op expression }
//!              avec op ∈ { = == != < <= > >= }
//! expression ::= term { (+|-) term }
//! term       ::= unary { (*|/) unary }
//! unary      ::= [+|-] primary
//! primary    ::= nombre | ident
//! nl         ::= NEWLINE { NEWLINE }
//! ```
//!
//! Vérifications sémantiques : toute variable est déclarée (par `MAU` ou
//! `MIAU?`) avant lecture, les étiquettes sont uniques, et chaque `TSCHAU`
//! doit viser une étiquette existante (contrôle différé en fin de
//! programme pour autoriser les sauts en avant).

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::emitter::Emitter;
use crate::lexer::Lexer;
use crate::token::{Pos, Token, TokenKind};
use crate::Result;

/* ───────────────────────── Erreurs ───────────────────────── */

/// Jeton inattendu pour la règle en cours.
#[derive(Debug, Clone)]
pub struct SyntaxError {
    pub pos: Pos,
    pub msg: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {}, col {})", self.msg, self.pos.line, self.pos.col)
    }
}
impl std::error::Error for SyntaxError {}

/// Violations des règles de portée (symboles et étiquettes).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("symbole non défini: `{0}`")]
    UndefinedSymbol(String),
    #[error("étiquette déjà définie: `{0}`")]
    DuplicateLabel(String),
    #[error("étiquette jamais définie: `{0}`")]
    UndefinedLabel(String),
}

/* ───────────────────────── Parser ───────────────────────── */

pub struct Parser<'a> {
    lexer: Lexer,
    emitter: &'a mut Emitter,
    cur: Token,
    peek: Token,
    /// variables déclarées (ordre d'apparition = ordre des `float …;`)
    symbols: BTreeSet<String>,
    labels: BTreeSet<String>,
    labels_gotoed: BTreeSet<String>,
}

impl<'a> Parser<'a> {
    /// Amorce la fenêtre de deux jetons (courant + suivant).
    pub fn new(mut lexer: Lexer, emitter: &'a mut Emitter) -> Result<Self> {
        let cur = lexer.next_token()?;
        let peek = lexer.next_token()?;
        Ok(Self {
            lexer,
            emitter,
            cur,
            peek,
            symbols: BTreeSet::new(),
            labels: BTreeSet::new(),
            labels_gotoed: BTreeSet::new(),
        })
    }

    /* ───────────── Fenêtre de jetons ───────────── */

    fn check(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    fn check_peek(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    fn next_token(&mut self) -> Result<()> {
        let incoming = self.lexer.next_token()?;
        self.cur = std::mem::replace(&mut self.peek, incoming);
        Ok(())
    }

    fn match_token(&mut self, kind: TokenKind) -> Result<()> {
        if !self.check(kind) {
            return Err(self.unexpected(kind).into());
        }
        self.next_token()
    }

    fn unexpected(&self, kind: TokenKind) -> SyntaxError {
        self.err_here(format!("attendu {:?}, trouvé {:?} `{}`", kind, self.cur.kind, self.cur.text))
    }

    fn err_here(&self, msg: impl Into<String>) -> SyntaxError {
        SyntaxError { pos: self.cur.pos, msg: msg.into() }
    }

    /// Une fin de ligne obligatoire, les suivantes absorbées.
    fn expect_newline(&mut self) -> Result<()> {
        self.match_token(TokenKind::Newline)?;
        while self.check(TokenKind::Newline) {
            self.next_token()?;
        }
        Ok(())
    }

    /* ───────────── Programme ───────────── */

    /// Point d'entrée : émet le squelette C puis toutes les instructions,
    /// et termine par le contrôle différé des étiquettes.
    pub fn program(&mut self) -> Result<()> {
        self.emitter.header_line("#include <stdio.h>");
        self.emitter.header_line("int main(void) {");

        while self.check(TokenKind::Newline) {
            self.next_token()?;
        }
        while !self.check(TokenKind::Eof) {
            self.statement()?;
        }

        self.emitter.emit_line("return 0;");
        self.emitter.emit_line("}");

        for label in &self.labels_gotoed {
            if !self.labels.contains(label) {
                return Err(SemanticError::UndefinedLabel(label.clone()).into());
            }
        }
        Ok(())
    }

    fn statement(&mut self) -> Result<()> {
        match self.cur.kind {
            TokenKind::KwPrint => self.print_statement()?,
            TokenKind::KwInput => self.input_statement()?,
            TokenKind::KwLabel => self.label_statement()?,
            TokenKind::KwLet => self.let_statement()?,
            TokenKind::KwIf => self.if_statement()?,
            TokenKind::KwWhile => self.while_statement()?,
            TokenKind::KwGoto => self.goto_statement()?,
            _ => {
                return Err(self
                    .err_here(format!(
                        "début d'instruction attendu, trouvé {:?} `{}`",
                        self.cur.kind, self.cur.text
                    ))
                    .into());
            }
        }
        self.expect_newline()
    }

    /* ───────────── Instructions ───────────── */

    /// `MIAU "texte"` ou `MIAU expression`
    fn print_statement(&mut self) -> Result<()> {
        let literal = self.check_peek(TokenKind::Str);
        self.next_token()?;
        if literal {
            self.emitter.emit_line(&format!("printf(\"{}\\n\");", self.cur.text));
            self.next_token()?;
        } else {
            self.emitter.emit("printf(\"%.2f\\n\", (float)(");
            self.expression()?;
            self.emitter.emit_line("));");
        }
        Ok(())
    }

    /// `MIAU? ident` : lecture clavier, gardée contre les entrées invalides.
    fn input_statement(&mut self) -> Result<()> {
        self.next_token()?;
        if !self.check(TokenKind::Ident) {
            return Err(self.unexpected(TokenKind::Ident).into());
        }
        let name = self.cur.text.clone();
        if self.symbols.insert(name.clone()) {
            self.emitter.header_line(&format!("float {name};"));
        }
        // Entrée illisible : la variable tombe à 0 et le jeton fautif est jeté.
        self.emitter.emit_line(&format!("if (0 == scanf(\"%f\", &{name})) {{"));
        self.emitter.emit_line(&format!("{name} = 0;"));
        self.emitter.emit_line("scanf(\"%*s\");");
        self.emitter.emit_line("}");
        self.next_token()
    }

    /// `MIAU! ident`
    fn label_statement(&mut self) -> Result<()> {
        self.next_token()?;
        if !self.check(TokenKind::Ident) {
            return Err(self.unexpected(TokenKind::Ident).into());
        }
        let name = self.cur.text.clone();
        if !self.labels.insert(name.clone()) {
            return Err(SemanticError::DuplicateLabel(name).into());
        }
        self.emitter.emit_line(&format!("{name}:"));
        self.next_token()
    }

    /// `MAU ident = expression` : déclare à la première affectation.
    fn let_statement(&mut self) -> Result<()> {
        self.next_token()?;
        if !self.check(TokenKind::Ident) {
            return Err(self.unexpected(TokenKind::Ident).into());
        }
        let name = self.cur.text.clone();
        if self.symbols.insert(name.clone()) {
            self.emitter.header_line(&format!("float {name};"));
        }
        self.emitter.emit(&format!("{name} = "));
        self.next_token()?;
        self.match_token(TokenKind::Eq)?;
        self.expression()?;
        self.emitter.emit_line(";");
        Ok(())
    }

    /// `MAU? comparison MAU! nl { statement } TSCHAUMAU`
    fn if_statement(&mut self) -> Result<()> {
        self.next_token()?;
        self.emitter.emit("if (");
        self.comparison()?;
        self.match_token(TokenKind::KwThen)?;
        self.expect_newline()?;
        self.emitter.emit_line(") {");

        while !self.check(TokenKind::KwEndif) {
            self.statement()?;
        }
        self.match_token(TokenKind::KwEndif)?;
        self.emitter.emit_line("}");
        Ok(())
    }

    /// `MAUMAU? comparison MAUMAU! nl { statement } TSCHAUMAUMAU`
    fn while_statement(&mut self) -> Result<()> {
        self.next_token()?;
        self.emitter.emit("while (");
        self.comparison()?;
        self.match_token(TokenKind::KwRepeat)?;
        self.expect_newline()?;
        self.emitter.emit_line(") {");

        while !self.check(TokenKind::KwEndwhile) {
            self.statement()?;
        }
        self.match_token(TokenKind::KwEndwhile)?;
        self.emitter.emit_line("}");
        Ok(())
    }

    /// `TSCHAU ident` : la cible peut être déclarée plus loin.
    fn goto_statement(&mut self) -> Result<()> {
        self.next_token()?;
        if !self.check(TokenKind::Ident) {
            return Err(self.unexpected(TokenKind::Ident).into());
        }
        let name = self.cur.text.clone();
        self.labels_gotoed.insert(name.clone());
        self.emitter.emit_line(&format!("goto {name};"));
        self.next_token()
    }

    /* ───────────── Expressions ───────────── */

    fn is_comparison_op(kind: TokenKind) -> bool {
        use TokenKind::*;
        matches!(kind, Eq | EqEq | Ne | Lt | Le | Gt | Ge)
    }

    /// Au moins un opérateur de comparaison exigé ; les suivants s'enchaînent
    /// tels quels (le C les règle de gauche à droite).
    fn comparison(&mut self) -> Result<()> {
        self.expression()?;
        if !Self::is_comparison_op(self.cur.kind) {
            return Err(self
                .err_here(format!(
                    "opérateur de comparaison attendu, trouvé {:?} `{}`",
                    self.cur.kind, self.cur.text
                ))
                .into());
        }
        while Self::is_comparison_op(self.cur.kind) {
            self.emitter.emit(&format!(" {} ", self.cur.text));
            self.next_token()?;
            self.expression()?;
        }
        Ok(())
    }

    fn expression(&mut self) -> Result<()> {
        self.term()?;
        while matches!(self.cur.kind, TokenKind::Plus | TokenKind::Minus) {
            self.emitter.emit(&format!(" {} ", self.cur.text));
            self.next_token()?;
            self.term()?;
        }
        Ok(())
    }

    fn term(&mut self) -> Result<()> {
        self.unary()?;
        while matches!(self.cur.kind, TokenKind::Star | TokenKind::Slash) {
            self.emitter.emit(&format!(" {} ", self.cur.text));
            self.next_token()?;
            self.unary()?;
        }
        Ok(())
    }

    /// Signe optionnel, collé à son opérande.
    fn unary(&mut self) -> Result<()> {
        if matches!(self.cur.kind, TokenKind::Plus | TokenKind::Minus) {
            self.emitter.emit(&self.cur.text);
            self.next_token()?;
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<()> {
        match self.cur.kind {
            TokenKind::Number => {
                self.emitter.emit(&self.cur.text);
                self.next_token()
            }
            TokenKind::Ident => {
                if !self.symbols.contains(&self.cur.text) {
                    return Err(SemanticError::UndefinedSymbol(self.cur.text.clone()).into());
                }
                self.emitter.emit(&self.cur.text);
                self.next_token()
            }
            _ => Err(self
                .err_here(format!(
                    "nombre ou identifiant attendu, trouvé {:?} `{}`",
                    self.cur.kind, self.cur.text
                ))
                .into()),
        }
    }
}

/* ───────────────────────── Tests ───────────────────────── */
