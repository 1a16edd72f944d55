//! lexer.rs — Scanner du langage Miau
//!
//! Lecture caractère par caractère, jetons produits à la demande
//! (`next_token`). Points notables :
//! - la source est complétée d'un `\n` final avant lecture : la dernière
//!   ligne est toujours terminée ;
//! - les retours à la ligne sont des jetons (ils séparent les instructions),
//!   espaces/tabulations/CR sont sautés ;
//! - `#` ouvre un commentaire jusqu'à la fin de ligne, sans consommer le
//!   retour à la ligne qui le termine ;
//! - `"` ouvre une chaîne sans échappes, délimiteurs exclus du texte ;
//! - après chaque jeton rendu, le curseur repose sur son dernier caractère :
//!   aucun caractère de la source n'est perdu entre deux appels.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

use std::fmt;

use crate::token::{Pos, Token, TokenKind, TokenTable};

/* ───────────────────────── Erreur lexicale ───────────────────────── */

#[derive(Debug, Clone)]
pub struct LexError {
    pub pos: Pos,
    pub msg: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {}, col {})", self.msg, self.pos.line, self.pos.col)
    }
}
impl std::error::Error for LexError {}

/* ───────────────────────── Lexer ───────────────────────── */

pub struct Lexer {
    chars: Vec<char>,
    /// index du prochain caractère à charger
    next: usize,
    /// caractère courant (`'\0'` = fin d'entrée)
    cur: char,
    /// position du caractère courant
    pos: Pos,
}

impl Lexer {
    pub fn new(src: &str) -> Self {
        // `\n` final garanti, même si le fichier n'en a pas.
        let mut chars: Vec<char> = src.chars().collect();
        chars.push('\n');
        Self {
            chars,
            next: 0,
            cur: '\0',
            pos: Pos { line: 1, col: 0 },
        }
    }

    /// Charge le caractère suivant et avance ligne/colonne.
    fn bump(&mut self) {
        if self.cur == '\n' {
            self.pos.line += 1;
            self.pos.col = 1;
        } else {
            self.pos.col += 1;
        }
        match self.chars.get(self.next) {
            Some(&c) => {
                self.cur = c;
                self.next += 1;
            }
            None => self.cur = '\0',
        }
    }

    /// Regarde le caractère suivant sans avancer.
    fn peek(&self) -> char {
        self.chars.get(self.next).copied().unwrap_or('\0')
    }

    fn err_at(&self, pos: Pos, msg: impl Into<String>) -> LexError {
        LexError { pos, msg: msg.into() }
    }

    /// Produit le prochain jeton. Répétable : une fois la fin atteinte,
    /// chaque appel renvoie `Eof`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            self.bump();
            let start = self.pos;
            match self.cur {
                '\0' => return Ok(Token::new(TokenKind::Eof, "", start)),
                '\n' => return Ok(Token::new(TokenKind::Newline, "\n", start)),
                ' ' | '\t' | '\r' => continue,
                _ => {}
            }

            // Opérateurs : la table teste 2 caractères avant 1.
            if let Some((kind, len)) = TokenTable::global().operator(self.cur, self.peek()) {
                let mut text = String::new();
                text.push(self.cur);
                if len == 2 {
                    self.bump();
                    text.push(self.cur);
                }
                return Ok(Token::new(kind, text, start));
            }

            // Commentaire jusqu'à la fin de ligne, `\n` laissé au prochain tour.
            if self.cur == '#' {
                while self.peek() != '\n' && self.peek() != '\0' {
                    self.bump();
                }
                continue;
            }

            // Chaîne sans échappes, délimiteurs exclus.
            if self.cur == '"' {
                let mut text = String::new();
                loop {
                    self.bump();
                    match self.cur {
                        '"' => break,
                        '\0' => return Err(self.err_at(start, "chaîne non terminée")),
                        c => text.push(c),
                    }
                }
                return Ok(Token::new(TokenKind::Str, text, start));
            }

            // Nombre : suite maximale de chiffres (entier non signé).
            if self.cur.is_ascii_digit() {
                let mut text = String::new();
                text.push(self.cur);
                while self.peek().is_ascii_digit() {
                    self.bump();
                    text.push(self.cur);
                }
                return Ok(Token::new(TokenKind::Number, text, start));
            }

            // Identifiant ou mot-clé : lettres puis marqueurs `?`/`!`.
            if self.cur.is_ascii_alphabetic() {
                let mut text = String::new();
                text.push(self.cur);
                while is_word_continue(self.peek()) {
                    self.bump();
                    text.push(self.cur);
                }
                let kind = TokenTable::global().keyword(&text).unwrap_or(TokenKind::Ident);
                return Ok(Token::new(kind, text, start));
            }

            return Err(self.err_at(start, format!("caractère inattendu: {:?}", self.cur)));
        }
    }
}

/// Lettres ASCII + marqueurs `?`/`!` (suffixes des mots-clés félins).
fn is_word_continue(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '?' || c == '!'
}

/* ───────────────────────── Tests ───────────────────────── */

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lx = Lexer::new(src);
        let mut v = Vec::new();
        loop {
            let t = lx.next_token().expect("lex ok");
            let end = t.kind == TokenKind::Eof;
            v.push(t.kind);
            if end {
                break;
            }
        }
        v
    }

    #[test]
    fn keywords_idents_numbers() {
        use TokenKind::*;
        let v = kinds("MAU chat = 12");
        assert_eq!(v, vec![KwLet, Ident, Eq, Number, Newline, Eof]);
    }

    #[test]
    fn double_char_operators_hold_together() {
        use TokenKind::*;
        let v = kinds("MAU a = 1\nMAU? a == 1 MAU!");
        assert_eq!(
            v,
            vec![KwLet, Ident, Eq, Number, Newline, KwIf, Ident, EqEq, Number, KwThen, Newline, Eof]
        );
    }

    #[test]
    fn not_equal_is_one_token() {
        use TokenKind::*;
        let v = kinds("1 != 2 <= 3 >= 4 < 5 > 6");
        assert_eq!(
            v,
            vec![Number, Ne, Number, Le, Number, Ge, Number, Lt, Number, Gt, Number, Newline, Eof]
        );
    }

    #[test]
    fn keyword_match_ignores_case_keeps_text() {
        let mut lx = Lexer::new("tschau maison");
        let kw = lx.next_token().expect("lex ok");
        assert_eq!(kw.kind, TokenKind::KwGoto);
        assert_eq!(kw.text, "tschau");
        let id = lx.next_token().expect("lex ok");
        assert_eq!(id.kind, TokenKind::Ident);
        assert_eq!(id.text, "maison");
    }

    #[test]
    fn string_excludes_delimiters_no_escapes() {
        let mut lx = Lexer::new("MIAU \"BON\\JOUR\"");
        assert_eq!(lx.next_token().expect("lex ok").kind, TokenKind::KwPrint);
        let s = lx.next_token().expect("lex ok");
        assert_eq!(s.kind, TokenKind::Str);
        // Le backslash reste un caractère comme un autre.
        assert_eq!(s.text, "BON\\JOUR");
    }

    #[test]
    fn comment_keeps_its_newline() {
        use TokenKind::*;
        let v = kinds("MIAU \"A\" # le chat approuve\nMIAU \"B\"");
        assert_eq!(v, vec![KwPrint, Str, Newline, KwPrint, Str, Newline, Eof]);
    }

    #[test]
    fn comment_alone_yields_newline() {
        use TokenKind::*;
        assert_eq!(kinds("# rien d'autre"), vec![Newline, Eof]);
    }

    #[test]
    fn final_line_always_terminated() {
        use TokenKind::*;
        // Pas de `\n` final dans la source : le scanner en ajoute un.
        assert_eq!(kinds("MIAU \"X\""), vec![KwPrint, Str, Newline, Eof]);
    }

    #[test]
    fn eof_is_repeatable() {
        let mut lx = Lexer::new("");
        assert_eq!(lx.next_token().expect("lex ok").kind, TokenKind::Newline);
        assert_eq!(lx.next_token().expect("lex ok").kind, TokenKind::Eof);
        assert_eq!(lx.next_token().expect("lex ok").kind, TokenKind::Eof);
    }

    #[test]
    fn positions_are_one_based() {
        let mut lx = Lexer::new("MIAU 1\nMIAU 2");
        let first = lx.next_token().expect("lex ok");
        assert_eq!(first.pos, Pos { line: 1, col: 1 });
        for _ in 0..2 {
            lx.next_token().expect("lex ok");
        }
        // Après NEWLINE : le MIAU de la deuxième ligne.
        let second = lx.next_token().expect("lex ok");
        assert_eq!(second.kind, TokenKind::KwPrint);
        assert_eq!(second.pos, Pos { line: 2, col: 1 });
    }

    #[test]
    fn unknown_char_is_fatal() {
        let mut lx = Lexer::new("MAU a = 1 $");
        let mut last = lx.next_token();
        while let Ok(t) = &last {
            if t.kind == TokenKind::Eof {
                panic!("l'erreur lexicale attendue n'est pas venue");
            }
            last = lx.next_token();
        }
        let err = last.unwrap_err();
        assert!(err.to_string().contains("caractère inattendu"));
        assert_eq!(err.pos.line, 1);
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let mut lx = Lexer::new("MIAU \"oups");
        assert_eq!(lx.next_token().expect("lex ok").kind, TokenKind::KwPrint);
        let err = lx.next_token().unwrap_err();
        assert!(err.to_string().contains("chaîne non terminée"));
    }

    #[test]
    fn strings_may_span_lines() {
        let mut lx = Lexer::new("MIAU \"a\nb\"");
        lx.next_token().expect("lex ok");
        let s = lx.next_token().expect("lex ok");
        assert_eq!(s.text, "a\nb");
    }
}
