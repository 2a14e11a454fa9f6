// src/noyau/jetons.rs
//
// Tokenisation paresseuse.
// Caractères permis : chiffres, un seul '.' par nombre, + - * / ( ),
// espaces (ignorés), lettres ASCII (noms de fonctions, normalisés en minuscules).
// Tout autre caractère => EvalError::Lex à sa position (en caractères).

use super::erreur::EvalError;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Nom de fonction (sin, cos, ...). Le parse décidera s’il est connu.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,

    Fin,
}

/// Un jeton + la position (en caractères) de son premier caractère.
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub position: usize,
}

/// Suite paresseuse de jetons.
///
/// - se termine par exactement un `Tok::Fin`, puis `None`
/// - s’arrête (None) après la première erreur
/// - redémarrable : `restart()` ou `clone()`
#[derive(Clone, Debug)]
pub struct Jetons {
    chars: Vec<char>,
    i: usize,
    termine: bool,
}

impl Jetons {
    pub fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
            i: 0,
            termine: false,
        }
    }

    /// Repart du début de la chaîne.
    pub fn restart(&mut self) {
        self.i = 0;
        self.termine = false;
    }

    fn nombre(&mut self) -> Result<Jeton, EvalError> {
        let start = self.i;
        let mut point: Option<usize> = None;

        while self.i < self.chars.len() {
            let c = self.chars[self.i];
            if c.is_ascii_digit() {
                self.i += 1;
            } else if c == '.' {
                if let Some(p) = point {
                    // ".." : le premier point, sans chiffre avant, est déjà fautif
                    let position = if p == start && self.i - start == 1 {
                        p
                    } else {
                        self.i
                    };
                    return Err(EvalError::Lex {
                        position,
                        caractere: c,
                    });
                }
                point = Some(self.i);
                self.i += 1;
            } else {
                break;
            }
        }

        // un point seul (sans chiffre adjacent) n’est pas un nombre
        if self.i - start == 1 {
            if let Some(p) = point {
                return Err(EvalError::Lex {
                    position: p,
                    caractere: '.',
                });
            }
        }

        let texte: String = self.chars[start..self.i].iter().collect();
        // Trop de chiffres => +inf ; l’évaluateur le refusera (NonFiniteResult).
        let v = texte.parse::<f64>().map_err(|_| EvalError::Lex {
            position: start,
            caractere: self.chars[start],
        })?;

        Ok(Jeton {
            tok: Tok::Num(v),
            position: start,
        })
    }

    fn ident(&mut self) -> Jeton {
        let start = self.i;
        while self.i < self.chars.len() && self.chars[self.i].is_ascii_alphanumeric() {
            self.i += 1;
        }
        let mot: String = self.chars[start..self.i].iter().collect();
        Jeton {
            tok: Tok::Ident(mot.to_ascii_lowercase()),
            position: start,
        }
    }
}

impl Iterator for Jetons {
    type Item = Result<Jeton, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.termine {
            return None;
        }

        while self.i < self.chars.len() && self.chars[self.i].is_whitespace() {
            self.i += 1;
        }

        if self.i >= self.chars.len() {
            self.termine = true;
            return Some(Ok(Jeton {
                tok: Tok::Fin,
                position: self.chars.len(),
            }));
        }

        let position = self.i;
        let c = self.chars[position];

        let simple = match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            _ => None,
        };
        if let Some(tok) = simple {
            self.i += 1;
            return Some(Ok(Jeton { tok, position }));
        }

        let res = if c.is_ascii_digit() || c == '.' {
            self.nombre()
        } else if c.is_ascii_alphabetic() {
            Ok(self.ident())
        } else {
            Err(EvalError::Lex {
                position,
                caractere: c,
            })
        };

        if res.is_err() {
            self.termine = true;
        }
        Some(res)
    }
}

/// Tokenise toute la chaîne (erreur lexicale prioritaire sur la syntaxe).
/// Le dernier jeton est toujours `Tok::Fin`.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, EvalError> {
    Jetons::new(s).collect()
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    let mut out = Vec::new();
    for j in jetons {
        let s = match &j.tok {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),

            // pas affiché
            Tok::Fin => continue,
        };
        out.push(s);
    }
    out.join(" ")
}
