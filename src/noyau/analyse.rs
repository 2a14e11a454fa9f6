// src/noyau/analyse.rs
//
// Descente récursive -> Expr
//
//   expr  := term (('+' | '-') term)*
//   term  := unary (('*' | '/') unary)*
//   unary := '-' unary | atom
//   atom  := NUMBER | '(' expr ')' | FUNCTION '(' expr ')'
//
// Règles:
// - * et / plus forts que + et -, tous associatifs à gauche
// - moins unaire plus fort que tout binaire
// - garde-fous : profondeur d’imbrication bornée (pile d’appels du parse)
//   et nombre de noeuds borné (pile d’appels de l’évaluation, arbres “en peigne”)

use super::erreur::{EvalError, RaisonSyntaxe};
use super::expr::{Expr, OpBin};
use super::fonctions::Fonction;
use super::jetons::{Jeton, Tok};

/// Garde-fou : au-delà, on refuse (anti débordement de pile).
pub const PROFONDEUR_MAX: usize = 256;

/// Garde-fou : taille maximale de l’arbre (noeuds).
pub const NOEUDS_MAX: usize = 4096;

/// Construit l’arbre à partir d’une suite de jetons terminée par `Tok::Fin`.
pub fn parse(jetons: &[Jeton]) -> Result<Expr, EvalError> {
    let mut p = Analyseur {
        jetons,
        i: 0,
        profondeur: 0,
        noeuds: 0,
    };

    if matches!(p.courant().tok, Tok::Fin) {
        return Err(EvalError::parse(p.courant().position, RaisonSyntaxe::EntreeVide));
    }

    let e = p.expr()?;

    let reste = p.courant();
    match reste.tok {
        Tok::Fin => Ok(e),
        Tok::RPar => Err(EvalError::parse(
            reste.position,
            RaisonSyntaxe::ParentheseNonOuverte,
        )),
        _ => Err(EvalError::parse(reste.position, RaisonSyntaxe::JetonsEnTrop)),
    }
}

struct Analyseur<'a> {
    jetons: &'a [Jeton],
    i: usize,
    profondeur: usize,
    noeuds: usize,
}

impl<'a> Analyseur<'a> {
    /// Jeton courant ; au-delà de la fin, on reste sur le dernier (Fin).
    fn courant(&self) -> &'a Jeton {
        static FIN: Jeton = Jeton {
            tok: Tok::Fin,
            position: 0,
        };
        self.jetons
            .get(self.i)
            .or_else(|| self.jetons.last())
            .unwrap_or(&FIN)
    }

    fn avancer(&mut self) {
        if self.i < self.jetons.len() {
            self.i += 1;
        }
    }

    fn entrer(&mut self) -> Result<(), EvalError> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(EvalError::parse(
                self.courant().position,
                RaisonSyntaxe::ImbricationTropProfonde,
            ));
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur -= 1;
    }

    /// Compte un noeud construit à la position `position`.
    fn compter(&mut self, position: usize) -> Result<(), EvalError> {
        self.noeuds += 1;
        if self.noeuds > NOEUDS_MAX {
            return Err(EvalError::parse(
                position,
                RaisonSyntaxe::ExpressionTropGrande,
            ));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, EvalError> {
        let mut gauche = self.term()?;
        loop {
            let op = match self.courant().tok {
                Tok::Plus => OpBin::Add,
                Tok::Minus => OpBin::Sub,
                _ => return Ok(gauche),
            };
            self.compter(self.courant().position)?;
            self.avancer();
            let droite = self.term()?;
            gauche = Expr::bin(op, gauche, droite);
        }
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut gauche = self.unary()?;
        loop {
            let op = match self.courant().tok {
                Tok::Star => OpBin::Mul,
                Tok::Slash => OpBin::Div,
                _ => return Ok(gauche),
            };
            self.compter(self.courant().position)?;
            self.avancer();
            let droite = self.unary()?;
            gauche = Expr::bin(op, gauche, droite);
        }
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        if matches!(self.courant().tok, Tok::Minus) {
            self.compter(self.courant().position)?;
            self.avancer();
            self.entrer()?;
            let x = self.unary();
            self.sortir();
            return Ok(Expr::neg(x?));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Expr, EvalError> {
        let j = self.courant();
        match &j.tok {
            Tok::Num(v) => {
                self.compter(j.position)?;
                self.avancer();
                Ok(Expr::Num(*v))
            }

            Tok::LPar => {
                self.avancer();
                self.groupe(j.position)
            }

            Tok::Ident(nom) => {
                let fonc = nom.parse::<Fonction>().map_err(|_| {
                    EvalError::parse(j.position, RaisonSyntaxe::FonctionInconnue(nom.clone()))
                })?;
                self.compter(j.position)?;
                self.avancer();

                if !matches!(self.courant().tok, Tok::LPar) {
                    return Err(EvalError::parse(
                        self.courant().position,
                        RaisonSyntaxe::FonctionSansParenthese(nom.clone()),
                    ));
                }
                let ouvrante = self.courant().position;
                self.avancer();
                let x = self.groupe(ouvrante)?;
                Ok(Expr::fonc(fonc, x))
            }

            Tok::Fin => Err(EvalError::parse(j.position, RaisonSyntaxe::OperandeManquante)),

            Tok::RPar => {
                // "()" ou "2*)": une opérande était attendue
                Err(EvalError::parse(j.position, RaisonSyntaxe::OperandeManquante))
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                Err(EvalError::parse(j.position, RaisonSyntaxe::OperandeManquante))
            }
        }
    }

    /// Contenu d’un groupe déjà ouvert (la '(' est consommée) jusqu’à sa ')'.
    fn groupe(&mut self, ouvrante: usize) -> Result<Expr, EvalError> {
        self.entrer()?;
        let x = self.expr();
        self.sortir();
        let x = x?;

        if !matches!(self.courant().tok, Tok::RPar) {
            return Err(match self.courant().tok {
                Tok::Fin => EvalError::parse(ouvrante, RaisonSyntaxe::ParentheseNonFermee),
                _ => EvalError::parse(self.courant().position, RaisonSyntaxe::JetonsEnTrop),
            });
        }
        self.avancer();
        Ok(x)
    }
}
