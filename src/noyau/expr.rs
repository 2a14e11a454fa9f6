// src/noyau/expr.rs
//
// AST flottant (f64).
// - Num  : littéral
// - Bin  : opérateur binaire (+ - * /)
// - Neg  : moins unaire
// - Fonc : fonction unaire (sin, sqrt, ...)
//
// Chaque variante possède TOUS ses opérandes (Box) : un arbre à trou
// n’est pas représentable. Pas de partage, pas de cycle.

use std::fmt;

use super::fonctions::Fonction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBin {
    Add,
    Sub,
    Mul,
    Div,
}

impl OpBin {
    pub fn symbole(self) -> char {
        match self {
            OpBin::Add => '+',
            OpBin::Sub => '-',
            OpBin::Mul => '*',
            OpBin::Div => '/',
        }
    }

    /// Précédence (pour l’affichage seulement ; le parse la porte dans sa grammaire).
    fn precedence(self) -> u8 {
        match self {
            OpBin::Add | OpBin::Sub => 1,
            OpBin::Mul | OpBin::Div => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Bin(OpBin, Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Fonc(Fonction, Box<Expr>),
}

impl Expr {
    pub fn bin(op: OpBin, a: Expr, b: Expr) -> Expr {
        Expr::Bin(op, Box::new(a), Box::new(b))
    }

    pub fn neg(x: Expr) -> Expr {
        Expr::Neg(Box::new(x))
    }

    pub fn fonc(f: Fonction, x: Expr) -> Expr {
        Expr::Fonc(f, Box::new(x))
    }

    /// Nombre de noeuds (démarche / tests).
    pub fn taille(&self) -> usize {
        match self {
            Expr::Num(_) => 1,
            Expr::Neg(x) | Expr::Fonc(_, x) => 1 + x.taille(),
            Expr::Bin(_, a, b) => 1 + a.taille() + b.taille(),
        }
    }
}

/// Affichage “joli” : parenthèses minimales, associativité à gauche respectée.
/// Le texte produit se relit vers le même arbre.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(v) => write!(f, "{v}"),
            Expr::Neg(x) => match x.as_ref() {
                Expr::Bin(..) => write!(f, "-({x})"),
                _ => write!(f, "-{x}"),
            },
            Expr::Fonc(fonc, x) => write!(f, "{fonc}({x})"),
            Expr::Bin(op, a, b) => {
                let p = op.precedence();

                // gauche : parenthèses si précédence strictement plus faible
                match a.as_ref() {
                    Expr::Bin(op_a, ..) if op_a.precedence() < p => write!(f, "({a})")?,
                    _ => write!(f, "{a}")?,
                }

                write!(f, " {} ", op.symbole())?;

                // droite : parenthèses si précédence <= (associativité à gauche)
                match b.as_ref() {
                    Expr::Bin(op_b, ..) if op_b.precedence() <= p => write!(f, "({b})"),
                    _ => write!(f, "{b}"),
                }
            }
        }
    }
}
