//! Noyau — évaluation (pipeline réel)
//!
//! &str -> jetons -> Expr -> f64
//!
//! Pur et sans état : rien n’est mémorisé d’un appel à l’autre.
//! Toute valeur non finie (NaN, ±inf), même intermédiaire, est refusée.

use tracing::debug;

use super::analyse::parse;
use super::erreur::EvalError;
use super::expr::{Expr, OpBin};
use super::fonctions::Fonction;
use super::jetons::{format_tokens, tokenize};

/// Évaluation + démarche (pour le panneau d’explication de l’UI).
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub valeur: f64,
    pub jetons: String,
    pub arbre: String,
}

/// API publique : action “=”.
#[tracing::instrument(level = "debug")]
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let jetons = tokenize(expression)?;
    let arbre = parse(&jetons)?;
    let v = valeur(&arbre)?;
    debug!(valeur = v, noeuds = arbre.taille(), "évaluation réussie");
    Ok(v)
}

/// API publique : boutons “ingénieur”.
///
/// `operande` est une expression déjà délimitée par l’appelant
/// (ex: "4+5" pour sqrt(4+5)). Le nom est vérifié avant l’opérande.
#[tracing::instrument(level = "debug")]
pub fn apply_function(nom: &str, operande: &str) -> Result<f64, EvalError> {
    let fonc: Fonction = nom.parse()?;
    let x = evaluate(operande)?;
    let y = fonc.appliquer(x)?;
    debug!(%fonc, x, y, "fonction appliquée");
    Ok(y)
}

/// Comme `evaluate`, avec jetons et arbre en texte.
pub fn evaluate_detaille(expression: &str) -> Result<Evaluation, EvalError> {
    let jetons = tokenize(expression)?;
    let arbre = parse(&jetons)?;
    let v = valeur(&arbre)?;

    Ok(Evaluation {
        valeur: v,
        jetons: format_tokens(&jetons),
        arbre: arbre.to_string(),
    })
}

/// Parcours en profondeur, gauche puis droite.
pub fn valeur(expr: &Expr) -> Result<f64, EvalError> {
    let v = match expr {
        Expr::Num(v) => *v,

        Expr::Neg(x) => -valeur(x)?,

        Expr::Fonc(f, x) => f.appliquer(valeur(x)?)?,

        Expr::Bin(op, a, b) => {
            let va = valeur(a)?;
            let vb = valeur(b)?;
            match op {
                OpBin::Add => va + vb,
                OpBin::Sub => va - vb,
                OpBin::Mul => va * vb,
                OpBin::Div => {
                    // -0.0 == 0.0 aussi
                    if vb == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    va / vb
                }
            }
        }
    };

    if !v.is_finite() {
        return Err(EvalError::NonFiniteResult);
    }
    Ok(v)
}
