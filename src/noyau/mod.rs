//! Noyau sûr (f64)
//!
//! Organisation interne :
//! - jetons.rs    : tokenisation paresseuse
//! - analyse.rs   : descente récursive -> Expr
//! - expr.rs      : AST (f64) + affichage
//! - fonctions.rs : sin/cos/tan (degrés), sqrt, log10, pow2
//! - eval.rs      : pipeline complet + parcours de l’arbre
//! - format.rs    : texte d’un résultat (ré-évaluable)
//! - erreur.rs    : EvalError (taxonomie plate)
//!
//! Aucun `eval` dynamique : on construit toujours jetons + arbre.

pub mod analyse;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{EvalError, RaisonSyntaxe};
pub use eval::{apply_function, evaluate, evaluate_detaille, Evaluation};
pub use fonctions::Fonction;
pub use format::format_resultat;
