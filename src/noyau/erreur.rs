// src/noyau/erreur.rs
//
// Taxonomie plate des erreurs du noyau.
// Le noyau classe, l’UI présente (le Display sert de message affiché).

use thiserror::Error;

use super::fonctions::Fonction;

/// Raison d’un refus syntaxique (voir analyse.rs).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RaisonSyntaxe {
    #[error("entrée vide")]
    EntreeVide,

    #[error("parenthèse non fermée")]
    ParentheseNonFermee,

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseNonOuverte,

    #[error("opérande manquante")]
    OperandeManquante,

    #[error("jetons en trop après l’expression")]
    JetonsEnTrop,

    #[error("fonction inconnue: {0}")]
    FonctionInconnue(String),

    #[error("fonction sans parenthèse: {0}")]
    FonctionSansParenthese(String),

    #[error("imbrication trop profonde")]
    ImbricationTropProfonde,

    #[error("expression trop grande")]
    ExpressionTropGrande,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    /// Caractère interdit rencontré par la tokenisation.
    #[error("caractère inattendu '{caractere}' (position {position})")]
    Lex { position: usize, caractere: char },

    /// Grammaire non respectée.
    #[error("expression invalide (position {position}): {raison}")]
    Parse { position: usize, raison: RaisonSyntaxe },

    #[error("division par zéro")]
    DivisionByZero,

    /// sqrt d’un négatif, log d’un non-positif.
    #[error("{fonction}: {raison}")]
    Domain {
        fonction: Fonction,
        raison: &'static str,
    },

    /// NaN ou ±infini (dépassement, forme indéterminée).
    #[error("résultat non fini")]
    NonFiniteResult,

    #[error("fonction inconnue: {nom}")]
    UnknownFunction { nom: String },
}

impl EvalError {
    pub(crate) fn parse(position: usize, raison: RaisonSyntaxe) -> Self {
        EvalError::Parse { position, raison }
    }
}
