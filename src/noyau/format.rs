// src/noyau/format.rs
//
// Texte d’un résultat, pensé pour être ré-évalué (“=” enchaînés).
// - plus courte écriture décimale qui relit exactement le même f64
// - jamais de notation scientifique (la tokenisation ne la connaît pas)
// - -0 affiché "0"

/// Résultat -> texte ré-évaluable.
///
/// `v` doit être fini : c’est toujours une valeur `Ok` du noyau, qui refuse
/// NaN et ±inf (`NonFiniteResult`). Un non-fini donnerait "inf"/"NaN".
pub fn format_resultat(v: f64) -> String {
    debug_assert!(v.is_finite(), "format_resultat({v}) : valeur non finie");
    // -0.0 == 0.0 : on normalise le signe
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}
