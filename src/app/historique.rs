//! src/app/historique.rs
//!
//! Historique des calculs (propriété de l’appelant).
//!
//! - ajout seulement, ordre d’insertion conservé
//! - l’ordre “plus récent d’abord” n’est qu’une vue pour l’affichage
//! - pas de synchronisation : à envelopper (Mutex, ...) si partagé entre threads

/// Une ligne d’historique : `expression = resultat`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enregistrement {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug, Default)]
pub struct Historique {
    lignes: Vec<Enregistrement>,
}

impl Historique {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, expression: impl Into<String>, resultat: impl Into<String>) {
        self.lignes.push(Enregistrement {
            expression: expression.into(),
            resultat: resultat.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.lignes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lignes.is_empty()
    }

    /// Ordre d’insertion.
    pub fn iter(&self) -> impl Iterator<Item = &Enregistrement> {
        self.lignes.iter()
    }

    /// Plus récent d’abord (affichage).
    pub fn iter_recent(&self) -> impl Iterator<Item = &Enregistrement> {
        self.lignes.iter().rev()
    }
}
