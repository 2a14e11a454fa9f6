//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, historique,
//! démarche) et offrir les actions des boutons. C’est l’APPELANT du noyau :
//! - l’entrée est un simple tampon mutable, possédé ici
//! - l’opérande d’une fonction est extraite ici, puis passée délimitée au noyau
//! - un échec ne touche ni l’entrée ni l’historique
//!
//! Contrats :
//! - Aucune évaluation “maison” : tout passe par crate::noyau.
//! - Défense en profondeur : longueur d’entrée bornée.

use tracing::{info, warn};

use crate::noyau::{self, format_resultat, Fonction};

use super::historique::Historique;

/// Garde-fou : longueur maximale de l’entrée (caractères).
pub const LONGUEUR_MAX_ENTREE: usize = 256;

/// Opérateurs binaires (la suppression des doublons ne concerne qu’eux).
const OPERATEURS_BINAIRES: [char; 4] = ['+', '-', '*', '/'];

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // dernier résultat (bandeau)
    pub erreur: String,   // message d’erreur (si parsing/éval échoue)

    // --- historique + démarche ---
    pub historique: Historique,
    pub demarche: Demarche,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            historique: Historique::new(),
            demarche: Demarche::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Saisie ------------------------ */

    fn place_restante(&self) -> bool {
        self.entree.chars().count() < LONGUEUR_MAX_ENTREE
    }

    /// Chiffre ou '.' ; un second '.' dans le nombre en cours est ignoré.
    pub fn append_chiffre(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.') || !self.place_restante() {
            return;
        }

        if c == '.' {
            let deja_un_point = self
                .entree
                .chars()
                .rev()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .any(|c| c == '.');
            if deja_un_point {
                return;
            }
        }

        self.entree.push(c);
        self.focus_entree = true;
    }

    /// + - * / ( ).
    ///
    /// Heuristique de saisie (pas une règle du noyau) : un opérateur binaire
    /// juste après un autre opérateur binaire est ignoré. Les parenthèses
    /// ne sont jamais bloquées et ne bloquent rien.
    pub fn append_operateur(&mut self, op: char) {
        let est_paren = op == '(' || op == ')';
        if !(est_paren || OPERATEURS_BINAIRES.contains(&op)) || !self.place_restante() {
            return;
        }

        if !est_paren {
            let dernier = self.entree.chars().rev().find(|c| !c.is_whitespace());
            if matches!(dernier, Some(c) if OPERATEURS_BINAIRES.contains(&c)) {
                return;
            }
        }

        self.entree.push(op);
        self.focus_entree = true;
    }

    /// C : efface l’entrée et le bandeau (l’historique reste).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// DEL : retire d’un coup un nom de fonction tapé ("sqrt(", "sin(", ...),
    /// sinon un caractère.
    pub fn backspace_entree(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        for f in Fonction::TOUTES {
            let motif = format!("{}(", f.nom());
            if self.entree.ends_with(&motif) {
                let garde = self.entree.len() - motif.len();
                self.entree.truncate(garde);
                self.focus_entree = true;
                return;
            }
        }

        self.entree.pop();
        self.focus_entree = true;
    }

    /* ------------------------ Actions noyau ------------------------ */

    /// "=" : évalue l’entrée ; succès => historique + l’entrée devient le résultat.
    pub fn calculer(&mut self) {
        let expression = self.entree.trim().to_string();
        if expression.is_empty() {
            self.set_erreur("Aucune expression à calculer");
            return;
        }

        match noyau::evaluate_detaille(&expression) {
            Ok(ev) => {
                let texte = format_resultat(ev.valeur);
                info!(%expression, resultat = %texte, "calcul");

                self.historique.push(expression, texte.clone());
                self.entree = texte.clone();
                self.set_resultat(
                    texte,
                    Demarche {
                        jetons: ev.jetons,
                        arbre: ev.arbre,
                    },
                );
            }
            Err(e) => {
                warn!(%expression, erreur = %e, "calcul refusé");
                self.set_erreur(e.to_string());
            }
        }
    }

    /// Bouton fonction : applique `f` à l’opérande en fin d’entrée
    /// (nombre ou groupe parenthésé), puis la remplace par le résultat.
    pub fn appliquer_fonction(&mut self, f: Fonction) {
        if self.entree.trim().is_empty() {
            self.set_erreur("Entrez d’abord un nombre");
            return;
        }

        let Some(debut) = extraire_operande_final(&self.entree) else {
            self.set_erreur("Aucun nombre valide en fin d’entrée");
            return;
        };

        let operande = self.entree[debut..].trim_end().to_string();

        match noyau::apply_function(f.nom(), &operande) {
            Ok(v) => {
                let texte = format_resultat(v);
                let libelle = format!("{f}({})", sans_parentheses_externes(&operande));
                info!(expression = %libelle, resultat = %texte, "fonction");

                self.historique.push(libelle, texte.clone());
                self.entree.truncate(debut);
                self.entree.push_str(&texte);
                self.set_resultat(texte, Demarche::default());
            }
            Err(e) => {
                warn!(%f, %operande, erreur = %e, "fonction refusée");
                self.set_erreur(e.to_string());
            }
        }
    }

    /* ------------------------ Utilitaires ------------------------ */

    /// Choix UX : on CONSERVE l’entrée et l’historique sur une faute.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.resultat.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    fn set_resultat(&mut self, resultat: String, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = resultat;
        self.demarche = demarche;
        self.focus_entree = true;
    }
}

/// Début (octet) de l’opérande en fin d’entrée :
/// - un groupe parenthésé équilibré "(...)" => position de sa '(' ouvrante,
///   ou du nom de fonction qui la précède ("sqrt(16)" => 0)
/// - sinon un nombre [0-9.]+ contenant au moins un chiffre
///
/// Les espaces finaux sont ignorés. None si rien d’exploitable.
pub fn extraire_operande_final(entree: &str) -> Option<usize> {
    let s = entree.trim_end();
    let dernier = s.chars().last()?;

    if dernier == ')' {
        let mut profondeur = 0usize;
        for (i, c) in s.char_indices().rev() {
            match c {
                ')' => profondeur += 1,
                '(' => {
                    profondeur = profondeur.checked_sub(1)?;
                    if profondeur == 0 {
                        return Some(debut_appel(s, i));
                    }
                }
                _ => {}
            }
        }
        // ')' sans '(' correspondante
        return None;
    }

    let mut debut = None;
    let mut chiffre = false;
    for (i, c) in s.char_indices().rev() {
        if c.is_ascii_digit() {
            chiffre = true;
        } else if c != '.' {
            break;
        }
        debut = Some(i);
    }

    if chiffre {
        debut
    } else {
        None
    }
}

/// Si la '(' en `paren` ouvre un appel "sqrt(...)" connu, début du nom ;
/// sinon `paren`. Le nom commence à la première lettre (comme à la tokenisation).
fn debut_appel(s: &str, paren: usize) -> usize {
    let avant = &s[..paren];
    let run = avant
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric())
        .last()
        .map_or(paren, |(i, _)| i);

    match avant[run..].find(|c: char| c.is_ascii_alphabetic()) {
        Some(k) if avant[run + k..].parse::<Fonction>().is_ok() => run + k,
        _ => paren,
    }
}

/// "(4+5)" -> "4+5" (seulement si la paire externe se correspond).
fn sans_parentheses_externes(s: &str) -> &str {
    if s.starts_with('(') && extraire_operande_final(s) == Some(0) {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
