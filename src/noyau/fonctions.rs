// src/noyau/fonctions.rs
//
// Couche des fonctions unaires (boutons “ingénieur”).
// - sin/cos/tan : argument en DEGRÉS (converti en radians avant l’appel)
// - sqrt        : argument >= 0
// - log         : log10, argument > 0
// - pow2        : carré, sans restriction

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use super::erreur::EvalError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log,
    Carre,
}

impl Fonction {
    /// Toutes les fonctions, dans l’ordre des boutons.
    pub const TOUTES: [Fonction; 6] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Sqrt,
        Fonction::Log,
        Fonction::Carre,
    ];

    /// Nom canonique (celui qu’on tape dans une expression).
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Sqrt => "sqrt",
            Fonction::Log => "log",
            Fonction::Carre => "pow2",
        }
    }

    /// Applique la fonction à une valeur déjà évaluée.
    pub fn appliquer(self, x: f64) -> Result<f64, EvalError> {
        let y = match self {
            Fonction::Sin => degres_en_radians(x).sin(),
            Fonction::Cos => degres_en_radians(x).cos(),
            Fonction::Tan => degres_en_radians(x).tan(),
            Fonction::Sqrt => {
                if x < 0.0 {
                    return Err(EvalError::Domain {
                        fonction: self,
                        raison: "racine carrée d’un nombre négatif",
                    });
                }
                x.sqrt()
            }
            Fonction::Log => {
                if x <= 0.0 {
                    return Err(EvalError::Domain {
                        fonction: self,
                        raison: "le logarithme exige un argument strictement positif",
                    });
                }
                x.log10()
            }
            Fonction::Carre => x * x,
        };

        if !y.is_finite() {
            return Err(EvalError::NonFiniteResult);
        }
        Ok(y)
    }
}

/// radians = degrés * π / 180 (même ordre d’opérations que la calculatrice web).
fn degres_en_radians(degres: f64) -> f64 {
    degres * PI / 180.0
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

impl FromStr for Fonction {
    type Err = EvalError;

    /// Insensible à la casse. "pow" est accepté comme alias de "pow2".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sin" => Ok(Fonction::Sin),
            "cos" => Ok(Fonction::Cos),
            "tan" => Ok(Fonction::Tan),
            "sqrt" => Ok(Fonction::Sqrt),
            "log" => Ok(Fonction::Log),
            "pow2" | "pow" => Ok(Fonction::Carre),
            _ => Err(EvalError::UnknownFunction { nom: s.to_string() }),
        }
    }
}
