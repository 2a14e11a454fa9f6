//! Calculatrice sûre
//!
//! - `noyau` : évaluateur arithmétique sûr (jetons -> arbre -> f64), sans UI
//! - `app`   : calculatrice egui (natif + web) qui appelle le noyau

pub mod app;
pub mod noyau;

pub use noyau::{apply_function, evaluate, EvalError};
