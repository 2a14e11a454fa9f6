//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier les identités classiques à tolérance flottante près,
//! sans faire chauffer la machine.
//! - angles en degrés (sin(90) = 1)
//! - tolérance absolue 1e-9 (f64, pas d’exactitude symbolique ici)
//! - budget temps global sur les balayages

use std::time::{Duration, Instant};

use super::{apply_function, evaluate, EvalError};

const TOLERANCE: f64 = 1e-9;

fn eval_ok(expr: &str) -> f64 {
    evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    assert!(
        (v - attendu).abs() <= TOLERANCE,
        "expr={expr:?} obtenu={v} attendu={attendu}"
    );
}

fn assert_egal_expr(a: &str, b: &str) {
    let va = eval_ok(a);
    let vb = eval_ok(b);
    assert!((va - vb).abs() <= TOLERANCE, "{a:?}={va} vs {b:?}={vb}");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Angles remarquables (degrés) ------------------------ */

#[test]
fn sci_angles_remarquables() {
    assert_proche("sin(0)", 0.0);
    assert_proche("sin(30)", 0.5);
    assert_proche("sin(90)", 1.0);
    assert_proche("sin(270)", -1.0);
    assert_proche("cos(0)", 1.0);
    assert_proche("cos(60)", 0.5);
    assert_proche("cos(180)", -1.0);
    assert_proche("tan(45)", 1.0);
    assert_proche("tan(-45)", -1.0);
}

#[test]
fn sci_identites_symetrie() {
    // sin(-x) = -sin(x), cos(-x) = cos(x), tan(-x) = -tan(x)
    for x in ["17", "45", "123.5", "(10*7)"] {
        assert_egal_expr(&format!("sin(-{x})"), &format!("-sin({x})"));
        assert_egal_expr(&format!("cos(-{x})"), &format!("cos({x})"));
        assert_egal_expr(&format!("tan(-{x})"), &format!("-tan({x})"));
    }
}

#[test]
fn sci_periodicite() {
    // sin(x + 360) = sin(x) ; tan(x + 180) = tan(x)
    assert_egal_expr("sin(45+360)", "sin(45)");
    assert_egal_expr("cos(60-720)", "cos(60)");
    assert_egal_expr("tan(30+180)", "tan(30)");
}

#[test]
fn sci_pythagore_balayage() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    // sin² + cos² = 1 sur un balayage d’angles
    for deg in (-720..=720).step_by(15) {
        budget(t0, max);
        let expr = format!("pow2(sin({deg})) + pow2(cos({deg}))");
        assert_proche(&expr, 1.0);
    }
}

#[test]
fn sci_tan_egal_sin_sur_cos() {
    for deg in [10, 33, 60, 89, 100, 200] {
        assert_egal_expr(&format!("tan({deg})"), &format!("sin({deg})/cos({deg})"));
    }
}

/* ------------------------ Algèbre : sqrt / log / pow2 ------------------------ */

#[test]
fn sci_racine_et_carre() {
    // sqrt(pow2(x)) = |x|
    assert_proche("sqrt(pow2(-7))", 7.0);
    assert_proche("pow2(sqrt(2))", 2.0);
    assert_proche("sqrt(0.25)", 0.5);
}

#[test]
fn sci_logarithme() {
    // log(a*b) = log(a) + log(b)
    assert_egal_expr("log(20*50)", "log(20)+log(50)");
    assert_proche("log(1)", 0.0);
    assert_proche("log(0.01)", -2.0);
    assert_proche("log(pow2(10))", 2.0);
}

#[test]
fn sci_domaines() {
    assert!(matches!(evaluate("sqrt(-0.5)"), Err(EvalError::Domain { .. })));
    assert!(matches!(evaluate("log(0)"), Err(EvalError::Domain { .. })));
    assert!(matches!(evaluate("log(-10)"), Err(EvalError::Domain { .. })));
    // sqrt(-0) = -0 : pas une erreur de domaine
    assert_eq!(evaluate("sqrt(-0)"), Ok(0.0));
}

/* ------------------------ API fonction vs syntaxe étendue ------------------------ */

#[test]
fn sci_apply_function_coherent_avec_syntaxe() {
    for (f, x) in [
        ("sin", "30"),
        ("cos", "(45+15)"),
        ("tan", "10"),
        ("sqrt", "4+5"),
        ("log", "1000"),
        ("pow2", "-1.5"),
    ] {
        let via_api = apply_function(f, x).unwrap_or_else(|e| panic!("{f}({x}) err={e}"));
        let via_expr = eval_ok(&format!("{f}({x})"));
        assert_eq!(via_api, via_expr, "{f}({x})");
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_fonctions_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // sqrt(pow2(...)) imbriqués : reste 3
    let mut expr = "3".to_string();
    for _ in 0..60 {
        expr = format!("sqrt(pow2({expr}))");
        budget(t0, max);
    }
    assert_proche(&expr, 3.0);
}

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // somme “à plat” (associativité gauche), bien sous la borne de noeuds
    let mut expr = String::new();
    for k in 0..1000 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("0.5");
        budget(t0, max);
    }
    assert_eq!(evaluate(&expr), Ok(500.0));
}
