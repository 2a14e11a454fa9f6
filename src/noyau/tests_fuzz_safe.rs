//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - oracle : chaque expression générée porte sa valeur attendue,
//!   calculée avec les mêmes opérations f64 dans le même ordre

use std::time::{Duration, Instant};

use super::erreur::EvalError;
use super::fonctions::Fonction;
use super::{evaluate, format_resultat};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

type Attendu = Result<f64, EvalError>;

fn fini(v: f64) -> Attendu {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EvalError::NonFiniteResult)
    }
}

fn gen_nombre(rng: &mut Rng) -> (String, Attendu) {
    // entiers 0..9 (0 inclus : utile pour la division par zéro), parfois décimal
    let a = rng.pick(10);
    if rng.coin() {
        let b = rng.pick(10);
        let s = format!("{a}.{b}");
        let v: f64 = s.parse().unwrap_or(0.0);
        (s, Ok(v))
    } else {
        (format!("{a}"), Ok(a as f64))
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> (String, Attendu) {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(8) {
        0 => gen_nombre(rng),
        1..=4 => {
            let (sa, va) = gen_expr(rng, depth - 1);
            let (sb, vb) = gen_expr(rng, depth - 1);
            let (sym, v) = match rng.pick(4) {
                0 => ('+', va.and_then(|a| vb.and_then(|b| fini(a + b)))),
                1 => ('-', va.and_then(|a| vb.and_then(|b| fini(a - b)))),
                2 => ('*', va.and_then(|a| vb.and_then(|b| fini(a * b)))),
                _ => (
                    '/',
                    va.and_then(|a| {
                        vb.and_then(|b| {
                            if b == 0.0 {
                                Err(EvalError::DivisionByZero)
                            } else {
                                fini(a / b)
                            }
                        })
                    }),
                ),
            };
            (format!("({sa}{sym}{sb})"), v)
        }
        5 => {
            let (s, v) = gen_expr(rng, depth - 1);
            (format!("-{s}"), v.map(|x| -x))
        }
        6 => {
            let (s, v) = gen_expr(rng, depth - 1);
            (format!("sqrt({s})"), v.and_then(|x| Fonction::Sqrt.appliquer(x)))
        }
        _ => {
            let (s, v) = gen_expr(rng, depth - 1);
            (format!("pow2({s})"), v.and_then(|x| Fonction::Carre.appliquer(x)))
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_oracle_et_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 5);
        let obtenu = evaluate(&expr);

        assert_eq!(obtenu, attendu, "expr={expr:?}");
        // Même entrée => même sortie
        assert_eq!(evaluate(&expr), obtenu, "expr={expr:?}");

        match obtenu {
            Ok(v) => {
                // “=” enchaîné : le texte du résultat se relit à l’identique
                assert_eq!(evaluate(&format_resultat(v)), Ok(v), "expr={expr:?}");
                seen_ok += 1;
            }
            Err(_) => seen_err += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_soupe_de_caracteres() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    const ALPHABET: &[char] = &[
        '0', '1', '2', '5', '9', '.', '+', '-', '*', '/', '(', ')', ' ', 's', 'q', 'r', 't', 'i',
        'n', '$', '%', '=', ';', 'é',
    ];

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..2000 {
        budget(t0, max);

        let len = rng.pick(24) as usize;
        let s: String = (0..len)
            .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
            .collect();

        // ne doit jamais paniquer ; un succès est toujours fini
        if let Ok(v) = evaluate(&s) {
            assert!(v.is_finite(), "s={s:?} v={v}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(evaluate(&expr), Ok(400.0));
}

#[test]
fn fuzz_safe_entrees_hostiles_bornees() {
    // profondeur énorme : refus propre, pas de débordement de pile
    let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    assert!(matches!(evaluate(&parens), Err(EvalError::Parse { .. })));

    let somme = vec!["1"; 100_000].join("+");
    assert!(matches!(evaluate(&somme), Err(EvalError::Parse { .. })));

    let fonctions = format!("{}1{}", "sqrt(".repeat(50_000), ")".repeat(50_000));
    assert!(matches!(evaluate(&fonctions), Err(EvalError::Parse { .. })));
}
