// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue, Backspace efface (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Historique défilant, plus récent en haut
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use crate::noyau::Fonction;

use super::etat::{AppCalc, LONGUEUR_MAX_ENTREE};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .id_salt("page")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice sûre");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);

                ui.add_space(8.0);
                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: (2+3)*4, sqrt(4+5), sin(90)")
                .char_limit(LONGUEUR_MAX_ENTREE)
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.calculer();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface l’entrée et le résultat", Action::Clear);
            self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);

            ui.separator();

            self.bouton_insert(ui, "(", InsertKind::Operateur('('));
            self.bouton_insert(ui, ")", InsertKind::Operateur(')'));
        });

        ui.add_space(6.0);

        // Fonctions “ingénieur” : s’appliquent au nombre / groupe final
        ui.horizontal_wrapped(|ui| {
            for f in Fonction::TOUTES {
                let label = match f {
                    Fonction::Sqrt => "sqrt",
                    Fonction::Carre => "x^2",
                    _ => f.nom(),
                };
                let resp = ui
                    .add_sized([46.0, 28.0], egui::Button::new(label))
                    .on_hover_text(format!("{f} du dernier nombre"));
                if resp.clicked() {
                    self.appliquer_fonction(f);
                }
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(
                ui.visuals().error_fg_color,
                format!("Erreur : {}", self.erreur),
            );
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", InsertKind::Chiffre('7'));
                self.bouton_insert(ui, "8", InsertKind::Chiffre('8'));
                self.bouton_insert(ui, "9", InsertKind::Chiffre('9'));
                self.bouton_insert(ui, "/", InsertKind::Operateur('/'));
                ui.end_row();

                self.bouton_insert(ui, "4", InsertKind::Chiffre('4'));
                self.bouton_insert(ui, "5", InsertKind::Chiffre('5'));
                self.bouton_insert(ui, "6", InsertKind::Chiffre('6'));
                self.bouton_insert(ui, "*", InsertKind::Operateur('*'));
                ui.end_row();

                self.bouton_insert(ui, "1", InsertKind::Chiffre('1'));
                self.bouton_insert(ui, "2", InsertKind::Chiffre('2'));
                self.bouton_insert(ui, "3", InsertKind::Chiffre('3'));
                self.bouton_insert(ui, "-", InsertKind::Operateur('-'));
                ui.end_row();

                self.bouton_insert(ui, "0", InsertKind::Chiffre('0'));
                self.bouton_insert(ui, ".", InsertKind::Chiffre('.'));
                self.bouton_action(ui, "=", "Calculer", Action::Calculer);
                self.bouton_insert(ui, "+", InsertKind::Operateur('+'));
                ui.end_row();
            });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        let texte = if self.resultat.is_empty() {
            "-"
        } else {
            self.resultat.as_str()
        };
        Self::champ_monospace(ui, "resultat_out", texte, 1);
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.label(format!("Historique ({}) :", self.historique.len()));

        egui::ScrollArea::vertical()
            .id_salt("historique")
            .max_height(180.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.weak("(vide)");
                }
                for e in self.historique.iter_recent() {
                    ui.monospace(format!("{} = {}", e.expression, e.resultat));
                }
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([46.0, 28.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::Clear => self.clear_entree(),
                Action::Backspace => self.backspace_entree(),
                Action::Calculer => self.calculer(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }

        match kind {
            InsertKind::Chiffre(c) => self.append_chiffre(c),
            InsertKind::Operateur(op) => self.append_operateur(op),
        }
        self.focus_entree = true;
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Clear,
    Backspace,
    Calculer,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Chiffre(char),
    Operateur(char),
}
