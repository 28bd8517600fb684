//! Status-Bar am unteren Bildschirmrand.

use crate::app::{AppIntent, AppState};

/// Rendert die Status-Bar
pub fn render_status_bar(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let image = state.image.current();
            if let Some(url) = state.image.loading_url() {
                ui.label(format!("Lade Bild: {}", url));
            } else {
                let (width, height) = image.dimensions();
                ui.label(format!("Bild: {} ({}x{})", image.label(), width, height));
            }

            ui.separator();

            match state.curve.current() {
                Some(curve) => ui.label(format!(
                    "Punkte: {} | Pfadlänge: {:.3}",
                    state.control_point_count(),
                    curve.length_approx()
                )),
                None => ui.label(format!(
                    "Punkte: {} | Kein Pfad",
                    state.control_point_count()
                )),
            };

            ui.separator();

            ui.label(format!(
                "Zoom: {:.2}x | Position: ({:.2}, {:.2})",
                state.view.camera.zoom, state.view.camera.position.x, state.view.camera.position.y
            ));

            if state.is_exporting() {
                ui.separator();
                ui.spinner();
                ui.label("Export läuft...");
            } else if let Some(report) = state.export.last_report() {
                ui.separator();
                ui.label(format!(
                    "Letzter Export: {}x{} px",
                    report.width, report.height
                ));
            }

            if let Some(ref msg) = state.ui.status_message {
                ui.separator();
                ui.label(egui::RichText::new(format!("⚠ {}", msg)).color(egui::Color32::YELLOW));
                if ui.small_button("✕").clicked() {
                    events.push(AppIntent::StatusMessageDismissed);
                }
            }

            // FPS-Anzeige (rechts)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("FPS: {:.0}", ctx.input(|i| 1.0 / i.stable_dt)));
            });
        });
    });

    events
}
