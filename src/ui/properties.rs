//! Properties-Panel (rechte Seitenleiste) für Warp-Parameter, Kontrollpunkte und Bildquelle.

use crate::app::{AppIntent, AppState};
use crate::shared::options::{MAX_RESOLUTION, MIN_RESOLUTION};
use crate::shared::{MAX_HEIGHT_SCALE, MIN_HEIGHT_SCALE, MIN_IMAGE_LENGTH_RATIO};

/// Obere Slider-Grenze der Warp-Intensität.
const WARP_INTENSITY_SLIDER_MAX: f32 = 5.0;

/// Rendert das Properties-Panel und gibt erzeugte Events zurück.
///
/// Schreibt nur in den Eingabepuffer `ui.image_url_input`; alle übrigen
/// Änderungen laufen als Intent über den Controller.
pub fn render_properties_panel(ctx: &egui::Context, state: &mut AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::SidePanel::right("properties_panel")
        .default_width(240.0)
        .min_width(200.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Warp");
                ui.separator();
                render_warp_sliders(ui, state, &mut events);

                ui.add_space(8.0);
                ui.heading("Kontrollpunkte");
                ui.separator();
                render_control_points(ui, state, &mut events);

                ui.add_space(8.0);
                ui.heading("Bild");
                ui.separator();
                render_image_source(ui, state, &mut events);

                ui.add_space(8.0);
                ui.separator();
                let can_export = !state.is_exporting();
                if ui
                    .add_enabled(can_export, egui::Button::new("📷 PNG exportieren"))
                    .clicked()
                {
                    events.push(AppIntent::ExportRequested);
                }
            });
        });

    events
}

fn render_warp_sliders(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<AppIntent>) {
    let params = &state.params;

    let mut resolution = params.resolution();
    if ui
        .add(
            egui::Slider::new(&mut resolution, MIN_RESOLUTION..=MAX_RESOLUTION)
                .logarithmic(true)
                .text("Auflösung"),
        )
        .changed()
    {
        events.push(AppIntent::ResolutionChanged { value: resolution });
    }

    let mut warp_intensity = params.warp_intensity();
    if ui
        .add(
            egui::Slider::new(&mut warp_intensity, 0.0..=WARP_INTENSITY_SLIDER_MAX)
                .text("Intensität"),
        )
        .changed()
    {
        events.push(AppIntent::WarpIntensityChanged {
            value: warp_intensity,
        });
    }

    let mut height_scale = params.height_scale();
    if ui
        .add(
            egui::Slider::new(&mut height_scale, MIN_HEIGHT_SCALE..=MAX_HEIGHT_SCALE)
                .text("Halbhöhe"),
        )
        .changed()
    {
        events.push(AppIntent::HeightScaleChanged {
            value: height_scale,
        });
    }

    let mut ratio = params.image_length_ratio();
    if ui
        .add(egui::Slider::new(&mut ratio, MIN_IMAGE_LENGTH_RATIO..=1.0).text("Bildlänge"))
        .changed()
    {
        events.push(AppIntent::ImageLengthRatioChanged { value: ratio });
    }

    // Obergrenze folgt dem Bildlängen-Anteil
    let max_offset = params.max_path_offset();
    let mut offset = params.path_offset();
    if ui
        .add_enabled(
            max_offset > 0.0,
            egui::Slider::new(&mut offset, 0.0..=max_offset).text("Offset"),
        )
        .changed()
    {
        events.push(AppIntent::PathOffsetChanged { value: offset });
    }
}

fn render_control_points(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<AppIntent>) {
    let points = state.params.control_points();

    egui::Grid::new("control_points_grid")
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            for (index, point) in points.iter().enumerate() {
                let mut x = point.x;
                let mut y = point.y;
                ui.label(format!("#{}", index));
                let changed_x = ui.add(egui::DragValue::new(&mut x).speed(0.01)).changed();
                let changed_y = ui.add(egui::DragValue::new(&mut y).speed(0.01)).changed();
                if changed_x || changed_y {
                    events.push(AppIntent::ControlPointEdited {
                        index,
                        position: glam::Vec3::new(x, y, 0.0),
                    });
                }
                ui.end_row();
            }
        });

    if points.len() < 2 {
        ui.label(
            egui::RichText::new("Mindestens 2 Punkte für einen Pfad").color(egui::Color32::YELLOW),
        );
    }

    ui.horizontal(|ui| {
        if ui.button("➕ Punkt").clicked() {
            events.push(AppIntent::AddControlPointRequested);
        }
        if ui
            .add_enabled(!points.is_empty(), egui::Button::new("➖ Punkt"))
            .clicked()
        {
            events.push(AppIntent::RemoveControlPointRequested);
        }
    });
}

fn render_image_source(ui: &mut egui::Ui, state: &mut AppState, events: &mut Vec<AppIntent>) {
    ui.horizontal(|ui| {
        ui.label("Pfad:");
        ui.text_edit_singleline(&mut state.ui.image_url_input);
    });

    ui.horizontal(|ui| {
        let url = state.ui.image_url_input.trim();
        if ui
            .add_enabled(!url.is_empty(), egui::Button::new("Laden"))
            .clicked()
        {
            events.push(AppIntent::ImageSelected {
                path: url.to_string(),
            });
        }
        if ui.button("Durchsuchen...").clicked() {
            events.push(AppIntent::OpenImageRequested);
        }
    });

    if state.image.is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Bild wird geladen...");
        });
    }
}
