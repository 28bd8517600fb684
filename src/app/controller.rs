//! Application Controller für zentrale Event-Verarbeitung.

use super::export::{ExportEvent, ExportSink, FileExportSink};
use super::image_loader::ImageLoadEvent;
use super::recompute::{self, RecomputeOutcome};
use super::render_scene;
use super::{AppCommand, AppIntent, AppState};
use crate::render::{OffscreenRenderer, SoftwareRasterizer};
use crate::shared::RenderScene;

/// Ergebnis eines Frame-Ticks.
#[derive(Debug)]
pub struct TickReport {
    /// Abgeschlossener Bild-Ladevorgang
    pub image: Option<ImageLoadEvent>,
    /// Ergebnis der Neuberechnung
    pub recompute: RecomputeOutcome,
    /// Abgeschlossener Export
    pub export: Option<ExportEvent>,
}

/// Orchestriert UI-Events, Frame-Ticks und Export-Kollaboratoren auf den AppState.
pub struct AppController {
    renderer: Box<dyn OffscreenRenderer>,
    sink: Box<dyn ExportSink>,
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}

impl AppController {
    /// Erstellt einen Controller mit CPU-Rasterizer und Datei-Export.
    pub fn new() -> Self {
        Self::with_collaborators(Box::new(SoftwareRasterizer::new()), Box::new(FileExportSink))
    }

    /// Erstellt einen Controller mit eigenen Render- und Export-Kollaboratoren.
    pub fn with_collaborators(
        renderer: Box<dyn OffscreenRenderer>,
        sink: Box<dyn ExportSink>,
    ) -> Self {
        Self { renderer, sink }
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(command.clone());
        use super::handlers;

        match command {
            // === Anwendung & Dialoge ===
            AppCommand::RequestExit => handlers::dialog::request_exit(state),
            AppCommand::RequestImageDialog => handlers::dialog::request_image_dialog(state),
            AppCommand::SaveOptions => handlers::dialog::save_options(state)?,
            AppCommand::DismissStatusMessage => handlers::dialog::dismiss_status_message(state),
            AppCommand::LoadImage { url } => handlers::image::load_image(state, url),

            // === Parameter ===
            AppCommand::SetResolution { value } => handlers::params::set_resolution(state, value),
            AppCommand::SetWarpIntensity { value } => {
                handlers::params::set_warp_intensity(state, value)
            }
            AppCommand::SetHeightScale { value } => {
                handlers::params::set_height_scale(state, value)
            }
            AppCommand::SetPathOffset { value } => handlers::params::set_path_offset(state, value),
            AppCommand::SetImageLengthRatio { value } => {
                handlers::params::set_image_length_ratio(state, value)
            }
            AppCommand::SetControlPoint { index, position } => {
                handlers::params::set_control_point(state, index, position)
            }
            AppCommand::AddControlPoint { position } => {
                handlers::params::add_control_point(state, position)
            }
            AppCommand::RemoveLastControlPoint => handlers::params::remove_last_control_point(state),
            AppCommand::RequestExport => handlers::export::request_export(state),

            // === Kamera & Viewport ===
            AppCommand::ResetCamera => handlers::view::reset_camera(state),
            AppCommand::ZoomCamera {
                factor,
                focus_world,
            } => handlers::view::zoom_towards(state, factor, focus_world),
            AppCommand::PanCamera { delta } => handlers::view::pan(state, delta),
            AppCommand::SetViewportSize { size } => handlers::view::set_viewport_size(state, size),

            // === Gesten ===
            AppCommand::BeginSurfaceDrag {
                pointer_id,
                ray,
                uv,
            } => handlers::interaction::begin_surface_drag(state, pointer_id, ray, uv),
            AppCommand::UpdateSurfaceDrag { pointer_id, ray } => {
                handlers::interaction::update_surface_drag(state, pointer_id, ray)
            }
            AppCommand::EndSurfaceDrag { pointer_id } => {
                handlers::interaction::end_surface_drag(state, pointer_id)
            }
            AppCommand::BeginHandleDrag {
                index,
                pointer_id,
                ray,
            } => handlers::interaction::begin_handle_drag(state, index, pointer_id, ray),
            AppCommand::UpdateHandleDrag {
                index,
                pointer_id,
                ray,
            } => handlers::interaction::update_handle_drag(state, index, pointer_id, ray),
            AppCommand::EndHandleDrag { index, pointer_id } => {
                handlers::interaction::end_handle_drag(state, index, pointer_id)
            }
        }

        Ok(())
    }

    /// Frame-Tick: Bild-Ladevorgang prüfen, Netz neu berechnen, Export fortsetzen.
    ///
    /// Wird einmal pro Bildschirm-Refresh vom Host aufgerufen.
    pub fn tick(&mut self, state: &mut AppState) -> TickReport {
        use super::handlers;

        let image = handlers::image::poll(state);
        let recompute = recompute::run(state);
        let export = handlers::export::poll(state, self.renderer.as_mut(), self.sink.as_mut());

        TickReport {
            image,
            recompute,
            export,
        }
    }

    /// Baut die Render-Szene aus dem aktuellen AppState.
    pub fn build_render_scene(&self, state: &AppState, viewport_size: [f32; 2]) -> RenderScene {
        render_scene::build(state, viewport_size)
    }
}
