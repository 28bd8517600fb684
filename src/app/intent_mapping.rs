//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};
use glam::{Vec2, Vec3};

/// Abstand eines neuen Kontrollpunkts, wenn keine Richtung ableitbar ist.
const APPEND_STEP: Vec2 = Vec2::new(0.5, 0.0);

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::ExitRequested => vec![AppCommand::RequestExit],
        AppIntent::OpenImageRequested => vec![AppCommand::RequestImageDialog],
        AppIntent::ImageSelected { path } => {
            let url = path.trim().to_string();
            if url.is_empty() {
                vec![]
            } else {
                vec![AppCommand::LoadImage { url }]
            }
        }
        AppIntent::SaveOptionsRequested => vec![AppCommand::SaveOptions],

        AppIntent::ResolutionChanged { value } => vec![AppCommand::SetResolution { value }],
        AppIntent::WarpIntensityChanged { value } => vec![AppCommand::SetWarpIntensity { value }],
        AppIntent::HeightScaleChanged { value } => vec![AppCommand::SetHeightScale { value }],
        AppIntent::PathOffsetChanged { value } => vec![AppCommand::SetPathOffset { value }],
        AppIntent::ImageLengthRatioChanged { value } => {
            vec![AppCommand::SetImageLengthRatio { value }]
        }
        AppIntent::ControlPointEdited { index, position } => {
            vec![AppCommand::SetControlPoint { index, position }]
        }
        AppIntent::AddControlPointRequested => vec![AppCommand::AddControlPoint {
            position: next_control_point(state.params.control_points()),
        }],
        AppIntent::RemoveControlPointRequested => vec![AppCommand::RemoveLastControlPoint],
        AppIntent::ExportRequested => vec![AppCommand::RequestExport],
        AppIntent::StatusMessageDismissed => vec![AppCommand::DismissStatusMessage],

        AppIntent::ResetCameraRequested => vec![AppCommand::ResetCamera],
        AppIntent::ZoomInRequested => vec![AppCommand::ZoomCamera {
            factor: state.options.camera_scroll_zoom_step,
            focus_world: None,
        }],
        AppIntent::ZoomOutRequested => vec![AppCommand::ZoomCamera {
            factor: 1.0 / state.options.camera_scroll_zoom_step,
            focus_world: None,
        }],
        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],
        AppIntent::CameraPan { delta } => vec![AppCommand::PanCamera { delta }],
        AppIntent::CameraZoom {
            factor,
            focus_world,
        } => vec![AppCommand::ZoomCamera {
            factor,
            focus_world,
        }],

        AppIntent::SurfacePointerDown {
            pointer_id,
            ray,
            uv,
        } => match uv {
            Some(uv) => vec![AppCommand::BeginSurfaceDrag {
                pointer_id,
                ray,
                uv,
            }],
            // Kein Treffer auf dem Netz: keine Geste
            None => vec![],
        },
        AppIntent::HandlePointerDown {
            index,
            pointer_id,
            ray,
        } => vec![AppCommand::BeginHandleDrag {
            index,
            pointer_id,
            ray,
        }],
        AppIntent::PointerMoved { pointer_id, ray } => {
            let mut commands = Vec::new();
            if state.interaction.surface_captured_by(pointer_id) {
                commands.push(AppCommand::UpdateSurfaceDrag { pointer_id, ray });
            }
            commands.extend(
                state
                    .interaction
                    .handles_captured_by(pointer_id)
                    .into_iter()
                    .map(|index| AppCommand::UpdateHandleDrag {
                        index,
                        pointer_id,
                        ray,
                    }),
            );
            commands
        }
        AppIntent::PointerReleased { pointer_id } | AppIntent::PointerLeft { pointer_id } => {
            let mut commands = Vec::new();
            if state.interaction.surface_captured_by(pointer_id) {
                commands.push(AppCommand::EndSurfaceDrag { pointer_id });
            }
            commands.extend(
                state
                    .interaction
                    .handles_captured_by(pointer_id)
                    .into_iter()
                    .map(|index| AppCommand::EndHandleDrag { index, pointer_id }),
            );
            commands
        }
    }
}

/// Position für einen angehängten Kontrollpunkt: letzte Richtung fortsetzen.
fn next_control_point(points: &[Vec3]) -> Vec3 {
    match points {
        [] => Vec3::ZERO,
        [only] => *only + APPEND_STEP.extend(0.0),
        [.., prev, last] => {
            let step = (*last - *prev).truncate();
            let step = if step.length_squared() > f32::EPSILON {
                step
            } else {
                APPEND_STEP
            };
            *last + step.extend(0.0)
        }
    }
}

#[cfg(test)]
mod tests;
