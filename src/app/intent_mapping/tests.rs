use crate::app::interaction::{begin_handle_drag, begin_surface_drag};
use crate::app::{AppCommand, AppIntent, AppState};
use crate::core::{PathCurve, Ray};
use glam::{Vec2, Vec3};

use super::{map_intent_to_commands, next_control_point};

fn down_ray(x: f32, y: f32) -> Ray {
    Ray::new(Vec3::new(x, y, 5.0), Vec3::NEG_Z)
}

#[test]
fn export_requested_maps_to_request_export() {
    let state = AppState::new();

    let commands = map_intent_to_commands(&state, AppIntent::ExportRequested);

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::RequestExport));
}

#[test]
fn surface_press_without_uv_maps_to_nothing() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::SurfacePointerDown {
            pointer_id: 1,
            ray: down_ray(0.0, 0.0),
            uv: None,
        },
    );

    assert!(commands.is_empty());
}

#[test]
fn surface_press_with_uv_begins_surface_drag() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::SurfacePointerDown {
            pointer_id: 1,
            ray: down_ray(0.0, 0.0),
            uv: Some(Vec2::new(0.3, 0.5)),
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(
        commands[0],
        AppCommand::BeginSurfaceDrag { pointer_id: 1, .. }
    ));
}

#[test]
fn pointer_move_without_capture_maps_to_nothing() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerMoved {
            pointer_id: 3,
            ray: down_ray(0.0, 0.0),
        },
    );

    assert!(commands.is_empty());
}

#[test]
fn pointer_move_is_routed_to_all_captured_gestures() {
    let mut state = AppState::new();
    let curve = PathCurve::build(state.params.control_points()).expect("Kurve erwartet");
    begin_surface_drag(
        &mut state.interaction,
        &state.params,
        Some(&curve),
        4,
        &down_ray(0.0, 0.0),
        Vec2::new(0.5, 0.5),
    )
    .expect("Start erwartet");
    begin_handle_drag(
        &mut state.interaction,
        &state.params,
        2,
        4,
        &down_ray(0.75, 0.5),
    )
    .expect("Start erwartet");

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerMoved {
            pointer_id: 4,
            ray: down_ray(0.1, 0.1),
        },
    );
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::UpdateSurfaceDrag { .. }));
    assert!(matches!(
        commands[1],
        AppCommand::UpdateHandleDrag { index: 2, .. }
    ));

    let commands = map_intent_to_commands(&state, AppIntent::PointerLeft { pointer_id: 4 });
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::EndSurfaceDrag { pointer_id: 4 }));
    assert!(matches!(
        commands[1],
        AppCommand::EndHandleDrag {
            index: 2,
            pointer_id: 4
        }
    ));
}

#[test]
fn blank_image_path_is_ignored() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ImageSelected {
            path: "   ".to_string(),
        },
    );

    assert!(commands.is_empty());
}

#[test]
fn next_control_point_continues_last_direction() {
    let points = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.5, 0.0)];
    assert_eq!(next_control_point(&points), Vec3::new(2.0, 1.0, 0.0));
    assert_eq!(next_control_point(&[]), Vec3::ZERO);
    assert_eq!(
        next_control_point(&[Vec3::new(1.0, 1.0, 0.0)]),
        Vec3::new(1.5, 1.0, 0.0)
    );
}
