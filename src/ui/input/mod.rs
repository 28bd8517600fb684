//! Viewport-Input-Handling: Maus-Events, Handle-Picking, Scroll → AppIntent.
//!
//! Aufgeteilt in phasenbasierte Submodule:
//! - `gestures` — Press/Move/Release/Leave des primären Zeigers
//! - `navigation` — Kamera-Pan und Scroll-Zoom
//! - `picking` — Handle- und Oberflächen-Treffer in Screen-Koordinaten

mod gestures;
mod navigation;
mod picking;

use crate::app::{AppIntent, AppState, PointerId, PreviewCamera};
use crate::core::{DeformedMesh, Ray};
use crate::shared::WarpOptions;
use glam::Vec3;

pub use picking::pick_handle;

/// Zeiger-ID der Maus (einziger Zeiger im Desktop-Frontend).
pub const MOUSE_POINTER_ID: PointerId = 0;

/// Bündelt die gemeinsamen Parameter für Viewport-Event-Verarbeitung.
pub(crate) struct ViewportContext<'a> {
    pub ui: &'a egui::Ui,
    pub response: &'a egui::Response,
    pub viewport_size: [f32; 2],
    pub camera: &'a PreviewCamera,
    pub handles: &'a [Vec3],
    pub mesh: &'a DeformedMesh,
    pub options: &'a WarpOptions,
}

/// Verwaltet den Input-Zustand für das Viewport (gedrückter Zeiger)
#[derive(Debug, Default)]
pub struct InputState {
    /// Primärtaste wurde im Viewport gedrückt und noch nicht losgelassen
    pub(crate) primary_down: bool,
}

impl InputState {
    /// Erstellt einen neuen, leeren Input-Zustand.
    pub fn new() -> Self {
        Self {
            primary_down: false,
        }
    }

    /// Sammelt Viewport-Events aus egui-Input und gibt AppIntents zurück.
    ///
    /// Zentraler UI→Intent-Einstieg für Zeiger-Gesten, Pan und Scroll-Zoom.
    pub fn collect_viewport_events(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        viewport_size: [f32; 2],
        state: &AppState,
    ) -> Vec<AppIntent> {
        let ctx = ViewportContext {
            ui,
            response,
            viewport_size,
            camera: &state.view.camera,
            handles: state.params.control_points(),
            mesh: state.live.mesh(),
            options: &state.options,
        };

        let mut events = Vec::new();

        events.push(AppIntent::ViewportResized {
            size: viewport_size,
        });

        self.handle_primary_press(&ctx, &mut events);
        self.handle_primary_move(&ctx, &mut events);
        self.handle_primary_release(&ctx, &mut events);
        self.handle_camera_pan(&ctx, &mut events);
        self.handle_scroll_zoom(&ctx, &mut events);

        events
    }
}

/// Screen-Position relativ zur Viewport-Ecke.
fn local_screen_pos(pointer_pos: egui::Pos2, response: &egui::Response) -> glam::Vec2 {
    let local = pointer_pos - response.rect.min;
    glam::Vec2::new(local.x, local.y)
}

fn screen_pos_to_world(
    pointer_pos: egui::Pos2,
    response: &egui::Response,
    viewport_size: [f32; 2],
    camera: &PreviewCamera,
) -> glam::Vec2 {
    camera.screen_to_world(
        local_screen_pos(pointer_pos, response),
        glam::Vec2::from(viewport_size),
    )
}

fn screen_pos_to_ray(
    pointer_pos: egui::Pos2,
    response: &egui::Response,
    viewport_size: [f32; 2],
    camera: &PreviewCamera,
) -> Ray {
    camera.screen_ray(
        local_screen_pos(pointer_pos, response),
        glam::Vec2::from(viewport_size),
    )
}
