//! Primärer Zeiger: Press auf Handle oder Oberfläche, Bewegung, Loslassen, Verlassen.

use super::{
    local_screen_pos, pick_handle, screen_pos_to_ray, screen_pos_to_world, InputState,
    ViewportContext, MOUSE_POINTER_ID,
};
use crate::app::AppIntent;

impl InputState {
    /// Press im Viewport: Handle hat Vorrang vor der Oberfläche.
    pub(crate) fn handle_primary_press(
        &mut self,
        ctx: &ViewportContext,
        events: &mut Vec<AppIntent>,
    ) {
        let pressed = ctx.ui.input(|i| i.pointer.primary_pressed());
        if !pressed || !ctx.response.hovered() {
            return;
        }
        let Some(pointer_pos) = ctx.ui.input(|i| i.pointer.interact_pos()) else {
            return;
        };

        self.primary_down = true;
        let ray = screen_pos_to_ray(pointer_pos, ctx.response, ctx.viewport_size, ctx.camera);

        if let Some(index) = pick_handle(
            ctx.handles,
            local_screen_pos(pointer_pos, ctx.response),
            glam::Vec2::from(ctx.viewport_size),
            ctx.camera,
            ctx.options.handle_pick_radius_px,
        ) {
            events.push(AppIntent::HandlePointerDown {
                index,
                pointer_id: MOUSE_POINTER_ID,
                ray,
            });
            return;
        }

        let world = screen_pos_to_world(pointer_pos, ctx.response, ctx.viewport_size, ctx.camera);
        events.push(AppIntent::SurfacePointerDown {
            pointer_id: MOUSE_POINTER_ID,
            ray,
            uv: ctx.mesh.pick_uv(world),
        });
    }

    /// Bewegung während gedrückter Primärtaste; Verlassen der Fläche beendet die Geste.
    pub(crate) fn handle_primary_move(
        &mut self,
        ctx: &ViewportContext,
        events: &mut Vec<AppIntent>,
    ) {
        if !self.primary_down {
            return;
        }
        let (moving, latest) = ctx
            .ui
            .input(|i| (i.pointer.is_moving(), i.pointer.latest_pos()));

        match latest {
            Some(pos) if ctx.response.rect.contains(pos) => {
                if moving {
                    events.push(AppIntent::PointerMoved {
                        pointer_id: MOUSE_POINTER_ID,
                        ray: screen_pos_to_ray(pos, ctx.response, ctx.viewport_size, ctx.camera),
                    });
                }
            }
            _ => {
                self.primary_down = false;
                events.push(AppIntent::PointerLeft {
                    pointer_id: MOUSE_POINTER_ID,
                });
            }
        }
    }

    /// Loslassen der Primärtaste.
    pub(crate) fn handle_primary_release(
        &mut self,
        ctx: &ViewportContext,
        events: &mut Vec<AppIntent>,
    ) {
        if !self.primary_down {
            return;
        }
        if ctx.ui.input(|i| i.pointer.primary_released()) {
            self.primary_down = false;
            events.push(AppIntent::PointerReleased {
                pointer_id: MOUSE_POINTER_ID,
            });
        }
    }
}
