//! Vorschau-Zeichnung: texturiertes Netz, Pfad-Linie und Handle-Marker.

use crate::core::SourceImage;
use crate::render::color_image;
use crate::shared::RenderScene;
use glam::{Vec2, Vec3};

/// Vorschau-Textur des Quellbilds, neu hochgeladen bei jeder Bild-Revision.
#[derive(Default)]
pub struct PreviewTexture {
    handle: Option<egui::TextureHandle>,
    revision: Option<u64>,
}

impl PreviewTexture {
    /// Erstellt eine leere Vorschau-Textur.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lädt die Textur neu, wenn sich die Bild-Revision geändert hat.
    ///
    /// Gibt `true` zurück, wenn ein Upload stattgefunden hat.
    pub fn sync(&mut self, ctx: &egui::Context, image: &SourceImage, revision: u64) -> bool {
        if self.revision == Some(revision) && self.handle.is_some() {
            return false;
        }
        let texture = ctx.load_texture(
            "source_image",
            color_image(image),
            egui::TextureOptions::LINEAR,
        );
        self.handle = Some(texture);
        self.revision = Some(revision);
        true
    }

    /// Hochgeladene Textur (None vor dem ersten Sync).
    pub fn handle(&self) -> Option<&egui::TextureHandle> {
        self.handle.as_ref()
    }

    /// Revision der hochgeladenen Textur.
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }
}

/// Zeichnet eine Render-Szene in das Viewport-Rechteck.
pub fn paint_preview(
    painter: &egui::Painter,
    rect: egui::Rect,
    scene: &RenderScene,
    texture: Option<&egui::TextureHandle>,
) {
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(32));

    if scene.has_mesh() {
        if let Some(texture) = texture {
            painter.add(egui::Shape::mesh(build_textured_mesh(rect, scene, texture.id())));
        }
    }

    if scene.has_path() {
        let points: Vec<egui::Pos2> = scene
            .path_polyline
            .iter()
            .map(|p| to_screen(rect, scene, *p))
            .collect();
        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(2.0, to_color32(scene.path_color)),
        ));
    }

    for marker in &scene.handles {
        let color = if marker.active {
            scene.handle_active_color
        } else {
            scene.handle_color
        };
        painter.circle(
            to_screen(rect, scene, marker.position),
            scene.handle_radius_px,
            to_color32(color),
            egui::Stroke::new(1.0, egui::Color32::BLACK),
        );
    }
}

/// Baut ein egui-Mesh aus den verformten Positionen (UV direkt übernommen).
fn build_textured_mesh(
    rect: egui::Rect,
    scene: &RenderScene,
    texture_id: egui::TextureId,
) -> egui::Mesh {
    let mut mesh = egui::Mesh::with_texture(texture_id);
    mesh.vertices.reserve(scene.positions.len());
    for (position, uv) in scene.positions.iter().zip(&scene.uvs) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos: to_screen(rect, scene, *position),
            uv: egui::pos2(uv.x, uv.y),
            color: egui::Color32::WHITE,
        });
    }
    mesh.indices.extend_from_slice(&scene.indices);
    mesh
}

fn to_screen(rect: egui::Rect, scene: &RenderScene, world: Vec3) -> egui::Pos2 {
    let local = scene
        .camera
        .world_to_screen(world.truncate(), Vec2::from(scene.viewport_size));
    rect.min + egui::vec2(local.x, local.y)
}

fn to_color32(color: [f32; 4]) -> egui::Color32 {
    let [r, g, b, a] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}
