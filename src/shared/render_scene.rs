//! Render-Szene als expliziter Übergabevertrag zwischen App und Vorschau.
//!
//! Lebt im shared-Modul, da `app` sie baut und `ui` sie konsumiert.

use crate::core::PreviewCamera;
use glam::{Vec2, Vec3};

/// Handle-Marker eines Kontrollpunkts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMarker {
    /// Index in der Kontrollpunkt-Liste
    pub index: usize,
    /// Weltposition
    pub position: Vec3,
    /// Wird gerade gezogen
    pub active: bool,
}

/// Read-only Daten für einen Vorschau-Frame.
#[derive(Debug, Clone)]
pub struct RenderScene {
    /// Verformte Vertex-Positionen des interaktiven Gitters
    pub positions: Vec<Vec3>,
    /// Texturkoordinaten (parallel zu `positions`)
    pub uvs: Vec<Vec2>,
    /// Dreiecks-Indizes
    pub indices: Vec<u32>,
    /// Handle-Marker aller Kontrollpunkte
    pub handles: Vec<HandleMarker>,
    /// Abgetastete Pfad-Linie (leer ohne Kurve)
    pub path_polyline: Vec<Vec3>,
    /// Kamera-Zustand für diesen Frame
    pub camera: PreviewCamera,
    /// Viewport-Größe in Pixeln [Breite, Höhe]
    pub viewport_size: [f32; 2],
    /// Revision des Quellbilds (Textur-Neuupload bei Änderung)
    pub image_revision: u64,
    /// Export läuft gerade
    pub is_exporting: bool,
    /// Darstellungsradius der Handles in Pixeln
    pub handle_radius_px: f32,
    /// Farbe der Handles (RGBA)
    pub handle_color: [f32; 4],
    /// Farbe gezogener Handles (RGBA)
    pub handle_active_color: [f32; 4],
    /// Farbe der Pfad-Linie (RGBA)
    pub path_color: [f32; 4],
}

impl RenderScene {
    /// Gibt zurück, ob ein Netz zum Zeichnen vorhanden ist.
    pub fn has_mesh(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Gibt zurück, ob eine Pfad-Linie vorhanden ist.
    pub fn has_path(&self) -> bool {
        self.path_polyline.len() >= 2
    }
}
