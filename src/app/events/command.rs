use crate::app::interaction::PointerId;
use crate::core::Ray;
use glam::{Vec2, Vec3};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Anwendung beenden
    RequestExit,
    /// Bild-Auswahldialog anfordern
    RequestImageDialog,
    /// Quellbild im Hintergrund laden
    LoadImage { url: String },
    /// Optionen persistieren
    SaveOptions,

    // ── Parameter ───────────────────────────────────────────────
    /// Gitterauflösung setzen (≥ 1)
    SetResolution { value: u32 },
    /// Warp-Intensität setzen
    SetWarpIntensity { value: f32 },
    /// Halbe Gitterhöhe setzen (> 0)
    SetHeightScale { value: f32 },
    /// Pfad-Offset setzen (geklemmt)
    SetPathOffset { value: f32 },
    /// Bildlängen-Anteil setzen (geklemmt, klemmt den Offset neu)
    SetImageLengthRatio { value: f32 },
    /// Einen Kontrollpunkt per Index setzen
    SetControlPoint { index: usize, position: Vec3 },
    /// Kontrollpunkt anhängen
    AddControlPoint { position: Vec3 },
    /// Letzten Kontrollpunkt entfernen
    RemoveLastControlPoint,
    /// Export-Zähler erhöhen
    RequestExport,
    /// Statusnachricht entfernen
    DismissStatusMessage,

    // ── Kamera & Viewport ───────────────────────────────────────
    /// Kamera zurücksetzen
    ResetCamera,
    /// Kamera-Zoom mit optionalem Fokuspunkt
    ZoomCamera {
        factor: f32,
        focus_world: Option<Vec2>,
    },
    /// Kamera verschieben
    PanCamera { delta: Vec2 },
    /// Viewport-Größe setzen
    SetViewportSize { size: [f32; 2] },

    // ── Gesten ──────────────────────────────────────────────────
    /// Oberflächen-Drag starten
    BeginSurfaceDrag {
        pointer_id: PointerId,
        ray: Ray,
        uv: Vec2,
    },
    /// Oberflächen-Drag fortsetzen
    UpdateSurfaceDrag { pointer_id: PointerId, ray: Ray },
    /// Oberflächen-Drag beenden
    EndSurfaceDrag { pointer_id: PointerId },
    /// Handle-Drag starten
    BeginHandleDrag {
        index: usize,
        pointer_id: PointerId,
        ray: Ray,
    },
    /// Handle-Drag fortsetzen
    UpdateHandleDrag {
        index: usize,
        pointer_id: PointerId,
        ray: Ray,
    },
    /// Handle-Drag beenden
    EndHandleDrag { index: usize, pointer_id: PointerId },
}
