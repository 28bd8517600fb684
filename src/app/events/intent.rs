use crate::app::interaction::PointerId;
use crate::core::Ray;
use glam::{Vec2, Vec3};

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Anwendung beenden
    ExitRequested,
    /// Bild-Auswahldialog öffnen
    OpenImageRequested,
    /// Bild (Pfad/URL) wurde gewählt
    ImageSelected { path: String },
    /// Aktuelle Optionen in die Konfigurationsdatei schreiben
    SaveOptionsRequested,

    // ── Parameter ───────────────────────────────────────────────
    /// Gitterauflösung geändert
    ResolutionChanged { value: u32 },
    /// Warp-Intensität geändert
    WarpIntensityChanged { value: f32 },
    /// Halbe Gitterhöhe geändert
    HeightScaleChanged { value: f32 },
    /// Pfad-Offset geändert
    PathOffsetChanged { value: f32 },
    /// Bildlängen-Anteil geändert
    ImageLengthRatioChanged { value: f32 },
    /// Kontrollpunkt im Panel bearbeitet
    ControlPointEdited { index: usize, position: Vec3 },
    /// Kontrollpunkt am Pfadende anhängen
    AddControlPointRequested,
    /// Letzten Kontrollpunkt entfernen
    RemoveControlPointRequested,
    /// Hochauflösenden Export auslösen
    ExportRequested,
    /// Statusnachricht schließen
    StatusMessageDismissed,

    // ── Kamera & Viewport ───────────────────────────────────────
    /// Kamera auf Standard zurücksetzen
    ResetCameraRequested,
    /// Stufenweise hineinzoomen
    ZoomInRequested,
    /// Stufenweise herauszoomen
    ZoomOutRequested,
    /// Viewport-Größe hat sich geändert
    ViewportResized { size: [f32; 2] },
    /// Kamera um Delta verschieben (Welt-Einheiten)
    CameraPan { delta: Vec2 },
    /// Kamera zoomen (optional auf einen Fokuspunkt)
    CameraZoom {
        factor: f32,
        focus_world: Option<Vec2>,
    },

    // ── Zeiger ──────────────────────────────────────────────────
    /// Press auf der verformten Oberfläche (UV des Treffers, falls vorhanden)
    SurfacePointerDown {
        pointer_id: PointerId,
        ray: Ray,
        uv: Option<Vec2>,
    },
    /// Press auf einem Kontrollpunkt-Handle
    HandlePointerDown {
        index: usize,
        pointer_id: PointerId,
        ray: Ray,
    },
    /// Zeiger bewegt
    PointerMoved { pointer_id: PointerId, ray: Ray },
    /// Zeiger losgelassen
    PointerReleased { pointer_id: PointerId },
    /// Zeiger hat die interaktive Fläche verlassen
    PointerLeft { pointer_id: PointerId },
}
