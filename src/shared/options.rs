//! Zentrale Konfiguration für den Path Warp Editor.
//!
//! `WarpOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Start-Parameter ─────────────────────────────────────────────────

/// Spalten des interaktiven Gitters.
pub const DEFAULT_RESOLUTION: u32 = 50;
/// Faktor auf den Normalen-Versatz.
pub const DEFAULT_WARP_INTENSITY: f32 = 1.0;
/// Halbe Gitterhöhe.
pub const DEFAULT_HEIGHT_SCALE: f32 = 1.0;
/// Start-Offset entlang des Pfads.
pub const DEFAULT_PATH_OFFSET: f32 = 0.0;
/// Anteil der Pfadlänge, den die Bildbreite abdeckt.
pub const DEFAULT_IMAGE_LENGTH_RATIO: f32 = 0.5;
/// Start-Kontrollpunkte (leichte S-Kurve, z = 0).
pub const DEFAULT_CONTROL_POINTS: [[f32; 2]; 4] =
    [[-1.5, 0.5], [-0.75, -0.5], [0.75, 0.5], [1.5, -0.5]];

// ── Grenzen ─────────────────────────────────────────────────────────

/// Kleinste zulässige Gitterauflösung.
pub const MIN_RESOLUTION: u32 = 1;
/// Größte interaktive Gitterauflösung.
pub const MAX_RESOLUTION: u32 = 2048;
/// Kleinste zulässige Halbhöhe (muss > 0 bleiben).
pub const MIN_HEIGHT_SCALE: f32 = 0.01;
/// Größte zulässige Halbhöhe (begrenzt die Zeilenzahl des Export-Gitters).
pub const MAX_HEIGHT_SCALE: f32 = 4.0;
/// Kleinster zulässiger Bildlängen-Anteil (muss > 0 bleiben).
pub const MIN_IMAGE_LENGTH_RATIO: f32 = 0.01;

// ── Spline ──────────────────────────────────────────────────────────

/// Stützstellen pro Segment für die Bogenlängen-Tabelle.
pub const ARC_SAMPLES_PER_SEGMENT: usize = 64;
/// Stützstellen für die Pfad-Vorschau.
pub const PATH_PREVIEW_SAMPLES: usize = 128;

// ── Export ──────────────────────────────────────────────────────────

/// Maximale Spaltenzahl des Export-Gitters.
pub const MAX_EXPORT_COLUMNS: u32 = 2048;
/// Fester Dateiname des Exports.
pub const EXPORT_FILE_NAME: &str = "warped-image.png";
/// Frames ohne Textur-Bereitschaft bis zum Abbruch (0 = kein Watchdog).
pub const EXPORT_WATCHDOG_FRAMES: u32 = 0;

// ── Platzhalter ─────────────────────────────────────────────────────

/// Kantenlänge des Platzhalterbilds in Pixeln.
pub const PLACEHOLDER_SIZE: u32 = 1024;
/// Schachbrett-Felder pro Kante.
pub const PLACEHOLDER_CELLS: u32 = 16;

// ── Interaktion & Vorschau ──────────────────────────────────────────

/// Pick-Radius für Handle-Marker in Screen-Pixeln.
pub const HANDLE_PICK_RADIUS_PX: f32 = 12.0;
/// Darstellungsradius der Handle-Marker in Screen-Pixeln.
pub const HANDLE_RADIUS_PX: f32 = 6.0;
/// Zoom-Schritt bei Mausrad-Scroll.
pub const CAMERA_SCROLL_ZOOM_STEP: f32 = 1.1;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `path_warp_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WarpOptions {
    // ── Start-Parameter ─────────────────────────────────────────
    /// Spalten des interaktiven Gitters
    pub resolution: u32,
    /// Faktor auf den Normalen-Versatz
    pub warp_intensity: f32,
    /// Halbe Gitterhöhe
    pub height_scale: f32,
    /// Start-Offset entlang des Pfads
    pub path_offset: f32,
    /// Anteil der Pfadlänge, den die Bildbreite abdeckt
    pub image_length_ratio: f32,
    /// Start-Kontrollpunkte (x, y)
    pub control_points: Vec<[f32; 2]>,
    /// Bild, das beim Start geladen wird (sonst Platzhalter)
    pub initial_image: Option<String>,

    // ── Spline ──────────────────────────────────────────────────
    /// Stützstellen pro Segment für die Bogenlängen-Tabelle
    pub arc_samples_per_segment: usize,
    /// Stützstellen für die Pfad-Vorschau
    pub path_preview_samples: usize,

    // ── Export ──────────────────────────────────────────────────
    /// Maximale Spaltenzahl des Export-Gitters
    pub max_export_columns: u32,
    /// Dateiname des Exports
    pub export_file_name: String,
    /// Zielverzeichnis des Exports
    pub export_directory: String,
    /// Frames ohne Textur-Bereitschaft bis zum Abbruch (0 = deaktiviert)
    pub export_watchdog_frames: u32,

    // ── Platzhalter ─────────────────────────────────────────────
    /// Kantenlänge des Platzhalterbilds
    pub placeholder_size: u32,
    /// Schachbrett-Felder pro Kante
    pub placeholder_cells: u32,
    /// Helle Platzhalterfarbe (RGBA8)
    pub placeholder_color_light: [u8; 4],
    /// Dunkle Platzhalterfarbe (RGBA8)
    pub placeholder_color_dark: [u8; 4],

    // ── Vorschau ────────────────────────────────────────────────
    /// Pick-Radius für Handle-Marker in Screen-Pixeln
    pub handle_pick_radius_px: f32,
    /// Darstellungsradius der Handle-Marker
    pub handle_radius_px: f32,
    /// Farbe der Handle-Marker (RGBA)
    pub handle_color: [f32; 4],
    /// Farbe gezogener Handle-Marker (RGBA)
    pub handle_active_color: [f32; 4],
    /// Farbe der Pfad-Linie (RGBA)
    pub path_color: [f32; 4],
    /// Zoom-Schritt bei Mausrad-Scroll
    pub camera_scroll_zoom_step: f32,
}

impl Default for WarpOptions {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            warp_intensity: DEFAULT_WARP_INTENSITY,
            height_scale: DEFAULT_HEIGHT_SCALE,
            path_offset: DEFAULT_PATH_OFFSET,
            image_length_ratio: DEFAULT_IMAGE_LENGTH_RATIO,
            control_points: DEFAULT_CONTROL_POINTS.to_vec(),
            initial_image: None,

            arc_samples_per_segment: ARC_SAMPLES_PER_SEGMENT,
            path_preview_samples: PATH_PREVIEW_SAMPLES,

            max_export_columns: MAX_EXPORT_COLUMNS,
            export_file_name: EXPORT_FILE_NAME.to_string(),
            export_directory: ".".to_string(),
            export_watchdog_frames: EXPORT_WATCHDOG_FRAMES,

            placeholder_size: PLACEHOLDER_SIZE,
            placeholder_cells: PLACEHOLDER_CELLS,
            placeholder_color_light: [220, 220, 220, 255],
            placeholder_color_dark: [90, 90, 90, 255],

            handle_pick_radius_px: HANDLE_PICK_RADIUS_PX,
            handle_radius_px: HANDLE_RADIUS_PX,
            handle_color: [1.0, 0.6, 0.0, 1.0],
            handle_active_color: [1.0, 0.0, 1.0, 1.0],
            path_color: [0.2, 0.9, 0.2, 1.0],
            camera_scroll_zoom_step: CAMERA_SCROLL_ZOOM_STEP,
        }
    }
}

impl WarpOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("path_warp_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("path_warp_editor.toml")
    }

    /// Start-Kontrollpunkte als 3D-Positionen (z = 0).
    pub fn seed_control_points(&self) -> Vec<glam::Vec3> {
        self.control_points
            .iter()
            .map(|[x, y]| glam::Vec3::new(*x, *y, 0.0))
            .collect()
    }

    /// Pfad der Export-Datei.
    pub fn export_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.export_directory).join(&self.export_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_start_state() {
        let opts = WarpOptions::default();
        assert_eq!(opts.resolution, 50);
        assert_eq!(opts.warp_intensity, 1.0);
        assert_eq!(opts.height_scale, 1.0);
        assert_eq!(opts.path_offset, 0.0);
        assert_eq!(opts.image_length_ratio, 0.5);
        assert_eq!(opts.seed_control_points().len(), 4);
        assert_eq!(opts.export_file_name, "warped-image.png");
    }

    #[test]
    fn test_toml_roundtrip_and_partial_file() {
        let opts = WarpOptions {
            resolution: 80,
            ..WarpOptions::default()
        };
        let text = toml::to_string_pretty(&opts).expect("Serialisierung");
        let back: WarpOptions = toml::from_str(&text).expect("Deserialisierung");
        assert_eq!(back, opts);

        // Fehlende Schlüssel fallen auf Standardwerte zurück
        let partial: WarpOptions = toml::from_str("warp_intensity = 2.5\n").expect("Teil-Datei");
        assert_eq!(partial.warp_intensity, 2.5);
        assert_eq!(partial.resolution, DEFAULT_RESOLUTION);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let opts = WarpOptions::load_from_file(std::path::Path::new("/nonexistent/opts.toml"));
        assert_eq!(opts, WarpOptions::default());
    }
}
