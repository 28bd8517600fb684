//! Fehler-Taxonomie der Warp-Geometrie.

use thiserror::Error;

/// Alle lokal behandelbaren Fehler der Geometrie-, Interaktions- und Export-Pfade.
#[derive(Debug, Error)]
pub enum WarpError {
    /// Weniger als zwei Kontrollpunkte: es existiert keine Kurve.
    #[error("Kurve nicht verfügbar: mindestens zwei Kontrollpunkte erforderlich")]
    GeometryUnavailable,
    /// Strahl verläuft parallel zur Referenzebene.
    #[error("Strahl schneidet die Referenzebene nicht")]
    NoIntersection,
    /// Entartete Bounding-Box oder zu großes Export-Gitter.
    #[error("Ungültige Exportgröße: {width}x{height}")]
    InvalidExportDimensions {
        /// Breite in Pixeln bzw. Gitterspalten
        width: i64,
        /// Höhe in Pixeln bzw. Gitterzeilen
        height: i64,
    },
    /// Das Quellbild ist noch nicht vollständig geladen.
    #[error("Quellbild ist noch nicht bereit")]
    ImageNotReady,
    /// Kontrollpunkt-Index außerhalb der Liste.
    #[error("Kontrollpunkt {index} existiert nicht (Anzahl: {len})")]
    ControlPointOutOfRange {
        /// Angefragter Index
        index: usize,
        /// Anzahl vorhandener Kontrollpunkte
        len: usize,
    },
    /// Der Renderer hat die Bild-Textur nicht rechtzeitig bereitgestellt.
    #[error("Textur nach {frames} Frames nicht bereit, Export abgebrochen")]
    TextureTimeout {
        /// Anzahl gewarteter Frames
        frames: u32,
    },
    /// PNG-Encoding fehlgeschlagen.
    #[error("Bild konnte nicht kodiert werden: {0}")]
    Encode(#[from] image::ImageError),
}

/// Kurzform für Ergebnisse mit [`WarpError`].
pub type WarpResult<T> = Result<T, WarpError>;
