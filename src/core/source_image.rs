//! Quellbild für Vorschau und Export.

use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader, Rgba, RgbaImage};
use std::io::BufReader;

/// Bezeichner des eingebauten Platzhalterbilds.
pub const PLACEHOLDER_LABEL: &str = "placeholder:checkerboard";

/// Dekodiertes Quellbild mit bekannten Pixel-Dimensionen.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Herkunft (Pfad/URL oder Platzhalter-Label)
    label: String,
    /// Bilddaten als RGBA8
    pixels: RgbaImage,
}

impl SourceImage {
    /// Lädt ein Bild aus einer Datei.
    ///
    /// Unterstützte Formate: PNG, JPG, JPEG. Schlägt die Erkennung über die
    /// Dateiendung fehl, wird das Format anhand des Dateiinhalts bestimmt.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let image = match image::open(path) {
            Ok(img) => img,
            Err(ext_err) => {
                log::warn!(
                    "Format-Erkennung via Dateiendung fehlgeschlagen für '{}': {}. Versuche Erkennung via Dateiinhalt...",
                    path,
                    ext_err
                );
                let file = std::fs::File::open(path)
                    .with_context(|| format!("Datei nicht gefunden: {}", path))?;
                ImageReader::new(BufReader::new(file))
                    .with_guessed_format()
                    .with_context(|| format!("Format-Erkennung fehlgeschlagen für: {}", path))?
                    .decode()
                    .with_context(|| format!("Fehler beim Dekodieren des Quellbilds: {}", path))?
            }
        };

        Ok(Self::from_image(image, path))
    }

    /// Erstellt ein Quellbild aus einem bereits dekodierten Bild.
    pub fn from_image(image: DynamicImage, label: &str) -> Self {
        let pixels = image.to_rgba8();
        log::info!(
            "Quellbild geladen: {}x{} Pixel von '{}'",
            pixels.width(),
            pixels.height(),
            label
        );
        Self {
            label: label.to_string(),
            pixels,
        }
    }

    /// Schachbrett-Platzhalter, solange kein Bild gewählt wurde.
    pub fn placeholder(size: u32, cells: u32, color_a: [u8; 4], color_b: [u8; 4]) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let pixels = RgbaImage::from_fn(size, size, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                Rgba(color_a)
            } else {
                Rgba(color_b)
            }
        });
        Self {
            label: PLACEHOLDER_LABEL.to_string(),
            pixels,
        }
    }

    /// Herkunfts-Label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Gibt `true` zurück, wenn es sich um den Platzhalter handelt.
    pub fn is_placeholder(&self) -> bool {
        self.label == PLACEHOLDER_LABEL
    }

    /// Natürliche Breite in Pixeln.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natürliche Höhe in Pixeln.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Dimensionen (Breite, Höhe).
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// RGBA8-Pixeldaten.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
