//! Hochauflösender Export: dichtes Gitter, Deformation, Off-Screen-Render, PNG.
//!
//! Der Export arbeitet auf eigenen Kopien (Gitter, Kurve, Netz) und verändert
//! nur das `is_exporting`-Flag des Parameter-Zustands. Alle temporären
//! Ressourcen gehören dem [`ExportPlan`] und werden mit ihm freigegeben.

use super::image_loader::ImageSlot;
use super::state::ParameterState;
use crate::core::{deform, Bounds3, DeformedMesh, FlatGrid, PathCurve, SourceImage};
use crate::core::{WarpError, WarpResult};
use crate::render::{OffscreenRenderer, OrthoFrame, RenderRequest};
use crate::shared::WarpOptions;
use anyhow::Context;
use glam::{Vec2, Vec3};
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;

/// Spalten und Zeilen des Export-Gitters für eine Quellbild-Breite.
///
/// `columns = min(max_columns, source_width / 2)`, `rows = round(columns × height_scale)`.
pub fn high_res_dimensions(source_width: u32, height_scale: f32, max_columns: u32) -> (u32, u32) {
    let columns = (source_width / 2).min(max_columns).max(1);
    let rows = (columns as f32 * height_scale).round().max(1.0) as u32;
    (columns, rows)
}

/// Obergrenze der Vertex-Anzahl eines Export-Gitters.
///
/// Liegt deutlich unter dem `u32`-Indexraum; das größte Gitter bei
/// gekappten Spalten und maximaler Halbhöhe passt hinein.
pub const MAX_EXPORT_VERTICES: u64 = 1 << 25;

/// Prüft, ob ein Gitter mit `columns × rows` Zellen exportierbar ist.
pub fn check_export_grid(columns: u32, rows: u32) -> WarpResult<()> {
    let vertices = (u64::from(columns) + 1) * (u64::from(rows) + 1);
    if vertices > MAX_EXPORT_VERTICES {
        log::warn!(
            "Export-Gitter {}x{} überschreitet das Vertex-Budget ({} > {})",
            columns,
            rows,
            vertices,
            MAX_EXPORT_VERTICES
        );
        return Err(WarpError::InvalidExportDimensions {
            width: i64::from(columns),
            height: i64::from(rows),
        });
    }
    Ok(())
}

/// Vorbereiteter Export: verformtes, re-zentriertes Netz plus Zielgröße.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    /// Spalten des Export-Gitters
    pub columns: u32,
    /// Zeilen des Export-Gitters
    pub rows: u32,
    /// Bounding-Box des verformten Netzes (vor dem Re-Zentrieren)
    pub bounds: Bounds3,
    /// Pixel pro Welteinheit (Quellbild-Dichte)
    pub pixels_per_unit: f32,
    /// Ausgabebreite in Pixeln
    pub width: u32,
    /// Ausgabehöhe in Pixeln
    pub height: u32,
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
}

impl ExportPlan {
    /// Baut Gitter und Kurve neu auf, verformt und bestimmt die Ausgabegröße.
    pub fn prepare(
        params: &ParameterState,
        source_width: u32,
        options: &WarpOptions,
    ) -> WarpResult<Self> {
        let (columns, rows) = high_res_dimensions(
            source_width,
            params.height_scale(),
            options.max_export_columns,
        );
        check_export_grid(columns, rows)?;
        let grid = FlatGrid::new(columns, rows, params.height_scale());
        let curve =
            PathCurve::build_with_samples(params.control_points(), options.arc_samples_per_segment);

        let mut mesh = DeformedMesh::from_grid(&grid);
        mesh.set_positions(deform(&grid, curve.as_ref(), &params.warp_params()));

        let bounds = mesh
            .bounds()
            .ok_or(WarpError::InvalidExportDimensions {
                width: 0,
                height: 0,
            })?;
        let pixels_per_unit = source_width as f32 / FlatGrid::WIDTH;
        let (width, height) = output_size(&bounds, pixels_per_unit)?;

        Ok(Self {
            columns,
            rows,
            bounds,
            pixels_per_unit,
            width,
            height,
            positions: mesh.recentered(bounds.center()),
            uvs: grid.uvs().to_vec(),
            indices: grid.indices().to_vec(),
        })
    }

    /// Render-Auftrag mit exakt auf die Bounding-Box gesetztem Rahmen.
    pub fn request(&self) -> RenderRequest<'_> {
        RenderRequest {
            positions: &self.positions,
            uvs: &self.uvs,
            indices: &self.indices,
            frame: OrthoFrame::from_extent(self.bounds.width(), self.bounds.height()),
            width: self.width,
            height: self.height,
        }
    }

    /// Re-zentrierte Positionen.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}

/// Ausgabegröße aus Welt-Ausdehnung und Pixeldichte.
pub fn output_size(bounds: &Bounds3, pixels_per_unit: f32) -> WarpResult<(u32, u32)> {
    let width = (bounds.width() * pixels_per_unit).ceil();
    let height = (bounds.height() * pixels_per_unit).ceil();
    // NaN wird zu 0 und fällt damit ebenfalls durch
    let (w, h) = (width as i64, height as i64);
    if w <= 0 || h <= 0 || w > u32::MAX as i64 || h > u32::MAX as i64 {
        return Err(WarpError::InvalidExportDimensions {
            width: w,
            height: h,
        });
    }
    Ok((w as u32, h as u32))
}

/// Kodiert einen Pixelpuffer als PNG.
pub fn encode_png(image: &RgbaImage) -> WarpResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Abnehmer der kodierten Export-Datei (Speichern/Download).
pub trait ExportSink {
    /// Übergibt die PNG-Bytes; liefert den Ablageort zur Anzeige.
    fn deliver(&mut self, path: &Path, bytes: &[u8]) -> anyhow::Result<String>;
}

/// Schreibt Exporte ins Dateisystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileExportSink;

impl ExportSink for FileExportSink {
    fn deliver(&mut self, path: &Path, bytes: &[u8]) -> anyhow::Result<String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Export-Verzeichnis anlegen: {}", parent.display()))?;
        }
        std::fs::write(path, bytes)
            .with_context(|| format!("Export schreiben: {}", path.display()))?;
        Ok(path.display().to_string())
    }
}

/// Zusammenfassung eines abgeschlossenen Exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Ausgabebreite in Pixeln
    pub width: u32,
    /// Ausgabehöhe in Pixeln
    pub height: u32,
    /// Spalten des Export-Gitters
    pub columns: u32,
    /// Zeilen des Export-Gitters
    pub rows: u32,
    /// Ablageort laut Export-Abnehmer
    pub location: String,
}

/// Ergebnis eines Export-Schritts.
#[derive(Debug)]
pub enum ExportEvent {
    /// Export fertig geschrieben
    Completed(ExportReport),
    /// Export abgebrochen, alle Ressourcen freigegeben
    Failed(anyhow::Error),
}

#[derive(Debug, Default)]
enum ExportPhase {
    #[default]
    Idle,
    AwaitingTexture {
        plan: Box<ExportPlan>,
        image: Arc<SourceImage>,
        waited_frames: u32,
    },
}

/// Ablaufsteuerung: höchstens ein Export gleichzeitig.
///
/// Weitere Trigger während eines laufenden Exports werden zusammengefasst
/// und danach einmal bedient.
#[derive(Debug, Default)]
pub struct ExportPipeline {
    handled_requests: u64,
    phase: ExportPhase,
    last_report: Option<ExportReport>,
}

impl ExportPipeline {
    /// Erstellt eine leere Pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wartet ein vorbereiteter Export auf die Textur?
    pub fn is_awaiting_texture(&self) -> bool {
        matches!(self.phase, ExportPhase::AwaitingTexture { .. })
    }

    /// Gibt es noch unbediente Export-Trigger?
    pub fn has_pending_request(&self, params: &ParameterState) -> bool {
        params.export_request_count() > self.handled_requests
    }

    /// Bericht des zuletzt abgeschlossenen Exports.
    pub fn last_report(&self) -> Option<&ExportReport> {
        self.last_report.as_ref()
    }

    /// Führt einen Export-Schritt aus (einmal pro Frame).
    ///
    /// `None`, solange nichts abgeschlossen wurde (kein Trigger, Bild lädt
    /// noch oder Textur nicht bereit).
    pub fn poll(
        &mut self,
        params: &mut ParameterState,
        images: &ImageSlot,
        options: &WarpOptions,
        renderer: &mut dyn OffscreenRenderer,
        sink: &mut dyn ExportSink,
    ) -> Option<ExportEvent> {
        if matches!(self.phase, ExportPhase::Idle) {
            if !self.has_pending_request(params) {
                return None;
            }
            let Some(image) = images.ready() else {
                log::debug!("Export zurückgestellt: {}", WarpError::ImageNotReady);
                return None;
            };

            self.handled_requests = params.export_request_count();
            params.set_exporting(true);
            log::info!(
                "Export gestartet: Quellbild {}x{} Pixel",
                image.width(),
                image.height()
            );

            match ExportPlan::prepare(params, image.width(), options) {
                Ok(plan) => {
                    log::debug!(
                        "Export-Gitter {}x{}, Ausgabe {}x{} Pixel",
                        plan.columns,
                        plan.rows,
                        plan.width,
                        plan.height
                    );
                    self.phase = ExportPhase::AwaitingTexture {
                        plan: Box::new(plan),
                        image,
                        waited_frames: 0,
                    };
                }
                Err(e) => {
                    params.set_exporting(false);
                    return Some(self.failed(e.into()));
                }
            }
        }

        let ExportPhase::AwaitingTexture {
            image,
            waited_frames,
            ..
        } = &mut self.phase
        else {
            return None;
        };

        if !renderer.texture_ready(image) {
            *waited_frames += 1;
            let frames = *waited_frames;
            let watchdog = options.export_watchdog_frames;
            if watchdog > 0 && frames >= watchdog {
                self.phase = ExportPhase::Idle;
                params.set_exporting(false);
                return Some(self.failed(WarpError::TextureTimeout { frames }.into()));
            }
            return None;
        }

        let ExportPhase::AwaitingTexture { plan, image, .. } = std::mem::take(&mut self.phase)
        else {
            return None;
        };
        let result = render_and_deliver(&plan, &image, options, renderer, sink);
        params.set_exporting(false);

        Some(match result {
            Ok(report) => {
                log::info!(
                    "Export abgeschlossen: {}x{} Pixel → {}",
                    report.width,
                    report.height,
                    report.location
                );
                self.last_report = Some(report.clone());
                ExportEvent::Completed(report)
            }
            Err(e) => self.failed(e),
        })
    }

    fn failed(&mut self, error: anyhow::Error) -> ExportEvent {
        log::error!("Export fehlgeschlagen: {:#}", error);
        ExportEvent::Failed(error)
    }
}

fn render_and_deliver(
    plan: &ExportPlan,
    image: &SourceImage,
    options: &WarpOptions,
    renderer: &mut dyn OffscreenRenderer,
    sink: &mut dyn ExportSink,
) -> anyhow::Result<ExportReport> {
    let pixels = renderer.render(&plan.request(), image)?;
    let bytes = encode_png(&pixels)?;
    let location = sink.deliver(&options.export_path(), &bytes)?;
    Ok(ExportReport {
        width: plan.width,
        height: plan.height,
        columns: plan.columns,
        rows: plan.rows,
        location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_high_res_dimensions_for_1024_wide_image() {
        assert_eq!(high_res_dimensions(1024, 1.0, 2048), (512, 512));
    }

    #[test]
    fn test_high_res_columns_are_capped() {
        assert_eq!(high_res_dimensions(10_000, 0.5, 2048), (2048, 1024));
        assert_eq!(high_res_dimensions(1, 1.0, 2048), (1, 1));
    }

    #[test]
    fn test_export_grid_budget() {
        assert!(check_export_grid(512, 512).is_ok());
        // Gekappte Spalten bei maximaler Halbhöhe
        let (columns, rows) = high_res_dimensions(1 << 20, crate::shared::MAX_HEIGHT_SCALE, 2048);
        assert!(check_export_grid(columns, rows).is_ok());
        assert!(matches!(
            check_export_grid(2048, 2_048_000_000),
            Err(WarpError::InvalidExportDimensions {
                width: 2048,
                height: 2_048_000_000
            })
        ));
        assert!(check_export_grid(u32::MAX, u32::MAX).is_err());
    }

    #[test]
    fn test_oversized_height_scale_is_rejected_before_grid_build() {
        // Ungeklemmter Zustand, wie ihn ein Aufrufer ohne Setter erzeugen könnte
        let (columns, rows) = high_res_dimensions(4096, 1.0e6, 2048);
        assert_eq!(columns, 2048);
        assert!(check_export_grid(columns, rows).is_err());
    }

    #[test]
    fn test_output_size_rejects_degenerate_bounds() {
        let flat = Bounds3 {
            min: Vec3::new(-1.0, 0.0, 0.0),
            max: Vec3::new(1.0, 0.0, 0.0),
        };
        assert!(matches!(
            output_size(&flat, 512.0),
            Err(WarpError::InvalidExportDimensions { height: 0, .. })
        ));
    }

    #[test]
    fn test_output_size_rounds_up() {
        let bounds = Bounds3 {
            min: Vec3::new(-1.0, -0.5, 0.0),
            max: Vec3::new(1.001, 0.5, 0.0),
        };
        assert_eq!(output_size(&bounds, 100.0).expect("gültig"), (201, 100));
    }

    #[test]
    fn test_plan_keeps_live_params_untouched() {
        let params = ParameterState::default();
        let before = params.clone();
        let plan = ExportPlan::prepare(&params, 64, &WarpOptions::default()).expect("Plan");

        assert_eq!(plan.columns, 32);
        assert_eq!(plan.rows, 32);
        assert_relative_eq!(plan.pixels_per_unit, 32.0);
        assert_eq!(params.control_points(), before.control_points());
        assert_eq!(params.resolution(), before.resolution());
        assert!(plan.width > 0 && plan.height > 0);

        // Re-zentriert: Bounding-Box-Mitte liegt im Ursprung
        let recentered = Bounds3::from_points(plan.positions()).expect("Bounds");
        assert_relative_eq!(recentered.center().x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(recentered.center().y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_encode_png_signature() {
        let bytes = encode_png(&RgbaImage::new(3, 2)).expect("PNG");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
