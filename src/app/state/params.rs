//! Geteilter Parameter-Zustand mit Invarianten.
//!
//! Alle Schreibzugriffe laufen über Setter, die ihre Invarianten selbst
//! durchsetzen. Damit gilt `path_offset ∈ [0, 1 − image_length_ratio]`
//! unabhängig von der Aufrufreihenfolge.

use crate::core::{WarpError, WarpParams, WarpResult};
use crate::shared::options::{MAX_RESOLUTION, MIN_RESOLUTION};
use crate::shared::{WarpOptions, MAX_HEIGHT_SCALE, MIN_HEIGHT_SCALE, MIN_IMAGE_LENGTH_RATIO};
use glam::Vec3;

/// Kontrollpunkte, Deformationsparameter und Export-Trigger.
#[derive(Debug, Clone)]
pub struct ParameterState {
    control_points: Vec<Vec3>,
    /// Wird bei jeder Kontrollpunkt-Änderung erhöht (Kurven-Neuaufbau)
    control_points_revision: u64,
    warp_intensity: f32,
    height_scale: f32,
    path_offset: f32,
    image_length_ratio: f32,
    resolution: u32,
    export_request_count: u64,
    is_exporting: bool,
}

impl ParameterState {
    /// Erstellt den Startzustand aus den Optionen.
    ///
    /// Die Werte laufen durch dieselben Setter wie spätere Änderungen.
    pub fn from_options(options: &WarpOptions) -> Self {
        let mut state = Self {
            control_points: Vec::new(),
            control_points_revision: 0,
            warp_intensity: 0.0,
            height_scale: 1.0,
            path_offset: 0.0,
            image_length_ratio: 1.0,
            resolution: 1,
            export_request_count: 0,
            is_exporting: false,
        };
        for point in options.seed_control_points() {
            state.push_control_point(point);
        }
        state.set_warp_intensity(options.warp_intensity);
        state.set_height_scale(options.height_scale);
        state.set_image_length_ratio(options.image_length_ratio);
        state.set_path_offset(options.path_offset);
        state.set_resolution(options.resolution);
        state
    }

    // ── Getter ──────────────────────────────────────────────────

    /// Geordnete Kontrollpunkte.
    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Revision der Kontrollpunkte.
    pub fn control_points_revision(&self) -> u64 {
        self.control_points_revision
    }

    /// Faktor auf den Normalen-Versatz.
    pub fn warp_intensity(&self) -> f32 {
        self.warp_intensity
    }

    /// Halbe Gitterhöhe (> 0).
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// Start-Anteil der linken Bildkante auf dem Pfad.
    pub fn path_offset(&self) -> f32 {
        self.path_offset
    }

    /// Anteil der Pfadlänge, den die Bildbreite abdeckt (in (0, 1]).
    pub fn image_length_ratio(&self) -> f32 {
        self.image_length_ratio
    }

    /// Obere Grenze für den Pfad-Offset.
    pub fn max_path_offset(&self) -> f32 {
        (1.0 - self.image_length_ratio).max(0.0)
    }

    /// Spalten des interaktiven Gitters.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Anzahl bisher angeforderter Exporte.
    pub fn export_request_count(&self) -> u64 {
        self.export_request_count
    }

    /// Läuft gerade ein Export?
    pub fn is_exporting(&self) -> bool {
        self.is_exporting
    }

    /// Momentaufnahme der Deformationsparameter.
    pub fn warp_params(&self) -> WarpParams {
        WarpParams {
            warp_intensity: self.warp_intensity,
            path_offset: self.path_offset,
            image_length_ratio: self.image_length_ratio,
        }
    }

    // ── Setter ──────────────────────────────────────────────────

    /// Setzt die Warp-Intensität (beliebiger endlicher Wert).
    pub fn set_warp_intensity(&mut self, value: f32) {
        if !finite_or_warn("warp_intensity", value) {
            return;
        }
        self.warp_intensity = value;
    }

    /// Setzt die halbe Gitterhöhe, geklemmt auf `[MIN_HEIGHT_SCALE, MAX_HEIGHT_SCALE]`.
    pub fn set_height_scale(&mut self, value: f32) {
        if !finite_or_warn("height_scale", value) {
            return;
        }
        self.height_scale = value.clamp(MIN_HEIGHT_SCALE, MAX_HEIGHT_SCALE);
    }

    /// Setzt den Pfad-Offset, geklemmt auf `[0, 1 − image_length_ratio]`.
    pub fn set_path_offset(&mut self, value: f32) {
        if !finite_or_warn("path_offset", value) {
            return;
        }
        self.path_offset = value.clamp(0.0, self.max_path_offset());
    }

    /// Setzt den Bildlängen-Anteil und klemmt den Offset neu.
    pub fn set_image_length_ratio(&mut self, value: f32) {
        if !finite_or_warn("image_length_ratio", value) {
            return;
        }
        self.image_length_ratio = value.clamp(MIN_IMAGE_LENGTH_RATIO, 1.0);
        self.path_offset = self.path_offset.clamp(0.0, self.max_path_offset());
    }

    /// Setzt die Gitterauflösung (mindestens 1).
    pub fn set_resolution(&mut self, value: u32) {
        self.resolution = value.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
    }

    /// Verschiebt einen Kontrollpunkt (z wird auf 0 gesetzt).
    pub fn set_control_point(&mut self, index: usize, position: Vec3) -> WarpResult<()> {
        let len = self.control_points.len();
        let slot = self
            .control_points
            .get_mut(index)
            .ok_or(WarpError::ControlPointOutOfRange { index, len })?;
        *slot = Vec3::new(position.x, position.y, 0.0);
        self.control_points_revision += 1;
        Ok(())
    }

    /// Hängt einen Kontrollpunkt an das Pfadende an.
    pub fn push_control_point(&mut self, position: Vec3) {
        self.control_points
            .push(Vec3::new(position.x, position.y, 0.0));
        self.control_points_revision += 1;
    }

    /// Entfernt den letzten Kontrollpunkt.
    pub fn remove_last_control_point(&mut self) -> Option<Vec3> {
        let removed = self.control_points.pop()?;
        self.control_points_revision += 1;
        Some(removed)
    }

    /// Löst einen Export aus (einmaliger Trigger pro Aufruf).
    pub fn request_export(&mut self) -> u64 {
        self.export_request_count += 1;
        self.export_request_count
    }

    pub(crate) fn set_exporting(&mut self, exporting: bool) {
        self.is_exporting = exporting;
    }
}

impl Default for ParameterState {
    fn default() -> Self {
        Self::from_options(&WarpOptions::default())
    }
}

fn finite_or_warn(name: &str, value: f32) -> bool {
    if value.is_finite() {
        return true;
    }
    log::warn!("Ungültiger Wert für {}: {} (ignoriert)", name, value);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let params = ParameterState::default();
        assert_eq!(params.resolution(), 50);
        assert_relative_eq!(params.warp_intensity(), 1.0);
        assert_relative_eq!(params.height_scale(), 1.0);
        assert_relative_eq!(params.path_offset(), 0.0);
        assert_relative_eq!(params.image_length_ratio(), 0.5);
        assert_eq!(params.control_points().len(), 4);
        assert_eq!(params.export_request_count(), 0);
        assert!(!params.is_exporting());
    }

    #[test]
    fn test_path_offset_is_clamped_on_write() {
        let mut params = ParameterState::default();
        params.set_path_offset(0.6);
        assert_relative_eq!(params.path_offset(), 0.5);
        params.set_path_offset(-0.3);
        assert_relative_eq!(params.path_offset(), 0.0);
    }

    #[test]
    fn test_ratio_change_reclamps_offset() {
        let mut params = ParameterState::default();
        params.set_path_offset(0.5);
        params.set_image_length_ratio(0.8);
        assert_relative_eq!(params.path_offset(), 0.2, epsilon = 1e-6);
        assert!(params.path_offset() <= params.max_path_offset() + 1e-6);
    }

    #[test]
    fn test_offset_stays_in_range_for_any_write_order() {
        let mut params = ParameterState::default();
        for (ratio, offset) in [(0.1, 2.0), (1.0, 0.4), (0.3, -1.0), (0.75, 0.9)] {
            params.set_path_offset(offset);
            params.set_image_length_ratio(ratio);
            assert!(params.path_offset() >= 0.0);
            assert!(params.path_offset() <= 1.0 - params.image_length_ratio() + 1e-6);
        }
    }

    #[test]
    fn test_ratio_and_height_scale_stay_positive() {
        let mut params = ParameterState::default();
        params.set_image_length_ratio(0.0);
        assert!(params.image_length_ratio() > 0.0);
        params.set_image_length_ratio(5.0);
        assert_relative_eq!(params.image_length_ratio(), 1.0);
        params.set_height_scale(-2.0);
        assert!(params.height_scale() > 0.0);
    }

    #[test]
    fn test_height_scale_has_upper_bound() {
        let mut params = ParameterState::default();
        params.set_height_scale(1.0e6);
        assert_relative_eq!(params.height_scale(), MAX_HEIGHT_SCALE);

        let options = WarpOptions {
            height_scale: 250.0,
            ..WarpOptions::default()
        };
        assert_relative_eq!(
            ParameterState::from_options(&options).height_scale(),
            MAX_HEIGHT_SCALE
        );
    }

    #[test]
    fn test_resolution_at_least_one() {
        let mut params = ParameterState::default();
        params.set_resolution(0);
        assert_eq!(params.resolution(), 1);
    }

    #[test]
    fn test_non_finite_writes_are_ignored() {
        let mut params = ParameterState::default();
        params.set_warp_intensity(f32::NAN);
        params.set_path_offset(f32::INFINITY);
        assert_relative_eq!(params.warp_intensity(), 1.0);
        assert_relative_eq!(params.path_offset(), 0.0);
    }

    #[test]
    fn test_control_point_updates_bump_revision() {
        let mut params = ParameterState::default();
        let before = params.control_points_revision();
        params
            .set_control_point(1, Vec3::new(0.0, 1.0, 3.0))
            .expect("Index gültig");
        assert!(params.control_points_revision() > before);
        assert_eq!(params.control_points()[1], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_control_point_out_of_range() {
        let mut params = ParameterState::default();
        let before = params.control_points_revision();
        let result = params.set_control_point(9, Vec3::ZERO);
        assert!(matches!(
            result,
            Err(WarpError::ControlPointOutOfRange { index: 9, len: 4 })
        ));
        assert_eq!(params.control_points_revision(), before);
    }

    #[test]
    fn test_export_request_is_monotonic() {
        let mut params = ParameterState::default();
        assert_eq!(params.request_export(), 1);
        assert_eq!(params.request_export(), 2);
        assert_eq!(params.export_request_count(), 2);
    }
}
