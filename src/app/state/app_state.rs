use super::{ParameterState, UiState, ViewState};
use crate::app::export::ExportPipeline;
use crate::app::image_loader::ImageSlot;
use crate::app::interaction::InteractionState;
use crate::app::recompute::{CurveCache, LiveGeometry};
use crate::app::CommandLog;
use crate::shared::WarpOptions;

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Geteilte Parameter (Kontrollpunkte, Warp-Werte, Export-Trigger)
    pub params: ParameterState,
    /// Kurve zu den aktuellen Kontrollpunkten
    pub curve: CurveCache,
    /// Live-Gitter und verformtes Vorschau-Netz
    pub live: LiveGeometry,
    /// Quellbild (Platzhalter bis ein Bild geladen ist)
    pub image: ImageSlot,
    /// Gesten-Zustände (Oberfläche, Handles)
    pub interaction: InteractionState,
    /// Export-Ablaufsteuerung
    pub export: ExportPipeline,
    /// View-State
    pub view: ViewState,
    /// UI-State
    pub ui: UiState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: WarpOptions,
    /// Signalisiert dem Host (eframe), die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt den Startzustand mit Standard-Optionen
    pub fn new() -> Self {
        Self::with_options(WarpOptions::default())
    }

    /// Erstellt den Startzustand aus geladenen Optionen.
    pub fn with_options(options: WarpOptions) -> Self {
        let params = ParameterState::from_options(&options);
        let mut image = ImageSlot::with_placeholder(&options);
        if let Some(url) = options.initial_image.as_deref() {
            image.start_load(url);
        }

        Self {
            curve: CurveCache::new(options.arc_samples_per_segment),
            live: LiveGeometry::new(params.resolution(), params.height_scale()),
            params,
            image,
            interaction: InteractionState::new(),
            export: ExportPipeline::new(),
            view: ViewState::new(),
            ui: UiState::new(),
            command_log: CommandLog::new(),
            options,
            should_exit: false,
        }
    }

    /// Anzahl der Kontrollpunkte (für UI-Anzeige)
    pub fn control_point_count(&self) -> usize {
        self.params.control_points().len()
    }

    /// Läuft gerade ein Export?
    pub fn is_exporting(&self) -> bool {
        self.params.is_exporting()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
