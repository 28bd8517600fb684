//! Handler für Export-Trigger und Export-Ergebnisse.

use crate::app::export::{ExportEvent, ExportSink};
use crate::app::AppState;
use crate::render::OffscreenRenderer;

/// Erhöht den Export-Zähler (einmaliger Trigger).
pub fn request_export(state: &mut AppState) {
    let count = state.params.request_export();
    log::debug!("Export angefordert (#{})", count);
}

/// Führt einen Export-Schritt aus und übernimmt das Ergebnis in die Statuszeile.
pub fn poll(
    state: &mut AppState,
    renderer: &mut dyn OffscreenRenderer,
    sink: &mut dyn ExportSink,
) -> Option<ExportEvent> {
    let event = state.export.poll(
        &mut state.params,
        &state.image,
        &state.options,
        renderer,
        sink,
    )?;
    state.ui.status_message = Some(match &event {
        ExportEvent::Completed(report) => format!(
            "Export gespeichert: {} ({}x{} Pixel)",
            report.location, report.width, report.height
        ),
        ExportEvent::Failed(e) => format!("Export fehlgeschlagen: {:#}", e),
    });
    Some(event)
}
