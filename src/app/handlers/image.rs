//! Handler für das Quellbild.

use crate::app::image_loader::ImageLoadEvent;
use crate::app::AppState;

/// Startet das Laden eines Quellbilds im Hintergrund.
pub fn load_image(state: &mut AppState, url: String) {
    state.ui.image_url_input = url.clone();
    state.image.start_load(&url);
    state.ui.status_message = Some(format!("Lade Bild: {}", url));
}

/// Übernimmt ein fertig geladenes Bild oder meldet den Fehler.
pub fn poll(state: &mut AppState) -> Option<ImageLoadEvent> {
    let event = state.image.poll()?;
    apply_load_event(state, &event);
    Some(event)
}

/// Schreibt das Ergebnis eines Ladevorgangs in Log und Statuszeile.
pub fn apply_load_event(state: &mut AppState, event: &ImageLoadEvent) {
    match event {
        ImageLoadEvent::Loaded { url, width, height } => {
            log::info!("Quellbild bereit: {} ({}x{})", url, width, height);
            state.ui.status_message = None;
        }
        ImageLoadEvent::Failed { url, error } => {
            log::error!("Quellbild '{}' konnte nicht geladen werden: {:#}", url, error);
            state.ui.status_message = Some(format!("Bild konnte nicht geladen werden: {}", url));
        }
    }
}
