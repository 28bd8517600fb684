//! Handler für Dialog-State und Anwendungssteuerung.

use crate::app::AppState;
use crate::shared::WarpOptions;

/// Markiert die Anwendung zum Beenden im nächsten Frame.
pub fn request_exit(state: &mut AppState) {
    state.should_exit = true;
}

/// Öffnet den Bild-Auswahldialog.
pub fn request_image_dialog(state: &mut AppState) {
    state.ui.show_image_dialog = true;
}

/// Entfernt die Statusmeldung.
pub fn dismiss_status_message(state: &mut AppState) {
    state.ui.status_message = None;
}

/// Schreibt die aktuellen Optionen in die Konfigurationsdatei.
///
/// Live-Parameter (Offset, Kontrollpunkte) werden nicht übernommen.
pub fn save_options(state: &mut AppState) -> anyhow::Result<()> {
    let path = WarpOptions::config_path();
    state.options.save_to_file(&path)?;
    state.ui.status_message = Some(format!("Optionen gespeichert: {}", path.display()));
    Ok(())
}
