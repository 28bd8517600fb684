/// UI-bezogener Anwendungszustand
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Ob der Bild-Auswahl-Dialog geöffnet werden soll
    pub show_image_dialog: bool,
    /// Eingabefeld für den Bildpfad im Eigenschaften-Panel
    pub image_url_input: String,
    /// Temporäre Statusnachricht (Export, Ladefehler)
    pub status_message: Option<String>,
}

impl UiState {
    /// Erstellt den Standard-UI-Zustand (alle Dialoge geschlossen).
    pub fn new() -> Self {
        Self {
            show_image_dialog: false,
            image_url_input: String::new(),
            status_message: None,
        }
    }
}
