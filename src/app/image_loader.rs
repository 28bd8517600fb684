//! Quellbild-Slot mit asynchronem Laden im Hintergrund-Thread.

use crate::core::SourceImage;
use crate::shared::WarpOptions;
use anyhow::anyhow;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

/// Laufender Ladevorgang.
#[derive(Debug)]
struct PendingLoad {
    url: String,
    receiver: Receiver<anyhow::Result<SourceImage>>,
}

/// Ergebnis eines abgeschlossenen Ladevorgangs.
#[derive(Debug)]
pub enum ImageLoadEvent {
    /// Neues Bild übernommen
    Loaded {
        /// Herkunft
        url: String,
        /// Breite in Pixeln
        width: u32,
        /// Höhe in Pixeln
        height: u32,
    },
    /// Laden fehlgeschlagen, bisheriges Bild bleibt aktiv
    Failed {
        /// Herkunft
        url: String,
        /// Fehlerbeschreibung
        error: anyhow::Error,
    },
}

/// Aktuelles Quellbild plus optional laufender Ladevorgang.
///
/// Während ein Bild lädt, gilt der Slot als nicht bereit (Exporte warten).
#[derive(Debug)]
pub struct ImageSlot {
    current: Arc<SourceImage>,
    pending: Option<PendingLoad>,
    revision: u64,
}

impl ImageSlot {
    /// Erstellt den Slot mit dem Platzhalterbild aus den Optionen.
    pub fn with_placeholder(options: &WarpOptions) -> Self {
        Self::with_image(SourceImage::placeholder(
            options.placeholder_size,
            options.placeholder_cells,
            options.placeholder_color_light,
            options.placeholder_color_dark,
        ))
    }

    /// Erstellt den Slot mit einem bereits geladenen Bild.
    pub fn with_image(image: SourceImage) -> Self {
        Self {
            current: Arc::new(image),
            pending: None,
            revision: 1,
        }
    }

    /// Zuletzt vollständig geladenes Bild (für die Vorschau).
    pub fn current(&self) -> &Arc<SourceImage> {
        &self.current
    }

    /// Bild für den Export; `None` solange ein neues Bild lädt.
    pub fn ready(&self) -> Option<Arc<SourceImage>> {
        match self.pending {
            Some(_) => None,
            None => Some(Arc::clone(&self.current)),
        }
    }

    /// Lädt gerade ein Bild?
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// URL des laufenden Ladevorgangs.
    pub fn loading_url(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.url.as_str())
    }

    /// Wird bei jedem Bildwechsel erhöht.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Startet das Laden im Hintergrund. Ein vorheriger Ladevorgang wird verworfen.
    pub fn start_load(&mut self, url: &str) {
        let (sender, receiver) = mpsc::channel();
        let path = url.to_string();
        std::thread::spawn(move || {
            let result = SourceImage::load_from_file(&path);
            // Empfänger kann bereits verworfen sein (neuer Ladevorgang)
            let _ = sender.send(result);
        });
        log::info!("Lade Quellbild: {}", url);
        self.pending = Some(PendingLoad {
            url: url.to_string(),
            receiver,
        });
    }

    /// Prüft, ob der laufende Ladevorgang fertig ist (nicht blockierend).
    pub fn poll(&mut self) -> Option<ImageLoadEvent> {
        let pending = self.pending.as_ref()?;
        let result = match pending.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(anyhow!("Lade-Thread beendet ohne Ergebnis")),
        };

        let url = pending.url.clone();
        self.pending = None;
        Some(self.finish(url, result))
    }

    /// Wartet blockierend auf den laufenden Ladevorgang.
    pub fn wait(&mut self) -> Option<ImageLoadEvent> {
        let pending = self.pending.take()?;
        let result = pending
            .receiver
            .recv()
            .unwrap_or_else(|_| Err(anyhow!("Lade-Thread beendet ohne Ergebnis")));
        Some(self.finish(pending.url, result))
    }

    fn finish(&mut self, url: String, result: anyhow::Result<SourceImage>) -> ImageLoadEvent {
        match result {
            Ok(image) => {
                let (width, height) = image.dimensions();
                self.current = Arc::new(image);
                self.revision += 1;
                ImageLoadEvent::Loaded { url, width, height }
            }
            Err(error) => ImageLoadEvent::Failed { url, error },
        }
    }
}
