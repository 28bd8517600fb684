use crate::core::PreviewCamera;

/// View-bezogener Anwendungszustand
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Orthografische Vorschau-Kamera
    pub camera: PreviewCamera,
    /// Aktuelle Viewport-Größe in Pixel
    pub viewport_size: [f32; 2],
}

impl ViewState {
    /// Erstellt den Standard-View-Zustand.
    pub fn new() -> Self {
        Self {
            camera: PreviewCamera::new(),
            viewport_size: [0.0, 0.0],
        }
    }
}
