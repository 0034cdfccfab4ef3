use crate::services::gallery::GalleryService;
use std::sync::Arc;

/// Application state shared by the gallery handlers
#[derive(Clone)]
pub struct AppState {
    /// Gallery service for listing and creating memes
    pub gallery_service: Arc<dyn GalleryService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("gallery_service", &"Arc<dyn GalleryService>")
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(gallery_service: Box<dyn GalleryService>) -> Self {
        Self {
            gallery_service: Arc::from(gallery_service),
        }
    }
}
