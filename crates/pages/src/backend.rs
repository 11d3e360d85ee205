use crate::BackendError;

/// Thumbnail scale used for page previews.
pub const PREVIEW_SCALE: f64 = 0.3;

/// Transient preview of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub caption: String,
    /// Rendered image bytes, when the backend can rasterize.
    pub image: Option<Vec<u8>>,
}

/// The document library the pipeline drives. Page content fidelity is the
/// backend's job; the pipeline only decides which calls happen in what order.
pub trait DocumentBackend {
    type Document;

    fn load(&self, bytes: &[u8]) -> Result<Self::Document, BackendError>;

    fn page_count(&self, doc: &Self::Document) -> usize;

    /// An owned document holding only page `index` (0-based) of `doc`.
    fn extract_page(&self, doc: &Self::Document, index: usize)
        -> Result<Self::Document, BackendError>;

    /// `None` when no preview can be produced; previews are never required.
    fn preview(&self, doc: &Self::Document, index: usize) -> Option<Preview>;

    fn new_document(&self) -> Self::Document;

    /// Copies the single page of `single` to the end of `out`.
    fn append_page(&self, out: &mut Self::Document, single: &Self::Document)
        -> Result<(), BackendError>;

    fn save(&self, doc: &mut Self::Document) -> Result<Vec<u8>, BackendError>;
}
