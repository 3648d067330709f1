use serde::{Deserialize, Serialize};

/// One image returned with an AI response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Modal overlay showing one gallery image at full size.
///
/// Every dismissal affordance (close button, backdrop click, Escape) routes
/// through [`Lightbox::dismiss`], which is a no-op once the overlay is gone.
#[derive(Debug, Default)]
pub struct Lightbox {
    open: Option<ImageResult>,
}

impl Lightbox {
    pub fn open(&mut self, image: ImageResult) {
        self.open = Some(image);
    }

    /// Remove the overlay. Returns `false` if it was already removed.
    pub fn dismiss(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn image(&self) -> Option<&ImageResult> {
        self.open.as_ref()
    }

    /// External-source link shown under the image, when the result has one.
    pub fn source_link(&self) -> Option<&str> {
        self.open.as_ref().and_then(|i| i.source_url.as_deref())
    }
}

/// Thumbnail gallery under the AI response.
///
/// Contents are replaced wholesale on each new response; there is no
/// incremental merge.
#[derive(Debug, Default)]
pub struct ImageGallery {
    images: Vec<ImageResult>,
    pub lightbox: Lightbox,
}

impl ImageGallery {
    pub fn replace(&mut self, images: Vec<ImageResult>) {
        self.images = images;
    }

    pub fn thumbnails(&self) -> &[ImageResult] {
        &self.images
    }

    /// Placeholder text rendered when the gallery is empty.
    pub fn placeholder(&self) -> Option<&'static str> {
        if self.images.is_empty() {
            Some("No images available")
        } else {
            None
        }
    }

    /// Thumbnail click: open the lightbox on that image.
    pub fn open_lightbox(&mut self, index: usize) -> bool {
        match self.images.get(index) {
            Some(image) => {
                self.lightbox.open(image.clone());
                true
            }
            None => false,
        }
    }
}
