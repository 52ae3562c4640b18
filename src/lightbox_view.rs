use std::collections::BTreeMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use folio_core::{Lightbox, LightboxView};

use crate::dom;

pub(crate) const GALLERY_IMAGE_SELECTOR: &str = "img[data-project]";
pub(crate) const PROJECT_ATTR: &str = "data-project";
pub(crate) const OVERLAY_SELECTOR: &str = ".lightbox";
pub(crate) const ACTIVE_CLASS: &str = "is-active";

pub(crate) struct GalleryImage {
    pub(crate) element: Element,
    pub(crate) project: String,
    pub(crate) index: usize,
}

/// Overlay elements and the image sources of every project gallery.
pub(crate) struct LightboxDom {
    overlay: Option<HtmlElement>,
    image: Option<HtmlImageElement>,
    counter: Option<Element>,
    sources: BTreeMap<String, Vec<String>>,
    pub(crate) images: Vec<GalleryImage>,
    pub(crate) close_button: Option<Element>,
    pub(crate) prev_button: Option<Element>,
    pub(crate) next_button: Option<Element>,
}

impl LightboxDom {
    pub(crate) fn discover(document: &Document) -> Self {
        let mut sources: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut images = Vec::new();
        for element in dom::query_all(document, GALLERY_IMAGE_SELECTOR) {
            let Some(project) = element.get_attribute(PROJECT_ATTR) else {
                continue;
            };
            let src = element
                .dyn_ref::<HtmlImageElement>()
                .map(|img| img.src())
                .unwrap_or_default();
            let list = sources.entry(project.clone()).or_default();
            let index = list.len();
            list.push(src);
            images.push(GalleryImage {
                element,
                project,
                index,
            });
        }
        let overlay = document
            .query_selector(OVERLAY_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let find = |selector: &str| -> Option<Element> {
            overlay
                .as_ref()
                .and_then(|root| root.query_selector(selector).ok().flatten())
        };
        let image = find(".lightbox-image").and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
        let counter = find(".lightbox-counter");
        let close_button = find(".lightbox-close");
        let prev_button = find(".lightbox-prev");
        let next_button = find(".lightbox-next");
        Self {
            overlay,
            image,
            counter,
            sources,
            images,
            close_button,
            prev_button,
            next_button,
        }
    }

    pub(crate) fn register_all(&self, lightbox: &mut Lightbox) {
        for (project, sources) in &self.sources {
            lightbox.register(project, sources.len());
        }
    }

    pub(crate) fn render(&self, view: Option<LightboxView>) {
        let Some(overlay) = self.overlay.as_ref() else {
            return;
        };
        let _ = overlay
            .class_list()
            .toggle_with_force(ACTIVE_CLASS, view.is_some());
        let _ = overlay.set_attribute("aria-hidden", if view.is_some() { "false" } else { "true" });
        let Some(view) = view else {
            return;
        };
        if let Some(image) = self.image.as_ref() {
            let src = self
                .sources
                .get(&view.project)
                .and_then(|list| list.get(view.image))
                .cloned()
                .unwrap_or_default();
            image.set_src(&src);
        }
        if let Some(counter) = self.counter.as_ref() {
            counter.set_text_content(Some(&format!("{} / {}", view.image + 1, view.count)));
        }
    }
}
