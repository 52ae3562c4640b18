use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use folio_core::{representative_target, LayoutUnits, Translation, Viewport};

pub(crate) const CONTAINER_SELECTOR: &str = ".container";
pub(crate) const SECTION_SELECTOR: &str = ".section";
pub(crate) const INDICATOR_SELECTOR: &str = "[data-section-target]";
pub(crate) const INDICATOR_ATTR: &str = "data-section-target";
pub(crate) const ACTIVE_CLASS: &str = "active";

pub(crate) struct PageElements {
    pub(crate) container: HtmlElement,
    pub(crate) sections: Vec<HtmlElement>,
    pub(crate) indicators: Vec<Element>,
}

/// Finds the moving container and its sections. `None` when the container
/// is missing; an empty section list is left to the navigator to reject.
pub(crate) fn discover(document: &Document) -> Option<PageElements> {
    let container = document
        .query_selector(CONTAINER_SELECTOR)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    let sections = query_all(document, SECTION_SELECTOR)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let indicators = query_all(document, INDICATOR_SELECTOR);
    Some(PageElements {
        container,
        sections,
        indicators,
    })
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn viewport_size(window: &Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    Viewport::new(width, height)
}

pub(crate) fn apply_transform(element: &HtmlElement, position: Translation) {
    let _ = element
        .style()
        .set_property("transform", &position.css_translate());
}

/// Sizes a section to one viewport and pins it at `origin` inside the
/// container.
pub(crate) fn place_section(element: &HtmlElement, origin: Translation, viewport: Viewport) {
    let style = element.style();
    let (width, height) = match origin.units {
        LayoutUnits::ViewportPercent => ("100vw".to_string(), "100vh".to_string()),
        LayoutUnits::Pixels => (
            format!("{}px", viewport.width),
            format!("{}px", viewport.height),
        ),
    };
    let (ux, uy) = origin.units.suffixes();
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("width", &width);
    let _ = style.set_property("height", &height);
    let _ = style.set_property("left", &format!("{}{ux}", origin.x));
    let _ = style.set_property("top", &format!("{}{uy}", origin.y));
}

pub(crate) fn indicator_target(element: &Element) -> Option<usize> {
    element
        .get_attribute(INDICATOR_ATTR)?
        .trim()
        .parse::<usize>()
        .ok()
}

/// Lights the dot for `index`, or the closest dot before it when the section
/// has none.
pub(crate) fn set_indicator_active(indicators: &[Element], index: usize) {
    let lit = representative_target(indicators.iter().filter_map(indicator_target), index);
    for indicator in indicators {
        let active = lit.is_some() && indicator_target(indicator) == lit;
        let _ = indicator
            .class_list()
            .toggle_with_force(ACTIVE_CLASS, active);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window()
            .and_then(|window| window.document())
            .expect("document")
    }

    fn build_page(document: &Document, sections: usize) -> Element {
        let root = document.create_element("div").expect("root");
        let container = document.create_element("div").expect("container");
        container.set_class_name("container");
        for idx in 0..sections {
            let section = document.create_element("section").expect("section");
            section.set_class_name("section");
            section.set_id(&format!("section-{idx}"));
            container.append_child(&section).expect("append section");
        }
        root.append_child(&container).expect("append container");
        for idx in 0..sections {
            let dot = document.create_element("button").expect("dot");
            dot.set_attribute(INDICATOR_ATTR, &idx.to_string())
                .expect("attr");
            root.append_child(&dot).expect("append dot");
        }
        document
            .body()
            .expect("body")
            .append_child(&root)
            .expect("append root");
        root
    }

    #[wasm_bindgen_test]
    fn discovers_sections_in_document_order() {
        let document = document();
        let root = build_page(&document, 3);
        let page = discover(&document).expect("page");
        let ids: Vec<String> = page.sections.iter().map(|el| el.id()).collect();
        assert_eq!(ids, vec!["section-0", "section-1", "section-2"]);
        assert_eq!(page.indicators.len(), 3);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn missing_container_is_none() {
        let document = document();
        assert!(discover(&document).is_none());
    }

    #[wasm_bindgen_test]
    fn writes_transforms_and_placement() {
        let document = document();
        let root = build_page(&document, 2);
        let page = discover(&document).expect("page");
        apply_transform(
            &page.container,
            Translation {
                x: -100.0,
                y: -100.0,
                units: LayoutUnits::ViewportPercent,
            },
        );
        let transform = page
            .container
            .style()
            .get_property_value("transform")
            .expect("transform");
        assert_eq!(transform, "translate(-100vw, -100vh)");

        place_section(
            &page.sections[1],
            Translation {
                x: 640.0,
                y: 0.0,
                units: LayoutUnits::Pixels,
            },
            Viewport::new(640.0, 480.0),
        );
        let style = page.sections[1].style();
        assert_eq!(style.get_property_value("left").expect("left"), "640px");
        assert_eq!(style.get_property_value("width").expect("width"), "640px");
        assert_eq!(
            style.get_property_value("position").expect("position"),
            "absolute"
        );
        root.remove();
    }

    #[wasm_bindgen_test]
    fn marks_only_the_matching_indicator() {
        let document = document();
        let root = build_page(&document, 3);
        let page = discover(&document).expect("page");
        set_indicator_active(&page.indicators, 1);
        let active: Vec<bool> = page
            .indicators
            .iter()
            .map(|el| el.class_list().contains(ACTIVE_CLASS))
            .collect();
        assert_eq!(active, vec![false, true, false]);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn section_without_dot_lights_the_preceding_one() {
        let document = document();
        let root = build_page(&document, 3);
        let page = discover(&document).expect("page");
        set_indicator_active(&page.indicators, 4);
        let active: Vec<bool> = page
            .indicators
            .iter()
            .map(|el| el.class_list().contains(ACTIVE_CLASS))
            .collect();
        assert_eq!(active, vec![false, false, true]);
        root.remove();
    }
}
