use std::cell::Cell;

pub(crate) const STATE_ATTR: &str = "data-folio-state";
pub(crate) const ERROR_ATTR: &str = "data-folio-error";

thread_local! {
    static READY_SENT: Cell<bool> = Cell::new(false);
}

fn with_root<F: FnOnce(&web_sys::Element)>(action: F) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };
    action(&root);
}

/// Tells the page stylesheet the navigator is live.
pub(crate) fn ready() {
    let already_sent = READY_SENT.with(|flag| flag.replace(true));
    if already_sent {
        return;
    }
    with_root(|root| {
        let _ = root.set_attribute(STATE_ATTR, "ready");
        let _ = root.remove_attribute(ERROR_ATTR);
    });
}

pub(crate) fn fail(code: &str, message: &str) {
    gloo::console::warn!("folio navigation disabled", code, message);
    with_root(|root| {
        let _ = root.set_attribute(STATE_ATTR, "failed");
        let _ = root.set_attribute(ERROR_ATTR, code);
    });
}
