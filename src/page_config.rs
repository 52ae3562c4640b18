use web_sys::Document;

use folio_core::NavigatorConfig;

pub(crate) const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Navigator settings embedded in the page as
/// `<script type="application/json" id="folio-config">`. Missing settings
/// mean defaults; unreadable or invalid settings are reported and replaced
/// by defaults.
pub(crate) fn load_navigator_config(document: &Document) -> NavigatorConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return NavigatorConfig::default();
    };
    match parse_navigator_config(&raw) {
        Ok(config) => config,
        Err(err) => {
            gloo::console::warn!("folio config ignored", err);
            NavigatorConfig::default()
        }
    }
}

pub(crate) fn parse_navigator_config(raw: &str) -> Result<NavigatorConfig, String> {
    if raw.trim().is_empty() {
        return Ok(NavigatorConfig::default());
    }
    let config: NavigatorConfig = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}
