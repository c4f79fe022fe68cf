use crate::utils::constants::{ACTION_SCRIPT, REST_SCRIPT};

/// Normalize a caller-supplied wiki origin to end with a single `/`.
pub fn normalize_origin(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{}/", trimmed)
    }
}

/// `<origin>api.php` — the Action API entry point.
pub fn action_endpoint(origin: &str) -> String {
    format!("{}{}", normalize_origin(origin), ACTION_SCRIPT)
}

/// `<origin>rest.php` — the REST API entry point.
pub fn rest_endpoint(origin: &str) -> String {
    format!("{}{}", normalize_origin(origin), REST_SCRIPT)
}

/// Human-facing page URL in the conventional `/wiki/Title` form.
pub fn page_url(origin: &str, title: &str) -> String {
    format!("{}wiki/{}", normalize_origin(origin), title.replace(' ', "_"))
}
