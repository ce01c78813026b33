//! Zone and host name helpers
//!
//! Zone names are handled in fully qualified form (trailing dot), the form in
//! which Route 53 reports them.

/// Separator between DNS labels, also the fully-qualified suffix
pub const LABEL_SEPARATOR: &str = ".";

/// Maximum length of a domain name (RFC 1035)
const MAX_NAME_LEN: usize = 253;

/// Maximum length of a single label (RFC 1035)
const MAX_LABEL_LEN: usize = 63;

/// Ensure a zone name ends with the separator
///
/// ```
/// use r53ddns_core::names::normalize_zone_name;
///
/// assert_eq!(normalize_zone_name("example.com"), "example.com.");
/// assert_eq!(normalize_zone_name("example.com."), "example.com.");
/// ```
pub fn normalize_zone_name(zone_name: &str) -> String {
    if zone_name.ends_with(LABEL_SEPARATOR) {
        zone_name.to_string()
    } else {
        format!("{zone_name}{LABEL_SEPARATOR}")
    }
}

/// Join a host label and a zone name into a fully qualified domain name
pub fn fqdn(zone_name: &str, host_name: &str) -> String {
    format!("{host_name}{LABEL_SEPARATOR}{zone_name}")
}

/// Validate a zone name (with or without its trailing dot)
pub fn validate_zone_name(zone_name: &str) -> Result<(), crate::Error> {
    let name = zone_name.strip_suffix(LABEL_SEPARATOR).unwrap_or(zone_name);
    validate_labels("Zone name", name)
}

/// Validate a host name relative to its zone
///
/// The host may span several labels ("home.office") but must not be fully
/// qualified itself.
pub fn validate_host_name(host_name: &str) -> Result<(), crate::Error> {
    if host_name.ends_with(LABEL_SEPARATOR) {
        return Err(crate::Error::invalid_input(format!(
            "Host name must be relative to the zone, without a trailing dot. Got: '{}'",
            host_name
        )));
    }
    validate_labels("Host name", host_name)
}

fn validate_labels(kind: &str, name: &str) -> Result<(), crate::Error> {
    if name.is_empty() {
        return Err(crate::Error::invalid_input(format!("{kind} cannot be empty")));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(crate::Error::invalid_input(format!(
            "{kind} too long: {} chars (max {MAX_NAME_LEN}). Got: {}",
            name.len(),
            name
        )));
    }

    for label in name.split(LABEL_SEPARATOR) {
        if label.is_empty() {
            return Err(crate::Error::invalid_input(format!(
                "{kind} has empty label: '{name}'"
            )));
        }

        if label.len() > MAX_LABEL_LEN {
            return Err(crate::Error::invalid_input(format!(
                "{kind} label too long: {} chars (max {MAX_LABEL_LEN}). Label: '{}'",
                label.len(),
                label
            )));
        }

        // Underscore allowed for service labels
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(crate::Error::invalid_input(format!(
                "{kind} label contains invalid characters. Label: '{label}'. \
                Valid: ASCII alphanumeric, hyphen and underscore."
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::invalid_input(format!(
                "{kind} label cannot start or end with hyphen. Label: '{label}'"
            )));
        }
    }

    Ok(())
}
