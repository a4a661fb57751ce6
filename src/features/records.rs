//! Image records on the admin server
//!
//! Listing comes from the server-rendered dashboard and stored values from
//! the edit page; delete and logout are single requests over the shared
//! [`Transport`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::features::submission::{Method, SubmissionRequest, Transport};

static DATA_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r#"data-slug\s*=\s*"([^"]*)""#).unwrap());
static INPUT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<input\b([^>]*)>").unwrap());
static TEXTAREA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<textarea\b([^>]*)>(.*?)</textarea>").unwrap());
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

pub const DELETE_FAILED: &str = "Failed to delete image";
pub const LOGOUT_FAILED: &str = "Logout failed. Please try again.";
pub const LOAD_FAILED: &str = "Failed to load image";
pub const SESSION_EXPIRED: &str = "Session expired, please log in again";

/// One image card on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub slug: String,
}

/// Values currently stored for an image, as shown on its edit page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredImage {
    pub alt: String,
    pub description: String,
    /// Comma separated
    pub keywords: String,
}

/// Edit page of `slug`
pub fn edit_path(slug: &str) -> String {
    format!("/admin/edit/{}", urlencoding::encode(slug))
}

/// Dashboard path for updating `slug`
pub fn update_path(slug: &str) -> String {
    format!("/admin/update/{}", urlencoding::encode(slug))
}

pub fn delete_path(slug: &str) -> String {
    format!("/admin/delete/{}", urlencoding::encode(slug))
}

/// Collect image slugs from the dashboard HTML, in page order, once each
pub fn parse_dashboard(html: &str) -> Vec<ImageRecord> {
    let mut records: Vec<ImageRecord> = Vec::new();
    for captures in DATA_SLUG.captures_iter(html) {
        let slug = decode_entities(&captures[1]);
        if slug.is_empty() || records.iter().any(|r| r.slug == slug) {
            continue;
        }
        records.push(ImageRecord { slug });
    }
    records
}

/// Read the stored field values out of the edit page HTML
///
/// Fields are matched by `name`, falling back to `id`. `None` when the page
/// has no alt field, i.e. it is not an edit form.
pub fn parse_edit_page(html: &str) -> Option<StoredImage> {
    let mut fields: HashMap<String, String> = HashMap::new();

    for captures in INPUT_TAG.captures_iter(html) {
        let attrs = attributes(&captures[1]);
        if let Some(key) = field_key(&attrs) {
            let value = attrs.get("value").cloned().unwrap_or_default();
            fields.entry(key).or_insert(value);
        }
    }
    for captures in TEXTAREA.captures_iter(html) {
        let attrs = attributes(&captures[1]);
        if let Some(key) = field_key(&attrs) {
            // A newline right after the opening tag is not part of the value
            let content = captures[2].strip_prefix('\n').unwrap_or(&captures[2]);
            fields.entry(key).or_insert_with(|| decode_entities(content));
        }
    }

    let alt = fields.remove("alt")?;
    Some(StoredImage {
        alt,
        description: fields.remove("description").unwrap_or_default(),
        keywords: fields.remove("keywords").unwrap_or_default(),
    })
}

/// Attribute names lowercased, values entity-decoded
fn attributes(tag: &str) -> HashMap<String, String> {
    ATTRIBUTE
        .captures_iter(tag)
        .map(|c| {
            let value = c.get(2).or_else(|| c.get(3)).map_or("", |m| m.as_str());
            (c[1].to_ascii_lowercase(), decode_entities(value))
        })
        .collect()
}

fn field_key(attrs: &HashMap<String, String>) -> Option<String> {
    attrs
        .get("name")
        .or_else(|| attrs.get("id"))
        .filter(|key| !key.is_empty())
        .cloned()
}

/// Undo the HTML escaping a template engine applies to attribute values
fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&#x2F;", "/")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Load the stored values of `slug`; the error is the message to show
pub async fn fetch_stored<T: Transport>(transport: &T, slug: &str) -> Result<StoredImage, String> {
    let request = SubmissionRequest::empty(Method::Get, edit_path(slug));
    match transport.send(request).await {
        Ok(response) if response.is_success() => {
            let html = response.body.unwrap_or_default();
            parse_edit_page(&html).ok_or_else(|| {
                tracing::warn!("Edit page of {} has no image form", slug);
                LOAD_FAILED.to_string()
            })
        }
        // Redirected to the login page
        Ok(response) if (300..400).contains(&response.status) || response.status == 401 => {
            Err(SESSION_EXPIRED.to_string())
        }
        Ok(response) => {
            tracing::warn!("Edit page of {} returned status {}", slug, response.status);
            Err(response.error_message(LOAD_FAILED))
        }
        Err(e) => {
            tracing::error!("Failed to load {}: {}", slug, e);
            Err(e.to_string())
        }
    }
}

/// Delete the image `slug`; the error is the message to show
pub async fn delete_image<T: Transport>(transport: &T, slug: &str) -> Result<(), String> {
    let request = SubmissionRequest::empty(Method::Delete, delete_path(slug));
    match transport.send(request).await {
        Ok(response) if response.is_success() => {
            tracing::info!("Deleted image {}", slug);
            Ok(())
        }
        Ok(response) => {
            tracing::warn!("Delete of {} rejected with status {}", slug, response.status);
            Err(response.error_message(DELETE_FAILED))
        }
        Err(e) => {
            tracing::error!("Delete error: {}", e);
            Err(e.to_string())
        }
    }
}

/// End the admin session
pub async fn logout<T: Transport>(transport: &T) -> Result<(), String> {
    let request = SubmissionRequest::empty(Method::Post, "/admin/logout");
    match transport.send(request).await {
        Ok(response) if response.is_success() => Ok(()),
        Ok(response) => {
            tracing::warn!("Logout rejected with status {}", response.status);
            Err(LOGOUT_FAILED.to_string())
        }
        Err(e) => {
            tracing::error!("Logout error: {}", e);
            Err(LOGOUT_FAILED.to_string())
        }
    }
}
