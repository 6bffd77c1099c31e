//! Amazon CDN allow-list and the same-origin image proxy rewrite.
//!
//! The allow-list lives here once and is used both when rewriting image links
//! and when the proxy endpoint decides whether to fetch a URL.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Path of the server endpoint that streams proxied images.
pub const IMAGE_PROXY_PATH: &str = "/api/image-proxy";

/// Amazon image CDN hosts. A host matches when it contains an entry.
pub const AMAZON_IMAGE_HOSTS: &[&str] = &[
    "m.media-amazon.com",
    "images-na.ssl-images-amazon.com",
    "images-eu.ssl-images-amazon.com",
    "images-fe.ssl-images-amazon.com",
    "ecx.images-amazon.com",
];

/// Any host under this suffix is also accepted.
pub const AMAZON_IMAGE_WILDCARD_SUFFIX: &str = ".media-amazon.com";

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Returns `true` when `host` is one of the Amazon image CDN hosts.
#[must_use]
pub fn is_amazon_image_host(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    host.ends_with(AMAZON_IMAGE_WILDCARD_SUFFIX)
        || AMAZON_IMAGE_HOSTS
            .iter()
            .any(|allowed| host.contains(allowed))
}

/// Returns `true` when `raw` parses as a URL whose host is allow-listed.
#[must_use]
pub fn is_allowed_image_url(raw: &str) -> bool {
    url::Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(is_amazon_image_host))
        .unwrap_or(false)
}

/// Rewrites an Amazon CDN image URL into a link to this server's proxy.
///
/// Missing inputs and unparseable or foreign URLs pass through unchanged;
/// this never fails.
#[must_use]
pub fn proxied_image_url(image_url: Option<&str>, base_url: Option<&str>) -> Option<String> {
    let image_url = image_url?;
    let base_url = match base_url {
        Some(base) if !base.is_empty() && !image_url.is_empty() => base,
        _ => return Some(image_url.to_string()),
    };

    if !is_allowed_image_url(image_url) {
        return Some(image_url.to_string());
    }

    Some(format!(
        "{}{IMAGE_PROXY_PATH}?url={}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(image_url, URI_COMPONENT)
    ))
}

/// Proxies every URL in `images`, keeping order.
#[must_use]
pub fn proxied_image_urls(images: &[String], base_url: Option<&str>) -> Vec<String> {
    images
        .iter()
        .map(|img| proxied_image_url(Some(img), base_url).unwrap_or_else(|| img.clone()))
        .collect()
}
