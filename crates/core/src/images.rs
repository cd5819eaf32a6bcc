//! Server-managed image references.
//!
//! An image is server-managed when its URL starts with the service's own
//! `{base_url}/uploads/` prefix. Anything else (empty, externally hosted)
//! is never touched on disk.

/// URL path segment under which uploaded files are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Build the public URL prefix for uploaded files from the base URL.
pub fn uploads_prefix(base_url: &str) -> String {
    format!("{}{UPLOADS_ROUTE}/", base_url.trim_end_matches('/'))
}

/// Return the stored file name behind `image_url` if the image is server-managed.
///
/// Only a bare file name is accepted after the prefix, so a crafted URL can
/// never point outside the upload directory.
pub fn managed_file_name<'a>(image_url: &'a str, prefix: &str) -> Option<&'a str> {
    let name = image_url.strip_prefix(prefix)?;
    let is_bare = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(&['/', '\\'][..])
        && !name.contains("..");
    is_bare.then_some(name)
}
