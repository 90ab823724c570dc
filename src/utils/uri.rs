//! ## uri
//!
//! smb uri utilities

use crate::SmbCredentials;

const SMB_SCHEME: &str = "smb://";

/// Share normalized as `/name`, or empty when no share is configured
pub fn normalized_share(credentials: &SmbCredentials) -> String {
    match credentials.share.trim_matches('/') {
        "" => String::new(),
        share => format!("/{share}"),
    }
}

/// Uri of the share root: `smb://address[:port]/share`
pub fn share_base(credentials: &SmbCredentials) -> String {
    format!(
        "{}{}",
        credentials.server.trim_end_matches('/'),
        normalized_share(credentials)
    )
}

/// Resolve `uri` against the credentials server and share.
///
/// Fully qualified `smb://` uris are returned unchanged.
pub fn resolve(credentials: &SmbCredentials, uri: &str) -> String {
    if uri.starts_with(SMB_SCHEME) {
        return uri.to_string();
    }
    let mut resolved = share_base(credentials);
    let path = uri.trim_matches('/');
    if !path.is_empty() {
        resolved.push('/');
        resolved.push_str(path);
    }
    resolved
}

/// Path of `uri` relative to the share root `base`, always starting with `/`.
///
/// Returns `None` if `uri` is outside of `base`.
#[cfg_attr(not(feature = "pavao"), allow(dead_code))]
pub fn share_path(base: &str, uri: &str) -> Option<String> {
    let rest = uri.strip_prefix(base)?;
    if !rest.is_empty() && !rest.starts_with('/') {
        return None;
    }
    Some(format!("/{}", rest.trim_start_matches('/')))
}
