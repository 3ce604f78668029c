//! Storage key names.
//!
//! These names are part of the persisted format; renaming one logs every
//! user out or drops their branch selection.

/// Session keys.
pub mod session {
    /// Raw access token.
    pub const TOKEN: &str = "swimdesk.token";
    /// JSON-encoded [`swimdesk_models::SessionUser`].
    pub const USER: &str = "swimdesk.user";
}

/// Tenant keys.
pub mod tenant {
    /// Selected tenant id.
    pub const SELECTED: &str = "swimdesk.tenant_id";
}

/// Every key this client writes.
pub const ALL: [&str; 3] = [session::TOKEN, session::USER, tenant::SELECTED];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_prefixed_and_distinct() {
        assert!(ALL.iter().all(|k| k.starts_with("swimdesk.")));
        let mut unique = ALL.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ALL.len());
    }
}
