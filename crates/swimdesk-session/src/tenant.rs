//! Tenant context: the branch every scoped request is sent for.

use std::sync::Arc;

use swimdesk_core::StorageError;
use tracing::{debug, info};

use crate::keys;
use crate::store::KeyValueStore;

/// Persisted selected-tenant id.
#[derive(Debug, Clone)]
pub struct TenantContext {
    storage: Arc<dyn KeyValueStore>,
}

impl TenantContext {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Selects `tenant_id` for subsequent requests.
    ///
    /// # Errors
    ///
    /// Blank ids are rejected with `StorageError::InvalidValue`.
    pub fn set_tenant(&self, tenant_id: &str) -> Result<(), StorageError> {
        let tenant_id = tenant_id.trim();
        if tenant_id.is_empty() {
            return Err(StorageError::InvalidValue {
                key: keys::tenant::SELECTED.to_string(),
                reason: "tenant id is empty".to_string(),
            });
        }

        self.storage
            .set(keys::tenant::SELECTED, tenant_id.to_string())?;
        info!(tenant.id = %tenant_id, "Tenant selected");
        Ok(())
    }

    /// The selected tenant id, if any.
    pub fn tenant(&self) -> Option<String> {
        match self.storage.get(keys::tenant::SELECTED) {
            Ok(value) => value.filter(|id| !id.trim().is_empty()),
            Err(e) => {
                debug!(error = %e, "Failed to read tenant");
                None
            }
        }
    }

    pub fn clear_tenant(&self) -> Result<(), StorageError> {
        self.storage.remove(keys::tenant::SELECTED)?;
        debug!("Tenant cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_set_and_clear_tenant() {
        let tenants = TenantContext::new(Arc::new(MemoryStore::new()));
        assert_eq!(tenants.tenant(), None);

        tenants.set_tenant(" branch-01 ").unwrap();
        assert_eq!(tenants.tenant().as_deref(), Some("branch-01"));

        tenants.set_tenant("branch-02").unwrap();
        assert_eq!(tenants.tenant().as_deref(), Some("branch-02"));

        tenants.clear_tenant().unwrap();
        assert_eq!(tenants.tenant(), None);
    }

    #[test]
    fn test_blank_tenant_rejected() {
        let tenants = TenantContext::new(Arc::new(MemoryStore::new()));
        tenants.set_tenant("t1").unwrap();
        assert!(tenants.set_tenant("").is_err());
        assert_eq!(tenants.tenant().as_deref(), Some("t1"));
    }

    #[test]
    fn test_tenant_independent_of_session_keys() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let tenants = TenantContext::new(storage.clone());
        tenants.set_tenant("t1").unwrap();

        storage
            .remove_many(&[keys::session::TOKEN, keys::session::USER])
            .unwrap();
        assert_eq!(tenants.tenant().as_deref(), Some("t1"));
    }
}
