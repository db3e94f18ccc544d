//! etcd v3 adapter
//!
//! The client library is async; the adapter owns a current-thread runtime and
//! blocks on every request so that callers stay sequential.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use etcd_client::{
    Certificate, Client, ConnectOptions, GetOptions, Identity, SortOrder as EtcdSortOrder,
    SortTarget, TlsOptions,
};
use tokio::runtime::{Builder, Runtime};

use super::errors::{StoreError, StoreResult};
use super::record::{KeyScope, KeyValueRecord, SortOrder};
use super::KeyValueStore;

/// Endpoints, timeout and optional TLS material used to dial the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub endpoints: Vec<String>,
    pub dial_timeout: Duration,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
    pub cacert: Option<PathBuf>,
}

impl ConnectionSettings {
    /// Returns true if any TLS material was supplied.
    pub fn uses_tls(&self) -> bool {
        self.cert.is_some() || self.key.is_some() || self.cacert.is_some()
    }

    fn tls_options(&self) -> StoreResult<Option<TlsOptions>> {
        if !self.uses_tls() {
            return Ok(None);
        }

        let mut tls = TlsOptions::new();

        if let Some(cacert) = &self.cacert {
            tls = tls.ca_certificate(Certificate::from_pem(read_pem(cacert)?));
        }

        match (&self.cert, &self.key) {
            (Some(cert), Some(key)) => {
                tls = tls.identity(Identity::from_pem(read_pem(cert)?, read_pem(key)?));
            }
            (Some(_), None) => {
                return Err(StoreError::Credentials(
                    "client certificate given without a client key".into(),
                ))
            }
            (None, Some(_)) => {
                return Err(StoreError::Credentials(
                    "client key given without a client certificate".into(),
                ))
            }
            (None, None) => {}
        }

        Ok(Some(tls))
    }
}

fn read_pem(path: &Path) -> StoreResult<Vec<u8>> {
    fs::read(path).map_err(|source| StoreError::CredentialFile {
        path: path.to_path_buf(),
        source,
    })
}

fn get_options(order: SortOrder) -> GetOptions {
    match order {
        SortOrder::None => GetOptions::new(),
        SortOrder::Ascend => GetOptions::new().with_sort(SortTarget::Key, EtcdSortOrder::Ascend),
        SortOrder::Descend => GetOptions::new().with_sort(SortTarget::Key, EtcdSortOrder::Descend),
    }
}

/// A connected etcd client.
///
/// The connection is released when the value is dropped.
pub struct EtcdStore {
    runtime: Runtime,
    client: Client,
}

impl EtcdStore {
    /// Dial the cluster. Fails if credentials cannot be loaded or the
    /// connection cannot be established within the dial timeout.
    pub fn connect(settings: &ConnectionSettings) -> StoreResult<Self> {
        let tls = settings.tls_options()?;

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(StoreError::Runtime)?;

        let mut options = ConnectOptions::new().with_connect_timeout(settings.dial_timeout);
        if let Some(tls) = tls {
            options = options.with_tls(tls);
        }

        let client = runtime
            .block_on(Client::connect(settings.endpoints.clone(), Some(options)))
            .map_err(|source| StoreError::Connect {
                endpoints: settings.endpoints.join(","),
                source,
            })?;

        Ok(Self { runtime, client })
    }

    fn range(&mut self, key: Vec<u8>, options: GetOptions) -> StoreResult<Vec<KeyValueRecord>> {
        let response = self
            .runtime
            .block_on(self.client.get(key, Some(options)))?;

        Ok(response
            .kvs()
            .iter()
            .map(|kv| KeyValueRecord::new(kv.key(), kv.value()))
            .collect())
    }
}

impl KeyValueStore for EtcdStore {
    fn list_keys(&mut self, scope: KeyScope, order: SortOrder) -> StoreResult<Vec<Vec<u8>>> {
        let (key, options) = match scope {
            KeyScope::FromKey(start) => (start, get_options(order).with_from_key()),
            KeyScope::Prefix(prefix) => (prefix, get_options(order).with_prefix()),
        };

        let records = self.range(key, options.with_keys_only())?;
        Ok(records.into_iter().map(|r| r.key().to_vec()).collect())
    }

    fn get(&mut self, key: &[u8]) -> StoreResult<Vec<KeyValueRecord>> {
        self.range(key.to_vec(), GetOptions::new())
    }

    fn scan_prefix(&mut self, prefix: &[u8], order: SortOrder) -> StoreResult<Vec<KeyValueRecord>> {
        self.range(prefix.to_vec(), get_options(order).with_prefix())
    }
}
