//! Network operations on a pool, behind a trait so the cleanup flow can run
//! against an in-memory pool in tests.

use crate::core::error::XapiError;
use crate::core::session::Session;
use crate::models::network::{NetworkRecords, NetworkRef};
use serde_json::Value;
use tracing::debug;

pub trait PoolApi {
    /// Every network record in the pool, keyed by handle.
    fn network_records(&self) -> Result<NetworkRecords, XapiError>;

    fn destroy_network(&self, network: &NetworkRef) -> Result<(), XapiError>;
}

impl PoolApi for Session {
    fn network_records(&self) -> Result<NetworkRecords, XapiError> {
        let value = self.call("network.get_all_records", &[])?;
        let records: NetworkRecords = serde_json::from_value(value)?;
        debug!(count = records.len(), "fetched network records");
        Ok(records)
    }

    fn destroy_network(&self, network: &NetworkRef) -> Result<(), XapiError> {
        self.call("network.destroy", &[Value::from(network.as_str())])?;
        Ok(())
    }
}
