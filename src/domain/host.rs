//! Host records as returned by the Mackerel hosts API

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

// Fields the API may send as `null` are read as their empty value.

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Host {
    pub name: String,
    /// Service name to the role names the host holds in that service.
    #[serde(default, deserialize_with = "roles_or_empty")]
    pub roles: BTreeMap<String, Vec<String>>,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub host_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interfaces: Vec<Interface>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Interface {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, rename = "ipAddress")]
    pub ip_address: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn roles_or_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let roles: Option<BTreeMap<String, Option<Vec<String>>>> = Option::deserialize(deserializer)?;
    Ok(roles
        .unwrap_or_default()
        .into_iter()
        .map(|(service, roles)| (service, roles.unwrap_or_default()))
        .collect())
}

#[derive(Debug, Deserialize)]
pub(crate) struct HostsResponse {
    pub hosts: Vec<Host>,
}
