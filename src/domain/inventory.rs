//! Ansible dynamic inventory built from Mackerel hosts
//!
//! Hosts are grouped by service, role, type and status. Group names from different axes
//! share one namespace, so a role named like a status lands in the same group.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, trace, warn};

use crate::domain::host::Host;
use crate::domain::private_ip::is_private_ip;
use crate::mackerel_client::HostSource;

pub const META_KEY: &str = "_meta";
pub const ANSIBLE_HOST: &str = "ansible_host";
pub const EMPTY_LIST_DOCUMENT: &str = r#"{"_meta":{"hostvars":{}}}"#;
pub const EMPTY_HOST_DOCUMENT: &str = "{}";

/// Per-host variables handed to Ansible.
pub type HostVars = BTreeMap<String, Value>;

pub struct Inventory {
    source: Arc<dyn HostSource>,
    seen: HashSet<String>,
    groups: BTreeMap<String, Vec<String>>,
    host_vars: BTreeMap<String, HostVars>,
}

impl Inventory {
    pub fn new(source: Arc<dyn HostSource>) -> Self {
        Self {
            source,
            seen: HashSet::new(),
            groups: BTreeMap::new(),
            host_vars: BTreeMap::new(),
        }
    }

    pub fn groups(&self) -> &BTreeMap<String, Vec<String>> {
        &self.groups
    }

    pub fn host_vars(&self) -> &BTreeMap<String, HostVars> {
        &self.host_vars
    }

    /// Classifies a host. Only the first record seen for a given name has any effect.
    pub fn add_host(&mut self, host: &Host) {
        if self.seen.contains(&host.name) {
            trace!(host = %host.name, "host already classified");
            return;
        }

        for (service, roles) in &host.roles {
            if !service.is_empty() {
                self.push_group(service, &host.name);
            }
            for role in roles.iter().filter(|role| !role.is_empty()) {
                self.push_group(role, &host.name);
            }
        }

        if !host.host_type.is_empty() {
            self.push_group(&host.host_type, &host.name);
        }

        if !host.status.is_empty() {
            self.push_group(&host.status, &host.name);
        }

        // last private address wins
        for address in host
            .interfaces
            .iter()
            .filter_map(|interface| interface.ip_address.as_deref())
            .filter(|address| is_private_ip(address))
        {
            let vars = HostVars::from([(ANSIBLE_HOST.to_string(), Value::from(address))]);
            self.host_vars.insert(host.name.clone(), vars);
        }

        let ansible_host = self
            .host_vars
            .get(&host.name)
            .and_then(|vars| vars.get(ANSIBLE_HOST))
            .and_then(serde_json::Value::as_str);
        debug!(host = %host.name, ansible_host, "host classified");
        self.seen.insert(host.name.clone());
    }

    fn push_group(&mut self, group: &str, host_name: &str) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .push(host_name.to_string());
    }

    /// Fetches every host and renders the `--list` document.
    pub async fn list(&mut self) -> String {
        let hosts = match self.source.find_hosts().await {
            Ok(hosts) => hosts,
            Err(err) => {
                warn!(error = %err, "failed to fetch hosts, returning empty inventory");
                return EMPTY_LIST_DOCUMENT.to_string();
            }
        };

        for host in &hosts {
            self.add_host(host);
        }

        serde_json::to_string(&self.list_document())
            .unwrap_or_else(|_| EMPTY_LIST_DOCUMENT.to_string())
    }

    /// Fetches hosts matching `name` and renders the `--host` document.
    pub async fn host(&mut self, name: &str) -> String {
        let hosts = match self.source.find_hosts_by_name(name).await {
            Ok(hosts) => hosts,
            Err(err) => {
                warn!(host = %name, error = %err, "failed to fetch host, returning empty vars");
                return EMPTY_HOST_DOCUMENT.to_string();
            }
        };

        for host in &hosts {
            self.add_host(host);
        }

        serde_json::to_string(&self.host_document(name))
            .unwrap_or_else(|_| EMPTY_HOST_DOCUMENT.to_string())
    }

    pub fn list_document(&self) -> Value {
        let mut document = Map::new();
        for (group, hosts) in &self.groups {
            if group == META_KEY {
                warn!(group = %group, "group name is reserved, dropping it");
                continue;
            }
            document.insert(group.clone(), json!(hosts));
        }
        document.insert(
            META_KEY.to_string(),
            json!({ "hostvars": self.host_vars }),
        );
        Value::Object(document)
    }

    pub fn host_document(&self, name: &str) -> Value {
        match self.host_vars.get(name) {
            Some(vars) => json!(vars),
            None => json!({}),
        }
    }
}
