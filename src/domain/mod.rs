//! Host records and the inventory built from them
//!
//! Provides the classification of Mackerel hosts into Ansible groups and host variables.

pub mod host;
pub mod inventory;
pub mod private_ip;
