pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod mackerel_client;

pub use domain::host::{Host, Interface};
pub use domain::inventory::{HostVars, Inventory};
pub use mackerel_client::{HostSource, MackerelClient};
