mod config;
mod host;
mod metadata;
mod proxy;
mod proxy_group;
mod proxy_provider;
mod rule;
mod rule_provider;
mod settings;
mod snapshot;
mod subscription;

pub use config::*;
pub use host::*;
pub use metadata::*;
pub use proxy::*;
pub use proxy_group::*;
pub use proxy_provider::*;
pub use rule::*;
pub use rule_provider::*;
pub use settings::*;
pub use snapshot::*;
pub use subscription::*;
