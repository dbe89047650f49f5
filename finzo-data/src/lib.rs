pub mod rule_config;
pub mod scenario_loader;
pub mod slab_loader;

pub use rule_config::{RuleSetConfig, RuleSetError, load_rule_set, load_rule_set_files};
pub use scenario_loader::ScenarioLoadError;
pub use slab_loader::{SlabLoader, SlabLoaderError, SlabRecord};
