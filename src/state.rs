use crate::config::Config;
use crate::deploy::DeployRunner;
use crate::lightsail::InstanceSource;
use crate::mappings::InstanceMappings;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn InstanceSource>,
    pub deployer: Arc<dyn DeployRunner>,
    pub mappings: Arc<InstanceMappings>,
}
