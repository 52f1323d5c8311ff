use crate::config::Config;
use crate::errors::AppResult;
use crate::server::CommandServer;

pub fn handle(port: u16, cfg: &Config) -> AppResult<()> {
    CommandServer::new(cfg.clone())?.run(port)
}
