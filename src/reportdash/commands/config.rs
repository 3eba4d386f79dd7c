use crate::commands::{CmdMessage, CmdResult};
use crate::config::DashConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = DashConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => return Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Ok(value) => result.add_message(CmdMessage::info(value)),
            Err(e) => result.add_message(CmdMessage::error(e.to_string())),
        },
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(e.to_string()));
                return Ok(result);
            }
            config.save(config_dir)?;
            let shown = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            return Ok(result.with_config(config));
        }
    }

    Ok(result)
}
