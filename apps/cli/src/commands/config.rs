//! `travelmate config show|init`.

use travelmate_client::{ClientConfig, ClientError};

use crate::cli::{ConfigAction, ConfigArgs, GlobalArgs};
use crate::error::CliResult;
use crate::output::print_json;

pub fn run(args: ConfigArgs, config: &ClientConfig, global: &GlobalArgs) -> CliResult<()> {
    // Never echo the token back.
    let mut shown = config.clone();
    if shown.session.token.is_some() {
        shown.session.token = Some("<redacted>".to_string());
    }

    match args.action {
        ConfigAction::Show => {
            if global.json {
                return print_json(&shown);
            }
            let text = toml::to_string_pretty(&shown).map_err(ClientError::from)?;
            print!("{}", text);
            Ok(())
        }
        ConfigAction::Init => {
            let path = config.save(global.config.clone())?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}
