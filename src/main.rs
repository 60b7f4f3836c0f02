use anyhow::Result;
use env_logger::Env;
use fillbeat::settings::PracticeSettings;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let settings = PracticeSettings::from_env()?;
    log::debug!("starting with {:?}", settings);
    fillbeat::repl::start(&settings)
}
