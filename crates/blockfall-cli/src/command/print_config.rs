use crate::{command::config::ConfigArg, util};

pub(crate) fn run(arg: &ConfigArg) -> anyhow::Result<()> {
    let config = arg.resolve()?;
    util::write_json_stdout(&config)
}
