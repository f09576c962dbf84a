use std::{
    fs::File,
    io::{self, Write as _},
    path::Path,
};

use anyhow::Context;

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Writes `value` to stdout as pretty-printed JSON followed by a newline.
pub fn write_json_stdout<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut writer = io::stdout().lock();
    serde_json::to_writer_pretty(&mut writer, value).context("Failed to write JSON to stdout")?;
    writeln!(writer).context("Failed to write newline after JSON to stdout")?;
    writer.flush().context("Failed to flush stdout")?;
    Ok(())
}
