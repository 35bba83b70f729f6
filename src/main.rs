use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod read;
mod table;

use table::Table;

const DATA_FILE: &str = "Filmes.csv";

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let path = Path::new(DATA_FILE);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Dump the file twice: once plain and once mirroring the
    // scoped-handle pass; every handle closes at scope exit.
    read::dump(path, &mut out)?;
    read::dump(path, &mut out)?;
    out.flush()?;

    let table = Table::from_path(path)?;
    info!(
        rows = table.len(),
        columns = table.headers().len(),
        "loaded table"
    );
    Ok(())
}
