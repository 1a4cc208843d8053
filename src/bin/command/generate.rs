use std::path::PathBuf;

use clap::Args;
use comfy_table::{ContentArrangement, Table};

use clash_compose::pipeline::{self, Generated, Request};

use crate::error::Error;

#[derive(Debug, Args)]
pub struct Options {
    #[arg(long = "mapping", short = 'm', help = "Port-mapping table (JSON)")]
    mapping_path: PathBuf,

    #[arg(
        long = "proxies",
        short = 'p',
        help = "Upstream proxy list, one `ip:port:username:password` record per line"
    )]
    proxy_list_path: PathBuf,

    #[arg(long = "base-config", short = 'c', help = "Base Clash profile (YAML)")]
    profile_path: PathBuf,

    #[arg(long = "output-dir", short = 'o', help = "Directory the merged profile is written into")]
    output_dir: PathBuf,
}

pub fn run(options: Options) -> Result<(), Error> {
    let request = Request {
        mapping_path: options.mapping_path,
        proxy_list_path: options.proxy_list_path,
        profile_path: options.profile_path,
        output_dir: options.output_dir,
    };

    let generated = pipeline::run(&request).map_err(|source| Error::Generate { source })?;

    write_summary_to(&mut std::io::stdout(), &generated)
        .map_err(|source| Error::WriteSummary { source })?;

    Ok(())
}

fn write_summary_to<W>(writer: &mut W, generated: &Generated) -> Result<(), std::io::Error>
where
    W: std::io::Write,
{
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Listener", "Port", "Relay group", "Upstream"]);

    for binding in &generated.bindings {
        table.add_row(vec![
            binding.listener.clone(),
            binding.port.to_string(),
            binding.relay_group.clone(),
            binding.upstream.clone(),
        ]);
    }

    writeln!(writer, "{table}")?;
    writeln!(
        writer,
        "Generated {} upstream proxies, wrote {}",
        generated.proxy_count,
        generated.output_path.display()
    )?;

    Ok(())
}
