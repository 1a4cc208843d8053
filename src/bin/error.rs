use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not generate the merged configuration, error: {}", source))]
    Generate { source: clash_compose::pipeline::Error },

    #[snafu(display("Could not write the summary report, error: {}", source))]
    WriteSummary { source: std::io::Error },
}
