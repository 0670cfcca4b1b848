use journal_censor::Censor;
use std::env::args;
use tracing_subscriber::EnvFilter;

pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_writer(std::io::stderr)
        .init();

    let input = args().skip(1).collect::<Vec<_>>().join(" ");
    let censored = Censor::default().censor_and_analyze(&input);
    println!(
        "\"{}\" -> \"{}\" ({} redacted, {} skipped)",
        input,
        censored.text,
        censored.redactions.len(),
        censored.rejections
    );
    for redaction in &censored.redactions {
        println!(
            "  {:?} at {}..{}",
            redaction.token,
            redaction.start,
            redaction.start + redaction.len
        );
    }
}
