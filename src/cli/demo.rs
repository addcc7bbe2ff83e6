//! `demo`: reconcile the bundled sample upload set.

use super::generate::{generate_and_print, open_dashboard};
use super::output::{self, Tone};
use super::ReportArgs;
use crate::app::Config;
use crate::domain::Source;
use crate::error::Result;

pub async fn execute(config: &Config, args: &ReportArgs) -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));

    let dashboard = open_dashboard(config, args);
    dashboard.load_demo()?;
    output::success("Demo files loaded");
    for source in Source::ALL {
        output::field(
            config.platforms.name_of(source),
            dashboard.upload_status(source),
        );
    }
    output::hint(&format!(
        "figures are simulated; pass {} for repeatable output",
        output::paint("--seed", Tone::Highlight)
    ));

    generate_and_print(&dashboard, config, args).await
}
