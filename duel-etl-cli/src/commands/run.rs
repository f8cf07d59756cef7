use duel_etl_lib::Overrides;

use crate::CliError;

/// Full extraction: scan, fetch card metadata, reconcile names.
pub(crate) fn run_all(overrides: Overrides, quiet: bool) -> Result<(), CliError> {
    let config = super::resolve(overrides)?;
    let dataset = super::scan::scan(&config, quiet)?;
    super::names::names(&config, dataset, quiet)
}
