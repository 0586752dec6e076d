use chrono::Utc;
use tracing::{debug, info};

use super::DispatchError;
use crate::catalog::CatalogStore;
use crate::host::Host;
use crate::system::opener::Opener;

/// The timestamp is committed before the opener runs, so a failed open still
/// counts as played. A path with no catalog entry is opened anyway.
pub fn launch_program(
    store: &CatalogStore,
    opener: &dyn Opener,
    host: &mut dyn Host,
    path: &str,
) -> Result<(), DispatchError> {
    let matched = store.touch(path, Utc::now().timestamp())?;
    if !matched {
        debug!(path, "launching a path that is not in the catalog");
    }
    refresh_view(host);

    info!(path, "launching program");
    opener.open(path)?;
    Ok(())
}

pub fn refresh_view(host: &mut dyn Host) {
    host.refresh_container();
    host.refresh_widgets();
}
