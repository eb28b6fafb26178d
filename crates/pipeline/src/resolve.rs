//! The two remote resolution stages: name → identifier, identifier → coordinate.
//!
//! Both walk their input strictly one request at a time with a fixed pause
//! after each request. A failed item is reported and left out of the
//! result map; only cancellation ends a stage early, and then the partial
//! map is dropped.

use crate::cancel::CancelToken;
use crate::client::LookupClient;
use crate::error::{LookupFailure, PipelineError};
use crate::model::{CoordinateMap, IdentifierMap};
use crate::normalize::query_token;
use crate::report::Reporter;

/// Resolve each unique name to its remote identifier, in the given order.
pub fn resolve_identifiers(
    client: &LookupClient,
    names: &[String],
    cancel: &CancelToken,
    reporter: &dyn Reporter,
) -> Result<IdentifierMap, PipelineError> {
    let mut ids = IdentifierMap::new();

    for name in names {
        cancel.check()?;

        let token = query_token(name);
        if token.is_empty() {
            reporter.warning(&format!(
                "failed to get id for {name}: {}",
                LookupFailure::EmptyQuery
            ));
            continue;
        }

        let outcome = client.identifier_for(&token);
        cancel.check()?;

        match outcome {
            Ok(id) => {
                reporter.progress(&format!("got id {id} for {name}"));
                ids.insert(name.clone(), id);
            }
            Err(failure) => {
                reporter.warning(&format!("failed to get id for {name}: {failure}, skipping"));
            }
        }

        cancel.sleep(client.request_delay())?;
    }

    Ok(ids)
}

/// Resolve each identifier to a coordinate, keyed by the originating name.
///
/// Identifier 0 means "no such brewery" and is never sent to the service.
pub fn resolve_coordinates(
    client: &LookupClient,
    ids: &IdentifierMap,
    cancel: &CancelToken,
    reporter: &dyn Reporter,
) -> Result<CoordinateMap, PipelineError> {
    let mut coords = CoordinateMap::new();

    for (name, &id) in ids {
        if id == 0 {
            reporter.progress(&format!("id for {name} is 0, skipping coordinate lookup"));
            continue;
        }

        cancel.check()?;
        let outcome = client.coordinates_for(id);
        cancel.check()?;

        match outcome {
            Ok(c) => {
                reporter.progress(&format!(
                    "got lat/lng {}/{} for {name}",
                    c.latitude, c.longitude
                ));
                coords.insert(name.clone(), c);
            }
            Err(failure) => {
                reporter.warning(&format!(
                    "failed to get lat/lng for {name} (id {id}): {failure}, skipping"
                ));
            }
        }

        cancel.sleep(client.request_delay())?;
    }

    Ok(coords)
}
