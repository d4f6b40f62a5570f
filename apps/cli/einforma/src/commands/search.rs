use super::write_out;
use crate::cli::SearchArgs;
use crate::error::AppError;
use crate::views;

use lookup_core::LookupService;
use models::{QueryKind, QueryParameters, QueryParametersBuilder};

use std::io::Write;

use log::{debug, info};

/// Validate the search form the way the interactive form does.
pub fn build_parameters(args: &SearchArgs) -> Result<QueryParameters, AppError> {
    let kind: QueryKind = args.kind.parse()?;

    let mut builder = QueryParametersBuilder::default()
        .with_term(args.term.as_str())
        .with_kind(kind);
    if let Some(location) = &args.location {
        builder = builder.with_location(location.as_str());
    }
    if let Some(sector) = &args.sector {
        builder = builder.with_sector(sector.as_str());
    }

    Ok(builder.build()?)
}

/// Dispatch the search, then render whatever the result cache holds.
pub async fn run(
    service: &LookupService,
    args: SearchArgs,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let params = match build_parameters(&args) {
        Ok(params) => params,
        Err(e) => {
            // A rejected form leaves no stale result on display.
            service.cache().clear().await;
            return Err(e);
        }
    };
    let credentials = service.preferences().get();

    let outcome = service
        .dispatcher()
        .dispatch(&params, credentials.as_ref())
        .await?;
    info!(
        "Search {} finished with {} data",
        outcome.dispatch_id, outcome.source
    );

    if service.cache().is_empty().await {
        debug!("Result cache is empty after search {}", outcome.dispatch_id);
    }
    let cached = service.cache().get().await;

    let text = if args.json {
        let json = serde_json::to_string_pretty(&cached)
            .map_err(|e| AppError::app(format!("Failed to encode result: {e}")))?;
        format!("{json}\n")
    } else {
        views::render(cached.as_ref(), args.view)
    };

    write_out(out, &text)
}
