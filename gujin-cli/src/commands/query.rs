//! One-shot place name resolution.

use super::print_result;
use crate::error::CliError;
use clap::Args;
use gujin::config::BackendSettings;
use gujin::place::PlaceResult;
use gujin::resolver::{fallback, AsyncReqwestClient, PlaceResolver, ResolverError};

#[derive(Args)]
pub struct QueryArgs {
    /// Ancient place name to resolve (e.g. 长安)
    pub ancient_name: String,

    /// Resolution backend base URL
    #[arg(long, default_value = gujin::config::DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Skip the backend and use only the builtin gazetteer
    #[arg(long)]
    pub offline: bool,
}

pub async fn run(args: QueryArgs) -> Result<(), CliError> {
    let result = resolve(&args).await?;
    print_result(&result);
    Ok(())
}

/// Resolves against the backend, or the builtin gazetteer when offline.
pub async fn resolve(args: &QueryArgs) -> Result<PlaceResult, CliError> {
    if args.offline {
        return fallback::lookup(&args.ancient_name).ok_or_else(|| {
            CliError::Resolve(ResolverError::Rejected {
                status: 404,
                reason: format!(
                    "'{}' not in builtin gazetteer (known: {})",
                    args.ancient_name.trim(),
                    fallback::known_names().join("、")
                ),
            })
        });
    }

    let settings = BackendSettings {
        base_url: args.backend_url.clone(),
        ..Default::default()
    };
    let http = AsyncReqwestClient::new(settings.timeout).map_err(CliError::Resolve)?;
    let resolver = PlaceResolver::new(http, &settings);
    Ok(resolver.resolve(&args.ancient_name).await?)
}
