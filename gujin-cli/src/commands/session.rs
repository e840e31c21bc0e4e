//! Interactive search session with a synchronized headless map.
//!
//! Reads place names from stdin, resolves each one, and keeps a headless
//! MapView in sync with the session's result list and active selection.
//! `:layer <mode>` switches the base-layer mode, `:open` prints links that
//! open the active result in an external map app, `:quit` exits.

use super::{print_result, query};
use crate::error::CliError;
use clap::Args;
use gujin::config::MapSettings;
use gujin::map::{LayerMode, MapView};
use gujin::place::{PlaceResult, SearchSession};
use gujin::resolver::fallback;
use gujin::sdk::{HeadlessSdk, SdkLoader, SurfaceRecorder};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::warn;

#[derive(Args)]
pub struct SessionArgs {
    /// Resolution backend base URL
    #[arg(long, default_value = gujin::config::DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Skip the backend and use only the builtin gazetteer
    #[arg(long)]
    pub offline: bool,
}

pub async fn run(args: SessionArgs) -> Result<(), CliError> {
    let sdk = Arc::new(HeadlessSdk::new());
    let recorder = sdk.recorder();
    let loader = Arc::new(SdkLoader::ready(sdk));
    let view = MapView::new(loader, MapSettings::default());

    view.mount("session-map")
        .await
        .map_err(|e| CliError::Io(io::Error::other(e)))?;
    if let Some(e) = view.load_error().await {
        return Err(CliError::Map(e));
    }

    let mut session = SearchSession::new();

    println!("古今地名对照 — interactive session");
    println!(
        "Enter an ancient place name (e.g. {}),",
        fallback::known_names()[..3].join("、")
    );
    println!(":layer standard|satellite|terrain to switch modes,");
    println!(":open for external map app links, :quit to exit.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix(':') {
            if !handle_command(command, &view, &session).await {
                break;
            }
        } else {
            resolve_and_show(input, &args, &mut session, &view, &recorder).await;
        }
    }

    view.teardown().await;
    Ok(())
}

/// Handles a `:command`. Returns false when the session should end.
async fn handle_command(command: &str, view: &MapView, session: &SearchSession) -> bool {
    match command.split_whitespace().collect::<Vec<_>>().as_slice() {
        ["quit"] | ["q"] => return false,
        ["layer", name] => match LayerMode::parse(name) {
            Some(mode) => {
                view.set_layer(mode).await;
                println!("layer mode: {}", mode.name());
            }
            None => println!("unknown layer mode '{}' (standard|satellite|terrain)", name),
        },
        ["open"] => match session.active_result() {
            Some(result) => {
                println!("在地图中查看 {}:", result.key());
                for (label, url) in map_app_links(result) {
                    println!("  {}: {}", label, url);
                }
            }
            None => println!("no active result to open"),
        },
        _ => println!("unknown command ':{}'", command),
    }
    true
}

/// External map app links for a result, as (label, URL) pairs.
fn map_app_links(result: &PlaceResult) -> Vec<(&'static str, String)> {
    let name = format!("{} → {}", result.ancient_name, result.modern_name);
    let encoded = urlencoding::encode(&name);
    let (lat, lon) = (result.latitude, result.longitude);
    vec![
        (
            "高德地图",
            format!("https://uri.amap.com/marker?position={lon},{lat}&name={encoded}"),
        ),
        (
            "百度地图",
            format!(
                "https://api.map.baidu.com/marker?location={lat},{lon}&title={encoded}&content={encoded}&output=html&coord_type=wgs84"
            ),
        ),
        (
            "腾讯地图",
            format!("https://apis.map.qq.com/uri/v1/marker?marker=coord:{lat},{lon};title:{encoded}"),
        ),
        (
            "Google 地图",
            format!("https://www.google.com/maps/search/?api=1&query={lat},{lon}"),
        ),
    ]
}

async fn resolve_and_show(
    name: &str,
    args: &SessionArgs,
    session: &mut SearchSession,
    view: &MapView,
    recorder: &SurfaceRecorder,
) {
    let query_args = query::QueryArgs {
        ancient_name: name.to_string(),
        backend_url: args.backend_url.clone(),
        offline: args.offline,
    };
    let result = match query::resolve(&query_args).await {
        Ok(result) => result,
        Err(e) => {
            warn!(query = name, error = %e, "resolution failed");
            println!("查询失败: {}", e);
            return;
        }
    };

    print_result(&result);
    session.record(result);
    view.set_results(session.results().to_vec()).await;
    view.set_active(session.active().cloned()).await;

    println!(
        "[map] {} marker(s), active: {}, overlays: {:?}",
        view.marker_count().await,
        session
            .active()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "none".to_string()),
        recorder.attached_overlays(),
    );
}
