//! Fetch command - resolve a position and list the nearest photos.

use nearby_photos::config::{ConfigFile, Environment};
use nearby_photos::controller::{NearbyPhotosController, ReloadError};
use nearby_photos::coord::Coordinates;
use nearby_photos::position::{AlwaysGranted, DevicePositionProvider, FixedGeolocator};
use nearby_photos::presentation::{PresentationAdapter, PresentationSnapshot};
use nearby_photos::service::{AsyncReqwestClient, PhotoServiceClient};
use tracing::info;

use crate::error::CliError;
use crate::render::TerminalRenderer;
use crate::runner::CliRunner;

/// Arguments for the fetch command.
pub struct FetchArgs {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub base_url: Option<String>,
    pub environment: Option<Environment>,
    pub repeat: u32,
}

/// Run the fetch command.
pub fn run(args: FetchArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("fetch");

    let mut config = runner.config().clone();
    apply_arguments(&mut config, &args);

    let coordinates = resolve_coordinates(args.lat, args.lng, &config)?;
    let endpoint = config.backend.endpoint_url()?;
    info!(endpoint = %endpoint, %coordinates, "Fetching nearby photos");

    let http = AsyncReqwestClient::with_timeout(config.network.request_timeout())
        .map_err(CliError::HttpClient)?;
    let service = PhotoServiceClient::new(http, endpoint)
        .with_retry_policy(config.network.retry_policy())
        .with_request_timeout(config.network.request_timeout());
    let position = DevicePositionProvider::with_options(
        AlwaysGranted,
        FixedGeolocator::new(coordinates),
        config.position.options(),
    );
    let controller = NearbyPhotosController::new(position, service);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let mut renderer = TerminalRenderer::default();
    let last = runtime.block_on(async {
        let mut last = PresentationSnapshot::default();
        for cycle in 1..=args.repeat.max(1) {
            if cycle > 1 {
                println!();
            }
            last = run_cycle(&controller, &mut renderer).await?;
        }
        Ok::<_, ReloadError>(last)
    })?;

    match last.error_message {
        Some(message) => Err(CliError::Fetch(message)),
        None => Ok(()),
    }
}

/// Trigger one reload and render every state it passes through.
async fn run_cycle<P, S>(
    controller: &NearbyPhotosController<P, S>,
    renderer: &mut TerminalRenderer,
) -> Result<PresentationSnapshot, ReloadError>
where
    P: nearby_photos::position::PositionProvider + 'static,
    S: nearby_photos::service::PhotoService + 'static,
{
    let mut rx = controller.subscribe();
    controller.reload()?;

    loop {
        let snapshot = PresentationSnapshot::from(&*rx.borrow_and_update());
        renderer.render(&snapshot);
        if snapshot.can_reload() {
            return Ok(snapshot);
        }
        if rx.changed().await.is_err() {
            return Ok(controller.view());
        }
    }
}

fn apply_arguments(config: &mut ConfigFile, args: &FetchArgs) {
    if let Some(url) = &args.base_url {
        config.backend.url = Some(url.clone());
    }
    if let Some(environment) = args.environment {
        config.backend.environment = environment;
    }
}

/// Command line coordinates take precedence over the configured fixed position.
fn resolve_coordinates(
    lat: Option<f64>,
    lng: Option<f64>,
    config: &ConfigFile,
) -> Result<Coordinates, CliError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => {
            Coordinates::new(lat, lng).map_err(|e| CliError::Config(e.to_string()))
        }
        (None, None) => config.position.fixed_coordinates()?.ok_or_else(|| {
            CliError::Config(
                "no position available; pass --lat and --lng or set position.latitude and position.longitude"
                    .to_string(),
            )
        }),
        _ => Err(CliError::Config(
            "--lat and --lng must be given together".to_string(),
        )),
    }
}
