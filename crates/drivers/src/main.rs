mod config;
mod logging;
mod notices;

use std::process::ExitCode;
use std::sync::Arc;

use config::AppConfig;
use notices::ConsoleNoticeSink;
use shutterbox_adapters::{
    present_asset_row, present_assets_json, present_import_report, present_upload_outcome,
    present_upload_summary, FsMediaStore, HttpTransport, ImageThumbnailGenerator,
    SimulatedTransport, SqliteAssetRepository, SystemClock, WalkdirFileScanner,
};
use shutterbox_application::{
    ApplicationError, ApplicationService, AssetStore, BootstrapStoreCommand, CaptureImageCommand,
    DeleteAllCommand, DeleteAssetCommand, Gallery, ImportFolderCommand, ListAssetsCommand,
    OpenGalleryCommand, Transport, UploadAssetCommand, UploadPendingCommand,
};
use shutterbox_domain::AssetId;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_logging();
    let args: Vec<String> = std::env::args().collect();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::from(1);
        }
    };

    let service = match build_application_service(&config) {
        Ok(service) => service,
        Err(error) => {
            eprintln!("failed to start shutterbox: {error}");
            return ExitCode::from(1);
        }
    };
    if let Err(error) = service.bootstrap_store(BootstrapStoreCommand) {
        eprintln!("failed to bootstrap shutterbox: {error}");
        return ExitCode::from(1);
    }

    let command = parse_command(&args);
    match run_command(command, &service).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            print_usage();
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_application_service(config: &AppConfig) -> Result<ApplicationService, ApplicationError> {
    let repository = SqliteAssetRepository::open(&config.catalog_path)?;
    let store = Arc::new(AssetStore::new(Box::new(repository), Box::new(SystemClock)));

    let transport: Arc<dyn Transport> = match &config.upload.endpoint {
        Some(endpoint) => {
            info!(%endpoint, "uploading over http");
            Arc::new(HttpTransport::new(endpoint.clone(), config.upload.timeout())?)
        }
        None => {
            let simulated = SimulatedTransport::new(
                config.upload.simulated_delay(),
                config.upload.simulated_success_rate,
            );
            info!(
                success_rate = simulated.success_rate(),
                "no upload endpoint configured, simulating uploads"
            );
            Arc::new(simulated)
        }
    };

    Ok(ApplicationService::new(
        store,
        transport,
        Box::new(WalkdirFileScanner),
        Box::new(ImageThumbnailGenerator),
        Box::new(FsMediaStore::new(config.media_dir.clone())),
        Arc::new(ConsoleNoticeSink),
        config.thumbnail,
    ))
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Capture { path: String },
    Import { folder: String },
    List { json: bool },
    Upload { asset_id: AssetId },
    UploadPending,
    Delete { asset_id: AssetId },
    DeleteAll,
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn parse_command(args: &[String]) -> Result<Command, CommandError> {
    if args.len() <= 1 {
        return Ok(Command::List { json: false });
    }

    match args[1].as_str() {
        "capture" => Ok(Command::Capture {
            path: required_arg(args, "missing image path")?,
        }),
        "import" => Ok(Command::Import {
            folder: required_arg(args, "missing folder path")?,
        }),
        "list" => match args.get(2).map(String::as_str) {
            None => Ok(Command::List { json: false }),
            Some("--json") => Ok(Command::List { json: true }),
            Some(other) => Err(CommandError::Usage(format!("unknown list flag: {other}"))),
        },
        "upload" => Ok(Command::Upload {
            asset_id: parse_asset_id(&required_arg(args, "missing asset id")?)?,
        }),
        "upload-pending" => Ok(Command::UploadPending),
        "delete" => Ok(Command::Delete {
            asset_id: parse_asset_id(&required_arg(args, "missing asset id")?)?,
        }),
        "delete-all" => Ok(Command::DeleteAll),
        other => Err(CommandError::Usage(format!("unknown command: {other}"))),
    }
}

fn required_arg(args: &[String], missing: &str) -> Result<String, CommandError> {
    args.get(2)
        .cloned()
        .ok_or_else(|| CommandError::Usage(missing.to_string()))
}

fn parse_asset_id(raw: &str) -> Result<AssetId, CommandError> {
    AssetId::parse(raw).map_err(|error| CommandError::Usage(error.to_string()))
}

fn runtime(context: &str) -> impl Fn(ApplicationError) -> CommandError + '_ {
    move |error| CommandError::Runtime(format!("{context}: {error}"))
}

async fn run_command(
    command: Result<Command, CommandError>,
    service: &ApplicationService,
) -> Result<(), CommandError> {
    match command? {
        Command::Capture { path } => {
            let image_data = std::fs::read(&path)
                .map_err(|error| CommandError::Runtime(format!("failed to read {path}: {error}")))?;
            let asset = service
                .capture_image(CaptureImageCommand { image_data })
                .map_err(runtime("capture failed"))?;
            println!("{}", present_asset_row(&asset));
            Ok(())
        }
        Command::Import { folder } => {
            let report = service
                .import_folder(ImportFolderCommand { folder })
                .map_err(runtime("import failed"))?;
            println!("{}", present_import_report(&report));
            Ok(())
        }
        Command::List { json } => {
            let assets = service
                .list_assets(ListAssetsCommand)
                .map_err(runtime("list failed"))?;
            if json {
                let rendered = present_assets_json(&assets).map_err(runtime("list failed"))?;
                println!("{rendered}");
                return Ok(());
            }
            if assets.is_empty() {
                println!("no images in gallery");
                return Ok(());
            }
            for asset in &assets {
                println!("{}", present_asset_row(asset));
            }
            Ok(())
        }
        Command::Upload { asset_id } => {
            let label = asset_id.to_string();
            let outcome = service
                .upload_asset(
                    UploadAssetCommand { asset_id },
                    |uploading| {
                        if uploading {
                            println!("uploading {label}...");
                        }
                    },
                    |_| {},
                )
                .await;
            match outcome {
                Ok(outcome) => {
                    println!("{}", present_upload_outcome(&label, &outcome));
                    if outcome.succeeded() {
                        Ok(())
                    } else {
                        Err(CommandError::Runtime(format!("{label} was not uploaded")))
                    }
                }
                Err(ApplicationError::AlreadyUploaded(_)) => {
                    println!("{label}\talready uploaded");
                    Ok(())
                }
                Err(error) => Err(runtime("upload failed")(error)),
            }
        }
        Command::UploadPending => {
            let mut gallery = service
                .open_gallery(OpenGalleryCommand)
                .map_err(runtime("upload failed"))?;
            render_progress(&gallery);

            let summary = gallery
                .follow(service.upload_pending(UploadPendingCommand), render_progress)
                .await
                .map_err(runtime("upload failed"))?;
            println!("{}", present_upload_summary(&summary));
            Ok(())
        }
        Command::Delete { asset_id } => {
            service
                .delete_asset(DeleteAssetCommand {
                    asset_id: asset_id.clone(),
                })
                .map_err(runtime("delete failed"))?;
            println!("deleted {asset_id}");
            Ok(())
        }
        Command::DeleteAll => {
            let removed = service
                .delete_all(DeleteAllCommand)
                .map_err(runtime("delete failed"))?;
            println!("deleted {removed} image(s)");
            Ok(())
        }
    }
}

fn render_progress(gallery: &Gallery) {
    let uploaded = gallery
        .assets()
        .iter()
        .filter(|asset| asset.is_uploaded())
        .count();
    println!("gallery: {uploaded}/{} uploaded", gallery.len());
}

fn print_usage() {
    println!("usage:");
    println!("  shutterbox capture <image_file>");
    println!("  shutterbox import <folder>");
    println!("  shutterbox list [--json]");
    println!("  shutterbox upload <asset_id>");
    println!("  shutterbox upload-pending");
    println!("  shutterbox delete <asset_id>");
    println!("  shutterbox delete-all");
}
