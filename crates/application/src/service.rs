use std::sync::Arc;

use futures::future::join_all;
use shutterbox_domain::{
    AssetId, ImageAsset, ImportReport, Notice, ThumbnailSpec, UploadOutcome, UploadState,
    UploadSummary,
};
use tracing::{debug, info, warn};

use crate::{
    ApplicationError, AssetStore, BootstrapStoreCommand, CaptureImageCommand, DeleteAllCommand,
    DeleteAssetCommand, FileScanner, Gallery, ImportFolderCommand, ListAssetsCommand, MediaStore,
    NoticeSink, OpenGalleryCommand, ThumbnailGenerator, Transport, UploadAssetCommand,
    UploadCoordinator, UploadPendingCommand,
};

pub struct ApplicationService {
    store: Arc<AssetStore>,
    uploads: UploadCoordinator,
    scanner: Box<dyn FileScanner>,
    thumbnails: Box<dyn ThumbnailGenerator>,
    media: Box<dyn MediaStore>,
    notices: Arc<dyn NoticeSink>,
    thumbnail_spec: ThumbnailSpec,
}

impl ApplicationService {
    pub fn new(
        store: Arc<AssetStore>,
        transport: Arc<dyn Transport>,
        scanner: Box<dyn FileScanner>,
        thumbnails: Box<dyn ThumbnailGenerator>,
        media: Box<dyn MediaStore>,
        notices: Arc<dyn NoticeSink>,
        thumbnail_spec: ThumbnailSpec,
    ) -> Self {
        let uploads = UploadCoordinator::new(Arc::clone(&store), transport, Arc::clone(&notices));
        Self {
            store,
            uploads,
            scanner,
            thumbnails,
            media,
            notices,
            thumbnail_spec,
        }
    }

    pub fn store(&self) -> &Arc<AssetStore> {
        &self.store
    }

    pub fn bootstrap_store(&self, _command: BootstrapStoreCommand) -> Result<(), ApplicationError> {
        self.thumbnail_spec.validate()?;
        self.store.initialize()
    }

    pub fn capture_image(
        &self,
        command: CaptureImageCommand,
    ) -> Result<ImageAsset, ApplicationError> {
        if command.image_data.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "image data must not be empty".to_string(),
            ));
        }

        let thumbnail = self
            .thumbnails
            .generate(&command.image_data, self.thumbnail_spec)?;
        debug!(
            width = thumbnail.width,
            height = thumbnail.height,
            "thumbnail generated"
        );
        let source_uri = self.media.persist_original(&command.image_data)?;

        match self.store.create(
            Some(command.image_data),
            Some(thumbnail.data),
            Some(source_uri.clone()),
        ) {
            Ok(asset) => Ok(asset),
            Err(error) => {
                self.discard_original(&source_uri);
                Err(error)
            }
        }
    }

    pub fn import_folder(
        &self,
        command: ImportFolderCommand,
    ) -> Result<ImportReport, ApplicationError> {
        if command.folder.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "folder path must not be empty".to_string(),
            ));
        }

        let scan = self.scanner.scan_supported(&command.folder)?;
        let mut report = ImportReport {
            scanned_files: scan.scanned_files,
            supported_files: scan.supported_files,
            newly_imported: 0,
        };

        for file in scan.files {
            let image_data = self.scanner.read_file(&file.canonical_path)?;
            match self.capture_image(CaptureImageCommand { image_data }) {
                Ok(_) => report.newly_imported += 1,
                Err(ApplicationError::Decode(reason)) => {
                    warn!(path = %file.canonical_path.display(), %reason, "skipping undecodable file");
                }
                Err(error) => return Err(error),
            }
        }

        info!(
            scanned = report.scanned_files,
            imported = report.newly_imported,
            "folder import finished"
        );
        Ok(report)
    }

    pub fn list_assets(
        &self,
        _command: ListAssetsCommand,
    ) -> Result<Vec<ImageAsset>, ApplicationError> {
        self.store.list()
    }

    pub fn open_gallery(&self, _command: OpenGalleryCommand) -> Result<Gallery, ApplicationError> {
        let gallery = Gallery::open(Arc::clone(&self.store))?;
        if gallery.is_empty() {
            self.notices.alert(&Notice::NO_IMAGES);
        }
        Ok(gallery)
    }

    pub async fn upload_asset<P, C>(
        &self,
        command: UploadAssetCommand,
        on_progress: P,
        on_complete: C,
    ) -> Result<UploadOutcome, ApplicationError>
    where
        P: Fn(bool) + Send,
        C: FnOnce(bool) + Send,
    {
        self.uploads
            .upload(&command.asset_id, on_progress, on_complete)
            .await
    }

    pub fn upload_state(&self, asset_id: &AssetId) -> UploadState {
        self.uploads.state_of(asset_id)
    }

    /// Uploads every asset that is not yet uploaded, all attempts in flight at
    /// once.
    pub async fn upload_pending(
        &self,
        _command: UploadPendingCommand,
    ) -> Result<UploadSummary, ApplicationError> {
        let pending: Vec<ImageAsset> = self
            .store
            .list()?
            .into_iter()
            .filter(|asset| !asset.is_uploaded())
            .collect();

        let attempts = pending
            .iter()
            .map(|asset| self.uploads.upload(&asset.id, |_| {}, |_| {}));
        let results = join_all(attempts).await;

        let mut summary = UploadSummary {
            attempted: results.len(),
            ..UploadSummary::default()
        };
        for (asset, result) in pending.iter().zip(results) {
            match result {
                Ok(UploadOutcome::Uploaded { .. }) => summary.uploaded += 1,
                Ok(UploadOutcome::Failed { .. }) => summary.failed += 1,
                Err(ApplicationError::AlreadyInProgress(_))
                | Err(ApplicationError::AlreadyUploaded(_)) => summary.skipped += 1,
                Err(error) => {
                    warn!(asset_id = %asset.id, %error, "upload attempt errored");
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }

    pub fn delete_asset(&self, command: DeleteAssetCommand) -> Result<(), ApplicationError> {
        let source_uri = self
            .store
            .find(&command.asset_id)?
            .and_then(|asset| asset.source_uri);
        self.store.delete(&command.asset_id)?;
        self.uploads.prune_settled();
        if let Some(uri) = source_uri {
            self.discard_original(&uri);
        }
        Ok(())
    }

    pub fn delete_all(&self, _command: DeleteAllCommand) -> Result<usize, ApplicationError> {
        let source_uris: Vec<String> = self
            .store
            .list()?
            .into_iter()
            .filter_map(|asset| asset.source_uri)
            .collect();
        let removed = self.store.delete_all()?;
        self.uploads.prune_settled();
        for uri in &source_uris {
            self.discard_original(uri);
        }
        self.notices.alert(&Notice::ALL_DELETED);
        Ok(removed)
    }

    /// Failures are logged and swallowed.
    fn discard_original(&self, uri: &str) {
        if let Err(error) = self.media.discard(uri) {
            warn!(%uri, %error, "failed to remove original");
        }
    }
}
