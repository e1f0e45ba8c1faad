use shutterbox_domain::AssetId;

#[derive(Debug, Clone, Default)]
pub struct BootstrapStoreCommand;

#[derive(Debug, Clone)]
pub struct CaptureImageCommand {
    pub image_data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ImportFolderCommand {
    pub folder: String,
}

#[derive(Debug, Clone, Default)]
pub struct ListAssetsCommand;

#[derive(Debug, Clone, Default)]
pub struct OpenGalleryCommand;

#[derive(Debug, Clone)]
pub struct UploadAssetCommand {
    pub asset_id: AssetId,
}

#[derive(Debug, Clone, Default)]
pub struct UploadPendingCommand;

#[derive(Debug, Clone)]
pub struct DeleteAssetCommand {
    pub asset_id: AssetId,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteAllCommand;
