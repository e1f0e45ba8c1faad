#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: &'static str,
}

impl Notice {
    pub const UPLOAD_SUCCEEDED: Notice = Notice {
        title: "Success",
        message: "Image uploaded successfully!",
    };

    pub const UPLOAD_FAILED: Notice = Notice {
        title: "Error",
        message: "Failed to upload image. Please try again.",
    };

    pub const UPLOAD_COMPLETE: Notice = Notice {
        title: "Upload Complete",
        message: "Your image has been successfully uploaded.",
    };

    pub const ALL_DELETED: Notice = Notice {
        title: "Success",
        message: "All images have been deleted.",
    };

    pub const NO_IMAGES: Notice = Notice {
        title: "No Images",
        message: "There are no images in the gallery.",
    };
}
