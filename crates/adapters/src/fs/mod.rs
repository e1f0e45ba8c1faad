mod clock;
mod media;
mod scanner;

pub use clock::SystemClock;
pub use media::FsMediaStore;
pub use scanner::WalkdirFileScanner;
