use shutterbox_adapters::present_notice;
use shutterbox_application::NoticeSink;
use shutterbox_domain::Notice;
use tracing::info;

/// Terminal stand-in for alert dialogs and local notifications.
#[derive(Debug, Default)]
pub struct ConsoleNoticeSink;

impl NoticeSink for ConsoleNoticeSink {
    fn alert(&self, notice: &Notice) {
        println!("{}", present_notice(notice));
    }

    fn schedule_notification(&self, notice: &Notice) {
        info!(title = notice.title, "local notification scheduled");
        println!("notification: {}", present_notice(notice));
    }
}
