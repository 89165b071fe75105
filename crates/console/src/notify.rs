use service::notify::{Notice, NoticeLevel, Notifier};
use tracing::{error, info, warn};

/// Surfaces notices through the log stream. A printed line is transient by
/// nature; the scrollback dismisses it without blocking anything.
#[derive(Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => info!("{}", notice.text),
            NoticeLevel::Warning => warn!("{}", notice.text),
            NoticeLevel::Error => error!("{}", notice.text),
        }
    }
}
