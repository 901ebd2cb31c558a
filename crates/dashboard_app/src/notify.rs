use dashboard_core::{Notice, NoticeKind};

/// Boundary to the notification collaborator. The engine only supplies the
/// notice payload; how it is shown is up to the implementation.
pub trait Notifier: Send {
    fn notify(&self, notice: &Notice);
}

/// Prints notices to stderr, one line each.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Info => "info",
            NoticeKind::Error => "error",
        };
        eprintln!("[{tag}] {} {}", notice.title, notice.description);
    }
}

#[cfg(test)]
pub mod test_support {
    use std::sync::{Arc, Mutex};

    use dashboard_core::Notice;

    use super::Notifier;

    /// Records notices for assertions.
    #[derive(Default, Clone)]
    pub struct RecordingNotifier {
        pub notices: Arc<Mutex<Vec<Notice>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &Notice) {
            self.notices.lock().unwrap().push(notice.clone());
        }
    }
}
