/// Session status keyword shown by the indicator light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    Starting,
    Active,
    Listening,
    Processing,
    Speaking,
    Stopping,
    Error,
}

impl Status {
    /// Stable class name for the indicator element.
    pub fn indicator_class(&self) -> &'static str {
        match self {
            Status::Ready => "status-ready",
            Status::Starting => "status-starting",
            Status::Active => "status-active",
            Status::Listening => "status-listening",
            Status::Processing => "status-processing",
            Status::Speaking => "status-speaking",
            Status::Stopping => "status-stopping",
            Status::Error => "status-error",
        }
    }
}

/// Maps a status keyword plus a human-readable message to the indicator.
#[derive(Debug, Default)]
pub struct StatusPresenter {
    status: Status,
    message: String,
}

impl StatusPresenter {
    pub fn set(&mut self, status: Status, message: impl Into<String>) {
        self.status = status;
        self.message = message.into();
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
