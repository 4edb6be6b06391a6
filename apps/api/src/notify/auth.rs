/// Supplies the address job alerts go to. `None` means nobody is signed up,
/// and notifiers must quietly skip sending.
pub trait AuthContext: Send + Sync {
    fn notification_address(&self) -> Option<String>;
}

/// A recipient fixed at startup (`NOTIFY_EMAIL`).
#[derive(Debug, Clone, Default)]
pub struct FixedRecipient(Option<String>);

impl FixedRecipient {
    pub fn new(address: Option<String>) -> Self {
        Self(
            address
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
        )
    }
}

impl AuthContext for FixedRecipient {
    fn notification_address(&self) -> Option<String> {
        self.0.clone()
    }
}
