use casting_catalog::InMemoryCatalog;

/// Services shared by all handlers.
#[derive(Debug, Default)]
pub struct AppServices {
    pub catalog: InMemoryCatalog,
}

impl AppServices {
    pub fn new() -> Self {
        Self::default()
    }
}
