/// An app access token from a client-credentials grant.
///
/// Only lives for the duration of a run; it is never written to disk.
#[derive(Clone)]
pub struct AppAccessToken(pub(crate) String);

impl AppAccessToken {
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AppAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AppAccessToken(..)")
    }
}
