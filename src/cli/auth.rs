use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    Res, config,
    management::{CredentialProvider, StaticToken, TokenManager},
    spotify,
    types::PkceToken,
};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    spotify::auth::auth(shared_state).await
}

const ACCESS_TOKEN_HINT: &str = concat!(
    "Please run ",
    env!("CARGO_PKG_NAME"),
    " auth or set SPOTIFY_ACCESS_TOKEN"
);

/// Picks the credential source for this run: a static `SPOTIFY_ACCESS_TOKEN`
/// wins over the cached PKCE token.
pub(crate) async fn credentials() -> Res<Arc<dyn CredentialProvider>> {
    if let Some(token) = config::spotify_access_token() {
        return Ok(Arc::new(StaticToken::new(token)));
    }

    match TokenManager::load().await {
        Ok(manager) => Ok(Arc::new(manager)),
        Err(e) => Err(format!("{}\n{}", e, ACCESS_TOKEN_HINT).into()),
    }
}
