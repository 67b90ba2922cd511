use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    Res, config, info,
    management::TokenManager,
    server::start_api_server,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// How long the user has to complete authorization in the browser.
const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the OAuth 2.0 PKCE authorization flow and persists the token.
///
/// 1. Generates a code verifier and its S256 challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the default browser
/// 4. Waits for the callback handler to exchange the code for a token
/// 5. Persists the token through [`TokenManager`]
///
/// If the browser cannot be opened the URL is printed so the user can open it
/// manually.
///
/// # Errors
///
/// Fails when configuration is missing, the authorization URL cannot be
/// built, no token arrives within two minutes, or the token cannot be saved.
pub async fn authorize(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<TokenManager> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let auth_url = authorize_url(&code_challenge)?;

    // Store verifier in shared state before the server can receive a callback
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    info!("Waiting for Spotify authorization...");
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    let token = token.ok_or("Authorization failed or timed out")?;
    let token_manager = TokenManager::new(token);
    token_manager.persist().await?;
    Ok(token_manager)
}

/// Builds the authorization URL for the given PKCE challenge.
pub fn authorize_url(code_challenge: &str) -> Res<Url> {
    let url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", config::spotify_client_id()?.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config::spotify_redirect_uri()?.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", config::spotify_scope().as_str()),
        ],
    )?;
    Ok(url)
}

/// Polls the shared state once a second until the callback stored a token.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.clone()) {
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

fn into_token(response: TokenResponse) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response.refresh_token.unwrap_or_default(),
        scope: response.scope.unwrap_or_default(),
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

async fn request_token(mut form: Vec<(&str, String)>) -> Res<Token> {
    form.push(("client_id", config::spotify_client_id()?));
    if let Some(secret) = config::spotify_client_secret() {
        form.push(("client_secret", secret));
    }

    let response = Client::new()
        .post(config::spotify_apitoken_url())
        .form(&form)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<TokenResponse>().await?;
    Ok(into_token(json))
}

/// Exchanges a refresh token for a fresh access token.
///
/// The returned token's `refresh_token` is empty when Spotify did not rotate
/// it; callers keep the old one in that case.
pub async fn refresh_token(refresh_token: &str) -> Res<Token> {
    request_token(vec![
        ("grant_type", "refresh_token".to_string()),
        ("refresh_token", refresh_token.to_string()),
    ])
    .await
}

/// Exchanges an authorization code and the PKCE verifier for a token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    request_token(vec![
        ("grant_type", "authorization_code".to_string()),
        ("code", code.to_string()),
        ("code_verifier", verifier.to_string()),
        ("redirect_uri", config::spotify_redirect_uri()?),
    ])
    .await
}
