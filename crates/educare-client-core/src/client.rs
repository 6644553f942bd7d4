use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use educare_shared::{
    const_config::path::{PathSpec, PATH_AUTH_LOGOUT, PATH_AUTH_SIGNUP, PATH_AUTH_TOKEN, PATH_REST_PREFIX},
    errors::GatewayError,
    internal_error,
    uac::Email,
};
use educare_time::Seconds;
use futures::channel::oneshot;
use reqwest::{header::HeaderValue, Method, StatusCode};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::{
    gateway::{DataGateway, Filter, Table},
    settings::GatewaySettings,
};

/// Talks to the hosted data service over its REST and authentication
/// interfaces. Cheap to clone, clones share the credentials.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    api_client: reqwest::Client,
    inner: Arc<Mutex<ClientInner>>,
}

#[derive(Debug)]
struct ClientInner {
    base_url: String,
    anon_key: SecretString,
    access_token: Option<SecretString>,
    request_timeout: Seconds,
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: SecretString,
}

impl ClientInner {
    #[tracing::instrument]
    fn new(settings: &GatewaySettings) -> Self {
        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            anon_key: settings.anon_key.clone(),
            access_token: None,
            request_timeout: Seconds::new(settings.request_timeout_secs),
        }
    }
}

impl GatewayClient {
    #[tracing::instrument(name = "NEW GATEWAY-CLIENT")]
    pub fn new(settings: &GatewaySettings) -> Self {
        let api_client = reqwest::Client::builder()
            .build()
            .expect("Unable to create reqwest client");
        Self {
            api_client,
            inner: Arc::new(Mutex::new(ClientInner::new(settings))),
        }
    }

    /// Returns `true` once the authentication service has issued a token
    pub fn has_access_token(&self) -> bool {
        self.lock_inner().access_token.is_some()
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, ClientInner> {
        self.inner.lock().expect("mutex poisoned")
    }

    /// Builds a request with the headers every call to the service needs. The
    /// bearer token is the user's access token if one is held, else the
    /// public key.
    fn build_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let inner = self.lock_inner();
        let url = format!("{}{path}", inner.base_url);
        let bearer = inner
            .access_token
            .as_ref()
            .unwrap_or(&inner.anon_key)
            .expose_secret()
            .to_string();
        let request = self
            .api_client
            .request(method, url)
            .header("apikey", inner.anon_key.expose_secret())
            .bearer_auth(bearer);

        // Browsers enforce their own timeouts, reqwest only supports this natively
        #[cfg(not(target_arch = "wasm32"))]
        let request = request.timeout(inner.request_timeout.into());

        request
    }

    fn build_from_spec(&self, path_spec: PathSpec) -> reqwest::RequestBuilder {
        self.build_request(path_spec.method, path_spec.path)
    }

    #[tracing::instrument(skip(on_done))]
    fn initiate_request<F, O>(&self, request: reqwest::RequestBuilder, on_done: F)
    where
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        reqwest_cross::fetch(request, on_done)
    }

    fn send_request_expect_json<U>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> oneshot::Receiver<Result<U, GatewayError>>
    where
        U: Send + DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_json_body(resp).await;
            send_reply(tx, msg);
        };
        self.initiate_request(request, on_done);
        rx
    }

    fn send_request_expect_count(
        &self,
        request: reqwest::RequestBuilder,
    ) -> oneshot::Receiver<Result<u64, GatewayError>> {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_count(resp).await;
            send_reply(tx, msg);
        };
        self.initiate_request(request, on_done);
        rx
    }

    fn send_request_no_wait(&self, request: reqwest::RequestBuilder) {
        self.initiate_request(request, |_| async {});
    }

    fn rest_path(table: Table) -> String {
        format!("{PATH_REST_PREFIX}{}", table.name())
    }
}

impl DataGateway for GatewayClient {
    #[tracing::instrument(skip(self))]
    async fn query_rows<T>(&self, table: Table, filter: &Filter) -> Result<Vec<T>, GatewayError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self
            .build_request(Method::GET, &Self::rest_path(table))
            .query(&filter.to_query_pairs());
        receive(self.send_request_expect_json(request)).await
    }

    #[tracing::instrument(skip(self, record))]
    async fn insert_row<R, T>(&self, table: Table, record: &R) -> Result<T, GatewayError>
    where
        R: Serialize + Sync,
        T: DeserializeOwned + Send + 'static,
    {
        let request = self
            .build_request(Method::POST, &Self::rest_path(table))
            .header("Prefer", "return=representation")
            .json(record);
        let mut rows: Vec<T> = receive(self.send_request_expect_json(request)).await?;
        if rows.is_empty() {
            return Err(GatewayError::Malformed(
                "insert succeeded but no row was returned".to_string(),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    #[tracing::instrument(skip(self))]
    async fn count_rows(&self, table: Table, filter: &Filter) -> Result<u64, GatewayError> {
        let request = self
            .build_request(Method::HEAD, &Self::rest_path(table))
            .header("Prefer", "count=exact")
            .query(&filter.to_query_pairs());
        receive(self.send_request_expect_count(request)).await
    }

    #[tracing::instrument(skip(self, password))]
    async fn verify_credentials(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<bool, GatewayError> {
        let (tx, rx) = oneshot::channel();
        let args = serde_json::json!({
            "email": email.as_ref(),
            "password": password.expose_secret(),
        });
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_login(resp, client).await;
            send_reply(tx, msg);
        };
        self.initiate_request(self.build_from_spec(PATH_AUTH_TOKEN).json(&args), on_done);
        receive(rx).await
    }

    #[tracing::instrument(skip(self, password))]
    async fn register_credentials(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<(), GatewayError> {
        let (tx, rx) = oneshot::channel();
        let args = serde_json::json!({
            "email": email.as_ref(),
            "password": password.expose_secret(),
        });
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_signup(resp).await;
            send_reply(tx, msg);
        };
        self.initiate_request(self.build_from_spec(PATH_AUTH_SIGNUP).json(&args), on_done);
        receive(rx).await
    }

    #[tracing::instrument(skip(self))]
    fn sign_out(&self) {
        if self.lock_inner().access_token.is_none() {
            debug!("no access token held, nothing to revoke");
            return;
        }
        // Build while the token is still set so the service knows which to revoke
        let request = self.build_from_spec(PATH_AUTH_LOGOUT);
        self.lock_inner().access_token = None;
        self.send_request_no_wait(request);
    }
}

fn send_reply<U>(tx: oneshot::Sender<Result<U, GatewayError>>, msg: Result<U, GatewayError>) {
    if tx.send(msg).is_err() {
        debug!("receiver dropped before the response arrived");
    }
}

async fn receive<U>(rx: oneshot::Receiver<Result<U, GatewayError>>) -> Result<U, GatewayError> {
    rx.await
        .map_err(|e| GatewayError::Unreachable(internal_error!(e)))?
}

#[tracing::instrument(err(Debug))]
async fn process_json_body<T>(
    response: reqwest::Result<reqwest::Response>,
) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(format!("failed to parse result as json: {e}")))
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_count(response: reqwest::Result<reqwest::Response>) -> Result<u64, GatewayError> {
    let (response, status) = extract_response(response)?;
    if !status.is_success() {
        return Err(handle_error(response).await);
    }
    response
        .headers()
        .get(reqwest::header::CONTENT_RANGE)
        .and_then(|value: &HeaderValue| value.to_str().ok())
        .and_then(parse_content_range_total)
        .ok_or_else(|| GatewayError::Malformed("count missing from Content-Range".to_string()))
}

#[tracing::instrument(ret, err(Debug), skip(client))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    client: GatewayClient,
) -> Result<bool, GatewayError> {
    let (response, status) = extract_response(response)?;
    match status {
        StatusCode::OK => {
            let token: TokenResponse = response.json().await.map_err(|e| {
                GatewayError::Malformed(format!("failed to parse token response: {e}"))
            })?;
            client.lock_inner().access_token = Some(token.access_token);
            Ok(true)
        }
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
            info!(?status, "credentials rejected");
            Ok(false)
        }
        _ => Err(handle_error(response).await),
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_signup(response: reqwest::Result<reqwest::Response>) -> Result<(), GatewayError> {
    let (response, status) = extract_response(response)?;
    match status {
        status if status.is_success() => Ok(()),
        StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => {
            let body = response.text().await.unwrap_or_default();
            if body.contains("already registered") || body.contains("already exists") {
                Err(GatewayError::Conflict)
            } else {
                Err(GatewayError::Server {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
        _ => Err(handle_error(response).await),
    }
}

#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> GatewayError {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    if status == StatusCode::CONFLICT {
        return GatewayError::Conflict;
    }
    let message = match response.text().await {
        Ok(body) if !body.is_empty() => body,
        Ok(_) => "no body".to_string(),
        Err(_) => "failed to get response body".to_string(),
    };
    GatewayError::Server {
        status: status.as_u16(),
        message,
    }
}

/// Provides a way to standardize the error message
#[tracing::instrument(err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> Result<(reqwest::Response, StatusCode), GatewayError> {
    match response {
        Ok(response) => {
            let status = response.status();
            Ok((response, status))
        }
        Err(e) => {
            info!("Response is err: {e:#?}");
            if e.is_timeout() {
                Err(GatewayError::TimedOut)
            } else {
                Err(GatewayError::Unreachable(e.to_string()))
            }
        }
    }
}

/// Extracts the total from a header like `0-24/3573` or `*/0`
fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
