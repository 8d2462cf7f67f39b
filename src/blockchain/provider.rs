//! Wallet provider interface (EIP-1193 style `request({method, params})`).
//!
//! # Responsibilities
//! - Define the request surface the bridge consumes
//! - Decode account lists and transaction ids from raw JSON responses
//! - Provide a node-backed provider for headless use

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::transports::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{ProviderConfig, ProviderError, ProviderResult};

/// Lists accounts already authorized for this origin. Never prompts.
pub const ETH_ACCOUNTS: &str = "eth_accounts";
/// Asks the user to authorize accounts. May prompt.
pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
/// Submits a native value transfer signed by the wallet.
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";

/// EIP-1193 error code for a request the user declined.
const USER_REJECTED_CODE: i64 = 4001;

/// Arguments of a single provider request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestArguments {
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
}

impl RequestArguments {
    /// A request without params.
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            params: Vec::new(),
        }
    }

    /// Attach params.
    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }
}

/// Params object of `eth_sendTransaction`.
///
/// Every numeric field is a `0x`-prefixed hex quantity, as wallets expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub gas: String,
    pub value: String,
}

/// An injected wallet: account discovery, authorization and signing.
#[async_trait]
pub trait WalletProvider: Send + Sync + std::fmt::Debug {
    /// Issue a raw request.
    async fn request(&self, args: RequestArguments) -> ProviderResult<Value>;

    /// Accounts already authorized, without prompting.
    async fn accounts(&self) -> ProviderResult<Vec<String>> {
        let response = self.request(RequestArguments::new(ETH_ACCOUNTS)).await?;
        decode_accounts(ETH_ACCOUNTS, response)
    }

    /// Ask the user to authorize accounts.
    async fn request_accounts(&self) -> ProviderResult<Vec<String>> {
        let response = self
            .request(RequestArguments::new(ETH_REQUEST_ACCOUNTS))
            .await?;
        decode_accounts(ETH_REQUEST_ACCOUNTS, response)
    }

    /// Submit a native transfer and return its transaction id.
    async fn send_transaction(&self, transfer: &TransferRequest) -> ProviderResult<String> {
        let params = serde_json::to_value(transfer).map_err(|e| ProviderError::InvalidResponse {
            method: ETH_SEND_TRANSACTION.to_string(),
            reason: e.to_string(),
        })?;
        let response = self
            .request(RequestArguments::new(ETH_SEND_TRANSACTION).with_params(vec![params]))
            .await?;

        match response {
            Value::String(id) => Ok(id),
            other => Err(ProviderError::InvalidResponse {
                method: ETH_SEND_TRANSACTION.to_string(),
                reason: format!("expected transaction id string, got {other}"),
            }),
        }
    }
}

fn decode_accounts(method: &str, response: Value) -> ProviderResult<Vec<String>> {
    serde_json::from_value(response).map_err(|e| ProviderError::InvalidResponse {
        method: method.to_string(),
        reason: e.to_string(),
    })
}

/// Provider backed by a JSON-RPC node that holds unlocked accounts
/// (Anvil, Hardhat, a local Geth dev node).
///
/// Nodes have no authorization prompt, so `eth_requestAccounts` is answered
/// with `eth_accounts`.
#[derive(Clone)]
pub struct HttpWalletProvider {
    provider: DynProvider,
    config: ProviderConfig,
    timeout_duration: Duration,
}

impl HttpWalletProvider {
    /// Create a provider for the configured endpoint.
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            ProviderError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let provider = ProviderBuilder::new().connect_http(url).erased();

        tracing::info!(rpc_url = %config.rpc_url, "Wallet provider initialized");

        Ok(Self {
            provider,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            config,
        })
    }
}

#[async_trait]
impl WalletProvider for HttpWalletProvider {
    async fn request(&self, args: RequestArguments) -> ProviderResult<Value> {
        let method = match args.method.as_str() {
            ETH_REQUEST_ACCOUNTS => ETH_ACCOUNTS.to_string(),
            _ => args.method,
        };
        tracing::debug!(method = %method, "Provider request");

        let fut = self
            .provider
            .raw_request::<Vec<Value>, Value>(Cow::Owned(method), args.params);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(map_transport_error(e)),
            Err(_) => Err(ProviderError::Timeout(self.config.rpc_timeout_secs)),
        }
    }
}

fn map_transport_error(err: TransportError) -> ProviderError {
    match err.as_error_resp() {
        Some(payload) if payload.code == USER_REJECTED_CODE => {
            ProviderError::UserRejected(payload.message.to_string())
        }
        _ => ProviderError::Rpc(err.to_string()),
    }
}

impl std::fmt::Debug for HttpWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpWalletProvider")
            .field("rpc_url", &self.config.rpc_url)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
