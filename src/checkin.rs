use std::{fmt, time::Duration};

use alloy::{
    hex,
    primitives::Address,
    signers::{local::PrivateKeySigner, Signer},
};
use serde::Deserialize;
use serde_json::json;
use tokio::task::JoinSet;

use crate::{
    config::Config,
    constants::CHAIN_ID,
    error::{Error, Result},
    graphql::GqlClient,
    siwe::SiweMessage,
    utils::{read_private_keys, read_proxies},
};

const NONCE_MUTATION: &str = "\
mutation getNonce($input: NonceInput!) {
  nonce(input: $input) {
    status
    message
    data
  }
}";

const LOGIN_MUTATION: &str = "\
mutation login($input: LoginInput!) {
  login(input: $input) {
    status
    message
    data {
      accessToken
      address
    }
  }
}";

const CHECK_IN_MUTATION: &str = "\
mutation checkedIn {
  checkIn {
    status
  }
}";

#[derive(Deserialize)]
struct NonceResponse {
    nonce: NoncePayload,
}

#[derive(Deserialize)]
struct NoncePayload {
    status: String,
    message: Option<String>,
    data: Option<String>,
}

#[derive(Deserialize)]
struct LoginResponse {
    login: LoginPayload,
}

#[derive(Deserialize)]
struct LoginPayload {
    status: String,
    message: Option<String>,
    data: Option<SessionData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionData {
    access_token: String,
    address: String,
}

#[derive(Deserialize)]
struct CheckInResponse {
    #[serde(rename = "checkIn")]
    check_in: CheckInPayload,
}

#[derive(Deserialize)]
struct CheckInPayload {
    status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInStatus {
    Success,
    AlreadyCheckedIn,
}

impl CheckInStatus {
    fn from_api(status: &str) -> Result<Self> {
        match status {
            "SUCCESS" => Ok(Self::Success),
            "ALREADY_CHECKED_IN" => Ok(Self::AlreadyCheckedIn),
            other => Err(Error::CheckIn(format!(
                "unexpected check-in status: {other}"
            ))),
        }
    }
}

impl fmt::Display for CheckInStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "SUCCESS",
            Self::AlreadyCheckedIn => "ALREADY_CHECKED_IN",
        })
    }
}

fn extract_challenge(payload: NoncePayload) -> Result<String> {
    payload.data.ok_or_else(|| {
        Error::Auth(format!(
            "nonce response carried no challenge (status: {}, message: {})",
            payload.status,
            payload.message.as_deref().unwrap_or("none"),
        ))
    })
}

fn extract_session(payload: LoginPayload) -> Result<SessionData> {
    payload.data.ok_or_else(|| {
        Error::Auth(format!(
            "login response carried no access token (status: {}, message: {})",
            payload.status,
            payload.message.as_deref().unwrap_or("none"),
        ))
    })
}

pub async fn login(client: &mut GqlClient, signer: &PrivateKeySigner) -> Result<()> {
    let address = signer.address();
    tracing::info!("Requesting sign-in challenge for {address}");

    let response: NonceResponse = client
        .request(
            NONCE_MUTATION,
            Some(json!({ "input": { "address": address.to_string() } })),
        )
        .await?;
    let challenge = extract_challenge(response.nonce)?;

    // rendered once; the same text is signed and submitted below
    let signed_message = SiweMessage::new(address, challenge).prepare();
    let signature = signer
        .sign_message(signed_message.as_bytes())
        .await
        .map_err(|e| Error::Auth(format!("failed to sign login message: {e}")))?;

    let response: LoginResponse = client
        .request(
            LOGIN_MUTATION,
            Some(json!({
                "input": {
                    "address": address.to_string(),
                    "chainId": CHAIN_ID,
                    "signature": format!("0x{}", hex::encode(signature.as_bytes())),
                    "signedMessage": signed_message,
                }
            })),
        )
        .await?;
    let session = extract_session(response.login)?;

    tracing::debug!("Logged in as {}", session.address);

    client.set_authorization(&session.access_token)
}

pub async fn check_in(client: &GqlClient) -> Result<CheckInStatus> {
    let response: CheckInResponse = client.request(CHECK_IN_MUTATION, None).await?;

    CheckInStatus::from_api(&response.check_in.status)
}

async fn process_account(signer: &PrivateKeySigner, proxy: Option<&str>) -> Result<CheckInStatus> {
    let mut client = GqlClient::new(proxy)?;

    login(&mut client, signer).await?;
    check_in(&client).await
}

fn validate_proxy_pairing(accounts: usize, proxies: usize) -> Result<()> {
    if proxies > 0 && proxies < accounts {
        return Err(Error::Config(format!(
            "{accounts} accounts paired against {proxies} proxies; every account needs its own proxy"
        )));
    }

    Ok(())
}

pub async fn check_in_for_all(config: Config) -> Result<()> {
    let signers = read_private_keys().await?;
    let proxies = read_proxies().await?;

    validate_proxy_pairing(signers.len(), proxies.len())?;

    let mut handles: JoinSet<(Address, Result<CheckInStatus>)> = JoinSet::new();

    for (i, signer) in signers.into_iter().enumerate() {
        tokio::time::sleep(Duration::from_millis(config.spawn_task_delay)).await;
        let proxy = (!proxies.is_empty()).then(|| proxies[i].clone());

        handles.spawn(async move {
            let address = signer.address();
            let task_result = process_account(&signer, proxy.as_deref()).await;
            (address, task_result)
        });
    }

    while let Some(res) = handles.join_next().await {
        let (address, task_result) = res.unwrap();

        match task_result {
            Ok(status) => tracing::info!("{address}: {status}"),
            Err(e) => tracing::error!("{address}: check-in failed with error {e}"),
        }
    }

    Ok(())
}
