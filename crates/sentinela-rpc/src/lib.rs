/*!
 * Sentinela RPC
 *
 * Provedor de reputação de endereços: existência de código de contrato via
 * node Ethereum (eth_getCode) e status de verificação de código-fonte via
 * API compatível com Etherscan.
 */

use async_trait::async_trait;
use ethereum_types::Address;
use parking_lot::RwLock;
use sentinela_core::{traits::AddressReputationProvider, Error, error::Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;
use web3::{transports::Http, Web3};

/// Configuração do provedor de reputação
#[derive(Debug, Clone)]
pub struct ReputationConfig {
    pub rpc_endpoint: String,
    pub verifier_endpoint: String,
    pub verifier_api_key: Option<String>,
    pub timeout: Duration,
    pub use_cache: bool,
    pub cache_ttl: Duration,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            rpc_endpoint: "http://localhost:8545".to_string(),
            verifier_endpoint: "https://api.etherscan.io".to_string(),
            verifier_api_key: None,
            timeout: Duration::from_secs(30),
            use_cache: true,
            cache_ttl: Duration::from_secs(60),
        }
    }
}

/// Resposta da API de verificação (formato Etherscan `getsourcecode`)
#[derive(Debug, Deserialize)]
struct VerifierResponse {
    result: Vec<VerifierRecord>,
}

#[derive(Debug, Deserialize)]
struct VerifierRecord {
    #[serde(rename = "SourceCode", default)]
    source_code: String,
}

/// Provedor de reputação baseado em RPC
///
/// As duas consultas são independentes e cacheadas separadamente por
/// endereço, com TTL configurável. Falhas de rede ou do serviço são
/// mapeadas para `Error::ReputationLookup` e propagadas sem retry.
pub struct RpcReputationProvider {
    web3: Web3<Http>,
    http: reqwest::Client,
    config: ReputationConfig,
    cache: RwLock<HashMap<String, (bool, Instant)>>,
}

impl RpcReputationProvider {
    /// Cria um novo provedor; não realiza nenhuma chamada de rede
    pub fn new(config: ReputationConfig) -> Result<Self> {
        let transport = Http::new(&config.rpc_endpoint)
            .map_err(|e| Error::RpcError(format!("Falha ao criar transporte HTTP: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::ReputationLookup(format!("Falha ao criar cliente HTTP: {}", e)))?;

        Ok(Self {
            web3: Web3::new(transport),
            http,
            config,
            cache: RwLock::new(HashMap::new()),
        })
    }

    fn cached(&self, key: &str) -> Option<bool> {
        if !self.config.use_cache {
            return None;
        }

        let cache = self.cache.read();
        cache
            .get(key)
            .and_then(|(value, stored_at)| (stored_at.elapsed() < self.config.cache_ttl).then_some(*value))
    }

    fn store(&self, key: String, value: bool) {
        if self.config.use_cache {
            self.cache.write().insert(key, (value, Instant::now()));
        }
    }

    fn verifier_url(&self, address: Address) -> String {
        let mut url = format!(
            "{}/api?module=contract&action=getsourcecode&address=0x{:x}",
            self.config.verifier_endpoint.trim_end_matches('/'),
            address
        );

        if let Some(api_key) = &self.config.verifier_api_key {
            url.push_str("&apikey=");
            url.push_str(api_key);
        }

        url
    }
}

#[async_trait]
impl AddressReputationProvider for RpcReputationProvider {
    /// Verifica se o endereço possui código associado via `eth_getCode`
    async fn is_contract(&self, address: Address) -> Result<bool> {
        let cache_key = format!("code_{:x}", address);
        if let Some(hit) = self.cached(&cache_key) {
            return Ok(hit);
        }

        let code = self
            .web3
            .eth()
            .code(address, None)
            .await
            .map_err(|e| Error::ReputationLookup(format!("eth_getCode falhou: {}", e)))?;

        let is_contract = !code.0.is_empty();
        debug!(address = %format!("0x{:x}", address), is_contract, "consulta de existência de contrato");

        self.store(cache_key, is_contract);
        Ok(is_contract)
    }

    /// Verifica se o código-fonte do contrato está publicado na API de verificação
    async fn is_contract_verified(&self, address: Address) -> Result<bool> {
        let cache_key = format!("verified_{:x}", address);
        if let Some(hit) = self.cached(&cache_key) {
            return Ok(hit);
        }

        let response: VerifierResponse = self
            .http
            .get(self.verifier_url(address))
            .send()
            .await
            .map_err(|e| Error::ReputationLookup(format!("Consulta de verificação falhou: {}", e)))?
            .json()
            .await
            .map_err(|e| Error::ReputationLookup(format!("Resposta de verificação inválida: {}", e)))?;

        let verified = response
            .result
            .first()
            .map_or(false, |record| !record.source_code.is_empty());
        debug!(address = %format!("0x{:x}", address), verified, "consulta de verificação de contrato");

        self.store(cache_key, verified);
        Ok(verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> RpcReputationProvider {
        RpcReputationProvider::new(ReputationConfig {
            verifier_endpoint: server.uri(),
            ..ReputationConfig::default()
        })
        .unwrap()
    }

    fn spender() -> Address {
        Address::from_low_u64_be(0xab)
    }

    #[tokio::test]
    async fn test_is_contract_verified_with_published_source() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api"))
            .and(query_param("module", "contract"))
            .and(query_param("action", "getsourcecode"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "1",
                "message": "OK",
                "result": [{"SourceCode": "contract Token {}"}]
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(provider.is_contract_verified(spender()).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_contract_verified_with_empty_source() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "0",
                "message": "NOTOK",
                "result": [{"SourceCode": ""}]
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(!provider.is_contract_verified(spender()).await.unwrap());
    }

    #[tokio::test]
    async fn test_verification_result_is_cached() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "1",
                "message": "OK",
                "result": [{"SourceCode": "contract Token {}"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(provider.is_contract_verified(spender()).await.unwrap());
        assert!(provider.is_contract_verified(spender()).await.unwrap());
    }

    #[tokio::test]
    async fn test_verification_service_error_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.is_contract_verified(spender()).await.unwrap_err();
        assert!(matches!(err, Error::ReputationLookup(_)));
    }

    #[test]
    fn test_verifier_url_includes_api_key() {
        let provider = RpcReputationProvider::new(ReputationConfig {
            verifier_endpoint: "https://api.etherscan.io/".to_string(),
            verifier_api_key: Some("KEY".to_string()),
            ..ReputationConfig::default()
        })
        .unwrap();

        let url = provider.verifier_url(spender());
        assert!(url.starts_with("https://api.etherscan.io/api?module=contract"));
        assert!(url.ends_with("&apikey=KEY"));
        assert!(url.contains("address=0x00000000000000000000000000000000000000ab"));
    }
}
