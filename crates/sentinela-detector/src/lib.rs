/*!
 * Sentinela Detector
 *
 * Biblioteca para detecção pré-execução de aprovações de token suspeitas
 * em call traces de transações EVM. Examina a chamada de topo e, se
 * inconclusiva, as chamadas aninhadas na ordem de execução, retornando o
 * primeiro veredito positivo.
 */

mod trace;
mod calldata;
mod analyzer;

use ethereum_types::U256;
use sentinela_core::{
    Error,
    error::Result,
    traits::AddressReputationProvider,
    types::{RequestId, TransactionHash, Verdict},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

// Re-exportações públicas
pub use trace::{flatten, CallTrace, FlatCall};
pub use calldata::{
    decode_approve, ApprovalParams, APPROVE_SELECTOR, INFINITE_APPROVAL,
    SET_APPROVAL_FOR_ALL_SELECTOR,
};
pub use analyzer::{
    analyze, MSG_AMOUNT_ABOVE_MAX, MSG_APPROVAL_FOR_ALL, MSG_INFINITE_APPROVAL, MSG_SPENDER_EOA,
    MSG_SPENDER_UNVERIFIED,
};

/// Teto padrão de quantia: 100.000 unidades de um token de 6 decimais
pub const MAX_ALLOWED_AMOUNT_DEFAULT: u64 = 100_000_000_000;

/// Configuração para detecção de aprovações
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Quantia máxima permitida em uma aprovação antes de ser considerada suspeita
    pub max_allowed_amount: U256,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_allowed_amount: U256::from(MAX_ALLOWED_AMOUNT_DEFAULT),
        }
    }
}

/// Requisição de detecção: um trace de topo mais metadados da requisição
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    #[serde(default, rename = "chainId", skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, rename = "txHash", skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<TransactionHash>,
    pub trace: CallTrace,
}

impl DetectionRequest {
    /// Cria uma requisição sem metadados
    pub fn new(trace: CallTrace) -> Self {
        Self {
            id: None,
            chain_id: None,
            tx_hash: None,
            trace,
        }
    }

    /// Deserializa uma requisição a partir de JSON bruto
    pub fn from_json(raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw)
            .map_err(|e| Error::DecodeError(format!("Falha ao deserializar requisição: {}", e)))
    }
}

/// Resposta de detecção: o veredito final junto à requisição de origem
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResponse {
    pub request: DetectionRequest,
    pub verdict: Verdict,
}

/// Detector de aprovações suspeitas em traces de transações
///
/// Sem estado entre requisições; cada chamada a `detect` é independente.
pub struct ApprovalDetector {
    config: DetectionConfig,
    reputation: Arc<dyn AddressReputationProvider>,
}

impl ApprovalDetector {
    /// Cria um novo detector
    pub fn new(
        reputation: Arc<dyn AddressReputationProvider>,
        config: Option<DetectionConfig>,
    ) -> Self {
        Self {
            config: config.unwrap_or_default(),
            reputation,
        }
    }

    /// Verifica um trace e retorna exatamente um veredito
    ///
    /// A chamada de topo é analisada primeiro, por completo. Se o resultado
    /// for negativo e houver chamadas aninhadas, elas são achatadas em
    /// pré-ordem e analisadas uma por vez, parando no primeiro veredito
    /// positivo. O curto-circuito limita o número de consultas externas de
    /// reputação ao mínimo necessário.
    pub async fn detect(&self, request: DetectionRequest) -> Result<DetectionResponse> {
        let verdict = self.detect_trace(&request.trace).await?;
        Ok(DetectionResponse { request, verdict })
    }

    async fn detect_trace(&self, root: &CallTrace) -> Result<Verdict> {
        let verdict = analyzer::analyze(&root.input, self.reputation.as_ref(), &self.config).await?;
        if verdict.is_detected() {
            debug!(message = ?verdict.message, "aprovação suspeita na chamada de topo");
            return Ok(verdict);
        }

        if let Some(calls) = &root.calls {
            let flat = trace::flatten(calls);
            debug!(nested = flat.len(), "analisando chamadas aninhadas");

            for call in &flat {
                let verdict =
                    analyzer::analyze(&call.input, self.reputation.as_ref(), &self.config).await?;
                if verdict.is_detected() {
                    debug!(to = %call.to, message = ?verdict.message, "aprovação suspeita em chamada aninhada");
                    return Ok(verdict);
                }
            }
        }

        Ok(Verdict::negative())
    }
}
