use anyhow::Result;
use async_trait::async_trait;
use ethereum_types::Address;
use sentinela_core::traits::AddressReputationProvider;
use sentinela_detector::{ApprovalDetector, DetectionRequest};
use std::sync::Arc;
use tracing::info;

/// Provedor de reputação estático para demonstração: todo spender é tratado
/// como um contrato não verificado
struct StaticReputation;

#[async_trait]
impl AddressReputationProvider for StaticReputation {
    async fn is_contract(&self, _address: Address) -> sentinela_core::error::Result<bool> {
        Ok(true)
    }

    async fn is_contract_verified(&self, _address: Address) -> sentinela_core::error::Result<bool> {
        Ok(false)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Trace no formato do callTracer do Geth: chamada de topo inócua com uma
    // approve aninhada de quantia infinita
    let raw = r#"{
        "trace": {
            "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "to": "0x5fbdb2315678afecb367f032d93f642f64180aa3",
            "input": "0xdeadbeef",
            "type": "CALL",
            "calls": [
                {
                    "from": "0x5fbdb2315678afecb367f032d93f642f64180aa3",
                    "to": "0xdac17f958d2ee523a2206206994597c13d831ec7",
                    "input": "0x095ea7b3000000000000000000000000e8df015ae5dc89e683689388b80a352ce9a4f71fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
                }
            ]
        }
    }"#;

    let request = DetectionRequest::from_json(raw.as_bytes())?;
    let detector = ApprovalDetector::new(Arc::new(StaticReputation), None);

    let response = detector.detect(request).await?;
    info!(detected = response.verdict.detected, "análise concluída");

    if let Some(message) = &response.verdict.message {
        info!("veredito: {}", message);
    }

    println!("{}", serde_json::to_string_pretty(&response.verdict)?);

    Ok(())
}
