/*!
 * Sentinela Traits
 *
 * Traits comuns usados em toda a workspace Sentinela
 */

use async_trait::async_trait;
use crate::error::Result;
use ethereum_types::Address;

/// Trait para provedores de reputação de endereços
///
/// As duas consultas podem falhar (erro de rede ou do serviço); o núcleo de
/// detecção não captura essas falhas e as propaga ao chamador de `detect`.
#[async_trait]
pub trait AddressReputationProvider: Send + Sync {
    /// Verifica se o endereço possui código de contrato associado
    async fn is_contract(&self, address: Address) -> Result<bool>;

    /// Verifica se o código-fonte do contrato está verificado
    async fn is_contract_verified(&self, address: Address) -> Result<bool>;
}
