/*!
 * Sentinela Detector - Analyzer
 *
 * Regras de classificação de uma chamada de aprovação. Módulo sem estado:
 * funções livres, nenhuma informação retida entre chamadas.
 */

use sentinela_core::{
    error::Result,
    traits::AddressReputationProvider,
    types::{ApprovalKind, Verdict},
};
use tracing::debug;

use crate::calldata::{self, ApprovalParams, INFINITE_APPROVAL};
use crate::DetectionConfig;

pub const MSG_INFINITE_APPROVAL: &str = "Infinite approval detected";
pub const MSG_AMOUNT_ABOVE_MAX: &str = "Detected approval with amount greater than max allowed";
pub const MSG_SPENDER_EOA: &str = "Token approval is given to EOA";
pub const MSG_SPENDER_UNVERIFIED: &str = "Token approval is given to unverified contract";
pub const MSG_APPROVAL_FOR_ALL: &str = "Detected approval for all NFTs";

/// Analisa a calldata de uma única chamada e retorna um veredito
///
/// O despacho é feito pelo seletor de função. Para `approve`, as regras são
/// aplicadas em ordem fixa com curto-circuito no primeiro positivo: quantia
/// primeiro, risco do spender depois. Seletores não reconhecidos nunca são
/// suspeitos.
pub async fn analyze(
    input: &str,
    provider: &dyn AddressReputationProvider,
    config: &DetectionConfig,
) -> Result<Verdict> {
    let kind = calldata::classify(input);
    debug!(kind = %kind, "analisando calldata");

    match kind {
        ApprovalKind::Erc20Approve => analyze_approve(input, provider, config).await,
        ApprovalKind::SetApprovalForAll => Ok(analyze_set_approval_for_all(input)),
        ApprovalKind::Unknown => Ok(Verdict::negative()),
    }
}

async fn analyze_approve(
    input: &str,
    provider: &dyn AddressReputationProvider,
    config: &DetectionConfig,
) -> Result<Verdict> {
    let params = calldata::decode_approve(input)?;

    let verdict = check_amount(input, &params, config)?;
    if verdict.is_detected() {
        return Ok(verdict);
    }

    check_spender(&params, provider).await
}

/// Regra de quantia: sentinela de aprovação infinita e teto configurado
fn check_amount(input: &str, params: &ApprovalParams, config: &DetectionConfig) -> Result<Verdict> {
    // Comparação byte a byte do campo bruto com a sentinela, antes de
    // qualquer comparação numérica
    let field = calldata::amount_field(input)?;
    if field.eq_ignore_ascii_case(INFINITE_APPROVAL) {
        return Ok(Verdict::positive(MSG_INFINITE_APPROVAL));
    }

    if params.amount > config.max_allowed_amount {
        return Ok(Verdict::positive(MSG_AMOUNT_ABOVE_MAX));
    }

    Ok(Verdict::negative())
}

/// Regra de risco do spender: EOA e contrato não verificado
///
/// A consulta de verificação só é feita para spenders que são contratos;
/// para EOAs a segunda consulta externa é evitada por completo.
async fn check_spender(
    params: &ApprovalParams,
    provider: &dyn AddressReputationProvider,
) -> Result<Verdict> {
    if !provider.is_contract(params.spender).await? {
        return Ok(Verdict::positive(MSG_SPENDER_EOA));
    }

    if !provider.is_contract_verified(params.spender).await? {
        return Ok(Verdict::positive(MSG_SPENDER_UNVERIFIED));
    }

    Ok(Verdict::negative())
}

/// Regra de `setApprovalForAll`: revogações nunca são suspeitas
///
/// Convenção da codificação ABI canônica: o booleano alinhado à direita
/// termina no dígito `1` quando verdadeiro. A classificação lê apenas o
/// último caractere da calldata.
fn analyze_set_approval_for_all(input: &str) -> Verdict {
    if input.ends_with('1') {
        Verdict::positive(MSG_APPROVAL_FOR_ALL)
    } else {
        Verdict::negative()
    }
}
