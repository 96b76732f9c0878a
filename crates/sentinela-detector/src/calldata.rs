/*!
 * Sentinela Detector - Calldata
 *
 * Decodificação de parâmetros de aprovação a partir de calldata ABI
 */

use ethereum_types::{Address, U256};
use sentinela_core::{Error, error::Result, types::ApprovalKind, utils};

/// Seletor de `approve(address,uint256)`
pub const APPROVE_SELECTOR: &str = "095ea7b3";

/// Seletor de `setApprovalForAll(address,bool)`
pub const SET_APPROVAL_FOR_ALL_SELECTOR: &str = "a22cb465";

/// Sentinela de aprovação infinita: o valor máximo representável no campo
/// de quantia de 256 bits. A comparação é feita byte a byte sobre o campo
/// hexadecimal bruto, nunca numericamente.
pub const INFINITE_APPROVAL: &str =
    "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

const SELECTOR_LEN: usize = 8;
const FIELD_LEN: usize = 64;
const APPROVE_CALLDATA_LEN: usize = SELECTOR_LEN + 2 * FIELD_LEN;

// No campo de 32 bytes, os 12 bytes altos são padding e os 20 baixos são o endereço
const ADDRESS_PAD_LEN: usize = 24;

/// Parâmetros decodificados de uma chamada `approve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalParams {
    pub spender: Address,
    pub amount: U256,
}

/// Classifica a calldata pelo seletor de função
pub fn classify(input: &str) -> ApprovalKind {
    match selector(input) {
        Some(sel) if sel.eq_ignore_ascii_case(APPROVE_SELECTOR) => ApprovalKind::Erc20Approve,
        Some(sel) if sel.eq_ignore_ascii_case(SET_APPROVAL_FOR_ALL_SELECTOR) => {
            ApprovalKind::SetApprovalForAll
        }
        _ => ApprovalKind::Unknown,
    }
}

/// Extrai o seletor de função (8 caracteres hexadecimais) da calldata
pub fn selector(input: &str) -> Option<&str> {
    let data = utils::strip_hex_prefix(input);
    if !data.is_ascii() || data.len() < SELECTOR_LEN {
        return None;
    }
    Some(&data[..SELECTOR_LEN])
}

/// Decodifica os parâmetros de uma calldata de `approve`
///
/// Layout após o prefixo `0x`: 8 caracteres de seletor, campo de spender de
/// 64 caracteres (os últimos 40 são o endereço) e campo de quantia de 64
/// caracteres (inteiro de 256 bits sem sinal, big-endian). Calldata mais
/// curta que o layout resulta em `Error::MalformedInput`.
pub fn decode_approve(input: &str) -> Result<ApprovalParams> {
    let data = approve_window(input)?;

    let spender_hex = &data[SELECTOR_LEN + ADDRESS_PAD_LEN..SELECTOR_LEN + FIELD_LEN];
    let spender = utils::hex_to_address(spender_hex)
        .ok_or_else(|| Error::DecodeError(format!("endereço de spender inválido: {}", spender_hex)))?;

    let amount = utils::parse_u256_hex(amount_field(input)?)?;

    Ok(ApprovalParams { spender, amount })
}

/// Extrai o campo bruto de quantia (64 caracteres) de uma calldata de `approve`
pub fn amount_field(input: &str) -> Result<&str> {
    let data = approve_window(input)?;
    Ok(&data[SELECTOR_LEN + FIELD_LEN..APPROVE_CALLDATA_LEN])
}

/// Valida o comprimento mínimo da calldata de `approve` e retorna a janela útil
fn approve_window(input: &str) -> Result<&str> {
    let data = utils::strip_hex_prefix(input);
    if !data.is_ascii() || data.len() < APPROVE_CALLDATA_LEN {
        return Err(Error::MalformedInput(format!(
            "calldata de approve exige {} caracteres hexadecimais, recebidos {}",
            APPROVE_CALLDATA_LEN,
            data.len()
        )));
    }
    Ok(&data[..APPROVE_CALLDATA_LEN])
}
