/*!
 * Sentinela Utils
 *
 * Utilitários comuns usados em toda a workspace Sentinela
 */

use ethereum_types::{Address, U256};
use crate::error::{Error, Result};

/// Remove o prefixo `0x` de uma string hexadecimal, se presente
pub fn strip_hex_prefix(hex: &str) -> &str {
    hex.strip_prefix("0x").unwrap_or(hex)
}

/// Converte uma string hexadecimal para Address
pub fn hex_to_address(hex: &str) -> Option<Address> {
    let bytes = hex::decode(strip_hex_prefix(hex)).ok()?;
    if bytes.len() != Address::len_bytes() {
        return None;
    }
    Some(Address::from_slice(&bytes))
}

/// Converte uma string hexadecimal para U256
pub fn parse_u256_hex(hex: &str) -> Result<U256> {
    let hex_str = strip_hex_prefix(hex);
    U256::from_str_radix(hex_str, 16)
        .map_err(|_| Error::NumericParse(format!("valor hexadecimal inválido: {}", hex)))
}

/// Formata um Address para exibição
pub fn format_address(address: &Address) -> String {
    format!("0x{:x}", address)
}

/// Formata um U256 para exibição
pub fn format_u256(value: &U256) -> String {
    value.to_string()
}
