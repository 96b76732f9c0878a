/*!
 * Sentinela Types
 *
 * Tipos comuns usados em toda a workspace Sentinela
 */

use ethereum_types::H256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alias para hash de transação
pub type TransactionHash = H256;

/// Tipo de chamada de aprovação reconhecida pelo seletor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalKind {
    Erc20Approve,
    SetApprovalForAll,
    Unknown,
}

impl fmt::Display for ApprovalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalKind::Erc20Approve => write!(f, "erc20_approve"),
            ApprovalKind::SetApprovalForAll => write!(f, "set_approval_for_all"),
            ApprovalKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Veredito da análise de uma chamada ou de um trace completo
///
/// `message` está presente se e somente se `detected` é verdadeiro,
/// e descreve a regra específica que disparou.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Verdict {
    /// Cria um veredito positivo com a mensagem da regra que disparou
    pub fn positive<S: Into<String>>(message: S) -> Self {
        Self {
            detected: true,
            message: Some(message.into()),
        }
    }

    /// Cria um veredito negativo
    pub fn negative() -> Self {
        Self {
            detected: false,
            message: None,
        }
    }

    /// Verifica se o veredito é positivo
    pub fn is_detected(&self) -> bool {
        self.detected
    }
}

/// Identificador de requisição
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);
