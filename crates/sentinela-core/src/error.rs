use thiserror::Error;

/// Erros comuns da biblioteca Sentinela
#[derive(Error, Debug)]
pub enum Error {
    /// Calldata mais curta do que o layout exigido pelo seletor
    #[error("Calldata malformada: {0}")]
    MalformedInput(String),

    /// Campo numérico que não é um inteiro hexadecimal válido
    #[error("Valor numérico inválido: {0}")]
    NumericParse(String),

    /// Falha na consulta ao provedor de reputação de endereços
    #[error("Falha na consulta de reputação: {0}")]
    ReputationLookup(String),

    /// Erro de comunicação com o node Ethereum
    #[error("Erro de RPC: {0}")]
    RpcError(String),

    /// Erro de decodificação de dados
    #[error("Erro de decodificação: {0}")]
    DecodeError(String),

    /// Erro genérico
    #[error("{0}")]
    Other(String),
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;
