use serde::{Deserialize, Serialize};

/// Nó do trace de execução, no formato produzido pelo `callTracer` do Geth
///
/// Cada nó é dono exclusivo dos seus filhos; a árvore espelha invocações
/// aninhadas reais de contratos e portanto não contém ciclos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTrace {
    pub from: String,
    pub to: String,
    pub input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub call_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calls: Option<Vec<CallTrace>>,
}

/// Chamada achatada: um `CallTrace` sem o campo `calls`
///
/// Produzida apenas pelo achatamento em pré-ordem e nunca modificada depois.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatCall {
    pub from: String,
    pub to: String,
    pub input: String,
    pub value: Option<String>,
    pub call_type: Option<String>,
}

impl From<&CallTrace> for FlatCall {
    fn from(call: &CallTrace) -> Self {
        Self {
            from: call.from.clone(),
            to: call.to.clone(),
            input: call.input.clone(),
            value: call.value.clone(),
            call_type: call.call_type.clone(),
        }
    }
}
