use super::{CallTrace, FlatCall};

/// Achata uma sequência de chamadas em pré-ordem
///
/// Cada nó é emitido antes de qualquer descendente seu, e os irmãos
/// preservam a ordem de inserção (que é a ordem de execução). Essa ordem
/// determina qual chamada suspeita é reportada primeiro quando mais de uma
/// qualifica. Não modifica a árvore de entrada.
pub fn flatten(roots: &[CallTrace]) -> Vec<FlatCall> {
    let mut flat = Vec::new();
    for root in roots {
        flatten_into(root, &mut flat);
    }
    flat
}

/// Achata um nó e sua subárvore recursivamente
fn flatten_into(call: &CallTrace, flat: &mut Vec<FlatCall>) {
    flat.push(FlatCall::from(call));

    if let Some(children) = &call.calls {
        for child in children {
            flatten_into(child, flat);
        }
    }
}
