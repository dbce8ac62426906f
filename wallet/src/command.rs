//! Presentation of a plan: raw transaction JSON and the node command line.

use scrambler_types::TransactionPlan;

/// Pretty-printed `{ "inputs": [...], "outputs": {...} }`.
pub fn raw_transaction_json(plan: &TransactionPlan) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(plan)
}

/// `<program> createrawtransaction '<inputs>' '<outputs>'`, ready to paste
/// into a shell.
pub fn create_raw_transaction_command(
    program: &str,
    plan: &TransactionPlan,
) -> Result<String, serde_json::Error> {
    let inputs = serde_json::to_string(&plan.inputs)?;
    let outputs = serde_json::to_string(&plan.outputs)?;
    Ok(format!(
        "{program} createrawtransaction {} {}",
        shell_quote(&inputs),
        shell_quote(&outputs)
    ))
}

/// Single-quote `s` for a POSIX shell.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrambler_types::{InputRef, OutputMap};

    fn plan() -> TransactionPlan {
        let mut outputs = OutputMap::new();
        outputs.insert("S1a".into(), "0.00000001".parse().unwrap());
        outputs.insert("S2b".into(), "3".parse().unwrap());
        TransactionPlan {
            inputs: vec![InputRef {
                txid: "abc".into(),
                vout: 0,
            }],
            outputs,
        }
    }

    #[test]
    fn command_embeds_compact_json() {
        let cmd = create_raw_transaction_command("gridcoin-cli", &plan()).unwrap();
        assert_eq!(
            cmd,
            r#"gridcoin-cli createrawtransaction '[{"txid":"abc","vout":0}]' '{"S1a":0.00000001,"S2b":3}'"#
        );
    }

    #[test]
    fn single_quotes_are_escaped() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn pretty_json_keeps_plain_decimals() {
        let json = raw_transaction_json(&plan()).unwrap();
        assert!(json.contains("\"S1a\": 0.00000001"));
        assert!(!json.contains("e-"));
    }
}
