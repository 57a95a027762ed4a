use crate::replacement::ReplacementSet;

/// Prefix of every change-history message written by this tool.
pub const MESSAGE_PREFIX: &str = "String replacement by grafana-string-replacer";

/// Render the change-history message: the prefix, then each rule as
/// `key<=>value` in declaration order, comma separated. Nothing is escaped.
pub fn audit_message(rules: &ReplacementSet) -> String {
    let pairs: Vec<String> = rules.iter().map(ToString::to_string).collect();
    format!("{MESSAGE_PREFIX}: {}", pairs.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_message_two_rules() {
        let rules = ReplacementSet::parse(["A<=>B", "C<=>D"]).unwrap();
        assert_eq!(
            audit_message(&rules),
            "String replacement by grafana-string-replacer: A<=>B, C<=>D"
        );
    }

    #[test]
    fn test_audit_message_keeps_order_and_raw_text() {
        let rules = ReplacementSet::parse(["z<=>\"q\"", "a<=>b<=>c"]).unwrap();
        assert_eq!(
            audit_message(&rules),
            format!("{MESSAGE_PREFIX}: z<=>\"q\", a<=>b<=>c")
        );
    }
}
