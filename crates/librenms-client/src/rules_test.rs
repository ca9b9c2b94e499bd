//! Unit tests for rule trees

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use crate::rules::{CONDITION_AND, CONDITION_OR, Rule, RuleContainer};
    use serde_json::json;

    fn linux_web_servers() -> RuleContainer {
        RuleContainer::new(
            CONDITION_AND,
            vec![
                Rule::leaf("devices.os", "string", "text", "equal", "linux"),
                Rule::group(
                    CONDITION_OR,
                    vec![
                        Rule::leaf("devices.hostname", "string", "text", "begins_with", "web"),
                        Rule::leaf("devices.hostname", "string", "text", "begins_with", "www"),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_to_json_omits_empty_attributes() {
        let json: serde_json::Value =
            serde_json::from_str(&linux_web_servers().to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            json!({
                "condition": "AND",
                "joins": [],
                "rules": [
                    {
                        "id": "devices.os",
                        "field": "devices.os",
                        "type": "string",
                        "input": "text",
                        "operator": "equal",
                        "value": "linux"
                    },
                    {
                        "condition": "OR",
                        "rules": [
                            {
                                "id": "devices.hostname",
                                "field": "devices.hostname",
                                "type": "string",
                                "input": "text",
                                "operator": "begins_with",
                                "value": "web"
                            },
                            {
                                "id": "devices.hostname",
                                "field": "devices.hostname",
                                "type": "string",
                                "input": "text",
                                "operator": "begins_with",
                                "value": "www"
                            }
                        ]
                    }
                ],
                "valid": true
            })
        );
    }

    #[test]
    fn test_to_json_keeps_html_characters() {
        let tree = RuleContainer::new(
            CONDITION_AND,
            vec![Rule::leaf("devices.sysDescr", "string", "text", "contains", "<a&b>")],
        );
        let blob = tree.to_json().unwrap();
        assert!(blob.contains("<a&b>"), "blob was escaped: {blob}");
    }

    #[test]
    fn test_parse_stored_blob() {
        let blob = r#"{"condition":"AND","rules":[{"id":"devices.status","field":"devices.status","type":"integer","input":"radio","operator":"equal","value":"1"}],"valid":true,"joins":[]}"#;
        let tree = RuleContainer::from_json(blob).unwrap();
        assert_eq!(tree.condition, CONDITION_AND);
        assert_eq!(tree.rules.len(), 1);
        assert_eq!(tree.rules[0].value_type, "integer");
        assert!(tree.valid);
        assert!(tree.is_well_formed());
    }

    #[test]
    fn test_parse_tolerates_missing_joins_and_valid() {
        let tree = RuleContainer::from_json(r#"{"condition":"OR","rules":[]}"#).unwrap();
        assert!(tree.joins.is_empty());
        assert!(!tree.valid);
    }

    #[test]
    fn test_leaf_and_group_predicates() {
        let leaf = Rule::leaf("devices.os", "string", "text", "equal", "ios");
        assert!(leaf.is_leaf());
        assert!(!leaf.is_group());
        assert_eq!(leaf.id, leaf.field);

        let group = Rule::group(CONDITION_OR, vec![leaf.clone()]);
        assert!(group.is_group());
        assert!(!group.is_leaf());
        assert!(group.is_well_formed());
    }

    #[test]
    fn test_mixed_node_is_not_well_formed() {
        let mut mixed = Rule::group(
            CONDITION_AND,
            vec![Rule::leaf("devices.os", "string", "text", "equal", "ios")],
        );
        mixed.field = "devices.hostname".to_string();
        assert!(!mixed.is_well_formed());

        let tree = RuleContainer::new(CONDITION_AND, vec![mixed]);
        assert!(!tree.is_well_formed());
        // Mixed nodes are still serialized as given
        assert!(tree.to_json().is_ok());
    }

    #[test]
    fn test_empty_node_is_not_well_formed() {
        assert!(!Rule::default().is_well_formed());
        assert!(!RuleContainer::new(CONDITION_AND, Vec::new()).is_well_formed());
        assert!(linux_web_servers().is_well_formed());
    }
}
