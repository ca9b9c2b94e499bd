//! Unit tests for partial-update payloads

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use crate::models::{
        DeviceGroupUpdateRequest, DeviceUpdateRequest, LocationUpdateRequest, ServiceUpdateRequest,
    };
    use crate::payload::{PartialUpdate, Payload, WireValue};
    use crate::rules::{CONDITION_OR, Rule, RuleContainer};
    use serde_json::json;

    #[test]
    fn test_zero_values_are_kept_and_nothing_else() {
        let payload = ServiceUpdateRequest::new().set_ignore(false).payload();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("service_ignore"), Some(&WireValue::from(false)));

        let payload = ServiceUpdateRequest::new().set_description("").payload();
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({ "service_desc": "" }));

        let payload = LocationUpdateRequest::new().set_latitude(0.0).payload();
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"lat":0}"#);
    }

    #[test]
    fn test_unset_request_is_empty() {
        assert!(PartialUpdate::is_empty(&LocationUpdateRequest::new()));
        assert!(PartialUpdate::is_empty(&ServiceUpdateRequest::new()));
        assert!(PartialUpdate::is_empty(&DeviceGroupUpdateRequest::new()));
        assert!(PartialUpdate::is_empty(&DeviceUpdateRequest::new()));
        assert_eq!(serde_json::to_string(&Payload::new()).unwrap(), "{}");
    }

    #[test]
    fn test_location_payload_encodes_flexible_values() {
        let payload = LocationUpdateRequest::new()
            .set_name("dc1")
            .set_fixed_coordinates(true)
            .set_latitude(37.5)
            .set_longitude(-122.25)
            .payload();
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"fixed_coordinates":1,"lat":37.5,"lng":-122.25,"location":"dc1"}"#
        );
    }

    #[test]
    fn test_service_payload_uses_prefixed_names() {
        let payload = ServiceUpdateRequest::new()
            .set_name("web")
            .set_ip("192.0.2.10")
            .set_param("-p 8080")
            .set_service_type("http")
            .set_ignore(true)
            .payload();
        let names: Vec<&str> = payload.field_names().collect();
        assert_eq!(
            names,
            vec![
                "service_ignore",
                "service_ip",
                "service_name",
                "service_param",
                "service_type"
            ]
        );
        assert_eq!(payload.get("service_ignore"), Some(&WireValue::from(true)));
    }

    #[test]
    fn test_device_group_payload_carries_serialized_rules() {
        let rules = RuleContainer::new(
            CONDITION_OR,
            vec![Rule::leaf("devices.hostname", "string", "text", "begins_with", "web")],
        );
        let payload = DeviceGroupUpdateRequest::new()
            .set_description("web servers")
            .set_rules(&rules)
            .unwrap()
            .payload();

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["desc"], "web servers");
        let blob = value["rules"].as_str().unwrap();
        assert_eq!(RuleContainer::from_json(blob).unwrap(), rules);
        assert!(!payload.contains_key("name"));
        assert!(!payload.contains_key("type"));
    }

    #[test]
    fn test_device_group_payload_sends_empty_device_list() {
        let payload = DeviceGroupUpdateRequest::new().set_devices(Vec::new()).payload();
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({ "devices": [] }));
    }

    #[test]
    fn test_device_payload_uses_parallel_arrays() {
        let body = DeviceUpdateRequest::new()
            .set_notes("rack 4")
            .set_ignore(false)
            .set_poller_group(0)
            .payload()
            .into_field_data();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "field": ["ignore", "notes", "poller_group"],
                "data": [0, "rack 4", 0],
            })
        );
    }

    #[test]
    fn test_device_payload_extra_fields() {
        let body = DeviceUpdateRequest::new()
            .set_field("lat", 51.5)
            .set_sys_name("core-1")
            .payload()
            .into_field_data();
        assert_eq!(body.field, vec!["lat", "sysName"]);
        assert_eq!(serde_json::to_string(&body.data).unwrap(), r#"[51.5,"core-1"]"#);
    }

    #[test]
    fn test_typed_setter_wins_over_extra_field() {
        let payload = DeviceUpdateRequest::new()
            .set_field("notes", "old")
            .set_notes("new")
            .payload();
        assert_eq!(payload.get("notes"), Some(&WireValue::from("new")));
    }

    #[test]
    fn test_empty_device_payload_has_empty_arrays() {
        let body = DeviceUpdateRequest::new().payload().into_field_data();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "field": [], "data": [] })
        );
    }

    #[test]
    fn test_non_finite_float_fails_to_encode() {
        let payload = LocationUpdateRequest::new().set_latitude(f64::NAN).payload();
        assert!(serde_json::to_string(&payload).is_err());
    }
}
