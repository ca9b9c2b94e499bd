//! Unit tests for the flexible codecs

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use crate::flexible::{FlexBool, FlexFloat};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Flags {
        ignore: FlexBool,
        disabled: FlexBool,
    }

    #[test]
    fn test_flex_bool_decodes_literals_and_integers() {
        assert_eq!(serde_json::from_str::<FlexBool>("true").unwrap(), FlexBool(true));
        assert_eq!(serde_json::from_str::<FlexBool>("false").unwrap(), FlexBool(false));
        assert_eq!(serde_json::from_str::<FlexBool>("1").unwrap(), FlexBool(true));
        assert_eq!(serde_json::from_str::<FlexBool>("0").unwrap(), FlexBool(false));
    }

    #[test]
    fn test_flex_bool_nonzero_is_true() {
        assert!(serde_json::from_str::<FlexBool>("2").unwrap().get());
        assert!(serde_json::from_str::<FlexBool>("-1").unwrap().get());
    }

    #[test]
    fn test_flex_bool_rejects_strings_and_null() {
        assert!(serde_json::from_str::<FlexBool>("\"1\"").is_err());
        assert!(serde_json::from_str::<FlexBool>("\"true\"").is_err());
        assert!(serde_json::from_str::<FlexBool>("null").is_err());
    }

    #[test]
    fn test_flex_bool_encodes_as_integer() {
        assert_eq!(serde_json::to_string(&FlexBool(true)).unwrap(), "1");
        assert_eq!(serde_json::to_string(&FlexBool(false)).unwrap(), "0");
    }

    #[test]
    fn test_flex_bool_mixed_representations_in_one_object() {
        let flags: Flags = serde_json::from_str(r#"{"ignore": true, "disabled": 0}"#).unwrap();
        assert!(*flags.ignore);
        assert!(!*flags.disabled);
    }

    #[test]
    fn test_flex_bool_round_trip() {
        for value in [true, false] {
            let encoded = serde_json::to_string(&FlexBool(value)).unwrap();
            let decoded: FlexBool = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded.get(), value);
        }
    }

    #[test]
    fn test_flex_float_decodes_number_and_string() {
        assert_eq!(serde_json::from_str::<FlexFloat>("37.5").unwrap().get(), 37.5);
        assert_eq!(serde_json::from_str::<FlexFloat>("\"37.5\"").unwrap().get(), 37.5);
        assert_eq!(serde_json::from_str::<FlexFloat>("-122").unwrap().get(), -122.0);
        assert_eq!(serde_json::from_str::<FlexFloat>("\"-122.25\"").unwrap().get(), -122.25);
    }

    #[test]
    fn test_flex_float_rejects_non_numeric_string() {
        let err = serde_json::from_str::<FlexFloat>("\"north\"").unwrap_err();
        assert!(
            err.to_string().contains("failed to parse float from string"),
            "unexpected error: {err}"
        );
        assert!(serde_json::from_str::<FlexFloat>("true").is_err());
    }

    #[test]
    fn test_flex_float_encodes_without_exponent() {
        assert_eq!(serde_json::to_string(&FlexFloat(37.5)).unwrap(), "37.5");
        assert_eq!(serde_json::to_string(&FlexFloat(1.0)).unwrap(), "1");
        assert_eq!(serde_json::to_string(&FlexFloat(0.000_001)).unwrap(), "0.000001");
        assert_eq!(
            serde_json::to_string(&FlexFloat(1e21)).unwrap(),
            "1000000000000000000000"
        );
    }

    #[test]
    fn test_flex_float_encodes_inside_objects() {
        let value = serde_json::json!({ "lat": FlexFloat(51.5), "lng": FlexFloat(-0.125) });
        assert_eq!(value.to_string(), r#"{"lat":51.5,"lng":-0.125}"#);
    }

    #[test]
    fn test_flex_float_non_finite_is_an_encode_error() {
        assert!(serde_json::to_string(&FlexFloat(f64::NAN)).is_err());
        assert!(serde_json::to_string(&FlexFloat(f64::INFINITY)).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Point {
        value: FlexFloat,
    }

    #[derive(Debug, Deserialize)]
    struct Wrapped {
        #[serde(flatten)]
        point: Point,
    }

    /// Deterministic xorshift64 so failures reproduce
    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }

        /// Uniform in `[0, 1)`
        #[allow(clippy::cast_precision_loss, reason = "53-bit values are exact in f64")]
        fn unit(&mut self) -> f64 {
            (self.next() >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    fn assert_round_trip(value: f64) {
        let encoded = serde_json::to_string(&FlexFloat(value)).unwrap();
        assert!(!encoded.contains(['e', 'E']), "exponent in {encoded}");

        let number: FlexFloat = serde_json::from_str(&encoded).unwrap();
        assert_eq!(number.get().to_bits(), value.to_bits(), "number {encoded}");

        let string: FlexFloat = serde_json::from_str(&format!("\"{encoded}\"")).unwrap();
        assert_eq!(string.get().to_bits(), value.to_bits(), "string {encoded}");

        let wrapped: Wrapped = serde_json::from_str(&format!(r#"{{"value":{encoded}}}"#)).unwrap();
        assert_eq!(
            wrapped.point.value.get().to_bits(),
            value.to_bits(),
            "flattened {encoded}"
        );
    }

    #[test]
    fn test_flex_float_round_trip_edge_values() {
        for value in [
            0.0,
            -0.0,
            1.0,
            37.5,
            -122.419_416,
            -107.068_938_023_999_01,
            1e-7,
            123_456_789.123_456_78,
            f64::MIN_POSITIVE,
            f64::EPSILON,
            f64::MAX,
            f64::MIN,
            5e-324,
            9_007_199_254_740_992.0,
            1e21,
        ] {
            assert_round_trip(value);
        }
    }

    #[test]
    fn test_flex_float_round_trip_coordinates() {
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
        for _ in 0..20_000 {
            let latitude = rng.unit() * 180.0 - 90.0;
            let longitude = rng.unit() * 360.0 - 180.0;
            assert_round_trip(latitude);
            assert_round_trip(longitude);
        }
    }

    #[test]
    fn test_flex_float_round_trip_bit_patterns() {
        let mut rng = XorShift(0x2545_F491_4F6C_DD1D);
        let mut checked = 0;
        while checked < 20_000 {
            let value = f64::from_bits(rng.next());
            if value.is_finite() {
                assert_round_trip(value);
                checked += 1;
            }
        }
    }
}
