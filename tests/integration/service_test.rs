//! Integration tests for the service boundary operations
//!
//! Every operation takes base64 text and returns JSON text, so these tests
//! only touch strings, the way a remote caller would.

use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;
use structconv::parser::payload::{decode_text, encode_payload};
use structconv::{ConversionConfig, ConverterService};

fn b64(text: &str) -> String {
    encode_payload(text.as_bytes())
}

fn parse(text: &str) -> Value {
    serde_json::from_str(text).expect("service returned invalid JSON")
}

mod convert {
    use super::*;

    #[test]
    fn test_successful_conversion() {
        let service = ConverterService::default();
        let (data_out, report) =
            service.convert_x_to_y("xml", "json", &b64("<root><val>1</val></root>"), None);

        let report = parse(&report);
        assert_eq!(report["status"], "success");
        assert_eq!(
            report["details"],
            "Successfully converted XML to JSON. Nodes processed: 1"
        );

        let output = decode_text(&data_out.unwrap()).unwrap();
        assert_eq!(parse(&output), json!({"root": {"val": "1"}}));
    }

    #[test]
    fn test_options_have_no_effect() {
        let service = ConverterService::default();
        let payload = b64("<a><b>x</b></a>");
        let (plain, _) = service.convert_x_to_y("xml", "json", &payload, None);
        let (with_options, _) =
            service.convert_x_to_y("xml", "json", &payload, Some(r#"{"pretty": false}"#));
        assert_eq!(plain, with_options);
    }

    #[test]
    fn test_unsupported_pair() {
        let service = ConverterService::default();
        let (data_out, report) = service.convert_x_to_y("json", "xml", &b64("{}"), None);
        assert!(data_out.is_none());
        assert_eq!(
            parse(&report),
            json!({
                "status": "error",
                "elapsed_ms": 0,
                "details": "Unsupported conversion pair: json->xml"
            })
        );
    }

    #[test]
    fn test_error_reports_never_carry_output() {
        let service = ConverterService::default();
        for payload in [b64("To nie jest nawet XML <tag"), "@@@".to_string(), b64("")] {
            let (data_out, report) = service.convert_x_to_y("xml", "json", &payload, None);
            let report = parse(&report);
            assert_eq!(report["status"], "error");
            assert!(report["details"].is_string());
            assert!(data_out.is_none());
        }
    }

    #[test]
    fn test_payload_limit_from_config() {
        let service =
            ConverterService::new(ConversionConfig::default().with_max_payload_bytes(2048));
        let big = b64(&format!("<a>{}</a>", "y".repeat(4096)));
        let (data_out, report) = service.convert_x_to_y("xml", "json", &big, None);
        assert!(data_out.is_none());
        assert!(parse(&report)["details"]
            .as_str()
            .unwrap()
            .contains("Payload too large"));
    }
}

mod detect {
    use super::*;

    #[test]
    fn test_detect_xml() {
        let service = ConverterService::default();
        let (format, metadata) = service.detect_format(&b64("<root>Hello</root>"));
        assert_eq!(format, "xml");
        assert_eq!(
            parse(&metadata),
            json!({"encoded_length": 24, "decoded_byte_length": 18})
        );
    }

    #[test]
    fn test_detect_json_and_unknown() {
        let service = ConverterService::default();
        assert_eq!(service.detect_format(&b64("[]")).0, "json");
        assert_eq!(service.detect_format(&b64("plain")).0, "unknown");

        let (format, metadata) = service.detect_format("not base64 at all!");
        assert_eq!(format, "unknown");
        assert_eq!(parse(&metadata)["error"], "decode failure");
    }
}

mod validate {
    use super::*;

    #[test]
    fn test_valid_pair() {
        let service = ConverterService::default();
        let (is_valid, details) = service.validate_conversion(
            "xml",
            "json",
            &b64("<note>test</note>"),
            &b64(r#"{"note": "test"}"#),
            "{}",
        );
        assert!(is_valid);
        assert_eq!(
            parse(&details),
            json!({
                "is_valid": true,
                "comparison_kind": "structural_equality",
                "src_format": "xml",
                "dst_format": "json"
            })
        );
    }

    #[test]
    fn test_invalid_pair_explains_difference() {
        let service = ConverterService::default();
        let (is_valid, details) = service.validate_conversion(
            "xml",
            "json",
            &b64("<root><val>1</val></root>"),
            &b64(r#"{"root": {"val": "2"}}"#),
            "{}",
        );
        assert!(!is_valid);
        let details = parse(&details);
        assert_eq!(details["is_valid"], false);
        assert!(details["reason"].as_str().unwrap().contains("$.root.val"));
    }

    #[test]
    fn test_convert_then_validate() {
        let service = ConverterService::default();
        let source = b64(r#"<cfg env="prod"><host>a</host><host>b</host><port>80</port></cfg>"#);
        let (data_out, _) = service.convert_x_to_y("xml", "json", &source, None);
        let (is_valid, details) =
            service.validate_conversion("xml", "json", &source, &data_out.unwrap(), "{}");
        assert!(is_valid, "{}", details);
    }
}

mod listing {
    use super::*;

    #[test]
    fn test_list_supported_conversions() {
        let service = ConverterService::default();
        assert_eq!(
            parse(&service.list_supported_conversions()),
            json!([{"from": "xml", "to": "json"}])
        );
    }
}

#[test]
fn test_concurrent_callers_share_one_service() {
    let service = Arc::new(ConverterService::default());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let xml = format!("<n><i>{}</i></n>", i);
                let (data_out, _) = service.convert_x_to_y("xml", "json", &b64(&xml), None);
                let output = decode_text(&data_out.unwrap()).unwrap();
                assert_eq!(parse(&output), json!({"n": {"i": i.to_string()}}));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
