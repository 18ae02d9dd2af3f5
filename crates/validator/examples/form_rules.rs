//! Validates a small network form the way a form layer would.
//!
//! Run with `RUST_LOG=fieldcheck_validator=debug` to see rejected fields.

use fieldcheck_validator::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let form = json!({
        "name": "core-switch-01",
        "gateway": "10.0.0.1",
        "startIP": "10.0.0.50",
        "endIP": "10.0.0.20",
        "startPort": "8000",
        "endPort": "8080",
        "ipPortList": ["10.0.0.1:80", "192.168.1.1：443"],
    });

    let fields = [
        ("name", FieldKind::Name, None),
        ("gateway", FieldKind::SingleIp, None),
        ("startIP", FieldKind::StartIp, None),
        ("endIP", FieldKind::EndIp, Some("startIP")),
        ("startPort", FieldKind::StartPort, None),
        ("endPort", FieldKind::EndPort, Some("startPort")),
        ("ipPortList", FieldKind::IpPortList, None),
    ];

    for (field, kind, paired_with) in fields {
        let ctx = RuleContext::for_field(field);
        let rule = FieldRule::new(kind);
        let value = &form[field];
        let report = |outcome: Option<ValidationError>| match outcome {
            None => println!("{field:<12} ok"),
            Some(error) => println!("{field:<12} {}", error.message),
        };
        match paired_with {
            Some(start) => rule.run_paired(&ctx, value, report, &form[start]),
            None => rule.run(&ctx, value, report),
        }
    }

    let verdict = validate_port_list(&json!([80, 443, "08080"]), DEFAULT_MAX_COUNT);
    println!("batch ports  {}", serde_json::to_string(&verdict).unwrap_or_default());

    if let Some(rules) = builtin_rule("mac") {
        for rule in rules {
            println!("preset mac   {:?} on {}", rule.check("00-1A-2B-3C-4D-5E").err(), rule.trigger);
        }
    }
}
