use recurring_intent_types::{Address, Destination, Schedule, U256};
use serde_json::json;

use crate::{
    parse, Compiler, MemoryArtifactStore, NullResolver, Planner, PlannerConfig, Registry, StaticResolver,
    Template, ValidationError,
};

const PARSER_CASES: [&str; 3] = [
    "Send 10 PYUSD to alice.eth every Friday until ETH > 3000",
    "Send 1,000.50 PYUSD to 0x1111111111111111111111111111111111111111 every weekly until ETH > 2,500.25",
    "Send 0.5 PYUSD to vitalik.eth every day until ETH > 1800",
];

#[test]
fn test_parser_fixtures() {
    let intents: Vec<_> = PARSER_CASES.iter().map(|c| parse(c).unwrap()).collect();

    assert_eq!(intents[0].amount().to_string(), "10");
    assert_eq!(intents[0].to(), &Destination::Name("alice.eth".into()));
    assert_eq!(intents[0].schedule(), Schedule::Weekly);
    assert_eq!(intents[0].condition().threshold.to_string(), "3000");

    assert_eq!(intents[1].amount().to_string(), "1000.50");
    assert_eq!(intents[1].to(), &Destination::Address(Address::repeat_byte(0x11)));
    assert_eq!(intents[1].condition().threshold.to_string(), "2500.25");

    assert_eq!(intents[2].amount().to_string(), "0.5");
    assert_eq!(intents[2].schedule(), Schedule::Daily);
    assert_eq!(intents[2].condition().symbol, "ETH");
}

#[test]
fn test_parser_fixture_json_shape() {
    let json = serde_json::to_value(parse(PARSER_CASES[0]).unwrap()).unwrap();
    assert_eq!(
        json,
        json!({
            "action": "send",
            "asset": "PYUSD",
            "amount": "10",
            "to": "alice.eth",
            "schedule": "weekly",
            "condition": { "price_gt": true, "symbol": "ETH", "threshold": "3000" }
        })
    );
}

#[tokio::test]
async fn test_validator_fixture() {
    let intent = serde_json::from_value(json!({
        "action": "send",
        "asset": "PYUSD",
        "amount": "10",
        "to": "0x1111111111111111111111111111111111111111",
        "schedule": "weekly",
        "condition": { "price_gt": true, "symbol": "ETH", "threshold": "3000" }
    }))
    .unwrap();

    let planner = Planner::new(&Registry::builtin(), PlannerConfig::default(), NullResolver).unwrap();
    let plan = planner.validate_and_plan(&intent).await.unwrap();
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["chain"], "SEPOLIA");
    assert_eq!(json["chainId"], 11_155_111);
    assert_eq!(json["tokenSym"], "PYUSD");
    assert_eq!(json["tokenAddr"], "0xCaC524BcA292aaade2DF8A05cC58F0a65B1B3bB9");
    assert_eq!(json["tokenDecimals"], 6);
    assert_eq!(json["owner"], "");
    assert_eq!(json["beneficiary"], "0x1111111111111111111111111111111111111111");
    assert_eq!(json["amountUnits"], "10000000");
    assert_eq!(json["periodSeconds"], 604_800);
    assert_eq!(json["oracle"], "0x0000000000000000000000000000000000000001");
    assert_eq!(
        json["symbolBytes32"],
        "0x4554480000000000000000000000000000000000000000000000000000000000"
    );
    assert_eq!(json["thresholdX8"], "300000000000");
}

#[tokio::test]
async fn test_sentence_to_artifacts() {
    let resolver = StaticResolver::new().with_record("alice.eth", "0x2222222222222222222222222222222222222222");
    let planner = Planner::new(&Registry::builtin(), PlannerConfig::default(), resolver).unwrap();
    let compiler = Compiler::new(Template::builtin().unwrap(), MemoryArtifactStore::new());

    let intent = parse(PARSER_CASES[0]).unwrap();
    let plan = planner.validate_and_plan(&intent).await.unwrap();
    assert_eq!(plan.beneficiary(), Address::repeat_byte(0x22));
    assert_eq!(plan.threshold_x8(), U256::from(300_000_000_000u64));

    let out = compiler.compile(&plan).unwrap();
    assert!(out.source.contains("PLANNED_AMOUNT = 10000000;"));
    assert!(out.source.contains("PLANNED_PERIOD = 604800;"));
    assert!(out.source.contains("PLANNED_OWNER = address(0);"));
    assert_eq!(out.manifest.constructor_args().amount_units, plan.amount_units());
    assert_eq!(compiler.store().paths().len(), 2);
}

#[tokio::test]
async fn test_unresolved_fixture_name_stops_pipeline() {
    let planner = Planner::new(&Registry::builtin(), PlannerConfig::default(), NullResolver).unwrap();
    let intent = parse(PARSER_CASES[2]).unwrap();

    let err = planner.validate_and_plan(&intent).await.unwrap_err();
    assert!(matches!(err, ValidationError::UnresolvedBeneficiary { ref name, .. } if name == "vitalik.eth"));
}

#[tokio::test]
async fn test_amount_over_cap_from_sentence() {
    let planner = Planner::new(&Registry::builtin(), PlannerConfig::default(), NullResolver).unwrap();
    let intent = parse(PARSER_CASES[1]).unwrap();

    let err = planner.validate_and_plan(&intent).await.unwrap_err();
    assert!(matches!(err, ValidationError::AmountExceedsCap { .. }));
}
