use pack_utils::core::enums::{self, flexible, EnumDefault};
use pack_utils::core::json::JsonSettings;
use pack_utils::{enum_contract, EnumContract, NamingStrategy, PackError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

enum_contract! {
    #[derive(Serialize, Deserialize)]
    pub enum EnumTest {
        Undefined = 0,
        ValueTest1 = 1 => "first value",
        ValueTest2 = 2,
    }
}

enum_contract! {
    #[derive(Serialize, Deserialize)]
    pub enum Gateway {
        Stone = 10,
        Cielo = 20 => "Cielo S.A.",
    }
}

#[derive(Debug, Deserialize)]
struct FlexibleExample {
    #[serde(deserialize_with = "flexible::deserialize")]
    my_enum: EnumTest,
    #[serde(default, deserialize_with = "flexible::option::deserialize")]
    my_enum_nullable: Option<EnumTest>,
}

fn gateway_or_cielo<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Gateway>, D::Error> {
    enums::deserialize_with_default(deserializer, Gateway::Cielo)
}

#[derive(Debug, Deserialize)]
struct DefaultExample {
    #[serde(default, deserialize_with = "gateway_or_cielo")]
    gateway: Option<Gateway>,
}

#[test]
fn test_contract_metadata() {
    assert_eq!(EnumTest::NAME, "EnumTest");
    assert_eq!(EnumTest::VARIANTS.len(), 3);
    assert_eq!(EnumTest::ValueTest1.name(), "ValueTest1");
    assert_eq!(EnumTest::ValueTest2.value(), 2);
    assert_eq!(EnumTest::ValueTest1.description(), Some("first value"));
    assert_eq!(EnumTest::ValueTest2.description(), None);
    assert_eq!(EnumTest::fallback(), EnumTest::Undefined);
    assert_eq!(Gateway::fallback(), Gateway::Stone);
}

#[test]
fn test_enum_with_contract_serialization() {
    #[derive(Serialize, Deserialize)]
    struct Holder {
        my_enum: EnumTest,
    }

    let holder = Holder {
        my_enum: EnumTest::ValueTest1,
    };
    assert_eq!(
        JsonSettings::snake_case().serialize(&holder).unwrap(),
        r#"{"my_enum":"value_test_1"}"#
    );
    assert_eq!(
        JsonSettings::camel_case().serialize(&holder).unwrap(),
        r#"{"myEnum":"valueTest1"}"#
    );

    let parsed: Holder = JsonSettings::snake_case()
        .deserialize(r#"{"my_enum":"value_test_1"}"#)
        .unwrap();
    assert_eq!(parsed.my_enum, EnumTest::ValueTest1);
}

#[test]
fn test_flexible_reading() {
    let parsed: FlexibleExample =
        serde_json::from_value(json!({ "my_enum": "value_test1", "my_enum_nullable": 2 })).unwrap();
    assert_eq!(parsed.my_enum, EnumTest::ValueTest1);
    assert_eq!(parsed.my_enum_nullable, Some(EnumTest::ValueTest2));

    let parsed: FlexibleExample =
        serde_json::from_value(json!({ "my_enum": "unknown", "my_enum_nullable": "unknown" })).unwrap();
    assert_eq!(parsed.my_enum, EnumTest::Undefined);
    assert_eq!(parsed.my_enum_nullable, None);

    let parsed: FlexibleExample = serde_json::from_value(json!({ "my_enum": 99 })).unwrap();
    assert_eq!(parsed.my_enum, EnumTest::Undefined);
    assert_eq!(parsed.my_enum_nullable, None);
}

#[test]
fn test_flexible_reading_through_settings() {
    let settings = JsonSettings::new(NamingStrategy::Camel).use_flexible_enum_converter();
    let parsed: FlexibleExample = settings
        .deserialize(r#"{"myEnum":"VALUE_TEST_2","myEnumNullable":null}"#)
        .unwrap();
    assert_eq!(parsed.my_enum, EnumTest::ValueTest2);
    assert_eq!(parsed.my_enum_nullable, None);
}

#[derive(Debug, Deserialize)]
struct PlainExample {
    my_enum: EnumTest,
    gateway: Gateway,
}

#[test]
fn test_flexible_settings_fall_back_on_unknown_values() {
    let settings = JsonSettings::new(NamingStrategy::Camel).use_flexible_enum_converter();

    let parsed: PlainExample = settings
        .deserialize(r#"{"myEnum":"value3","gateway":"rede"}"#)
        .unwrap();
    assert_eq!(parsed.my_enum, EnumTest::Undefined);
    assert_eq!(parsed.gateway, Gateway::Stone);

    let parsed: PlainExample = settings
        .deserialize(r#"{"myEnum":7,"gateway":30}"#)
        .unwrap();
    assert_eq!(parsed.my_enum, EnumTest::Undefined);
    assert_eq!(parsed.gateway, Gateway::Stone);

    let parsed: PlainExample = settings
        .deserialize(r#"{"myEnum":"value_test2","gateway":"CIELO"}"#)
        .unwrap();
    assert_eq!(parsed.my_enum, EnumTest::ValueTest2);
    assert_eq!(parsed.gateway, Gateway::Cielo);

    assert!(JsonSettings::camel_case()
        .deserialize::<PlainExample>(r#"{"myEnum":"value3","gateway":"stone"}"#)
        .is_err());
}

#[test]
fn test_nullable_default_reader() {
    let parsed: DefaultExample = serde_json::from_value(json!({ "gateway": "stone" })).unwrap();
    assert_eq!(parsed.gateway, Some(Gateway::Stone));

    let parsed: DefaultExample = serde_json::from_value(json!({ "gateway": "invalid_value" })).unwrap();
    assert_eq!(parsed.gateway, Some(Gateway::Cielo));

    let parsed: DefaultExample = serde_json::from_value(json!({ "gateway": 30 })).unwrap();
    assert_eq!(parsed.gateway, None);

    let parsed: DefaultExample = serde_json::from_value(json!({ "gateway": null })).unwrap();
    assert_eq!(parsed.gateway, None);

    let parsed: DefaultExample = serde_json::from_value(json!({})).unwrap();
    assert_eq!(parsed.gateway, None);

    let reader = EnumDefault::new(Gateway::Stone);
    assert_eq!(reader.read(&json!(20)), Some(Gateway::Cielo));
}

#[test]
fn test_descriptions_and_lookup() {
    assert_eq!(
        enums::enum_from_description::<Gateway>("Cielo S.A.", false).unwrap(),
        Gateway::Cielo
    );
    assert_eq!(
        enums::enum_from_description::<Gateway>("Stone", false).unwrap(),
        Gateway::Stone
    );

    let err = enums::enum_from_description::<Gateway>("Rede", false).unwrap_err();
    assert!(matches!(err, PackError::NotFound { .. }));
    assert_eq!(err.to_string(), "Rede not found in Gateway");

    assert_eq!(enums::all_with_description::<Gateway>(), vec![Gateway::Cielo]);
    assert_eq!(enums::description_or_empty(Gateway::Stone), "");
}

#[test]
fn test_parse_and_convert() {
    assert_eq!(enums::parse_enum::<Gateway>("cielo"), Some(Gateway::Cielo));
    assert_eq!(enums::parse_enum::<Gateway>("10"), Some(Gateway::Stone));
    assert_eq!(enums::parse_enum::<Gateway>("11"), None);

    assert_eq!(enums::convert_to_enum::<Gateway>(Some("nope")), Gateway::Stone);
    assert!(enums::is_valid_to_parse::<Gateway>(Some("20"), false));

    assert_eq!(
        enums::schema_values::<EnumTest>(NamingStrategy::Snake),
        vec!["undefined", "value_test_1", "value_test_2"]
    );
}
