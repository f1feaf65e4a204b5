use serde_json::json;
use staybook_core::{AvailabilityResult, Booking, DateInterval, UnitId};
use uuid::Uuid;

fn sample_booking() -> Booking {
    Booking {
        id: Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap(),
        unit: UnitId::new("2nd-floor").unwrap(),
        interval: DateInterval::parse("2025-12-25", "2025-12-28").unwrap(),
        created_at: 1_766_000_000_000,
    }
}

#[test]
fn availability_result_uses_public_response_shape() {
    let result = AvailabilityResult {
        available: false,
        conflicts: vec![sample_booking()],
        suggestions: vec![DateInterval::parse("2025-12-28", "2025-12-31").unwrap()],
    };

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({
            "available": false,
            "conflicts": [{
                "id": "11111111-2222-4333-8444-555555555555",
                "unit": "2nd-floor",
                "checkIn": "2025-12-25",
                "checkOut": "2025-12-28",
                "createdAt": 1_766_000_000_000_i64
            }],
            "suggestions": [{ "checkIn": "2025-12-28", "checkOut": "2025-12-31" }]
        })
    );

    let decoded: AvailabilityResult = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, result);
}

#[test]
fn decoding_rejects_reversed_interval_and_blank_unit() {
    let reversed = json!({ "checkIn": "2025-12-28", "checkOut": "2025-12-25" });
    assert!(serde_json::from_value::<DateInterval>(reversed).is_err());

    let blank_unit = json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "unit": " ",
        "checkIn": "2025-12-25",
        "checkOut": "2025-12-28",
        "createdAt": 0
    });
    assert!(serde_json::from_value::<Booking>(blank_unit).is_err());
}
