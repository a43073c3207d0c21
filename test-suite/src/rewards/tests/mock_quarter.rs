use rewards_export::msg::QuarterSnapshot;

pub const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
pub const BOB: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
pub const CAROL: &str = "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB";
pub const DAVE: &str = "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb";
pub const ERIN: &str = "0x1111111111111111111111111111111111111111";
pub const FRANK: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

// Project fields as pasted by project leads : typographic quotes, bare keys,
// lowercase and checksummed spellings
const QUARTER_JSON: &str = r#"{
    "year": 2024,
    "quarter": 3,
    "tokens": [
        {"symbol": "ETH", "balance": 50, "usd": 150000},
        {"symbol": "WETH", "balance": 5, "usd": 15000},
        {"symbol": "stETH", "balance": 1, "usd": null},
        {"symbol": "USDC", "balance": 200000, "usd": 200000},
        {"symbol": "MOONEY", "balance": 100000000, "usd": 250000}
    ],
    "projects": [
        {
            "id": "1",
            "title": "Lunar relay",
            "reward_distribution": "{“0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed”: 60, “0x1111111111111111111111111111111111111111”: 40}",
            "upfront_payments": ""
        },
        {
            "id": "2",
            "title": "Habitat module",
            "reward_distribution": "{0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359: 100}",
            "upfront_payments": ""
        },
        {
            "id": "3",
            "title": "Outreach",
            "reward_distribution": "{\"0xdbf03b407c01e7cd3cbea99509d93f8dddc8c6fb\": 50, \"0xabcdefabcdefabcdefabcdefabcdefabcdefabcd\": 50}",
            "upfront_payments": "{\"0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB\": 0.01}"
        }
    ],
    "member_ballots": [
        {"address": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", "year": 2024, "quarter": 3, "distribution": {"1": 50, "2": 30, "3": 20}},
        {"address": "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359", "year": 2024, "quarter": 3, "distribution": {"1": 40, "3": 60}},
        {"address": "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB", "year": 2024, "quarter": 3, "distribution": {"1": 25, "2": 25, "3": 50}},
        {"address": "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb", "year": 2024, "quarter": 3, "distribution": {"1": 30, "2": 45, "3": 25}}
    ],
    "non_member_ballots": [
        {"address": "0x1111111111111111111111111111111111111111", "year": 2024, "quarter": 3, "distribution": {"2": 100}},
        {"address": "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd", "year": 2024, "quarter": 3, "distribution": {"1": 10, "2": 10, "3": 80}}
    ],
    "voting_power": {
        "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed": 3,
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359": 2,
        "0xdbf03b407c01e7cd3cbea99509d93f8dddc8c6fb": 2,
        "0xd1220a0cf47c7b9be7a2e6ba89f429762e7b9adb": 1,
        "0x1111111111111111111111111111111111111111": 1,
        "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd": 0.5
    },
    "community_circle": {
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb": 70,
        "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd": 30
    },
    "project_costs": null
}"#;

pub fn mock_quarter() -> QuarterSnapshot {
    serde_json::from_str(QUARTER_JSON).unwrap()
}
